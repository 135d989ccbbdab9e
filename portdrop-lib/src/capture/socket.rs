//! AF_PACKET socket setup.
//!
//! The only unsafe code in the crate lives here: the `if_nametoindex` FFI
//! call and the `sockaddr_ll` bind, which socket2 has no safe builder for.

use std::ffi::CString;
use std::mem;
use std::os::fd::AsRawFd;
use std::time::Duration;

use socket2::{Domain, Protocol, Socket, Type};

use crate::error::{PortdropError, Result};

/// Resolve an interface name to its kernel index.
#[allow(unsafe_code)]
fn interface_index(name: &str) -> Result<u32> {
    let c_name =
        CString::new(name).map_err(|_| PortdropError::InterfaceNotFound(name.to_string()))?;
    // SAFETY: if_nametoindex reads a NUL-terminated string and returns the
    // index, 0 on failure. It retains no memory.
    let index = unsafe { libc::if_nametoindex(c_name.as_ptr()) };
    if index == 0 {
        return Err(PortdropError::InterfaceNotFound(name.to_string()));
    }
    Ok(index)
}

/// Open a raw AF_PACKET socket bound to `interface`, receiving every
/// EtherType (`ETH_P_ALL`).
///
/// The read timeout is what lets capture workers notice a shutdown request
/// on a link with no traffic.
pub fn open_capture_socket(interface: &str, read_timeout: Duration) -> Result<Socket> {
    let capture_err = |source: std::io::Error| PortdropError::Capture {
        interface: interface.to_string(),
        source,
    };

    let index = interface_index(interface)?;
    let protocol = i32::from((libc::ETH_P_ALL as u16).to_be());
    let socket = Socket::new(Domain::PACKET, Type::RAW, Some(Protocol::from(protocol)))
        .map_err(capture_err)?;
    socket.set_read_timeout(Some(read_timeout)).map_err(capture_err)?;
    bind_to_interface(&socket, index).map_err(capture_err)?;
    Ok(socket)
}

/// Bind the packet socket to one interface via `sockaddr_ll`.
#[allow(unsafe_code)]
fn bind_to_interface(socket: &Socket, ifindex: u32) -> std::io::Result<()> {
    // SAFETY: sockaddr_ll is plain data; zeroing it is a valid initial state.
    let mut sll: libc::sockaddr_ll = unsafe { mem::zeroed() };
    sll.sll_family = libc::AF_PACKET as libc::sa_family_t;
    sll.sll_protocol = (libc::ETH_P_ALL as u16).to_be();
    sll.sll_ifindex = ifindex as i32;

    // SAFETY: sll is fully initialized and the length matches its size;
    // the kernel copies the address during bind and retains no pointer.
    let rc = unsafe {
        libc::bind(
            socket.as_raw_fd(),
            std::ptr::addr_of!(sll).cast::<libc::sockaddr>(),
            mem::size_of::<libc::sockaddr_ll>() as libc::socklen_t,
        )
    };
    if rc != 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(())
}
