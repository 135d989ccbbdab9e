//! Ethernet → IPv4 → TCP destination-port decoder.
//!
//! A pure, read-only projection over one borrowed frame. Every stage
//! re-validates a computed end offset against `frame.len()` before touching
//! the bytes: header-declared lengths (the IHL nibble in particular) are
//! never trusted on their own, because a header can claim any length while
//! the buffer behind it stays short.

/// Ethernet header length: dst MAC (6) + src MAC (6) + EtherType (2).
pub const ETH_HDR_LEN: usize = 14;
/// EtherType for IPv4, host byte order.
pub const ETH_P_IP: u16 = 0x0800;
/// Minimum IPv4 header length (IHL = 5, no options).
pub const IPV4_MIN_HDR_LEN: usize = 20;
/// IP protocol number for TCP.
pub const IPPROTO_TCP: u8 = 6;
/// Minimum TCP header length (data offset 5, no options).
pub const TCP_MIN_HDR_LEN: usize = 20;

/// EtherType position inside the Ethernet header.
const ETHERTYPE_OFFSET: usize = 12;
/// Protocol field position inside the IPv4 header.
const IPV4_PROTOCOL_OFFSET: usize = 9;
/// Destination port position inside the TCP header.
const TCP_DST_PORT_OFFSET: usize = 2;

/// Decode the TCP destination port of an IPv4-over-Ethernet frame.
///
/// Returns `None` for everything that is not a well-formed IPv4 TCP
/// segment: wrong EtherType, wrong IP protocol, an IHL below the legal
/// minimum, or a frame truncated at any stage. Callers treat all of those
/// identically (the frame passes through), so the cases are not
/// distinguished.
///
/// The IPv4 header length is `IHL * 4` computed from the frame, never an
/// assumed 20 bytes — real and adversarial traffic carries IP options, and
/// reading the port at the no-options offset of such a frame would return
/// option bytes instead of the port.
pub fn tcp_dst_port(frame: &[u8]) -> Option<u16> {
    // Ethernet: reading the EtherType also proves the full 14-byte header
    // is present.
    if read_u16_be(frame, ETHERTYPE_OFFSET)? != ETH_P_IP {
        return None;
    }

    // IPv4: fixed 20-byte prefix first, then the IHL-derived true length.
    let ip = frame.get(ETH_HDR_LEN..)?;
    if ip.len() < IPV4_MIN_HDR_LEN {
        return None;
    }
    let ip_hdr_len = usize::from(ip[0] & 0x0f) * 4;
    if ip_hdr_len < IPV4_MIN_HDR_LEN || ip.len() < ip_hdr_len {
        return None;
    }
    if ip[IPV4_PROTOCOL_OFFSET] != IPPROTO_TCP {
        return None;
    }

    // TCP: starts after the computed IPv4 header length, and the minimal
    // fixed header must fit in full.
    let tcp = ip.get(ip_hdr_len..)?;
    if tcp.len() < TCP_MIN_HDR_LEN {
        return None;
    }
    read_u16_be(tcp, TCP_DST_PORT_OFFSET)
}

/// Read a big-endian u16 at `offset`, or `None` if it does not fit.
fn read_u16_be(buf: &[u8], offset: usize) -> Option<u16> {
    let bytes = buf.get(offset..offset.checked_add(2)?)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}
