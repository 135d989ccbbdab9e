//! TCP destination-port drop filter with a raw-socket capture plane.
//!
//! The fast path ([`filter`]) classifies one Ethernet frame per call:
//! IPv4 TCP segment to the configured destination port → [`Verdict::Drop`]
//! plus one counter increment; everything else → [`Verdict::Pass`].
//! The [`capture`] module hosts that path on AF_PACKET sockets and exposes
//! the two shared-state surfaces (blocked port, drop counter) to the
//! control plane.

// AF_PACKET capture is Linux-only. This crate does not compile for other targets.
#![cfg(target_os = "linux")]
// Unsafe is required in two narrow, documented sites, both in
// capture/socket.rs: the libc::if_nametoindex FFI call and the sockaddr_ll
// bind. All other unsafe is denied; the per-frame
// path in `filter` contains none.
#![deny(unsafe_code)]

pub mod capture;
pub mod config;
pub mod error;
pub mod filter;

pub use config::{load_from_path, Config};
pub use error::{PortdropError, Result};
pub use filter::{PortFilter, Verdict};
