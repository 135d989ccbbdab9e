//! The per-frame fast path: decode, compare, count.
//!
//! One entry point per frame, no allocation, no locks, bounded by header
//! sizes. Safe to call concurrently through `&self` from any number of
//! capture workers: the only mutable state is atomic.

mod parse;
mod state;

pub use parse::{tcp_dst_port, ETH_HDR_LEN, IPPROTO_TCP, IPV4_MIN_HDR_LEN, TCP_MIN_HDR_LEN};
pub use state::{BlockedPort, DropCounter};

/// Outcome of processing one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Forward the frame unmodified.
    Pass,
    /// Discard the frame.
    Drop,
}

/// TCP destination-port drop filter.
///
/// Owns the two pieces of state that outlive an invocation: the
/// runtime-writable blocked-port slot and the monotonic drop counter.
/// Everything else lives only for the duration of one [`process`] call.
///
/// [`process`]: PortFilter::process
#[derive(Default)]
pub struct PortFilter {
    blocked: BlockedPort,
    drops: DropCounter,
}

impl PortFilter {
    pub fn new() -> Self {
        Self { blocked: BlockedPort::new(), drops: DropCounter::new() }
    }

    /// Classify one frame.
    ///
    /// Fail-open: frames that are not IPv4 TCP, frames truncated at any
    /// parsing stage, and frames arriving while no port is configured all
    /// pass. `Drop` is returned only on an exact destination-port match,
    /// and every `Drop` increments the counter exactly once. The frame is
    /// never mutated and never read past its end.
    pub fn process(&self, frame: &[u8]) -> Verdict {
        let Some(dst_port) = tcp_dst_port(frame) else {
            return Verdict::Pass;
        };
        let Some(blocked) = self.blocked.get() else {
            return Verdict::Pass;
        };
        if dst_port != blocked {
            return Verdict::Pass;
        }
        self.drops.increment();
        Verdict::Drop
    }

    /// Blocked-port slot — the control plane's write surface.
    pub fn blocked_port(&self) -> &BlockedPort {
        &self.blocked
    }

    /// Total frames dropped so far — the control plane's read surface.
    pub fn drop_count(&self) -> u64 {
        self.drops.count()
    }
}
