//! Shared state of the fast path: the blocked-port slot and the drop
//! counter. Cardinality is exactly one value each, so both are plain
//! in-process atomics rather than any keyed store.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/// Slot value meaning "no port configured". Outside the u16 range, so every
/// real port — including 0 — stays representable as a configured value.
const UNSET: u32 = u32::MAX;

/// Runtime-writable blocked-port slot.
///
/// One atomic u32: the low 16 bits hold the port when configured, [`UNSET`]
/// means not configured. Readers always observe either the complete old
/// value or the complete new one; a concurrent reconfiguration can never
/// produce a torn port.
pub struct BlockedPort(AtomicU32);

impl BlockedPort {
    pub const fn new() -> Self {
        Self(AtomicU32::new(UNSET))
    }

    /// Configure the port to block. Takes effect for every invocation that
    /// loads the slot afterwards.
    pub fn set(&self, port: u16) {
        self.0.store(u32::from(port), Ordering::Relaxed);
    }

    /// Return to the unconfigured state: the filter blocks nothing.
    pub fn clear(&self) {
        self.0.store(UNSET, Ordering::Relaxed);
    }

    /// Current configuration, `None` when unset.
    pub fn get(&self) -> Option<u16> {
        match self.0.load(Ordering::Relaxed) {
            UNSET => None,
            // Only `set` stores non-sentinel values, always within u16.
            port => Some(port as u16),
        }
    }
}

impl Default for BlockedPort {
    fn default() -> Self {
        Self::new()
    }
}

/// Monotonic count of dropped frames, shared by every invocation context.
///
/// The fast path only increments; reading is the control plane's job.
/// Relaxed `fetch_add` is enough: no increment is ever lost, and a pure
/// statistic needs no ordering relative to other memory.
pub struct DropCounter(AtomicU64);

impl DropCounter {
    pub const fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn increment(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

impl Default for DropCounter {
    fn default() -> Self {
        Self::new()
    }
}
