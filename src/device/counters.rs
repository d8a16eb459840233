//! Per-device accounting counters
//!
//! One cache line of independently atomic counters. There is no
//! cross-counter transaction: a status reader may observe used-bytes
//! already bumped while wear has not been, and each field is only
//! individually consistent.

use std::sync::atomic::{AtomicU64, Ordering};

/// Cache line size for alignment
const CACHE_LINE_SIZE: usize = 64;

/// Accounting block shared by all device variants
///
/// Aligned to a cache line to prevent false sharing between devices.
/// `used_bytes` and `wear_level` are monotonic; `pending_ios` is a
/// transient gauge that returns to its pre-call value once a write
/// completes. Nothing throttles on it.
#[repr(C, align(64))]
#[derive(Debug)]
pub struct DeviceCounters {
    /// Bytes accepted so far. Pure allocation counter: nothing is ever
    /// deleted or overwritten, so this is not a live-usage figure.
    used_bytes: AtomicU64,
    /// Writes currently in flight
    pending_ios: AtomicU64,
    /// Cumulative wear, variant-specific semantics (MRAM keeps 0)
    wear_level: AtomicU64,
    _padding: [u8; 40],
}

impl Default for DeviceCounters {
    fn default() -> Self {
        Self {
            used_bytes: AtomicU64::new(0),
            pending_ios: AtomicU64::new(0),
            wear_level: AtomicU64::new(0),
            _padding: [0; 40],
        }
    }
}

impl DeviceCounters {
    /// Create a zeroed counter block
    pub fn new() -> Self {
        Self::default()
    }

    /// Account an accepted write of `bytes`
    #[inline]
    pub fn record_allocation(&self, bytes: u64) {
        self.used_bytes.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Accumulate wear
    #[inline]
    pub fn add_wear(&self, amount: u64) {
        self.wear_level.fetch_add(amount, Ordering::Relaxed);
    }

    /// Mark one more write in flight
    #[inline]
    pub fn inc_pending(&self) {
        self.pending_ios.fetch_add(1, Ordering::Relaxed);
    }

    /// Mark one write completed
    #[inline]
    pub fn dec_pending(&self) {
        self.pending_ios.fetch_sub(1, Ordering::Relaxed);
    }

    /// Total bytes accepted
    #[inline]
    pub fn used_bytes(&self) -> u64 {
        self.used_bytes.load(Ordering::Relaxed)
    }

    /// Current wear level
    #[inline]
    pub fn wear_level(&self) -> u64 {
        self.wear_level.load(Ordering::Relaxed)
    }

    /// Writes currently in flight
    #[inline]
    pub fn queue_depth(&self) -> u64 {
        self.pending_ios.load(Ordering::Relaxed)
    }
}
