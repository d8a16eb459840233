//! Simulated device latency
//!
//! Delays are factored out of the device variants into a profile keyed
//! by (device kind, write kind), so production builds keep realistic
//! timings while tests and benches run with zero wall-clock cost.

use super::request::WriteKind;
use super::DeviceKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// =============================================================================
// Default Timings
// =============================================================================

/// MRAM write service time, any pattern
pub const MRAM_WRITE_LATENCY: Duration = Duration::from_micros(5);

/// QLC NAND sequential (ZNS-style) write service time
pub const QLC_SEQUENTIAL_LATENCY: Duration = Duration::from_micros(50);

/// QLC NAND random write service time
pub const QLC_RANDOM_LATENCY: Duration = Duration::from_micros(100);

// =============================================================================
// Latency Profile
// =============================================================================

/// Write service times for every (device kind, write kind) pair
///
/// MRAM is byte-addressable and pattern-insensitive, so it carries a
/// single figure. QLC NAND distinguishes the sequential zone-append
/// path from the random program path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyProfile {
    /// MRAM write, any pattern
    pub mram_write: Duration,
    /// QLC NAND sequential write
    pub qlc_sequential: Duration,
    /// QLC NAND random write
    pub qlc_random: Duration,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            mram_write: MRAM_WRITE_LATENCY,
            qlc_sequential: QLC_SEQUENTIAL_LATENCY,
            qlc_random: QLC_RANDOM_LATENCY,
        }
    }
}

impl LatencyProfile {
    /// Profile with every delay zeroed, for tests and benchmarks
    pub fn instant() -> Self {
        Self {
            mram_write: Duration::ZERO,
            qlc_sequential: Duration::ZERO,
            qlc_random: Duration::ZERO,
        }
    }

    /// Service time for one write
    pub fn write_latency(&self, device: DeviceKind, kind: WriteKind) -> Duration {
        match (device, kind) {
            (DeviceKind::Mram, _) => self.mram_write,
            (DeviceKind::QlcNand, WriteKind::SequentialWrite) => self.qlc_sequential,
            (DeviceKind::QlcNand, WriteKind::RandomWrite) => self.qlc_random,
        }
    }
}
