//! Simulated storage devices
//!
//! Provides the device capability trait plus the two modeled variants:
//! MRAM (byte-addressable, low latency, wear-free) and QLC NAND
//! (higher latency, wear-accumulating, sequential/random asymmetry).
//!
//! Devices only simulate: a write blocks its calling task for the
//! variant's service time, then bumps the accounting counters. There is
//! no capacity check, no backpressure, and no failure path. Overlapping
//! writes from concurrent callers proceed concurrently; the pending
//! gauge may exceed one.

pub mod counters;
pub mod latency;
pub mod mram;
pub mod qlc_nand;
pub mod request;

pub use counters::DeviceCounters;
pub use latency::{
    LatencyProfile, MRAM_WRITE_LATENCY, QLC_RANDOM_LATENCY, QLC_SEQUENTIAL_LATENCY,
};
pub use mram::MramDevice;
pub use qlc_nand::{QlcNandDevice, RANDOM_WEAR_INCREMENT, SEQUENTIAL_WEAR_INCREMENT};
pub use request::{WriteKind, WriteRequest};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// =============================================================================
// Device Kind
// =============================================================================

/// Closed set of modeled device variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Mram,
    QlcNand,
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceKind::Mram => write!(f, "mram"),
            DeviceKind::QlcNand => write!(f, "qlc-nand"),
        }
    }
}

// =============================================================================
// Storage Device Port
// =============================================================================

/// Capability surface of one simulated backing store
///
/// The registry is the canonical owner; callers hold
/// [`StorageDeviceRef`] handles. Identity (`name`) and `capacity_bytes`
/// are fixed at construction. `submit_write` is the single mutating
/// capability and never fails.
#[async_trait]
pub trait StorageDevice: Send + Sync {
    /// Stable device name, the registry key
    fn name(&self) -> &str;

    /// Variant of this device
    fn kind(&self) -> DeviceKind;

    /// Total capacity in bytes
    fn capacity_bytes(&self) -> u64;

    /// Bytes accepted so far (monotonic allocation counter)
    fn used_bytes(&self) -> u64;

    /// Cumulative wear (monotonic; always 0 for MRAM)
    fn wear_level(&self) -> u64;

    /// Writes currently in flight (observational gauge)
    fn queue_depth(&self) -> u64;

    /// Accept one write: block this task for the simulated service
    /// time, then account size and wear
    async fn submit_write(&self, request: &WriteRequest);
}

/// Shared handle to a registered device
pub type StorageDeviceRef = Arc<dyn StorageDevice>;
