//! QLC NAND device variant
//!
//! Models quad-level-cell flash where the write pattern decides both
//! service time and program/erase stress: a random write costs roughly
//! ten times the wear of a sequential (zone-append) write. That 10x gap
//! is what makes wear-aware routing worth doing at all.

use super::counters::DeviceCounters;
use super::latency::LatencyProfile;
use super::request::{WriteKind, WriteRequest};
use super::{DeviceKind, StorageDevice};
use async_trait::async_trait;
use tracing::trace;

/// Wear added per sequential (ZNS-style) write
pub const SEQUENTIAL_WEAR_INCREMENT: u64 = 1;

/// Wear added per random write
pub const RANDOM_WEAR_INCREMENT: u64 = 10;

/// Simulated QLC NAND device
#[derive(Debug)]
pub struct QlcNandDevice {
    name: String,
    capacity_bytes: u64,
    latency: LatencyProfile,
    counters: DeviceCounters,
}

impl QlcNandDevice {
    /// Create a device with the default latency profile
    pub fn new(name: impl Into<String>, capacity_bytes: u64) -> Self {
        Self::with_latency(name, capacity_bytes, LatencyProfile::default())
    }

    /// Create a device with an explicit latency profile
    pub fn with_latency(
        name: impl Into<String>,
        capacity_bytes: u64,
        latency: LatencyProfile,
    ) -> Self {
        Self {
            name: name.into(),
            capacity_bytes,
            latency,
            counters: DeviceCounters::new(),
        }
    }

    fn wear_increment(kind: WriteKind) -> u64 {
        match kind {
            WriteKind::SequentialWrite => SEQUENTIAL_WEAR_INCREMENT,
            WriteKind::RandomWrite => RANDOM_WEAR_INCREMENT,
        }
    }
}

#[async_trait]
impl StorageDevice for QlcNandDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::QlcNand
    }

    fn capacity_bytes(&self) -> u64 {
        self.capacity_bytes
    }

    fn used_bytes(&self) -> u64 {
        self.counters.used_bytes()
    }

    fn wear_level(&self) -> u64 {
        self.counters.wear_level()
    }

    fn queue_depth(&self) -> u64 {
        self.counters.queue_depth()
    }

    async fn submit_write(&self, request: &WriteRequest) {
        self.counters.inc_pending();

        let delay = self
            .latency
            .write_latency(DeviceKind::QlcNand, request.kind);
        tokio::time::sleep(delay).await;

        self.counters.record_allocation(request.size_bytes);
        self.counters.add_wear(Self::wear_increment(request.kind));
        self.counters.dec_pending();

        trace!(
            device = %self.name,
            size_bytes = request.size_bytes,
            kind = %request.kind,
            wear = self.counters.wear_level(),
            "qlc write complete"
        );
    }
}
