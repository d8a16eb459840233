//! Workload harness
//!
//! Concurrent request streams and caller-side latency measurement for
//! exercising a built engine. The engine treats all of this as an
//! ordinary caller; nothing here reaches past the public routing
//! surface.

pub mod recorder;
pub mod runner;

pub use recorder::{LatencyRecorder, LatencySummary};
pub use runner::{
    DeviceSnapshot, WorkloadConfig, WorkloadReport, WorkloadRunner, ARCHIVE_TAG, CRITICAL_TAG,
    SENSOR_TAG,
};
