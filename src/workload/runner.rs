//! Concurrent workload driver
//!
//! Reproduces the mixed workload the original benchmark harness threw
//! at the engine: latency-critical metadata writes, bulk sequential
//! sensor logs, wear-balanced archive writes, and an optional baseline
//! stream submitted directly to one device, bypassing policy. Each
//! stream runs on its own task until the deadline; the engine itself
//! provides no pooling, so concurrency here is entirely caller-driven.

use super::recorder::{LatencyRecorder, LatencySummary};
use crate::device::{DeviceKind, StorageDevice, WriteKind, WriteRequest};
use crate::engine::Orchestrator;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

// =============================================================================
// Workload Configuration
// =============================================================================

/// Data tag for latency-critical metadata writes
pub const CRITICAL_TAG: &str = "CRITICAL_METADATA";

/// Data tag for bulk sequential sensor logs
pub const SENSOR_TAG: &str = "SENSOR_LOGS";

/// Data tag for wear-balanced archive writes
pub const ARCHIVE_TAG: &str = "ARCHIVE_DATA";

/// Knobs for one workload run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Wall-clock run time
    pub duration: Duration,
    /// Size of each critical-metadata write
    pub critical_size_bytes: u64,
    /// Size of each sensor-log write
    pub sensor_size_bytes: u64,
    /// Size of each archive write
    pub archive_size_bytes: u64,
    /// Device for the baseline stream that bypasses policy; `None`
    /// disables the stream
    pub baseline_device: Option<String>,
    /// Size of each baseline write
    pub baseline_size_bytes: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(10),
            critical_size_bytes: 4 * 1024,
            sensor_size_bytes: 128 * 1024,
            archive_size_bytes: 256 * 1024,
            baseline_device: None,
            baseline_size_bytes: 4 * 1024,
        }
    }
}

// =============================================================================
// Report
// =============================================================================

/// Point-in-time view of one device's counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    pub name: String,
    pub kind: DeviceKind,
    pub capacity_bytes: u64,
    pub used_bytes: u64,
    pub wear_level: u64,
    pub queue_depth: u64,
}

/// Result of one workload run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub critical_requests: u64,
    pub sensor_requests: u64,
    pub archive_requests: u64,
    pub baseline_requests: u64,
    /// Caller-observed latency of the critical stream
    pub critical_latency: LatencySummary,
    /// Per-device counters after the run
    pub devices: Vec<DeviceSnapshot>,
}

// =============================================================================
// Runner
// =============================================================================

/// Drives concurrent request streams against a frozen engine
pub struct WorkloadRunner {
    engine: Arc<Orchestrator>,
    config: WorkloadConfig,
}

impl WorkloadRunner {
    /// Create a runner
    pub fn new(engine: Arc<Orchestrator>, config: WorkloadConfig) -> Self {
        Self { engine, config }
    }

    /// Run every stream to the deadline and assemble the report
    pub async fn run(&self) -> Result<WorkloadReport> {
        // Resolve the baseline device before spawning anything, so a
        // bad name fails the run instead of silently writing nowhere.
        let baseline = match &self.config.baseline_device {
            Some(name) => Some(self.engine.get_device(name).ok_or_else(|| {
                Error::Configuration(format!("baseline device {name} is not registered"))
            })?),
            None => None,
        };

        let started_at = Utc::now();
        let deadline = tokio::time::Instant::now() + self.config.duration;
        let recorder = Arc::new(LatencyRecorder::new());

        info!(
            duration_secs = self.config.duration.as_secs_f64(),
            baseline = self.config.baseline_device.as_deref().unwrap_or("-"),
            "starting workload"
        );

        let critical_count = Arc::new(AtomicU64::new(0));
        let sensor_count = Arc::new(AtomicU64::new(0));
        let archive_count = Arc::new(AtomicU64::new(0));
        let baseline_count = Arc::new(AtomicU64::new(0));

        let mut tasks = Vec::new();

        // Critical stream: small random writes through policy, latency
        // recorded around each submit.
        {
            let engine = self.engine.clone();
            let recorder = recorder.clone();
            let count = critical_count.clone();
            let size = self.config.critical_size_bytes;
            tasks.push(tokio::spawn(async move {
                let request = WriteRequest::new(CRITICAL_TAG, size, WriteKind::RandomWrite);
                while tokio::time::Instant::now() < deadline {
                    let t0 = tokio::time::Instant::now();
                    engine.submit(&request).await;
                    recorder.record(t0.elapsed());
                    count.fetch_add(1, Ordering::Relaxed);
                }
            }));
        }

        // Sensor stream: large sequential writes through policy.
        {
            let engine = self.engine.clone();
            let count = sensor_count.clone();
            let size = self.config.sensor_size_bytes;
            tasks.push(tokio::spawn(async move {
                let request = WriteRequest::new(SENSOR_TAG, size, WriteKind::SequentialWrite);
                while tokio::time::Instant::now() < deadline {
                    engine.submit(&request).await;
                    count.fetch_add(1, Ordering::Relaxed);
                }
            }));
        }

        // Archive stream: wear-aware dynamic routing.
        {
            let engine = self.engine.clone();
            let count = archive_count.clone();
            let size = self.config.archive_size_bytes;
            tasks.push(tokio::spawn(async move {
                let request = WriteRequest::new(ARCHIVE_TAG, size, WriteKind::SequentialWrite);
                while tokio::time::Instant::now() < deadline {
                    engine.submit_archive_dynamic(&request).await;
                    count.fetch_add(1, Ordering::Relaxed);
                }
            }));
        }

        // Baseline stream: random writes straight at one device,
        // bypassing policy, for wear comparison.
        if let Some(device) = baseline {
            let count = baseline_count.clone();
            let size = self.config.baseline_size_bytes;
            tasks.push(tokio::spawn(async move {
                let request = WriteRequest::new("BASELINE_CRITICAL", size, WriteKind::RandomWrite);
                while tokio::time::Instant::now() < deadline {
                    device.submit_write(&request).await;
                    count.fetch_add(1, Ordering::Relaxed);
                }
            }));
        }

        for task in tasks {
            task.await
                .map_err(|e| Error::Configuration(format!("workload task panicked: {e}")))?;
        }

        let report = WorkloadReport {
            started_at,
            finished_at: Utc::now(),
            critical_requests: critical_count.load(Ordering::Relaxed),
            sensor_requests: sensor_count.load(Ordering::Relaxed),
            archive_requests: archive_count.load(Ordering::Relaxed),
            baseline_requests: baseline_count.load(Ordering::Relaxed),
            critical_latency: recorder.summary(),
            devices: self
                .engine
                .registry()
                .iter()
                .map(|device| DeviceSnapshot {
                    name: device.name().to_string(),
                    kind: device.kind(),
                    capacity_bytes: device.capacity_bytes(),
                    used_bytes: device.used_bytes(),
                    wear_level: device.wear_level(),
                    queue_depth: device.queue_depth(),
                })
                .collect(),
        };

        info!(
            critical = report.critical_requests,
            sensor = report.sensor_requests,
            archive = report.archive_requests,
            baseline = report.baseline_requests,
            "workload finished"
        );
        Ok(report)
    }
}
