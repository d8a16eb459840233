//! Caller-side latency recording
//!
//! Devices simulate latency by blocking the submitting task, so the
//! interesting figure is measured where the original benchmark driver
//! measured it: around the engine's submit call.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Thread-safe sample sink for per-call latencies
#[derive(Debug, Default)]
pub struct LatencyRecorder {
    samples: Mutex<Vec<Duration>>,
}

impl LatencyRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one sample
    pub fn record(&self, latency: Duration) {
        self.samples.lock().push(latency);
    }

    /// Number of recorded samples
    pub fn len(&self) -> usize {
        self.samples.lock().len()
    }

    /// True if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.samples.lock().is_empty()
    }

    /// Nearest-rank percentile over the recorded samples
    ///
    /// `p` is a fraction, e.g. `0.999`. Returns zero when no samples
    /// have been recorded.
    pub fn percentile(&self, p: f64) -> Duration {
        let samples = self.samples.lock();
        if samples.is_empty() {
            return Duration::ZERO;
        }
        let mut sorted = samples.clone();
        drop(samples);
        sorted.sort();

        let idx = (p * (sorted.len() - 1) as f64).ceil() as usize;
        sorted[idx.min(sorted.len() - 1)]
    }

    /// Summary of the recorded distribution
    pub fn summary(&self) -> LatencySummary {
        let count = self.len() as u64;
        LatencySummary {
            count,
            p50_us: as_micros(self.percentile(0.50)),
            p99_us: as_micros(self.percentile(0.99)),
            p999_us: as_micros(self.percentile(0.999)),
            max_us: as_micros(self.percentile(1.0)),
        }
    }
}

fn as_micros(d: Duration) -> f64 {
    d.as_secs_f64() * 1_000_000.0
}

/// Percentile summary of one latency distribution, in microseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencySummary {
    pub count: u64,
    pub p50_us: f64,
    pub p99_us: f64,
    pub p999_us: f64,
    pub max_us: f64,
}
