//! Heterogeneous Storage Orchestrator
//!
//! Loads a device/policy configuration, builds the routing engine, and
//! drives the mixed benchmark workload against it, reporting caller
//! latency percentiles and per-device wear.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hetero_storage_orchestrator::{Config, WorkloadConfig, WorkloadRunner};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Wear-aware routing over simulated heterogeneous storage devices
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the device/policy configuration file
    #[arg(long, env = "HSO_CONFIG", default_value = "config.example.yaml")]
    config: PathBuf,

    /// Workload run time in seconds
    #[arg(long, env = "HSO_DURATION_SECS", default_value = "10")]
    duration_secs: u64,

    /// Device for the baseline stream that bypasses policy
    #[arg(long, env = "HSO_BASELINE_DEVICE")]
    baseline_device: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,

    /// Print the workload report as JSON instead of text
    #[arg(long)]
    json: bool,
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(&args);

    info!("Starting Heterogeneous Storage Orchestrator");
    info!("  Version: {}", hetero_storage_orchestrator::VERSION);
    info!("  Config: {}", args.config.display());
    info!("  Duration: {}s", args.duration_secs);

    let config = Config::from_path(&args.config)
        .with_context(|| format!("loading configuration from {}", args.config.display()))?;

    let engine = Arc::new(config.build());
    info!(
        "Engine built: {} devices, {} policies",
        engine.registry().len(),
        engine.policy().len()
    );

    let workload = WorkloadConfig {
        duration: Duration::from_secs(args.duration_secs),
        baseline_device: args.baseline_device.clone(),
        ..Default::default()
    };

    let report = WorkloadRunner::new(engine, workload)
        .run()
        .await
        .context("running workload")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &hetero_storage_orchestrator::WorkloadReport) {
    println!("Workload finished");
    println!(
        "  requests: critical={} sensor={} archive={} baseline={}",
        report.critical_requests,
        report.sensor_requests,
        report.archive_requests,
        report.baseline_requests
    );
    println!(
        "  critical latency (us): p50={:.2} p99={:.2} p99.9={:.2} max={:.2}",
        report.critical_latency.p50_us,
        report.critical_latency.p99_us,
        report.critical_latency.p999_us,
        report.critical_latency.max_us
    );
    for device in &report.devices {
        println!(
            "  {:8} {:8} used={:>12}B wear={:>8} depth={}",
            device.name, device.kind, device.used_bytes, device.wear_level, device.queue_depth
        );
    }
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }
}
