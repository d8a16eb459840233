//! Heterogeneous Storage Orchestrator
//!
//! Routes tagged write requests across simulated heterogeneous storage
//! devices, statically via a tag-to-device policy table or dynamically
//! via wear-aware selection, while each device models its own latency,
//! capacity consumption, and wear accumulation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Workload Harness                        │
//! │        (concurrent caller tasks, latency recording)         │
//! ├─────────────────────────────────────────────────────────────┤
//! │                       Orchestrator                          │
//! │  ┌────────────────────┐        ┌─────────────────────────┐  │
//! │  │    Policy Table    │        │     Device Registry     │  │
//! │  │  tag → (target,    │        │   name → device, name-  │  │
//! │  │        mode)       │        │   ordered iteration     │  │
//! │  └─────────┬──────────┘        └───────────┬─────────────┘  │
//! │            │   submit / submit_archive_dynamic              │
//! ├────────────┴───────────────────────────────┴────────────────┤
//! │                    Simulated Devices                        │
//! │  ┌──────────────────────┐    ┌───────────────────────────┐  │
//! │  │        MRAM          │    │         QLC NAND          │  │
//! │  │  5µs, wear-free      │    │  50µs seq +1 / 100µs      │  │
//! │  │                      │    │  random +10 wear          │  │
//! │  └──────────────────────┘    └───────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`]: YAML configuration and engine construction
//! - [`device`]: device capability trait, variants, counters, latency
//! - [`engine`]: registry, policy table, and the routing engine
//! - [`workload`]: concurrent workload driver and latency recorder
//! - [`error`]: error types and handling

pub mod config;
pub mod device;
pub mod engine;
pub mod error;
pub mod workload;

// Re-export commonly used types
pub use config::{Config, DeviceSpec, DeviceType, PolicySpec};

pub use device::{
    DeviceCounters, DeviceKind, LatencyProfile, MramDevice, QlcNandDevice, StorageDevice,
    StorageDeviceRef, WriteKind, WriteRequest,
};

pub use engine::{
    DeviceRegistry, Orchestrator, PolicyRule, PolicyTable, WriteMode, WEAR_CLASS_PREFIX,
};

pub use error::{Error, Result};

pub use workload::{
    DeviceSnapshot, LatencyRecorder, LatencySummary, WorkloadConfig, WorkloadReport,
    WorkloadRunner,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
