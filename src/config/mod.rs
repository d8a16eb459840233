//! Configuration loading
//!
//! A configuration document declares the device fleet and the static
//! routing policies, and is parsed as structured YAML into validated
//! spec values before the engine is built. An unreadable source and a
//! malformed document are the only load failures; a policy rule whose
//! target names no registered device is legal and only logged, since
//! targets are resolved at dispatch time.
//!
//! ```yaml
//! devices:
//!   - name: MRAM0
//!     type: MRAM_Device
//!     capacity: 1000000
//!   - name: QLC_A
//!     type: QLC_NAND_Device
//!     capacity: 2000000
//! policies:
//!   - data_tag: CRITICAL_METADATA
//!     target: MRAM0
//!     mode: RANDOM
//!   - data_tag: SENSOR_LOGS
//!     target: QLC_A
//!     mode: ZNS_SEQ_WRITE
//! ```

use crate::device::{LatencyProfile, MramDevice, QlcNandDevice, StorageDeviceRef};
use crate::engine::{Orchestrator, PolicyRule, WriteMode};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

// =============================================================================
// Spec Types
// =============================================================================

/// Device variant tag as written in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceType {
    #[serde(rename = "MRAM_Device")]
    Mram,
    #[serde(rename = "QLC_NAND_Device")]
    QlcNand,
}

/// One device entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSpec {
    /// Registry key
    pub name: String,
    /// Variant tag
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    /// Total capacity in bytes
    pub capacity: u64,
}

/// One policy entry
///
/// `mode` stays a free-form string: `ZNS_SEQ_WRITE` selects the
/// sequential path and anything else means random.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySpec {
    /// Policy key
    pub data_tag: String,
    /// Target device name, resolved at dispatch time
    pub target: String,
    /// Write mode string
    pub mode: String,
}

/// Parsed configuration document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Device fleet, in file order
    #[serde(default)]
    pub devices: Vec<DeviceSpec>,
    /// Routing policies, in file order
    #[serde(default)]
    pub policies: Vec<PolicySpec>,
}

// =============================================================================
// Loading
// =============================================================================

impl Config {
    /// Read and parse a configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| Error::ConfigUnreadable {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&raw)
    }

    /// Parse a configuration document from a YAML string
    pub fn from_yaml(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Build a frozen engine from this configuration with the default
    /// latency profile
    pub fn build(&self) -> Orchestrator {
        self.build_with_latency(LatencyProfile::default())
    }

    /// Build a frozen engine, overriding every device's latency profile
    pub fn build_with_latency(&self, latency: LatencyProfile) -> Orchestrator {
        let mut engine = Orchestrator::new();

        for spec in &self.devices {
            let device: StorageDeviceRef = match spec.device_type {
                DeviceType::Mram => Arc::new(MramDevice::with_latency(
                    spec.name.as_str(),
                    spec.capacity,
                    latency,
                )),
                DeviceType::QlcNand => Arc::new(QlcNandDevice::with_latency(
                    spec.name.as_str(),
                    spec.capacity,
                    latency,
                )),
            };
            engine.register_device(device);
        }

        for spec in &self.policies {
            if !engine.registry().contains(&spec.target) {
                warn!(
                    tag = %spec.data_tag,
                    target = %spec.target,
                    "policy target is not a registered device, requests for this tag will drop"
                );
            }
            engine.set_policy(PolicyRule::new(
                spec.data_tag.as_str(),
                spec.target.as_str(),
                WriteMode::from_mode_str(&spec.mode),
            ));
        }

        info!(
            devices = engine.registry().len(),
            policies = engine.policy().len(),
            "engine built from configuration"
        );
        engine
    }
}
