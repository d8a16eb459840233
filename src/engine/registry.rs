//! Device registry
//!
//! Name-keyed map of registered devices. The registry is the canonical
//! owner; everything else holds `Arc` handles. Backed by a `BTreeMap`
//! so iteration order is lexicographic by name, which fixes the
//! tie-break for wear-aware selection.

use crate::device::{StorageDevice, StorageDeviceRef};
use std::collections::BTreeMap;
use tracing::warn;

/// Name-keyed device registry
///
/// Registration is first-write-wins: a second device under an existing
/// name is ignored. This is deliberately asymmetric with the policy
/// table, where the later definition replaces the earlier one.
#[derive(Default)]
pub struct DeviceRegistry {
    devices: BTreeMap<String, StorageDeviceRef>,
}

impl std::fmt::Debug for DeviceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceRegistry")
            .field("devices", &self.names())
            .finish()
    }
}

impl DeviceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a device under its own name
    ///
    /// Returns `true` if the device was added, `false` if the name was
    /// already taken and the registration was a no-op.
    pub fn register(&mut self, device: StorageDeviceRef) -> bool {
        let name = device.name().to_string();
        if self.devices.contains_key(&name) {
            warn!(device = %name, "duplicate device name, keeping first registration");
            return false;
        }
        self.devices.insert(name, device);
        true
    }

    /// Look up a device by name
    pub fn get(&self, name: &str) -> Option<StorageDeviceRef> {
        self.devices.get(name).cloned()
    }

    /// True if a device with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.devices.contains_key(name)
    }

    /// Number of registered devices
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// True if no devices are registered
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Registered names, lexicographically ordered
    pub fn names(&self) -> Vec<&str> {
        self.devices.keys().map(String::as_str).collect()
    }

    /// Iterate over devices in lexicographic name order
    pub fn iter(&self) -> impl Iterator<Item = &StorageDeviceRef> {
        self.devices.values()
    }
}
