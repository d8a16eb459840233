//! Routing engine
//!
//! Owns the device registry and the policy table. Mutating entry points
//! take `&mut self` and routing takes `&self`, so wrapping the built
//! engine in an `Arc` freezes it: the load phase and the routing phase
//! cannot overlap, and the hot path needs no lock.
//!
//! Routing misses are not errors. A request with no matching rule, a
//! rule whose target is not registered, or a dynamic submit with no
//! eligible device is dropped with no observable effect beyond a debug
//! log line.

use super::policy::{PolicyRule, PolicyTable};
use super::registry::DeviceRegistry;
use crate::device::{StorageDevice, StorageDeviceRef, WriteKind, WriteRequest};
use tracing::debug;

/// Device-name prefix marking the wear-sensitive archive class
pub const WEAR_CLASS_PREFIX: &str = "QLC";

/// Heterogeneous storage orchestrator
///
/// Built once from configuration, then shared read-only with every
/// caller. Devices live for the life of the process; there is no
/// deregistration path.
#[derive(Debug, Default)]
pub struct Orchestrator {
    registry: DeviceRegistry,
    policy: PolicyTable,
}

impl Orchestrator {
    /// Create an empty engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine from a pre-built registry and policy table
    pub fn with_parts(registry: DeviceRegistry, policy: PolicyTable) -> Self {
        Self { registry, policy }
    }

    // =========================================================================
    // Load Phase
    // =========================================================================

    /// Register a device. First registration of a name wins; a
    /// duplicate is a no-op and returns `false`.
    pub fn register_device(&mut self, device: StorageDeviceRef) -> bool {
        self.registry.register(device)
    }

    /// Install a policy rule. A later rule for the same tag replaces
    /// the earlier one.
    pub fn set_policy(&mut self, rule: PolicyRule) {
        self.policy.insert(rule);
    }

    // =========================================================================
    // Routing Phase
    // =========================================================================

    /// Look up a device by name
    pub fn get_device(&self, name: &str) -> Option<StorageDeviceRef> {
        self.registry.get(name)
    }

    /// Registered devices
    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// Installed policy rules
    pub fn policy(&self) -> &PolicyTable {
        &self.policy
    }

    /// Route a request by its tag
    ///
    /// The rule's mode overrides the caller's declared write kind; the
    /// submitted request itself is never mutated. Fire-and-forget: an
    /// unknown tag or an unresolved target drops the request silently.
    pub async fn submit(&self, request: &WriteRequest) {
        let Some(rule) = self.policy.get(&request.tag) else {
            debug!(tag = %request.tag, "no policy for tag, dropping request");
            return;
        };

        let Some(device) = self.registry.get(&rule.target) else {
            debug!(
                tag = %request.tag,
                target = %rule.target,
                "policy target not registered, dropping request"
            );
            return;
        };

        let routed = request.with_kind(rule.mode.write_kind());
        debug!(
            tag = %routed.tag,
            device = %rule.target,
            kind = %routed.kind,
            "routing by policy"
        );
        device.submit_write(&routed).await;
    }

    /// Route an archive-class request to the least-worn wear-class
    /// device
    ///
    /// Scans devices whose name starts with [`WEAR_CLASS_PREFIX`] and
    /// picks the strictly least worn, reading wear at dispatch time;
    /// ties resolve to the lexicographically smallest name. Archive
    /// writes are always forwarded sequential regardless of the
    /// caller's declared kind. No eligible device drops silently.
    ///
    /// Greedy and stateless: concurrent dispatches may pick the same
    /// device. That skews wear slightly under contention but corrupts
    /// nothing.
    pub async fn submit_archive_dynamic(&self, request: &WriteRequest) {
        let mut best: Option<&StorageDeviceRef> = None;

        for device in self.registry.iter() {
            if !device.name().starts_with(WEAR_CLASS_PREFIX) {
                continue;
            }
            match best {
                Some(current) if device.wear_level() >= current.wear_level() => {}
                _ => best = Some(device),
            }
        }

        let Some(device) = best else {
            debug!(tag = %request.tag, "no wear-class device registered, dropping request");
            return;
        };

        let routed = request.with_kind(WriteKind::SequentialWrite);
        debug!(
            tag = %routed.tag,
            device = %device.name(),
            wear = device.wear_level(),
            "routing to least-worn archive device"
        );
        device.submit_write(&routed).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{
        LatencyProfile, MramDevice, QlcNandDevice, StorageDevice, WriteKind, WriteRequest,
    };
    use crate::engine::policy::WriteMode;
    use std::sync::Arc;

    fn mram(name: &str, capacity: u64) -> StorageDeviceRef {
        Arc::new(MramDevice::with_latency(
            name,
            capacity,
            LatencyProfile::instant(),
        ))
    }

    fn qlc(name: &str, capacity: u64) -> StorageDeviceRef {
        Arc::new(QlcNandDevice::with_latency(
            name,
            capacity,
            LatencyProfile::instant(),
        ))
    }

    /// Registry and policy from testable property 8: MRAM0 + QLC_A with
    /// a random-mode rule for critical metadata.
    fn critical_metadata_engine() -> Orchestrator {
        let mut engine = Orchestrator::new();
        engine.register_device(mram("MRAM0", 1_000_000));
        engine.register_device(qlc("QLC_A", 2_000_000));
        engine.set_policy(PolicyRule::new(
            "CRITICAL_METADATA",
            "MRAM0",
            WriteMode::Random,
        ));
        engine
    }

    #[tokio::test]
    async fn test_submit_routes_critical_metadata_to_mram() {
        let engine = critical_metadata_engine();

        engine
            .submit(&WriteRequest::new(
                "CRITICAL_METADATA",
                4096,
                WriteKind::RandomWrite,
            ))
            .await;

        let mram0 = engine.get_device("MRAM0").unwrap();
        let qlc_a = engine.get_device("QLC_A").unwrap();
        assert_eq!(mram0.used_bytes(), 4096);
        assert_eq!(mram0.wear_level(), 0);
        assert_eq!(qlc_a.used_bytes(), 0);
    }

    #[tokio::test]
    async fn test_unknown_tag_mutates_nothing() {
        let engine = critical_metadata_engine();

        engine
            .submit(&WriteRequest::new(
                "UNCLASSIFIED",
                4096,
                WriteKind::RandomWrite,
            ))
            .await;

        for device in engine.registry().iter() {
            assert_eq!(device.used_bytes(), 0);
            assert_eq!(device.wear_level(), 0);
            assert_eq!(device.queue_depth(), 0);
        }
    }

    #[tokio::test]
    async fn test_dangling_target_mutates_nothing() {
        let mut engine = critical_metadata_engine();
        engine.set_policy(PolicyRule::new(
            "SENSOR_LOGS",
            "QLC_GONE",
            WriteMode::ZnsSequential,
        ));

        engine
            .submit(&WriteRequest::new(
                "SENSOR_LOGS",
                128 * 1024,
                WriteKind::SequentialWrite,
            ))
            .await;

        for device in engine.registry().iter() {
            assert_eq!(device.used_bytes(), 0);
        }
    }

    #[tokio::test]
    async fn test_policy_mode_overrides_caller_kind() {
        let mut engine = Orchestrator::new();
        engine.register_device(qlc("QLC_A", 2_000_000));
        engine.set_policy(PolicyRule::new(
            "SENSOR_LOGS",
            "QLC_A",
            WriteMode::ZnsSequential,
        ));

        // Caller declares random; the ZNS rule must force sequential,
        // visible as +1 wear instead of +10.
        engine
            .submit(&WriteRequest::new(
                "SENSOR_LOGS",
                128 * 1024,
                WriteKind::RandomWrite,
            ))
            .await;

        let qlc_a = engine.get_device("QLC_A").unwrap();
        assert_eq!(qlc_a.wear_level(), 1);

        // And the opposite direction: a random-mode rule degrades a
        // declared sequential write.
        let mut engine = Orchestrator::new();
        engine.register_device(qlc("QLC_A", 2_000_000));
        engine.set_policy(PolicyRule::new("SCRATCH", "QLC_A", WriteMode::Random));

        engine
            .submit(&WriteRequest::new(
                "SCRATCH",
                4096,
                WriteKind::SequentialWrite,
            ))
            .await;

        let qlc_a = engine.get_device("QLC_A").unwrap();
        assert_eq!(qlc_a.wear_level(), 10);
    }

    #[tokio::test]
    async fn test_duplicate_device_registration_is_noop() {
        let mut engine = Orchestrator::new();

        assert!(engine.register_device(mram("MRAM0", 1_000_000)));
        assert!(!engine.register_device(mram("MRAM0", 5_000_000)));

        let kept = engine.get_device("MRAM0").unwrap();
        assert_eq!(kept.capacity_bytes(), 1_000_000);
    }

    #[tokio::test]
    async fn test_archive_dynamic_forces_sequential() {
        let mut engine = Orchestrator::new();
        engine.register_device(mram("MRAM0", 1_000_000));
        engine.register_device(qlc("QLC_A", 2_000_000));

        engine
            .submit_archive_dynamic(&WriteRequest::new(
                "ARCHIVE_DATA",
                262_144,
                WriteKind::RandomWrite,
            ))
            .await;

        let qlc_a = engine.get_device("QLC_A").unwrap();
        assert_eq!(qlc_a.used_bytes(), 262_144);
        // Sequential override applied: +1 wear, not +10
        assert_eq!(qlc_a.wear_level(), 1);
        // MRAM is not archive-eligible
        assert_eq!(engine.get_device("MRAM0").unwrap().used_bytes(), 0);
    }

    #[tokio::test]
    async fn test_archive_dynamic_selects_least_worn() {
        let mut engine = Orchestrator::new();
        engine.register_device(qlc("QLC_A", 2_000_000));
        engine.register_device(qlc("QLC_B", 2_000_000));

        // Pre-wear QLC_A
        engine
            .get_device("QLC_A")
            .unwrap()
            .submit_write(&WriteRequest::new("X", 1024, WriteKind::RandomWrite))
            .await;

        engine
            .submit_archive_dynamic(&WriteRequest::new(
                "ARCHIVE_DATA",
                4096,
                WriteKind::SequentialWrite,
            ))
            .await;

        assert_eq!(engine.get_device("QLC_B").unwrap().used_bytes(), 4096);
        assert_eq!(engine.get_device("QLC_A").unwrap().used_bytes(), 1024);
    }

    #[tokio::test]
    async fn test_archive_dynamic_tie_breaks_lexicographically() {
        let mut engine = Orchestrator::new();
        engine.register_device(qlc("QLC_B", 2_000_000));
        engine.register_device(qlc("QLC_A", 2_000_000));

        // Equal wear on both; the lexicographically smaller name wins.
        engine
            .submit_archive_dynamic(&WriteRequest::new(
                "ARCHIVE_DATA",
                4096,
                WriteKind::SequentialWrite,
            ))
            .await;

        assert_eq!(engine.get_device("QLC_A").unwrap().used_bytes(), 4096);
        assert_eq!(engine.get_device("QLC_B").unwrap().used_bytes(), 0);
    }

    #[tokio::test]
    async fn test_archive_dynamic_without_eligible_device_drops() {
        let mut engine = Orchestrator::new();
        engine.register_device(mram("MRAM0", 1_000_000));

        engine
            .submit_archive_dynamic(&WriteRequest::new(
                "ARCHIVE_DATA",
                4096,
                WriteKind::SequentialWrite,
            ))
            .await;

        assert_eq!(engine.get_device("MRAM0").unwrap().used_bytes(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_submits_account_every_write() {
        let mut engine = critical_metadata_engine();
        engine.set_policy(PolicyRule::new(
            "SENSOR_LOGS",
            "QLC_A",
            WriteMode::ZnsSequential,
        ));
        let engine = Arc::new(engine);

        let mut handles = Vec::new();
        for _ in 0..16 {
            let eng = engine.clone();
            handles.push(tokio::spawn(async move {
                eng.submit(&WriteRequest::new(
                    "CRITICAL_METADATA",
                    4096,
                    WriteKind::RandomWrite,
                ))
                .await;
                eng.submit(&WriteRequest::new(
                    "SENSOR_LOGS",
                    128 * 1024,
                    WriteKind::SequentialWrite,
                ))
                .await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let mram0 = engine.get_device("MRAM0").unwrap();
        let qlc_a = engine.get_device("QLC_A").unwrap();
        assert_eq!(mram0.used_bytes(), 16 * 4096);
        assert_eq!(qlc_a.used_bytes(), 16 * 128 * 1024);
        assert_eq!(qlc_a.wear_level(), 16);
        assert_eq!(mram0.queue_depth(), 0);
        assert_eq!(qlc_a.queue_depth(), 0);
    }
}
