//! Static routing policy
//!
//! A policy rule binds one data tag to one target device and a write
//! mode. The mode always overrides the caller's declared write kind;
//! what a caller submits is advisory only.

use crate::device::WriteKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

// =============================================================================
// Write Mode
// =============================================================================

/// Config mode string selecting the ZNS sequential path
pub const ZNS_SEQ_WRITE_MODE: &str = "ZNS_SEQ_WRITE";

/// Write mode carried by a policy rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Force the ZNS sequential write path
    ZnsSequential,
    /// Force the random write path
    Random,
}

impl WriteMode {
    /// Parse a config mode string. `ZNS_SEQ_WRITE` selects the
    /// sequential path; every other string means random.
    pub fn from_mode_str(mode: &str) -> Self {
        if mode == ZNS_SEQ_WRITE_MODE {
            WriteMode::ZnsSequential
        } else {
            WriteMode::Random
        }
    }

    /// Write kind this mode forces onto a routed request
    pub fn write_kind(&self) -> WriteKind {
        match self {
            WriteMode::ZnsSequential => WriteKind::SequentialWrite,
            WriteMode::Random => WriteKind::RandomWrite,
        }
    }
}

impl std::fmt::Display for WriteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteMode::ZnsSequential => write!(f, "zns-sequential"),
            WriteMode::Random => write!(f, "random"),
        }
    }
}

// =============================================================================
// Policy Rule
// =============================================================================

/// One tag-to-device routing rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRule {
    /// Data class tag this rule applies to
    pub data_tag: String,
    /// Name of the target device; resolved at dispatch time, so a
    /// dangling target is legal and simply drops at submit
    pub target: String,
    /// Write mode forced onto routed requests
    pub mode: WriteMode,
}

impl PolicyRule {
    /// Create a rule
    pub fn new(data_tag: impl Into<String>, target: impl Into<String>, mode: WriteMode) -> Self {
        Self {
            data_tag: data_tag.into(),
            target: target.into(),
            mode,
        }
    }
}

// =============================================================================
// Policy Table
// =============================================================================

/// Tag-keyed rule table
///
/// At most one rule per tag. A later insert for the same tag replaces
/// the earlier one (the opposite tie-break from device registration,
/// which keeps the first).
#[derive(Debug, Clone, Default)]
pub struct PolicyTable {
    rules: HashMap<String, PolicyRule>,
}

impl PolicyTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rule, replacing any earlier rule for the same tag
    pub fn insert(&mut self, rule: PolicyRule) {
        if let Some(previous) = self.rules.insert(rule.data_tag.clone(), rule) {
            debug!(
                tag = %previous.data_tag,
                old_target = %previous.target,
                "policy rule replaced by later definition"
            );
        }
    }

    /// Look up the rule for a tag
    pub fn get(&self, tag: &str) -> Option<&PolicyRule> {
        self.rules.get(tag)
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True if no rules are loaded
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over all rules
    pub fn iter(&self) -> impl Iterator<Item = &PolicyRule> {
        self.rules.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing_is_lenient() {
        assert_eq!(
            WriteMode::from_mode_str("ZNS_SEQ_WRITE"),
            WriteMode::ZnsSequential
        );
        assert_eq!(WriteMode::from_mode_str("RANDOM"), WriteMode::Random);
        assert_eq!(WriteMode::from_mode_str("zns_seq_write"), WriteMode::Random);
        assert_eq!(WriteMode::from_mode_str(""), WriteMode::Random);
        assert_eq!(WriteMode::from_mode_str("whatever"), WriteMode::Random);
    }

    #[test]
    fn test_mode_forces_write_kind() {
        assert_eq!(
            WriteMode::ZnsSequential.write_kind(),
            WriteKind::SequentialWrite
        );
        assert_eq!(WriteMode::Random.write_kind(), WriteKind::RandomWrite);
    }

    #[test]
    fn test_later_rule_replaces_earlier() {
        let mut table = PolicyTable::new();

        table.insert(PolicyRule::new("SENSOR_LOGS", "QLC_A", WriteMode::Random));
        table.insert(PolicyRule::new(
            "SENSOR_LOGS",
            "QLC_B",
            WriteMode::ZnsSequential,
        ));

        assert_eq!(table.len(), 1);
        let rule = table.get("SENSOR_LOGS").unwrap();
        assert_eq!(rule.target, "QLC_B");
        assert_eq!(rule.mode, WriteMode::ZnsSequential);
    }

    #[test]
    fn test_missing_tag_yields_none() {
        let table = PolicyTable::new();
        assert!(table.get("UNCLASSIFIED").is_none());
        assert!(table.is_empty());
    }
}
