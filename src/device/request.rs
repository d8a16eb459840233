//! Write request value type
//!
//! A request is immutable from the caller's perspective: the routing
//! engine never mutates the submitted value, it forwards a copy with
//! the write kind overridden by policy.

use serde::{Deserialize, Serialize};

// =============================================================================
// Write Kind
// =============================================================================

/// Access pattern declared for a write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteKind {
    /// Small, scattered writes. On flash these carry the full
    /// program/erase penalty.
    RandomWrite,
    /// Append-style writes, eligible for the ZNS sequential path.
    SequentialWrite,
}

impl std::fmt::Display for WriteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteKind::RandomWrite => write!(f, "random"),
            WriteKind::SequentialWrite => write!(f, "sequential"),
        }
    }
}

// =============================================================================
// Write Request
// =============================================================================

/// A single tagged write submitted to the orchestrator
///
/// The payload itself is never modeled; `size_bytes` is opaque and only
/// feeds capacity accounting. The declared `kind` is advisory: static
/// policy always overrides it before the request reaches a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteRequest {
    /// Data class tag, e.g. `CRITICAL_METADATA` or `ARCHIVE_DATA`
    pub tag: String,
    /// Payload size in bytes
    pub size_bytes: u64,
    /// Declared access pattern
    pub kind: WriteKind,
}

impl WriteRequest {
    /// Create a new request
    pub fn new(tag: impl Into<String>, size_bytes: u64, kind: WriteKind) -> Self {
        Self {
            tag: tag.into(),
            size_bytes,
            kind,
        }
    }

    /// Copy of this request with the write kind replaced
    pub fn with_kind(&self, kind: WriteKind) -> Self {
        Self {
            tag: self.tag.clone(),
            size_bytes: self.size_bytes,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_kind_leaves_original_untouched() {
        let req = WriteRequest::new("SENSOR_LOGS", 128 * 1024, WriteKind::RandomWrite);
        let routed = req.with_kind(WriteKind::SequentialWrite);

        assert_eq!(routed.kind, WriteKind::SequentialWrite);
        assert_eq!(routed.tag, "SENSOR_LOGS");
        assert_eq!(routed.size_bytes, 128 * 1024);
        assert_eq!(req.kind, WriteKind::RandomWrite);
    }

    #[test]
    fn test_write_kind_display() {
        assert_eq!(format!("{}", WriteKind::RandomWrite), "random");
        assert_eq!(format!("{}", WriteKind::SequentialWrite), "sequential");
    }
}
