//! Error types for the storage orchestrator
//!
//! Startup is the only fallible phase: once a configuration has been
//! loaded and the engine is built, routing and device writes never fail.
//! Routing misses (unknown tag, unresolved target, no eligible device)
//! are silent drops, not errors.

use thiserror::Error;

/// Unified error type for the orchestrator
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration source could not be read. Fatal to startup.
    #[error("Failed to read config file {path}: {source}")]
    ConfigUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration source was readable but not a valid document.
    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// True for errors that abort startup rather than describe bad input
    /// values the caller could correct in place.
    pub fn is_unreadable_source(&self) -> bool {
        matches!(self, Error::ConfigUnreadable { .. })
    }
}

/// Result type alias for the orchestrator
pub type Result<T> = std::result::Result<T, Error>;
