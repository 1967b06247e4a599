//! Configuration for the call-history client
//!
//! The logger option is an injected capability, not ambient global state:
//! the client holds the level it was constructed with and gates its own
//! diagnostics on it before emitting through `tracing`. This keeps the core
//! testable in isolation from process-wide subscriber configuration.

use serde::{Deserialize, Serialize};
use url::Url;

/// Severity threshold for diagnostics emitted by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Emit nothing
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Logging capability handed to the client at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub level: LogLevel,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
        }
    }
}

impl LoggerConfig {
    /// Whether diagnostics at `level` should be emitted
    pub fn allows(&self, level: LogLevel) -> bool {
        self.level >= level
    }
}

/// Configuration for a [`CallHistoryClient`](crate::CallHistoryClient)
#[derive(Debug, Clone)]
pub struct CallHistoryConfig {
    /// Fixed endpoint the missed-call read-state POST is issued against
    pub read_state_url: Url,
    /// Injected logging capability
    pub logger: LoggerConfig,
}

impl CallHistoryConfig {
    pub fn new(read_state_url: Url) -> Self {
        Self {
            read_state_url,
            logger: LoggerConfig::default(),
        }
    }

    pub fn with_logger(mut self, logger: LoggerConfig) -> Self {
        self.logger = logger;
        self
    }
}
