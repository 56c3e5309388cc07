//! Logging configuration types.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `EnvFilter` directive scoped to this workspace's crates.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "lifeos=trace",
            LogLevel::Debug => "lifeos=debug",
            LogLevel::Info => "lifeos=info",
            LogLevel::Warn => "lifeos=warn",
            LogLevel::Error => "lifeos=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
