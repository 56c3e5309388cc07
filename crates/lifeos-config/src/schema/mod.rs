//! Configuration schema types for the Life OS Debugger.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod display;
mod logging;
mod model;
mod session;

pub use display::*;
pub use logging::*;
pub use model::*;
pub use session::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LifeOsConfig {
    pub model: ModelConfig,
    pub session: SessionConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}
