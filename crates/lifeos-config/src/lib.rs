//! Life OS Debugger configuration system.
//!
//! TOML-based configuration with full validation. All config sections use
//! sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use lifeos_config::{config_to_json, load_config};
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{LifeOsConfig, CONFIG_SCHEMA_VERSION};

use lifeos_common::ConfigError;
use std::path::Path;

/// Load config from `path`, or from the platform default location.
///
/// The default location is created with a commented template when missing;
/// an explicit path must exist.
pub fn load_config(path: Option<&Path>) -> Result<LifeOsConfig, ConfigError> {
    match path {
        Some(path) => toml_loader::load_from_path(path),
        None => toml_loader::load_default(),
    }
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &LifeOsConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
