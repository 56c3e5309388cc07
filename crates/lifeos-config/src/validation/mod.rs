//! Full configuration validation.
//!
//! Each section has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod display;
mod helpers;
mod model;
mod session;

#[cfg(test)]
mod tests;

use crate::schema::LifeOsConfig;
use lifeos_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &LifeOsConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    model::validate_model(&mut errors, config);
    session::validate_session(&mut errors, config);
    display::validate_display(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
