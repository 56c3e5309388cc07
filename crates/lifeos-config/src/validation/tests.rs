//! Tests for the full validation pipeline.

use super::*;
use crate::schema::*;

#[test]
fn default_config_validates() {
    let config = LifeOsConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_temperature_out_of_range() {
    let mut config = LifeOsConfig::default();
    config.model.temperature = 2.5;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("model.temperature"));
}

#[test]
fn catches_nan_temperature() {
    let mut config = LifeOsConfig::default();
    config.model.temperature = f64::NAN;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("model.temperature"));
}

#[test]
fn catches_zero_max_tokens() {
    let mut config = LifeOsConfig::default();
    config.model.max_tokens = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("model.max_tokens"));
}

#[test]
fn catches_blank_model_name() {
    let mut config = LifeOsConfig::default();
    config.model.name = "  ".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("model.name must not be empty"));
}

#[test]
fn catches_missing_api_key_env() {
    let mut config = LifeOsConfig::default();
    config.model.api_key_env.clear();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("model.api_key_env"));
}

#[test]
fn catches_blank_system_instruction_override() {
    let mut config = LifeOsConfig::default();
    config.model.system_instruction = Some(String::new());
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("model.system_instruction"));
}

#[test]
fn catches_title_length_zero() {
    let mut config = LifeOsConfig::default();
    config.session.title_max_chars = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("session.title_max_chars"));
}

#[test]
fn catches_reveal_delay_too_large() {
    let mut config = LifeOsConfig::default();
    config.display.reveal_ms = 5000;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("display.reveal_ms"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = LifeOsConfig::default();
    config.model.temperature = -1.0;
    config.session.greeting = String::new();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("model.temperature"));
    assert!(err.contains("session.greeting"));
    assert!(err.contains("; "));
}
