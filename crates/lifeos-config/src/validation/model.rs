//! Validation for the `[model]` section.

use crate::schema::LifeOsConfig;

use super::helpers::{validate_not_blank, validate_range, validate_range_f64};

pub(crate) fn validate_model(errors: &mut Vec<String>, config: &LifeOsConfig) {
    let model = &config.model;

    validate_not_blank(errors, "model.name", &model.name);
    validate_range_f64(errors, "model.temperature", model.temperature, 0.0, 2.0);
    validate_range(errors, "model.max_tokens", model.max_tokens, 1, 65536);

    if model.api_key_env.is_empty() {
        errors.push("model.api_key_env must name at least one variable".into());
    }
    for (i, name) in model.api_key_env.iter().enumerate() {
        validate_not_blank(errors, &format!("model.api_key_env[{i}]"), name);
    }

    if let Some(ref instruction) = model.system_instruction {
        validate_not_blank(errors, "model.system_instruction", instruction);
    }
}
