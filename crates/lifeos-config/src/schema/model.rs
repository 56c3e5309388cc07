//! Remote model configuration.

use serde::{Deserialize, Serialize};

/// Remote generative model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub name: String,
    /// Sampling temperature (valid range: 0.0-2.0).
    pub temperature: f64,
    /// Output token cap (valid range: 1-65536).
    pub max_tokens: u32,
    /// Environment variables searched, in order, for the API credential.
    pub api_key_env: Vec<String>,
    /// Replaces the built-in diagnostic persona when set.
    pub system_instruction: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "gemini-3-flash-preview".into(),
            temperature: 0.7,
            max_tokens: 4096,
            api_key_env: vec!["GEMINI_API_KEY".into(), "API_KEY".into()],
            system_instruction: None,
        }
    }
}
