//! Gemini API client configuration.

use crate::AiError;

/// Variables searched for the API key when none are configured.
pub const DEFAULT_API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Gemini API client configuration.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "gemini-3-flash-preview".to_string(),
            max_tokens: 4096,
            temperature: 0.7,
        }
    }

    /// Create config from the first set, non-empty variable in `vars`.
    pub fn from_env<S: AsRef<str>>(vars: &[S]) -> Result<Self, AiError> {
        Self::from_lookup(vars, |name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<S: AsRef<str>>(
        vars: &[S],
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AiError> {
        for name in vars {
            if let Some(key) = lookup(name.as_ref()) {
                if !key.trim().is_empty() {
                    return Ok(Self::new(key.trim()));
                }
            }
        }

        let names: Vec<&str> = vars.iter().map(|s| s.as_ref()).collect();
        Err(AiError::NotConfigured(format!(
            "Gemini API key missing. Set one of: {}",
            names.join(", ")
        )))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}
