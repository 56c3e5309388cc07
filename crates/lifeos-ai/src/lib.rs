//! Remote model access for the Life OS Debugger.
//!
//! Provides:
//! - the `AiClient` seam and a Gemini implementation (plain and SSE streaming)
//! - the session gateway that keeps one remote conversation context per session
//! - the response interpreter that separates prose turns from report turns

pub mod gateway;
pub mod gemini;
pub mod interpreter;
pub mod prompt;
pub mod streaming;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;

use async_trait::async_trait;

pub use gateway::{ClientFactory, ContextStore, SessionGateway};
pub use gemini::{GeminiClient, GeminiConfig};
pub use interpreter::{interpret, AssistantOutcome, EMPTY_RESPONSE_PLACEHOLDER};
pub use prompt::SYSTEM_INSTRUCTION;

/// Callback receiving text chunks as they stream in.
pub type ChunkCallback = Box<dyn Fn(String) + Send + Sync>;

#[async_trait]
pub trait AiClient: Send + Sync {
    async fn send_message(&self, turns: &[Turn]) -> Result<AiResponse, AiError>;

    async fn send_message_streaming(
        &self,
        turns: &[Turn],
        on_chunk: ChunkCallback,
    ) -> Result<AiResponse, AiError>;
}

/// One entry of the history replayed to the remote service.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
}

impl Turn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Model,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    System,
    User,
    Model,
}

#[derive(Debug, Clone)]
pub struct AiResponse {
    pub content: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("Not configured: {0}")]
    NotConfigured(String),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
}

impl AiError {
    /// Missing credentials or settings, as opposed to a failed remote call.
    pub fn is_configuration(&self) -> bool {
        matches!(self, AiError::NotConfigured(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_usage_total_saturates() {
        let usage = TokenUsage {
            input_tokens: u64::MAX,
            output_tokens: 5,
        };
        assert_eq!(usage.total_tokens(), u64::MAX);
    }

    #[test]
    fn ai_error_display() {
        assert_eq!(
            AiError::NotConfigured("API_KEY missing".into()).to_string(),
            "Not configured: API_KEY missing"
        );
        assert_eq!(AiError::RateLimited.to_string(), "Rate limited");
        assert!(AiError::NotConfigured(String::new()).is_configuration());
        assert!(!AiError::Timeout.is_configuration());
    }

    #[test]
    fn turn_role_serializes_lowercase() {
        let json = serde_json::to_string(&Turn::model("hi")).unwrap();
        assert_eq!(json, r#"{"role":"model","content":"hi"}"#);
    }
}
