//! Session defaults.

use serde::{Deserialize, Serialize};

pub const DEFAULT_GREETING: &str = "Hello. I am the Life OS Debugger.\n\n\
My purpose is to help you detect internal contradictions. \
To begin, please tell me: where do you feel most stuck right now?";

/// Settings applied to every new conversation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Title a session carries until its first user message names it.
    pub default_title: String,
    /// Characters kept from the first user message (valid range: 1-200).
    pub title_max_chars: u32,
    /// Assistant message every session starts with.
    pub greeting: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_title: "New Session".into(),
            title_max_chars: 30,
            greeting: DEFAULT_GREETING.into(),
        }
    }
}
