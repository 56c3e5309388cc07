//! Terminal presentation settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Delay per character when revealing assistant text, in ms (0-1000, 0 disables).
    pub reveal_ms: u32,
    /// Print reply chunks as they arrive instead of waiting for the full turn.
    pub stream: bool,
    /// Distance from the bottom, in lines, past which a view counts as scrolled away.
    pub scroll_threshold: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            reveal_ms: 15,
            stream: false,
            scroll_threshold: 200,
        }
    }
}
