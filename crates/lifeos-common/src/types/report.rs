use serde::{Deserialize, Serialize};

/// Structured diagnostic produced at the end of a conversation.
///
/// All fields are free text from the remote service; only their presence and
/// string type are checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPayload {
    pub core_desire: String,
    pub defensive_behavior: String,
    pub fear_root: String,
    pub repeating_loop: String,
    pub primary_contradiction: String,
    pub diagnosis_summary: String,
}
