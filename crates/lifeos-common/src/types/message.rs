use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::report::ReportPayload;
use crate::id::MessageId;

/// Content shown in place of the report body for report turns.
pub const REPORT_LABEL: &str = "Analysis Complete.";

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Turn variant. A report turn always carries its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum MessageKind {
    Text,
    Report(ReportPayload),
}

/// One conversational turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    pub kind: MessageKind,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(role: Role, content: String, kind: MessageKind) -> Self {
        Self {
            id: MessageId::new(),
            role,
            content,
            kind,
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content.into(), MessageKind::Text)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content.into(), MessageKind::Text)
    }

    pub fn report(payload: ReportPayload) -> Self {
        Self::new(
            Role::Assistant,
            REPORT_LABEL.to_string(),
            MessageKind::Report(payload),
        )
    }

    /// Clamp the timestamp so it is not earlier than `previous`.
    pub fn stamped_after(mut self, previous: Option<&Message>) -> Self {
        if let Some(prev) = previous {
            if self.timestamp < prev.timestamp {
                self.timestamp = prev.timestamp;
            }
        }
        self
    }

    pub fn is_report(&self) -> bool {
        matches!(self.kind, MessageKind::Report(_))
    }

    pub fn report_payload(&self) -> Option<&ReportPayload> {
        match &self.kind {
            MessageKind::Report(payload) => Some(payload),
            MessageKind::Text => None,
        }
    }
}
