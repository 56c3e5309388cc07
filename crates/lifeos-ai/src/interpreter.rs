//! Response interpreter.
//!
//! The remote service answers in a single text channel: either prose, or one
//! raw JSON object `{"type": "analysis_complete", "data": {...}}` holding the
//! final report. `interpret` decides which one a reply is. It never fails;
//! anything that is not a well-formed report is a text turn.

use lifeos_common::{Message, ReportPayload};
use serde::Deserialize;

/// Content substituted for a reply with no text.
pub const EMPTY_RESPONSE_PLACEHOLDER: &str = "System error: Empty response.";

/// `type` value marking a report object.
pub const REPORT_TYPE: &str = "analysis_complete";

/// Classification of one assistant reply.
#[derive(Debug, Clone, PartialEq)]
pub enum AssistantOutcome {
    Report(ReportPayload),
    Text(String),
}

impl AssistantOutcome {
    /// Build the assistant message committed for this outcome.
    pub fn into_message(self) -> Message {
        match self {
            AssistantOutcome::Report(payload) => Message::report(payload),
            AssistantOutcome::Text(text) => Message::assistant(text),
        }
    }

    pub fn is_report(&self) -> bool {
        matches!(self, AssistantOutcome::Report(_))
    }
}

#[derive(Deserialize)]
struct ReportEnvelope {
    #[serde(rename = "type")]
    kind: String,
    data: ReportPayload,
}

/// Classify raw assistant text.
pub fn interpret(raw: &str) -> AssistantOutcome {
    if raw.is_empty() {
        return AssistantOutcome::Text(EMPTY_RESPONSE_PLACEHOLDER.to_string());
    }

    match extract_report(raw) {
        Some(payload) => AssistantOutcome::Report(payload),
        None => AssistantOutcome::Text(raw.to_string()),
    }
}

/// Parse the span from the first `{` to the last `}` as a report envelope.
fn extract_report(raw: &str) -> Option<ReportPayload> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }

    let envelope: ReportEnvelope = match serde_json::from_str(&raw[start..=end]) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::debug!("reply is not a report: {e}");
            return None;
        }
    };

    (envelope.kind == REPORT_TYPE).then_some(envelope.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"{"type":"analysis_complete","data":{"core_desire":"a","defensive_behavior":"b","fear_root":"c","repeating_loop":"d","primary_contradiction":"e","diagnosis_summary":"f"}}"#;

    #[test]
    fn bare_report_preserves_all_fields() {
        let outcome = interpret(REPORT);
        let AssistantOutcome::Report(payload) = outcome else {
            panic!("expected report, got {outcome:?}");
        };
        assert_eq!(payload.core_desire, "a");
        assert_eq!(payload.defensive_behavior, "b");
        assert_eq!(payload.fear_root, "c");
        assert_eq!(payload.repeating_loop, "d");
        assert_eq!(payload.primary_contradiction, "e");
        assert_eq!(payload.diagnosis_summary, "f");
    }

    #[test]
    fn report_surrounded_by_prose_is_extracted() {
        let raw = format!("Here is what I found:\n\n{REPORT}\n\nTake your time.");
        assert!(interpret(&raw).is_report());
    }

    #[test]
    fn report_inside_markdown_fence_is_extracted() {
        let raw = format!("```json\n{REPORT}\n```");
        assert!(interpret(&raw).is_report());
    }

    #[test]
    fn braces_in_prose_fall_back_to_text() {
        let raw = "I think you should consider {this} carefully.";
        assert_eq!(interpret(raw), AssistantOutcome::Text(raw.to_string()));
    }

    #[test]
    fn empty_reply_uses_placeholder() {
        assert_eq!(
            interpret(""),
            AssistantOutcome::Text(EMPTY_RESPONSE_PLACEHOLDER.to_string())
        );
    }

    #[test]
    fn whitespace_reply_is_kept_as_text() {
        assert_eq!(interpret(" \n"), AssistantOutcome::Text(" \n".to_string()));
    }

    #[test]
    fn plain_text_passes_through() {
        let raw = "When someone else succeeds, what is the first thought you notice?";
        assert_eq!(interpret(raw), AssistantOutcome::Text(raw.to_string()));
    }

    #[test]
    fn wrong_type_falls_back_to_text() {
        let raw = REPORT.replace("analysis_complete", "analysis_pending");
        assert_eq!(interpret(&raw), AssistantOutcome::Text(raw.clone()));
    }

    #[test]
    fn missing_data_field_falls_back_to_text() {
        let raw = r#"{"type":"analysis_complete"}"#;
        assert_eq!(interpret(raw), AssistantOutcome::Text(raw.to_string()));
    }

    #[test]
    fn incomplete_data_falls_back_to_text() {
        let raw = r#"{"type":"analysis_complete","data":{"core_desire":"a"}}"#;
        assert_eq!(interpret(raw), AssistantOutcome::Text(raw.to_string()));
    }

    #[test]
    fn non_string_field_falls_back_to_text() {
        let raw = REPORT.replace(r#""fear_root":"c""#, r#""fear_root":3"#);
        assert!(!interpret(&raw).is_report());
    }

    #[test]
    fn reversed_braces_fall_back_to_text() {
        let raw = "close } before open {";
        assert_eq!(interpret(raw), AssistantOutcome::Text(raw.to_string()));
    }

    #[test]
    fn greedy_span_with_two_objects_falls_back_to_text() {
        let raw = format!("{REPORT} and also {{\"x\":1}}");
        assert!(!interpret(&raw).is_report());
    }

    #[test]
    fn into_message_builds_matching_turn() {
        let report = interpret(REPORT).into_message();
        assert!(report.is_report());
        assert_eq!(report.content, lifeos_common::REPORT_LABEL);

        let text = interpret("hello").into_message();
        assert!(!text.is_report());
        assert_eq!(text.content, "hello");
        assert_eq!(text.role, lifeos_common::Role::Assistant);
    }
}
