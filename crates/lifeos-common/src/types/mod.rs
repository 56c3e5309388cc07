mod message;
mod report;

pub use message::*;
pub use report::*;

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> ReportPayload {
        ReportPayload {
            core_desire: "recognition".into(),
            defensive_behavior: "over-preparing".into(),
            fear_root: "being exposed as average".into(),
            repeating_loop: "plan, stall, self-criticize".into(),
            primary_contradiction: "Freedom vs Security".into(),
            diagnosis_summary: "appears to be a safety-first configuration".into(),
        }
    }

    #[test]
    fn user_message_is_text() {
        let msg = Message::user("hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "hello");
        assert!(!msg.is_report());
        assert!(msg.report_payload().is_none());
    }

    #[test]
    fn report_message_carries_payload_and_label() {
        let msg = Message::report(payload());
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.content, REPORT_LABEL);
        assert!(msg.is_report());
        assert_eq!(
            msg.report_payload().map(|p| p.primary_contradiction.as_str()),
            Some("Freedom vs Security")
        );
    }

    #[test]
    fn stamped_after_never_goes_backwards() {
        let mut earlier = Message::user("first");
        earlier.timestamp = chrono::Utc::now() + chrono::Duration::seconds(60);
        let later = Message::assistant("second").stamped_after(Some(&earlier));
        assert!(later.timestamp >= earlier.timestamp);

        let unchanged = Message::assistant("third");
        let ts = unchanged.timestamp;
        assert_eq!(unchanged.stamped_after(None).timestamp, ts);
    }

    #[test]
    fn message_kind_serializes_tagged() {
        let msg = Message::report(payload());
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["kind"]["type"], "report");
        assert_eq!(json["kind"]["data"]["fear_root"], "being exposed as average");

        let text = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(text["kind"]["type"], "text");
    }

    #[test]
    fn report_payload_requires_all_fields() {
        let partial = serde_json::json!({
            "core_desire": "a",
            "defensive_behavior": "b",
            "fear_root": "c",
            "repeating_loop": "d",
            "primary_contradiction": "e"
        });
        assert!(serde_json::from_value::<ReportPayload>(partial).is_err());
    }

    #[test]
    fn report_payload_rejects_non_string_fields() {
        let numeric = serde_json::json!({
            "core_desire": "a",
            "defensive_behavior": "b",
            "fear_root": "c",
            "repeating_loop": 4,
            "primary_contradiction": "e",
            "diagnosis_summary": "f"
        });
        assert!(serde_json::from_value::<ReportPayload>(numeric).is_err());
    }

    #[test]
    fn report_payload_tolerates_extra_fields() {
        let extra = serde_json::json!({
            "core_desire": "a",
            "defensive_behavior": "b",
            "fear_root": "c",
            "repeating_loop": "d",
            "primary_contradiction": "e",
            "diagnosis_summary": "f",
            "confidence": "likely"
        });
        let parsed: ReportPayload = serde_json::from_value(extra).unwrap();
        assert_eq!(parsed.diagnosis_summary, "f");
    }
}
