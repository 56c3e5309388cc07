//! Plain-text rendering of sessions, messages and report cards.

use lifeos_chat::Session;
use lifeos_common::{Message, ReportPayload, Role, SessionId};

/// Inner width of the report card.
pub const CARD_WIDTH: usize = 58;

pub fn speaker(role: Role) -> &'static str {
    match role {
        Role::User => "You",
        Role::Assistant => "Debugger",
    }
}

/// `[HH:MM] Speaker` line shown above each message.
pub fn message_header(msg: &Message) -> String {
    format!(
        "[{}] {}",
        msg.timestamp.with_timezone(&chrono::Local).format("%H:%M"),
        speaker(msg.role)
    )
}

/// Full rendering of one message: header plus body or report card.
pub fn message(msg: &Message) -> String {
    let body = match msg.report_payload() {
        Some(payload) => report_card(payload),
        None => msg.content.clone(),
    };
    format!("{}\n{}\n", message_header(msg), body)
}

/// Greedy word wrap on character counts. Words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut len = 0;
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if len > 0 {
                    lines.push(std::mem::take(&mut line));
                    len = 0;
                }
                lines.push(word.drain(..width).collect());
            }
            if word.is_empty() {
                continue;
            }
            if len > 0 && len + 1 + word.len() > width {
                lines.push(std::mem::take(&mut line));
                len = 0;
            }
            if len > 0 {
                line.push(' ');
                len += 1;
            }
            len += word.len();
            line.extend(word);
        }
        lines.push(line);
    }
    lines
}

fn row(text: &str) -> String {
    let pad = CARD_WIDTH.saturating_sub(text.chars().count());
    format!("│ {text}{} │\n", " ".repeat(pad))
}

fn rule(left: char, right: char) -> String {
    format!("{left}{}{right}\n", "─".repeat(CARD_WIDTH + 2))
}

fn section(out: &mut String, label: &str, text: &str) {
    out.push_str(&row(label));
    for line in wrap(text, CARD_WIDTH - 2) {
        out.push_str(&row(&format!("  {line}")));
    }
}

/// Boxed "CONFLICT DETECTED" card for a report turn.
pub fn report_card(report: &ReportPayload) -> String {
    let mut out = rule('┌', '┐');
    out.push_str(&row("CONFLICT DETECTED"));
    for line in wrap(&report.primary_contradiction, CARD_WIDTH) {
        out.push_str(&row(&line));
    }
    out.push_str(&rule('├', '┤'));
    section(&mut out, "Diagnostic Analysis", &report.diagnosis_summary);
    out.push_str(&rule('├', '┤'));
    section(&mut out, "Core Desire", &report.core_desire);
    section(&mut out, "Fear Root", &report.fear_root);
    out.push_str(&rule('├', '┤'));
    section(&mut out, "Defensive Behavior", &report.defensive_behavior);
    section(&mut out, "Repeating Loop", &report.repeating_loop);
    out.push_str(&rule('└', '┘'));
    out
}

/// Numbered session listing, newest first. `*` marks the active session.
pub fn session_list(sessions: &[Session], active: Option<&SessionId>) -> String {
    let mut out = String::new();
    for (i, session) in sessions.iter().enumerate() {
        let marker = if Some(&session.id) == active { '*' } else { ' ' };
        out.push_str(&format!(
            "{marker} {:>2}. {}  ({} messages, {})\n",
            i + 1,
            session.title,
            session.messages.len(),
            session
                .updated_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M"),
        ));
    }
    out
}

pub fn history(messages: &[Message]) -> String {
    messages.iter().map(message).collect::<Vec<_>>().join("\n")
}

pub const HELP: &str = "\
Commands:
  /new            start a new session
  /list           list sessions
  /switch <n>     switch to session n from /list
  /delete <n>     delete session n from /list
  /history [all]  show the active session's messages
  /help           show this help
  /quit           exit
Anything else is sent to the debugger.";

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> ReportPayload {
        ReportPayload {
            core_desire: "Recognition".into(),
            defensive_behavior: "Overworking".into(),
            fear_root: "Being ordinary".into(),
            repeating_loop: "Burnout, retreat, guilt, overwork".into(),
            primary_contradiction: "You want rest but treat it as failure".into(),
            diagnosis_summary: "Every break you take is followed by a harder sprint, \
                                so rest never restores you."
                .into(),
        }
    }

    #[test]
    fn wrap_respects_width() {
        let lines = wrap("one two three four five six", 9);
        assert_eq!(lines, vec!["one two", "three", "four five", "six"]);
        assert!(lines.iter().all(|l| l.chars().count() <= 9));
    }

    #[test]
    fn wrap_splits_long_words_and_keeps_paragraphs() {
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap("a\n\nb", 10), vec!["a", "", "b"]);
    }

    #[test]
    fn report_card_has_all_sections() {
        let card = report_card(&payload());
        for label in [
            "CONFLICT DETECTED",
            "You want rest but treat it as failure",
            "Diagnostic Analysis",
            "Core Desire",
            "Fear Root",
            "Defensive Behavior",
            "Repeating Loop",
            "Recognition",
            "Burnout, retreat, guilt, overwork",
        ] {
            assert!(card.contains(label), "missing {label}");
        }
    }

    #[test]
    fn report_card_rows_are_aligned() {
        let card = report_card(&payload());
        let widths: Vec<_> = card.lines().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == CARD_WIDTH + 4));
    }

    #[test]
    fn report_message_renders_card_not_label() {
        let rendered = message(&Message::report(payload()));
        assert!(rendered.contains("CONFLICT DETECTED"));
        assert!(rendered.contains("Debugger"));
    }

    #[test]
    fn text_message_renders_content() {
        let rendered = message(&Message::user("I feel stuck"));
        assert!(rendered.contains("You"));
        assert!(rendered.ends_with("I feel stuck\n"));
    }
}
