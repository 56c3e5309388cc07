//! Line-oriented front end over the orchestrator.
//!
//! Replies are awaited on spawned tasks, so the prompt stays usable (listing,
//! switching, deleting) while a turn is pending.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use lifeos_ai::{AiError, ChunkCallback};
use lifeos_chat::{DeleteOutcome, Orchestrator, Session, SubmitOutcome};
use lifeos_common::{ChatEvent, Message, SessionId};
use lifeos_config::schema::DisplayConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::render;
use crate::reveal::reveal;
use crate::scroll::is_far_from_bottom;

/// Rows assumed visible when deciding whether `/history` shows only the tail.
const VIEW_ROWS: u32 = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit(String),
    New,
    List,
    Switch(usize),
    Delete(usize),
    History { all: bool },
    Help,
    Quit,
    Invalid(String),
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Command::Empty;
        }
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Command::Submit(line.trim_end_matches(['\r', '\n']).to_string());
        };

        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();
        match (name, arg) {
            ("new", None) => Command::New,
            ("list", None) => Command::List,
            ("help", None) => Command::Help,
            ("quit" | "exit", None) => Command::Quit,
            ("history", None) => Command::History { all: false },
            ("history", Some("all")) => Command::History { all: true },
            ("switch", Some(n)) => parse_index(n).map_or_else(
                || Command::Invalid(format!("not a session number: {n}")),
                Command::Switch,
            ),
            ("delete", Some(n)) => parse_index(n).map_or_else(
                || Command::Invalid(format!("not a session number: {n}")),
                Command::Delete,
            ),
            _ => Command::Invalid(format!("unknown command: /{rest}")),
        }
    }
}

/// 1-based listing number to 0-based index.
fn parse_index(raw: &str) -> Option<usize> {
    raw.parse::<usize>().ok()?.checked_sub(1)
}

pub struct Repl {
    orch: Arc<Orchestrator>,
    display: DisplayConfig,
}

impl Repl {
    pub fn new(orch: Arc<Orchestrator>, display: DisplayConfig) -> Self {
        Self { orch, display }
    }

    pub async fn run(self) -> std::io::Result<()> {
        if let Some(session) = self.orch.active_session().await {
            println!("{}", render::history(&session.messages));
        }
        println!("Type /help for commands.");

        let notices = spawn_commit_notices(self.orch.clone());
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            prompt();
            let Some(line) = lines.next_line().await? else {
                break;
            };
            match Command::parse(&line) {
                Command::Empty => {}
                Command::Quit => break,
                Command::Help => println!("{}", render::HELP),
                Command::Invalid(msg) => println!("{msg} (try /help)"),
                Command::Submit(text) => self.submit(text).await,
                Command::New => self.new_session().await,
                Command::List => self.list().await,
                Command::Switch(index) => self.switch(index).await,
                Command::Delete(index) => self.delete(index).await,
                Command::History { all } => self.history(all).await,
            }
        }
        notices.abort();
        Ok(())
    }

    async fn submit(&self, text: String) {
        let origin = self.orch.active_session().await.map(|s| s.id);
        if origin.as_ref().is_some_and(|id| self.orch.is_sending(id)) {
            println!("(a reply is still pending for this session)");
            return;
        }

        let orch = self.orch.clone();
        let display = self.display.clone();
        tokio::spawn(async move {
            let outcome = if display.stream {
                let on_chunk: ChunkCallback = Box::new(|chunk: String| {
                    print!("{chunk}");
                    let _ = std::io::stdout().flush();
                });
                orch.submit_streaming(&text, on_chunk).await
            } else {
                println!("Analyzing...");
                orch.submit(&text).await
            };

            let reply = match outcome {
                SubmitOutcome::Rejected(reason) => {
                    println!("({reason})");
                    prompt();
                    return;
                }
                SubmitOutcome::Committed(reply) | SubmitOutcome::Failed(reply) => reply,
            };

            // Replies for a session that is no longer on screen are announced
            // by the commit notice task instead.
            let Some(origin) = origin else { return };
            if orch.active_session().await.is_some_and(|s| s.id == origin) {
                show_reply(&reply, &display).await;
                prompt();
            } else if orch.session(&origin).await.is_none() {
                println!("\n(reply discarded: its session was deleted)");
                prompt();
            }
        });
    }

    async fn new_session(&self) {
        match self.orch.create_session().await {
            Ok(session) => println!("{}", render::history(&session.messages)),
            Err(e) => report_error("session created without a remote context", &e),
        }
    }

    async fn list(&self) {
        let sessions = self.orch.sessions().await;
        let active = self.orch.active_session().await.map(|s| s.id);
        print!("{}", render::session_list(&sessions, active.as_ref()));
    }

    async fn switch(&self, index: usize) {
        let Some(target) = self.orch.sessions().await.get(index).map(|s| s.id.clone()) else {
            println!("no session {} (see /list)", index + 1);
            return;
        };
        match self.orch.switch_session(&target).await {
            Ok(Some(session)) => {
                println!("-- {} --", session.title);
                println!("{}", render::history(&session.messages));
            }
            Ok(None) => println!("session no longer exists"),
            Err(e) => report_error("switched without a remote context", &e),
        }
    }

    async fn delete(&self, index: usize) {
        let Some(target) = self.orch.sessions().await.get(index).map(|s| s.id.clone()) else {
            println!("no session {} (see /list)", index + 1);
            return;
        };
        match self.orch.delete_session(&target).await {
            Ok(DeleteOutcome::NotFound) => println!("session no longer exists"),
            Ok(DeleteOutcome::Inactive) => println!("deleted"),
            Ok(DeleteOutcome::Activated(_) | DeleteOutcome::Emptied) => {
                println!("deleted; now in:");
                self.history(false).await;
            }
            Err(e) => report_error("deleted, but the next session has no remote context", &e),
        }
    }

    async fn history(&self, all: bool) {
        let Some(session) = self.orch.active_session().await else {
            println!("no active session");
            return;
        };
        let rendered = render::history(&session.messages);
        let lines: Vec<&str> = rendered.lines().collect();
        let total = u32::try_from(lines.len()).unwrap_or(u32::MAX);

        if all || !is_far_from_bottom(0, total, VIEW_ROWS, self.display.scroll_threshold) {
            println!("{rendered}");
            return;
        }
        let (hidden, shown) = tail(lines.as_slice(), VIEW_ROWS as usize);
        debug!(total, hidden, "history truncated to tail");
        println!("... {hidden} earlier lines (/history all)");
        println!("{}", shown.join("\n"));
    }
}

/// Last `keep` lines and the number of lines before them.
fn tail<'a, T>(lines: &'a [T], keep: usize) -> (usize, &'a [T]) {
    let hidden = lines.len().saturating_sub(keep);
    (hidden, &lines[hidden..])
}

/// One-line notice for a reply committed to a session other than `active`.
pub fn commit_notice(
    event: &ChatEvent,
    active: Option<&SessionId>,
    sessions: &[Session],
) -> Option<String> {
    let ChatEvent::MessagesCommitted { session, .. } = event else {
        return None;
    };
    if Some(session) == active {
        return None;
    }
    let (index, target) = sessions
        .iter()
        .enumerate()
        .find(|(_, s)| &s.id == session)?;
    Some(format!(
        "[new reply in \"{}\" (/switch {})]",
        target.title,
        index + 1
    ))
}

/// Print a notice whenever a reply lands in a session that is not on screen.
fn spawn_commit_notices(orch: Arc<Orchestrator>) -> JoinHandle<()> {
    let mut events = orch.subscribe();
    tokio::spawn(async move {
        loop {
            let event = match events.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "commit notices lagged");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };
            let active = orch.active_session().await.map(|s| s.id);
            let sessions = orch.sessions().await;
            if let Some(notice) = commit_notice(&event, active.as_ref(), &sessions) {
                println!("\n{notice}");
                prompt();
            }
        }
    })
}

async fn show_reply(reply: &Message, display: &DisplayConfig) {
    if let Some(payload) = reply.report_payload() {
        println!();
        println!("{}", render::message_header(reply));
        print!("{}", render::report_card(payload));
        return;
    }
    if display.stream {
        println!();
        return;
    }

    println!("{}", render::message_header(reply));
    let mut stdout = tokio::io::stdout();
    let delay = Duration::from_millis(u64::from(display.reveal_ms));
    if let Err(e) = reveal(&mut stdout, &reply.content, delay).await {
        warn!("reveal failed: {e}");
    }
    println!();
}

fn report_error(context: &str, err: &AiError) {
    warn!("{context}: {err}");
    println!("{context}: {err}");
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}
