//! In-memory session collection.
//!
//! Sessions are kept most-recent-first. Store operations are synchronous and
//! never touch the remote gateway; the orchestrator pairs them with context
//! initialization.

use chrono::{DateTime, Utc};
use lifeos_common::{Message, Role, SessionId};
use lifeos_config::schema::SessionConfig;
use tracing::{debug, info};

/// One conversation thread.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: SessionId,
    pub title: String,
    /// Chronological, never empty.
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    fn seeded(config: &SessionConfig) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            title: config.default_title.clone(),
            messages: vec![Message::assistant(config.greeting.as_str())],
            created_at: now,
            updated_at: now,
        }
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// Result of `SessionStore::delete_session`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    NotFound,
    /// A non-active session was removed; the active pointer is unchanged.
    Inactive,
    /// The active session was removed and this one took its place.
    Activated(SessionId),
    /// The last session was removed. The caller creates the replacement.
    Emptied,
}

/// Title for a session whose first user message is `messages`' first user
/// turn: its first `max_chars` characters, plus `"..."` when longer.
pub fn derive_title(messages: &[Message], max_chars: usize) -> Option<String> {
    let first = messages.iter().find(|m| m.role == Role::User)?;
    let mut chars = first.content.chars();
    let mut title: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        title.push_str("...");
    }
    Some(title)
}

pub struct SessionStore {
    sessions: Vec<Session>,
    active: Option<SessionId>,
    config: SessionConfig,
}

impl SessionStore {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            sessions: Vec::new(),
            active: None,
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Create a greeting-seeded session at the front and make it active.
    pub fn create_session(&mut self) -> &Session {
        let session = Session::seeded(&self.config);
        info!(session = %session.id.short(), "session created");
        self.active = Some(session.id.clone());
        self.sessions.insert(0, session);
        &self.sessions[0]
    }

    /// Make `id` active. Unknown ids leave the store untouched.
    pub fn switch_active(&mut self, id: &SessionId) -> Option<&Session> {
        let session = self.sessions.iter().find(|s| &s.id == id)?;
        debug!(session = %id.short(), "session activated");
        self.active = Some(id.clone());
        Some(session)
    }

    pub fn delete_session(&mut self, id: &SessionId) -> DeleteOutcome {
        let Some(index) = self.sessions.iter().position(|s| &s.id == id) else {
            return DeleteOutcome::NotFound;
        };
        self.sessions.remove(index);
        info!(session = %id.short(), remaining = self.sessions.len(), "session deleted");

        if self.active.as_ref() != Some(id) {
            return DeleteOutcome::Inactive;
        }

        match self.sessions.first() {
            Some(next) => {
                let next = next.id.clone();
                self.active = Some(next.clone());
                DeleteOutcome::Activated(next)
            }
            None => {
                self.active = None;
                DeleteOutcome::Emptied
            }
        }
    }

    /// Replace the message list of `id` wholesale.
    ///
    /// Derives the title while it is still the default, and refreshes
    /// `updated_at`. Returns `false` when the session no longer exists.
    pub fn append_messages(&mut self, id: &SessionId, messages: Vec<Message>) -> bool {
        let max_chars = self.config.title_max_chars as usize;
        let Some(session) = self.sessions.iter_mut().find(|s| &s.id == id) else {
            debug!(session = %id.short(), "commit dropped; session no longer exists");
            return false;
        };
        if messages.is_empty() {
            return false;
        }

        if session.title == self.config.default_title && messages.len() > 1 {
            if let Some(title) = derive_title(&messages, max_chars) {
                session.title = title;
            }
        }
        session.messages = messages;
        session.updated_at = Utc::now();
        true
    }

    pub fn get(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| &s.id == id)
    }

    pub fn active(&self) -> Option<&Session> {
        self.active.as_ref().and_then(|id| self.get(id))
    }

    pub fn active_id(&self) -> Option<&SessionId> {
        self.active.as_ref()
    }

    /// Most recently created first.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
