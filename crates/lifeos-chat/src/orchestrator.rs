//! Conversation orchestrator.
//!
//! Couples the session store with the remote gateway. A user turn goes
//! `Idle -> Sending -> Idle`: the user message is committed optimistically,
//! the gateway is awaited without holding the store lock, and the reply (or
//! the fixed failure text) is committed to the session the turn started in,
//! even if the user switched away meanwhile.

use lifeos_ai::{interpret, AiError, ChunkCallback, SessionGateway};
use lifeos_common::{ChatEvent, EventBus, Message, SessionId};
use lifeos_config::schema::SessionConfig;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info};

use crate::flight::InFlight;
use crate::store::{DeleteOutcome, Session, SessionStore};

/// Assistant text committed when the remote call fails.
pub const CONNECTION_FAILED_MESSAGE: &str = "Connection to diagnostic core failed.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    Idle,
    Sending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    EmptyInput,
    NoActiveSession,
    AlreadySending,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::EmptyInput => write!(f, "empty input"),
            RejectReason::NoActiveSession => write!(f, "no active session"),
            RejectReason::AlreadySending => write!(f, "a reply is still pending"),
        }
    }
}

/// Result of one `submit`.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Nothing was sent or committed.
    Rejected(RejectReason),
    /// The reply was committed.
    Committed(Message),
    /// The remote call failed; the failure message was committed.
    Failed(Message),
}

impl SubmitOutcome {
    /// The assistant message committed for this turn, if any.
    pub fn message(&self) -> Option<&Message> {
        match self {
            SubmitOutcome::Committed(msg) | SubmitOutcome::Failed(msg) => Some(msg),
            SubmitOutcome::Rejected(_) => None,
        }
    }
}

pub struct Orchestrator {
    gateway: SessionGateway,
    store: Mutex<SessionStore>,
    in_flight: InFlight,
    events: EventBus,
}

impl Orchestrator {
    pub fn new(gateway: SessionGateway, config: SessionConfig) -> Self {
        Self {
            gateway,
            store: Mutex::new(SessionStore::new(config)),
            in_flight: InFlight::new(),
            events: EventBus::default(),
        }
    }

    pub fn gateway(&self) -> &SessionGateway {
        &self.gateway
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.events.subscribe()
    }

    /// Create a seeded session, make it active and open its remote context.
    ///
    /// The session exists even if the context cannot be opened.
    pub async fn create_session(&self) -> Result<Session, AiError> {
        let session = self.store.lock().await.create_session().clone();
        self.events.publish(ChatEvent::SessionCreated(session.id.clone()));
        self.events
            .publish(ChatEvent::SessionActivated(session.id.clone()));
        self.gateway.initialize(&session.id, &session.messages)?;
        Ok(session)
    }

    /// Activate `id` and rebuild its remote context from the full history.
    /// Returns `Ok(None)` for an unknown id.
    pub async fn switch_session(&self, id: &SessionId) -> Result<Option<Session>, AiError> {
        let Some(session) = self.store.lock().await.switch_active(id).cloned() else {
            debug!(session = %id.short(), "switch to unknown session ignored");
            return Ok(None);
        };
        self.events.publish(ChatEvent::SessionActivated(id.clone()));
        self.gateway.initialize(id, &session.messages)?;
        Ok(Some(session))
    }

    /// Delete `id`. Deleting the last session creates its replacement here.
    pub async fn delete_session(&self, id: &SessionId) -> Result<DeleteOutcome, AiError> {
        let (outcome, next) = {
            let mut store = self.store.lock().await;
            let outcome = store.delete_session(id);
            let next = match &outcome {
                DeleteOutcome::Activated(next) => store.get(next).cloned(),
                _ => None,
            };
            (outcome, next)
        };
        if outcome == DeleteOutcome::NotFound {
            return Ok(outcome);
        }

        self.gateway.forget(id);
        self.events.publish(ChatEvent::SessionDeleted(id.clone()));

        if let Some(next) = next {
            self.events.publish(ChatEvent::SessionActivated(next.id.clone()));
            self.gateway.initialize(&next.id, &next.messages)?;
        } else if outcome == DeleteOutcome::Emptied {
            info!("last session deleted; starting a fresh one");
            self.create_session().await?;
        }
        Ok(outcome)
    }

    /// Create a session when none is active. Returns the active session.
    pub async fn ensure_active_session(&self) -> Result<Session, AiError> {
        if let Some(session) = self.active_session().await {
            return Ok(session);
        }
        self.create_session().await
    }

    pub async fn sessions(&self) -> Vec<Session> {
        self.store.lock().await.sessions().to_vec()
    }

    pub async fn active_session(&self) -> Option<Session> {
        self.store.lock().await.active().cloned()
    }

    pub async fn session(&self, id: &SessionId) -> Option<Session> {
        self.store.lock().await.get(id).cloned()
    }

    pub fn is_sending(&self, id: &SessionId) -> bool {
        self.in_flight.contains(id)
    }

    pub fn phase(&self, id: &SessionId) -> TurnPhase {
        if self.is_sending(id) {
            TurnPhase::Sending
        } else {
            TurnPhase::Idle
        }
    }

    /// Send `text` as a user turn of the active session.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        self.run_turn(text, None).await
    }

    /// Like `submit`, forwarding reply chunks as they arrive.
    pub async fn submit_streaming(&self, text: &str, on_chunk: ChunkCallback) -> SubmitOutcome {
        self.run_turn(text, Some(on_chunk)).await
    }

    async fn run_turn(&self, text: &str, on_chunk: Option<ChunkCallback>) -> SubmitOutcome {
        if text.trim().is_empty() {
            return SubmitOutcome::Rejected(RejectReason::EmptyInput);
        }

        let (session, mut staged, _guard) = {
            let mut store = self.store.lock().await;
            let Some(session) = store.active_id().cloned() else {
                return SubmitOutcome::Rejected(RejectReason::NoActiveSession);
            };
            let Some(guard) = self.in_flight.try_acquire(&session) else {
                debug!(session = %session.short(), "submit ignored; reply pending");
                return SubmitOutcome::Rejected(RejectReason::AlreadySending);
            };

            let mut staged = store
                .get(&session)
                .map(|s| s.messages.clone())
                .unwrap_or_default();
            let user = Message::user(text).stamped_after(staged.last());
            staged.push(user);
            store.append_messages(&session, staged.clone());
            (session, staged, guard)
        };

        let result = match on_chunk {
            Some(on_chunk) => self.gateway.send_streaming(&session, text, on_chunk).await,
            None => self.gateway.send(&session, text).await,
        };

        let (reply, failed) = match result {
            Ok(raw) => (interpret(&raw).into_message(), false),
            Err(e) => {
                error!(session = %session.short(), "turn failed: {e}");
                self.events.publish(ChatEvent::TurnFailed {
                    session: session.clone(),
                    reason: e.to_string(),
                });
                (Message::assistant(CONNECTION_FAILED_MESSAGE), true)
            }
        };

        let reply = reply.stamped_after(staged.last());
        staged.push(reply.clone());
        let count = staged.len();
        let committed = self.store.lock().await.append_messages(&session, staged);
        if committed {
            self.events.publish(ChatEvent::MessagesCommitted {
                session: session.clone(),
                count,
            });
        }

        if failed {
            SubmitOutcome::Failed(reply)
        } else {
            SubmitOutcome::Committed(reply)
        }
    }
}
