//! Remote session gateway.
//!
//! Maps each conversation session to a remote context (its replayable
//! history) and mediates every call to the model. The client is resolved on
//! first use, so a missing credential surfaces as `AiError::NotConfigured`
//! from the first `initialize` or `send`, not at construction.

mod context;


use std::sync::{Arc, Mutex, PoisonError};

use lifeos_common::{Message, Role, SessionId};
use tracing::{debug, error, info, warn};

use crate::{AiClient, AiError, ChunkCallback, Turn};

pub use context::{ChatContext, ContextStore};

/// Produces the remote client on first use.
pub type ClientFactory = Box<dyn Fn() -> Result<Arc<dyn AiClient>, AiError> + Send + Sync>;

pub struct SessionGateway {
    contexts: Arc<ContextStore>,
    factory: ClientFactory,
    client: Mutex<Option<Arc<dyn AiClient>>>,
    system_instruction: String,
}

/// Request material captured before the remote call.
struct Prepared {
    client: Arc<dyn AiClient>,
    generation: u64,
    request: Vec<Turn>,
}

impl SessionGateway {
    pub fn new(contexts: Arc<ContextStore>, factory: ClientFactory) -> Self {
        Self {
            contexts,
            factory,
            client: Mutex::new(None),
            system_instruction: crate::SYSTEM_INSTRUCTION.to_string(),
        }
    }

    /// Gateway over an already constructed client.
    pub fn with_client(contexts: Arc<ContextStore>, client: Arc<dyn AiClient>) -> Self {
        Self::new(contexts, Box::new(move || Ok(client.clone())))
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    pub fn contexts(&self) -> &Arc<ContextStore> {
        &self.contexts
    }

    fn client(&self) -> Result<Arc<dyn AiClient>, AiError> {
        let mut slot = self.client.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }
        let client = (self.factory)().inspect_err(|e| error!("remote client unavailable: {e}"))?;
        *slot = Some(client.clone());
        Ok(client)
    }

    /// Establish (or replace) the remote context for `session`, seeded with
    /// `prior`. Report turns are replayed as their text label.
    pub fn initialize(&self, session: &SessionId, prior: &[Message]) -> Result<(), AiError> {
        self.client()?;
        let history = to_turns(prior);
        let generation = self.contexts.replace(session.clone(), history);
        info!(
            session = %session.short(),
            turns = prior.len(),
            generation,
            "remote context initialized"
        );
        Ok(())
    }

    /// Send one user turn and return the raw reply text.
    pub async fn send(&self, session: &SessionId, text: &str) -> Result<String, AiError> {
        let prepared = self.prepare(session, text)?;
        let result = prepared.client.send_message(&prepared.request).await;
        self.finish(session, prepared.generation, text, result.map(|r| r.content))
    }

    /// Like `send`, forwarding text chunks to `on_chunk` as they arrive.
    pub async fn send_streaming(
        &self,
        session: &SessionId,
        text: &str,
        on_chunk: ChunkCallback,
    ) -> Result<String, AiError> {
        let prepared = self.prepare(session, text)?;
        let result = prepared
            .client
            .send_message_streaming(&prepared.request, on_chunk)
            .await;
        self.finish(session, prepared.generation, text, result.map(|r| r.content))
    }

    pub fn has_context(&self, session: &SessionId) -> bool {
        self.contexts.contains(session)
    }

    /// Drop the remote context of a deleted session.
    pub fn forget(&self, session: &SessionId) -> bool {
        self.contexts.remove(session)
    }

    fn prepare(&self, session: &SessionId, text: &str) -> Result<Prepared, AiError> {
        let client = self.client()?;

        let (context, created) = self.contexts.snapshot_or_create(session);
        if created {
            warn!(
                session = %session.short(),
                "no remote context; continuing with empty history"
            );
        }

        let mut request = Vec::with_capacity(context.history.len() + 2);
        request.push(Turn::system(self.system_instruction.as_str()));
        request.extend(context.history);
        request.push(Turn::user(text));

        debug!(session = %session.short(), turns = request.len(), "sending turn");
        Ok(Prepared {
            client,
            generation: context.generation,
            request,
        })
    }

    fn finish(
        &self,
        session: &SessionId,
        generation: u64,
        text: &str,
        result: Result<String, AiError>,
    ) -> Result<String, AiError> {
        match result {
            Ok(reply) => {
                let recorded = self.contexts.record_exchange(
                    session,
                    generation,
                    Turn::user(text),
                    Turn::model(reply.as_str()),
                );
                if !recorded {
                    debug!(
                        session = %session.short(),
                        "context replaced during call; exchange not recorded"
                    );
                }
                Ok(reply)
            }
            Err(e) => {
                error!(session = %session.short(), "remote call failed: {e}");
                Err(e)
            }
        }
    }
}

/// Convert session messages into remote history.
pub fn to_turns(messages: &[Message]) -> Vec<Turn> {
    messages
        .iter()
        .map(|msg| match msg.role {
            Role::User => Turn::user(msg.content.as_str()),
            Role::Assistant => Turn::model(msg.content.as_str()),
        })
        .collect()
}
