//! Scripted `AiClient` for tests of code built on the gateway.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::{AiClient, AiError, AiResponse, ChunkCallback, TokenUsage, Turn};

/// Replies from a queue and records every request it receives.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, AiError>>>,
    requests: Mutex<Vec<Vec<Turn>>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: impl Into<String>) -> Self {
        self.push(Ok(text.into()));
        self
    }

    pub fn fail(self, err: AiError) -> Self {
        self.push(Err(err));
        self
    }

    /// Hold every call until the returned `Notify` is signalled once per call.
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(gate.clone());
        (self, gate)
    }

    pub fn push(&self, reply: Result<String, AiError>) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(reply);
    }

    pub fn requests(&self) -> Vec<Vec<Turn>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    async fn next(&self, turns: &[Turn]) -> Result<AiResponse, AiError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(turns.to_vec());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let reply = self
            .replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(AiError::ApiError("no scripted reply".into())));

        reply.map(|content| AiResponse {
            content,
            usage: TokenUsage::default(),
        })
    }
}

#[async_trait]
impl AiClient for ScriptedClient {
    async fn send_message(&self, turns: &[Turn]) -> Result<AiResponse, AiError> {
        self.next(turns).await
    }

    async fn send_message_streaming(
        &self,
        turns: &[Turn],
        on_chunk: ChunkCallback,
    ) -> Result<AiResponse, AiError> {
        let response = self.next(turns).await?;
        for chunk in response.content.split_inclusive(' ') {
            on_chunk(chunk.to_string());
        }
        Ok(response)
    }
}
