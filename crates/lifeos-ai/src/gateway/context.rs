//! Keyed store of remote conversation contexts.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lifeos_common::SessionId;

use crate::Turn;

/// Remote conversation handle for one session: the history replayed on every
/// request, tagged with the generation that created it.
#[derive(Debug, Clone, Default)]
pub struct ChatContext {
    pub generation: u64,
    pub history: Vec<Turn>,
}

#[derive(Default)]
struct ContextMap {
    next_generation: u64,
    contexts: HashMap<SessionId, ChatContext>,
}

impl ContextMap {
    fn insert(&mut self, id: SessionId, history: Vec<Turn>) -> u64 {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.contexts.insert(
            id,
            ChatContext {
                generation,
                history,
            },
        );
        generation
    }
}

/// Session id → remote context. Entries live until removed or the process ends.
#[derive(Default)]
pub struct ContextStore {
    inner: Mutex<ContextMap>,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ContextMap> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Install a fresh context for `id`, replacing any previous one.
    /// Returns the new generation.
    pub fn replace(&self, id: SessionId, history: Vec<Turn>) -> u64 {
        self.lock().insert(id, history)
    }

    /// Snapshot the context for `id`, creating an empty one if none exists.
    /// The flag is true when the context was created by this call.
    pub fn snapshot_or_create(&self, id: &SessionId) -> (ChatContext, bool) {
        let mut map = self.lock();
        if let Some(ctx) = map.contexts.get(id) {
            return (ctx.clone(), false);
        }
        let generation = map.insert(id.clone(), Vec::new());
        (
            ChatContext {
                generation,
                history: Vec::new(),
            },
            true,
        )
    }

    /// Append a completed exchange to the context of `id`.
    ///
    /// If the context was replaced since the request was built and the new
    /// history already ends with `user` (rebuilt from the committed session),
    /// only `reply` is appended. Returns false when nothing was recorded.
    pub fn record_exchange(&self, id: &SessionId, generation: u64, user: Turn, reply: Turn) -> bool {
        let mut map = self.lock();
        match map.contexts.get_mut(id) {
            Some(ctx) if ctx.generation == generation => {
                ctx.history.push(user);
                ctx.history.push(reply);
                true
            }
            Some(ctx) if ctx.history.last() == Some(&user) => {
                ctx.history.push(reply);
                true
            }
            _ => false,
        }
    }

    pub fn history(&self, id: &SessionId) -> Option<Vec<Turn>> {
        self.lock().contexts.get(id).map(|ctx| ctx.history.clone())
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.lock().contexts.contains_key(id)
    }

    pub fn remove(&self, id: &SessionId) -> bool {
        self.lock().contexts.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
