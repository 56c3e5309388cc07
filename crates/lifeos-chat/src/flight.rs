//! Per-session single-flight gate.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use lifeos_common::SessionId;

/// Sessions that currently have a turn awaiting the remote reply.
#[derive(Debug, Default)]
pub struct InFlight {
    sessions: Mutex<HashSet<SessionId>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `session` as sending. Returns `None` if it already is.
    pub fn try_acquire(&self, session: &SessionId) -> Option<FlightGuard<'_>> {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        if !sessions.insert(session.clone()) {
            return None;
        }
        Some(FlightGuard {
            owner: self,
            session: session.clone(),
        })
    }

    pub fn contains(&self, session: &SessionId) -> bool {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(session)
    }

    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Clears the session's in-flight mark on drop, so every exit path of a
/// turn (including a cancelled future) releases it.
#[derive(Debug)]
pub struct FlightGuard<'a> {
    owner: &'a InFlight,
    session: SessionId,
}

impl FlightGuard<'_> {
    pub fn session(&self) -> &SessionId {
        &self.session
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.owner
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_is_refused() {
        let flight = InFlight::new();
        let id = SessionId::from("s");

        let guard = flight.try_acquire(&id);
        assert!(guard.is_some());
        assert!(flight.try_acquire(&id).is_none());
        assert!(flight.contains(&id));
    }

    #[test]
    fn drop_releases() {
        let flight = InFlight::new();
        let id = SessionId::from("s");

        {
            let _guard = flight.try_acquire(&id).unwrap();
            assert_eq!(flight.len(), 1);
        }
        assert!(flight.is_empty());
        assert!(flight.try_acquire(&id).is_some());
    }

    #[test]
    fn sessions_are_independent() {
        let flight = InFlight::new();
        let a = SessionId::from("a");
        let b = SessionId::from("b");

        let ga = flight.try_acquire(&a).unwrap();
        let gb = flight.try_acquire(&b).unwrap();
        assert_eq!(ga.session(), &a);
        assert_eq!(gb.session(), &b);
        assert_eq!(flight.len(), 2);

        drop(ga);
        assert!(!flight.contains(&a));
        assert!(flight.contains(&b));
    }
}
