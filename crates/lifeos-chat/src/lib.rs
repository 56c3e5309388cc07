//! Conversation core for the Life OS Debugger.
//!
//! Owns the in-memory session collection and drives each user turn through
//! the remote gateway, one turn in flight per session.

pub mod flight;
pub mod orchestrator;
pub mod store;

pub use flight::{FlightGuard, InFlight};
pub use orchestrator::{
    Orchestrator, RejectReason, SubmitOutcome, TurnPhase, CONNECTION_FAILED_MESSAGE,
};
pub use store::{derive_title, DeleteOutcome, Session, SessionStore};
