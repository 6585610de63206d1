//! medassist-dialogue: Conversation orchestration
//!
//! This crate provides the state machine that drives a multi-turn medical
//! dialogue: it decides what to show after every backend reply (structured
//! summary, follow-up prompt, symptom rating, restart offer) and keeps the
//! transcript sent back on each turn.

pub mod context;
pub mod error;
pub mod orchestrator;
pub mod presenter;
pub mod state_machine;
pub mod transport;

pub use context::ConversationContext;
pub use error::{Error, Result, TurnFailure};
pub use orchestrator::{DEFAULT_RESPONSE_TIMEOUT, Orchestrator, OrchestratorConfig};
pub use presenter::{Gallery, Presenter};
pub use state_machine::{Affordance, Effect, Event, Phase, Session, transition};
pub use transport::{HttpTransport, Transport};
