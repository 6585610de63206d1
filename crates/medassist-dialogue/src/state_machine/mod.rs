//! Conversation state machine
//!
//! Pure transitions in the Elm style: `(session, event) -> (session, effects)`.
//! The [`crate::Orchestrator`] owns the session, feeds events in and executes
//! the effects that come out.

mod effect;
mod event;
mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{Affordance, Phase, Session};
pub use transition::{
    DEFAULT_FOLLOW_UP_QUESTION, FAILURE_MESSAGE, TransitionResult, structured_sections, transition,
};
