//! Session state

use medassist_ui::FollowUpComponent;

use crate::context::ConversationContext;

/// Where the conversation is between events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the user to type
    #[default]
    Idle,
    /// A request is in flight; only a response or deadline for `generation` is accepted
    AwaitingResponse { generation: u64 },
    /// A follow-up component is waiting for its answer
    AwaitingFollowUp,
    /// The symptom-rating panel is waiting for its answer
    AwaitingRating,
    /// The backend finished the conversation; a restart is offered
    Complete,
}

/// The single interactive affordance currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    None,
    FollowUp,
    Rating,
    RestartOffer,
}

/// Everything the state machine owns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub phase: Phase,
    pub context: ConversationContext,
    /// Component on screen while awaiting a follow-up or rating answer
    pub component: Option<FollowUpComponent>,
    /// Bumped for every request; stale responses carry an older value
    pub generation: u64,
    pub restart_offered: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether free-text input is enabled
    pub fn accepts_input(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Complete)
    }

    pub fn is_awaiting_response(&self) -> bool {
        matches!(self.phase, Phase::AwaitingResponse { .. })
    }

    pub fn affordance(&self) -> Affordance {
        match &self.component {
            Some(c) if c.is_rating() => Affordance::Rating,
            Some(_) => Affordance::FollowUp,
            None if self.restart_offered => Affordance::RestartOffer,
            None => Affordance::None,
        }
    }
}
