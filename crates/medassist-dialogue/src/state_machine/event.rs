//! Events fed into the state machine

use medassist_api::ResponseEnvelope;
use medassist_ui::Interaction;

use crate::error::TurnFailure;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The user typed a message into the input box
    Submit { message: String },

    /// The user acted on the active follow-up component
    Interact(Interaction),

    /// The user asked to start over
    Restart,

    /// A request finished, successfully or not
    Response {
        generation: u64,
        outcome: Result<ResponseEnvelope, TurnFailure>,
    },

    /// The response deadline for a request passed
    DeadlineElapsed { generation: u64 },
}
