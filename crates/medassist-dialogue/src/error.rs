//! Error types for medassist-dialogue

use medassist_ui::InputError;
use thiserror::Error;

/// Result type alias using medassist-dialogue Error
pub type Result<T> = std::result::Result<T, Error>;

/// Rejected orchestrator calls.
///
/// None of these change the session. Network failures are not here: they
/// end the turn through the failure transition instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The active follow-up component rejected the interaction
    #[error(transparent)]
    Input(#[from] InputError),

    /// Submitted message was empty after trimming
    #[error("Please enter a message.")]
    EmptyMessage,

    /// Input is disabled: a turn is in flight or a follow-up is awaiting its answer
    #[error("Please wait for the current question to be answered.")]
    Busy,

    /// An interaction arrived with no follow-up component on screen
    #[error("There is no question to answer right now.")]
    NoActiveComponent,
}

/// Why a turn ended on the failure path
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TurnFailure {
    /// No response before the deadline
    #[error("no response before the deadline")]
    Timeout,

    /// The request could not be completed
    #[error("transport failure: {0}")]
    Transport(String),

    /// The response arrived but carried no usable reply
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl From<medassist_api::Error> for TurnFailure {
    fn from(error: medassist_api::Error) -> Self {
        if error.is_timeout() {
            TurnFailure::Timeout
        } else if error.is_protocol() {
            TurnFailure::Protocol(error.to_string())
        } else {
            TurnFailure::Transport(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_errors_classified() {
        let failure = TurnFailure::from(medassist_api::Error::protocol("missing response"));
        assert!(matches!(failure, TurnFailure::Protocol(_)));

        let failure = TurnFailure::from(medassist_api::Error::Status {
            status: 502,
            body: "bad gateway".into(),
        });
        assert!(matches!(failure, TurnFailure::Transport(_)));
    }

    #[test]
    fn test_input_error_message_passes_through() {
        let error = Error::from(InputError::NoSelection);
        assert_eq!(error.to_string(), "Please select at least one option.");
    }
}
