//! Error types for medassist-ui

use thiserror::Error;

/// Rejected interactions with a follow-up component.
///
/// These never reach the network; the component stays as it was and the
/// message is shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Free-text answer was empty after trimming
    #[error("Please enter a response.")]
    EmptyText,

    /// Multi-selection submitted with nothing checked
    #[error("Please select at least one option.")]
    NoSelection,

    /// Option index does not exist
    #[error("Option {index} is out of range (there are {len} options).")]
    OptionOutOfRange { index: usize, len: usize },

    /// The component has no control for this interaction
    #[error("A {kind} prompt does not support {interaction}.")]
    Unsupported {
        kind: &'static str,
        interaction: &'static str,
    },
}
