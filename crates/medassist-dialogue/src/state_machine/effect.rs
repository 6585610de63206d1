//! Effects produced by state transitions

use medassist_api::DialogueRequest;
use medassist_ui::FollowUpComponent;

/// Work for the driver to carry out after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append the user's message (plain text) to the conversation
    ShowUserMessage(String),
    /// Append an assistant message (markup)
    ShowAssistantMessage(String),
    ShowThinking,
    HideThinking,
    SetInputEnabled(bool),
    /// Show the structured response block (markup)
    ShowStructured(String),
    /// Put a new follow-up or rating component on screen
    ShowFollowUp {
        component: FollowUpComponent,
        progress: Option<(u32, u32)>,
    },
    /// The on-screen component changed state
    RefreshFollowUp(FollowUpComponent),
    ClearFollowUp,
    /// Search gallery images in the background
    FetchImages(String),
    ClearGallery,
    OfferRestart,
    WithdrawRestart,
    /// Wipe the displayed conversation and start a new session
    ClearConversation,
    /// Send a request and start its response deadline
    SendRequest {
        generation: u64,
        request: DialogueRequest,
    },
}
