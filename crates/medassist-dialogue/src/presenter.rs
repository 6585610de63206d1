//! Presentation seams
//!
//! The orchestrator never draws anything itself. It calls a [`Presenter`]
//! from its own task, and a [`Gallery`] from detached image-search tasks.

use medassist_ui::FollowUpComponent;

/// What the conversation needs from a presentation layer
pub trait Presenter {
    /// Append the user's message (plain text)
    fn append_user_message(&mut self, text: &str);

    /// Append an assistant message (markup)
    fn append_assistant_message(&mut self, markup: &str);

    fn set_thinking(&mut self, visible: bool);

    fn set_input_enabled(&mut self, enabled: bool);

    /// Show the structured response block (markup)
    fn show_structured(&mut self, markup: &str);

    /// Put a follow-up or rating component on screen, with an optional
    /// `(current, total)` step estimate
    fn show_follow_up(&mut self, component: &FollowUpComponent, progress: Option<(u32, u32)>);

    /// The on-screen component changed state after an interaction
    fn update_follow_up(&mut self, _component: &FollowUpComponent) {}

    fn clear_follow_up(&mut self);

    /// Show or withdraw the "start a new conversation" affordance
    fn set_restart_offered(&mut self, offered: bool);

    /// Feedback for a rejected input; nothing was sent
    fn notice(&mut self, message: &str);

    /// Remove every displayed message
    fn clear_conversation(&mut self);

    fn clear_gallery(&mut self);
}

/// Receives image search results from background tasks
pub trait Gallery: Send + Sync {
    fn show_images(&self, term: &str, urls: &[String]);
}
