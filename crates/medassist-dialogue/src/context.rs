//! Per-session conversation state

use std::collections::{HashMap, HashSet};

use medassist_api::HistoryEntry;

/// Transcript and UI-mode flags for one conversation.
///
/// Only the state machine mutates this. A restart replaces the whole value
/// rather than resetting fields one by one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationContext {
    history: Vec<HistoryEntry>,
    /// A follow-up component is waiting for its answer
    pub active_follow_up: bool,
    /// The symptom-rating panel is waiting for its answer
    pub active_rating: bool,
    /// Symptoms on the current (or last) rating panel
    pub symptoms_to_rate: HashSet<String>,
    /// Latest slider value per symptom
    pub current_ratings: HashMap<String, u8>,
}

impl ConversationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full transcript, oldest first
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn push_user(&mut self, message: impl Into<String>) {
        self.history.push(HistoryEntry::user(message));
    }

    pub fn push_assistant(&mut self, message: impl Into<String>) {
        self.history.push(HistoryEntry::assistant(message));
    }

    /// Record the symptoms of a freshly shown rating panel, each at `initial`
    pub fn begin_rating(&mut self, symptoms: &[String], initial: u8) {
        self.active_rating = true;
        self.symptoms_to_rate = symptoms.iter().cloned().collect();
        self.current_ratings = symptoms.iter().map(|s| (s.clone(), initial)).collect();
    }
}
