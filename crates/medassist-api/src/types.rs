//! Wire types for the dialogue and image endpoints

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Disclaimer the backend attaches to every answer; used when an envelope omits it.
pub const STANDARD_DISCLAIMER: &str = "Disclaimer: I am an AI Chatbot. This information is not a substitute for professional medical advice. Always consult a doctor for diagnosis and treatment.";

/// Message sent with a null history to ask the backend for a fresh conversation.
pub const RESTART_MESSAGE: &str = "restart";

/// Who authored a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One transcript entry, sent back in full on every turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub message: String,
}

impl HistoryEntry {
    /// Create a user entry
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            message: message.into(),
        }
    }

    /// Create an assistant entry
    pub fn assistant(message: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            message: message.into(),
        }
    }
}

/// Body of `POST` to the dialogue endpoint.
///
/// `conversation_history: None` serializes as `null`, which the backend reads
/// as a restart request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialogueRequest {
    pub message: String,
    pub conversation_history: Option<Vec<HistoryEntry>>,
}

impl DialogueRequest {
    /// A regular turn carrying the transcript so far
    pub fn turn(message: impl Into<String>, history: Vec<HistoryEntry>) -> Self {
        Self {
            message: message.into(),
            conversation_history: Some(history),
        }
    }

    /// A restart request: null history
    pub fn restart() -> Self {
        Self {
            message: RESTART_MESSAGE.to_string(),
            conversation_history: None,
        }
    }

    pub fn is_restart(&self) -> bool {
        self.conversation_history.is_none()
    }
}

/// Interactive input kinds the backend may ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowUpKind {
    Text,
    Scale,
    Select,
    Multiselect,
    Checkbox,
}

impl FollowUpKind {
    /// Parse the backend's tag; unknown tags yield `None`
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "scale" => Some(Self::Scale),
            "select" => Some(Self::Select),
            "multiselect" => Some(Self::Multiselect),
            "checkbox" => Some(Self::Checkbox),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Scale => "scale",
            Self::Select => "select",
            Self::Multiselect => "multiselect",
            Self::Checkbox => "checkbox",
        }
    }

    /// Whether this kind is meaningless without an option list
    pub fn needs_options(&self) -> bool {
        matches!(self, Self::Select | Self::Multiselect | Self::Checkbox)
    }
}

impl fmt::Display for FollowUpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts `true`, `false`, `null` or a missing field; the latter two read as `false`.
fn lenient_bool<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// The backend's reply for one dialogue turn
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    /// Absent and `true` both mean "medical"
    #[serde(default)]
    pub is_medical_related: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub can_provide_structured_response: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub conversation_complete: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub needs_follow_up: bool,
    /// Raw tag; see [`ResponseEnvelope::follow_up_kind`]
    #[serde(default)]
    pub follow_up_type: Option<String>,
    #[serde(default)]
    pub follow_up_question: Option<String>,
    #[serde(default)]
    pub follow_up_options: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub rate_symptoms: bool,
    #[serde(default)]
    pub symptoms_to_rate: Option<Vec<String>>,
    #[serde(default)]
    pub image_search_term: Option<String>,
    #[serde(default)]
    pub current_step: Option<i32>,
    #[serde(default)]
    pub total_steps: Option<i32>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub conversation_restarted: bool,

    // Structured medical fields
    #[serde(rename = "Symptoms", default)]
    pub symptoms: Option<String>,
    #[serde(rename = "Remedies", default)]
    pub remedies: Option<String>,
    #[serde(rename = "Precautions", default)]
    pub precautions: Option<String>,
    #[serde(rename = "Guidelines", default)]
    pub guidelines: Option<String>,
    #[serde(default)]
    pub medication: Option<Vec<String>>,
    #[serde(rename = "Disclaimer", default)]
    pub disclaimer: Option<String>,
}

impl ResponseEnvelope {
    /// Envelope carrying only a reply text
    pub fn reply(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
            ..Default::default()
        }
    }

    /// Only an explicit `false` marks the turn as non-medical
    pub fn is_medical(&self) -> bool {
        self.is_medical_related != Some(false)
    }

    /// Whether the structured summary should be shown for this turn.
    /// A completed conversation forces it even when the backend did not offer it.
    pub fn wants_structured(&self) -> bool {
        self.is_medical() && (self.can_provide_structured_response || self.conversation_complete)
    }

    /// The reply text, unless the envelope is an error report without one
    pub fn usable_response(&self) -> Option<&str> {
        let response = self.response.as_deref()?;
        if self.error.is_some() && response.trim().is_empty() {
            return None;
        }
        Some(response)
    }

    /// Parsed follow-up kind, `None` when absent or unrecognised
    pub fn follow_up_kind(&self) -> Option<FollowUpKind> {
        self.follow_up_type.as_deref().and_then(FollowUpKind::from_tag)
    }

    pub fn follow_up_options(&self) -> &[String] {
        self.follow_up_options.as_deref().unwrap_or_default()
    }

    pub fn symptoms_to_rate(&self) -> &[String] {
        self.symptoms_to_rate.as_deref().unwrap_or_default()
    }

    pub fn medication(&self) -> &[String] {
        self.medication.as_deref().unwrap_or_default()
    }

    /// Trimmed image search term, if any
    pub fn image_term(&self) -> Option<&str> {
        self.image_search_term
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// `(current, total)` when the backend reported a meaningful step estimate
    pub fn progress(&self) -> Option<(u32, u32)> {
        match (self.current_step, self.total_steps) {
            (Some(current), Some(total)) if current > 0 && total > 0 => {
                Some((current as u32, total as u32))
            }
            _ => None,
        }
    }
}

/// Outer body of a dialogue response: `{ "data": ... }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DialogueResponse {
    #[serde(default)]
    pub data: Option<ResponseEnvelope>,
    /// Request-validation failures are reported at the top level
    #[serde(default)]
    pub error: Option<String>,
}

impl DialogueResponse {
    /// Extract the envelope, rejecting bodies without a usable reply
    pub fn into_envelope(self) -> Result<ResponseEnvelope> {
        let Some(envelope) = self.data else {
            let reason = self.error.unwrap_or_else(|| "missing data".to_string());
            return Err(Error::protocol(reason));
        };
        if envelope.usable_response().is_none() {
            let reason = envelope
                .error
                .clone()
                .unwrap_or_else(|| "missing response".to_string());
            return Err(Error::protocol(reason));
        }
        Ok(envelope)
    }
}
