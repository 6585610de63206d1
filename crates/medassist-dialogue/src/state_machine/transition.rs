//! Pure transition function
//!
//! Given the same session and event this always produces the same result and
//! performs no I/O. Every change to conversation state happens here.

use medassist_api::{DialogueRequest, ResponseEnvelope, STANDARD_DISCLAIMER};
use medassist_ui::widgets::SCALE_DEFAULT;
use medassist_ui::{
    FollowUpComponent, FollowUpSpec, StructuredSections, render_markdown_lite,
    render_structured_response,
};

use super::{Effect, Event, Phase, Session};
use crate::context::ConversationContext;
use crate::error::{Error, Result};

/// Shown when a turn times out or the backend cannot be reached
pub const FAILURE_MESSAGE: &str =
    "Sorry, I'm having trouble connecting right now. Please try again, or start a new conversation.";

/// Used when the backend asks a follow-up without saying what
pub const DEFAULT_FOLLOW_UP_QUESTION: &str = "Could you tell me a bit more?";

const DEFAULT_SYMPTOMS: &str = "No specific symptoms were identified.";
const DEFAULT_REMEDIES: &str = "No specific remedies were suggested.";
const DEFAULT_PRECAUTIONS: &str = "No specific precautions were provided.";
const DEFAULT_GUIDELINES: &str =
    "Please consult a healthcare professional for guidance specific to your situation.";

/// Result of a state transition
#[derive(Debug, Clone)]
pub struct TransitionResult {
    pub new_session: Session,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(session: Session) -> Self {
        Self {
            new_session: session,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }

    /// Nothing changes; used for stale responses and deadlines
    fn unchanged(session: &Session) -> Self {
        Self::new(session.clone())
    }
}

/// Apply one event to the session
pub fn transition(session: &Session, event: Event) -> Result<TransitionResult> {
    match event {
        Event::Submit { message } => {
            if !session.accepts_input() {
                return Err(Error::Busy);
            }
            let message = message.trim();
            if message.is_empty() {
                return Err(Error::EmptyMessage);
            }
            let mut next = session.clone();
            let mut effects = Vec::new();
            begin_turn(&mut next, &mut effects, message.to_string());
            Ok(TransitionResult::new(next).with_effects(effects))
        }

        Event::Interact(interaction) => {
            let Some(component) = &session.component else {
                return Err(Error::NoActiveComponent);
            };
            let mut component = component.clone();
            let answer = component.apply(interaction)?;

            let mut next = session.clone();
            match answer {
                None => {
                    if component.is_rating() {
                        for slider in component.sliders() {
                            next.context
                                .current_ratings
                                .insert(slider.label.clone(), slider.value());
                        }
                    }
                    next.component = Some(component.clone());
                    Ok(TransitionResult::new(next).with_effect(Effect::RefreshFollowUp(component)))
                }
                Some(answer) => {
                    let mut effects = vec![Effect::ClearFollowUp];
                    next.component = None;
                    next.context.active_follow_up = false;
                    next.context.active_rating = false;
                    begin_turn(&mut next, &mut effects, answer);
                    Ok(TransitionResult::new(next).with_effects(effects))
                }
            }
        }

        Event::Restart => {
            let mut effects = Vec::new();
            if session.is_awaiting_response() {
                effects.push(Effect::HideThinking);
            }
            if session.component.is_some() {
                effects.push(Effect::ClearFollowUp);
            }
            if session.restart_offered {
                effects.push(Effect::WithdrawRestart);
            }
            effects.extend([Effect::ClearConversation, Effect::ClearGallery]);

            let mut next = Session {
                generation: session.generation,
                ..Session::new()
            };
            send(&mut next, &mut effects, DialogueRequest::restart());
            Ok(TransitionResult::new(next).with_effects(effects))
        }

        Event::Response {
            generation,
            outcome,
        } => {
            if session.phase != (Phase::AwaitingResponse { generation }) {
                return Ok(TransitionResult::unchanged(session));
            }
            Ok(match outcome {
                Ok(envelope) => accept_response(session, &envelope),
                Err(_) => fail_turn(session),
            })
        }

        Event::DeadlineElapsed { generation } => {
            if session.phase != (Phase::AwaitingResponse { generation }) {
                return Ok(TransitionResult::unchanged(session));
            }
            Ok(fail_turn(session))
        }
    }
}

/// Record the user's message and send it with the history that preceded it
fn begin_turn(next: &mut Session, effects: &mut Vec<Effect>, message: String) {
    let request = DialogueRequest::turn(message.clone(), next.context.history().to_vec());
    next.context.push_user(message.clone());
    effects.push(Effect::ShowUserMessage(message));
    send(next, effects, request);
}

fn send(next: &mut Session, effects: &mut Vec<Effect>, request: DialogueRequest) {
    next.generation += 1;
    next.phase = Phase::AwaitingResponse {
        generation: next.generation,
    };
    effects.extend([
        Effect::SetInputEnabled(false),
        Effect::ShowThinking,
        Effect::SendRequest {
            generation: next.generation,
            request,
        },
    ]);
}

fn accept_response(session: &Session, envelope: &ResponseEnvelope) -> TransitionResult {
    let Some(reply) = envelope.usable_response() else {
        return fail_turn(session);
    };

    let mut next = session.clone();
    let mut effects = vec![Effect::HideThinking];

    if envelope.conversation_restarted {
        if !next.context.is_empty() {
            effects.push(Effect::ClearConversation);
        }
        if next.restart_offered {
            effects.push(Effect::WithdrawRestart);
        }
        next.context = ConversationContext::new();
        next.component = None;
        next.restart_offered = false;
        next.phase = Phase::Idle;
        effects.extend([
            Effect::ClearGallery,
            Effect::ShowAssistantMessage(render_markdown_lite(reply)),
            Effect::SetInputEnabled(true),
        ]);
        return TransitionResult::new(next).with_effects(effects);
    }

    next.context.push_assistant(reply);
    effects.push(Effect::ShowAssistantMessage(render_markdown_lite(reply)));

    effects.push(match envelope.image_term() {
        Some(term) => Effect::FetchImages(term.to_string()),
        None => Effect::ClearGallery,
    });

    if envelope.wants_structured() {
        let sections = structured_sections(envelope);
        effects.push(Effect::ShowStructured(render_structured_response(&sections)));
    }

    let symptoms: Vec<String> = envelope
        .symptoms_to_rate()
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if envelope.conversation_complete {
        next.phase = Phase::Complete;
        if !next.restart_offered {
            next.restart_offered = true;
            effects.push(Effect::OfferRestart);
        }
        effects.push(Effect::SetInputEnabled(true));
    } else if envelope.needs_follow_up {
        let question = envelope
            .follow_up_question
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .unwrap_or(DEFAULT_FOLLOW_UP_QUESTION);
        let spec = FollowUpSpec::new(envelope.follow_up_kind(), question, envelope.follow_up_options());
        next.context.active_follow_up = true;
        next.phase = Phase::AwaitingFollowUp;
        show_component(&mut next, &mut effects, FollowUpComponent::build(spec), envelope.progress());
    } else if envelope.rate_symptoms && !symptoms.is_empty() {
        next.context.begin_rating(&symptoms, SCALE_DEFAULT);
        next.phase = Phase::AwaitingRating;
        show_component(&mut next, &mut effects, FollowUpComponent::rating(&symptoms), envelope.progress());
    } else {
        next.phase = Phase::Idle;
        effects.push(Effect::SetInputEnabled(true));
    }

    TransitionResult::new(next).with_effects(effects)
}

fn show_component(
    next: &mut Session,
    effects: &mut Vec<Effect>,
    component: FollowUpComponent,
    progress: Option<(u32, u32)>,
) {
    if next.restart_offered {
        next.restart_offered = false;
        effects.push(Effect::WithdrawRestart);
    }
    effects.push(Effect::ShowFollowUp {
        component: component.clone(),
        progress,
    });
    next.component = Some(component);
}

/// End the turn on the failure path; the session is always left able to take input
fn fail_turn(session: &Session) -> TransitionResult {
    let mut next = session.clone();
    next.phase = Phase::Idle;
    let mut effects = vec![
        Effect::HideThinking,
        Effect::ShowAssistantMessage(render_markdown_lite(FAILURE_MESSAGE)),
        Effect::SetInputEnabled(true),
    ];
    if !next.restart_offered {
        next.restart_offered = true;
        effects.push(Effect::OfferRestart);
    }
    TransitionResult::new(next).with_effects(effects)
}

/// Field text, or `default` when absent, blank or the `.` placeholder
fn field_or(value: Option<&str>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() && v.trim() != "." => v.to_string(),
        _ => default.to_string(),
    }
}

/// Structured fields with defaults substituted, ready to render
pub fn structured_sections(envelope: &ResponseEnvelope) -> StructuredSections {
    StructuredSections {
        symptoms: field_or(envelope.symptoms.as_deref(), DEFAULT_SYMPTOMS),
        remedies: field_or(envelope.remedies.as_deref(), DEFAULT_REMEDIES),
        precautions: field_or(envelope.precautions.as_deref(), DEFAULT_PRECAUTIONS),
        guidelines: field_or(envelope.guidelines.as_deref(), DEFAULT_GUIDELINES),
        medication: envelope.medication().to_vec(),
        disclaimer: field_or(envelope.disclaimer.as_deref(), STANDARD_DISCLAIMER),
    }
}
