//! Property-based tests for the state machine
//!
//! These check the conversation invariants across arbitrary envelopes and
//! event sequences.

use super::*;
use crate::error::TurnFailure;
use medassist_api::ResponseEnvelope;
use medassist_ui::{FollowUpComponent, Interaction};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_medical() -> impl Strategy<Value = Option<bool>> {
    prop_oneof![Just(None), Just(Some(true)), Just(Some(false))]
}

fn arb_kind_tag() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("text".to_string())),
        Just(Some("scale".to_string())),
        Just(Some("select".to_string())),
        Just(Some("multiselect".to_string())),
        Just(Some("checkbox".to_string())),
        Just(Some("bogus".to_string())),
    ]
}

fn arb_labels() -> impl Strategy<Value = Option<Vec<String>>> {
    proptest::option::of(proptest::collection::vec("[A-Za-z ]{0,12}", 0..4))
}

fn arb_envelope() -> impl Strategy<Value = ResponseEnvelope> {
    (
        "[a-zA-Z .]{1,30}",
        arb_medical(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        arb_kind_tag(),
        arb_labels(),
        any::<bool>(),
        arb_labels(),
        proptest::bool::weighted(0.1),
    )
        .prop_map(
            |(
                response,
                medical,
                structured,
                complete,
                needs_follow_up,
                kind,
                options,
                rate,
                symptoms,
                restarted,
            )| ResponseEnvelope {
                is_medical_related: medical,
                can_provide_structured_response: structured,
                conversation_complete: complete,
                needs_follow_up,
                follow_up_type: kind,
                follow_up_question: Some("Question?".to_string()),
                follow_up_options: options,
                rate_symptoms: rate,
                symptoms_to_rate: symptoms,
                conversation_restarted: restarted,
                ..ResponseEnvelope::reply(response)
            },
        )
}

fn arb_failure() -> impl Strategy<Value = TurnFailure> {
    prop_oneof![
        Just(TurnFailure::Timeout),
        "[a-z ]{1,10}".prop_map(TurnFailure::Transport),
        "[a-z ]{1,10}".prop_map(TurnFailure::Protocol),
    ]
}

/// Steps a user or the network can take; generations are filled in against
/// the live session so most responses are current.
#[derive(Debug, Clone)]
enum Step {
    Submit(String),
    Respond(ResponseEnvelope),
    Fail(TurnFailure),
    Deadline,
    StaleRespond(ResponseEnvelope),
    Interact(Interaction),
    Restart,
}

fn arb_interaction() -> impl Strategy<Value = Interaction> {
    prop_oneof![
        "[a-z ]{0,8}".prop_map(Interaction::Type),
        (0usize..4, 0u8..12).prop_map(|(index, value)| Interaction::Slide { index, value }),
        (0usize..4).prop_map(Interaction::Toggle),
        (0usize..4).prop_map(Interaction::Choose),
        Just(Interaction::Submit),
    ]
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => "[a-z ]{0,10}".prop_map(Step::Submit),
        4 => arb_envelope().prop_map(Step::Respond),
        1 => arb_failure().prop_map(Step::Fail),
        1 => Just(Step::Deadline),
        1 => arb_envelope().prop_map(Step::StaleRespond),
        3 => arb_interaction().prop_map(Step::Interact),
        1 => Just(Step::Restart),
    ]
}

fn to_event(session: &Session, step: Step) -> Event {
    match step {
        Step::Submit(message) => Event::Submit { message },
        Step::Respond(envelope) => Event::Response {
            generation: session.generation,
            outcome: Ok(envelope),
        },
        Step::Fail(failure) => Event::Response {
            generation: session.generation,
            outcome: Err(failure),
        },
        Step::Deadline => Event::DeadlineElapsed {
            generation: session.generation,
        },
        Step::StaleRespond(envelope) => Event::Response {
            generation: session.generation.wrapping_sub(1),
            outcome: Ok(envelope),
        },
        Step::Interact(interaction) => Event::Interact(interaction),
        Step::Restart => Event::Restart,
    }
}

// ============================================================================
// Invariant Checkers
// ============================================================================

fn affordance_is_consistent(session: &Session) -> bool {
    let rating = matches!(&session.component, Some(c) if c.is_rating());
    let follow_up = matches!(&session.component, Some(c) if !c.is_rating());

    let single = !(session.component.is_some() && session.restart_offered);
    let flags = session.context.active_rating == rating && session.context.active_follow_up == follow_up;
    let phase = match session.phase {
        Phase::AwaitingFollowUp => follow_up,
        Phase::AwaitingRating => rating,
        _ => session.component.is_none(),
    };
    single && flags && phase
}

fn awaiting(message: &str) -> Session {
    transition(&Session::new(), Event::Submit { message: message.into() })
        .unwrap()
        .new_session
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // At most one interactive affordance is active after any transition
    #[test]
    fn prop_single_affordance(steps in proptest::collection::vec(arb_step(), 0..30)) {
        let mut session = Session::new();
        for step in steps {
            let event = to_event(&session, step);
            if let Ok(result) = transition(&session, event) {
                session = result.new_session;
                prop_assert!(affordance_is_consistent(&session), "inconsistent: {:?}", session);
            }
        }
    }

    // Submit appends exactly one user entry; a good reply exactly one assistant entry
    #[test]
    fn prop_history_growth(steps in proptest::collection::vec(arb_step(), 0..30)) {
        let mut session = Session::new();
        for step in steps {
            let before = session.context.len();
            let awaiting_generation = match session.phase {
                Phase::AwaitingResponse { generation } => Some(generation),
                _ => None,
            };
            let event = to_event(&session, step);
            let Ok(result) = transition(&session, event.clone()) else {
                prop_assert_eq!(before, session.context.len());
                continue;
            };
            let after = result.new_session.context.len();

            match event {
                Event::Submit { .. } => prop_assert_eq!(after, before + 1),
                Event::Interact(_) if result.new_session.is_awaiting_response() => {
                    prop_assert_eq!(after, before + 1)
                }
                Event::Response { generation, outcome: Ok(envelope) }
                    if awaiting_generation == Some(generation) =>
                {
                    if envelope.conversation_restarted {
                        prop_assert_eq!(after, 0);
                    } else {
                        prop_assert_eq!(after, before + 1);
                    }
                }
                Event::Restart => prop_assert_eq!(after, 0),
                _ => prop_assert_eq!(after, before),
            }
            session = result.new_session;
        }
    }

    // Restart, from either side, always yields an empty context
    #[test]
    fn prop_restart_clears(steps in proptest::collection::vec(arb_step(), 0..20), envelope in arb_envelope()) {
        let mut session = Session::new();
        for step in steps {
            let event = to_event(&session, step);
            if let Ok(result) = transition(&session, event) {
                session = result.new_session;
            }
        }

        let restarted = transition(&session, Event::Restart).unwrap().new_session;
        prop_assert_eq!(restarted.context.len(), 0);
        prop_assert!(!restarted.context.active_follow_up);
        prop_assert!(!restarted.context.active_rating);
        prop_assert!(restarted.component.is_none());

        let envelope = ResponseEnvelope { conversation_restarted: true, ..envelope };
        let done = transition(&restarted, Event::Response {
            generation: restarted.generation,
            outcome: Ok(envelope),
        }).unwrap().new_session;
        prop_assert_eq!(done.context.len(), 0);
        prop_assert!(!done.context.active_follow_up);
        prop_assert!(!done.context.active_rating);
    }

    // Structured rendering is shown exactly when medical and (structured or complete)
    #[test]
    fn prop_structured_visibility(
        medical in arb_medical(),
        structured in any::<bool>(),
        complete in any::<bool>(),
    ) {
        let session = awaiting("I feel unwell");
        let envelope = ResponseEnvelope {
            is_medical_related: medical,
            can_provide_structured_response: structured,
            conversation_complete: complete,
            ..ResponseEnvelope::reply("ok")
        };
        let result = transition(&session, Event::Response {
            generation: session.generation,
            outcome: Ok(envelope),
        }).unwrap();

        let shown = result.effects.iter().any(|e| matches!(e, Effect::ShowStructured(_)));
        let expected = medical != Some(false) && (structured || complete);
        prop_assert_eq!(shown, expected);
    }

    // Every failure leaves the session able to take input again
    #[test]
    fn prop_failure_never_locks(failure in arb_failure(), deadline in any::<bool>()) {
        let session = awaiting("hello");
        let event = if deadline {
            Event::DeadlineElapsed { generation: session.generation }
        } else {
            Event::Response { generation: session.generation, outcome: Err(failure) }
        };
        let next = transition(&session, event).unwrap().new_session;
        prop_assert!(next.accepts_input());
        prop_assert!(next.restart_offered);
        prop_assert_eq!(next.context.len(), 1);
    }

    // Follow-ups never carry an option-based component without options
    #[test]
    fn prop_follow_up_options_present(envelope in arb_envelope()) {
        let session = awaiting("cough");
        let envelope = ResponseEnvelope {
            conversation_complete: false,
            conversation_restarted: false,
            needs_follow_up: true,
            ..envelope
        };
        let next = transition(&session, Event::Response {
            generation: session.generation,
            outcome: Ok(envelope),
        }).unwrap().new_session;

        match next.component {
            Some(FollowUpComponent::Select(_))
            | Some(FollowUpComponent::Multiselect(_))
            | Some(FollowUpComponent::Checkbox(_)) => {
                let component = next.component.as_ref().unwrap();
                prop_assert!(!component.options().is_empty());
                prop_assert!(component.options().iter().all(|o| !o.trim().is_empty()));
            }
            Some(_) => {}
            None => prop_assert!(false, "follow-up component missing"),
        }
    }
}
