//! Interactive follow-up prompts
//!
//! A [`FollowUpSpec`] names what the backend asked for; [`FollowUpComponent::build`]
//! turns it into a component that collects the user's answer through
//! [`Interaction`]s and yields it as a plain message string exactly once.

use medassist_api::FollowUpKind;

use crate::error::InputError;
use crate::markup::escape_html;
use crate::widgets::selection::{
    CheckSet, ExclusionRule, SCALE_MAX, SCALE_MIN, Slider, join_selection,
};

/// Question shown above the symptom-rating sliders
pub const RATING_QUESTION: &str = "Please rate the severity of each symptom (1 = mild, 10 = severe).";

/// What the backend asked for, consumed once by the factory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUpSpec {
    Text { question: String },
    Scale { question: String },
    Select { question: String, options: Vec<String> },
    Multiselect { question: String, options: Vec<String> },
    Checkbox { question: String, options: Vec<String> },
}

impl FollowUpSpec {
    /// Build a spec, falling back to free text when the kind is unknown or an
    /// option-based kind arrives without options.
    pub fn new(kind: Option<FollowUpKind>, question: impl Into<String>, options: &[String]) -> Self {
        let question = question.into();
        let options: Vec<String> = options
            .iter()
            .filter(|o| !o.trim().is_empty())
            .cloned()
            .collect();

        match kind {
            Some(FollowUpKind::Scale) => Self::Scale { question },
            Some(k) if k.needs_options() && options.is_empty() => Self::Text { question },
            Some(FollowUpKind::Select) => Self::Select { question, options },
            Some(FollowUpKind::Multiselect) => Self::Multiselect { question, options },
            Some(FollowUpKind::Checkbox) => Self::Checkbox { question, options },
            Some(FollowUpKind::Text) | None => Self::Text { question },
        }
    }

    pub fn kind(&self) -> FollowUpKind {
        match self {
            Self::Text { .. } => FollowUpKind::Text,
            Self::Scale { .. } => FollowUpKind::Scale,
            Self::Select { .. } => FollowUpKind::Select,
            Self::Multiselect { .. } => FollowUpKind::Multiselect,
            Self::Checkbox { .. } => FollowUpKind::Checkbox,
        }
    }

    pub fn question(&self) -> &str {
        match self {
            Self::Text { question }
            | Self::Scale { question }
            | Self::Select { question, .. }
            | Self::Multiselect { question, .. }
            | Self::Checkbox { question, .. } => question,
        }
    }
}

/// A user action on a rendered component
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// Replace the free-text content
    Type(String),
    /// Move slider `index` (always 0 for a scale) to `value`
    Slide { index: usize, value: u8 },
    /// Flip a checkbox
    Toggle(usize),
    /// Press an option button
    Choose(usize),
    /// Press the submit button
    Submit,
}

impl Interaction {
    fn name(&self) -> &'static str {
        match self {
            Interaction::Type(_) => "typing",
            Interaction::Slide { .. } => "sliders",
            Interaction::Toggle(_) => "checkboxes",
            Interaction::Choose(_) => "option buttons",
            Interaction::Submit => "a submit button",
        }
    }
}

/// Free-text prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPrompt {
    pub question: String,
    pub text: String,
}

/// One or more sliders under a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderPanel {
    pub question: String,
    pub sliders: Vec<Slider>,
}

/// Buttons of which exactly one answers the question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoicePanel {
    pub question: String,
    pub options: Vec<String>,
    pub chosen: Option<usize>,
}

/// Checkbox group under a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckPanel {
    pub question: String,
    pub set: CheckSet,
}

/// A live follow-up prompt.
///
/// Multiselect and checkbox share [`CheckPanel`] and differ only in the
/// exclusion rule and answer wording; scale and rating share [`SliderPanel`]
/// and differ only in how many sliders they carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUpComponent {
    Text(TextPrompt),
    Scale(SliderPanel),
    Select(ChoicePanel),
    Multiselect(CheckPanel),
    Checkbox(CheckPanel),
    Rating(SliderPanel),
}

impl FollowUpComponent {
    /// Build the component for a backend follow-up
    pub fn build(spec: FollowUpSpec) -> Self {
        match spec {
            FollowUpSpec::Text { question } => Self::Text(TextPrompt {
                question,
                text: String::new(),
            }),
            FollowUpSpec::Scale { question } => Self::Scale(SliderPanel {
                question,
                sliders: vec![Slider::new("")],
            }),
            FollowUpSpec::Select { question, options } => Self::Select(ChoicePanel {
                question,
                options,
                chosen: None,
            }),
            FollowUpSpec::Multiselect { question, options } => Self::Multiselect(CheckPanel {
                question,
                set: CheckSet::new(options, ExclusionRule::NoneOrOther),
            }),
            FollowUpSpec::Checkbox { question, options } => Self::Checkbox(CheckPanel {
                question,
                set: CheckSet::new(options, ExclusionRule::Independent),
            }),
        }
    }

    /// Build the symptom-rating panel: one slider per symptom, in order
    pub fn rating(symptoms: &[String]) -> Self {
        Self::Rating(SliderPanel {
            question: RATING_QUESTION.to_string(),
            sliders: symptoms
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(Slider::new)
                .collect(),
        })
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Scale(_) => "scale",
            Self::Select(_) => "select",
            Self::Multiselect(_) => "multiselect",
            Self::Checkbox(_) => "checkbox",
            Self::Rating(_) => "rating",
        }
    }

    pub fn is_rating(&self) -> bool {
        matches!(self, Self::Rating(_))
    }

    pub fn question(&self) -> &str {
        match self {
            Self::Text(p) => &p.question,
            Self::Scale(p) | Self::Rating(p) => &p.question,
            Self::Select(p) => &p.question,
            Self::Multiselect(p) | Self::Checkbox(p) => &p.question,
        }
    }

    /// Option labels for button/checkbox components, empty otherwise
    pub fn options(&self) -> &[String] {
        match self {
            Self::Select(p) => &p.options,
            Self::Multiselect(p) | Self::Checkbox(p) => p.set.options(),
            _ => &[],
        }
    }

    /// Sliders for scale/rating components, empty otherwise
    pub fn sliders(&self) -> &[Slider] {
        match self {
            Self::Scale(p) | Self::Rating(p) => &p.sliders,
            _ => &[],
        }
    }

    /// Apply one interaction.
    ///
    /// Returns `Ok(Some(answer))` when the interaction completes the prompt,
    /// `Ok(None)` when it only changed state, and an error when rejected (the
    /// component is then unchanged apart from the attempted edit).
    pub fn apply(&mut self, interaction: Interaction) -> Result<Option<String>, InputError> {
        let kind = self.kind_name();
        match (self, interaction) {
            (Self::Text(p), Interaction::Type(text)) => {
                p.text = text;
                Ok(None)
            }
            (Self::Text(p), Interaction::Submit) => {
                let answer = p.text.trim();
                if answer.is_empty() {
                    return Err(InputError::EmptyText);
                }
                Ok(Some(answer.to_string()))
            }

            (Self::Scale(p) | Self::Rating(p), Interaction::Slide { index, value }) => {
                let len = p.sliders.len();
                let slider = p
                    .sliders
                    .get_mut(index)
                    .ok_or(InputError::OptionOutOfRange { index, len })?;
                slider.set(value);
                Ok(None)
            }
            (Self::Scale(p), Interaction::Submit) => {
                let value = p.sliders.first().map_or(0, Slider::value);
                Ok(Some(format!("My rating is {value}/{SCALE_MAX}")))
            }
            (Self::Rating(p), Interaction::Submit) => {
                let mut answer = String::from("Symptom ratings:\n");
                for slider in &p.sliders {
                    answer.push_str(&format!("{}: {}/{SCALE_MAX}\n", slider.label, slider.value()));
                }
                Ok(Some(answer))
            }

            (Self::Select(p), Interaction::Choose(index)) => {
                let len = p.options.len();
                let label = p
                    .options
                    .get(index)
                    .cloned()
                    .ok_or(InputError::OptionOutOfRange { index, len })?;
                p.chosen = Some(index);
                Ok(Some(label))
            }
            (Self::Select(_), Interaction::Submit) => Err(InputError::NoSelection),

            (Self::Multiselect(p) | Self::Checkbox(p), Interaction::Toggle(index)) => {
                p.set.toggle(index)?;
                Ok(None)
            }
            (Self::Multiselect(p), Interaction::Submit) => {
                let selected = p.set.selected();
                if selected.is_empty() {
                    return Err(InputError::NoSelection);
                }
                Ok(Some(format!("I selected: {}", join_selection(&selected))))
            }
            (Self::Checkbox(p), Interaction::Submit) => {
                let selected = p.set.selected();
                let answer = match selected.as_slice() {
                    [] => return Err(InputError::NoSelection),
                    [only] => format!("Selected option: {only}"),
                    _ => format!("Selected options: {}", join_selection(&selected)),
                };
                Ok(Some(answer))
            }

            (_, other) => Err(InputError::Unsupported {
                kind,
                interaction: other.name(),
            }),
        }
    }

    /// Render the component as form markup for a markup-based presentation layer
    pub fn render_markup(&self) -> String {
        let question = format!(
            "<p class=\"follow-up-question\">{}</p>",
            escape_html(self.question())
        );
        let submit = "<button class=\"follow-up-submit\">Submit</button>";

        let controls = match self {
            Self::Text(p) => format!(
                "<input type=\"text\" class=\"follow-up-input\" value=\"{}\">{submit}",
                escape_html(&p.text)
            ),
            Self::Scale(p) => {
                let value = p.sliders.first().map_or(0, Slider::value);
                format!(
                    "{}<span class=\"scale-value\">{value}</span>{submit}",
                    range_input(0, value)
                )
            }
            Self::Select(p) => p
                .options
                .iter()
                .enumerate()
                .map(|(i, option)| {
                    let class = if p.chosen == Some(i) {
                        "follow-up-option selected"
                    } else {
                        "follow-up-option"
                    };
                    format!(
                        "<button class=\"{class}\" data-index=\"{i}\">{}</button>",
                        escape_html(option)
                    )
                })
                .collect(),
            Self::Multiselect(p) | Self::Checkbox(p) => {
                let boxes: String = p
                    .set
                    .options()
                    .iter()
                    .enumerate()
                    .map(|(i, option)| {
                        let checked = if p.set.is_checked(i) { " checked" } else { "" };
                        format!(
                            "<label class=\"follow-up-check\"><input type=\"checkbox\" data-index=\"{i}\"{checked}> {}</label>",
                            escape_html(option)
                        )
                    })
                    .collect();
                format!("{boxes}{submit}")
            }
            Self::Rating(p) => {
                let rows: String = p
                    .sliders
                    .iter()
                    .enumerate()
                    .map(|(i, slider)| {
                        format!(
                            "<div class=\"rating-row\"><span class=\"rating-label\">{}</span>{}<span class=\"rating-value\">{}/{SCALE_MAX}</span></div>",
                            escape_html(&slider.label),
                            range_input(i, slider.value()),
                            slider.value()
                        )
                    })
                    .collect();
                format!("{rows}{submit}")
            }
        };

        format!(
            "<div class=\"follow-up follow-up-{}\">{question}{controls}</div>",
            self.kind_name()
        )
    }
}

fn range_input(index: usize, value: u8) -> String {
    format!(
        "<input type=\"range\" min=\"{SCALE_MIN}\" max=\"{SCALE_MAX}\" value=\"{value}\" data-index=\"{index}\">"
    )
}
