//! Formatters and follow-up components

pub mod follow_up;
pub mod markdown;
pub mod sections;
pub mod selection;
pub mod structured;

pub use follow_up::{FollowUpComponent, FollowUpSpec, Interaction, RATING_QUESTION};
pub use markdown::render_markdown_lite;
pub use sections::{NO_MEDICATION_NOTE, StructuredSections, render_structured_response};
pub use selection::{CheckSet, ExclusionRule, SCALE_DEFAULT, SCALE_MAX, SCALE_MIN, Slider, join_selection};
pub use structured::format_structured;
