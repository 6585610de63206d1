//! medassist-ui: Markup formatting and follow-up components
//!
//! Turns assistant text into display markup and provides the interactive
//! prompts used to collect answers to follow-up questions. Nothing here
//! touches the network; rendering is pure string work.

pub mod error;
pub mod markup;
pub mod widgets;

pub use error::InputError;
pub use markup::escape_html;
pub use widgets::{
    FollowUpComponent, FollowUpSpec, Interaction, StructuredSections, format_structured,
    render_markdown_lite, render_structured_response,
};
