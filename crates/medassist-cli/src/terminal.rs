//! Line-oriented terminal presentation

use std::io::{IsTerminal, Write};
use std::sync::{Arc, LazyLock};

use medassist_dialogue::{Gallery, Presenter};
use medassist_ui::FollowUpComponent;
use medassist_ui::widgets::SCALE_DEFAULT;
use parking_lot::Mutex;
use regex::Regex;

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<h3>(.*?)</h3>").unwrap());
static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<li>").unwrap());
static BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<br\s*/?>").unwrap());
static BLOCK_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</(p|div|section|ul|ol)>").unwrap());
static SEVERE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<div class="high-severity">"#).unwrap());
static CHIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<span class="medication-chip">(.*?)</span>"#).unwrap());
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n[ \t]*(\n[ \t]*)+").unwrap());

/// Flatten display markup into readable plain text
pub fn markup_to_text(markup: &str) -> String {
    let text = HEADING.replace_all(markup, "\n\n$1\n");
    let text = SEVERE.replace_all(&text, "\n!! ");
    let text = CHIP.replace_all(&text, "[$1] ");
    let text = LIST_ITEM.replace_all(&text, "\n  - ");
    let text = BREAK.replace_all(&text, "\n");
    let text = BLOCK_END.replace_all(&text, "\n");
    let text = TAG.replace_all(&text, "");
    let text = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&");
    BLANK_RUN.replace_all(&text, "\n\n").trim().to_string()
}

/// Plain-text prompt for a follow-up component
pub fn describe_component(component: &FollowUpComponent, progress: Option<(u32, u32)>) -> String {
    let mut out = String::new();
    if let Some((current, total)) = progress {
        out.push_str(&format!("[Step {current} of {total}]\n"));
    }
    out.push_str(component.question());
    out.push('\n');

    for (i, option) in component.options().iter().enumerate() {
        out.push_str(&format!("  {}) {}\n", i + 1, option));
    }
    for slider in component.sliders() {
        if !slider.label.is_empty() {
            out.push_str(&format!("  {}: {}/10\n", slider.label, slider.value()));
        }
    }

    let hint = match component {
        FollowUpComponent::Text(_) => "type your answer".to_string(),
        FollowUpComponent::Scale(_) => format!("enter 1-10, or press enter for {SCALE_DEFAULT}"),
        FollowUpComponent::Select(_) => "enter a number".to_string(),
        FollowUpComponent::Multiselect(_) | FollowUpComponent::Checkbox(_) => {
            "enter numbers separated by commas".to_string()
        }
        FollowUpComponent::Rating(_) => {
            format!("enter a 1-10 rating per symptom in order; missing ones stay at {SCALE_DEFAULT}")
        }
    };
    out.push_str(&format!("({hint})"));
    out
}

/// How assistant output is printed
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    /// Print markup as-is instead of flattening it
    pub raw_markup: bool,
    pub wrap_width: usize,
}

/// Most recent image results, printed as they arrive
#[derive(Default)]
pub struct TerminalGallery {
    latest: Mutex<Option<(String, Vec<String>)>>,
}

impl TerminalGallery {
    pub fn latest(&self) -> Option<(String, Vec<String>)> {
        self.latest.lock().clone()
    }

    pub fn clear(&self) {
        *self.latest.lock() = None;
    }
}

impl Gallery for TerminalGallery {
    fn show_images(&self, term: &str, urls: &[String]) {
        if urls.is_empty() {
            return;
        }
        *self.latest.lock() = Some((term.to_string(), urls.to_vec()));
        println!("\n{}", format_images(term, urls));
    }
}

/// Listing used for arriving images and the /images command
pub fn format_images(term: &str, urls: &[String]) -> String {
    let mut out = format!("Images for \"{term}\":");
    for url in urls {
        out.push_str(&format!("\n  {url}"));
    }
    out
}

/// Prints the conversation to stdout
pub struct TerminalPresenter {
    options: DisplayOptions,
    gallery: Arc<TerminalGallery>,
    thinking: bool,
    input_enabled: bool,
}

impl TerminalPresenter {
    pub fn new(options: DisplayOptions, gallery: Arc<TerminalGallery>) -> Self {
        Self {
            options,
            gallery,
            thinking: false,
            input_enabled: true,
        }
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    fn render(&self, markup: &str) -> String {
        if self.options.raw_markup {
            return markup.to_string();
        }
        let text = markup_to_text(markup);
        textwrap::fill(&text, self.options.wrap_width.max(20))
    }
}

impl Presenter for TerminalPresenter {
    fn append_user_message(&mut self, _text: &str) {
        // Already on screen from the prompt
    }

    fn append_assistant_message(&mut self, markup: &str) {
        println!("\n{}\n", self.render(markup));
    }

    fn set_thinking(&mut self, visible: bool) {
        if visible == self.thinking {
            return;
        }
        self.thinking = visible;
        let stderr = std::io::stderr();
        if !stderr.is_terminal() {
            return;
        }
        let mut stderr = stderr.lock();
        let _ = if visible {
            write!(stderr, "thinking...")
        } else {
            write!(stderr, "\r\x1b[2K")
        };
        let _ = stderr.flush();
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn show_structured(&mut self, markup: &str) {
        println!("{}\n", self.render(markup));
    }

    fn show_follow_up(&mut self, component: &FollowUpComponent, progress: Option<(u32, u32)>) {
        if self.options.raw_markup {
            println!("{}", component.render_markup());
        }
        println!("{}", describe_component(component, progress));
    }

    fn clear_follow_up(&mut self) {}

    fn set_restart_offered(&mut self, offered: bool) {
        if offered {
            println!("Type /restart to start a new conversation.\n");
        }
    }

    fn notice(&mut self, message: &str) {
        println!("{message}");
    }

    fn clear_conversation(&mut self) {
        println!("--- new conversation ---");
    }

    fn clear_gallery(&mut self) {
        self.gallery.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medassist_api::FollowUpKind;
    use medassist_ui::{FollowUpSpec, StructuredSections, render_structured_response};

    #[test]
    fn test_markup_to_text_lists_and_entities() {
        let text = markup_to_text("Try:<ul><li>rest</li><li>fluids &amp; tea</li></ul>");
        assert_eq!(text, "Try:\n  - rest\n  - fluids & tea");
    }

    #[test]
    fn test_markup_to_text_structured_block() {
        let markup = render_structured_response(&StructuredSections {
            symptoms: "Headache".into(),
            remedies: "Rest".into(),
            precautions: "EMERGENCY: call 911 if worse".into(),
            guidelines: "Hydrate".into(),
            medication: vec!["Ibuprofen".into()],
            disclaimer: "Not advice".into(),
        });
        let text = markup_to_text(&markup);
        assert!(text.starts_with("Symptoms\nHeadache"));
        assert!(text.contains("!! EMERGENCY: call 911 if worse"));
        assert!(text.contains("[Ibuprofen]"));
        assert!(text.ends_with("Not advice"));
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_describe_select_with_progress() {
        let component = FollowUpComponent::build(FollowUpSpec::new(
            Some(FollowUpKind::Select),
            "How long?",
            &["A day".to_string(), "A week".to_string()],
        ));
        assert_eq!(
            describe_component(&component, Some((2, 4))),
            "[Step 2 of 4]\nHow long?\n  1) A day\n  2) A week\n(enter a number)"
        );
    }

    #[test]
    fn test_describe_rating_lists_symptoms() {
        let component = FollowUpComponent::rating(&["Headache".to_string()]);
        let text = describe_component(&component, None);
        assert!(text.contains("  Headache: 5/10\n"));
    }

    #[test]
    fn test_presenter_tracks_input_lock() {
        let mut presenter = TerminalPresenter::new(
            DisplayOptions {
                raw_markup: true,
                wrap_width: 80,
            },
            Arc::default(),
        );
        assert!(presenter.input_enabled());
        presenter.set_input_enabled(false);
        assert!(!presenter.input_enabled());
        presenter.set_input_enabled(true);
        assert!(presenter.input_enabled());
    }

    #[test]
    fn test_gallery_keeps_latest() {
        let gallery = TerminalGallery::default();
        gallery.show_images("hives", &["https://img.example/1.jpg".to_string()]);
        assert_eq!(gallery.latest().map(|(term, _)| term), Some("hives".to_string()));
        gallery.clear();
        assert!(gallery.latest().is_none());
    }
}
