//! Lightweight markdown to markup conversion for chat replies
//!
//! Only a small subset is understood: `**bold**`, `*italic*`, `* `/`- `
//! bullet lines, `N. ` numbered lines and line breaks. Anything else passes
//! through as text.

use std::sync::LazyLock;

use regex::Regex;

use crate::markup::escape_html;

/// Stands in for a `* ` list marker while the italics pass runs.
const LIST_MARKER_PLACEHOLDER: &str = "\u{1}LIST_MARKER\u{1}";

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static STAR_LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([ \t]*)\* ").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*\n]+?)\*").unwrap());
static UNORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*[*-] (.*)$").unwrap());
static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*\d+\. (.*)$").unwrap());
static ADJACENT_UL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</ul>\s*<ul>").unwrap());
static ADJACENT_OL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</ol>\s*<ol>").unwrap());

/// Convert the supported markdown subset to markup.
///
/// Steps run in a fixed order; list markers are shielded from the italics
/// pass so `* item` lines are not mistaken for emphasis.
pub fn render_markdown_lite(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let html = escape_html(&text.replace("\r\n", "\n"));
    let html = BOLD.replace_all(&html, "<strong>$1</strong>");

    let html = STAR_LIST_MARKER.replace_all(&html, format!("${{1}}{LIST_MARKER_PLACEHOLDER}"));
    let html = ITALIC.replace_all(&html, "<em>$1</em>");
    let html = html.replace(LIST_MARKER_PLACEHOLDER, "* ");

    let html = UNORDERED_ITEM.replace_all(&html, "<ul><li>$1</li></ul>");
    let html = ADJACENT_UL.replace_all(&html, "");

    let html = ORDERED_ITEM.replace_all(&html, "<ol><li>$1</li></ol>");
    let html = ADJACENT_OL.replace_all(&html, "");

    html.replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_and_italic() {
        assert_eq!(
            render_markdown_lite("**a** and *b*"),
            "<strong>a</strong> and <em>b</em>"
        );
    }

    #[test]
    fn test_star_list_merges_into_one() {
        assert_eq!(render_markdown_lite("* x\n* y"), "<ul><li>x</li><li>y</li></ul>");
    }

    #[test]
    fn test_dash_list() {
        assert_eq!(render_markdown_lite("- x\n- y\n- z"), "<ul><li>x</li><li>y</li><li>z</li></ul>");
    }

    #[test]
    fn test_ordered_list_drops_numbering() {
        assert_eq!(render_markdown_lite("1. a\n5. b"), "<ol><li>a</li><li>b</li></ol>");
    }

    #[test]
    fn test_list_items_keep_inline_emphasis() {
        assert_eq!(
            render_markdown_lite("* **Rest** well\n* drink *water*"),
            "<ul><li><strong>Rest</strong> well</li><li>drink <em>water</em></li></ul>"
        );
    }

    #[test]
    fn test_text_around_list() {
        assert_eq!(
            render_markdown_lite("Try this:\n- a\n- b\nThen rest."),
            "Try this:<br><ul><li>a</li><li>b</li></ul><br>Then rest."
        );
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(render_markdown_lite("one\ntwo\r\nthree"), "one<br>two<br>three");
    }

    #[test]
    fn test_blank_line_before_list_is_kept() {
        assert_eq!(render_markdown_lite("a\n\n- b"), "a<br><br><ul><li>b</li></ul>");
    }

    #[test]
    fn test_blank_lines_stay_breaks() {
        assert_eq!(render_markdown_lite("first\n\nsecond"), "first<br><br>second");
    }

    #[test]
    fn test_empty() {
        assert_eq!(render_markdown_lite(""), "");
    }

    #[test]
    fn test_escapes_markup() {
        assert_eq!(render_markdown_lite("<b>x</b> & y"), "&lt;b&gt;x&lt;/b&gt; &amp; y");
    }
}
