//! Formatting for the free-text fields of a structured medical response
//!
//! Backend prose arrives in one of two shapes: paragraphs led by a bold topic
//! (`**Rest:** ...`) or loose lines with ad-hoc bullets. Both end up as markup
//! with urgent lines grouped into a high-severity block and risk vocabulary
//! highlighted inline.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::markup::escape_html;

/// Substrings that put a line into the high-severity block (case-sensitive)
const EMERGENCY_TRIGGERS: &[&str] = &["IMPORTANT", "SEEK IMMEDIATE", "EMERGENCY"];

/// Words and phrases highlighted wherever they appear as whole words
const HIGHLIGHT_VOCABULARY: &[&str] = &[
    "important",
    "caution",
    "warning",
    "avoid",
    "immediately",
    "seek medical",
    "emergency",
    "emergency care",
    "urgent care",
    "call 911",
    "hospital",
    "severe",
    "high fever",
    "shortness of breath",
    "difficulty breathing",
    "chest pain",
    "doctor",
    "physician",
];

/// Bullet characters that were UTF-8 encoded twice somewhere upstream
const MOJIBAKE_BULLETS: &[&str] = &["Ã¢â‚¬Â¢", "â€¢", "â—", "Â·"];

static BOLD_LEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*(.+?)\*\*[ \t]*(.*)$").unwrap());
static INLINE_BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*\n]+?)\*\*").unwrap());
static NUMBERED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*\d+\.[ \t]+(.+)$").unwrap());
static BULLET_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*[-*][ \t]+(.+)$").unwrap());
static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<br\s*/?>|\n").unwrap());
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static HIGHLIGHT: LazyLock<Regex> = LazyLock::new(|| {
    // Longest phrases first so "emergency care" wins over "emergency".
    let mut words: Vec<&str> = HIGHLIGHT_VOCABULARY.to_vec();
    words.sort_by_key(|w| std::cmp::Reverse(w.len()));
    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).unwrap()
});

/// Format one structured field (Symptoms, Remedies, Precautions, Guidelines).
///
/// Callers substitute their own default text for empty fields before calling.
pub fn format_structured(text: &str) -> String {
    let escaped = escape_html(&text.replace("\r\n", "\n"));
    let body = bold_paragraphs(&escaped).unwrap_or_else(|| loose_lines(&escaped));
    let flagged = group_emergencies(&body);
    highlight_keywords(&flagged)
}

/// Paragraphs opened by a bold topic line. `None` when no line starts with one.
fn bold_paragraphs(text: &str) -> Option<String> {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Option<String> = None;
    let mut found_lead = false;

    for line in text.lines().map(str::trim) {
        if let Some(caps) = BOLD_LEAD.captures(line) {
            found_lead = true;
            paragraphs.extend(current.take());

            let mut paragraph = format!("<strong>{}</strong>", &caps[1]);
            let rest = caps[2].trim();
            if !rest.is_empty() {
                paragraph.push(' ');
                paragraph.push_str(&inline_bold(rest));
            }
            current = Some(paragraph);
        } else if !line.is_empty() {
            match current.as_mut() {
                Some(paragraph) => {
                    paragraph.push(' ');
                    paragraph.push_str(&inline_bold(line));
                }
                // Text ahead of the first topic still gets its own paragraph
                None => current = Some(inline_bold(line).into_owned()),
            }
        }
    }
    paragraphs.extend(current);

    if !found_lead {
        return None;
    }

    Some(
        paragraphs
            .iter()
            .map(|p| format!("<p class=\"structured-paragraph\">{p}</p>"))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    fn wrap(self, items: &[String]) -> String {
        let tag = match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
        };
        let items: String = items.iter().map(|i| format!("<li>{i}</li>")).collect();
        format!("<{tag}>{items}</{tag}>")
    }
}

/// Fallback for text without bold topics: line breaks plus list detection.
fn loose_lines(text: &str) -> String {
    let mut cleaned = text.to_string();
    for artifact in MOJIBAKE_BULLETS {
        cleaned = cleaned.replace(artifact, "");
    }

    let mut segments: Vec<String> = Vec::new();
    let mut run: Option<(ListKind, Vec<String>)> = None;

    for line in cleaned.split('\n') {
        let item = NUMBERED_LINE
            .captures(line)
            .map(|c| (ListKind::Ordered, inline_bold(c[1].trim()).into_owned()))
            .or_else(|| {
                BULLET_LINE
                    .captures(line)
                    .map(|c| (ListKind::Unordered, inline_bold(c[1].trim()).into_owned()))
            });

        match item {
            Some((kind, text)) => match run.as_mut() {
                Some((run_kind, items)) if *run_kind == kind => items.push(text),
                _ => {
                    if let Some((k, items)) = run.take() {
                        segments.push(k.wrap(&items));
                    }
                    run = Some((kind, vec![text]));
                }
            },
            None => {
                if let Some((k, items)) = run.take() {
                    segments.push(k.wrap(&items));
                }
                segments.push(inline_bold(line.trim_end()).into_owned());
            }
        }
    }
    if let Some((k, items)) = run.take() {
        segments.push(k.wrap(&items));
    }

    segments.join("<br>")
}

fn inline_bold(text: &str) -> Cow<'_, str> {
    INLINE_BOLD.replace_all(text, "<strong>$1</strong>")
}

/// Split markup into `(line, delimiter)` pairs; the last delimiter is empty.
fn split_lines(markup: &str) -> Vec<(&str, &str)> {
    let mut lines = Vec::new();
    let mut last = 0;
    for m in LINE_BREAK.find_iter(markup) {
        lines.push((&markup[last..m.start()], m.as_str()));
        last = m.end();
    }
    lines.push((&markup[last..], ""));
    lines
}

fn is_emergency_line(line: &str) -> bool {
    !line.trim().is_empty() && EMERGENCY_TRIGGERS.iter().any(|t| line.contains(t))
}

/// Wrap every run of consecutive urgent lines in a high-severity block.
fn group_emergencies(markup: &str) -> String {
    let lines = split_lines(markup);
    let mut out = String::with_capacity(markup.len());
    let mut i = 0;

    while i < lines.len() {
        if !is_emergency_line(lines[i].0) {
            out.push_str(lines[i].0);
            out.push_str(lines[i].1);
            i += 1;
            continue;
        }

        let start = i;
        while i < lines.len() && is_emergency_line(lines[i].0) {
            i += 1;
        }

        out.push_str("<div class=\"high-severity\">");
        for (offset, (line, delimiter)) in lines[start..i].iter().enumerate() {
            out.push_str(line);
            if start + offset + 1 < i {
                out.push_str(delimiter);
            }
        }
        out.push_str("</div>");
        out.push_str(lines[i - 1].1);
    }

    out
}

/// Highlight vocabulary words in text nodes only, leaving tags untouched.
fn highlight_keywords(markup: &str) -> String {
    const REPLACEMENT: &str = "<span class=\"highlight\">$0</span>";

    let mut out = String::with_capacity(markup.len());
    let mut last = 0;
    for tag in TAG.find_iter(markup) {
        out.push_str(&HIGHLIGHT.replace_all(&markup[last..tag.start()], REPLACEMENT));
        out.push_str(tag.as_str());
        last = tag.end();
    }
    out.push_str(&HIGHLIGHT.replace_all(&markup[last..], REPLACEMENT));
    out
}
