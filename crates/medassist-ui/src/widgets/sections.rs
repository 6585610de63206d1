//! Assembly of the sectioned structured response

use crate::markup::escape_html;
use crate::widgets::structured::format_structured;

/// Text shown in place of medication chips when none were suggested
pub const NO_MEDICATION_NOTE: &str =
    "No specific medication suggested. Consult a pharmacist or doctor before taking anything.";

/// Field values ready for rendering; defaults are already substituted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredSections {
    pub symptoms: String,
    pub remedies: String,
    pub precautions: String,
    pub guidelines: String,
    pub medication: Vec<String>,
    pub disclaimer: String,
}

/// Render the full structured response block
pub fn render_structured_response(sections: &StructuredSections) -> String {
    let mut out = String::from("<div class=\"structured-response\">");

    for (title, body) in [
        ("Symptoms", &sections.symptoms),
        ("Remedies", &sections.remedies),
        ("Precautions", &sections.precautions),
        ("Guidelines", &sections.guidelines),
    ] {
        out.push_str(&section(title, &format_structured(body)));
    }

    out.push_str(&section("Medication", &medication_chips(&sections.medication)));
    out.push_str(&format!(
        "<p class=\"disclaimer\">{}</p>",
        escape_html(&sections.disclaimer)
    ));
    out.push_str("</div>");
    out
}

fn section(title: &str, body: &str) -> String {
    format!(
        "<section class=\"structured-section\"><h3>{title}</h3><div class=\"section-body\">{body}</div></section>"
    )
}

/// One chip per non-blank medication name
fn medication_chips(medication: &[String]) -> String {
    let chips: Vec<String> = medication
        .iter()
        .map(|m| m.trim())
        .filter(|m| !m.is_empty())
        .map(|m| format!("<span class=\"medication-chip\">{}</span>", escape_html(m)))
        .collect();

    if chips.is_empty() {
        format!("<p class=\"no-medication\">{NO_MEDICATION_NOTE}</p>")
    } else {
        format!("<div class=\"medication-list\">{}</div>", chips.concat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StructuredSections {
        StructuredSections {
            symptoms: "**Headache:** mild".into(),
            remedies: "Rest".into(),
            precautions: "Avoid screens".into(),
            guidelines: "See a doctor if it persists".into(),
            medication: vec!["Ibuprofen".into(), " ".into(), "Acetaminophen".into()],
            disclaimer: "Not medical advice".into(),
        }
    }

    #[test]
    fn test_sections_in_order() {
        let html = render_structured_response(&sample());
        let positions: Vec<usize> = ["Symptoms", "Remedies", "Precautions", "Guidelines", "Medication"]
            .iter()
            .map(|t| html.find(&format!("<h3>{t}</h3>")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(html.ends_with("<p class=\"disclaimer\">Not medical advice</p></div>"));
    }

    #[test]
    fn test_fields_go_through_formatter() {
        let html = render_structured_response(&sample());
        assert!(html.contains("<strong>Headache:</strong> mild"));
        assert!(html.contains("<span class=\"highlight\">Avoid</span> screens"));
    }

    #[test]
    fn test_medication_chips_skip_blank() {
        let html = render_structured_response(&sample());
        assert_eq!(html.matches("medication-chip").count(), 2);
        assert!(html.contains("<span class=\"medication-chip\">Acetaminophen</span>"));
    }

    #[test]
    fn test_no_medication_note() {
        let mut sections = sample();
        sections.medication.clear();
        let html = render_structured_response(&sections);
        assert!(html.contains(NO_MEDICATION_NOTE));
        assert!(!html.contains("medication-chip"));
    }
}
