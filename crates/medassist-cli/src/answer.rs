//! Turning a typed line into interactions with the active follow-up

use medassist_ui::widgets::{SCALE_MAX, SCALE_MIN};
use medassist_ui::{FollowUpComponent, Interaction};

/// Interactions that answer `component` with the typed `line`.
///
/// Option numbers are 1-based as printed. Errors are hints for the user;
/// nothing has been applied when one is returned.
pub fn parse_answer(component: &FollowUpComponent, line: &str) -> Result<Vec<Interaction>, String> {
    let line = line.trim();
    match component {
        FollowUpComponent::Text(_) => Ok(vec![Interaction::Type(line.to_string()), Interaction::Submit]),

        FollowUpComponent::Scale(_) => {
            let mut interactions = Vec::new();
            if !line.is_empty() {
                let value = parse_rating(line)?;
                interactions.push(Interaction::Slide { index: 0, value });
            }
            interactions.push(Interaction::Submit);
            Ok(interactions)
        }

        FollowUpComponent::Select(_) => {
            let index = option_index(component.options(), line)?;
            Ok(vec![Interaction::Choose(index)])
        }

        FollowUpComponent::Multiselect(_) | FollowUpComponent::Checkbox(_) => {
            let mut interactions = Vec::new();
            for part in line.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                interactions.push(Interaction::Toggle(option_index(component.options(), part)?));
            }
            interactions.push(Interaction::Submit);
            Ok(interactions)
        }

        FollowUpComponent::Rating(_) => {
            let values: Vec<&str> = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|v| !v.is_empty())
                .collect();
            let count = component.sliders().len();
            if values.len() > count {
                return Err(format!("Please give at most {count} ratings, one per symptom."));
            }
            let mut interactions = Vec::new();
            for (index, value) in values.into_iter().enumerate() {
                interactions.push(Interaction::Slide {
                    index,
                    value: parse_rating(value)?,
                });
            }
            interactions.push(Interaction::Submit);
            Ok(interactions)
        }
    }
}

fn parse_rating(text: &str) -> Result<u8, String> {
    match text.parse::<u8>() {
        Ok(value) if (SCALE_MIN..=SCALE_MAX).contains(&value) => Ok(value),
        _ => Err(format!("Please enter a number from {SCALE_MIN} to {SCALE_MAX}.")),
    }
}

/// Option by printed number, or by case-insensitive label
fn option_index(options: &[String], text: &str) -> Result<usize, String> {
    if let Ok(number) = text.parse::<usize>() {
        if (1..=options.len()).contains(&number) {
            return Ok(number - 1);
        }
        return Err(format!("Please choose a number from 1 to {}.", options.len()));
    }
    options
        .iter()
        .position(|o| o.trim().eq_ignore_ascii_case(text))
        .ok_or_else(|| format!("'{text}' is not one of the options."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use medassist_api::FollowUpKind;
    use medassist_ui::FollowUpSpec;

    fn component(kind: FollowUpKind, options: &[&str]) -> FollowUpComponent {
        let options: Vec<String> = options.iter().map(|s| s.to_string()).collect();
        FollowUpComponent::build(FollowUpSpec::new(Some(kind), "Q?", &options))
    }

    #[test]
    fn test_select_by_number_or_label() {
        let c = component(FollowUpKind::Select, &["Yes", "No"]);
        assert_eq!(parse_answer(&c, "2"), Ok(vec![Interaction::Choose(1)]));
        assert_eq!(parse_answer(&c, "yes"), Ok(vec![Interaction::Choose(0)]));
        assert!(parse_answer(&c, "3").is_err());
        assert!(parse_answer(&c, "maybe").is_err());
    }

    #[test]
    fn test_multiselect_toggles_in_order() {
        let c = component(FollowUpKind::Multiselect, &["Fever", "Cough", "None of these"]);
        assert_eq!(
            parse_answer(&c, "1, 2"),
            Ok(vec![Interaction::Toggle(0), Interaction::Toggle(1), Interaction::Submit])
        );
        assert_eq!(parse_answer(&c, ""), Ok(vec![Interaction::Submit]));
    }

    #[test]
    fn test_scale_blank_keeps_default() {
        let c = component(FollowUpKind::Scale, &[]);
        assert_eq!(parse_answer(&c, ""), Ok(vec![Interaction::Submit]));
        assert_eq!(
            parse_answer(&c, "8"),
            Ok(vec![Interaction::Slide { index: 0, value: 8 }, Interaction::Submit])
        );
        assert!(parse_answer(&c, "11").is_err());
    }

    #[test]
    fn test_rating_values_in_order() {
        let c = FollowUpComponent::rating(&["Headache".to_string(), "Fatigue".to_string()]);
        assert_eq!(
            parse_answer(&c, "7 3"),
            Ok(vec![
                Interaction::Slide { index: 0, value: 7 },
                Interaction::Slide { index: 1, value: 3 },
                Interaction::Submit
            ])
        );
        assert!(parse_answer(&c, "1 2 3").is_err());
    }

    #[test]
    fn test_text_passes_through() {
        let c = component(FollowUpKind::Text, &[]);
        assert_eq!(
            parse_answer(&c, "  since Monday "),
            Ok(vec![Interaction::Type("since Monday".into()), Interaction::Submit])
        );
    }
}
