//! Selection state shared by the follow-up components

use crate::error::InputError;

/// Lowest slider value
pub const SCALE_MIN: u8 = 1;
/// Highest slider value
pub const SCALE_MAX: u8 = 10;
/// Initial slider value
pub const SCALE_DEFAULT: u8 = 5;

/// A labelled 1-10 slider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slider {
    pub label: String,
    value: u8,
}

impl Slider {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: SCALE_DEFAULT,
        }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Move the slider; values outside the scale are clamped
    pub fn set(&mut self, value: u8) {
        self.value = value.clamp(SCALE_MIN, SCALE_MAX);
    }
}

/// How checking one option affects its siblings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionRule {
    /// Options are independent
    Independent,
    /// "None of these"/"Other"-style options exclude every other option
    NoneOrOther,
}

/// Whether a label names an option that excludes all others
pub fn is_exclusive_label(label: &str) -> bool {
    let lower = label.trim().to_lowercase();
    lower.contains("none") || lower == "other"
}

/// Checkbox group state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSet {
    options: Vec<String>,
    checked: Vec<bool>,
    rule: ExclusionRule,
}

impl CheckSet {
    pub fn new(options: Vec<String>, rule: ExclusionRule) -> Self {
        let checked = vec![false; options.len()];
        Self {
            options,
            checked,
            rule,
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.get(index).copied().unwrap_or(false)
    }

    /// Flip one checkbox, then apply the exclusion rule if it became checked
    pub fn toggle(&mut self, index: usize) -> Result<(), InputError> {
        let len = self.options.len();
        if index >= len {
            return Err(InputError::OptionOutOfRange { index, len });
        }

        let now_checked = !self.checked[index];
        self.checked[index] = now_checked;

        if now_checked && self.rule == ExclusionRule::NoneOrOther {
            if is_exclusive_label(&self.options[index]) {
                for (i, checked) in self.checked.iter_mut().enumerate() {
                    if i != index {
                        *checked = false;
                    }
                }
            } else {
                for (option, checked) in self.options.iter().zip(self.checked.iter_mut()) {
                    if is_exclusive_label(option) {
                        *checked = false;
                    }
                }
            }
        }
        Ok(())
    }

    /// Checked labels in option order
    pub fn selected(&self) -> Vec<&str> {
        self.options
            .iter()
            .zip(&self.checked)
            .filter(|(_, checked)| **checked)
            .map(|(option, _)| option.as_str())
            .collect()
    }
}

/// `"a"`, `"a and b"`, `"a, b and c"`
pub fn join_selection(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_slider_clamps() {
        let mut slider = Slider::new("Headache");
        assert_eq!(slider.value(), 5);
        slider.set(0);
        assert_eq!(slider.value(), 1);
        slider.set(42);
        assert_eq!(slider.value(), 10);
    }

    #[test]
    fn test_exclusive_labels() {
        assert!(is_exclusive_label("None of these"));
        assert!(is_exclusive_label("NONE"));
        assert!(is_exclusive_label("Other"));
        assert!(!is_exclusive_label("Other symptoms"));
        assert!(!is_exclusive_label("Fever"));
    }

    #[test]
    fn test_none_clears_others_and_back() {
        let mut set = CheckSet::new(
            labels(&["Fever", "Cough", "None of these"]),
            ExclusionRule::NoneOrOther,
        );
        set.toggle(0).unwrap();
        set.toggle(1).unwrap();
        assert_eq!(set.selected(), vec!["Fever", "Cough"]);

        set.toggle(2).unwrap();
        assert_eq!(set.selected(), vec!["None of these"]);

        set.toggle(1).unwrap();
        assert_eq!(set.selected(), vec!["Cough"]);
    }

    #[test]
    fn test_independent_keeps_none_with_others() {
        let mut set = CheckSet::new(labels(&["Fever", "None of these"]), ExclusionRule::Independent);
        set.toggle(0).unwrap();
        set.toggle(1).unwrap();
        assert_eq!(set.selected(), vec!["Fever", "None of these"]);
    }

    #[test]
    fn test_unchecking_leaves_siblings() {
        let mut set = CheckSet::new(labels(&["A", "B"]), ExclusionRule::NoneOrOther);
        set.toggle(0).unwrap();
        set.toggle(1).unwrap();
        set.toggle(0).unwrap();
        assert_eq!(set.selected(), vec!["B"]);
    }

    #[test]
    fn test_toggle_out_of_range() {
        let mut set = CheckSet::new(labels(&["A"]), ExclusionRule::Independent);
        assert_eq!(
            set.toggle(3),
            Err(InputError::OptionOutOfRange { index: 3, len: 1 })
        );
    }

    #[test]
    fn test_join_selection() {
        assert_eq!(join_selection(&["a"]), "a");
        assert_eq!(join_selection(&["a", "b"]), "a and b");
        assert_eq!(join_selection(&["a", "b", "c"]), "a, b and c");
    }
}
