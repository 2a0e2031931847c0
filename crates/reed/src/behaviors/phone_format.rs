//! Live grouping of phone digits in pairs while the user types.

use crate::page::Page;
use crate::selector::Selector;

/// Regroups the digits of `raw` into space-separated pairs.
///
/// Returns `None` when `raw` holds no digit at all; the field is then left
/// as typed. Grouping tiers by digit count:
///
/// * up to 2: digits as-is
/// * 3 to 4: `12 3`, `12 34`
/// * 5 to 6: `12 34 5`, `12 34 56`
/// * 7 or more: the first eight digits become `12 34 56 78` and any further
///   digits follow the eighth with no separator. Exactly seven digits do not
///   fill the four pairs, so they come back ungrouped.
pub fn format_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let formatted = match digits.len() {
        0 => return None,
        1..=2 => digits,
        3..=4 => format!("{} {}", &digits[..2], &digits[2..]),
        5..=6 => format!("{} {} {}", &digits[..2], &digits[2..4], &digits[4..]),
        7 => digits,
        _ => format!(
            "{} {} {} {}{}",
            &digits[..2],
            &digits[2..4],
            &digits[4..6],
            &digits[6..8],
            &digits[8..]
        ),
    };
    Some(formatted)
}

pub struct PhoneFormatter<P: Page> {
    inputs: Vec<P::Element>,
}

impl<P: Page> PhoneFormatter<P> {
    pub fn new(page: &P, selector: &Selector) -> Self {
        Self {
            inputs: page.query_all(selector),
        }
    }

    pub fn inputs(&self) -> &[P::Element] {
        &self.inputs
    }

    /// Rewrites the field value and returns it, or `None` when untouched.
    pub fn on_input(&self, page: &P, input: &P::Element) -> Option<String> {
        if !self.inputs.contains(input) {
            return None;
        }
        let formatted = format_phone(&page.value(input))?;
        page.set_value(input, &formatted);
        Some(formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::memory::{ElementFixture, MemoryPage, NodeId};

    #[test]
    fn tiers() {
        assert_eq!(format_phone("0").as_deref(), Some("0"));
        assert_eq!(format_phone("06").as_deref(), Some("06"));
        assert_eq!(format_phone("061").as_deref(), Some("06 1"));
        assert_eq!(format_phone("0612").as_deref(), Some("06 12"));
        assert_eq!(format_phone("06123").as_deref(), Some("06 12 3"));
        assert_eq!(format_phone("061234").as_deref(), Some("06 12 34"));
        assert_eq!(format_phone("0612345").as_deref(), Some("0612345"));
        assert_eq!(format_phone("06123456").as_deref(), Some("06 12 34 56"));
    }

    #[test]
    fn strips_non_digits_first() {
        assert_eq!(format_phone("ab12cd3456").as_deref(), Some("12 34 56"));
        assert_eq!(format_phone("+33 (6) 12-3").as_deref(), Some("33 61 23"));
        assert_eq!(format_phone("abc"), None);
        assert_eq!(format_phone(""), None);
    }

    #[test]
    fn digits_past_eight_are_appended_ungrouped() {
        assert_eq!(format_phone("1234567890").as_deref(), Some("12 34 56 7890"));
        assert_eq!(format_phone("12 34 56 78 9").as_deref(), Some("12 34 56 789"));
    }

    #[test]
    fn formatted_output_is_stable() {
        for raw in ["06", "0612", "061234", "0612345", "06123456", "0612345678"] {
            let once = format_phone(raw).unwrap();
            assert_eq!(format_phone(&once).as_deref(), Some(once.as_str()), "{raw}");
        }
    }

    #[test]
    fn rewrites_bound_fields_only() {
        let page = MemoryPage::from_elements(vec![
            ElementFixture::new("input").attr("type", "tel").value("06-12.34"),
            ElementFixture::new("input").attr("type", "text").value("061234"),
            ElementFixture::new("input").attr("type", "tel").value("n/a"),
        ]);
        let tel = Selector::parse(r#"input[type="tel"]"#).unwrap();
        let formatter = PhoneFormatter::new(&page, &tel);
        assert_eq!(formatter.inputs(), &[NodeId(0), NodeId(2)]);

        assert_eq!(formatter.on_input(&page, &NodeId(0)).as_deref(), Some("06 12 34"));
        assert_eq!(page.value(&NodeId(0)), "06 12 34");

        assert_eq!(formatter.on_input(&page, &NodeId(1)), None);
        assert_eq!(page.value(&NodeId(1)), "061234");

        assert_eq!(formatter.on_input(&page, &NodeId(2)), None);
        assert_eq!(page.value(&NodeId(2)), "n/a");
    }
}
