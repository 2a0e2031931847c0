//! Blocks submission of forms with empty required fields.

use crate::config::FormConfig;
use crate::page::Page;
use crate::selector::Selector;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitDecision {
    Allow,
    /// The submit must be cancelled; `invalid` fields were marked.
    Block { invalid: usize },
}

impl SubmitDecision {
    pub fn is_blocked(self) -> bool {
        matches!(self, Self::Block { .. })
    }
}

/// Whitespace-only, counting the byte order mark as whitespace like
/// `String.prototype.trim` does.
fn is_blank(value: &str) -> bool {
    value
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .is_empty()
}

pub struct FormValidator<P: Page> {
    forms: Vec<P::Element>,
    required: Selector,
    invalid_class: String,
    alert_message: String,
}

impl<P: Page> FormValidator<P> {
    pub fn new(page: &P, forms: &Selector, required: &Selector, config: &FormConfig) -> Self {
        Self {
            forms: page.query_all(forms),
            required: required.clone(),
            invalid_class: config.invalid_class.clone(),
            alert_message: config.alert_message.clone(),
        }
    }

    pub fn forms(&self) -> &[P::Element] {
        &self.forms
    }

    /// Marks every required field and alerts once if any is blank.
    ///
    /// Unbound forms are always allowed through.
    pub fn on_submit(&self, page: &P, form: &P::Element) -> SubmitDecision {
        if !self.forms.contains(form) {
            return SubmitDecision::Allow;
        }
        let mut invalid = 0;
        for field in page.query_within(form, &self.required) {
            let blank = is_blank(&page.value(&field));
            page.set_class(&field, &self.invalid_class, blank);
            if blank {
                invalid += 1;
            }
        }
        if invalid == 0 {
            return SubmitDecision::Allow;
        }
        log::debug!("[FormValidator] Blocked submit with {invalid} empty required field(s)");
        page.alert(&self.alert_message);
        SubmitDecision::Block { invalid }
    }
}
