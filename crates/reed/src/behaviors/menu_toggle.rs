use crate::config::MenuToggleConfig;
use crate::page::Page;
use crate::selector::Selector;

/// Flips the active marker on the mobile menu button.
pub struct MenuToggle<P: Page> {
    toggler: Option<P::Element>,
    active_class: String,
}

impl<P: Page> MenuToggle<P> {
    pub fn new(page: &P, selector: &Selector, config: &MenuToggleConfig) -> Self {
        Self {
            toggler: page.query_first(selector),
            active_class: config.active_class.clone(),
        }
    }

    pub fn toggler(&self) -> Option<&P::Element> {
        self.toggler.as_ref()
    }

    /// Returns the new active state, or `None` without a toggler.
    pub fn on_click(&self, page: &P) -> Option<bool> {
        let toggler = self.toggler.as_ref()?;
        Some(page.toggle_class(toggler, &self.active_class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::memory::{ElementFixture, MemoryPage, NodeId};

    fn toggle(page: &MemoryPage) -> MenuToggle<MemoryPage> {
        MenuToggle::new(
            page,
            &Selector::parse(".navbar-toggler").unwrap(),
            &MenuToggleConfig::default(),
        )
    }

    #[test]
    fn parity_of_clicks_decides_state() {
        for initially_active in [false, true] {
            let mut button = ElementFixture::new("button").class("navbar-toggler");
            if initially_active {
                button = button.class("active");
            }
            let page = MemoryPage::from_elements(vec![button]);
            let toggle = toggle(&page);

            for clicks in 1..=6 {
                toggle.on_click(&page);
                let expected = if clicks % 2 == 0 { initially_active } else { !initially_active };
                assert_eq!(page.has_class(&NodeId(0), "active"), expected);
            }
        }
    }

    #[test]
    fn absent_toggler_does_nothing() {
        let page = MemoryPage::from_elements(vec![ElementFixture::new("button")]);
        let toggle = toggle(&page);
        assert!(toggle.toggler().is_none());
        assert_eq!(toggle.on_click(&page), None);
        assert!(page.classes(&NodeId(0)).is_empty());
    }
}
