//! Marks the navbar once the page is scrolled past a threshold.

use crate::config::NavbarConfig;
use crate::page::Page;
use crate::selector::Selector;

pub struct ScrollWatcher<P: Page> {
    navbar: Option<P::Element>,
    scrolled_class: String,
    threshold: f64,
}

impl<P: Page> ScrollWatcher<P> {
    pub fn new(page: &P, selector: &Selector, config: &NavbarConfig) -> Self {
        let navbar = page.query_first(selector);
        if navbar.is_none() {
            log::debug!("[ScrollWatcher] No element matches `{selector}`");
        }
        Self {
            navbar,
            scrolled_class: config.scrolled_class.clone(),
            threshold: config.scroll_threshold,
        }
    }

    pub fn is_scrolled(&self, scroll_y: f64) -> bool {
        scroll_y > self.threshold
    }

    /// Returns whether the navbar now carries the scrolled marker.
    pub fn on_scroll(&self, page: &P) -> bool {
        let Some(navbar) = &self.navbar else {
            return false;
        };
        let scrolled = self.is_scrolled(page.scroll_y());
        page.set_class(navbar, &self.scrolled_class, scrolled);
        scrolled
    }
}
