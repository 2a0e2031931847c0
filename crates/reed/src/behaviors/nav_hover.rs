//! Lifts nav links slightly while the pointer is over them.

use crate::config::NavLinkConfig;
use crate::page::Page;
use crate::selector::Selector;

const TRANSFORM: &str = "transform";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pointer {
    Enter,
    Leave,
}

pub struct NavHover<P: Page> {
    links: Vec<P::Element>,
    enter_transform: String,
    leave_transform: String,
}

impl<P: Page> NavHover<P> {
    pub fn new(page: &P, selector: &Selector, config: &NavLinkConfig) -> Self {
        Self {
            links: page.query_all(selector),
            enter_transform: config.enter_transform.clone(),
            leave_transform: config.leave_transform.clone(),
        }
    }

    pub fn links(&self) -> &[P::Element] {
        &self.links
    }

    /// Returns `false` when `link` is not one of the bound links.
    pub fn on_pointer(&self, page: &P, link: &P::Element, pointer: Pointer) -> bool {
        if !self.links.contains(link) {
            return false;
        }
        let transform = match pointer {
            Pointer::Enter => &self.enter_transform,
            Pointer::Leave => &self.leave_transform,
        };
        page.set_style(link, TRANSFORM, transform);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::memory::{ElementFixture, MemoryPage, NodeId};

    fn setup() -> (MemoryPage, NavHover<MemoryPage>) {
        let page = MemoryPage::from_elements(vec![
            ElementFixture::new("nav")
                .class("navbar")
                .child(ElementFixture::new("a").class("nav-link"))
                .child(ElementFixture::new("a").class("nav-link")),
            ElementFixture::new("a").class("footer-link"),
        ]);
        let hover = NavHover::new(
            &page,
            &Selector::parse(".nav-link").unwrap(),
            &NavLinkConfig::default(),
        );
        (page, hover)
    }

    #[test]
    fn enter_and_leave_pairs_always_end_neutral() {
        let (page, hover) = setup();
        assert_eq!(hover.links(), &[NodeId(1), NodeId(2)]);
        for link in [NodeId(1), NodeId(2), NodeId(1)] {
            assert!(hover.on_pointer(&page, &link, Pointer::Enter));
            assert_eq!(page.style(&link, "transform").as_deref(), Some("translateY(-2px)"));
            assert!(hover.on_pointer(&page, &link, Pointer::Leave));
            assert_eq!(page.style(&link, "transform").as_deref(), Some("translateY(0)"));
        }
    }

    #[test]
    fn leave_before_enter_still_resets() {
        let (page, hover) = setup();
        let link = NodeId(2);
        hover.on_pointer(&page, &link, Pointer::Leave);
        hover.on_pointer(&page, &link, Pointer::Enter);
        hover.on_pointer(&page, &link, Pointer::Enter);
        assert_eq!(page.style(&link, "transform").as_deref(), Some("translateY(-2px)"));
        hover.on_pointer(&page, &link, Pointer::Leave);
        assert_eq!(page.style(&link, "transform").as_deref(), Some("translateY(0)"));
    }

    #[test]
    fn unbound_elements_are_ignored() {
        let (page, hover) = setup();
        assert!(!hover.on_pointer(&page, &NodeId(3), Pointer::Enter));
        assert_eq!(page.style(&NodeId(3), "transform"), None);
    }
}
