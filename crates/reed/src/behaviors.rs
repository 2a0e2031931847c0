//! The six page behaviors and the set that builds them at load time.

pub mod form_validator;
pub mod image_preview;
pub mod menu_toggle;
pub mod nav_hover;
pub mod phone_format;
pub mod scroll_watcher;

pub use form_validator::{FormValidator, SubmitDecision};
pub use image_preview::{Completion, ImagePreview, PreviewRequest};
pub use menu_toggle::MenuToggle;
pub use nav_hover::{NavHover, Pointer};
pub use phone_format::{PhoneFormatter, format_phone};
pub use scroll_watcher::ScrollWatcher;

use crate::config::PageConfig;
use crate::error::Result;
use crate::page::Page;

/// A DOM event routed to the behaviors, with its target where it has one.
#[derive(Clone, Debug, PartialEq)]
pub enum PageEvent<E> {
    Scroll,
    PointerEnter(E),
    PointerLeave(E),
    Click(E),
    Input(E),
    Change(E),
    Submit(E),
}

#[derive(Clone, Debug, PartialEq)]
pub enum EventOutcome<E> {
    /// No behavior is bound to the target.
    Ignored,
    Scrolled { scrolled: bool },
    Hovered,
    MenuToggled { active: bool },
    PhoneFormatted(String),
    /// The platform must read the first file and call [`PageBehaviors::complete_preview`].
    PreviewRequested(PreviewRequest<E>),
    Submit(SubmitDecision),
}

/// Every behavior bound to the elements present when the page loaded.
pub struct PageBehaviors<P: Page> {
    scroll_watcher: ScrollWatcher<P>,
    nav_hover: NavHover<P>,
    menu_toggle: MenuToggle<P>,
    phone_formatter: PhoneFormatter<P>,
    image_preview: ImagePreview<P>,
    form_validator: FormValidator<P>,
}

impl<P: Page> PageBehaviors<P> {
    pub fn new(page: &P, config: &PageConfig) -> Result<Self> {
        config.validate()?;
        let selectors = config.selectors()?;
        let behaviors = Self {
            scroll_watcher: ScrollWatcher::new(page, &selectors.navbar, &config.navbar),
            nav_hover: NavHover::new(page, &selectors.nav_links, &config.nav_links),
            menu_toggle: MenuToggle::new(page, &selectors.menu_toggle, &config.menu_toggle),
            phone_formatter: PhoneFormatter::new(page, &selectors.phone),
            image_preview: ImagePreview::new(page, &selectors.image_inputs, &config.image_preview),
            form_validator: FormValidator::new(
                page,
                &selectors.forms,
                &selectors.required_fields,
                &config.forms,
            ),
        };
        log::info!(
            "REED page behaviors loaded ({} nav links, {} phone fields, {} image inputs, {} forms)",
            behaviors.nav_hover.links().len(),
            behaviors.phone_formatter.inputs().len(),
            behaviors.image_preview.inputs().len(),
            behaviors.form_validator.forms().len(),
        );
        Ok(behaviors)
    }

    pub fn scroll_watcher(&self) -> &ScrollWatcher<P> {
        &self.scroll_watcher
    }

    pub fn nav_hover(&self) -> &NavHover<P> {
        &self.nav_hover
    }

    pub fn menu_toggle(&self) -> &MenuToggle<P> {
        &self.menu_toggle
    }

    pub fn phone_formatter(&self) -> &PhoneFormatter<P> {
        &self.phone_formatter
    }

    pub fn image_preview(&self) -> &ImagePreview<P> {
        &self.image_preview
    }

    pub fn form_validator(&self) -> &FormValidator<P> {
        &self.form_validator
    }

    pub fn dispatch(&self, page: &P, event: PageEvent<P::Element>) -> EventOutcome<P::Element> {
        match event {
            PageEvent::Scroll => EventOutcome::Scrolled {
                scrolled: self.scroll_watcher.on_scroll(page),
            },
            PageEvent::PointerEnter(target) => self.hover(page, &target, Pointer::Enter),
            PageEvent::PointerLeave(target) => self.hover(page, &target, Pointer::Leave),
            PageEvent::Click(target) => {
                if self.menu_toggle.toggler() != Some(&target) {
                    return EventOutcome::Ignored;
                }
                match self.menu_toggle.on_click(page) {
                    Some(active) => EventOutcome::MenuToggled { active },
                    None => EventOutcome::Ignored,
                }
            }
            PageEvent::Input(target) => match self.phone_formatter.on_input(page, &target) {
                Some(formatted) => EventOutcome::PhoneFormatted(formatted),
                None => EventOutcome::Ignored,
            },
            PageEvent::Change(target) => match self.image_preview.on_change(page, &target) {
                Some(request) => EventOutcome::PreviewRequested(request),
                None => EventOutcome::Ignored,
            },
            PageEvent::Submit(target) => {
                if !self.form_validator.forms().contains(&target) {
                    return EventOutcome::Ignored;
                }
                EventOutcome::Submit(self.form_validator.on_submit(page, &target))
            }
        }
    }

    pub fn complete_preview(
        &self,
        page: &P,
        request: &PreviewRequest<P::Element>,
        data_url: &str,
    ) -> Completion {
        self.image_preview.complete(page, request, data_url)
    }

    fn hover(&self, page: &P, target: &P::Element, pointer: Pointer) -> EventOutcome<P::Element> {
        if self.nav_hover.on_pointer(page, target, pointer) {
            EventOutcome::Hovered
        } else {
            EventOutcome::Ignored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::platform::memory::{ElementFixture, MemoryPage, NodeId};

    fn page() -> MemoryPage {
        MemoryPage::from_elements(vec![
            ElementFixture::new("nav")
                .class("navbar")
                .child(ElementFixture::new("button").class("navbar-toggler"))
                .child(ElementFixture::new("a").class("nav-link")),
            ElementFixture::new("form")
                .child(ElementFixture::new("input").attr("type", "tel").attr("required", "")),
        ])
    }

    #[test]
    fn routes_each_event_to_its_behavior() {
        let page = page();
        let behaviors = PageBehaviors::new(&page, &PageConfig::default()).unwrap();

        page.set_scroll_y(75.0);
        assert_eq!(
            behaviors.dispatch(&page, PageEvent::Scroll),
            EventOutcome::Scrolled { scrolled: true }
        );
        assert_eq!(
            behaviors.dispatch(&page, PageEvent::Click(NodeId(1))),
            EventOutcome::MenuToggled { active: true }
        );
        assert_eq!(
            behaviors.dispatch(&page, PageEvent::PointerEnter(NodeId(2))),
            EventOutcome::Hovered
        );

        page.set_value(&NodeId(4), "0612");
        assert_eq!(
            behaviors.dispatch(&page, PageEvent::Input(NodeId(4))),
            EventOutcome::PhoneFormatted("06 12".to_string())
        );
        assert_eq!(
            behaviors.dispatch(&page, PageEvent::Submit(NodeId(3))),
            EventOutcome::Submit(SubmitDecision::Allow)
        );
    }

    #[test]
    fn events_on_unbound_targets_are_ignored() {
        let page = page();
        let behaviors = PageBehaviors::new(&page, &PageConfig::default()).unwrap();
        assert_eq!(behaviors.dispatch(&page, PageEvent::Click(NodeId(2))), EventOutcome::Ignored);
        assert_eq!(
            behaviors.dispatch(&page, PageEvent::PointerLeave(NodeId(1))),
            EventOutcome::Ignored
        );
        assert_eq!(behaviors.dispatch(&page, PageEvent::Change(NodeId(4))), EventOutcome::Ignored);
        assert_eq!(behaviors.dispatch(&page, PageEvent::Submit(NodeId(0))), EventOutcome::Ignored);
        assert!(!page.has_class(&NodeId(2), "active"));
    }

    #[test]
    fn invalid_config_builds_nothing() {
        let page = page();
        let mut config = PageConfig::default();
        config.nav_links.selector = "nav > a".to_string();
        assert!(matches!(
            PageBehaviors::new(&page, &config),
            Err(ConfigError::Selector { field: "nav_links.selector", .. })
        ));
    }
}
