//! The seam between behaviors and a concrete document.
//!
//! Behaviors never touch the browser directly. They hold element handles
//! resolved at init and mutate them through a [`Page`], so the same handler
//! runs against `web-sys` in the browser and against
//! [`MemoryPage`](crate::platform::memory::MemoryPage) in tests.

use std::fmt::Debug;

use crate::selector::Selector;

pub trait Page {
    type Element: Clone + PartialEq + Debug;

    /// All matching elements in document order.
    fn query_all(&self, selector: &Selector) -> Vec<Self::Element>;

    fn query_first(&self, selector: &Selector) -> Option<Self::Element> {
        self.query_all(selector).into_iter().next()
    }

    /// Matching descendants of `root`, excluding `root` itself.
    fn query_within(&self, root: &Self::Element, selector: &Selector) -> Vec<Self::Element>;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    fn scroll_y(&self) -> f64;

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    /// Adds or removes `class`. Repeated calls with the same arguments are no-ops.
    fn set_class(&self, element: &Self::Element, class: &str, present: bool);

    /// Flips `class` and returns whether it is now present.
    fn toggle_class(&self, element: &Self::Element, class: &str) -> bool {
        let present = !self.has_class(element, class);
        self.set_class(element, class, present);
        present
    }

    /// Sets one inline style property.
    fn set_style(&self, element: &Self::Element, property: &str, value: &str);

    /// Current value of a form field; empty for other elements.
    fn value(&self, element: &Self::Element) -> String;

    fn set_value(&self, element: &Self::Element, value: &str);

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str);

    /// Number of files currently selected in a file input.
    fn selected_file_count(&self, element: &Self::Element) -> usize;

    /// Blocking notification to the user.
    fn alert(&self, message: &str);
}
