//! [`Page`] over the live browser document.

use reed::{Page, Selector};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, File, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
    NodeList, Window,
};

pub struct BrowserPage {
    window: Window,
    document: Document,
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn report(operation: &str, result: Result<(), JsValue>) {
    if let Err(error) = result {
        log::warn!("[BrowserPage] {operation} failed: {error:?}");
    }
}

impl BrowserPage {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    /// The page of the current window, if there is one with a document.
    pub fn current() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self::new(window, document))
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn first_file(&self, element: &Element) -> Option<File> {
        element.dyn_ref::<HtmlInputElement>()?.files()?.get(0)
    }
}

impl Page for BrowserPage {
    type Element = Element;

    fn query_all(&self, selector: &Selector) -> Vec<Element> {
        match self.document.query_selector_all(selector.as_css()) {
            Ok(list) => elements(list),
            Err(error) => {
                log::warn!("[BrowserPage] querySelectorAll(`{selector}`) failed: {error:?}");
                Vec::new()
            }
        }
    }

    fn query_within(&self, root: &Element, selector: &Selector) -> Vec<Element> {
        match root.query_selector_all(selector.as_css()) {
            Ok(list) => elements(list),
            Err(error) => {
                log::warn!("[BrowserPage] querySelectorAll(`{selector}`) failed: {error:?}");
                Vec::new()
            }
        }
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn set_class(&self, element: &Element, class: &str, present: bool) {
        let classes = element.class_list();
        let result = if present { classes.add_1(class) } else { classes.remove_1(class) };
        report("classList update", result);
    }

    fn toggle_class(&self, element: &Element, class: &str) -> bool {
        match element.class_list().toggle(class) {
            Ok(present) => present,
            Err(error) => {
                log::warn!("[BrowserPage] classList.toggle failed: {error:?}");
                self.has_class(element, class)
            }
        }
    }

    fn set_style(&self, element: &Element, property: &str, value: &str) {
        if let Some(element) = element.dyn_ref::<HtmlElement>() {
            report("style update", element.style().set_property(property, value));
        }
    }

    fn value(&self, element: &Element) -> String {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(text_area) = element.dyn_ref::<HtmlTextAreaElement>() {
            text_area.value()
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }

    fn set_value(&self, element: &Element, value: &str) {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(text_area) = element.dyn_ref::<HtmlTextAreaElement>() {
            text_area.set_value(value);
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        }
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) {
        report("setAttribute", element.set_attribute(name, value));
    }

    fn selected_file_count(&self, element: &Element) -> usize {
        element
            .dyn_ref::<HtmlInputElement>()
            .and_then(HtmlInputElement::files)
            .map_or(0, |files| files.length() as usize)
    }

    fn alert(&self, message: &str) {
        report("alert", self.window.alert_with_message(message));
    }
}
