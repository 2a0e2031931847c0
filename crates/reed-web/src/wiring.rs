//! Attaches the page behaviors to DOM events.
//!
//! Listeners live as long as the page, so their closures are leaked with
//! `forget`. Image reads run as droppable zoon tasks, one slot per bound
//! input: starting a new read drops the previous task for that input.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use reed::behaviors::{Completion, Pointer, PreviewRequest};
use reed::{PageBehaviors, PageConfig};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, EventTarget};
use zoon::{Task, TaskHandle};

use crate::browser_page::BrowserPage;
use crate::file_read::read_as_data_url;

/// Id of the optional `<script type="application/json">` holding a [`PageConfig`].
pub const CONFIG_SCRIPT_ID: &str = "reed-config";

pub struct App {
    page: BrowserPage,
    behaviors: PageBehaviors<BrowserPage>,
    reads: RefCell<HashMap<usize, TaskHandle>>,
}

impl App {
    pub fn new(page: BrowserPage, config: &PageConfig) -> Result<Rc<Self>, JsValue> {
        let behaviors = PageBehaviors::new(&page, config)
            .map_err(|error| JsValue::from_str(&error.to_string()))?;
        Ok(Rc::new(Self {
            page,
            behaviors,
            reads: RefCell::new(HashMap::new()),
        }))
    }

    pub fn page(&self) -> &BrowserPage {
        &self.page
    }

    pub fn behaviors(&self) -> &PageBehaviors<BrowserPage> {
        &self.behaviors
    }
}

/// Reads the page config block, falling back to defaults when it is
/// missing or invalid.
pub fn load_config(document: &Document) -> PageConfig {
    let Some(json) = document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|script| script.text_content())
    else {
        return PageConfig::default();
    };
    match PageConfig::from_json(&json) {
        Ok(config) => config,
        Err(error) => {
            log::error!("[reed] Ignoring #{CONFIG_SCRIPT_ID}: {error}");
            PageConfig::default()
        }
    }
}

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn install(app: &Rc<App>) -> Result<(), JsValue> {
    let behaviors = &app.behaviors;

    listen(app.page.window(), "scroll", {
        let app = app.clone();
        move |_| {
            app.behaviors.scroll_watcher().on_scroll(&app.page);
        }
    })?;

    for link in behaviors.nav_hover().links() {
        for (event, pointer) in [("mouseenter", Pointer::Enter), ("mouseleave", Pointer::Leave)] {
            listen(link, event, {
                let app = app.clone();
                let link = link.clone();
                move |_| {
                    app.behaviors.nav_hover().on_pointer(&app.page, &link, pointer);
                }
            })?;
        }
    }

    if let Some(toggler) = behaviors.menu_toggle().toggler() {
        listen(toggler, "click", {
            let app = app.clone();
            move |_| {
                app.behaviors.menu_toggle().on_click(&app.page);
            }
        })?;
    }

    for input in behaviors.phone_formatter().inputs() {
        listen(input, "input", {
            let app = app.clone();
            let input = input.clone();
            move |_| {
                app.behaviors.phone_formatter().on_input(&app.page, &input);
            }
        })?;
    }

    for (slot, input) in behaviors.image_preview().inputs().iter().enumerate() {
        listen(input, "change", {
            let app = app.clone();
            let input = input.clone();
            move |_| {
                if let Some(request) = app.behaviors.image_preview().on_change(&app.page, &input) {
                    start_read(&app, slot, request);
                }
            }
        })?;
    }

    for form in behaviors.form_validator().forms() {
        listen(form, "submit", {
            let app = app.clone();
            let form = form.clone();
            move |event| {
                if app.behaviors.form_validator().on_submit(&app.page, &form).is_blocked() {
                    event.prevent_default();
                }
            }
        })?;
    }

    Ok(())
}

fn start_read(app: &Rc<App>, slot: usize, request: PreviewRequest<Element>) {
    let Some(file) = app.page.first_file(&request.input) else {
        return;
    };
    let app_weak: Weak<App> = Rc::downgrade(app);
    let handle = Task::start_droppable(async move {
        let result = read_as_data_url(file).await;
        let Some(app) = app_weak.upgrade() else {
            return;
        };
        match result {
            Ok(data_url) => {
                let completion = app.behaviors.complete_preview(&app.page, &request, &data_url);
                if completion == Completion::Stale {
                    log::debug!("[reed] Preview read #{} superseded", request.generation());
                }
            }
            Err(error) => log::warn!("[reed] Preview read failed: {error:?}"),
        }
    });
    // Replacing the handle drops, and so cancels, the previous read of this input.
    app.reads.borrow_mut().insert(slot, handle);
}
