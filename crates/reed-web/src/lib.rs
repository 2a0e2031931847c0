//! Browser entry point for the REED page behaviors.

pub mod browser_page;
pub mod file_read;
pub mod logger;
pub mod wiring;

use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::DocumentReadyState;

use browser_page::BrowserPage;

/// Installs every behavior once the document is parsed.
pub fn start() {
    logger::init(logger::default_level());
    let Some(page) = BrowserPage::current() else {
        log::error!("[reed] No window or document, nothing to attach to");
        return;
    };
    if page.document().ready_state() != DocumentReadyState::Loading {
        run(page);
        return;
    }
    let document = page.document().clone();
    let on_ready = Closure::once(move || run(page));
    if let Err(error) = document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
    {
        log::error!("[reed] Failed to wait for DOMContentLoaded: {error:?}");
    }
    on_ready.forget();
}

fn run(page: BrowserPage) {
    if let Err(error) = install(page) {
        log::error!("[reed] Failed to install page behaviors: {error:?}");
    }
}

fn install(page: BrowserPage) -> Result<(), JsValue> {
    let config = wiring::load_config(page.document());
    let app = wiring::App::new(page, &config)?;
    wiring::install(&app)
}
