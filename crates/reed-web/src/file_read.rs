//! `FileReader` as a future.
//!
//! Dropping the future before it resolves aborts the underlying read and
//! detaches its callbacks, so a cancelled task never hears back from it.

use std::cell::RefCell;
use std::rc::Rc;

use futures_channel::oneshot;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{File, FileReader};

type ReadResult = Result<String, JsValue>;

struct ReaderGuard {
    reader: FileReader,
    _on_load: Closure<dyn FnMut()>,
    _on_error: Closure<dyn FnMut()>,
}

impl Drop for ReaderGuard {
    fn drop(&mut self) {
        self.reader.set_onload(None);
        self.reader.set_onerror(None);
        if self.reader.ready_state() == FileReader::LOADING {
            self.reader.abort();
        }
    }
}

/// Reads `file` as a base64 `data:` URL.
pub async fn read_as_data_url(file: File) -> ReadResult {
    let reader = FileReader::new()?;
    let (sender, receiver) = oneshot::channel::<ReadResult>();
    let sender = Rc::new(RefCell::new(Some(sender)));

    let on_load = Closure::<dyn FnMut()>::new({
        let reader = reader.clone();
        let sender = sender.clone();
        move || {
            let result = reader.result().and_then(|value| {
                value
                    .as_string()
                    .ok_or_else(|| JsValue::from_str("FileReader result is not a string"))
            });
            if let Some(sender) = sender.borrow_mut().take() {
                let _ = sender.send(result);
            }
        }
    });
    let on_error = Closure::<dyn FnMut()>::new({
        let file_name = file.name();
        move || {
            if let Some(sender) = sender.borrow_mut().take() {
                let message = format!("failed to read `{file_name}`");
                let _ = sender.send(Err(JsValue::from_str(&message)));
            }
        }
    });
    reader.set_onload(Some(on_load.as_ref().unchecked_ref()));
    reader.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    let guard = ReaderGuard {
        reader,
        _on_load: on_load,
        _on_error: on_error,
    };
    guard.reader.read_as_data_url(&file)?;

    let result = receiver
        .await
        .unwrap_or_else(|_| Err(JsValue::from_str("FileReader finished without a result")));
    drop(guard);
    result
}
