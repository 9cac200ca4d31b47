//! WASM file reading utilities.
//!
//! Reads a picked `File` with the browser's FileReader and hands the raw
//! bytes to a callback.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, File, FileReader};

use crate::model::ImageFile;

/// Metadata of a browser `File`.
pub fn image_file(file: &File) -> ImageFile {
    ImageFile::new(file.name(), file.type_(), file.size() as u64)
}

/// Read `file` and call `on_done` exactly once with its bytes or an error.
pub fn read_file<F>(file: &File, on_done: F)
where
    F: FnOnce(Result<Vec<u8>, String>) + 'static,
{
    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            on_done(Err(format!("Failed to create FileReader: {:?}", e)));
            return;
        }
    };

    let callback: Rc<RefCell<Option<F>>> = Rc::new(RefCell::new(Some(on_done)));

    let name = file.name();
    let on_load = {
        let callback = callback.clone();
        let name = name.clone();
        Closure::wrap(Box::new(move |event: Event| {
            let result = event
                .target()
                .and_then(|t| t.dyn_into::<FileReader>().ok())
                .ok_or_else(|| "FileReader event without reader".to_string())
                .and_then(|reader| {
                    reader
                        .result()
                        .map_err(|e| format!("FileReader result unavailable: {:?}", e))
                })
                .map(|buffer| js_sys::Uint8Array::new(&buffer).to_vec());
            if let Ok(bytes) = &result {
                log::info!("📂 File {} read: {} bytes", name, bytes.len());
            }
            complete(&callback, result);
        }) as Box<dyn FnMut(Event)>)
    };

    let on_error = {
        let callback = callback.clone();
        Closure::wrap(Box::new(move |_event: Event| {
            complete(&callback, Err(format!("Failed to read {}", name)));
        }) as Box<dyn FnMut(Event)>)
    };

    reader.set_onload(Some(on_load.as_ref().unchecked_ref()));
    reader.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    on_load.forget(); // Leak the closures to keep them alive
    on_error.forget();

    if let Err(e) = reader.read_as_array_buffer(file) {
        complete(&callback, Err(format!("Failed to start reading: {:?}", e)));
    }
}

fn complete<F>(callback: &Rc<RefCell<Option<F>>>, result: Result<Vec<u8>, String>)
where
    F: FnOnce(Result<Vec<u8>, String>),
{
    // Release the borrow before calling out
    let f = callback.borrow_mut().take();
    if let Some(f) = f {
        f(result);
    }
}
