//! Browser entry point: binds the page's DOM events to the controller.

use std::cell::RefCell;
use std::rc::Rc;

use fitcheck_ui::{DomView, ElementIds, PageElements, ViewError, notice_id_of};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, EventTarget, File, HtmlInputElement, KeyboardEvent};

use crate::config::AppConfig;
use crate::wasm_file::{image_file, read_file};
use crate::{FitcheckApp, HttpClient, Message, Task, perform};

type App = FitcheckApp<HttpClient, DomView>;
type SharedApp = Rc<RefCell<App>>;

/// How often notices are checked for expiry
const TICK_INTERVAL_MS: i32 = 250;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let config = AppConfig::load_from_local_storage().unwrap_or_default();
    if let Err(e) = console_log::init_with_level(config.log_level.to_level()) {
        web_sys::console::warn_1(&format!("Logger already initialized: {}", e).into());
    }

    match mount(&config) {
        Ok(()) => log::info!("{} ready", config.app_name),
        Err(e) => log::error!("{} failed to start: {}", config.app_name, e),
    }
}

/// Look up the page, build the controller and bind every event.
fn mount(config: &AppConfig) -> Result<(), ViewError> {
    let window = web_sys::window().ok_or(ViewError::NoDocument)?;
    let document = window.document().ok_or(ViewError::NoDocument)?;
    let elements = PageElements::from_document(&document, &ElementIds::default())?;

    let origin = window.location().origin().unwrap_or_default();
    let client = HttpClient::new(&config.base_url_or(&origin), &config.api);
    let app: SharedApp = Rc::new(RefCell::new(FitcheckApp::new(
        client,
        DomView::new(elements.clone()),
        config,
    )));

    // The file behind the current selection, for uploads that need their
    // own read
    let accepted: Rc<RefCell<Option<File>>> = Rc::new(RefCell::new(None));

    // Image intake
    {
        let app = app.clone();
        let accepted = accepted.clone();
        listen(&elements.image_upload, "change", move |event: Event| {
            let file = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));
            let task = dispatch(&app, Message::ImageSelected(file.as_ref().map(image_file)));
            if let (Task::ReadImage { ticket, .. }, Some(file)) = (task, file) {
                *accepted.borrow_mut() = Some(file.clone());
                let app = app.clone();
                read_file(&file, move |result| {
                    dispatch(&app, Message::ImageRead { ticket, result });
                });
            }
        });
    }

    // Analysis
    {
        let app = app.clone();
        listen(&elements.analyze_button, "click", move |_| {
            let Task::ReadUpload { ticket, file } = dispatch(&app, Message::AnalyzeRequested) else {
                return;
            };
            let app = app.clone();
            let on_done = move |result| {
                dispatch(
                    &app,
                    Message::UploadRead {
                        ticket,
                        file,
                        result,
                    },
                );
            };
            match accepted.borrow().as_ref() {
                Some(source) => read_file(source, on_done),
                None => on_done(Err("No file to upload".to_string())),
            }
        });
    }

    // Chat
    {
        let app = app.clone();
        listen(&elements.send_button, "click", move |_| {
            dispatch(&app, Message::SendRequested);
        });
    }
    {
        let app = app.clone();
        listen(&elements.chat_input, "keypress", move |event: Event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
                dispatch(&app, Message::KeyPressed(key));
            }
        });
    }

    // Chat panel toggle
    {
        let app = app.clone();
        listen(&elements.chat_toggle, "click", move |_| {
            dispatch(&app, Message::ToggleChatPanel);
        });
    }

    // Notice close buttons
    {
        let app = app.clone();
        listen(&elements.body, "click", move |event: Event| {
            let id = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| notice_id_of(&el));
            if let Some(id) = id {
                dispatch(&app, Message::DismissNotice(id));
            }
        });
    }

    // Notice expiry
    let tick = Closure::wrap(Box::new(move || {
        dispatch(&app, Message::Tick);
    }) as Box<dyn FnMut()>);
    if let Err(e) = window.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        TICK_INTERVAL_MS,
    ) {
        log::warn!("Failed to start notice timer: {:?}", e);
    }
    tick.forget();

    Ok(())
}

/// Apply a message. Network tasks are started here; a file read is handed
/// back to the caller, who holds the `File`.
fn dispatch(app: &SharedApp, message: Message) -> Task {
    let task = app.borrow_mut().update(message);
    match task {
        Task::Analyze(_) | Task::Chat { .. } => {
            spawn(app.clone(), task);
            Task::None
        }
        other => other,
    }
}

fn spawn(app: SharedApp, task: Task) {
    let client = app.borrow().client().clone();
    wasm_bindgen_futures::spawn_local(async move {
        if let Ok(message) = perform(&client, task).await {
            dispatch(&app, message);
        }
    });
}

fn listen<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::error!("Failed to bind {} listener: {:?}", event, e);
    }
    closure.forget(); // Leak the closure to keep it alive
}
