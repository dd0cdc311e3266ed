// Browser entry: each setup view loads the module and calls `mount_setup_page("<page>")`.

use crate::dom::listeners::ListenerSet;
use crate::dom::web::WebDocument;
use crate::dom::PageDom;
use crate::models::layout::PageLayout;
use crate::models::page::PageKind;
use crate::pages::PageController;
use crate::utils;
use log::{error, info};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

thread_local! {
    static PAGE: RefCell<Option<(PageController, WebDocument)>> = const { RefCell::new(None) };
    static LISTENERS: RefCell<ListenerSet<Listener>> = const { RefCell::new(ListenerSet::new()) };
}

type Listener = (web_sys::EventTarget, &'static str, Closure<dyn FnMut(web_sys::Event)>);

fn listen(
    target: web_sys::EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
) -> Result<(), JsValue> {
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    LISTENERS.with(|l| l.borrow_mut().push((target, event, callback)));
    Ok(())
}

/// Remove the listeners of an earlier mount so its handlers stop firing.
fn detach_listeners() {
    let removed = LISTENERS.with(|l| {
        l.borrow_mut().detach_all(|(target, event, callback)| {
            if let Err(e) =
                target.remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            {
                error!("[PHASE: mount] [STEP: detach] Could not remove {} listener: {:?}", event, e);
            }
        })
    });
    if removed > 0 {
        info!("[PHASE: mount] [STEP: detach] Removed {} listeners of the previous mount", removed);
    }
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn init_console_logging() {
    // Fails only when a logger is already installed (page mounted twice).
    let _ = fern::Dispatch::new()
        .level(log::LevelFilter::Info)
        .chain(fern::Output::call(|record| {
            let meta = utils::logging::parse_log_metadata(&record.args().to_string());
            let line = utils::logging::format_human_readable_log(
                &chrono::Local::now().format("%H:%M:%S%.3f").to_string(),
                record.level(),
                record.target(),
                &meta,
            );
            match record.level() {
                log::Level::Error => web_sys::console::error_1(&line.into()),
                log::Level::Warn => web_sys::console::warn_1(&line.into()),
                _ => web_sys::console::log_1(&line.into()),
            }
        }))
        .apply();
}

/// Mount the controller for `page` on the current document.
///
/// `layout_json` overrides element ids (same shape as the TOML layout, as JSON). Change handlers
/// are registered right away; the load handler runs on window `load`, or immediately when the
/// document has already finished loading.
#[wasm_bindgen]
pub fn mount_setup_page(page: &str, layout_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    init_console_logging();

    let kind: PageKind = page.parse().map_err(to_js)?;
    let layout = match layout_json {
        Some(json) => serde_json::from_str::<PageLayout>(&json).map_err(to_js)?,
        None => PageLayout::default(),
    };
    layout.validate().map_err(to_js)?;

    let mut dom = WebDocument::current().map_err(to_js)?;
    let controller = PageController::mount(kind, &layout, &mut dom).map_err(to_js)?;
    detach_listeners();

    for id in controller.change_targets() {
        let target = dom.get_element(&id).map_err(to_js)?;
        let source_id = id.clone();
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            dispatch_change(&source_id);
        }));
        listen(target.into(), "change", callback)?;
    }

    let already_loaded = dom.document().ready_state() == "complete";
    PAGE.with(|slot| *slot.borrow_mut() = Some((controller, dom)));

    if already_loaded {
        dispatch_load();
    } else {
        let window = web_sys::window().ok_or_else(|| to_js("window is unavailable"))?;
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            dispatch_load();
        }));
        listen(window.into(), "load", callback)?;
    }

    info!("[PHASE: {}] [STEP: mount] Browser handlers registered", kind);
    Ok(())
}

fn dispatch_load() {
    let href = match web_sys::window().map(|w| w.location().href()) {
        Some(Ok(href)) => href,
        _ => {
            error!("[PHASE: load] Could not read the page URL");
            return;
        }
    };

    PAGE.with(|slot| {
        let mut slot = slot.borrow_mut();
        let Some((controller, dom)) = slot.as_mut() else {
            return;
        };
        if let Err(e) = controller.on_load(dom, &href) {
            error!(
                "[PHASE: {}] [STEP: load] Load handler failed: {}",
                controller.kind(),
                e
            );
        }
    });
}

fn dispatch_change(element_id: &str) {
    PAGE.with(|slot| {
        let mut slot = slot.borrow_mut();
        let Some((controller, dom)) = slot.as_mut() else {
            return;
        };
        if let Err(e) = controller.on_change(dom, element_id) {
            error!(
                "[PHASE: {}] [STEP: change] Handler for #{} failed: {}",
                controller.kind(),
                element_id,
                e
            );
        }
    });
}
