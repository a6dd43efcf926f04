//! The counter on a real page, driven through the bridge.

use std::cell::RefCell;

use tracing::error;

use crate::bridge::{self, JsType, WapRc};
use crate::config::CounterConfig;
use crate::counter::CounterBinder;
use crate::dom::Document;
use crate::error::Result;
use crate::logging;

/// `window.document` plus the module exports its listeners point at.
pub struct WapDocument {
    document: WapRc,
    exports: WapRc,
}

impl WapDocument {
    pub fn new(window: &WapRc) -> Result<Self> {
        let document = bridge::get(window, "document").into_ref("document")?;
        let exports = bridge::get(&bridge::webassembly_instance(), "exports").into_ref("exports")?;
        Ok(WapDocument { document, exports })
    }

    fn export(&self, name: &str) -> Result<WapRc> {
        bridge::get(&self.exports, name).into_ref(name)
    }

    fn listen(&self, target: &WapRc, event: &str, export: &str) -> Result<()> {
        let handler = self.export(export)?;
        bridge::method_call(target, "addEventListener", &[event.into(), handler.into()])?;
        Ok(())
    }
}

impl Document for WapDocument {
    type Element = WapRc;

    fn element_by_id(&self, id: &str) -> Result<Option<WapRc>> {
        match bridge::method_call(&self.document, "getElementById", &[id.into()])? {
            JsType::Ref(element) => Ok(Some(element)),
            _ => Ok(None),
        }
    }

    fn set_text(&self, element: &WapRc, text: &str) -> Result<()> {
        bridge::set_string(element, "innerText", text);
        Ok(())
    }

    fn add_click_listener(&self, element: &WapRc) -> Result<()> {
        self.listen(element, "click", "wap_counter_click")
    }

    fn is_loading(&self) -> Result<bool> {
        let state = bridge::get(&self.document, "readyState").into_string("readyState")?;
        Ok(state == "loading")
    }

    fn add_ready_listener(&self) -> Result<()> {
        self.listen(&self.document, "DOMContentLoaded", "wap_counter_ready")
    }
}

struct Page {
    doc: WapDocument,
    binder: CounterBinder,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = RefCell::new(None);
}

/// Set up the counter on `window`'s page. Binds straight away if the page is already
/// parsed, otherwise on `DOMContentLoaded`.
pub fn start(window: WapRc, config: CounterConfig) -> Result<()> {
    if cfg!(feature = "console-log") {
        logging::init(config.log_level);
    }

    let doc = WapDocument::new(&window)?;
    let mut binder = CounterBinder::new(config);
    // nothing the binder calls dispatches synchronously, so no callback can miss PAGE
    let attached = binder.attach(&doc);
    PAGE.with(|p| *p.borrow_mut() = Some(Page { doc, binder }));
    attached.map(|_| ())
}

fn with_page<T>(event: &str, f: impl FnOnce(&mut Page) -> Result<T>) {
    PAGE.with(|p| match p.borrow_mut().as_mut() {
        Some(page) => {
            if let Err(e) = f(page) {
                error!(event, "{}", e);
            }
        }
        None => error!(event, "counter not started"),
    });
}

/// Not to be called directly.
/// `DOMContentLoaded` listener registered by `start`.
#[no_mangle]
pub extern "C" fn wap_counter_ready() {
    with_page("ready", |page| page.binder.on_ready(&page.doc));
}

/// Not to be called directly.
/// Click listener attached to the button.
#[no_mangle]
pub extern "C" fn wap_counter_click() {
    with_page("click", |page| page.binder.on_click(&page.doc));
}
