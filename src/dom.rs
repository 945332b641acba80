//! Thin helpers over `web-sys` shared by the behavior modules: global lookups,
//! element-set capture, listener registration and console logging.

use wasm_bindgen::JsCast;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Window, window};

pub fn win() -> Result<Window, JsValue> {
    window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn doc() -> Result<Document, JsValue> {
    win()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn body() -> Result<HtmlElement, JsValue> {
    doc()?.body().ok_or_else(|| JsValue::from_str("no body"))
}

/// Snapshot of every element matching `selector` at call time. Elements added
/// later are not picked up.
pub fn query_all(selector: &str) -> Result<Vec<HtmlElement>, JsValue> {
    let list = doc()?.query_selector_all(selector)?;
    let mut out = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
            out.push(el);
        }
    }
    Ok(out)
}

/// First match for `selector`, or `None` when absent or the selector is invalid.
pub fn query(selector: &str) -> Result<Option<HtmlElement>, JsValue> {
    let found = doc()?.query_selector(selector).ok().flatten();
    Ok(found.and_then(|el| el.dyn_into::<HtmlElement>().ok()))
}

pub fn by_id(id: &str) -> Result<Option<HtmlElement>, JsValue> {
    Ok(doc()?
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok()))
}

/// Attach a listener for the lifetime of the page (the closure is leaked).
pub fn listen<E, F>(target: &web_sys::EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    el.style().set_property(property, value).ok();
}

pub fn set_class(el: &Element, class: &str, on: bool) {
    let list = el.class_list();
    if on {
        list.add_1(class).ok();
    } else {
        list.remove_1(class).ok();
    }
}

pub fn scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

pub fn smooth_scroll_to(top: f64) -> Result<(), JsValue> {
    let opts = web_sys::ScrollToOptions::new();
    opts.set_top(top);
    opts.set_behavior(web_sys::ScrollBehavior::Smooth);
    win()?.scroll_to_with_scroll_to_options(&opts);
    Ok(())
}

// Console logging. Native builds (unit tests) have no console to write to.

pub fn log(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

pub fn warn(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

pub fn error(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}
