//! Project grid filtering driven by the `.project-filters` button group.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, MouseEvent};

use crate::dom;

pub const ALL: &str = "all";

/// Whether an item tagged `category` stays visible under `filter`.
pub fn matches(filter: &str, category: Option<&str>) -> bool {
    filter == ALL || category == Some(filter)
}

pub fn init() -> Result<(), JsValue> {
    let buttons = Rc::new(dom::query_all(".project-filters .btn")?);
    let items = Rc::new(dom::query_all("#projects-grid [data-category]")?);
    for button in buttons.iter() {
        let buttons = buttons.clone();
        let items = items.clone();
        let this = button.clone();
        dom::listen(button, "click", move |_: MouseEvent| {
            let filter = this.get_attribute("data-filter").unwrap_or_default();
            select(&buttons, &this);
            apply(&items, &filter);
        })?;
    }
    Ok(())
}

fn select(buttons: &[HtmlElement], chosen: &HtmlElement) {
    for b in buttons {
        dom::set_class(b, "active", false);
    }
    dom::set_class(chosen, "active", true);
}

/// Show matching items, hide the rest. Applying the same filter twice is a no-op.
pub fn apply(items: &[HtmlElement], filter: &str) {
    for item in items {
        let category = item.get_attribute("data-category");
        let show = matches(filter, category.as_deref());
        dom::set_style(item, "display", if show { "block" } else { "none" });
        dom::set_class(item, "animate-in", show);
    }
}
