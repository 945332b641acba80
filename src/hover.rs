//! Pointer hover transforms for cards, skill bars and social buttons.

use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, MouseEvent};

use crate::dom;

/// Elements matching `selector` and the transforms applied on enter / leave.
/// With `inner` set, the transform targets that descendant instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoverRule {
    pub selector: &'static str,
    pub inner: Option<&'static str>,
    pub enter: &'static str,
    pub leave: &'static str,
}

pub const RULES: &[HoverRule] = &[
    HoverRule {
        selector: ".project-card",
        inner: None,
        enter: "translateY(-10px) scale(1.02)",
        leave: "translateY(0) scale(1)",
    },
    HoverRule {
        selector: ".skill-item",
        inner: Some(".progress-bar"),
        enter: "scaleY(1.2)",
        leave: "scaleY(1)",
    },
    HoverRule {
        selector: ".social-links .btn",
        inner: None,
        enter: "translateY(-5px) rotate(5deg)",
        leave: "translateY(0) rotate(0deg)",
    },
];

fn transform_target(host: &HtmlElement, inner: Option<&str>) -> Option<HtmlElement> {
    use wasm_bindgen::JsCast;
    match inner {
        None => Some(host.clone()),
        Some(sel) => host
            .query_selector(sel)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok()),
    }
}

fn wire(rule: &'static HoverRule) -> Result<(), JsValue> {
    for host in dom::query_all(rule.selector)? {
        for (event, transform) in [("mouseenter", rule.enter), ("mouseleave", rule.leave)] {
            let this = host.clone();
            dom::listen(&host, event, move |_: MouseEvent| {
                if let Some(el) = transform_target(&this, rule.inner) {
                    dom::set_style(&el, "transform", transform);
                }
            })?;
        }
    }
    Ok(())
}

pub fn init() -> Result<(), JsValue> {
    for rule in RULES {
        wire(rule)?;
    }
    Ok(())
}
