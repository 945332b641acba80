//! Scroll-driven effects (navbar elevation, back-to-top, hero parallax) and
//! smooth in-page anchor navigation.

use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlElement, MouseEvent};

use crate::config::ScrollSettings;
use crate::dom;

pub fn navbar_elevated(scroll_y: f64, s: &ScrollSettings) -> bool {
    scroll_y > s.navbar_threshold
}

pub fn back_to_top_visible(scroll_y: f64, s: &ScrollSettings) -> bool {
    scroll_y > s.back_to_top_threshold
}

pub fn parallax_transform(scroll_y: f64, s: &ScrollSettings) -> String {
    // `+ 0.0` folds -0 into 0 so the top of the page renders "translateY(0px)".
    format!("translateY({}px)", scroll_y * s.parallax_rate + 0.0)
}

/// Scroll destination for an anchor target, leaving room for the fixed header.
pub fn anchor_offset(target_top: f64, s: &ScrollSettings) -> f64 {
    target_top - s.header_offset
}

/// For each nav link href, whether it should carry `active` after navigating
/// to `target`. Matching is exact.
pub fn active_flags<'a>(hrefs: impl IntoIterator<Item = Option<&'a str>>, target: &str) -> Vec<bool> {
    hrefs.into_iter().map(|h| h == Some(target)).collect()
}

pub fn init_navbar(s: &ScrollSettings) -> Result<(), JsValue> {
    let Some(navbar) = dom::query(".navbar")? else {
        dom::warn("scroll: .navbar not found, elevation disabled");
        return Ok(());
    };
    let s = s.clone();
    let win = dom::win()?;
    dom::listen(&win, "scroll", move |_: Event| {
        dom::set_class(&navbar, "scrolled", navbar_elevated(dom::scroll_y(), &s));
    })
}

pub fn init_back_to_top(s: &ScrollSettings) -> Result<(), JsValue> {
    let Some(button) = dom::by_id("backToTop")? else {
        dom::warn("scroll: #backToTop not found");
        return Ok(());
    };
    let s = s.clone();
    let shown = button.clone();
    let win = dom::win()?;
    dom::listen(&win, "scroll", move |_: Event| {
        dom::set_class(&shown, "show", back_to_top_visible(dom::scroll_y(), &s));
    })?;
    dom::listen(&button, "click", move |_: MouseEvent| {
        if let Err(e) = dom::smooth_scroll_to(0.0) {
            dom::error(&format!("back-to-top: {e:?}"));
        }
    })
}

pub fn init_parallax(s: &ScrollSettings) -> Result<(), JsValue> {
    let hero = dom::query(".hero")?;
    let s = s.clone();
    let win = dom::win()?;
    dom::listen(&win, "scroll", move |_: Event| {
        if let Some(hero) = &hero {
            dom::set_style(hero, "transform", &parallax_transform(dom::scroll_y(), &s));
        }
    })
}

pub fn init_smooth_anchors(s: &ScrollSettings) -> Result<(), JsValue> {
    let nav_links = std::rc::Rc::new(dom::query_all(".navbar-nav .nav-link")?);
    for link in dom::query_all("a[href^=\"#\"]")? {
        let s = s.clone();
        let nav_links = nav_links.clone();
        dom::listen(&link.clone(), "click", move |e: MouseEvent| {
            e.prevent_default();
            let Some(href) = link.get_attribute("href") else { return };
            let target = match dom::query(&href) {
                Ok(Some(t)) => t,
                _ => return,
            };
            if let Err(e) = dom::smooth_scroll_to(anchor_offset(target.offset_top() as f64, &s)) {
                dom::error(&format!("anchor scroll: {e:?}"));
                return;
            }
            mark_active(&nav_links, &href);
        })?;
    }
    Ok(())
}

fn mark_active(links: &[HtmlElement], target: &str) {
    let hrefs: Vec<Option<String>> = links.iter().map(|l| l.get_attribute("href")).collect();
    let flags = active_flags(hrefs.iter().map(|h| h.as_deref()), target);
    for (link, on) in links.iter().zip(flags) {
        dom::set_class(link, "active", on);
    }
}
