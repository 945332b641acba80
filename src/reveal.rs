//! Effects that start once an element scrolls into view: number counters,
//! skill progress bars, and the generic `animate-in` reveal. Also the staggered
//! `loading`/`loaded` classes applied right after startup.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::RevealSettings;
use crate::dom;
use crate::timer::set_timeout;

pub const REVEAL_SELECTOR: &str = ".stat-item, .tech-card, .project-card, .contact-item";

// --- Counter animation -------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterFrame {
    /// Intermediate value, floored.
    Running(i64),
    /// Final frame; always exactly the target.
    Done(i64),
}

/// Fixed-step count-up from 0 to `target`.
#[derive(Clone, Debug)]
pub struct CounterAnimation {
    target: i64,
    increment: f64,
    current: f64,
}

impl CounterAnimation {
    pub fn new(target: i64, duration_ms: f64, frame_ms: f64) -> Self {
        // Zero, negative or non-finite timings collapse to a single step.
        let steps = duration_ms / frame_ms;
        let steps = if steps.is_finite() { steps.max(1.0) } else { 1.0 };
        Self {
            target,
            increment: target as f64 / steps,
            current: 0.0,
        }
    }

    pub fn next_frame(&mut self) -> CounterFrame {
        self.current += self.increment;
        if self.current < self.target as f64 {
            CounterFrame::Running(self.current.floor() as i64)
        } else {
            CounterFrame::Done(self.target)
        }
    }
}

/// Remembers which counters have started so each runs at most once, however
/// often it re-enters the viewport.
#[derive(Clone, Debug, Default)]
pub struct CounterGate {
    started: HashSet<usize>,
}

impl CounterGate {
    /// True the first time `idx` is seen, false afterwards.
    pub fn start(&mut self, idx: usize) -> bool {
        self.started.insert(idx)
    }
}

/// `data-target` the way `parseInt` reads it: leading integer, trailing junk ignored.
pub fn parse_target(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let end = s
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s[..end].parse().ok()
}

/// `data-width` as a CSS width; a missing attribute means an empty bar.
pub fn width_percent(raw: Option<&str>) -> String {
    format!("{}%", raw.unwrap_or("0").trim())
}

// --- Observers ---------------------------------------------------------------

type EntryHandler = dyn FnMut(HtmlElement, &IntersectionObserver);

/// Observe `targets`; `on_visible` runs for each entry that intersects.
fn observe(targets: &[HtmlElement], threshold: f64, on_visible: Box<EntryHandler>) -> Result<(), JsValue> {
    let mut on_visible = on_visible;
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else { continue };
            if !entry.is_intersecting() {
                continue;
            }
            if let Ok(el) = entry.target().dyn_into::<HtmlElement>() {
                on_visible(el, &observer);
            }
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let opts = IntersectionObserverInit::new();
    opts.set_threshold(&JsValue::from_f64(threshold));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &opts)?;
    callback.forget();
    for el in targets {
        observer.observe(el);
    }
    Ok(())
}

pub fn init_counters(s: &RevealSettings) -> Result<(), JsValue> {
    let mut counters = Vec::new();
    for el in dom::query_all(".counter")? {
        let raw = el.get_attribute("data-target").unwrap_or_default();
        if parse_target(&raw).is_some() {
            counters.push(el);
        } else {
            dom::warn(&format!("counter: ignoring non-integer data-target {raw:?}"));
        }
    }
    let (duration, frame) = (s.counter_duration_ms, s.frame_ms);
    let mut gate = CounterGate::default();
    let counters_ref = Rc::new(counters);
    let index_of = counters_ref.clone();
    observe(
        &counters_ref,
        s.counter_threshold,
        Box::new(move |el: HtmlElement, observer: &IntersectionObserver| {
            observer.unobserve(&el);
            let Some(idx) = index_of.iter().position(|c| c == &el) else { return };
            if !gate.start(idx) {
                return;
            }
            let target = el
                .get_attribute("data-target")
                .and_then(|raw| parse_target(&raw))
                .unwrap_or(0);
            run_counter(el, CounterAnimation::new(target, duration, frame));
        }),
    )
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// One counter step per animation frame until the final frame.
fn run_counter(el: HtmlElement, mut anim: CounterAnimation) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        match anim.next_frame() {
            CounterFrame::Running(v) => {
                el.set_text_content(Some(&v.to_string()));
                if let (Some(w), Some(cb)) = (web_sys::window(), f.borrow().as_ref()) {
                    let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
                }
            }
            CounterFrame::Done(v) => {
                el.set_text_content(Some(&v.to_string()));
                // Drop our own closure; the animation is over.
                let _ = f.borrow_mut().take();
            }
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (web_sys::window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn init_progress_bars(s: &RevealSettings) -> Result<(), JsValue> {
    let bars = dom::query_all(".progress-bar")?;
    let delay = s.progress_delay_ms;
    observe(
        &bars,
        s.progress_threshold,
        Box::new(move |el: HtmlElement, observer: &IntersectionObserver| {
            let width = width_percent(el.get_attribute("data-width").as_deref());
            dom::set_style(&el, "width", "0%");
            let bar = el.clone();
            if let Err(e) = set_timeout(delay, move || dom::set_style(&bar, "width", &width)) {
                dom::error(&format!("progress bar: {e:?}"));
            }
            observer.unobserve(&el);
        }),
    )
}

pub fn init_scroll_reveal(s: &RevealSettings) -> Result<(), JsValue> {
    let targets = dom::query_all(REVEAL_SELECTOR)?;
    observe(
        &targets,
        s.reveal_threshold,
        Box::new(|el: HtmlElement, _: &IntersectionObserver| {
            dom::set_class(&el, "animate-in", true)
        }),
    )
}

/// Delay before element `index` of the reveal set gets `loaded`.
pub fn stagger_delay(index: usize, step_ms: i32) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX).saturating_mul(step_ms)
}

pub fn init_loading_stagger(s: &RevealSettings) -> Result<(), JsValue> {
    for (i, el) in dom::query_all(REVEAL_SELECTOR)?.into_iter().enumerate() {
        dom::set_class(&el, "loading", true);
        set_timeout(stagger_delay(i, s.stagger_ms), move || {
            dom::set_class(&el, "loaded", true)
        })?;
    }
    Ok(())
}
