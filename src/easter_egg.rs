//! Hidden features: the Konami key sequence and the double-click dark mode.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, KeyboardEvent, MouseEvent};

use crate::config::{NotificationSettings, Settings};
use crate::dom;
use crate::notify::{self, NotificationKind};
use crate::timer::{BrowserScheduler, Scheduler};

pub const KONAMI_MESSAGE: &str = "🎉 Konami Code Activated! You found the easter egg!";
pub const DARK_MESSAGE: &str = "🌙 Dark mode activated!";
pub const LIGHT_MESSAGE: &str = "☀️ Light mode activated!";
pub const RAINBOW_ANIMATION: &str = "rainbow 2s infinite";

/// Rolling window over the most recent key codes.
#[derive(Clone, Debug)]
pub struct KeySequence {
    target: Vec<u32>,
    recent: VecDeque<u32>,
}

impl KeySequence {
    pub fn new(target: Vec<u32>) -> Self {
        let recent = VecDeque::with_capacity(target.len());
        Self { target, recent }
    }

    /// Record a key press. Returns true when the window now equals the target;
    /// the window is cleared in that case.
    pub fn push(&mut self, code: u32) -> bool {
        if self.target.is_empty() {
            return false;
        }
        self.recent.push_back(code);
        while self.recent.len() > self.target.len() {
            self.recent.pop_front();
        }
        if self.recent.iter().eq(self.target.iter()) {
            self.recent.clear();
            return true;
        }
        false
    }

    pub fn buffered(&self) -> usize {
        self.recent.len()
    }
}

/// Page-wide dark mode flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DarkMode {
    on: bool,
}

impl DarkMode {
    pub fn is_on(self) -> bool {
        self.on
    }

    /// Flip the mode and return the confirmation text for the new state.
    pub fn toggle(&mut self) -> &'static str {
        self.on = !self.on;
        if self.on { DARK_MESSAGE } else { LIGHT_MESSAGE }
    }
}

/// Links and buttons keep their own double-click behavior.
pub fn dblclick_toggles(tag_name: &str) -> bool {
    !tag_name.eq_ignore_ascii_case("A") && !tag_name.eq_ignore_ascii_case("BUTTON")
}

/// Key-sequence easter egg: on a match shows a toast and runs the rainbow
/// animation on `<body>` for `rainbow_ms`.
pub struct KonamiEgg {
    sequence: KeySequence,
    toast: NotificationSettings,
    rainbow_ms: i32,
}

impl KonamiEgg {
    pub fn new(settings: &Settings) -> Self {
        Self {
            sequence: KeySequence::new(settings.key_sequence.clone()),
            toast: settings.notification.clone(),
            rainbow_ms: settings.rainbow_ms,
        }
    }

    /// Feed one key code. Returns whether the sequence fired.
    pub fn on_key<S: Scheduler>(&mut self, code: u32, scheduler: &S) -> Result<bool, JsValue> {
        if !self.sequence.push(code) {
            return Ok(false);
        }
        notify::show_with(KONAMI_MESSAGE, NotificationKind::Success, &self.toast, scheduler)?;
        let body = dom::body()?;
        dom::set_style(&body, "animation", RAINBOW_ANIMATION);
        scheduler.schedule(
            self.rainbow_ms,
            Box::new(move || dom::set_style(&body, "animation", "")),
        );
        Ok(true)
    }
}

pub fn init_key_sequence(settings: &Settings) -> Result<(), JsValue> {
    let egg = RefCell::new(KonamiEgg::new(settings));
    let doc = dom::doc()?;
    dom::listen(&doc, "keydown", move |e: KeyboardEvent| {
        if let Err(err) = egg.borrow_mut().on_key(e.key_code(), &BrowserScheduler) {
            dom::error(&format!("easter egg: {err:?}"));
        }
    })
}

pub fn init_dark_mode(settings: &Settings) -> Result<(), JsValue> {
    let mode = Rc::new(Cell::new(DarkMode::default()));
    let toast = settings.notification.clone();
    let doc = dom::doc()?;
    dom::listen(&doc, "dblclick", move |e: MouseEvent| {
        let tag = e
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .map(|el| el.tag_name())
            .unwrap_or_default();
        if !dblclick_toggles(&tag) {
            return;
        }
        let mut current = mode.get();
        let message = current.toggle();
        mode.set(current);
        if let Ok(body) = dom::body() {
            dom::set_class(&body, "dark-mode", current.is_on());
        }
        notify::show(message, NotificationKind::Success, &toast);
    })
}
