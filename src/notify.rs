//! Transient toast notifications pinned to the top-right corner.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::config::NotificationSettings;
use crate::dom;
use crate::timer::{BrowserScheduler, Scheduler};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            NotificationKind::Success => "#28a745",
            NotificationKind::Error => "#dc3545",
        }
    }

    /// Font Awesome icon class.
    pub fn icon(self) -> &'static str {
        match self {
            NotificationKind::Success => "fas fa-check-circle",
            NotificationKind::Error => "fas fa-exclamation-circle",
        }
    }

    pub fn class_name(self) -> String {
        format!("notification notification-{}", self.as_str())
    }

    /// Inline style for a freshly created toast, parked off-screen to the right.
    pub fn css_text(self) -> String {
        format!(
            "position: fixed; top: 20px; right: 20px; background: {}; color: white; \
             padding: 1rem 1.5rem; border-radius: 8px; box-shadow: 0 5px 15px rgba(0,0,0,0.2); \
             z-index: 10000; transform: translateX(100%); transition: transform 0.3s ease; \
             max-width: 300px;",
            self.background()
        )
    }
}

/// Delay from creation until the toast leaves the page.
pub fn removal_delay(timing: &NotificationSettings) -> i32 {
    timing.visible_ms.saturating_add(timing.exit_ms)
}

pub const OFFSCREEN: &str = "translateX(100%)";
pub const ONSCREEN: &str = "translateX(0)";

/// Show a toast. Fire-and-forget: failures are logged, never returned.
pub fn show(message: &str, kind: NotificationKind, timing: &NotificationSettings) {
    if let Err(e) = show_with(message, kind, timing, &BrowserScheduler) {
        dom::error(&format!("notification: {e:?}"));
    }
}

pub fn show_with<S: Scheduler>(
    message: &str,
    kind: NotificationKind,
    timing: &NotificationSettings,
    scheduler: &S,
) -> Result<(), JsValue> {
    let doc = dom::doc()?;
    let toast: web_sys::HtmlElement = doc.create_element("div")?.dyn_into()?;
    toast.set_class_name(&kind.class_name());
    toast.style().set_css_text(&kind.css_text());

    let content = doc.create_element("div")?;
    content.set_class_name("notification-content");
    let icon = doc.create_element("i")?;
    icon.set_class_name(kind.icon());
    let text = doc.create_element("span")?;
    text.set_text_content(Some(message));
    content.append_child(&icon)?;
    content.append_child(&text)?;
    toast.append_child(&content)?;
    dom::body()?.append_child(&toast)?;

    let entering = toast.clone();
    scheduler.schedule(
        timing.enter_delay_ms,
        Box::new(move || dom::set_style(&entering, "transform", ONSCREEN)),
    );

    let leaving = toast.clone();
    scheduler.schedule(
        timing.visible_ms,
        Box::new(move || dom::set_style(&leaving, "transform", OFFSCREEN)),
    );
    scheduler.schedule(
        removal_delay(timing),
        Box::new(move || toast.remove()),
    );
    Ok(())
}
