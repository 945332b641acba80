//! Deferred callbacks. Nothing in the crate ever blocks; waiting is always a
//! task handed to a `Scheduler`.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

pub type Task = Box<dyn FnOnce()>;

/// Runs a task once after a delay.
pub trait Scheduler {
    fn schedule(&self, delay_ms: i32, task: Task);
}

/// `window.setTimeout` backed scheduler.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: i32, task: Task) {
        if let Err(e) = set_timeout(delay_ms, task) {
            crate::dom::error(&format!("setTimeout failed: {e:?}"));
        }
    }
}

pub fn set_timeout<F: FnOnce() + 'static>(delay_ms: i32, f: F) -> Result<i32, JsValue> {
    let cb = Closure::once_into_js(f);
    crate::dom::win()?.set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.unchecked_ref(),
        delay_ms.max(0),
    )
}
