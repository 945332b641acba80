//! Portfolio FX core crate.
//!
//! Page behavior controller for the static portfolio site. Once the DOM is
//! ready, `start_portfolio()` wires up each behavior in a fixed order: typing
//! banner, scroll effects, counters, filters, contact form, reveals, hover
//! effects and the hidden easter eggs. Each behavior owns its own slice of
//! the page and its own state; none of them talk to each other.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod contact;
pub mod dom;
pub mod easter_egg;
pub mod filter;
pub mod hover;
pub mod notify;
pub mod reveal;
pub mod scroll;
pub mod styles;
pub mod timer;
pub mod typing;

pub use config::Settings;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

pub const BANNER: [&str; 3] = [
    "🎉 Full Stack Portfolio loaded successfully!",
    "💡 Try double-clicking anywhere to toggle dark mode!",
    "🎮 Try the Konami code: ↑↑↓↓←→←→BA",
];

pub type Setup = fn(&Settings) -> Result<(), JsValue>;

/// Setup routines in startup order. Hover effects form the second wave.
pub const SETUP: &[(&str, Setup)] = &[
    ("styles", |_| styles::inject()),
    ("typing", |s| typing::init(&s.typing)),
    ("smooth-scroll", |s| scroll::init_smooth_anchors(&s.scroll)),
    ("navbar", |s| scroll::init_navbar(&s.scroll)),
    ("counters", |s| reveal::init_counters(&s.reveal)),
    ("filters", |_| filter::init()),
    ("contact", contact::init),
    ("back-to-top", |s| scroll::init_back_to_top(&s.scroll)),
    ("scroll-reveal", |s| reveal::init_scroll_reveal(&s.reveal)),
    ("progress-bars", |s| reveal::init_progress_bars(&s.reveal)),
    ("loading", |s| reveal::init_loading_stagger(&s.reveal)),
    ("parallax", |s| scroll::init_parallax(&s.scroll)),
    ("hover", |_| hover::init()),
    ("key-sequence", easter_egg::init_key_sequence),
    ("dark-mode", easter_egg::init_dark_mode),
];

/// Run every setup routine. A failing routine is logged and skipped so the
/// rest of the page still comes alive.
fn run_setup(settings: &Settings) {
    for (name, setup) in SETUP {
        if let Err(e) = setup(settings) {
            dom::error(&format!("{name}: setup failed: {e:?}"));
        }
    }
    for line in BANNER {
        dom::log(line);
    }
}

fn when_ready(settings: Settings) -> Result<(), JsValue> {
    let doc = dom::doc()?;
    if doc.ready_state() != "loading" {
        run_setup(&settings);
        return Ok(());
    }
    let cb = Closure::once_into_js(move || run_setup(&settings));
    let opts = web_sys::AddEventListenerOptions::new();
    opts.set_once(true);
    doc.add_event_listener_with_callback_and_add_event_listener_options(
        "DOMContentLoaded",
        wasm_bindgen::JsCast::unchecked_ref(&cb),
        &opts,
    )?;
    Ok(())
}

#[wasm_bindgen]
pub fn start_portfolio() -> Result<(), JsValue> {
    when_ready(Settings::default())
}

/// Same as `start_portfolio`, with settings overridden from a JSON document.
#[wasm_bindgen]
pub fn start_portfolio_with_config(config_json: &str) -> Result<(), JsValue> {
    let settings = Settings::from_json(config_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
    when_ready(settings)
}

/// Validation rule used by the contact form, for page scripts that want it.
#[wasm_bindgen]
pub fn validate_contact(name: &str, email: &str, subject: &str, message: &str) -> bool {
    let form = contact::ContactForm {
        name: name.to_string(),
        email: email.to_string(),
        subject: subject.to_string(),
        message: message.to_string(),
    };
    contact::validate(&form).is_ok()
}

/// Number of contact messages stored under the default key.
#[wasm_bindgen]
pub fn contact_message_count() -> Result<usize, JsValue> {
    Ok(contact::local_log(config::DEFAULT_STORAGE_KEY)?.load()?.len())
}
