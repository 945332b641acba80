// Browser tests; run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{
    Event, EventInit, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement, MouseEvent,
};

use portfolio_fx::config::NotificationSettings;
use portfolio_fx::notify::{self, NotificationKind};
use portfolio_fx::timer::{Scheduler, Task};
use portfolio_fx::contact::{self, SENT_MESSAGE};
use portfolio_fx::easter_egg::{KonamiEgg, RAINBOW_ANIMATION};
use portfolio_fx::{dom, easter_egg, filter, scroll, styles, Settings};

wasm_bindgen_test_configure!(run_in_browser);

/// Collects scheduled tasks so the test decides when they run.
#[derive(Default)]
struct Deferred(RefCell<Vec<(i32, Task)>>);

impl Scheduler for Deferred {
    fn schedule(&self, delay_ms: i32, task: Task) {
        self.0.borrow_mut().push((delay_ms, task));
    }
}

fn mount(html: &str) -> HtmlElement {
    let doc = dom::doc().unwrap();
    let host: HtmlElement = doc.create_element("div").unwrap().dyn_into().unwrap();
    host.set_inner_html(html);
    dom::body().unwrap().append_child(&host).unwrap();
    host
}

fn click(el: &HtmlElement) {
    el.click();
}

#[wasm_bindgen_test]
fn filter_shows_only_matching_category_and_one_active_button() {
    let host = mount(
        r#"<div class="project-filters">
             <button class="btn active" data-filter="all">All</button>
             <button class="btn" data-filter="web">Web</button>
             <button class="btn" data-filter="mobile">Mobile</button>
           </div>
           <div id="projects-grid">
             <div data-category="web">a</div>
             <div data-category="mobile">b</div>
             <div data-category="web">c</div>
           </div>"#,
    );
    filter::init().unwrap();
    let buttons = dom::query_all(".project-filters .btn").unwrap();
    let items = dom::query_all("#projects-grid [data-category]").unwrap();

    for _ in 0..2 {
        click(&buttons[1]);
        let shown: Vec<bool> = items
            .iter()
            .map(|i| i.style().get_property_value("display").unwrap() == "block")
            .collect();
        assert_eq!(shown, vec![true, false, true]);
        let active: Vec<bool> = buttons.iter().map(|b| b.class_list().contains("active")).collect();
        assert_eq!(active, vec![false, true, false]);
    }
    assert!(items[0].class_list().contains("animate-in"));
    assert!(!items[1].class_list().contains("animate-in"));

    click(&buttons[0]);
    assert!(items
        .iter()
        .all(|i| i.style().get_property_value("display").unwrap() == "block"));
    host.remove();
}

#[wasm_bindgen_test]
fn notification_slides_in_then_is_removed() {
    let sched = Deferred::default();
    let timing = NotificationSettings::default();
    notify::show_with("Saved", NotificationKind::Success, &timing, &sched).unwrap();

    let toasts = dom::query_all(".notification.notification-success").unwrap();
    let toast = toasts.last().unwrap().clone();
    assert_eq!(toast.text_content().unwrap().trim(), "Saved");
    assert_eq!(toast.style().get_property_value("transform").unwrap(), notify::OFFSCREEN);

    let tasks: Vec<(i32, Task)> = sched.0.borrow_mut().drain(..).collect();
    let delays: Vec<i32> = tasks.iter().map(|(d, _)| *d).collect();
    assert_eq!(delays, vec![100, 3000, 3300]);
    let mut tasks = tasks.into_iter().map(|(_, t)| t);

    (tasks.next().unwrap())();
    assert_eq!(toast.style().get_property_value("transform").unwrap(), notify::ONSCREEN);
    (tasks.next().unwrap())();
    assert_eq!(toast.style().get_property_value("transform").unwrap(), notify::OFFSCREEN);
    (tasks.next().unwrap())();
    assert!(toast.parent_node().is_none());
}

#[wasm_bindgen_test]
fn notification_text_is_not_parsed_as_html() {
    let sched = Deferred::default();
    notify::show_with("<b>x</b>", NotificationKind::Error, &NotificationSettings::default(), &sched)
        .unwrap();
    let toast = dom::query_all(".notification-error").unwrap().pop().unwrap();
    assert!(toast.query_selector("b").unwrap().is_none());
    toast.remove();
}

#[wasm_bindgen_test]
fn double_click_toggles_dark_mode_except_on_links() {
    let host = mount(r#"<p id="dm-text">text</p><a id="dm-link" href="">link</a>"#);
    easter_egg::init_dark_mode(&Settings::default()).unwrap();
    let body = dom::body().unwrap();
    let was_dark = body.class_list().contains("dark-mode");

    let dblclick = |id: &str| {
        let init = web_sys::MouseEventInit::new();
        init.set_bubbles(true);
        let ev = MouseEvent::new_with_mouse_event_init_dict("dblclick", &init).unwrap();
        dom::by_id(id).unwrap().unwrap().dispatch_event(&ev).unwrap();
    };

    dblclick("dm-link");
    assert_eq!(body.class_list().contains("dark-mode"), was_dark);
    dblclick("dm-text");
    assert_eq!(body.class_list().contains("dark-mode"), !was_dark);
    dblclick("dm-text");
    assert_eq!(body.class_list().contains("dark-mode"), was_dark);
    host.remove();
}

#[wasm_bindgen_test]
fn styles_are_injected_once() {
    styles::inject().unwrap();
    styles::inject().unwrap();
    let count = dom::query_all(&format!("#{}", styles::STYLE_ID)).unwrap().len();
    assert_eq!(count, 1);
}

fn input(id: &str) -> HtmlInputElement {
    dom::by_id(id).unwrap().unwrap().dyn_into().unwrap()
}

fn textarea(id: &str) -> HtmlTextAreaElement {
    dom::by_id(id).unwrap().unwrap().dyn_into().unwrap()
}

/// Dispatch a cancelable `submit` and report whether a listener prevented it.
fn submit_form() -> bool {
    let init = EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let ev = Event::new_with_event_init_dict("submit", &init).unwrap();
    let form: HtmlFormElement = dom::by_id("contactForm").unwrap().unwrap().dyn_into().unwrap();
    form.dispatch_event(&ev).unwrap();
    ev.default_prevented()
}

#[wasm_bindgen_test]
fn contact_form_keeps_invalid_input_and_stores_valid_input() {
    let host = mount(
        r#"<form id="contactForm">
             <input id="name"><input id="email"><input id="subject">
             <textarea id="message"></textarea>
           </form>"#,
    );
    contact::init(&Settings::default()).unwrap();
    let before = portfolio_fx::contact_message_count().unwrap();

    input("name").set_value("Ada");
    input("email").set_value("ada@nodot");
    input("subject").set_value("Hi");
    textarea("message").set_value("Hello");
    assert!(submit_form());
    assert_eq!(portfolio_fx::contact_message_count().unwrap(), before);
    assert_eq!(input("name").value(), "Ada");
    assert_eq!(input("email").value(), "ada@nodot");
    assert_eq!(textarea("message").value(), "Hello");

    input("email").set_value("ada@example.com");
    assert!(submit_form());
    assert_eq!(portfolio_fx::contact_message_count().unwrap(), before + 1);
    for id in ["name", "email", "subject"] {
        assert_eq!(input(id).value(), "", "#{id} not cleared");
    }
    assert_eq!(textarea("message").value(), "");

    let toasts = dom::query_all(".notification-success").unwrap();
    assert!(toasts.iter().any(|t| t.text_content().unwrap().contains(SENT_MESSAGE)));
    for t in toasts {
        t.remove();
    }
    for t in dom::query_all(".notification-error").unwrap() {
        t.remove();
    }
    host.remove();
}

#[wasm_bindgen_test]
fn konami_sets_rainbow_then_clears_it() {
    let sched = Deferred::default();
    let mut egg = KonamiEgg::new(&Settings::default());
    let body = dom::body().unwrap();
    let codes = Settings::default().key_sequence;

    let mut fired = 0;
    for code in codes.iter().chain(codes.iter()) {
        if egg.on_key(*code, &sched).unwrap() {
            fired += 1;
        }
    }
    assert_eq!(fired, 2);
    assert_eq!(body.style().get_property_value("animation").unwrap(), RAINBOW_ANIMATION);

    // Each firing queues three toast steps and one rainbow reset.
    let tasks: Vec<(i32, Task)> = sched.0.borrow_mut().drain(..).collect();
    assert_eq!(tasks.len(), 8);
    assert_eq!(tasks.iter().filter(|(d, _)| *d == 5000).count(), 2);
    for (_, task) in tasks {
        task();
    }
    assert_eq!(body.style().get_property_value("animation").unwrap(), "");
}

#[wasm_bindgen_test]
fn scroll_effects_attach_to_window() {
    let host = mount(r#"<nav class="navbar"></nav><div class="hero"></div><a id="backToTop"></a>"#);
    let settings = Settings::default();
    scroll::init_navbar(&settings.scroll).unwrap();
    scroll::init_parallax(&settings.scroll).unwrap();
    scroll::init_back_to_top(&settings.scroll).unwrap();
    easter_egg::init_key_sequence(&settings).unwrap();

    dom::win().unwrap().dispatch_event(&Event::new("scroll").unwrap()).unwrap();
    let navbar = dom::query(".navbar").unwrap().unwrap();
    assert_eq!(
        navbar.class_list().contains("scrolled"),
        dom::scroll_y() > settings.scroll.navbar_threshold
    );
    let hero = dom::query(".hero").unwrap().unwrap();
    assert!(hero.style().get_property_value("transform").unwrap().starts_with("translateY("));
    host.remove();
}
