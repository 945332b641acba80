//! Client-side contact form: validation, the local message log, and the
//! submit handler that ties them to the page. Nothing is sent over the network.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::config::{NotificationSettings, Settings};
use crate::dom;
use crate::notify::{self, NotificationKind};

pub const SENT_MESSAGE: &str = "Message sent successfully!";
pub const INVALID_MESSAGE: &str = "Please fill in all fields correctly.";
pub const NOT_SAVED_MESSAGE: &str = "Sorry, your message could not be saved. Please try again later.";

/// Raw field values as typed by the visitor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// One persisted submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// ISO-8601, as produced by `Date.prototype.toISOString`.
    pub timestamp: String,
}

impl ContactMessage {
    pub fn from_form(form: ContactForm, timestamp: String) -> Self {
        Self {
            name: form.name,
            email: form.email,
            subject: form.subject,
            message: form.message,
            timestamp,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name is blank")]
    BlankName,
    #[error("email is malformed")]
    BadEmail,
    #[error("subject is blank")]
    BlankSubject,
    #[error("message is blank")]
    BlankMessage,
}

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // U+FEFF counts as whitespace in browsers but not in `\s`.
    RE.get_or_init(|| {
        Regex::new(r"^[^\s@\x{FEFF}]+@[^\s@\x{FEFF}]+\.[^\s@\x{FEFF}]+$")
            .expect("email pattern compiles")
    })
}

/// Whitespace as the browser's `String.prototype.trim` sees it.
fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

fn is_blank(s: &str) -> bool {
    s.trim_matches(is_space).is_empty()
}

/// `local@domain.tld`: no whitespace or `@` in any part, at least one dot after `@`.
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Checks fields in form order and reports the first failure.
pub fn validate(form: &ContactForm) -> Result<(), ValidationError> {
    if is_blank(&form.name) {
        return Err(ValidationError::BlankName);
    }
    if !is_valid_email(&form.email) {
        return Err(ValidationError::BadEmail);
    }
    if is_blank(&form.subject) {
        return Err(ValidationError::BlankSubject);
    }
    if is_blank(&form.message) {
        return Err(ValidationError::BlankMessage);
    }
    Ok(())
}

// --- Message log -------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LogError {
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error("stored messages are not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl From<LogError> for JsValue {
    fn from(e: LogError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// Key/value backend holding the serialized log.
pub trait MessageStore {
    fn read(&self, key: &str) -> Result<Option<String>, LogError>;
    fn write(&self, key: &str, value: &str) -> Result<(), LogError>;
}

impl MessageStore for web_sys::Storage {
    fn read(&self, key: &str) -> Result<Option<String>, LogError> {
        self.get_item(key)
            .map_err(|e| LogError::Storage(format!("{e:?}")))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), LogError> {
        self.set_item(key, value)
            .map_err(|e| LogError::Storage(format!("{e:?}")))
    }
}

/// Append-only list of submissions stored as one JSON array under `key`.
/// Every append is a read-modify-write of the whole array; two tabs
/// appending at once can lose one of the writes.
pub struct MessageLog<S> {
    store: S,
    key: String,
}

impl<S: MessageStore> MessageLog<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Absent value reads as an empty log.
    pub fn load(&self) -> Result<Vec<ContactMessage>, LogError> {
        match self.store.read(&self.key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Returns the log length after appending.
    pub fn append(&self, message: ContactMessage) -> Result<usize, LogError> {
        let mut messages = self.load()?;
        messages.push(message);
        self.store.write(&self.key, &serde_json::to_string(&messages)?)?;
        Ok(messages.len())
    }
}

pub fn local_log(key: &str) -> Result<MessageLog<web_sys::Storage>, JsValue> {
    let storage = dom::win()?
        .local_storage()?
        .ok_or_else(|| JsValue::from_str("no localStorage"))?;
    Ok(MessageLog::new(storage, key))
}

// --- Page wiring -------------------------------------------------------------

fn field_value(id: &str) -> Result<String, JsValue> {
    let el = dom::doc()?
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("no #{id} field")))?;
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return Ok(input.value());
    }
    if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        return Ok(area.value());
    }
    if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        return Ok(select.value());
    }
    Err(JsValue::from_str(&format!("#{id} is not a form field")))
}

fn read_form() -> Result<ContactForm, JsValue> {
    Ok(ContactForm {
        name: field_value("name")?,
        email: field_value("email")?,
        subject: field_value("subject")?,
        message: field_value("message")?,
    })
}

/// Result of one submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Stored; carries the log length after appending.
    Sent(usize),
    Invalid(ValidationError),
    NotSaved(LogError),
}

impl SubmitOutcome {
    /// Toast shown to the visitor for this outcome.
    pub fn notification(&self) -> (&'static str, NotificationKind) {
        match self {
            SubmitOutcome::Sent(_) => (SENT_MESSAGE, NotificationKind::Success),
            SubmitOutcome::Invalid(_) => (INVALID_MESSAGE, NotificationKind::Error),
            SubmitOutcome::NotSaved(_) => (NOT_SAVED_MESSAGE, NotificationKind::Error),
        }
    }
}

/// Validate `fields` and append them to `log` when valid. Invalid input
/// never touches the log.
pub fn process<S: MessageStore>(
    fields: ContactForm,
    log: &MessageLog<S>,
    timestamp: impl FnOnce() -> String,
) -> SubmitOutcome {
    if let Err(reason) = validate(&fields) {
        return SubmitOutcome::Invalid(reason);
    }
    match log.append(ContactMessage::from_form(fields, timestamp())) {
        Ok(count) => SubmitOutcome::Sent(count),
        Err(e) => SubmitOutcome::NotSaved(e),
    }
}

fn submit(form: &HtmlFormElement, storage_key: &str, toast: &NotificationSettings) -> Result<(), JsValue> {
    let fields = read_form()?;
    let log = local_log(storage_key)?;
    let outcome = process(fields, &log, || js_sys::Date::new_0().to_iso_string().into());
    match &outcome {
        SubmitOutcome::Sent(count) => {
            dom::log(&format!("contact: stored message #{count}"));
            form.reset();
        }
        SubmitOutcome::Invalid(reason) => dom::log(&format!("contact: rejected ({reason})")),
        SubmitOutcome::NotSaved(e) => dom::error(&format!("contact: {e}")),
    }
    let (message, kind) = outcome.notification();
    notify::show(message, kind, toast);
    Ok(())
}

pub fn init(settings: &Settings) -> Result<(), JsValue> {
    let Some(form) = dom::doc()?
        .get_element_by_id("contactForm")
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
    else {
        dom::warn("contact: #contactForm not found");
        return Ok(());
    };
    let key = settings.storage_key.clone();
    let toast = settings.notification.clone();
    let target = form.clone();
    dom::listen(&target, "submit", move |e: Event| {
        e.prevent_default();
        if let Err(err) = submit(&form, &key, &toast) {
            dom::error(&format!("contact: {err:?}"));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// Shared map standing in for localStorage; clones see the same data, like
    /// two page loads of the same origin.
    #[derive(Clone, Default)]
    struct MemoryStore(Rc<RefCell<HashMap<String, String>>>);

    impl MessageStore for MemoryStore {
        fn read(&self, key: &str) -> Result<Option<String>, LogError> {
            Ok(self.0.borrow().get(key).cloned())
        }
        fn write(&self, key: &str, value: &str) -> Result<(), LogError> {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    fn form(name: &str, email: &str, subject: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    fn valid() -> ContactForm {
        form("Ada", "ada@example.com", "Hello", "Nice site")
    }

    #[test]
    fn email_examples() {
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("ab.co"));
        assert!(!is_valid_email("a@@b.co"));
        assert!(!is_valid_email("a@b.co "));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@.co"));
    }

    #[test]
    fn email_without_at_or_dot_after_at_is_rejected() {
        for s in ["plain", "dots.only.here", "x@nodot", "a.b@cd", "first.last@host"] {
            assert!(!is_valid_email(s), "{s} should be rejected");
        }
    }

    #[test]
    fn each_blank_field_rejects() {
        assert_eq!(validate(&valid()), Ok(()));
        let mut f = valid();
        f.name = "   ".into();
        assert_eq!(validate(&f), Err(ValidationError::BlankName));
        let mut f = valid();
        f.email = String::new();
        assert_eq!(validate(&f), Err(ValidationError::BadEmail));
        let mut f = valid();
        f.subject = "\t".into();
        assert_eq!(validate(&f), Err(ValidationError::BlankSubject));
        let mut f = valid();
        f.message = "\n ".into();
        assert_eq!(validate(&f), Err(ValidationError::BlankMessage));
    }

    #[test]
    fn surrounding_whitespace_is_fine_for_text_fields() {
        assert_eq!(validate(&form("  Ada ", "a@b.co", " Hi", "msg  ")), Ok(()));
    }

    #[test]
    fn missing_key_loads_empty() {
        let log = MessageLog::new(MemoryStore::default(), "contactMessages");
        assert!(log.load().unwrap().is_empty());
    }

    #[test]
    fn append_preserves_fields_verbatim() {
        let store = MemoryStore::default();
        let log = MessageLog::new(store.clone(), "contactMessages");
        let f = form(" Ada ", "ada@example.com", "Hi", "line1\nline2");
        let n = log
            .append(ContactMessage::from_form(f.clone(), "2026-10-19T12:00:00.000Z".into()))
            .unwrap();
        assert_eq!(n, 1);
        let stored = log.load().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, f.name);
        assert_eq!(stored[0].message, f.message);
        assert_eq!(stored[0].timestamp, "2026-10-19T12:00:00.000Z");

        let raw = store.read("contactMessages").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let keys: Vec<&String> = value[0].as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 5);
        assert_eq!(value[0]["email"], "ada@example.com");
    }

    #[test]
    fn appends_accumulate_across_reloads() {
        let store = MemoryStore::default();
        for i in 0..5 {
            // A fresh log per iteration models a page reload over the same storage.
            let log = MessageLog::new(store.clone(), "contactMessages");
            let ts = format!("2026-10-19T12:00:0{i}.000Z");
            assert_eq!(log.append(ContactMessage::from_form(valid(), ts)).unwrap(), i + 1);
        }
        let all = MessageLog::new(store, "contactMessages").load().unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(all[4].timestamp, "2026-10-19T12:00:04.000Z");
    }

    #[test]
    fn byte_order_mark_counts_as_whitespace() {
        let mut f = valid();
        f.name = "\u{feff}".into();
        assert_eq!(validate(&f), Err(ValidationError::BlankName));
        let mut f = valid();
        f.message = " \u{feff}\n".into();
        assert_eq!(validate(&f), Err(ValidationError::BlankMessage));
        assert!(!is_valid_email("a\u{feff}b@c.co"));
        assert!(!is_valid_email("ab@c.co\u{feff}"));
    }

    #[test]
    fn invalid_submission_writes_nothing() {
        let store = MemoryStore::default();
        let log = MessageLog::new(store.clone(), "contactMessages");
        let mut f = valid();
        f.subject = "  ".into();
        let outcome = process(f, &log, || panic!("no timestamp for rejected input"));
        assert!(matches!(outcome, SubmitOutcome::Invalid(ValidationError::BlankSubject)));
        assert_eq!(outcome.notification(), (INVALID_MESSAGE, NotificationKind::Error));
        assert!(store.read("contactMessages").unwrap().is_none());
    }

    #[test]
    fn valid_submission_appends_one_record() {
        let log = MessageLog::new(MemoryStore::default(), "contactMessages");
        let outcome = process(valid(), &log, || "2026-10-19T08:30:00.000Z".into());
        assert!(matches!(outcome, SubmitOutcome::Sent(1)));
        assert_eq!(outcome.notification(), (SENT_MESSAGE, NotificationKind::Success));
        assert_eq!(log.load().unwrap().len(), 1);
    }

    #[test]
    fn storage_failure_has_its_own_message() {
        let store = MemoryStore::default();
        store.write("contactMessages", "{oops").unwrap();
        let log = MessageLog::new(store, "contactMessages");
        let outcome = process(valid(), &log, || "t".into());
        assert!(matches!(outcome, SubmitOutcome::NotSaved(LogError::Corrupt(_))));
        let (message, kind) = outcome.notification();
        assert_eq!(kind, NotificationKind::Error);
        assert_eq!(message, NOT_SAVED_MESSAGE);
        assert_ne!(message, INVALID_MESSAGE);
    }

    #[test]
    fn corrupt_storage_is_reported_and_left_alone() {
        let store = MemoryStore::default();
        store.write("contactMessages", "not json").unwrap();
        let log = MessageLog::new(store.clone(), "contactMessages");
        let err = log
            .append(ContactMessage::from_form(valid(), "t".into()))
            .unwrap_err();
        assert!(matches!(err, LogError::Corrupt(_)));
        assert_eq!(store.read("contactMessages").unwrap().as_deref(), Some("not json"));
    }
}
