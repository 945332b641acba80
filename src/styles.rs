//! Stylesheet injected at startup for the classes the behaviors toggle.

use wasm_bindgen::prelude::*;

use crate::dom;

pub const STYLE_ID: &str = "portfolio-fx-styles";

pub const CSS: &str = r#"
.animate-in { animation: slideInUp 0.6s ease forwards; }
.notification-content { display: flex; align-items: center; gap: 0.5rem; }
.notification-content i { font-size: 1.2rem; }
@keyframes slideInUp {
    from { opacity: 0; transform: translateY(30px); }
    to { opacity: 1; transform: translateY(0); }
}
.navbar.scrolled { background: rgba(33, 37, 41, 0.95) !important; backdrop-filter: blur(10px); }
.project-card.animate-in { animation: fadeInScale 0.6s ease forwards; }
@keyframes fadeInScale {
    from { opacity: 0; transform: scale(0.8); }
    to { opacity: 1; transform: scale(1); }
}
@keyframes rainbow {
    0% { filter: hue-rotate(0deg); }
    100% { filter: hue-rotate(360deg); }
}
.dark-mode { background-color: #1a1a1a !important; color: #ffffff !important; }
.dark-mode .navbar { background-color: #000000 !important; }
.dark-mode .bg-light { background-color: #2d2d2d !important; }
.dark-mode .card,
.dark-mode .project-card,
.dark-mode .tech-card,
.dark-mode .stat-item,
.dark-mode .contact-item,
.dark-mode .contact-form { background-color: #333333 !important; color: #ffffff !important; }
"#;

/// Append the stylesheet to `<head>` once; a second call is a no-op.
pub fn inject() -> Result<(), JsValue> {
    let doc = dom::doc()?;
    if doc.get_element_by_id(STYLE_ID).is_some() {
        return Ok(());
    }
    let style = doc.create_element("style")?;
    style.set_id(STYLE_ID);
    style.set_text_content(Some(CSS));
    let head = doc.head().ok_or_else(|| JsValue::from_str("no head"))?;
    head.append_child(&style)?;
    Ok(())
}
