use crate::dom;
use std::time::Duration;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

const NOTICE_STYLE: &str = "position: fixed; top: 50%; left: 50%; transform: translate(-50%, -50%); \
background: rgba(0, 0, 0, 0.9); color: white; padding: 1rem 2rem; border-radius: 8px; \
z-index: 1000; font-size: 1.2rem; text-align: center;";

/// Centered message removed after `duration`.
pub fn show_notice(message: &str, duration: Duration) {
    let Some(document) = dom::window_document() else {
        return;
    };
    let (Some(body), Ok(el)) = (document.body(), document.create_element("div")) else {
        return;
    };
    el.set_text_content(Some(message));
    let _ = el.set_attribute("style", NOTICE_STYLE);
    let _ = el.set_attribute("class", "notice");
    if body.append_child(&el).is_err() {
        return;
    }
    spawn_local(async move {
        dom::sleep(duration).await;
        el.remove();
    });
}

/// Full-screen error with a reload button. Used when startup fails or a
/// panic escapes.
pub fn show_fatal(document: &web::Document, message: &str) {
    let (Some(body), Ok(el)) = (document.body(), document.create_element("div")) else {
        return;
    };
    el.set_inner_html(&format!(
        "<div style='position: fixed; inset: 0; background: rgba(0, 0, 0, 0.9); color: white; \
display: flex; align-items: center; justify-content: center; z-index: 10000; font-family: Arial, sans-serif;'>\
<div style='text-align: center; padding: 2rem; background: #333; border-radius: 8px; max-width: 400px;'>\
<h2 style='color: #e74c3c; margin-bottom: 1rem;'>Error</h2>\
<p style='margin-bottom: 1rem;'>{}</p>\
<button onclick='location.reload()' style='padding: 0.5rem 1rem; background: #3498db; color: white; \
border: none; border-radius: 4px; cursor: pointer;'>Reload Page</button></div></div>",
        escape_html(message)
    ));
    let _ = body.append_child(&el);
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
