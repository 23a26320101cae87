use js_sys::Promise;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn add_event_listener(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(web::Event) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn element_by_id<T: JsCast>(document: &web::Document, id: &str) -> anyhow::Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?
        .dyn_into::<T>()
        .map_err(|e| anyhow::anyhow!("#{id} has unexpected type: {:?}", e))
}

#[inline]
pub fn millis(d: Duration) -> i32 {
    d.as_millis().min(i32::MAX as u128) as i32
}

/// Resolve after `delay` using `setTimeout`.
pub async fn sleep(delay: Duration) {
    let ms = millis(delay);
    let promise = Promise::new(&mut |resolve, _reject| match web::window() {
        Some(w) => {
            let _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        }
        None => {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    let _ = JsFuture::from(promise).await;
}

/// Point `img` at `src` and wait for its load or error event.
///
/// A later call on the same element replaces the handlers, so an earlier
/// pending load simply never completes.
pub async fn load_image(img: &web::HtmlImageElement, src: &str) -> Result<(), JsValue> {
    let target = img.clone();
    let promise = Promise::new(&mut |resolve, reject| {
        target.set_onload(Some(&resolve));
        target.set_onerror(Some(&reject));
    });
    img.set_src(src);
    let result = JsFuture::from(promise).await.map(|_| ());
    img.set_onload(None);
    img.set_onerror(None);
    result
}
