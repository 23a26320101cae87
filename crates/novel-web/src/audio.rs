//! Executes the core's audio commands against HTML media elements.

use crate::app::App;
use crate::dom;
use js_sys::Promise;
use novel_core::{AudioCommand, EffectId, GESTURE_EVENTS};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

struct LiveEffect {
    id: EffectId,
    element: web::HtmlAudioElement,
}

pub struct MediaOutput {
    music: Option<web::HtmlAudioElement>,
    effect: RefCell<Option<LiveEffect>>,
}

fn create_music(path: &str, volume: f64) -> Result<web::HtmlAudioElement, JsValue> {
    let music = web::HtmlAudioElement::new_with_src(path)?;
    music.set_loop(true);
    music.set_preload("auto");
    music.set_volume(volume);
    let on_error = Closure::wrap(Box::new(move || {
        log::warn!("[audio] background music failed to load");
    }) as Box<dyn FnMut()>);
    music.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    on_error.forget();
    Ok(music)
}

fn release(element: &web::HtmlAudioElement) {
    element.set_onended(None);
    let _ = element.pause();
    element.set_current_time(0.0);
}

impl MediaOutput {
    pub fn new(music_path: &str, music_volume: f64) -> Self {
        let music = match create_music(music_path, music_volume) {
            Ok(m) => Some(m),
            Err(e) => {
                log::warn!("[audio] failed to initialise background music: {:?}", e);
                None
            }
        };
        Self {
            music,
            effect: RefCell::new(None),
        }
    }

    /// Apply `commands` in order. Returns the pending play promise when one
    /// of them started the music.
    pub fn apply(&self, app: &Rc<App>, commands: Vec<AudioCommand>) -> Option<Promise> {
        let mut music_play = None;
        for cmd in commands {
            match cmd {
                AudioCommand::PlayMusic { restart, volume } => {
                    let Some(music) = &self.music else {
                        continue;
                    };
                    music.set_volume(volume);
                    if restart {
                        music.set_current_time(0.0);
                    }
                    music_play = Some(
                        music
                            .play()
                            .unwrap_or_else(|e| Promise::reject(&e)),
                    );
                }
                AudioCommand::PauseMusic => {
                    if let Some(music) = &self.music {
                        if let Err(e) = music.pause() {
                            log::warn!("[audio] pause failed: {:?}", e);
                        }
                    }
                }
                AudioCommand::SetMusicVolume(v) => {
                    if let Some(music) = &self.music {
                        music.set_volume(v);
                    }
                }
                AudioCommand::StopEffect => {
                    if let Some(live) = self.effect.borrow_mut().take() {
                        release(&live.element);
                    }
                }
                AudioCommand::PlayEffect {
                    id, path, volume, ..
                } => self.play_effect(app, id, &path, volume),
                AudioCommand::SetEffectVolume(v) => {
                    if let Some(live) = self.effect.borrow().as_ref() {
                        live.element.set_volume(v);
                    }
                }
            }
        }
        music_play
    }

    fn play_effect(&self, app: &Rc<App>, id: EffectId, path: &str, volume: f64) {
        let element = match web::HtmlAudioElement::new_with_src(path) {
            Ok(el) => el,
            Err(e) => {
                app.audio
                    .borrow_mut()
                    .effect_failed(id, &format!("{path}: {:?}", e));
                return;
            }
        };
        element.set_preload("auto");
        element.set_volume(volume);

        let weak = Rc::downgrade(app);
        let on_ended = Closure::once_into_js(move || {
            if let Some(app) = weak.upgrade() {
                app.audio.borrow_mut().effect_ended(id);
                app.media.clear_effect(id);
            }
        });
        element.set_onended(Some(on_ended.unchecked_ref()));

        let play = element.play().unwrap_or_else(|e| Promise::reject(&e));
        let previous = self.effect.borrow_mut().replace(LiveEffect { id, element });
        if let Some(old) = previous {
            release(&old.element);
        }

        let weak = Rc::downgrade(app);
        let path = path.to_string();
        spawn_local(async move {
            match JsFuture::from(play).await {
                Ok(_) => log::debug!("[audio] playing effect {path}"),
                Err(e) => {
                    if let Some(app) = weak.upgrade() {
                        app.audio
                            .borrow_mut()
                            .effect_failed(id, &format!("{path}: {:?}", e));
                        app.media.clear_effect(id);
                    }
                }
            }
        });
    }

    fn clear_effect(&self, id: EffectId) {
        let mut slot = self.effect.borrow_mut();
        if slot.as_ref().map(|live| live.id) == Some(id) {
            if let Some(live) = slot.take() {
                live.element.set_onended(None);
            }
        }
    }
}

/// Start the music from zero and wait for the host to accept or refuse.
pub async fn start_music(app: &Rc<App>) {
    let mut out = Vec::new();
    app.audio.borrow_mut().start_music(&mut out);
    let Some(promise) = app.media.apply(app, out) else {
        return;
    };
    match JsFuture::from(promise).await {
        Ok(_) => log::info!("[audio] background music started"),
        Err(e) => {
            log::warn!("[audio] failed to start background music: {:?}", e);
            if app.audio.borrow_mut().music_rejected() {
                arm_gesture_retry(app);
            }
        }
    }
}

async fn retry_music(app: Rc<App>) {
    let mut out = Vec::new();
    if !app.audio.borrow_mut().take_music_retry(&mut out) {
        return;
    }
    let Some(promise) = app.media.apply(&app, out) else {
        return;
    };
    match JsFuture::from(promise).await {
        Ok(_) => log::info!("[audio] background music resumed"),
        Err(e) => {
            log::warn!("[audio] retry rejected: {:?}", e);
            app.audio.borrow_mut().music_retry_failed();
        }
    }
}

type GestureSlot = Rc<RefCell<Option<Closure<dyn FnMut(web::Event)>>>>;

/// Listen for the next click, touch or key press anywhere in the document,
/// retry the music once, and remove all the listeners.
fn arm_gesture_retry(app: &Rc<App>) {
    let Some(document) = dom::window_document() else {
        return;
    };
    let slot: GestureSlot = Rc::new(RefCell::new(None));
    let weak: Weak<App> = Rc::downgrade(app);

    let slot_cb = slot.clone();
    let doc_cb = document.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
        if let Some(cb) = slot_cb.borrow().as_ref() {
            for name in GESTURE_EVENTS {
                let _ = doc_cb.remove_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
            }
        }
        // The closure is still running; drop it on the next tick.
        let slot_drop = slot_cb.clone();
        spawn_local(async move {
            slot_drop.borrow_mut().take();
        });
        if let Some(app) = weak.upgrade() {
            spawn_local(retry_music(app));
        }
    }) as Box<dyn FnMut(web::Event)>);

    for name in GESTURE_EVENTS {
        let _ = document.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
    }
    *slot.borrow_mut() = Some(closure);
}
