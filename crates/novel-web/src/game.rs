//! Drives the scene controller from DOM events: screen switching, image
//! loads, the dwell timer and the end-of-game delay.

use crate::app::App;
use crate::{audio, dom, overlay};
use novel_core::constants::{NOTICE_NOT_READY, NOTICE_SCENE_FAILED, NOTICE_THANKS};
use novel_core::{Advance, DwellArm, SceneLoad, SceneTicket, Settled};
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// The single pending dwell timeout. Arming clears whatever was pending.
#[derive(Default)]
pub struct DwellTimer {
    handle: Option<i32>,
    callback: Option<Closure<dyn FnMut()>>,
}

impl DwellTimer {
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Some(w) = web::window() {
                w.clear_timeout_with_handle(handle);
            }
        }
        self.callback = None;
    }

    fn arm(&mut self, app: &Rc<App>, arm: DwellArm) {
        self.cancel();
        let Some(w) = web::window() else {
            return;
        };
        let weak = Rc::downgrade(app);
        let ticket = arm.ticket;
        let callback = Closure::wrap(Box::new(move || {
            if let Some(app) = weak.upgrade() {
                on_dwell_elapsed(&app, ticket);
            }
        }) as Box<dyn FnMut()>);
        match w.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            dom::millis(arm.delay),
        ) {
            Ok(handle) => {
                self.handle = Some(handle);
                self.callback = Some(callback);
            }
            Err(e) => log::error!("[scene] failed to arm dwell timer: {:?}", e),
        }
    }
}

fn on_dwell_elapsed(app: &Rc<App>, ticket: SceneTicket) {
    let acknowledged = app.scenes.borrow_mut().acknowledge(ticket);
    if acknowledged {
        app.ui.set_indicator_ready(true);
    }
}

fn arm_dwell(app: &Rc<App>, arm: DwellArm) {
    app.dwell.borrow_mut().arm(app, arm);
}

fn sync_screen(app: &Rc<App>) {
    let mode = app.scenes.borrow().mode();
    app.ui.show_screen(mode.screen());
    log::debug!("[scene] {:?}", app.scenes.borrow().snapshot());
}

fn notice(app: &Rc<App>, message: &str) {
    overlay::show_notice(message, app.config.notice_duration);
}

/// Menu -> loading -> music -> first scene -> game screen.
pub async fn start_game(app: Rc<App>) {
    if let Err(e) = app.scenes.borrow_mut().start_game() {
        log::debug!("[scene] start ignored: {e}");
        return;
    }
    app.dwell.borrow_mut().cancel();
    sync_screen(&app);

    audio::start_music(&app).await;

    let first = app.scenes.borrow_mut().enter_first_scene();
    let weak = Rc::downgrade(&app);
    match first {
        Ok(load) => run_scene_load(app, load).await,
        Err(e) => log::error!("[scene] {e}"),
    }
    if let Some(app) = weak.upgrade() {
        sync_screen(&app);
    }
}

/// Show the counter, start the effect, wait for the image, then arm the
/// dwell timer if this load is still the current one.
async fn run_scene_load(app: Rc<App>, load: SceneLoad) {
    app.dwell.borrow_mut().cancel();
    app.ui.set_counter(&load.counter_text);
    app.ui.set_indicator_ready(false);
    app.with_audio(|audio, out| {
        audio.play_effect(load.scene, out);
    });

    // A superseded load may never settle; hold only a weak handle while waiting.
    let image = app.ui.scene_image.clone();
    let weak: Weak<App> = Rc::downgrade(&app);
    drop(app);

    let ok = match dom::load_image(&image, &load.image_path).await {
        Ok(()) => true,
        Err(e) => {
            log::warn!("[scene] failed to load {}: {:?}", load.image_path, e);
            false
        }
    };
    let Some(app) = weak.upgrade() else {
        return;
    };

    let settled = app.scenes.borrow_mut().image_settled(load.ticket, ok);
    match settled {
        Settled::Stale => log::debug!("[scene] scene {} superseded", load.scene),
        Settled::Ready(arm) => {
            arm_dwell(&app, arm);
            log::info!("[scene] loaded scene {}", load.scene);
        }
        Settled::Failed { arm, restored } => {
            notice(&app, NOTICE_SCENE_FAILED);
            if let Some(restored) = restored {
                app.ui.set_counter(&restored.counter_text);
                app.ui.scene_image.set_src(&restored.image_path);
            }
            match arm {
                Some(arm) => arm_dwell(&app, arm),
                None => app.ui.set_indicator_ready(true),
            }
        }
    }
}

/// Click, Space and Enter.
pub fn advance(app: &Rc<App>) {
    let step = app.scenes.borrow_mut().advance();
    match step {
        Advance::Ignored => {}
        Advance::NotReady => notice(app, NOTICE_NOT_READY),
        Advance::Load(load) => spawn_local(run_scene_load(app.clone(), load)),
        Advance::Finished { ticket, delay } => {
            notice(app, NOTICE_THANKS);
            let app = app.clone();
            spawn_local(async move {
                dom::sleep(delay).await;
                let finished = app.scenes.borrow_mut().finish(ticket);
                if finished {
                    show_menu(&app);
                }
            });
        }
    }
}

fn show_menu(app: &Rc<App>) {
    app.dwell.borrow_mut().cancel();
    sync_screen(app);
}

/// Escape key.
pub fn escape(app: &Rc<App>) {
    let left = app.scenes.borrow_mut().escape();
    if left {
        show_menu(app);
    }
}

/// Back button on the settings screen.
pub fn back(app: &Rc<App>) {
    let left = app.scenes.borrow_mut().back();
    if left {
        show_menu(app);
    }
}

pub fn open_settings(app: &Rc<App>) {
    let opened = app.scenes.borrow_mut().open_settings();
    match opened {
        Ok(()) => {
            app.settings
                .borrow_mut()
                .load_current(&app.audio.borrow());
            sync_screen(app);
        }
        Err(e) => log::debug!("[scene] settings ignored: {e}"),
    }
}

pub fn wire_buttons(app: &Rc<App>, document: &web::Document) {
    let a = app.clone();
    dom::add_click_listener(document, "play-btn", move || {
        spawn_local(start_game(a.clone()));
    });
    let a = app.clone();
    dom::add_click_listener(document, "settings-btn", move || open_settings(&a));
    let a = app.clone();
    dom::add_click_listener(document, "back-btn", move || back(&a));
}
