#![cfg(target_arch = "wasm32")]
use novel_core::constants::{FATAL_INIT_MESSAGE, FATAL_RUNTIME_MESSAGE};
use novel_core::{AudioController, SceneController, SettingsController};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod app;
mod audio;
mod config;
mod dom;
mod events;
mod game;
mod overlay;
mod settings;
mod storage;
mod ui;

use app::App;

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        console_error_panic_hook::hook(info);
        if let Some(document) = dom::window_document() {
            overlay::show_fatal(&document, FATAL_RUNTIME_MESSAGE);
        }
    }));
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    install_panic_hook();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("[boot] novel-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("[boot] init error: {:?}", e);
            if let Some(document) = dom::window_document() {
                overlay::show_fatal(&document, FATAL_INIT_MESSAGE);
            }
        }
    });
    Ok(())
}

async fn wait_for_dom(document: &web::Document) {
    if document.ready_state() != "loading" {
        return;
    }
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let opts = web::AddEventListenerOptions::new();
        opts.set_once(true);
        let _ = document.add_event_listener_with_callback_and_add_event_listener_options(
            "DOMContentLoaded",
            &resolve,
            &opts,
        );
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    wait_for_dom(&document).await;

    let config = config::read_config(&document);
    let ui = ui::Ui::from_document(&document)?;
    let inputs = settings::DomVolumeInputs::from_document(&document)?;

    let audio = AudioController::new(storage::LocalStore::open());
    let media = audio::MediaOutput::new(&config.music_path, audio.music_volume());
    let scenes = SceneController::new(&config);
    let mut volume_settings = SettingsController::new(inputs);
    volume_settings.load_current(&audio);

    let app = Rc::new(App {
        config,
        ui,
        audio: RefCell::new(audio),
        scenes: RefCell::new(scenes),
        settings: RefCell::new(volume_settings),
        media,
        dwell: RefCell::new(game::DwellTimer::default()),
    });

    app.ui.load_menu_image();
    app.ui.show_screen(app.scenes.borrow().mode().screen());

    game::wire_buttons(&app, &document);
    settings::wire_settings(&app, &document);
    events::wire_game_pointer(&app);
    events::wire_global_keydown(app.clone(), &document);

    log::info!(
        "[boot] ready: {} scenes, dwell {}ms",
        app.config.max_scene,
        app.config.dwell.as_millis()
    );
    Ok(())
}
