use crate::app::App;
use crate::{dom, game};
use novel_core::{key_action, KeyAction, Mode};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, app: &Rc<App>) {
    let Some(action) = key_action(&ev.key()) else {
        return;
    };
    match action {
        KeyAction::Advance => {
            // Keep Space from scrolling or re-clicking a focused button mid-game.
            if app.scenes.borrow().mode() == Mode::Playing {
                ev.prevent_default();
            }
            game::advance(app);
        }
        KeyAction::Back => game::escape(app),
    }
}

pub fn wire_global_keydown(app: Rc<App>, document: &web::Document) {
    dom::add_event_listener(document, "keydown", move |ev: web::Event| {
        if let Some(kev) = ev.dyn_ref::<web::KeyboardEvent>() {
            handle_global_keydown(kev, &app);
        }
    });
}
