use crate::app::App;
use crate::{dom, game};
use std::rc::Rc;
use web_sys as web;

/// Click on the game screen advances; the context menu is suppressed there.
pub fn wire_game_pointer(app: &Rc<App>) {
    let Some(screen) = app.ui.game_screen().cloned() else {
        return;
    };
    let a = app.clone();
    dom::add_event_listener(&screen, "click", move |_ev| game::advance(&a));
    dom::add_event_listener(&screen, "contextmenu", |ev: web::Event| ev.prevent_default());
}
