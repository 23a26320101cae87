use crate::dom;
use novel_core::assets::menu_image_candidates;
use novel_core::constants::{INDICATOR_DIM_OPACITY, INDICATOR_READY_OPACITY};
use novel_core::Screen;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

fn screen_id(screen: Screen) -> &'static str {
    match screen {
        Screen::Menu => "main-menu",
        Screen::Game => "game-screen",
        Screen::Settings => "settings-screen",
        Screen::Loading => "loading-screen",
    }
}

const SCREENS: [Screen; 4] = [Screen::Menu, Screen::Game, Screen::Settings, Screen::Loading];

/// Handles to the markup the viewer drives.
pub struct Ui {
    screens: Vec<(Screen, web::Element)>,
    pub scene_image: web::HtmlImageElement,
    menu_image: Option<web::HtmlImageElement>,
    settings_bg: Option<web::HtmlImageElement>,
    scene_counter: Option<web::Element>,
    indicator: Option<web::HtmlElement>,
}

impl Ui {
    pub fn from_document(document: &web::Document) -> anyhow::Result<Self> {
        let screens = SCREENS
            .iter()
            .map(|&s| dom::element_by_id::<web::Element>(document, screen_id(s)).map(|el| (s, el)))
            .collect::<anyhow::Result<Vec<_>>>()?;
        let indicator = document
            .query_selector(".click-indicator")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok());
        Ok(Self {
            screens,
            scene_image: dom::element_by_id(document, "scene-image")?,
            menu_image: dom::element_by_id(document, "menu-image").ok(),
            settings_bg: dom::element_by_id(document, "settings-bg").ok(),
            scene_counter: document.get_element_by_id("scene-number"),
            indicator,
        })
    }

    pub fn game_screen(&self) -> Option<&web::Element> {
        self.screens
            .iter()
            .find(|(s, _)| *s == Screen::Game)
            .map(|(_, el)| el)
    }

    /// Mark exactly one screen `active`.
    pub fn show_screen(&self, screen: Screen) {
        for (s, el) in &self.screens {
            let cl = el.class_list();
            if *s == screen {
                let _ = cl.add_1("active");
            } else {
                let _ = cl.remove_1("active");
            }
        }
    }

    pub fn set_counter(&self, text: &str) {
        if let Some(el) = &self.scene_counter {
            el.set_text_content(Some(text));
        }
    }

    pub fn set_indicator_ready(&self, ready: bool) {
        if let Some(el) = &self.indicator {
            let opacity = if ready {
                INDICATOR_READY_OPACITY
            } else {
                INDICATOR_DIM_OPACITY
            };
            let _ = el.style().set_property("opacity", &opacity.to_string());
        }
    }

    /// Menu backdrop (reused behind the settings screen), with one fallback.
    pub fn load_menu_image(&self) {
        let [primary, fallback] = menu_image_candidates();
        if let Some(bg) = &self.settings_bg {
            bg.set_src(primary);
        }
        let Some(img) = &self.menu_image else {
            return;
        };
        let target = img.clone();
        let on_error = Closure::once_into_js(move || {
            log::warn!("[ui] menu image failed to load, trying {fallback}");
            target.set_onerror(None);
            target.set_src(fallback);
        });
        img.set_onerror(Some(on_error.unchecked_ref()));
        img.set_src(primary);
    }
}
