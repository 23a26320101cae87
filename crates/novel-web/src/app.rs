use crate::audio::MediaOutput;
use crate::game::DwellTimer;
use crate::settings::DomVolumeInputs;
use crate::storage::LocalStore;
use crate::ui::Ui;
use novel_core::{AudioCommand, AudioController, NovelConfig, SceneController, SettingsController};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::{spawn_local, JsFuture};

/// Everything the event handlers share. Built once in `init` and handed to
/// each wiring function as an `Rc`.
pub struct App {
    pub config: NovelConfig,
    pub ui: Ui,
    pub audio: RefCell<AudioController<LocalStore>>,
    pub scenes: RefCell<SceneController>,
    pub settings: RefCell<SettingsController<DomVolumeInputs>>,
    pub media: MediaOutput,
    pub dwell: RefCell<DwellTimer>,
}

impl App {
    /// Run an audio operation and execute the commands it produced. A music
    /// play request nobody waits on is logged when it settles.
    pub fn with_audio<R>(
        self: &Rc<Self>,
        f: impl FnOnce(&mut AudioController<LocalStore>, &mut Vec<AudioCommand>) -> R,
    ) -> R {
        let mut out = Vec::new();
        let result = f(&mut self.audio.borrow_mut(), &mut out);
        if let Some(promise) = self.media.apply(self, out) {
            spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::warn!("[audio] music playback failed: {:?}", e);
                }
            });
        }
        result
    }

    pub fn with_settings<R>(
        self: &Rc<Self>,
        f: impl FnOnce(
            &mut SettingsController<DomVolumeInputs>,
            &mut AudioController<LocalStore>,
            &mut Vec<AudioCommand>,
        ) -> R,
    ) -> R {
        let mut out = Vec::new();
        let result = f(
            &mut self.settings.borrow_mut(),
            &mut self.audio.borrow_mut(),
            &mut out,
        );
        if let Some(promise) = self.media.apply(self, out) {
            spawn_local(async move {
                let _ = JsFuture::from(promise).await;
            });
        }
        result
    }
}
