//! Linear scene sequencing and the coarse UI state machine.
//!
//! Every scene load is identified by a [`SceneTicket`] carrying a generation
//! counter. Starting a new load, returning to the menu or starting a new game
//! bumps the generation, so completions and timers belonging to an older load
//! are recognised as stale and dropped.

use crate::assets::scene_image_path;
use crate::config::{ImageFailurePolicy, NovelConfig};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Menu,
    Loading,
    Playing,
    Settings,
}

/// Screens toggled by the frontend; one per mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Game,
    Settings,
    Loading,
}

impl Mode {
    pub fn screen(self) -> Screen {
        match self {
            Mode::Menu => Screen::Menu,
            Mode::Loading => Screen::Loading,
            Mode::Playing => Screen::Game,
            Mode::Settings => Screen::Settings,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneEvent {
    StartGame,
    FirstSceneSettled,
    Advance,
    Finish,
    Escape,
    OpenSettings,
    Back,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("no transition from {mode:?} on {event:?}")]
    InvalidTransition { mode: Mode, event: SceneEvent },
    #[error("scene {scene} outside 1..={max}")]
    OutOfRange { scene: u32, max: u32 },
}

/// The full transition table. Anything not listed is rejected.
pub fn next_mode(mode: Mode, event: SceneEvent) -> Result<Mode, SceneError> {
    use Mode as M;
    use SceneEvent as E;
    match (mode, event) {
        (M::Menu, E::StartGame) => Ok(M::Loading),
        (M::Menu, E::OpenSettings) => Ok(M::Settings),
        (M::Loading, E::FirstSceneSettled) => Ok(M::Playing),
        (M::Playing, E::Advance) => Ok(M::Playing),
        (M::Playing, E::Finish) | (M::Playing, E::Escape) => Ok(M::Menu),
        (M::Settings, E::Escape) | (M::Settings, E::Back) => Ok(M::Menu),
        _ => Err(SceneError::InvalidTransition { mode, event }),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SceneState {
    pub current_scene: u32,
    pub mode: Mode,
    pub scene_acknowledged: bool,
}

impl SceneState {
    const MENU: SceneState = SceneState {
        current_scene: 0,
        mode: Mode::Menu,
        scene_acknowledged: false,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SceneSnapshot {
    pub current_scene: u32,
    pub max_scene: u32,
    pub mode: Mode,
    pub scene_acknowledged: bool,
}

/// Identifies one scene load. Only the most recent ticket is live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneTicket {
    scene: u32,
    generation: u64,
}

impl SceneTicket {
    pub fn scene(&self) -> u32 {
        self.scene
    }
}

/// Identifies a pending end-of-game return to the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EndTicket {
    generation: u64,
}

/// Work the frontend performs for one scene transition: show the counter,
/// load the image, start the effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneLoad {
    pub ticket: SceneTicket,
    pub scene: u32,
    pub image_path: String,
    pub counter_text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DwellArm {
    pub ticket: SceneTicket,
    pub delay: Duration,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Not playing, or the end-of-game message is already up.
    Ignored,
    /// The dwell interval has not elapsed; show a notice.
    NotReady,
    Load(SceneLoad),
    /// Past the last scene: show the completion message and call
    /// [`SceneController::finish`] after `delay`.
    Finished { ticket: EndTicket, delay: Duration },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Settled {
    /// The load was superseded; do nothing.
    Stale,
    /// Image is up; arm the dwell timer.
    Ready(DwellArm),
    /// Image failed. `arm` is set when the dwell timer should still run;
    /// otherwise the scene is already acknowledged. `restored` names the
    /// scene whose image and counter should be put back on screen.
    Failed {
        arm: Option<DwellArm>,
        restored: Option<SceneLoad>,
    },
}

pub struct SceneController {
    max_scene: u32,
    dwell: Duration,
    end_delay: Duration,
    image_failure: ImageFailurePolicy,
    state: SceneState,
    generation: u64,
    previous_scene: u32,
    ending: bool,
    reload_pending: bool,
}

#[inline]
pub fn scene_label(scene: u32) -> String {
    format!("Scene {scene}")
}

impl SceneController {
    pub fn new(config: &NovelConfig) -> Self {
        Self {
            max_scene: config.max_scene.max(1),
            dwell: config.dwell,
            end_delay: config.end_delay,
            image_failure: config.image_failure,
            state: SceneState::MENU,
            generation: 0,
            previous_scene: 0,
            ending: false,
            reload_pending: false,
        }
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn max_scene(&self) -> u32 {
        self.max_scene
    }

    pub fn is_ending(&self) -> bool {
        self.ending
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            current_scene: self.state.current_scene,
            max_scene: self.max_scene,
            mode: self.state.mode,
            scene_acknowledged: self.state.scene_acknowledged,
        }
    }

    fn transition(&mut self, event: SceneEvent) -> Result<Mode, SceneError> {
        let next = next_mode(self.state.mode, event)?;
        if next != self.state.mode {
            log::debug!("[scene] {:?} --{:?}--> {:?}", self.state.mode, event, next);
        }
        self.state.mode = next;
        Ok(next)
    }

    fn reset_to_menu(&mut self) {
        self.state = SceneState::MENU;
        self.generation += 1;
        self.previous_scene = 0;
        self.ending = false;
        self.reload_pending = false;
    }

    /// Menu -> Loading. The caller starts the music, then calls
    /// [`enter_first_scene`](Self::enter_first_scene).
    pub fn start_game(&mut self) -> Result<(), SceneError> {
        next_mode(self.state.mode, SceneEvent::StartGame)?;
        self.reset_to_menu();
        self.transition(SceneEvent::StartGame)?;
        log::info!("[scene] starting game ({} scenes)", self.max_scene);
        Ok(())
    }

    pub fn enter_first_scene(&mut self) -> Result<SceneLoad, SceneError> {
        if self.state.mode != Mode::Loading {
            return Err(SceneError::InvalidTransition {
                mode: self.state.mode,
                event: SceneEvent::FirstSceneSettled,
            });
        }
        self.previous_scene = 0;
        Ok(self.begin_load(1))
    }

    /// Begin loading scene `scene`, superseding any load in flight.
    pub fn load_scene(&mut self, scene: u32) -> Result<SceneLoad, SceneError> {
        if scene == 0 || scene > self.max_scene {
            return Err(SceneError::OutOfRange {
                scene,
                max: self.max_scene,
            });
        }
        Ok(self.begin_load(scene))
    }

    fn begin_load(&mut self, scene: u32) -> SceneLoad {
        self.generation += 1;
        self.reload_pending = false;
        self.state.current_scene = scene;
        self.state.scene_acknowledged = false;
        SceneLoad {
            ticket: SceneTicket {
                scene,
                generation: self.generation,
            },
            scene,
            image_path: scene_image_path(scene),
            counter_text: scene_label(scene),
        }
    }

    pub fn is_current(&self, ticket: SceneTicket) -> bool {
        ticket.generation == self.generation
    }

    fn settle_first_scene(&mut self) {
        if self.state.mode == Mode::Loading {
            if let Err(e) = self.transition(SceneEvent::FirstSceneSettled) {
                log::error!("[scene] {e}");
            }
        }
    }

    /// The image for `ticket` finished loading (`ok`) or failed.
    pub fn image_settled(&mut self, ticket: SceneTicket, ok: bool) -> Settled {
        if !self.is_current(ticket) {
            return Settled::Stale;
        }
        self.settle_first_scene();
        let arm = DwellArm {
            ticket,
            delay: self.dwell,
        };
        if ok {
            return Settled::Ready(arm);
        }
        match self.image_failure {
            ImageFailurePolicy::KeepIndex => Settled::Failed {
                arm: Some(arm),
                restored: None,
            },
            ImageFailurePolicy::RevertToPrevious if self.previous_scene >= 1 => {
                let previous = self.previous_scene;
                let restored = self.begin_load(previous);
                self.state.scene_acknowledged = true;
                Settled::Failed {
                    arm: None,
                    restored: Some(restored),
                }
            }
            ImageFailurePolicy::RevertToPrevious => Settled::Failed {
                arm: Some(arm),
                restored: None,
            },
            ImageFailurePolicy::RetrySameIndex => {
                self.reload_pending = true;
                Settled::Failed {
                    arm: Some(arm),
                    restored: None,
                }
            }
        }
    }

    /// Dwell timer for `ticket` fired. Returns true when the scene became
    /// acknowledged; stale tickets never flip the flag.
    pub fn acknowledge(&mut self, ticket: SceneTicket) -> bool {
        if !self.is_current(ticket) || self.state.scene_acknowledged {
            return false;
        }
        self.state.scene_acknowledged = true;
        true
    }

    /// Click, Space and Enter all land here.
    pub fn advance(&mut self) -> Advance {
        if self.state.mode != Mode::Playing || self.ending {
            return Advance::Ignored;
        }
        if !self.state.scene_acknowledged {
            return Advance::NotReady;
        }
        if self.reload_pending {
            let scene = self.state.current_scene;
            return Advance::Load(self.begin_load(scene));
        }
        if self.state.current_scene >= self.max_scene {
            self.ending = true;
            log::info!("[scene] reached final scene {}", self.max_scene);
            return Advance::Finished {
                ticket: EndTicket {
                    generation: self.generation,
                },
                delay: self.end_delay,
            };
        }
        self.previous_scene = self.state.current_scene;
        let next = self.state.current_scene + 1;
        Advance::Load(self.begin_load(next))
    }

    /// End-of-game delay elapsed. Returns true when the menu should be shown.
    pub fn finish(&mut self, ticket: EndTicket) -> bool {
        if !self.ending || ticket.generation != self.generation {
            return false;
        }
        match self.transition(SceneEvent::Finish) {
            Ok(_) => {
                self.reset_to_menu();
                true
            }
            Err(e) => {
                log::error!("[scene] {e}");
                false
            }
        }
    }

    /// Escape key: back to the menu from playing or settings.
    pub fn escape(&mut self) -> bool {
        self.to_menu(SceneEvent::Escape)
    }

    /// Back button on the settings screen.
    pub fn back(&mut self) -> bool {
        self.to_menu(SceneEvent::Back)
    }

    fn to_menu(&mut self, event: SceneEvent) -> bool {
        match self.transition(event) {
            Ok(_) => {
                self.reset_to_menu();
                true
            }
            Err(_) => false,
        }
    }

    pub fn open_settings(&mut self) -> Result<(), SceneError> {
        self.transition(SceneEvent::OpenSettings).map(|_| ())
    }
}
