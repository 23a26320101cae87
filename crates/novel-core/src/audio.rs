//! Music and effect channel control.
//!
//! The controller owns the volume preferences and the logical state of the
//! two channels. It never touches a media element: each operation appends
//! [`AudioCommand`]s to an output buffer which the frontend executes, and the
//! frontend reports asynchronous outcomes (playback rejected, effect ended)
//! back through the `music_*`/`effect_*` notification methods.

use crate::assets::effect_path;
use crate::prefs::{load_preferences, save_preferences, PreferenceStore};
use crate::volume::{VolumeChannel, VolumePreferences};

pub type EffectId = u64;

#[derive(Clone, Debug, PartialEq)]
pub enum AudioCommand {
    /// Play the looping music track, rewinding to zero first when `restart`.
    PlayMusic { restart: bool, volume: f64 },
    PauseMusic,
    SetMusicVolume(f64),
    /// Stop and release the live effect.
    StopEffect,
    /// Create a fresh effect handle for `path` and play it.
    PlayEffect {
        id: EffectId,
        scene: u32,
        path: String,
        volume: f64,
    },
    SetEffectVolume(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MusicRetry {
    Idle,
    Armed,
}

pub struct AudioController<S> {
    store: S,
    volumes: VolumePreferences,
    music_playing: bool,
    retry: MusicRetry,
    effect: Option<EffectId>,
    next_effect_id: EffectId,
}

impl<S: PreferenceStore> AudioController<S> {
    /// Build the controller, restoring any persisted preferences from `store`.
    pub fn new(store: S) -> Self {
        let volumes = load_preferences(&store);
        log::info!(
            "[audio] volumes master={:.2} music={:.2} sfx={:.2}",
            volumes.master,
            volumes.music,
            volumes.sfx
        );
        Self {
            store,
            volumes,
            music_playing: false,
            retry: MusicRetry::Idle,
            effect: None,
            next_effect_id: 1,
        }
    }

    /// Copy of the current preferences.
    pub fn volumes(&self) -> VolumePreferences {
        self.volumes
    }

    pub fn music_volume(&self) -> f64 {
        self.volumes.effective_music()
    }

    pub fn effect_volume(&self) -> f64 {
        self.volumes.effective_sfx()
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn is_retry_armed(&self) -> bool {
        self.retry == MusicRetry::Armed
    }

    pub fn current_effect(&self) -> Option<EffectId> {
        self.effect
    }

    // ---------------- Music ----------------

    pub fn start_music(&mut self, out: &mut Vec<AudioCommand>) {
        self.music_playing = true;
        out.push(AudioCommand::PlayMusic {
            restart: true,
            volume: self.music_volume(),
        });
    }

    /// The host refused to start playback. Returns true when the caller should
    /// register the one-shot gesture listeners; at most one retry is armed at
    /// a time.
    pub fn music_rejected(&mut self) -> bool {
        self.music_playing = false;
        if self.retry == MusicRetry::Armed {
            return false;
        }
        self.retry = MusicRetry::Armed;
        log::info!("[audio] music blocked; retrying on next interaction");
        true
    }

    /// Consume the armed retry on a user gesture. Emits a play command only if
    /// a retry was armed and the music is still stopped.
    pub fn take_music_retry(&mut self, out: &mut Vec<AudioCommand>) -> bool {
        if std::mem::replace(&mut self.retry, MusicRetry::Idle) != MusicRetry::Armed {
            return false;
        }
        if self.music_playing {
            return false;
        }
        self.music_playing = true;
        out.push(AudioCommand::PlayMusic {
            restart: false,
            volume: self.music_volume(),
        });
        true
    }

    /// The gesture retry failed as well. Nothing further is scheduled.
    pub fn music_retry_failed(&mut self) {
        self.music_playing = false;
        log::warn!("[audio] music still blocked after retry");
    }

    pub fn pause_music(&mut self, out: &mut Vec<AudioCommand>) {
        if !self.music_playing {
            return;
        }
        self.music_playing = false;
        out.push(AudioCommand::PauseMusic);
    }

    pub fn resume_music(&mut self, out: &mut Vec<AudioCommand>) {
        if self.music_playing {
            return;
        }
        self.music_playing = true;
        out.push(AudioCommand::PlayMusic {
            restart: false,
            volume: self.music_volume(),
        });
    }

    // ---------------- Effects ----------------

    /// Replace the live effect with the one addressed by `scene`.
    pub fn play_effect(&mut self, scene: u32, out: &mut Vec<AudioCommand>) -> EffectId {
        if self.effect.take().is_some() {
            out.push(AudioCommand::StopEffect);
        }
        let id = self.next_effect_id;
        self.next_effect_id += 1;
        self.effect = Some(id);
        out.push(AudioCommand::PlayEffect {
            id,
            scene,
            path: effect_path(scene),
            volume: self.effect_volume(),
        });
        id
    }

    /// Natural end of an effect. Ignored when `id` was already superseded.
    pub fn effect_ended(&mut self, id: EffectId) -> bool {
        if self.effect == Some(id) {
            self.effect = None;
            true
        } else {
            false
        }
    }

    pub fn effect_failed(&mut self, id: EffectId, reason: &str) {
        log::warn!("[audio] effect #{id} failed: {reason}");
        self.effect_ended(id);
    }

    pub fn stop_all(&mut self, out: &mut Vec<AudioCommand>) {
        self.pause_music(out);
        if self.effect.take().is_some() {
            out.push(AudioCommand::StopEffect);
        }
    }

    // ---------------- Volume ----------------

    pub fn set_master_volume(&mut self, v: f64, out: &mut Vec<AudioCommand>) {
        self.set_volume(VolumeChannel::Master, v, out);
    }

    pub fn set_music_volume(&mut self, v: f64, out: &mut Vec<AudioCommand>) {
        self.set_volume(VolumeChannel::Music, v, out);
    }

    pub fn set_sfx_volume(&mut self, v: f64, out: &mut Vec<AudioCommand>) {
        self.set_volume(VolumeChannel::Sfx, v, out);
    }

    /// Clamp and store `v`, push the affected channel volumes, then persist.
    pub fn set_volume(&mut self, channel: VolumeChannel, v: f64, out: &mut Vec<AudioCommand>) {
        self.volumes.set(channel, v);
        if matches!(channel, VolumeChannel::Master | VolumeChannel::Music) {
            out.push(AudioCommand::SetMusicVolume(self.music_volume()));
        }
        if matches!(channel, VolumeChannel::Master | VolumeChannel::Sfx) && self.effect.is_some() {
            out.push(AudioCommand::SetEffectVolume(self.effect_volume()));
        }
        if let Err(e) = save_preferences(&mut self.store, &self.volumes) {
            log::warn!("[prefs] failed to save audio settings: {e}");
        }
    }
}
