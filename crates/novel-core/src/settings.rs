//! Two-way binding between the 0..=100 volume sliders and the audio
//! controller's unit-scale preferences.
//!
//! The binding keeps no copy of the volumes; what the sliders show is read
//! back through [`VolumeInputs`] whenever it is needed.

use crate::audio::{AudioCommand, AudioController, EffectId};
use crate::constants::{
    DEFAULT_MASTER_VOLUME, DEFAULT_MUSIC_VOLUME, DEFAULT_SFX_VOLUME, PREVIEW_EFFECT_SCENE,
};
use crate::prefs::PreferenceStore;
use crate::volume::{from_percent, percent_label, to_percent, VolumeChannel};

/// The slider widgets and their percentage readouts.
pub trait VolumeInputs {
    fn value(&self, channel: VolumeChannel) -> u8;
    fn set_value(&mut self, channel: VolumeChannel, percent: u8);
    fn set_readout(&mut self, channel: VolumeChannel, text: &str);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VolumePercents {
    pub master: u8,
    pub music: u8,
    pub sfx: u8,
}

impl VolumePercents {
    pub fn defaults() -> Self {
        Self {
            master: to_percent(DEFAULT_MASTER_VOLUME),
            music: to_percent(DEFAULT_MUSIC_VOLUME),
            sfx: to_percent(DEFAULT_SFX_VOLUME),
        }
    }

    pub const MUTED: VolumePercents = VolumePercents {
        master: 0,
        music: 0,
        sfx: 0,
    };
}

/// Any subset of the three percentages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PartialPercents {
    pub master: Option<u8>,
    pub music: Option<u8>,
    pub sfx: Option<u8>,
}

impl PartialPercents {
    fn get(&self, channel: VolumeChannel) -> Option<u8> {
        match channel {
            VolumeChannel::Master => self.master,
            VolumeChannel::Music => self.music,
            VolumeChannel::Sfx => self.sfx,
        }
    }
}

impl From<VolumePercents> for PartialPercents {
    fn from(p: VolumePercents) -> Self {
        Self {
            master: Some(p.master),
            music: Some(p.music),
            sfx: Some(p.sfx),
        }
    }
}

pub struct SettingsController<I> {
    inputs: I,
}

impl<I: VolumeInputs> SettingsController<I> {
    pub fn new(inputs: I) -> Self {
        Self { inputs }
    }

    pub fn inputs(&self) -> &I {
        &self.inputs
    }

    /// Push the controller's preferences onto the sliders and readouts.
    pub fn load_current<S: PreferenceStore>(&mut self, audio: &AudioController<S>) {
        let volumes = audio.volumes();
        for channel in VolumeChannel::ALL {
            let p = to_percent(volumes.get(channel));
            self.inputs.set_value(channel, p);
            self.inputs.set_readout(channel, &percent_label(p));
        }
    }

    /// A slider moved. `raw` is the slider's value on the 0..=100 scale.
    pub fn on_input<S: PreferenceStore>(
        &mut self,
        channel: VolumeChannel,
        raw: f64,
        audio: &mut AudioController<S>,
        out: &mut Vec<AudioCommand>,
    ) {
        audio.set_volume(channel, from_percent(raw), out);
        let shown = to_percent(from_percent(raw));
        self.inputs.set_readout(channel, &percent_label(shown));
        log::debug!("[settings] {} -> {}%", channel.name(), shown);
    }

    pub fn current_settings(&self) -> VolumePercents {
        VolumePercents {
            master: self.inputs.value(VolumeChannel::Master),
            music: self.inputs.value(VolumeChannel::Music),
            sfx: self.inputs.value(VolumeChannel::Sfx),
        }
    }

    /// Apply any subset of percentages to both the sliders and the audio.
    pub fn apply_settings<S: PreferenceStore>(
        &mut self,
        settings: PartialPercents,
        audio: &mut AudioController<S>,
        out: &mut Vec<AudioCommand>,
    ) {
        for channel in VolumeChannel::ALL {
            if let Some(p) = settings.get(channel) {
                let p = p.min(100);
                self.inputs.set_value(channel, p);
                audio.set_volume(channel, from_percent(f64::from(p)), out);
                self.inputs.set_readout(channel, &percent_label(p));
            }
        }
    }

    pub fn reset_to_defaults<S: PreferenceStore>(
        &mut self,
        audio: &mut AudioController<S>,
        out: &mut Vec<AudioCommand>,
    ) {
        audio.set_master_volume(DEFAULT_MASTER_VOLUME, out);
        audio.set_music_volume(DEFAULT_MUSIC_VOLUME, out);
        audio.set_sfx_volume(DEFAULT_SFX_VOLUME, out);
        self.load_current(audio);
    }

    pub fn mute_all<S: PreferenceStore>(
        &mut self,
        audio: &mut AudioController<S>,
        out: &mut Vec<AudioCommand>,
    ) {
        self.apply_settings(VolumePercents::MUTED.into(), audio, out);
    }

    pub fn unmute_all<S: PreferenceStore>(
        &mut self,
        audio: &mut AudioController<S>,
        out: &mut Vec<AudioCommand>,
    ) {
        self.apply_settings(VolumePercents::defaults().into(), audio, out);
    }

    /// Preview the first scene's effect at the current sfx volume.
    pub fn test_sound_effect<S: PreferenceStore>(
        &self,
        audio: &mut AudioController<S>,
        out: &mut Vec<AudioCommand>,
    ) -> EffectId {
        audio.play_effect(PREVIEW_EFFECT_SCENE, out)
    }
}
