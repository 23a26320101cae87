//! Two-factor volume model: a master factor multiplied by a per-channel factor.

use crate::constants::{
    DEFAULT_MASTER_VOLUME, DEFAULT_MUSIC_VOLUME, DEFAULT_SFX_VOLUME, PERCENT_SCALE,
};
use serde::{Deserialize, Serialize};

/// One of the three user-facing volume sliders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VolumeChannel {
    Master,
    Music,
    Sfx,
}

impl VolumeChannel {
    pub const ALL: [VolumeChannel; 3] = [Self::Master, Self::Music, Self::Sfx];

    pub fn name(self) -> &'static str {
        match self {
            Self::Master => "master",
            Self::Music => "music",
            Self::Sfx => "sfx",
        }
    }
}

/// Persisted volume preferences. Every field stays within [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumePreferences {
    pub master: f64,
    pub music: f64,
    pub sfx: f64,
}

impl Default for VolumePreferences {
    fn default() -> Self {
        Self {
            master: DEFAULT_MASTER_VOLUME,
            music: DEFAULT_MUSIC_VOLUME,
            sfx: DEFAULT_SFX_VOLUME,
        }
    }
}

impl VolumePreferences {
    pub fn get(&self, channel: VolumeChannel) -> f64 {
        match channel {
            VolumeChannel::Master => self.master,
            VolumeChannel::Music => self.music,
            VolumeChannel::Sfx => self.sfx,
        }
    }

    /// Store `clamp_unit(value)` for the channel and return what was stored.
    pub fn set(&mut self, channel: VolumeChannel, value: f64) -> f64 {
        let v = clamp_unit(value);
        match channel {
            VolumeChannel::Master => self.master = v,
            VolumeChannel::Music => self.music = v,
            VolumeChannel::Sfx => self.sfx = v,
        }
        v
    }

    /// Clamp all three fields; used after deserializing an untrusted blob.
    pub fn clamped(self) -> Self {
        Self {
            master: clamp_unit(self.master),
            music: clamp_unit(self.music),
            sfx: clamp_unit(self.sfx),
        }
    }

    #[inline]
    pub fn effective_music(&self) -> f64 {
        self.master * self.music
    }

    #[inline]
    pub fn effective_sfx(&self) -> f64 {
        self.master * self.sfx
    }
}

/// Clamp to [0, 1]. NaN maps to 0 so a garbage slider value means silence.
#[inline]
pub fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// Unit volume to the 0..=100 slider scale.
#[inline]
pub fn to_percent(v: f64) -> u8 {
    (clamp_unit(v) * PERCENT_SCALE).round() as u8
}

#[inline]
pub fn from_percent(p: f64) -> f64 {
    p / PERCENT_SCALE
}

#[inline]
pub fn percent_label(p: u8) -> String {
    format!("{p}%")
}
