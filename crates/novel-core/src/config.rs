//! Runtime configuration assembled from the constants, optionally overridden
//! by the host page.

use crate::constants::{DWELL_INTERVAL, END_OF_GAME_DELAY, MAX_SCENE, MUSIC_PATH, NOTICE_DURATION};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// What happens to the scene index when a scene image fails to load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageFailurePolicy {
    /// Stay on the new index with whatever is on screen; the dwell timer is
    /// still armed so the reader can move past the broken scene.
    #[default]
    KeepIndex,
    /// Roll the index back to the scene that was showing before.
    RevertToPrevious,
    /// Keep the index; once the dwell elapses the next advance reloads
    /// the same scene.
    RetrySameIndex,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown image failure policy `{0}` (expected keep, revert or retry)")]
pub struct UnknownPolicy(pub String);

impl FromStr for ImageFailurePolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep" => Ok(Self::KeepIndex),
            "revert" => Ok(Self::RevertToPrevious),
            "retry" => Ok(Self::RetrySameIndex),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NovelConfig {
    pub max_scene: u32,
    pub dwell: Duration,
    pub end_delay: Duration,
    pub notice_duration: Duration,
    pub music_path: String,
    pub image_failure: ImageFailurePolicy,
}

impl Default for NovelConfig {
    fn default() -> Self {
        Self {
            max_scene: MAX_SCENE,
            dwell: DWELL_INTERVAL,
            end_delay: END_OF_GAME_DELAY,
            notice_duration: NOTICE_DURATION,
            music_path: MUSIC_PATH.to_string(),
            image_failure: ImageFailurePolicy::default(),
        }
    }
}

impl NovelConfig {
    /// Apply a single `name=value` override. Returns false (and leaves the
    /// config untouched) when the name is unknown or the value does not parse.
    pub fn apply_override(&mut self, name: &str, value: &str) -> bool {
        let value = value.trim();
        match name {
            "max-scene" => match value.parse::<u32>() {
                Ok(n) if n >= 1 => {
                    self.max_scene = n;
                    true
                }
                _ => false,
            },
            "dwell-ms" => value
                .parse::<u64>()
                .map(|ms| self.dwell = Duration::from_millis(ms))
                .is_ok(),
            "end-delay-ms" => value
                .parse::<u64>()
                .map(|ms| self.end_delay = Duration::from_millis(ms))
                .is_ok(),
            "image-failure" => value
                .parse::<ImageFailurePolicy>()
                .map(|p| self.image_failure = p)
                .is_ok(),
            _ => false,
        }
    }
}
