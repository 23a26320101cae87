//! Asset addressing for scene images, effect sounds and the menu backdrop.

use crate::constants::{IMAGE_DIR, MENU_IMAGE_FALLBACK_PATH, MENU_IMAGE_PATH, SOUND_DIR};

/// Path of the full-screen image for a 1-based scene index.
#[inline]
pub fn scene_image_path(scene: u32) -> String {
    format!("{IMAGE_DIR}/{scene}.png")
}

/// Path of the sound effect paired with a scene.
#[inline]
pub fn effect_path(scene: u32) -> String {
    format!("{SOUND_DIR}/{scene}.wav")
}

/// Menu backdrop followed by the single fallback tried when it fails.
#[inline]
pub fn menu_image_candidates() -> [&'static str; 2] {
    [MENU_IMAGE_PATH, MENU_IMAGE_FALLBACK_PATH]
}
