use std::time::Duration;

// Shared tuning constants for the viewer. The web frontend reads these through
// `NovelConfig` so a page can override a few of them with data attributes.

// Volume defaults (unit scale, 0..=1)
pub const DEFAULT_MASTER_VOLUME: f64 = 0.5;
pub const DEFAULT_MUSIC_VOLUME: f64 = 0.3;
pub const DEFAULT_SFX_VOLUME: f64 = 0.7;

// Slider scale used by the settings screen (0..=100 integer)
pub const PERCENT_SCALE: f64 = 100.0;

// Key under which the volume blob is persisted
pub const PREFERENCES_KEY: &str = "visualNovelAudioSettings";

// Scene sequencing
pub const MAX_SCENE: u32 = 34; // images/1.png ..= images/34.png
pub const DWELL_INTERVAL: Duration = Duration::from_millis(1000);
pub const END_OF_GAME_DELAY: Duration = Duration::from_millis(3000);
pub const NOTICE_DURATION: Duration = Duration::from_millis(2000);

// Ready-indicator opacity
pub const INDICATOR_DIM_OPACITY: f64 = 0.3;
pub const INDICATOR_READY_OPACITY: f64 = 1.0;

// Scene played by the settings screen's preview button
pub const PREVIEW_EFFECT_SCENE: u32 = 1;

// Asset addressing
pub const MUSIC_PATH: &str = "/Music Background/Classroom Vibes.mp3";
pub const IMAGE_DIR: &str = "./images";
pub const SOUND_DIR: &str = "/sounds";
pub const MENU_IMAGE_PATH: &str = "./images/0_menu.png";
pub const MENU_IMAGE_FALLBACK_PATH: &str = "./images/0.png";

// User-facing notices
pub const NOTICE_NOT_READY: &str = "Please wait a moment before continuing...";
pub const NOTICE_SCENE_FAILED: &str = "Failed to load scene. Please try again.";
pub const NOTICE_THANKS: &str = "Thank you for playing!";
pub const FATAL_INIT_MESSAGE: &str = "Failed to initialize game. Please refresh the page.";
pub const FATAL_RUNTIME_MESSAGE: &str = "An unexpected error occurred.";
