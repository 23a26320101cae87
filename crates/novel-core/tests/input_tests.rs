// Host-side tests for key mapping, asset addressing and configuration.

use novel_core::assets::{effect_path, menu_image_candidates, scene_image_path};
use novel_core::constants::*;
use novel_core::*;
use std::time::Duration;

#[test]
fn advance_and_back_keys() {
    assert_eq!(key_action(" "), Some(KeyAction::Advance));
    assert_eq!(key_action("Enter"), Some(KeyAction::Advance));
    assert_eq!(key_action("Escape"), Some(KeyAction::Back));
    assert_eq!(key_action("Space"), None);
    assert_eq!(key_action("a"), None);
    assert_eq!(key_action(""), None);
}

#[test]
fn asset_paths_follow_scene_index() {
    assert_eq!(scene_image_path(1), "./images/1.png");
    assert_eq!(scene_image_path(34), "./images/34.png");
    assert_eq!(effect_path(12), "/sounds/12.wav");
    assert_eq!(
        menu_image_candidates(),
        ["./images/0_menu.png", "./images/0.png"]
    );
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_have_logical_relationships() {
    assert!(MAX_SCENE >= 1);
    assert!(END_OF_GAME_DELAY > DWELL_INTERVAL);
    assert!(INDICATOR_DIM_OPACITY < INDICATOR_READY_OPACITY);
    assert!(PREVIEW_EFFECT_SCENE >= 1 && PREVIEW_EFFECT_SCENE <= MAX_SCENE);
    for v in [DEFAULT_MASTER_VOLUME, DEFAULT_MUSIC_VOLUME, DEFAULT_SFX_VOLUME] {
        assert!((0.0..=1.0).contains(&v));
    }
}

#[test]
fn config_overrides_parse_or_leave_untouched() {
    let mut config = NovelConfig::default();
    assert!(config.apply_override("max-scene", "12"));
    assert!(config.apply_override("dwell-ms", " 250 "));
    assert!(config.apply_override("end-delay-ms", "0"));
    assert!(config.apply_override("image-failure", "Revert"));
    assert_eq!(config.max_scene, 12);
    assert_eq!(config.dwell, Duration::from_millis(250));
    assert_eq!(config.end_delay, Duration::ZERO);
    assert_eq!(config.image_failure, ImageFailurePolicy::RevertToPrevious);

    let before = config.clone();
    assert!(!config.apply_override("max-scene", "0"));
    assert!(!config.apply_override("dwell-ms", "-5"));
    assert!(!config.apply_override("image-failure", "panic"));
    assert!(!config.apply_override("volume", "1"));
    assert_eq!(config, before);
}

#[test]
fn failure_policy_names() {
    assert_eq!("keep".parse::<ImageFailurePolicy>(), Ok(ImageFailurePolicy::KeepIndex));
    assert_eq!("retry".parse::<ImageFailurePolicy>(), Ok(ImageFailurePolicy::RetrySameIndex));
    assert_eq!(
        "skip".parse::<ImageFailurePolicy>(),
        Err(UnknownPolicy("skip".to_string()))
    );
}
