// Host-side tests for the audio controller's command stream.

use novel_core::*;

fn make_audio() -> AudioController<MemoryStore> {
    AudioController::new(MemoryStore::new())
}

#[test]
fn start_music_restarts_from_zero_at_effective_volume() {
    let mut audio = make_audio();
    let mut out = Vec::new();
    audio.start_music(&mut out);
    assert_eq!(
        out,
        vec![AudioCommand::PlayMusic {
            restart: true,
            volume: 0.5 * 0.3
        }]
    );
    assert!(audio.is_music_playing());
}

#[test]
fn rejected_music_arms_exactly_one_retry() {
    let mut audio = make_audio();
    let mut out = Vec::new();
    audio.start_music(&mut out);
    assert!(audio.music_rejected());
    assert!(audio.is_retry_armed());
    // A second rejection while armed does not register more listeners.
    assert!(!audio.music_rejected());

    out.clear();
    assert!(audio.take_music_retry(&mut out));
    assert_eq!(
        out,
        vec![AudioCommand::PlayMusic {
            restart: false,
            volume: 0.5 * 0.3
        }]
    );
    assert!(!audio.is_retry_armed());

    // Further gestures do nothing, even if the retry failed.
    audio.music_retry_failed();
    out.clear();
    assert!(!audio.take_music_retry(&mut out));
    assert!(out.is_empty());
    assert!(!audio.is_music_playing());
}

#[test]
fn retry_is_dropped_when_music_already_playing() {
    let mut audio = make_audio();
    let mut out = Vec::new();
    audio.start_music(&mut out);
    audio.music_rejected();
    audio.resume_music(&mut out);
    out.clear();
    assert!(!audio.take_music_retry(&mut out));
    assert!(out.is_empty());
    assert!(!audio.is_retry_armed());
}

#[test]
fn effect_replaces_previous_handle() {
    let mut audio = make_audio();
    let mut out = Vec::new();
    let first = audio.play_effect(3, &mut out);
    assert_eq!(
        out,
        vec![AudioCommand::PlayEffect {
            id: first,
            scene: 3,
            path: "/sounds/3.wav".to_string(),
            volume: 0.5 * 0.7
        }]
    );

    out.clear();
    let second = audio.play_effect(4, &mut out);
    assert_ne!(first, second);
    assert_eq!(out[0], AudioCommand::StopEffect);
    assert!(matches!(out[1], AudioCommand::PlayEffect { scene: 4, .. }));
    assert_eq!(audio.current_effect(), Some(second));

    // The superseded effect ending must not clear the live one.
    assert!(!audio.effect_ended(first));
    assert_eq!(audio.current_effect(), Some(second));
    assert!(audio.effect_ended(second));
    assert_eq!(audio.current_effect(), None);
}

#[test]
fn effect_failure_is_swallowed() {
    let mut audio = make_audio();
    let mut out = Vec::new();
    let id = audio.play_effect(9, &mut out);
    audio.effect_failed(id, "404");
    assert_eq!(audio.current_effect(), None);
    // The next effect starts cleanly without a stop.
    out.clear();
    audio.play_effect(10, &mut out);
    assert_eq!(out.len(), 1);
}

#[test]
fn effect_volume_updates_only_while_an_effect_is_live() {
    let mut audio = make_audio();
    let mut out = Vec::new();
    audio.set_sfx_volume(0.2, &mut out);
    assert!(out.is_empty());

    audio.play_effect(1, &mut out);
    out.clear();
    audio.set_master_volume(1.0, &mut out);
    assert_eq!(
        out,
        vec![
            AudioCommand::SetMusicVolume(0.3),
            AudioCommand::SetEffectVolume(0.2)
        ]
    );
}

#[test]
fn transport_controls_are_idempotent() {
    let mut audio = make_audio();
    let mut out = Vec::new();
    audio.pause_music(&mut out);
    assert!(out.is_empty());

    audio.resume_music(&mut out);
    audio.resume_music(&mut out);
    assert_eq!(out.len(), 1);

    out.clear();
    audio.pause_music(&mut out);
    audio.pause_music(&mut out);
    assert_eq!(out, vec![AudioCommand::PauseMusic]);

    out.clear();
    audio.play_effect(2, &mut out);
    audio.resume_music(&mut out);
    out.clear();
    audio.stop_all(&mut out);
    assert_eq!(out, vec![AudioCommand::PauseMusic, AudioCommand::StopEffect]);
    out.clear();
    audio.stop_all(&mut out);
    assert!(out.is_empty());
}
