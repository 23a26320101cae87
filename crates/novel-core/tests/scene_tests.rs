// Host-side tests for scene sequencing. Timers are modelled by tickets: a
// test "fires" a timer by handing its ticket back to the controller.

use novel_core::*;
use std::time::Duration;

fn config(max_scene: u32, policy: ImageFailurePolicy) -> NovelConfig {
    NovelConfig {
        max_scene,
        image_failure: policy,
        ..NovelConfig::default()
    }
}

/// Start a game and settle scene 1 successfully, returning its dwell arm.
fn started(scenes: &mut SceneController) -> DwellArm {
    scenes.start_game().unwrap();
    let load = scenes.enter_first_scene().unwrap();
    match scenes.image_settled(load.ticket, true) {
        Settled::Ready(arm) => arm,
        other => panic!("unexpected {other:?}"),
    }
}

fn load_of(advance: Advance) -> SceneLoad {
    match advance {
        Advance::Load(load) => load,
        other => panic!("expected load, got {other:?}"),
    }
}

#[test]
fn transition_table_is_closed() {
    let modes = [Mode::Menu, Mode::Loading, Mode::Playing, Mode::Settings];
    let events = [
        SceneEvent::StartGame,
        SceneEvent::FirstSceneSettled,
        SceneEvent::Advance,
        SceneEvent::Finish,
        SceneEvent::Escape,
        SceneEvent::OpenSettings,
        SceneEvent::Back,
    ];
    let mut allowed = 0;
    for mode in modes {
        for event in events {
            if next_mode(mode, event).is_ok() {
                allowed += 1;
            }
        }
    }
    assert_eq!(allowed, 8);
    assert_eq!(next_mode(Mode::Menu, SceneEvent::StartGame), Ok(Mode::Loading));
    assert_eq!(next_mode(Mode::Loading, SceneEvent::FirstSceneSettled), Ok(Mode::Playing));
    assert_eq!(next_mode(Mode::Playing, SceneEvent::Escape), Ok(Mode::Menu));
    assert_eq!(next_mode(Mode::Settings, SceneEvent::Back), Ok(Mode::Menu));
    assert!(next_mode(Mode::Loading, SceneEvent::Escape).is_err());
    assert!(next_mode(Mode::Menu, SceneEvent::Advance).is_err());
}

#[test]
fn start_game_walks_menu_loading_playing() {
    let mut scenes = SceneController::new(&NovelConfig::default());
    assert_eq!(
        scenes.state(),
        SceneState {
            current_scene: 0,
            mode: Mode::Menu,
            scene_acknowledged: false
        }
    );
    scenes.start_game().unwrap();
    assert_eq!(scenes.mode(), Mode::Loading);
    assert_eq!(scenes.mode().screen(), Screen::Loading);

    let load = scenes.enter_first_scene().unwrap();
    assert_eq!(load.scene, 1);
    assert_eq!(load.image_path, "./images/1.png");
    assert_eq!(load.counter_text, "Scene 1");
    // Input during loading is ignored rather than rejected with a notice.
    assert_eq!(scenes.advance(), Advance::Ignored);

    let arm = match scenes.image_settled(load.ticket, true) {
        Settled::Ready(arm) => arm,
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(arm.delay, Duration::from_millis(1000));
    assert_eq!(scenes.mode(), Mode::Playing);
    assert_eq!(scenes.mode().screen(), Screen::Game);
}

#[test]
fn advance_before_dwell_is_refused() {
    let mut scenes = SceneController::new(&NovelConfig::default());
    let arm = started(&mut scenes);

    assert_eq!(scenes.advance(), Advance::NotReady);
    assert_eq!(scenes.state().current_scene, 1);
    assert!(!scenes.state().scene_acknowledged);

    assert!(scenes.acknowledge(arm.ticket));
    let load = load_of(scenes.advance());
    assert_eq!(load.scene, 2);
    assert_eq!(scenes.state().current_scene, 2);
    assert!(!scenes.state().scene_acknowledged);
    assert_eq!(scenes.advance(), Advance::NotReady);
}

#[test]
fn superseded_dwell_timer_never_fires() {
    let mut scenes = SceneController::new(&NovelConfig::default());
    let first = started(&mut scenes);
    assert!(scenes.acknowledge(first.ticket));
    let second = load_of(scenes.advance());

    // Scene 3 is requested directly while scene 2's timer is still pending.
    let pending = match scenes.image_settled(second.ticket, true) {
        Settled::Ready(arm) => arm,
        other => panic!("unexpected {other:?}"),
    };
    let third = scenes.load_scene(3).unwrap();
    assert!(!scenes.is_current(pending.ticket));
    assert!(!scenes.acknowledge(pending.ticket));
    assert!(!scenes.state().scene_acknowledged);

    // A late image completion for the stale load is ignored too.
    assert_eq!(scenes.image_settled(second.ticket, true), Settled::Stale);

    let arm = match scenes.image_settled(third.ticket, true) {
        Settled::Ready(arm) => arm,
        other => panic!("unexpected {other:?}"),
    };
    assert!(scenes.acknowledge(arm.ticket));
    assert_eq!(scenes.state().current_scene, 3);
}

#[test]
fn load_scene_rejects_out_of_range() {
    let mut scenes = SceneController::new(&config(5, ImageFailurePolicy::KeepIndex));
    assert_eq!(
        scenes.load_scene(0),
        Err(SceneError::OutOfRange { scene: 0, max: 5 })
    );
    assert!(scenes.load_scene(6).is_err());
    assert!(scenes.load_scene(5).is_ok());
}

#[test]
fn advancing_past_last_scene_returns_to_menu() {
    let mut scenes = SceneController::new(&config(2, ImageFailurePolicy::KeepIndex));
    let arm = started(&mut scenes);
    scenes.acknowledge(arm.ticket);
    let load = load_of(scenes.advance());
    if let Settled::Ready(arm) = scenes.image_settled(load.ticket, true) {
        scenes.acknowledge(arm.ticket);
    }
    assert_eq!(scenes.state().current_scene, 2);

    let (ticket, delay) = match scenes.advance() {
        Advance::Finished { ticket, delay } => (ticket, delay),
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(delay, Duration::from_millis(3000));
    assert!(scenes.is_ending());
    // Still showing the last scene until the delay elapses; input is ignored.
    assert_eq!(scenes.state().current_scene, 2);
    assert_eq!(scenes.mode(), Mode::Playing);
    assert_eq!(scenes.advance(), Advance::Ignored);

    assert!(scenes.finish(ticket));
    assert_eq!(
        scenes.state(),
        SceneState {
            current_scene: 0,
            mode: Mode::Menu,
            scene_acknowledged: false
        }
    );
    assert!(!scenes.finish(ticket));
}

#[test]
fn escape_during_end_delay_invalidates_finish() {
    let mut scenes = SceneController::new(&config(1, ImageFailurePolicy::KeepIndex));
    let arm = started(&mut scenes);
    scenes.acknowledge(arm.ticket);
    let ticket = match scenes.advance() {
        Advance::Finished { ticket, .. } => ticket,
        other => panic!("unexpected {other:?}"),
    };
    assert!(scenes.escape());
    scenes.start_game().unwrap();
    assert!(!scenes.finish(ticket));
    assert_eq!(scenes.mode(), Mode::Loading);
}

#[test]
fn escape_and_settings_navigation() {
    let mut scenes = SceneController::new(&NovelConfig::default());
    assert!(!scenes.escape());
    scenes.open_settings().unwrap();
    assert_eq!(scenes.mode(), Mode::Settings);
    assert!(scenes.open_settings().is_err());
    assert!(scenes.escape());
    assert_eq!(scenes.mode(), Mode::Menu);

    scenes.open_settings().unwrap();
    assert!(scenes.back());
    assert_eq!(scenes.mode(), Mode::Menu);

    let arm = started(&mut scenes);
    assert!(!scenes.back());
    assert!(scenes.escape());
    assert_eq!(scenes.state().current_scene, 0);
    assert!(!scenes.acknowledge(arm.ticket));
}

#[test]
fn start_game_only_from_menu() {
    let mut scenes = SceneController::new(&NovelConfig::default());
    scenes.start_game().unwrap();
    assert!(scenes.start_game().is_err());
    assert!(scenes.enter_first_scene().is_ok());
    let mut idle = SceneController::new(&NovelConfig::default());
    assert!(idle.enter_first_scene().is_err());
}

#[test]
fn image_failure_keep_index_still_arms_dwell() {
    let mut scenes = SceneController::new(&config(5, ImageFailurePolicy::KeepIndex));
    let arm = started(&mut scenes);
    scenes.acknowledge(arm.ticket);
    let load = load_of(scenes.advance());
    match scenes.image_settled(load.ticket, false) {
        Settled::Failed {
            arm: Some(arm),
            restored: None,
        } => {
            assert_eq!(scenes.state().current_scene, 2);
            assert!(scenes.acknowledge(arm.ticket));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(load_of(scenes.advance()).scene, 3);
}

#[test]
fn image_failure_revert_restores_previous_scene() {
    let mut scenes = SceneController::new(&config(5, ImageFailurePolicy::RevertToPrevious));
    let arm = started(&mut scenes);
    scenes.acknowledge(arm.ticket);
    let load = load_of(scenes.advance());
    match scenes.image_settled(load.ticket, false) {
        Settled::Failed {
            arm: None,
            restored: Some(restored),
        } => {
            assert_eq!(restored.scene, 1);
            assert_eq!(restored.image_path, "./images/1.png");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(scenes.state().current_scene, 1);
    assert!(scenes.state().scene_acknowledged);
    assert_eq!(load_of(scenes.advance()).scene, 2);
}

#[test]
fn image_failure_revert_on_first_scene_keeps_index() {
    let mut scenes = SceneController::new(&config(5, ImageFailurePolicy::RevertToPrevious));
    scenes.start_game().unwrap();
    let load = scenes.enter_first_scene().unwrap();
    assert!(matches!(
        scenes.image_settled(load.ticket, false),
        Settled::Failed { arm: Some(_), restored: None }
    ));
    assert_eq!(scenes.mode(), Mode::Playing);
    assert_eq!(scenes.state().current_scene, 1);
}

#[test]
fn image_failure_retry_reloads_same_index() {
    let mut scenes = SceneController::new(&config(5, ImageFailurePolicy::RetrySameIndex));
    let arm = started(&mut scenes);
    scenes.acknowledge(arm.ticket);
    let load = load_of(scenes.advance());
    let retry_arm = match scenes.image_settled(load.ticket, false) {
        Settled::Failed {
            arm: Some(arm),
            restored: None,
        } => arm,
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(retry_arm.ticket, load.ticket);
    assert!(!scenes.state().scene_acknowledged);
    assert_eq!(scenes.advance(), Advance::NotReady);
    assert_eq!(scenes.state().current_scene, 2);

    assert!(scenes.acknowledge(retry_arm.ticket));
    let again = load_of(scenes.advance());
    assert_eq!(again.scene, 2);
    assert_ne!(again.ticket, load.ticket);
    assert!(!scenes.state().scene_acknowledged);
    match scenes.image_settled(again.ticket, true) {
        Settled::Ready(arm) => assert!(scenes.acknowledge(arm.ticket)),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(load_of(scenes.advance()).scene, 3);
}

#[test]
fn snapshot_serializes_lowercase_mode() {
    let mut scenes = SceneController::new(&config(7, ImageFailurePolicy::KeepIndex));
    started(&mut scenes);
    let json = serde_json::to_value(scenes.snapshot()).unwrap();
    assert_eq!(json["mode"], "playing");
    assert_eq!(json["current_scene"], 1);
    assert_eq!(json["max_scene"], 7);
    assert_eq!(json["scene_acknowledged"], false);
}
