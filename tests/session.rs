//! Full sessions driven through the headless platform

use lane_runner::audio::SoundEffect;
use lane_runner::input::InputEvent;
use lane_runner::persistence::MemoryStorage;
use lane_runner::platform::{FixedClock, HeadlessPlatform, RenderKind};
use lane_runner::sim::GamePhase;
use lane_runner::{BestRun, GameSession, Tuning};

const DT: f32 = 1.0 / 60.0;

type Session = GameSession<HeadlessPlatform, MemoryStorage>;

/// Every lane sits at x=0, so every obstacle is in the player's path
fn doomed_tuning() -> Tuning {
    Tuning {
        lane_x: vec![0.0, 0.0, 0.0],
        collectible_interval: 1000.0,
        ..Tuning::default()
    }
}

/// One lane, no obstacles: every collectible is picked up
fn harvest_tuning() -> Tuning {
    Tuning {
        lane_x: vec![0.0],
        obstacle_variants: Vec::new(),
        ..Tuning::default()
    }
}

fn session(tuning: Tuning, storage: MemoryStorage) -> Session {
    GameSession::new(tuning, 42, HeadlessPlatform::new(), storage)
}

fn run_until_game_over(session: &mut Session, max_seconds: f32) -> bool {
    let mut clock = FixedClock(DT);
    let frames = (max_seconds / DT) as usize;
    for _ in 0..frames {
        session.frame(&mut clock);
        if session.is_game_over() {
            return true;
        }
    }
    false
}

#[test]
fn test_trees_created_at_start() {
    let session = session(Tuning::default(), MemoryStorage::new());
    let platform = session.platform();
    let trees = platform
        .live
        .values()
        .filter(|d| d.kind == RenderKind::Tree)
        .count();
    assert_eq!(trees, session.state().forest.trees.len());
    assert!(trees > 0);
    assert_eq!(platform.score, 0);
    assert_eq!(platform.distance, 0);
    assert_eq!(platform.best_run, None);
    assert_eq!(platform.game_over_panel, None);
}

#[test]
fn test_pickups_update_score_and_scene() {
    let mut session = session(harvest_tuning(), MemoryStorage::new());
    assert!(!run_until_game_over(&mut session, 12.0));

    let score = session.state().session.score;
    assert!(score > 0);

    let platform = session.platform();
    assert_eq!(platform.score, score);
    let pickups = platform
        .requested_sounds
        .iter()
        .filter(|s| **s == SoundEffect::Pickup)
        .count();
    assert_eq!(pickups, score as usize);
    assert_eq!(platform.live_gameplay_count(), session.state().entity_count());
    assert_eq!(platform.stale_disposals, 0);
    assert_eq!(platform.distance, session.state().session.distance_meters());
}

#[test]
fn test_crash_ends_run_and_records_best() {
    let mut session = session(doomed_tuning(), MemoryStorage::new());
    assert!(run_until_game_over(&mut session, 30.0));
    assert_eq!(session.phase(), GamePhase::GameOver);

    let score = session.state().session.score;
    let distance = session.state().session.distance_meters();
    let expected = BestRun { score, distance };
    assert_eq!(session.best_run().load(), Some(expected));

    let platform = session.platform();
    assert_eq!(platform.best_run, Some((score, distance)));
    let panel = platform.game_over_panel.as_deref().unwrap_or_default();
    assert!(panel.starts_with(&format!("Collected: {} | Distance: {} m", score, distance)));
    assert!(panel.ends_with("New record!"));
    assert_eq!(
        &platform.requested_sounds[platform.requested_sounds.len() - 2..],
        &[SoundEffect::GameOver, SoundEffect::NewRecord]
    );
    assert_eq!(platform.reports.len(), 1);
    assert_eq!(platform.reports[0].score, score);
    assert_eq!(platform.reports[0].distance, distance);
}

#[test]
fn test_game_over_freezes_everything() {
    let mut session = session(doomed_tuning(), MemoryStorage::new());
    assert!(run_until_game_over(&mut session, 30.0));

    let lane = session.state().player.lane.target_lane();
    let distance = session.state().session.distance;
    let entities = session.state().entity_count();

    session.handle_input(InputEvent::LaneLeft);
    session.handle_input(InputEvent::LaneLeft);
    for _ in 0..120 {
        session.tick(DT);
    }

    assert_eq!(session.state().player.lane.target_lane(), lane);
    assert_eq!(session.state().session.distance, distance);
    assert_eq!(session.state().entity_count(), entities);
    assert_eq!(session.platform().reports.len(), 1);
}

#[test]
fn test_restart_clears_run() {
    let tuning = doomed_tuning();
    let base_speed = tuning.base_speed;
    let mut session = session(tuning, MemoryStorage::new());
    assert!(run_until_game_over(&mut session, 30.0));
    let best = session.platform().best_run;
    let trees = session.state().forest.trees.len();

    session.handle_input(InputEvent::Restart);

    assert_eq!(session.phase(), GamePhase::Playing);
    let state = session.state();
    assert_eq!(state.entity_count(), 0);
    assert_eq!(state.session.score, 0);
    assert_eq!(state.session.distance, 0.0);
    assert_eq!(state.session.speed, base_speed);
    assert_eq!(state.player.lane.target_lane(), 1);

    let platform = session.platform();
    assert_eq!(platform.live_gameplay_count(), 0);
    assert_eq!(platform.live.len(), trees);
    assert_eq!(platform.game_over_panel, None);
    assert_eq!(platform.score, 0);
    assert_eq!(platform.distance, 0);
    assert_eq!(platform.best_run, best);
    assert_eq!(platform.stale_disposals, 0);
}

#[test]
fn test_restart_ignored_while_playing() {
    let mut session = session(doomed_tuning(), MemoryStorage::new());
    for _ in 0..60 {
        session.tick(DT);
    }
    let distance = session.state().session.distance;
    assert!(!session.restart());
    assert_eq!(session.state().session.distance, distance);
}

#[test]
fn test_best_run_carries_across_sessions() {
    let mut first = session(doomed_tuning(), MemoryStorage::new());
    assert!(run_until_game_over(&mut first, 30.0));
    let record = first.best_run().load();
    let storage = first.best_run().storage().clone();

    // Same seed and tuning: an identical run ties and is not a record
    let mut second = session(doomed_tuning(), storage);
    assert_eq!(
        second.platform().best_run,
        record.map(|b| (b.score, b.distance))
    );
    assert!(run_until_game_over(&mut second, 30.0));

    let platform = second.platform();
    assert!(!platform.requested_sounds.contains(&SoundEffect::NewRecord));
    let panel = platform.game_over_panel.as_deref().unwrap_or_default();
    assert!(!panel.contains("New record!"));
    assert_eq!(second.best_run().load(), record);
}

#[test]
fn test_collaborator_failures_are_contained() {
    let mut platform = HeadlessPlatform::new();
    platform.reject_reports = true;
    let mut session = GameSession::new(doomed_tuning(), 7, platform, MemoryStorage::unavailable());

    assert!(run_until_game_over(&mut session, 30.0));

    let platform = session.platform();
    let panel = platform.game_over_panel.as_deref().unwrap_or_default();
    assert!(panel.starts_with("Collected: 0 | Distance: "));
    assert!(!panel.contains("New record!"));
    assert!(platform.requested_sounds.contains(&SoundEffect::GameOver));
    assert!(!platform.requested_sounds.contains(&SoundEffect::NewRecord));
    assert_eq!(platform.best_run, None);
    assert!(platform.reports.is_empty());
    assert_eq!(session.best_run().load(), None);

    session.handle_input(InputEvent::Restart);
    assert_eq!(session.phase(), GamePhase::Playing);
}
