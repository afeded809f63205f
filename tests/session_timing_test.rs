//! Integration test: timers and the session context
//!
//! Tick pacing, power-up effects, the fun-fact interlude, pause, restarts
//! and high-score persistence across sessions.

use arcade_snake::config::EngineConfig;
use arcade_snake::high_score::{HighScoreStore, JsonFileStore, MemoryStore};
use arcade_snake::session::ArcadeSession;
use arcade_snake::snake::{
    Direction, Food, FoodKind, GameEvent, Phase, Position, PowerUp, PowerUpKind,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

type TestSession<S> = ArcadeSession<S, ChaCha8Rng>;

fn config() -> EngineConfig {
    EngineConfig {
        power_up_chance: 0.0,
        ..EngineConfig::default()
    }
}

fn session_with<S: HighScoreStore>(store: S) -> TestSession<S> {
    ArcadeSession::new(config(), store, ChaCha8Rng::seed_from_u64(21))
}

fn food_ahead<S: HighScoreStore>(session: &mut TestSession<S>, kind: FoodKind) {
    let game = session.game_mut();
    let position = game.head().step(game.direction);
    game.food = Some(Food { position, kind });
}

fn power_up_ahead<S: HighScoreStore>(session: &mut TestSession<S>, kind: PowerUpKind) {
    let game = session.game_mut();
    let position = game.head().step(game.direction);
    game.power_up = Some(PowerUp {
        position,
        kind,
        duration_secs: 10,
    });
}

/// Park the food out of the way so plain moves never eat.
fn park_food<S: HighScoreStore>(session: &mut TestSession<S>) {
    session.game_mut().food = Some(Food {
        position: Position::new(0, 19),
        kind: FoodKind::Regular,
    });
}

/// Feed `total_ms` in 16 ms frames, collecting events.
fn run_frames<S: HighScoreStore>(session: &mut TestSession<S>, total_ms: u64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let mut elapsed = 0;
    while elapsed < total_ms {
        let dt = 16u64.min(total_ms - elapsed);
        events.extend(session.advance(dt));
        elapsed += dt;
    }
    events
}

// =============================================================================
// Effects
// =============================================================================

#[test]
fn test_speed_boost_shortens_interval_then_expires() {
    let mut session = session_with(MemoryStore::default());
    session.start();
    park_food(&mut session);
    power_up_ahead(&mut session, PowerUpKind::SpeedBoost);

    session.step();
    assert_eq!(session.game().tick_interval_ms(), 140);

    // Pause so the snake stays put while the effect runs down.
    session.toggle_pause();
    let events = run_frames(&mut session, 10_000);
    assert!(events.contains(&GameEvent::EffectExpired(PowerUpKind::SpeedBoost)));
    assert!(!session.game().is_effect_active(PowerUpKind::SpeedBoost));
    assert_eq!(session.game().tick_interval_ms(), 200);
}

#[test]
fn test_recollecting_effect_refreshes_timer() {
    let mut session = session_with(MemoryStore::default());
    session.start();
    park_food(&mut session);
    power_up_ahead(&mut session, PowerUpKind::Shield);
    session.step();

    session.toggle_pause();
    run_frames(&mut session, 6_000);
    session.toggle_pause();

    power_up_ahead(&mut session, PowerUpKind::Shield);
    session.step();
    assert_eq!(
        session.game().effects.remaining_ms(PowerUpKind::Shield),
        Some(10_000)
    );
}

#[test]
fn test_start_cancels_active_effects() {
    let mut session = session_with(MemoryStore::default());
    session.start();
    park_food(&mut session);
    power_up_ahead(&mut session, PowerUpKind::Shield);
    session.step();
    assert!(session.game().is_effect_active(PowerUpKind::Shield));

    session.start();
    assert!(session.game().effects.active_kinds().is_empty());
    assert!(run_frames(&mut session, 12_000)
        .iter()
        .all(|e| !matches!(e, GameEvent::EffectExpired(_))));
}

// =============================================================================
// Ticks and pause
// =============================================================================

#[test]
fn test_ticks_follow_interval() {
    let mut session = session_with(MemoryStore::default());
    session.start();
    park_food(&mut session);
    session.game_mut().direction = Direction::Up;

    run_frames(&mut session, 1_000);
    assert_eq!(session.game().tick_count, 5);
    assert_eq!(session.game().head(), Position::new(10, 5));
}

#[test]
fn test_pause_freezes_movement() {
    let mut session = session_with(MemoryStore::default());
    session.start();
    park_food(&mut session);
    assert!(session.toggle_pause());

    let head = session.game().head();
    run_frames(&mut session, 3_000);
    assert_eq!(session.game().head(), head);
    assert_eq!(session.game().tick_count, 0);

    assert!(!session.submit_direction(Direction::Up));
    assert!(session.toggle_pause());
    assert_eq!(session.game().phase, Phase::Running);
}

#[test]
fn test_pause_ignored_outside_play() {
    let mut session = session_with(MemoryStore::default());
    assert!(!session.toggle_pause());
    assert_eq!(session.game().phase, Phase::NotStarted);

    session.start();
    food_ahead(&mut session, FoodKind::FunFact);
    session.step();
    assert!(!session.toggle_pause());
    assert!(matches!(session.game().phase, Phase::FunFact(_)));
}

// =============================================================================
// Fun-fact interlude
// =============================================================================

#[test]
fn test_interlude_counts_down_and_resumes() {
    let mut session = session_with(MemoryStore::default());
    session.start();
    food_ahead(&mut session, FoodKind::FunFact);
    session.step();
    assert!(session.game().fun_fact().is_some());
    let head = session.game().head();

    let events = run_frames(&mut session, 3_990);
    assert!(events.is_empty());
    assert_eq!(session.game().countdown(), None);

    let events = run_frames(&mut session, 3_010);
    let ticks: Vec<u8> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::CountdownTick(n) => Some(*n),
            _ => None,
        })
        .collect();
    assert_eq!(ticks, vec![3, 2, 1]);
    assert!(events.contains(&GameEvent::Resumed));
    assert_eq!(session.game().phase, Phase::Running);
    // No move happens on the frame that resumes play.
    assert_eq!(session.game().head(), head);
}

#[test]
fn test_restart_during_interlude_cancels_it() {
    let mut session = session_with(MemoryStore::default());
    session.start();
    food_ahead(&mut session, FoodKind::FunFact);
    session.step();

    session.start();
    assert_eq!(session.game().phase, Phase::Running);
    assert!(run_frames(&mut session, 8_000)
        .iter()
        .all(|e| !matches!(e, GameEvent::CountdownTick(_) | GameEvent::Resumed)));
}

#[test]
fn test_fact_index_survives_restarts_and_wraps() {
    let mut session = session_with(MemoryStore::default());
    let deck_len = session.facts().len();

    for expected in (0..deck_len).chain(0..2) {
        session.start();
        food_ahead(&mut session, FoodKind::FunFact);
        let events = session.step();
        assert!(events.contains(&GameEvent::FunFactStarted {
            fact_index: expected
        }));
        session.reset();
    }
    assert_eq!(session.facts().next_index(), 2);
}

// =============================================================================
// High score
// =============================================================================

/// Play one game on `store` that ends with exactly `score` points.
fn play_to_score(store: JsonFileStore, score: u32) -> JsonFileStore {
    let mut session = session_with(store);
    session.start();
    for _ in 0..score / 10 {
        food_ahead(&mut session, FoodKind::Regular);
        session.step();
    }
    // Drive straight into the top wall.
    let game = session.game_mut();
    game.snake = [Position::new(5, 0)].into_iter().collect();
    game.direction = Direction::Up;
    game.direction_queue.clear();
    session.step();
    assert_eq!(session.game().phase, Phase::GameOver);
    assert_eq!(session.game().score, score);
    session.store().clone()
}

#[test]
fn test_high_score_is_maximum_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snake_high_score.json");

    let mut store = JsonFileStore::new(&path);
    for score in [30, 90, 50] {
        store = play_to_score(store, score);
    }

    assert_eq!(JsonFileStore::new(&path).load_high_score(), 90);
    let reopened = session_with(JsonFileStore::new(&path));
    assert_eq!(reopened.high_score(), 90);
}

#[test]
fn test_missing_high_score_file_starts_at_zero() {
    let dir = tempfile::tempdir().unwrap();
    let session = session_with(JsonFileStore::new(dir.path().join("absent.json")));
    assert_eq!(session.high_score(), 0);
}
