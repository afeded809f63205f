//! Application-lifetime context around the engine.
//!
//! The session outlives individual games: it owns the fun-fact deck (whose
//! cursor keeps advancing across restarts), the high-score store and the RNG.

use crate::config::EngineConfig;
use crate::constants::NOTICE_DISPLAY_MS;
use crate::high_score::HighScoreStore;
use crate::snake::{Direction, FunFactDeck, GameEvent, SnakeGame};
use rand::Rng;

/// Short-lived message for the shell, e.g. a power-up activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub remaining_ms: u64,
}

pub struct ArcadeSession<S: HighScoreStore, R: Rng> {
    game: SnakeGame,
    facts: FunFactDeck,
    store: S,
    rng: R,
    high_score: u32,
    notice: Option<Notice>,
}

impl<S: HighScoreStore, R: Rng> ArcadeSession<S, R> {
    /// Build a session and read the stored best score once.
    pub fn new(config: EngineConfig, store: S, rng: R) -> Self {
        let high_score = store.load_high_score();
        let facts = FunFactDeck::new(config.fun_facts.clone());
        tracing::info!(high_score, facts = facts.len(), "session ready");
        Self {
            game: SnakeGame::new(config),
            facts,
            store,
            rng,
            high_score,
            notice: None,
        }
    }

    pub fn game(&self) -> &SnakeGame {
        &self.game
    }

    /// Direct engine access, for hosts and tests that stage a board.
    pub fn game_mut(&mut self) -> &mut SnakeGame {
        &mut self.game
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn facts(&self) -> &FunFactDeck {
        &self.facts
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn start(&mut self) {
        self.game.start(&mut self.rng);
        self.notice = None;
        tracing::info!("game started");
        self.sync_high_score();
    }

    pub fn reset(&mut self) {
        self.game.reset();
        self.notice = None;
        tracing::debug!("game reset");
        self.sync_high_score();
    }

    pub fn submit_direction(&mut self, direction: Direction) -> bool {
        let accepted = self.game.submit_direction(direction);
        if !accepted {
            tracing::trace!(?direction, "direction rejected");
        }
        self.sync_high_score();
        accepted
    }

    pub fn toggle_pause(&mut self) -> bool {
        let changed = self.game.toggle_pause();
        if changed {
            tracing::debug!(phase = ?self.game.phase, "pause toggled");
        }
        self.sync_high_score();
        changed
    }

    /// Run exactly one tick.
    pub fn step(&mut self) -> Vec<GameEvent> {
        let events = self.game.step(&mut self.facts, &mut self.rng);
        self.handle_events(&events);
        events
    }

    /// Feed `dt_ms` of wall time to the engine.
    pub fn advance(&mut self, dt_ms: u64) -> Vec<GameEvent> {
        if let Some(notice) = &mut self.notice {
            notice.remaining_ms = notice.remaining_ms.saturating_sub(dt_ms);
            if notice.remaining_ms == 0 {
                self.notice = None;
            }
        }
        let events = self.game.advance(dt_ms, &mut self.facts, &mut self.rng);
        self.handle_events(&events);
        events
    }

    fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Moved { .. } | GameEvent::CountdownTick(_) => {}
                GameEvent::FoodEaten {
                    kind,
                    points,
                    score,
                } => tracing::debug!(?kind, points, score, "food eaten"),
                GameEvent::LevelUp { level, name } => {
                    tracing::info!(level, name, "level up")
                }
                GameEvent::PowerUpSpawned(power_up) => tracing::debug!(
                    kind = ?power_up.kind,
                    x = power_up.position.x,
                    y = power_up.position.y,
                    "power-up spawned"
                ),
                GameEvent::PowerUpCollected(kind) => {
                    tracing::info!(kind = kind.name(), "power-up collected");
                    self.notice = Some(Notice {
                        text: kind.activation_message().to_string(),
                        remaining_ms: NOTICE_DISPLAY_MS,
                    });
                }
                GameEvent::EffectExpired(kind) => {
                    tracing::debug!(kind = kind.name(), "effect expired")
                }
                GameEvent::FunFactStarted { fact_index } => {
                    tracing::debug!(fact_index, "fun fact interlude")
                }
                GameEvent::Resumed => tracing::debug!("resumed after interlude"),
                GameEvent::GameOver { score, cause } => {
                    tracing::info!(score, ?cause, high_score = self.high_score, "game over")
                }
            }
        }
        self.sync_high_score();
    }

    /// Raise and persist the best score as soon as the live score passes it.
    fn sync_high_score(&mut self) {
        if self.game.score > self.high_score {
            self.high_score = self.game.score;
            self.store.save_high_score(self.high_score);
        }
    }
}
