//! Snake game logic: lifecycle commands, input validation, the per-tick state
//! machine and the timer driver.

use super::fun_facts::FunFactDeck;
use super::interlude::{Interlude, InterludeProgress};
use super::levels::{level_for_score, level_name};
use super::types::*;
use crate::constants::{MAX_FRAME_DT_MS, MIN_TICK_INTERVAL_MS};
use rand::seq::SliceRandom;
use rand::Rng;

impl SnakeGame {
    /// Begin a fresh game. Cancels any running effect timers, interlude and
    /// banked tick time from the previous game.
    pub fn start<R: Rng>(&mut self, rng: &mut R) {
        self.clear_board();
        self.food = self.spawn_food(rng);
        self.phase = Phase::Running;
    }

    /// Abandon the current game and go back to the title screen.
    pub fn reset(&mut self) {
        self.clear_board();
        self.phase = Phase::NotStarted;
    }

    fn clear_board(&mut self) {
        self.snake.clear();
        self.snake.push_back(self.config.start);
        self.direction = self.config.start_direction;
        self.direction_queue.clear();
        self.food = None;
        self.power_up = None;
        self.effects.clear();
        self.death_cause = None;
        self.score = 0;
        self.level = 0;
        self.regular_food_eaten = 0;
        self.accumulated_time_ms = 0;
        self.tick_count = 0;
    }

    /// Queue a direction change for an upcoming tick. Returns whether the
    /// intent was accepted.
    ///
    /// Only accepted while running, and never the reverse of the committed
    /// direction. The queue keeps the most recent `direction_queue_len`
    /// entries.
    pub fn submit_direction(&mut self, direction: Direction) -> bool {
        if self.phase != Phase::Running || direction == self.direction.opposite() {
            return false;
        }
        self.direction_queue.push_back(direction);
        while self.direction_queue.len() > self.config.direction_queue_len {
            self.direction_queue.pop_front();
        }
        true
    }

    /// Toggle between `Running` and `Paused`. Returns whether anything changed.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                self.accumulated_time_ms = 0;
                true
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                true
            }
            _ => false,
        }
    }

    /// Milliseconds between ticks at the current level and effects.
    pub fn tick_interval_ms(&self) -> u64 {
        let base = self
            .config
            .initial_speed_ms
            .saturating_sub((self.level as u64).saturating_mul(self.config.speed_increment_ms))
            .max(MIN_TICK_INTERVAL_MS);
        if self.effects.is_active(PowerUpKind::SpeedBoost) {
            ((base as f64 * self.config.speed_boost_factor).round() as u64)
                .max(MIN_TICK_INTERVAL_MS)
        } else {
            base
        }
    }

    pub fn level_name(&self) -> &'static str {
        level_name(self.level)
    }

    pub fn is_effect_active(&self, kind: PowerUpKind) -> bool {
        self.effects.is_active(kind)
    }

    /// Fact on screen during an interlude.
    pub fn fun_fact(&self) -> Option<&str> {
        match &self.phase {
            Phase::FunFact(interlude) => Some(interlude.fact.as_str()),
            _ => None,
        }
    }

    /// "Resuming in N" value during the interlude countdown.
    pub fn countdown(&self) -> Option<u8> {
        match &self.phase {
            Phase::FunFact(interlude) => interlude.countdown(),
            _ => None,
        }
    }

    /// Advance timers by `dt_ms` of wall time and fire as many ticks as the
    /// current interval allows.
    ///
    /// Effect timers run while running, paused or in an interlude. Frame
    /// deltas are clamped to `MAX_FRAME_DT_MS` so a stall does not replay a
    /// burst of moves.
    pub fn advance<R: Rng>(
        &mut self,
        dt_ms: u64,
        facts: &mut FunFactDeck,
        rng: &mut R,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if matches!(self.phase, Phase::NotStarted | Phase::GameOver) {
            return events;
        }

        let dt_ms = dt_ms.min(MAX_FRAME_DT_MS);

        for kind in self.effects.advance(dt_ms) {
            events.push(GameEvent::EffectExpired(kind));
        }

        if let Phase::FunFact(interlude) = &mut self.phase {
            let mut finished = false;
            for progress in interlude.advance(dt_ms) {
                match progress {
                    InterludeProgress::CountdownTick(value) => {
                        events.push(GameEvent::CountdownTick(value))
                    }
                    InterludeProgress::Finished => finished = true,
                }
            }
            if finished {
                self.phase = Phase::Running;
                self.accumulated_time_ms = 0;
                events.push(GameEvent::Resumed);
            }
            return events;
        }

        if self.phase != Phase::Running {
            return events;
        }

        self.accumulated_time_ms += dt_ms;
        loop {
            let interval = self.tick_interval_ms();
            if self.accumulated_time_ms < interval {
                break;
            }
            self.accumulated_time_ms -= interval;
            events.extend(self.step(facts, rng));

            if self.phase != Phase::Running {
                self.accumulated_time_ms = 0;
                break;
            }
        }

        events
    }

    /// Process exactly one tick. Does nothing unless the game is running.
    pub fn step<R: Rng>(&mut self, facts: &mut FunFactDeck, rng: &mut R) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::Running {
            return events;
        }
        self.tick_count += 1;

        self.commit_queued_direction();

        let grid_size = self.grid_size();
        let shielded = self.effects.is_active(PowerUpKind::Shield);
        let mut new_head = self.head().step(self.direction);

        // Walls: wrap with a shield, otherwise die where we stand.
        if !new_head.in_bounds(grid_size) {
            if !shielded {
                self.end_game(DeathCause::Wall, &mut events);
                return events;
            }
            new_head = new_head.wrapped(grid_size);
        }

        // The tail cell is vacated this tick, so it never counts as a hit.
        let body_len = self.snake.len() - 1;
        if !shielded && self.snake.iter().take(body_len).any(|&seg| seg == new_head) {
            self.end_game(DeathCause::SelfCollision, &mut events);
            return events;
        }

        let eaten = self.food.filter(|food| food.position == new_head);
        let collected = self.power_up.filter(|power_up| power_up.position == new_head);

        self.snake.push_front(new_head);
        if eaten.is_none() {
            self.snake.pop_back();
        }
        events.push(GameEvent::Moved { head: new_head });

        if let Some(food) = eaten {
            self.consume_food(food, facts, rng, &mut events);
        }

        if let Some(power_up) = collected {
            if self.power_up == Some(power_up) {
                self.power_up = None;
            }
            self.effects.activate(power_up.kind, power_up.duration_ms());
            events.push(GameEvent::PowerUpCollected(power_up.kind));
        }

        events
    }

    /// Commit at most one queued direction. Entries that have become
    /// reversals since they were queued are dropped.
    fn commit_queued_direction(&mut self) {
        while let Some(next) = self.direction_queue.pop_front() {
            if next != self.direction.opposite() {
                self.direction = next;
                return;
            }
        }
    }

    fn end_game(&mut self, cause: DeathCause, events: &mut Vec<GameEvent>) {
        self.phase = Phase::GameOver;
        self.death_cause = Some(cause);
        self.direction_queue.clear();
        events.push(GameEvent::GameOver {
            score: self.score,
            cause,
        });
    }

    fn consume_food<R: Rng>(
        &mut self,
        food: Food,
        facts: &mut FunFactDeck,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        let points = food.kind.points();
        self.score += points;
        if food.kind == FoodKind::Regular {
            self.regular_food_eaten += 1;
        }
        events.push(GameEvent::FoodEaten {
            kind: food.kind,
            points,
            score: self.score,
        });

        let level = level_for_score(self.score);
        if level != self.level {
            self.level = level;
            events.push(GameEvent::LevelUp {
                level,
                name: level_name(level),
            });
        }

        self.food = self.spawn_food(rng);

        // Every pickup re-rolls the single power-up slot, dropping any
        // uncollected one.
        self.power_up = self.roll_power_up(rng);
        if let Some(power_up) = self.power_up {
            events.push(GameEvent::PowerUpSpawned(power_up));
        }

        if food.kind == FoodKind::FunFact {
            self.begin_interlude(facts, events);
        }
    }

    /// Spawn the next food off the snake. Once enough regular food has been
    /// eaten the spawn is a fun fact and the counter starts over.
    pub fn spawn_food<R: Rng>(&mut self, rng: &mut R) -> Option<Food> {
        let snake = &self.snake;
        let position = random_free_cell(self.config.grid_size, rng, |pos| snake.contains(pos))?;
        let kind = if self.regular_food_eaten >= self.config.regular_food_before_fun_fact {
            self.regular_food_eaten = 0;
            FoodKind::FunFact
        } else {
            FoodKind::Regular
        };
        Some(Food { position, kind })
    }

    /// Roll for a power-up clear of the snake and the food.
    pub fn roll_power_up<R: Rng>(&self, rng: &mut R) -> Option<PowerUp> {
        if !rng.gen_bool(self.config.power_up_chance) {
            return None;
        }
        let kind = *PowerUpKind::ALL.choose(rng)?;
        let food = self.food.map(|food| food.position);
        let position = random_free_cell(self.config.grid_size, rng, |pos| {
            self.snake.contains(pos) || food == Some(*pos)
        })?;
        Some(PowerUp {
            position,
            kind,
            duration_secs: self.config.power_up_duration_secs,
        })
    }

    fn begin_interlude(&mut self, facts: &mut FunFactDeck, events: &mut Vec<GameEvent>) {
        let Some((fact_index, fact)) = facts.draw() else {
            return;
        };
        self.phase = Phase::FunFact(Interlude::new(
            fact_index,
            fact.to_string(),
            self.config.fun_fact_display_ms,
            self.config.countdown_from,
            self.config.countdown_step_ms,
        ));
        self.direction_queue.clear();
        events.push(GameEvent::FunFactStarted { fact_index });
    }
}
