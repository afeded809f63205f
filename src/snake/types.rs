//! Snake game data structures.
//!
//! The board is a square grid; the snake is a deque of cells with the head at
//! the front. Food and the power-up each occupy an optional single slot.

use super::effects::ActiveEffects;
use super::interlude::Interlude;
use crate::config::EngineConfig;
use crate::constants::{FUN_FACT_FOOD_POINTS, REGULAR_FOOD_POINTS};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Cardinal direction for snake movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the (dx, dy) delta for this direction. Y grows downward.
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// A position on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    pub fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `direction` (may be off the grid).
    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn in_bounds(&self, grid_size: i16) -> bool {
        (0..grid_size).contains(&self.x) && (0..grid_size).contains(&self.y)
    }

    /// Toroidal wrap onto a `grid_size` board.
    pub fn wrapped(&self, grid_size: i16) -> Self {
        Self {
            x: self.x.rem_euclid(grid_size),
            y: self.y.rem_euclid(grid_size),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodKind {
    Regular,
    /// Worth more, and pauses play to show a fun fact.
    FunFact,
}

impl FoodKind {
    pub fn points(&self) -> u32 {
        match self {
            Self::Regular => REGULAR_FOOD_POINTS,
            Self::FunFact => FUN_FACT_FOOD_POINTS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    SpeedBoost,
    Shield,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 2] = [PowerUpKind::SpeedBoost, PowerUpKind::Shield];

    pub fn name(&self) -> &'static str {
        match self {
            Self::SpeedBoost => "Speed Boost",
            Self::Shield => "Shield",
        }
    }

    /// Notification shown when the effect kicks in.
    pub fn activation_message(&self) -> &'static str {
        match self {
            Self::SpeedBoost => "Speed Boost activated!",
            Self::Shield => "Shield activated!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUp {
    pub position: Position,
    pub kind: PowerUpKind,
    pub duration_secs: u32,
}

impl PowerUp {
    /// Effect lifetime once collected.
    pub fn duration_ms(&self) -> u64 {
        u64::from(self.duration_secs) * 1000
    }
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    Wall,
    SelfCollision,
}

/// Lifecycle of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running,
    Paused,
    /// Play is suspended while a fun fact is on screen.
    FunFact(Interlude),
    GameOver,
}

/// Something that happened during a tick or timer update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Moved {
        head: Position,
    },
    FoodEaten {
        kind: FoodKind,
        points: u32,
        score: u32,
    },
    LevelUp {
        level: usize,
        name: &'static str,
    },
    PowerUpSpawned(PowerUp),
    PowerUpCollected(PowerUpKind),
    EffectExpired(PowerUpKind),
    FunFactStarted {
        fact_index: usize,
    },
    CountdownTick(u8),
    Resumed,
    GameOver {
        score: u32,
        cause: DeathCause,
    },
}

/// Main game state.
#[derive(Debug, Clone)]
pub struct SnakeGame {
    pub config: EngineConfig,
    pub phase: Phase,

    /// Snake body segments. Head is at the front (index 0).
    pub snake: VecDeque<Position>,
    /// Committed movement direction.
    pub direction: Direction,
    /// Accepted but not yet committed direction changes, oldest first.
    pub direction_queue: VecDeque<Direction>,

    pub food: Option<Food>,
    pub power_up: Option<PowerUp>,
    pub effects: ActiveEffects,
    /// Why the last game ended; `None` until a game over.
    pub death_cause: Option<DeathCause>,

    pub score: u32,
    /// Index into the level table.
    pub level: usize,
    /// Regular food eaten since the last fun-fact spawn.
    pub regular_food_eaten: u32,

    /// Time banked toward the next tick (milliseconds).
    pub accumulated_time_ms: u64,
    /// Ticks processed this game.
    pub tick_count: u64,
}

impl SnakeGame {
    /// Create a game waiting on the title screen.
    pub fn new(config: EngineConfig) -> Self {
        let start = config.start;
        let direction = config.start_direction;
        Self {
            config,
            phase: Phase::NotStarted,
            snake: VecDeque::from([start]),
            direction,
            direction_queue: VecDeque::new(),
            food: None,
            power_up: None,
            effects: ActiveEffects::default(),
            death_cause: None,
            score: 0,
            level: 0,
            regular_food_eaten: 0,
            accumulated_time_ms: 0,
            tick_count: 0,
        }
    }

    pub fn grid_size(&self) -> i16 {
        self.config.grid_size
    }

    pub fn head(&self) -> Position {
        self.snake[0]
    }
}

/// Pick a random cell on the board that `occupied` rejects, or `None` when the
/// board is full.
pub fn random_free_cell<R, F>(grid_size: i16, rng: &mut R, occupied: F) -> Option<Position>
where
    R: Rng,
    F: Fn(&Position) -> bool,
{
    let free: Vec<Position> = (0..grid_size)
        .flat_map(|y| (0..grid_size).map(move |x| Position { x, y }))
        .filter(|pos| !occupied(pos))
        .collect();
    free.choose(rng).copied()
}
