// Board
pub const GRID_SIZE: i16 = 20;
pub const MAX_GRID_SIZE: i16 = 256;
pub const START_X: i16 = 10;
pub const START_Y: i16 = 10;

// Tick timing
pub const INITIAL_SPEED_MS: u64 = 200;
pub const SPEED_INCREMENT_MS: u64 = 1;
pub const MIN_TICK_INTERVAL_MS: u64 = 1;
/// Largest frame delta fed into the timers; longer stalls are clamped.
pub const MAX_FRAME_DT_MS: u64 = 500;

// Input
pub const DIRECTION_QUEUE_LEN: usize = 2;

// Food
pub const REGULAR_FOOD_POINTS: u32 = 10;
pub const FUN_FACT_FOOD_POINTS: u32 = 25;
pub const REGULAR_FOOD_BEFORE_FUN_FACT: u32 = 3;

// Power-ups
pub const POWER_UP_CHANCE: f64 = 0.15;
pub const POWER_UP_DURATION_SECS: u32 = 10;
pub const SPEED_BOOST_FACTOR: f64 = 0.7; // 30% faster

// Fun-fact interlude
pub const FUN_FACT_DISPLAY_MS: u64 = 4000;
pub const COUNTDOWN_FROM: u8 = 3;
pub const COUNTDOWN_STEP_MS: u64 = 1000;

// Persistence
pub const HIGH_SCORE_KEY: &str = "snake_high_score";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = "arcade_snake.log";
pub const LOG_FILTER_ENV: &str = "ARCADE_SNAKE_LOG";

// Shell
pub const REALTIME_FRAME_MS: u64 = 16; // ~60 FPS
pub const NOTICE_DISPLAY_MS: u64 = 2000;
