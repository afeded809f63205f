//! Engine configuration.
//!
//! Every field has a default taken from `constants.rs`, so a config file only
//! needs to name the values it overrides.

use crate::constants::*;
use crate::snake::types::{Direction, Position};
use crate::utils::persistence;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunables for a Snake session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Side length of the square board.
    pub grid_size: i16,
    /// Cell the one-segment snake starts on.
    pub start: Position,
    pub start_direction: Direction,
    /// Tick interval at level 0, in milliseconds.
    pub initial_speed_ms: u64,
    /// Milliseconds shaved off the tick interval per level.
    pub speed_increment_ms: u64,
    pub direction_queue_len: usize,
    /// Regular food eaten before the next spawn is forced to a fun fact.
    pub regular_food_before_fun_fact: u32,
    pub power_up_chance: f64,
    pub power_up_duration_secs: u32,
    /// Tick interval multiplier while Speed Boost is active.
    pub speed_boost_factor: f64,
    pub fun_fact_display_ms: u64,
    pub countdown_from: u8,
    pub countdown_step_ms: u64,
    pub fun_facts: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            start: Position {
                x: START_X,
                y: START_Y,
            },
            start_direction: Direction::Right,
            initial_speed_ms: INITIAL_SPEED_MS,
            speed_increment_ms: SPEED_INCREMENT_MS,
            direction_queue_len: DIRECTION_QUEUE_LEN,
            regular_food_before_fun_fact: REGULAR_FOOD_BEFORE_FUN_FACT,
            power_up_chance: POWER_UP_CHANCE,
            power_up_duration_secs: POWER_UP_DURATION_SECS,
            speed_boost_factor: SPEED_BOOST_FACTOR,
            fun_fact_display_ms: FUN_FACT_DISPLAY_MS,
            countdown_from: COUNTDOWN_FROM,
            countdown_step_ms: COUNTDOWN_STEP_MS,
            fun_facts: default_fun_facts(),
        }
    }
}

fn default_fun_facts() -> Vec<String> {
    [
        "I started out drafting bridges before I ever drafted a pull request.",
        "Based in Johannesburg, shipping code to every timezone.",
        "I run a weekend study group on applied machine learning.",
        "Most of my side projects began as a game I wanted to play.",
        "Graphic design was my first craft; layout still shapes how I write code.",
        "Late-night builds run on rooibos tea and takeaway burgers.",
        "My best ideas show up between 5 and 7 in the morning.",
        "I have pair-programmed with an AI more often than with a human this year.",
        "No project is too big to sketch on a napkin first.",
        "Yes, I debugged this game while playing it.",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl EngineConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse and validate config JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, or from the default location when `path`
    /// is `None`. A missing default file yields the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match persistence::config_file_path(CONFIG_FILE_NAME) {
            Ok(default_path) if default_path.exists() => Self::load(&default_path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if !(2..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(invalid(
                "grid_size",
                format!("must be within 2..={}", MAX_GRID_SIZE),
            ));
        }
        if !self.start.in_bounds(self.grid_size) {
            return Err(invalid(
                "start",
                format!(
                    "({}, {}) is outside a {}x{} grid",
                    self.start.x, self.start.y, self.grid_size, self.grid_size
                ),
            ));
        }
        if self.initial_speed_ms == 0 {
            return Err(invalid("initial_speed_ms", "must be positive"));
        }
        if self.speed_increment_ms > self.initial_speed_ms {
            return Err(invalid(
                "speed_increment_ms",
                "must not exceed initial_speed_ms",
            ));
        }
        if self.direction_queue_len == 0 {
            return Err(invalid("direction_queue_len", "must be at least 1"));
        }
        if self.regular_food_before_fun_fact == 0 {
            return Err(invalid("regular_food_before_fun_fact", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.power_up_chance) {
            return Err(invalid("power_up_chance", "must be within 0.0..=1.0"));
        }
        if !(self.speed_boost_factor > 0.0 && self.speed_boost_factor <= 1.0) {
            return Err(invalid("speed_boost_factor", "must be within (0.0, 1.0]"));
        }
        if self.countdown_step_ms == 0 {
            return Err(invalid("countdown_step_ms", "must be positive"));
        }
        if self.fun_facts.is_empty() {
            return Err(invalid("fun_facts", "must contain at least one fact"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.start, Position { x: 10, y: 10 });
        assert_eq!(config.start_direction, Direction::Right);
        assert_eq!(config.initial_speed_ms, 200);
        assert_eq!(config.direction_queue_len, 2);
        assert_eq!(config.fun_facts.len(), 10);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{ "grid_size": 30, "power_up_chance": 0.5 }"#)
            .expect("partial config should parse");
        assert_eq!(config.grid_size, 30);
        assert_eq!(config.power_up_chance, 0.5);
        assert_eq!(config.initial_speed_ms, INITIAL_SPEED_MS);
        assert_eq!(config.countdown_from, COUNTDOWN_FROM);
    }

    #[test]
    fn test_direction_parses_from_json() {
        let config = EngineConfig::from_json(r#"{ "start_direction": "Up" }"#).unwrap();
        assert_eq!(config.start_direction, Direction::Up);
    }

    #[test]
    fn test_rejects_start_outside_grid() {
        let err = EngineConfig::from_json(r#"{ "grid_size": 5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "start", .. }));
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = EngineConfig::from_json(r#"{ "power_up_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "power_up_chance",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_empty_fun_facts() {
        let err = EngineConfig::from_json(r#"{ "fun_facts": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "fun_facts", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = EngineConfig::from_json("{ grid_size: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = EngineConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "initial_speed_ms": 150 }"#).unwrap();
        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.initial_speed_ms, 150);
    }

    #[test]
    fn test_rejects_oversized_speed_increment() {
        let err = EngineConfig::from_json(r#"{ "speed_increment_ms": 18446744073709551615 }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "speed_increment_ms",
                ..
            }
        ));
        assert!(EngineConfig::from_json(r#"{ "speed_increment_ms": 200 }"#).is_ok());
    }

    #[test]
    fn test_rejects_oversized_grid() {
        let err = EngineConfig::from_json(r#"{ "grid_size": 32767 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "grid_size", .. }));
        assert!(EngineConfig::from_json(r#"{ "grid_size": 256 }"#).is_ok());
    }
}
