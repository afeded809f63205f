//! Arcade Snake - a Snake engine with power-ups and fun-fact interludes.
//!
//! The engine (`snake`) is host-agnostic; the terminal shell in `main.rs`
//! drives it through an `ArcadeSession`.

pub mod config;
pub mod constants;
pub mod high_score;
pub mod input;
pub mod session;
pub mod snake;
pub mod utils;
