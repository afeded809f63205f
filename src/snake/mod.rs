//! Snake engine: board state, tick rules, timed effects and fun-fact interludes.

pub mod effects;
pub mod fun_facts;
pub mod interlude;
pub mod levels;
pub mod logic;
pub mod types;

pub use effects::{ActiveEffects, EffectTimer};
pub use fun_facts::FunFactDeck;
pub use interlude::{Interlude, InterludeProgress, InterludeStage};
pub use levels::{level_for_score, level_name, Level, LEVELS};
pub use types::*;
