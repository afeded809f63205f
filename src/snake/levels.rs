//! Score-driven level table.

/// A level and the score needed to reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub required_score: u32,
    pub name: &'static str,
}

/// Ordered by ascending `required_score`; the first entry must require 0.
pub const LEVELS: [Level; 5] = [
    Level {
        required_score: 0,
        name: "Beginner",
    },
    Level {
        required_score: 100,
        name: "Intermediate",
    },
    Level {
        required_score: 250,
        name: "Advanced",
    },
    Level {
        required_score: 500,
        name: "Expert",
    },
    Level {
        required_score: 1000,
        name: "Master",
    },
];

/// Index of the highest level in `levels` whose threshold is at most `score`.
pub fn level_index_in(levels: &[Level], score: u32) -> usize {
    levels
        .iter()
        .rposition(|level| level.required_score <= score)
        .unwrap_or(0)
}

pub fn level_for_score(score: u32) -> usize {
    level_index_in(&LEVELS, score)
}

pub fn level_name(index: usize) -> &'static str {
    LEVELS
        .get(index)
        .or(LEVELS.last())
        .map(|level| level.name)
        .unwrap_or("")
}
