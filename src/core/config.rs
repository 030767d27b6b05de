//! Board configuration.
//!
//! A match is configured once, before the engine is built:
//! - Board size (the goal square is `size * size`)
//! - Sandworm and ornithopter placements
//! - How a Worm Rider rides a worm
//! - The Forced March bonus
//!
//! Configs can be built in code with the `with_*` methods or loaded from
//! JSON. Every entry point that accepts an untrusted config validates it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Modifier, ModifierTable};

/// Smallest supported board edge.
pub const MIN_BOARD_SIZE: u32 = 2;

/// Largest supported board edge.
pub const MAX_BOARD_SIZE: u32 = 100;

/// Errors raised while validating a [`BoardConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board size {0} is outside {MIN_BOARD_SIZE}..={MAX_BOARD_SIZE}")]
    InvalidSize(u32),

    #[error("square {square} triggers more than one modifier")]
    DuplicateTrigger { square: u32 },

    #[error("square {square} is the start or goal and cannot hold a modifier")]
    TriggerOnEndpoint { square: u32 },

    #[error("sandworm {from} -> {to} does not lead backward")]
    WormNotBackward { from: u32, to: u32 },

    #[error("ornithopter {from} -> {to} does not lead forward")]
    OrnithopterNotForward { from: u32, to: u32 },

    #[error("modifier {from} -> {to} leaves the board (goal {goal})")]
    OffBoard { from: u32, to: u32, goal: u32 },

    #[error("invalid board config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where a Worm Rider ends up after riding a worm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RideMode {
    /// Travel forward by the worm's length: `head + (head - tail)`,
    /// capped at the goal.
    #[default]
    Mirror,
    /// Stay on the worm's head.
    Hold,
}

impl RideMode {
    /// Square reached by riding a worm from `head` to `tail`.
    #[must_use]
    pub fn ride(self, head: u32, tail: u32, goal: u32) -> u32 {
        match self {
            RideMode::Mirror => (head + head.saturating_sub(tail)).min(goal),
            RideMode::Hold => head.min(goal),
        }
    }
}

/// Complete board configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Edge length of the square board.
    pub size: u32,

    /// Sandworms: head square to tail square.
    pub worms: Vec<Modifier>,

    /// Ornithopters: pad square to destination square.
    pub ornithopters: Vec<Modifier>,

    /// Worm Rider behavior when the ability is used.
    pub ride_mode: RideMode,

    /// Added to the Sardaukar's first roll.
    pub forced_march_bonus: u8,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            size: 10,
            worms: DEFAULT_WORMS
                .iter()
                .map(|&(from, to)| Modifier::new(from, to))
                .collect(),
            ornithopters: DEFAULT_ORNITHOPTERS
                .iter()
                .map(|&(from, to)| Modifier::new(from, to))
                .collect(),
            ride_mode: RideMode::Mirror,
            forced_march_bonus: 2,
        }
    }
}

// Worms drop at most two rows, ornithopters lift at most two rows.
const DEFAULT_WORMS: [(u32, u32); 9] = [
    (99, 79),
    (95, 75),
    (87, 68),
    (76, 57),
    (64, 44),
    (52, 33),
    (47, 28),
    (36, 18),
    (24, 5),
];

const DEFAULT_ORNITHOPTERS: [(u32, u32); 7] = [
    (3, 22),
    (8, 26),
    (17, 35),
    (29, 48),
    (41, 59),
    (53, 72),
    (69, 88),
];

impl BoardConfig {
    /// The default board.
    pub fn new() -> Self {
        Self::default()
    }

    /// A board of the given size with no modifiers.
    pub fn empty(size: u32) -> Self {
        Self {
            size,
            worms: Vec::new(),
            ornithopters: Vec::new(),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// The goal square.
    #[must_use]
    pub fn goal(&self) -> u32 {
        self.size * self.size
    }

    /// Set the board edge length.
    #[must_use]
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Replace the sandworm list.
    #[must_use]
    pub fn with_worms(mut self, worms: impl IntoIterator<Item = (u32, u32)>) -> Self {
        self.worms = worms.into_iter().map(|(from, to)| Modifier::new(from, to)).collect();
        self
    }

    /// Replace the ornithopter list.
    #[must_use]
    pub fn with_ornithopters(mut self, pads: impl IntoIterator<Item = (u32, u32)>) -> Self {
        self.ornithopters = pads.into_iter().map(|(from, to)| Modifier::new(from, to)).collect();
        self
    }

    /// Set the Worm Rider mode.
    #[must_use]
    pub fn with_ride_mode(mut self, mode: RideMode) -> Self {
        self.ride_mode = mode;
        self
    }

    /// Set the Forced March bonus.
    #[must_use]
    pub fn with_forced_march_bonus(mut self, bonus: u8) -> Self {
        self.forced_march_bonus = bonus;
        self
    }

    /// Check size and modifier placement.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.modifier_table().map(|_| ())
    }

    /// Build the lookup table for this board's modifiers.
    pub fn modifier_table(&self) -> Result<ModifierTable, ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.size) {
            return Err(ConfigError::InvalidSize(self.size));
        }
        ModifierTable::new(&self.worms, &self.ornithopters, self.goal())
    }
}
