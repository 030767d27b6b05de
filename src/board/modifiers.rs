//! Sandworm and ornithopter placements.
//!
//! The table is built once from a `BoardConfig` and never changes. Each
//! trigger square maps to exactly one destination.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::ConfigError;

/// Which way a modifier sends the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierKind {
    /// Backward (trap).
    Worm,
    /// Forward (boost).
    Ornithopter,
}

/// A single teleport from `from` to `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifier {
    pub from: u32,
    pub to: u32,
}

impl Modifier {
    #[must_use]
    pub const fn new(from: u32, to: u32) -> Self {
        Self { from, to }
    }
}

/// Validated lookup table of board modifiers.
#[derive(Clone, Debug)]
pub struct ModifierTable {
    worms: FxHashMap<u32, u32>,
    ornithopters: FxHashMap<u32, u32>,
}

impl ModifierTable {
    /// Build a table for a board whose goal square is `goal`.
    ///
    /// Rejects duplicate triggers, triggers on 0 or the goal, worms that
    /// do not lead backward, ornithopters that do not lead forward, and
    /// anything leaving `1..=goal`.
    pub fn new(
        worms: &[Modifier],
        ornithopters: &[Modifier],
        goal: u32,
    ) -> Result<Self, ConfigError> {
        let mut table = Self {
            worms: FxHashMap::default(),
            ornithopters: FxHashMap::default(),
        };

        for (kind, list) in [
            (ModifierKind::Worm, worms),
            (ModifierKind::Ornithopter, ornithopters),
        ] {
            for m in list {
                table.insert(kind, *m, goal)?;
            }
        }

        Ok(table)
    }

    /// A table with no modifiers.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            worms: FxHashMap::default(),
            ornithopters: FxHashMap::default(),
        }
    }

    fn insert(&mut self, kind: ModifierKind, m: Modifier, goal: u32) -> Result<(), ConfigError> {
        if m.from == 0 || m.from == goal {
            return Err(ConfigError::TriggerOnEndpoint { square: m.from });
        }
        if m.from > goal || m.to == 0 || m.to > goal {
            return Err(ConfigError::OffBoard {
                from: m.from,
                to: m.to,
                goal,
            });
        }
        if self.get(m.from).is_some() {
            return Err(ConfigError::DuplicateTrigger { square: m.from });
        }

        match kind {
            ModifierKind::Worm => {
                if m.to >= m.from {
                    return Err(ConfigError::WormNotBackward { from: m.from, to: m.to });
                }
                self.worms.insert(m.from, m.to);
            }
            ModifierKind::Ornithopter => {
                if m.to <= m.from {
                    return Err(ConfigError::OrnithopterNotForward { from: m.from, to: m.to });
                }
                self.ornithopters.insert(m.from, m.to);
            }
        }
        Ok(())
    }

    /// Tail of the worm whose head is `square`.
    #[must_use]
    pub fn worm_tail(&self, square: u32) -> Option<u32> {
        self.worms.get(&square).copied()
    }

    /// Destination of the ornithopter on `square`.
    #[must_use]
    pub fn ornithopter_destination(&self, square: u32) -> Option<u32> {
        self.ornithopters.get(&square).copied()
    }

    /// Whatever modifier sits on `square`.
    #[must_use]
    pub fn get(&self, square: u32) -> Option<(ModifierKind, u32)> {
        self.worm_tail(square)
            .map(|to| (ModifierKind::Worm, to))
            .or_else(|| {
                self.ornithopter_destination(square)
                    .map(|to| (ModifierKind::Ornithopter, to))
            })
    }

    /// Number of modifiers on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.worms.len() + self.ornithopters.len()
    }

    /// True if the board has no modifiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
