//! Dice sources.
//!
//! The turn engine never owns randomness. Every die it needs (the
//! Prescience second die, the Sabotage reroll) is requested from a
//! [`DiceSource`] passed into `apply`, one call per die.
//!
//! - `GameRng` with the same seed rolls the same dice
//! - `ScriptedDice` replays fixed faces for tests
//!
//! ```
//! use arrakis_race::core::{DiceSource, GameRng};
//!
//! let mut rng = GameRng::new(42);
//! let face = rng.roll();
//! assert!((1..=6).contains(&face));
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Number of faces on a die.
pub const DIE_FACES: u8 = 6;

/// A source of uniform die faces in `1..=6`.
pub trait DiceSource {
    /// Roll one die.
    fn roll(&mut self) -> u8;
}

/// Seeded ChaCha8 dice.
///
/// A [`DiceCheckpoint`] saved next to a [`MatchState`](super::MatchState)
/// resumes the exact same sequence of faces.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// `true` with probability `p`. Used by automated players.
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.inner.gen_bool(p)
    }

    /// Where this RNG is in its stream.
    #[must_use]
    pub fn checkpoint(&self) -> DiceCheckpoint {
        DiceCheckpoint {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Continue from a checkpoint.
    #[must_use]
    pub fn resume(checkpoint: &DiceCheckpoint) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(checkpoint.seed);
        inner.set_word_pos(checkpoint.word_pos);
        Self {
            inner,
            seed: checkpoint.seed,
        }
    }
}

impl DiceSource for GameRng {
    fn roll(&mut self) -> u8 {
        self.inner.gen_range(1..=DIE_FACES)
    }
}

/// Saved [`GameRng`] position. Constant size however many dice were rolled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceCheckpoint {
    pub seed: u64,
    pub word_pos: u128,
}

/// Dice that replay a fixed list of faces.
///
/// Once the script runs out every roll returns `fallback`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    faces: VecDeque<u8>,
    fallback: u8,
    rolled: usize,
}

impl ScriptedDice {
    /// Replay `faces` in order, then fall back to 1.
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
            fallback: 1,
            rolled: 0,
        }
    }

    /// Set the face returned after the script is exhausted.
    #[must_use]
    pub fn with_fallback(mut self, face: u8) -> Self {
        self.fallback = face;
        self
    }

    /// Number of dice drawn so far.
    #[must_use]
    pub fn rolled(&self) -> usize {
        self.rolled
    }

    /// Faces still queued.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self) -> u8 {
        self.rolled += 1;
        self.faces.pop_front().unwrap_or(self.fallback)
    }
}

impl<D: DiceSource + ?Sized> DiceSource for &mut D {
    fn roll(&mut self) -> u8 {
        (**self).roll()
    }
}
