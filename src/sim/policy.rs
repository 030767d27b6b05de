//! Choice policies for automated play.
//!
//! A policy answers the three interjections a match can raise. Dice are not
//! a policy concern; they come from the `DiceSource` handed to the playout.

use crate::core::{GameRng, MatchState};

/// Answers interjection prompts on behalf of a player.
pub trait ChoicePolicy {
    /// Prescience: which of the two dice to move by.
    fn choose_foresight(&mut self, state: &MatchState, candidates: [u8; 2]) -> u8;

    /// Worm Rider: `true` to fall down the worm, `false` to ride it.
    fn accept_worm(&mut self, state: &MatchState, landed: u32, tail: u32) -> bool;

    /// Sabotage: `true` to force the mover back to `from` and reroll.
    fn confirm_sabotage(&mut self, state: &MatchState, from: u32, amount: u8) -> bool;
}

/// Plays the obvious move.
///
/// Takes the higher die, always rides worms, and sabotages any move that
/// gained more than `sabotage_threshold` squares.
#[derive(Clone, Debug)]
pub struct GreedyPolicy {
    pub sabotage_threshold: u32,
}

impl Default for GreedyPolicy {
    fn default() -> Self {
        Self {
            sabotage_threshold: 6,
        }
    }
}

impl ChoicePolicy for GreedyPolicy {
    fn choose_foresight(&mut self, _state: &MatchState, candidates: [u8; 2]) -> u8 {
        candidates[0].max(candidates[1])
    }

    fn accept_worm(&mut self, _state: &MatchState, _landed: u32, _tail: u32) -> bool {
        false
    }

    fn confirm_sabotage(&mut self, state: &MatchState, from: u32, _amount: u8) -> bool {
        let gained = state.active_player().position.saturating_sub(from);
        gained > self.sabotage_threshold
    }
}

/// Flips a coin for every choice.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    rng: GameRng,
}

impl RandomPolicy {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl ChoicePolicy for RandomPolicy {
    fn choose_foresight(&mut self, _state: &MatchState, candidates: [u8; 2]) -> u8 {
        candidates[usize::from(self.rng.gen_bool(0.5))]
    }

    fn accept_worm(&mut self, _state: &MatchState, _landed: u32, _tail: u32) -> bool {
        self.rng.gen_bool(0.5)
    }

    fn confirm_sabotage(&mut self, _state: &MatchState, _from: u32, _amount: u8) -> bool {
        self.rng.gen_bool(0.5)
    }
}
