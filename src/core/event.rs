//! Events: the turn engine's input alphabet.
//!
//! Views dispatch these in response to user input and timers. The engine
//! decides whether each one is legal in the current state; illegal events
//! leave the state untouched.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::factions::Faction;

/// Everything that can happen to a match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchEvent {
    // === Setup ===

    /// Rename a seat. An empty name restores the default.
    SetPlayerName { player: PlayerId, name: String },

    /// Pick a seat's faction.
    SetPlayerFaction { player: PlayerId, faction: Faction },

    /// Leave setup once both factions are picked.
    StartMatch,

    // === Rolling ===

    /// The die starts tumbling.
    ///
    /// Ignored while a decision is pending, while a roll is in flight, and
    /// until the previous move was acknowledged with `MoveComplete`.
    BeginRoll,

    /// The tumbling die landed on this face.
    RollProduced(u8),

    /// The view finished presenting the move.
    ///
    /// Passes the turn, or keeps it for a bonus roll. Only accepted once a
    /// move has been committed and no decision is pending: at the start of
    /// a turn, or with a roll in flight, it is ignored and the turn stays
    /// with the active player.
    MoveComplete,

    // === Interjection answers ===

    /// Prescience: move by this die.
    ChooseForesightValue(u8),

    /// Worm Rider: `accept = true` falls down the worm, `false` rides it.
    ChooseTrapOutcome { accept: bool },

    /// Sabotage: `confirm = true` forces the reroll.
    Sabotage { confirm: bool },

    // === Any time ===

    /// Discard the match and return to setup.
    ResetMatch,
}

impl MatchEvent {
    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            MatchEvent::SetPlayerName { .. } => "set_player_name",
            MatchEvent::SetPlayerFaction { .. } => "set_player_faction",
            MatchEvent::StartMatch => "start_match",
            MatchEvent::BeginRoll => "begin_roll",
            MatchEvent::RollProduced(_) => "roll_produced",
            MatchEvent::MoveComplete => "move_complete",
            MatchEvent::ChooseForesightValue(_) => "choose_foresight_value",
            MatchEvent::ChooseTrapOutcome { .. } => "choose_trap_outcome",
            MatchEvent::Sabotage { .. } => "sabotage",
            MatchEvent::ResetMatch => "reset_match",
        }
    }

    /// True for events that answer an interjection.
    #[must_use]
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            MatchEvent::ChooseForesightValue(_)
                | MatchEvent::ChooseTrapOutcome { .. }
                | MatchEvent::Sabotage { .. }
        )
    }
}
