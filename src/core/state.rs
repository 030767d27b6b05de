//! Match state: the snapshot the turn engine consumes and produces.
//!
//! ## MatchState
//!
//! - Phase, active seat, turn number
//! - Both players (name, faction, position, ability flag)
//! - Roll bookkeeping (`roll_in_flight`, `last_roll`, `bonus_roll_owed`)
//! - At most one pending [`Interjection`]
//! - Move history
//!
//! Views read these fields; only `TurnEngine::apply` produces new ones.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PlayerPair};
use crate::factions::Faction;

/// Match lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Names and factions are being chosen.
    #[default]
    Setup,
    /// Dice are rolling.
    InProgress,
    /// Someone reached the goal.
    Concluded,
}

/// One seat's state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// Display name.
    pub name: String,

    /// Chosen faction. `None` until picked during setup.
    pub faction: Option<Faction>,

    /// Board square. 0 means "not yet on the board".
    pub position: u32,

    /// Whether this player's faction ability has been spent.
    pub ability_used: bool,
}

impl Player {
    /// Fresh player with the default name for `seat`.
    #[must_use]
    pub fn new(seat: PlayerId) -> Self {
        Self {
            name: Self::default_name(seat),
            faction: None,
            position: 0,
            ability_used: false,
        }
    }

    /// Name shown when none was entered.
    #[must_use]
    pub fn default_name(seat: PlayerId) -> String {
        seat.to_string()
    }

    /// True if this player holds `faction` and has not spent it.
    #[must_use]
    pub fn has_unused(&self, faction: Faction) -> bool {
        self.faction == Some(faction) && !self.ability_used
    }
}

/// A pending decision that suspends the turn.
///
/// Each variant carries the data needed to finish the move, so
/// `Player::position` always holds a committed square.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interjection {
    /// Prescience: the active player picks one of two dice.
    AwaitingForesight {
        candidates: [u8; 2],
    },

    /// Worm Rider: the active player landed on a worm head.
    AwaitingTrapChoice {
        /// Square before the roll.
        from: u32,
        /// Effective roll value.
        roll: u8,
        /// The worm head.
        landed: u32,
        /// The worm tail.
        tail: u32,
    },

    /// Sabotage: the waiting player may force the mover to reroll.
    AwaitingSabotage {
        mover: PlayerId,
        saboteur: PlayerId,
        /// Square the mover stood on before the roll. A confirmed sabotage
        /// puts the mover back here, undoing any worm or ornithopter hop.
        from: u32,
        /// Effective roll value that was applied. Only decides whether a
        /// declined sabotage leaves a bonus roll owed; it is never
        /// subtracted from the position.
        amount: u8,
    },
}

impl Interjection {
    /// The seat that must answer this interjection.
    #[must_use]
    pub fn decider(&self, active: PlayerId) -> PlayerId {
        match self {
            Interjection::AwaitingSabotage { saboteur, .. } => *saboteur,
            _ => active,
        }
    }
}

/// How a committed move ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Landed on a plain square.
    Plain,
    /// Fell down a sandworm.
    Trapped,
    /// Flew an ornithopter.
    Boosted,
    /// Rode a sandworm with the Worm Rider ability.
    RodeWorm,
    /// Reached or overshot the goal.
    Capped,
}

/// An entry in the match history.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRecord {
    /// A roll was applied.
    Moved {
        player: PlayerId,
        roll: u8,
        from: u32,
        to: u32,
        outcome: MoveOutcome,
    },
    /// A move was undone by Sabotage.
    Reverted {
        player: PlayerId,
        saboteur: PlayerId,
        from: u32,
        to: u32,
    },
}

/// The root aggregate for one match.
///
/// Uses `im::Vector` for history so snapshots clone in O(1).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchState {
    /// Lifecycle phase.
    pub phase: Phase,

    /// Both seats.
    pub players: PlayerPair<Player>,

    /// Whose turn it is.
    pub active: PlayerId,

    /// Effective value of the last applied roll, until the move is acknowledged.
    pub last_roll: Option<u8>,

    /// A die is tumbling and its value has not arrived yet.
    pub roll_in_flight: bool,

    /// The active player rolled a 6 and rolls again after this move.
    pub bonus_roll_owed: bool,

    /// Set when the match is concluded.
    pub winner: Option<PlayerId>,

    /// The single pending decision, if any.
    pub interjection: Option<Interjection>,

    /// Turn counter (starts at 1; bonus rolls stay in the same turn).
    pub turn_number: u32,

    /// Applied moves and reverts, oldest first.
    pub history: Vector<MoveRecord>,
}

impl MatchState {
    /// The state every match starts from and every reset returns to.
    #[must_use]
    pub fn initial() -> Self {
        Self {
            phase: Phase::Setup,
            players: PlayerPair::new(Player::new),
            active: PlayerId::FIRST,
            last_roll: None,
            roll_in_flight: false,
            bonus_roll_owed: false,
            winner: None,
            interjection: None,
            turn_number: 1,
            history: Vector::new(),
        }
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn active_player(&self) -> &Player {
        &self.players[self.active]
    }

    /// The player waiting for their turn.
    #[must_use]
    pub fn waiting_player(&self) -> &Player {
        &self.players[self.active.opponent()]
    }

    /// True while a decision blocks the turn.
    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        self.interjection.is_some()
    }

    /// True once a winner exists.
    #[must_use]
    pub fn is_concluded(&self) -> bool {
        self.phase == Phase::Concluded
    }

    /// Seat holding `faction`, if either does.
    #[must_use]
    pub fn seat_of(&self, faction: Faction) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|(_, p)| p.faction == Some(faction))
            .map(|(id, _)| id)
    }

    /// The last history entry.
    #[must_use]
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::initial()
    }
}
