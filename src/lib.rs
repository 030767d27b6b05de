//! # arrakis-race
//!
//! Turn engine for a two-player dice race to square 100, with sandworms,
//! ornithopters and four asymmetric faction abilities.
//!
//! ## Design Principles
//!
//! 1. **Pure Reducer**: `TurnEngine::apply(state, event, dice)` is the only
//!    way a match changes. It never panics and never fails: an event that
//!    is not legal right now returns the state unchanged.
//!
//! 2. **Explicit Waiting**: a tumbling die (`roll_in_flight`) and pending
//!    player decisions (`interjection`) are state, not suspended calls.
//!    Callers drive the match by dispatching events.
//!
//! 3. **Configuration Over Convention**: board size, modifier placement and
//!    ability tuning come from `BoardConfig`.
//!
//! ## Modules
//!
//! - `core`: players, dice, configuration, state, events
//! - `board`: geometry, modifier table, landing resolution
//! - `factions`: faction data and ability descriptors
//! - `rules`: the turn engine
//! - `sim`: automated playouts
//!
//! ## Example
//!
//! ```
//! use arrakis_race::{Faction, MatchEvent, Phase, PlayerId, ScriptedDice, TurnEngine};
//!
//! let engine = TurnEngine::default();
//! let mut dice = ScriptedDice::new([]);
//!
//! let mut state = TurnEngine::initial_state();
//! for event in [
//!     MatchEvent::SetPlayerFaction { player: PlayerId::FIRST, faction: Faction::Sardaukar },
//!     MatchEvent::SetPlayerFaction { player: PlayerId::SECOND, faction: Faction::Fremen },
//!     MatchEvent::StartMatch,
//!     MatchEvent::BeginRoll,
//!     MatchEvent::RollProduced(3),
//! ] {
//!     state = engine.apply(&state, event, &mut dice);
//! }
//!
//! assert_eq!(state.phase, Phase::InProgress);
//! // Forced March adds 2 to the first roll.
//! assert_eq!(state.players[PlayerId::FIRST].position, 5);
//! ```

pub mod board;
pub mod core;
pub mod factions;
pub mod rules;
pub mod sim;

// Re-export commonly used types
pub use crate::core::{
    BoardConfig, ConfigError, RideMode,
    DiceSource, GameRng, DiceCheckpoint, ScriptedDice,
    InvalidSeat, PlayerId, PlayerPair,
    Interjection, MatchEvent, MatchState, MoveOutcome, MoveRecord, Phase, Player,
};

pub use crate::board::{resolve, BoardGeometry, Cell, Landing, Modifier, ModifierKind, ModifierTable};

pub use crate::factions::{Ability, AbilityOutcome, AbilityPolicy, AbilityWindow, Faction, FactionData, Window};

pub use crate::rules::{Rejection, TurnEngine};

pub use crate::sim::{ChoicePolicy, GreedyPolicy, Playout, PlayoutResult, RandomPolicy};
