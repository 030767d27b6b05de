//! Core types: players, dice, configuration, state, events.

pub mod config;
pub mod event;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{BoardConfig, ConfigError, RideMode};
pub use event::MatchEvent;
pub use player::{InvalidSeat, PlayerId, PlayerPair};
pub use rng::{DiceSource, GameRng, DiceCheckpoint, ScriptedDice, DIE_FACES};
pub use state::{Interjection, MatchState, MoveOutcome, MoveRecord, Phase, Player};
