//! Automated play.
//!
//! Drives the turn engine the way a view would, for tests, benchmarks and
//! balance experiments.
//!
//! ```
//! use arrakis_race::core::{GameRng, MatchState, PlayerId};
//! use arrakis_race::factions::Faction;
//! use arrakis_race::rules::TurnEngine;
//! use arrakis_race::sim::{GreedyPolicy, Playout};
//!
//! let engine = TurnEngine::default();
//! let mut state = MatchState::initial();
//! state.players[PlayerId::FIRST].faction = Some(Faction::Fremen);
//! state.players[PlayerId::SECOND].faction = Some(Faction::Harkonnen);
//!
//! let result = Playout::new(&engine).run(state, &mut GameRng::new(7), &mut GreedyPolicy::default());
//! assert!(result.winner.is_some());
//! ```

mod playout;
mod policy;

pub use playout::{Playout, PlayoutResult};
pub use policy::{ChoicePolicy, GreedyPolicy, RandomPolicy};
