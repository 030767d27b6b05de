//! Match rules.
//!
//! [`TurnEngine`] is the only way a [`MatchState`](crate::core::MatchState)
//! changes. Views read the state, dispatch events, and use
//! [`TurnEngine::legal_events`] to decide which controls to enable.

pub mod engine;

pub use engine::{Rejection, TurnEngine};
