//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Once;

use arrakis_race::{BoardConfig, DiceSource, Faction, MatchEvent, MatchState, PlayerId, TurnEngine};
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Install a test log subscriber once per process.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then `warn`.
pub fn init_logging() {
    INIT.call_once(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Engine on a 10x10 board with only the given modifiers.
pub fn engine_with(worms: &[(u32, u32)], ornithopters: &[(u32, u32)]) -> TurnEngine {
    let config = BoardConfig::empty(10)
        .with_worms(worms.iter().copied())
        .with_ornithopters(ornithopters.iter().copied());
    TurnEngine::new(config).expect("test board is valid")
}

/// Run setup through events and start the match.
pub fn start<D: DiceSource>(
    engine: &TurnEngine,
    first: Faction,
    second: Faction,
    dice: &mut D,
) -> MatchState {
    let mut state = TurnEngine::initial_state();
    for event in [
        MatchEvent::SetPlayerFaction {
            player: PlayerId::FIRST,
            faction: first,
        },
        MatchEvent::SetPlayerFaction {
            player: PlayerId::SECOND,
            faction: second,
        },
        MatchEvent::StartMatch,
    ] {
        state = engine.apply(&state, event, dice);
    }
    state
}

/// `BeginRoll` followed by `RollProduced(face)`.
pub fn roll<D: DiceSource>(engine: &TurnEngine, state: &MatchState, face: u8, dice: &mut D) -> MatchState {
    let state = engine.apply(state, MatchEvent::BeginRoll, dice);
    engine.apply(&state, MatchEvent::RollProduced(face), dice)
}

/// Dispatch one event.
pub fn send<D: DiceSource>(
    engine: &TurnEngine,
    state: &MatchState,
    event: MatchEvent,
    dice: &mut D,
) -> MatchState {
    engine.apply(state, event, dice)
}
