//! Playout driver.
//!
//! Plays a match to the end by standing in for the view: it dispatches
//! `BeginRoll`, feeds die faces, answers interjections through a
//! [`ChoicePolicy`], and acknowledges every move.

use tracing::debug;

use super::policy::ChoicePolicy;
use crate::core::{DiceSource, Interjection, MatchEvent, MatchState, Phase, PlayerId};
use crate::rules::TurnEngine;

/// Result of a playout.
#[derive(Clone, Debug)]
pub struct PlayoutResult {
    /// Final state.
    pub state: MatchState,
    /// Events dispatched.
    pub steps: usize,
    /// Winner, if the match concluded within the step limit.
    pub winner: Option<PlayerId>,
}

/// Drives matches on one engine.
#[derive(Clone, Debug)]
pub struct Playout<'a> {
    engine: &'a TurnEngine,
    max_steps: usize,
}

impl<'a> Playout<'a> {
    /// New driver with a 10,000 event limit.
    #[must_use]
    pub fn new(engine: &'a TurnEngine) -> Self {
        Self {
            engine,
            max_steps: 10_000,
        }
    }

    /// Set the event limit.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// The event a view would dispatch next, or `None` when nothing can
    /// move the match forward (concluded, or setup without factions).
    pub fn next_event<D: DiceSource, P: ChoicePolicy>(
        &self,
        state: &MatchState,
        dice: &mut D,
        policy: &mut P,
    ) -> Option<MatchEvent> {
        match state.phase {
            Phase::Concluded => None,
            Phase::Setup => self
                .engine
                .check(state, &MatchEvent::StartMatch)
                .ok()
                .map(|()| MatchEvent::StartMatch),
            Phase::InProgress => Some(match &state.interjection {
                Some(Interjection::AwaitingForesight { candidates }) => {
                    MatchEvent::ChooseForesightValue(policy.choose_foresight(state, *candidates))
                }
                Some(Interjection::AwaitingTrapChoice { landed, tail, .. }) => {
                    MatchEvent::ChooseTrapOutcome {
                        accept: policy.accept_worm(state, *landed, *tail),
                    }
                }
                Some(Interjection::AwaitingSabotage { from, amount, .. }) => MatchEvent::Sabotage {
                    confirm: policy.confirm_sabotage(state, *from, *amount),
                },
                None if state.roll_in_flight => MatchEvent::RollProduced(dice.roll()),
                None if state.last_roll.is_some() => MatchEvent::MoveComplete,
                None => MatchEvent::BeginRoll,
            }),
        }
    }

    /// Play from `state` until the match concludes or the limit is hit.
    pub fn run<D: DiceSource, P: ChoicePolicy>(
        &self,
        state: MatchState,
        dice: &mut D,
        policy: &mut P,
    ) -> PlayoutResult {
        self.run_with(state, dice, policy, |_, _, _| {})
    }

    /// Like [`run`](Self::run), calling `observe(before, event, after)` for
    /// every dispatched event.
    pub fn run_with<D, P, F>(
        &self,
        mut state: MatchState,
        dice: &mut D,
        policy: &mut P,
        mut observe: F,
    ) -> PlayoutResult
    where
        D: DiceSource,
        P: ChoicePolicy,
        F: FnMut(&MatchState, &MatchEvent, &MatchState),
    {
        let mut steps = 0;

        while steps < self.max_steps {
            let Some(event) = self.next_event(&state, dice, policy) else {
                break;
            };
            let next = self.engine.apply(&state, event.clone(), dice);
            observe(&state, &event, &next);
            state = next;
            steps += 1;
        }

        debug!(steps, winner = ?state.winner, "playout finished");
        PlayoutResult {
            winner: state.winner,
            state,
            steps,
        }
    }
}
