//! Ability descriptors.
//!
//! An [`Ability`] is evaluated by the turn engine through the uniform
//! [`AbilityPolicy`] capability: the engine opens a [`Window`] at a fixed
//! point of its roll pipeline, asks each relevant ability whether it
//! triggers, and applies it. The engine alone decides the order windows
//! open in.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Faction;
use crate::core::{BoardConfig, DiceSource, Interjection, MatchState, PlayerId, RideMode};

/// Point in the turn where an ability may fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityWindow {
    /// The holder's die value arrived. Adjusts the value.
    RollProduced,
    /// The holder's die value arrived, before any movement.
    BeforeMove,
    /// The holder landed on a sandworm head.
    OnWorm,
    /// The opponent's move was committed, before handoff.
    AfterOpponentMove,
}

/// An open window with the data abilities need.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Window {
    RollProduced { roll: u8 },
    BeforeMove { roll: u8 },
    OnWorm { from: u32, roll: u8, landed: u32, tail: u32 },
    AfterOpponentMove { from: u32, amount: u8 },
}

impl Window {
    /// Which kind of window this is.
    #[must_use]
    pub fn kind(&self) -> AbilityWindow {
        match self {
            Window::RollProduced { .. } => AbilityWindow::RollProduced,
            Window::BeforeMove { .. } => AbilityWindow::BeforeMove,
            Window::OnWorm { .. } => AbilityWindow::OnWorm,
            Window::AfterOpponentMove { .. } => AbilityWindow::AfterOpponentMove,
        }
    }
}

/// What the engine does after an ability applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbilityOutcome {
    /// Keep going with this roll value.
    Continue(u8),
    /// A decision is pending; the pipeline stops here.
    Suspended,
}

/// Capability shared by every ability.
pub trait AbilityPolicy {
    /// The window this ability listens to.
    fn window(&self) -> AbilityWindow;

    /// Would the ability held by `holder` fire in `window`?
    fn check_trigger(&self, state: &MatchState, holder: PlayerId, window: &Window) -> bool;

    /// Fire the ability. Only call after `check_trigger` returned true.
    fn apply(
        &self,
        state: &mut MatchState,
        holder: PlayerId,
        window: &Window,
        dice: &mut dyn DiceSource,
    ) -> AbilityOutcome;
}

/// Ability descriptor, one variant per faction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    /// Sardaukar: `bonus` added to the first roll.
    ForcedMarch { bonus: u8 },
    /// Atreides: a second die to choose from.
    Prescience,
    /// Fremen: ride a worm instead of falling.
    WormRider { ride: RideMode },
    /// Harkonnen: force the opponent to reroll.
    Sabotage,
}

impl Ability {
    /// The ability `faction` brings to a match on `config`.
    #[must_use]
    pub fn new(faction: Faction, config: &BoardConfig) -> Self {
        match faction {
            Faction::Sardaukar => Ability::ForcedMarch {
                bonus: config.forced_march_bonus,
            },
            Faction::Atreides => Ability::Prescience,
            Faction::Fremen => Ability::WormRider {
                ride: config.ride_mode,
            },
            Faction::Harkonnen => Ability::Sabotage,
        }
    }

    /// The faction this ability belongs to.
    #[must_use]
    pub fn faction(&self) -> Faction {
        match self {
            Ability::ForcedMarch { .. } => Faction::Sardaukar,
            Ability::Prescience => Faction::Atreides,
            Ability::WormRider { .. } => Faction::Fremen,
            Ability::Sabotage => Faction::Harkonnen,
        }
    }

    /// Square reached by riding the worm `landed -> tail`.
    ///
    /// `None` for every ability but Worm Rider.
    #[must_use]
    pub fn ride_position(&self, landed: u32, tail: u32, goal: u32) -> Option<u32> {
        match self {
            Ability::WormRider { ride } => Some(ride.ride(landed, tail, goal)),
            _ => None,
        }
    }
}

impl AbilityPolicy for Ability {
    fn window(&self) -> AbilityWindow {
        self.faction().data().window
    }

    fn check_trigger(&self, state: &MatchState, holder: PlayerId, window: &Window) -> bool {
        if window.kind() != self.window() {
            return false;
        }
        if !state.players[holder].has_unused(self.faction()) {
            return false;
        }
        match self.window() {
            AbilityWindow::AfterOpponentMove => holder != state.active,
            _ => holder == state.active,
        }
    }

    fn apply(
        &self,
        state: &mut MatchState,
        holder: PlayerId,
        window: &Window,
        dice: &mut dyn DiceSource,
    ) -> AbilityOutcome {
        match (*self, *window) {
            (Ability::ForcedMarch { bonus }, Window::RollProduced { roll }) => {
                state.players[holder].ability_used = true;
                let boosted = roll.saturating_add(bonus);
                debug!(%holder, roll, boosted, "forced march");
                AbilityOutcome::Continue(boosted)
            }
            (Ability::Prescience, Window::BeforeMove { roll }) => {
                state.players[holder].ability_used = true;
                let second = dice.roll();
                state.roll_in_flight = false;
                state.interjection = Some(Interjection::AwaitingForesight {
                    candidates: [roll, second],
                });
                debug!(%holder, roll, second, "prescience: awaiting choice");
                AbilityOutcome::Suspended
            }
            (
                Ability::WormRider { .. },
                Window::OnWorm {
                    from,
                    roll,
                    landed,
                    tail,
                },
            ) => {
                state.roll_in_flight = false;
                state.interjection = Some(Interjection::AwaitingTrapChoice {
                    from,
                    roll,
                    landed,
                    tail,
                });
                debug!(%holder, landed, tail, "worm rider: awaiting choice");
                AbilityOutcome::Suspended
            }
            (Ability::Sabotage, Window::AfterOpponentMove { from, amount }) => {
                state.roll_in_flight = false;
                state.interjection = Some(Interjection::AwaitingSabotage {
                    mover: state.active,
                    saboteur: holder,
                    from,
                    amount,
                });
                debug!(saboteur = %holder, amount, "sabotage: awaiting choice");
                AbilityOutcome::Suspended
            }
            // Mismatched window: nothing to do.
            (_, Window::RollProduced { roll } | Window::BeforeMove { roll }) => {
                AbilityOutcome::Continue(roll)
            }
            (_, Window::OnWorm { roll, .. }) => AbilityOutcome::Continue(roll),
            (_, Window::AfterOpponentMove { amount, .. }) => AbilityOutcome::Continue(amount),
        }
    }
}
