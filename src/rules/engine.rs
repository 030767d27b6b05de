//! The turn engine.
//!
//! A reducer over [`MatchState`]: `apply(state, event, dice) -> state`.
//! Every sequencing rule between rolling, movement, board modifiers,
//! ability windows and turn handoff lives here.
//!
//! ## Roll pipeline
//!
//! 1. `RollProduced` window (Forced March adjusts the value)
//! 2. `BeforeMove` window (Prescience suspends for a choice)
//! 3. raw landing = position + value, resolved against the board
//! 4. `OnWorm` window if a worm fired (Worm Rider suspends for a choice)
//! 5. commit the landing
//! 6. goal reached: the match concludes, no further windows
//! 7. `AfterOpponentMove` window (Sabotage suspends for a choice)
//! 8. a bonus roll is owed after an effective 6
//!
//! Choice events re-enter the pipeline: a Prescience choice at step 3, a
//! Worm Rider choice at step 6, a confirmed Sabotage at step 1 with a
//! fresh die.
//!
//! ## Rejection
//!
//! Out-of-window events return the input state unchanged. [`TurnEngine::check`]
//! names the reason; `apply` only logs it.

use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, trace};

use crate::board::{resolve, BoardGeometry, ModifierTable};
use crate::core::{
    BoardConfig, ConfigError, DiceSource, Interjection, MatchEvent, MatchState, MoveOutcome,
    MoveRecord, Phase, Player, PlayerId, DIE_FACES,
};
use crate::factions::{Ability, AbilityOutcome, AbilityPolicy, Faction, Window};

/// Why an event was ignored.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("only allowed during setup")]
    NotInSetup,

    #[error("match is not in progress")]
    NotInProgress,

    #[error("a decision is pending")]
    InterjectionPending,

    #[error("a roll is already in flight")]
    RollInFlight,

    #[error("no roll is in flight")]
    NoRollInFlight,

    #[error("the last move has not been completed")]
    MoveNotCompleted,

    #[error("no move to complete")]
    NothingToComplete,

    #[error("die face {0} is outside 1..=6")]
    InvalidFace(u8),

    #[error("no {0} decision is pending")]
    NotPending(&'static str),

    #[error("{0} is not one of the offered dice")]
    NotACandidate(u8),

    #[error("both players need a faction")]
    FactionsMissing,

    #[error("{0} is already taken")]
    FactionTaken(Faction),
}

/// The turn engine for one board.
///
/// Holds only immutable configuration; all match data lives in the
/// [`MatchState`] passed to [`apply`](TurnEngine::apply).
#[derive(Clone, Debug)]
pub struct TurnEngine {
    config: BoardConfig,
    table: ModifierTable,
    geometry: BoardGeometry,
}

impl TurnEngine {
    /// Build an engine for a validated board.
    pub fn new(config: BoardConfig) -> Result<Self, ConfigError> {
        let table = config.modifier_table()?;
        let geometry = BoardGeometry::new(config.size);
        Ok(Self {
            config,
            table,
            geometry,
        })
    }

    /// The board configuration.
    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// The modifier lookup table.
    #[must_use]
    pub fn table(&self) -> &ModifierTable {
        &self.table
    }

    /// Square/cell mapping for views.
    #[must_use]
    pub fn geometry(&self) -> BoardGeometry {
        self.geometry
    }

    /// The goal square.
    #[must_use]
    pub fn goal(&self) -> u32 {
        self.config.goal()
    }

    /// The state every match starts from.
    #[must_use]
    pub fn initial_state() -> MatchState {
        MatchState::initial()
    }

    /// Apply an event and return the next state.
    ///
    /// Total over every (state, event) pair: a rejected event returns a
    /// clone of `state`. `dice` is asked for one face per die the engine
    /// draws itself (the Prescience second die and the Sabotage reroll).
    pub fn apply<D: DiceSource>(
        &self,
        state: &MatchState,
        event: MatchEvent,
        dice: &mut D,
    ) -> MatchState {
        if let Err(reason) = self.check(state, &event) {
            trace!(event = event.name(), %reason, "event rejected");
            return state.clone();
        }

        let dice: &mut dyn DiceSource = dice;
        let mut next = state.clone();

        match event {
            MatchEvent::SetPlayerName { player, name } => {
                let name = name.trim();
                next.players[player].name = if name.is_empty() {
                    Player::default_name(player)
                } else {
                    name.to_string()
                };
            }
            MatchEvent::SetPlayerFaction { player, faction } => {
                next.players[player].faction = Some(faction);
            }
            MatchEvent::StartMatch => {
                next.phase = Phase::InProgress;
                next.active = PlayerId::FIRST;
                debug!("match started");
            }
            MatchEvent::BeginRoll => {
                next.roll_in_flight = true;
            }
            MatchEvent::RollProduced(value) => {
                self.roll(&mut next, value, dice);
            }
            MatchEvent::ChooseForesightValue(value) => {
                next.interjection = None;
                debug!(player = %next.active, value, "prescience: chose die");
                self.advance(&mut next, value, dice);
            }
            MatchEvent::ChooseTrapOutcome { accept } => {
                self.resolve_worm_choice(&mut next, accept, dice);
            }
            MatchEvent::Sabotage { confirm } => {
                self.resolve_sabotage(&mut next, confirm, dice);
            }
            MatchEvent::MoveComplete => {
                next.last_roll = None;
                if next.bonus_roll_owed {
                    next.bonus_roll_owed = false;
                    debug!(player = %next.active, "bonus roll");
                } else {
                    next.active = next.active.opponent();
                    next.turn_number += 1;
                }
            }
            MatchEvent::ResetMatch => {
                debug!("match reset");
                next = MatchState::initial();
            }
        }

        next
    }

    /// Would `event` be accepted in `state`?
    pub fn check(&self, state: &MatchState, event: &MatchEvent) -> Result<(), Rejection> {
        match event {
            MatchEvent::ResetMatch => Ok(()),
            MatchEvent::SetPlayerName { .. } => Self::require_setup(state),
            MatchEvent::SetPlayerFaction { player, faction } => {
                Self::require_setup(state)?;
                if state.players[player.opponent()].faction == Some(*faction) {
                    return Err(Rejection::FactionTaken(*faction));
                }
                Ok(())
            }
            MatchEvent::StartMatch => {
                Self::require_setup(state)?;
                if state.players.iter().any(|(_, p)| p.faction.is_none()) {
                    return Err(Rejection::FactionsMissing);
                }
                Ok(())
            }
            MatchEvent::BeginRoll => {
                Self::require_turn_open(state)?;
                if state.roll_in_flight {
                    return Err(Rejection::RollInFlight);
                }
                if state.last_roll.is_some() {
                    return Err(Rejection::MoveNotCompleted);
                }
                Ok(())
            }
            MatchEvent::RollProduced(value) => {
                Self::require_turn_open(state)?;
                if !state.roll_in_flight {
                    return Err(Rejection::NoRollInFlight);
                }
                if !(1..=DIE_FACES).contains(value) {
                    return Err(Rejection::InvalidFace(*value));
                }
                Ok(())
            }
            MatchEvent::MoveComplete => {
                Self::require_turn_open(state)?;
                if state.roll_in_flight {
                    return Err(Rejection::RollInFlight);
                }
                if state.last_roll.is_none() {
                    return Err(Rejection::NothingToComplete);
                }
                Ok(())
            }
            MatchEvent::ChooseForesightValue(value) => match &state.interjection {
                Some(Interjection::AwaitingForesight { candidates }) => {
                    if candidates.contains(value) {
                        Ok(())
                    } else {
                        Err(Rejection::NotACandidate(*value))
                    }
                }
                _ => Err(Rejection::NotPending("prescience")),
            },
            MatchEvent::ChooseTrapOutcome { .. } => match &state.interjection {
                Some(Interjection::AwaitingTrapChoice { .. }) => Ok(()),
                _ => Err(Rejection::NotPending("worm rider")),
            },
            MatchEvent::Sabotage { .. } => match &state.interjection {
                Some(Interjection::AwaitingSabotage { .. }) => Ok(()),
                _ => Err(Rejection::NotPending("sabotage")),
            },
        }
    }

    /// Every event `check` accepts in `state`, except `ResetMatch` (always
    /// legal), `SetPlayerName` (free-form) and `RollProduced` (its face
    /// comes from the dice).
    #[must_use]
    pub fn legal_events(&self, state: &MatchState) -> SmallVec<[MatchEvent; 4]> {
        let mut candidates: SmallVec<[MatchEvent; 4]> = SmallVec::new();

        match (&state.phase, &state.interjection) {
            (Phase::Setup, _) => {
                for player in PlayerId::both() {
                    for faction in Faction::ALL {
                        candidates.push(MatchEvent::SetPlayerFaction { player, faction });
                    }
                }
                candidates.push(MatchEvent::StartMatch);
            }
            (Phase::InProgress, Some(Interjection::AwaitingForesight { candidates: dice })) => {
                candidates.push(MatchEvent::ChooseForesightValue(dice[0]));
                if dice[1] != dice[0] {
                    candidates.push(MatchEvent::ChooseForesightValue(dice[1]));
                }
            }
            (Phase::InProgress, Some(Interjection::AwaitingTrapChoice { .. })) => {
                candidates.push(MatchEvent::ChooseTrapOutcome { accept: true });
                candidates.push(MatchEvent::ChooseTrapOutcome { accept: false });
            }
            (Phase::InProgress, Some(Interjection::AwaitingSabotage { .. })) => {
                candidates.push(MatchEvent::Sabotage { confirm: true });
                candidates.push(MatchEvent::Sabotage { confirm: false });
            }
            (Phase::InProgress, None) => {
                candidates.push(MatchEvent::BeginRoll);
                candidates.push(MatchEvent::MoveComplete);
            }
            (Phase::Concluded, _) => {}
        }

        candidates.retain(|event| self.check(state, event).is_ok());
        candidates
    }

    // === Pipeline ===

    fn require_setup(state: &MatchState) -> Result<(), Rejection> {
        if state.phase == Phase::Setup {
            Ok(())
        } else {
            Err(Rejection::NotInSetup)
        }
    }

    fn require_turn_open(state: &MatchState) -> Result<(), Rejection> {
        if state.phase != Phase::InProgress {
            return Err(Rejection::NotInProgress);
        }
        if state.interjection.is_some() {
            return Err(Rejection::InterjectionPending);
        }
        Ok(())
    }

    fn ability(&self, state: &MatchState, seat: PlayerId) -> Option<Ability> {
        state.players[seat]
            .faction
            .map(|faction| Ability::new(faction, &self.config))
    }

    /// Fire `holder`'s ability if it listens to `window`.
    fn open_window(
        &self,
        next: &mut MatchState,
        holder: PlayerId,
        window: Window,
        dice: &mut dyn DiceSource,
    ) -> Option<AbilityOutcome> {
        let ability = self.ability(next, holder)?;
        if !ability.check_trigger(next, holder, &window) {
            return None;
        }
        Some(ability.apply(next, holder, &window, dice))
    }

    /// Steps 1-2: roll-value windows, then movement.
    fn roll(&self, next: &mut MatchState, value: u8, dice: &mut dyn DiceSource) {
        let active = next.active;
        let mut value = value;
        next.bonus_roll_owed = false;

        if let Some(AbilityOutcome::Continue(adjusted)) =
            self.open_window(next, active, Window::RollProduced { roll: value }, dice)
        {
            value = adjusted;
        }

        if let Some(AbilityOutcome::Suspended) =
            self.open_window(next, active, Window::BeforeMove { roll: value }, dice)
        {
            return;
        }

        self.advance(next, value, dice);
    }

    /// Steps 3-4: resolve the landing, maybe suspend on a worm.
    fn advance(&self, next: &mut MatchState, value: u8, dice: &mut dyn DiceSource) {
        let active = next.active;
        let goal = self.goal();
        let from = next.players[active].position;
        let raw = from + u32::from(value);
        let landing = resolve(&self.table, goal, raw);

        next.last_roll = Some(value);

        if landing.trap_fired {
            let window = Window::OnWorm {
                from,
                roll: value,
                landed: raw,
                tail: landing.position,
            };
            if let Some(AbilityOutcome::Suspended) = self.open_window(next, active, window, dice) {
                return;
            }
        }

        let outcome = if raw >= goal {
            MoveOutcome::Capped
        } else if landing.trap_fired {
            MoveOutcome::Trapped
        } else if landing.boost_fired {
            MoveOutcome::Boosted
        } else {
            MoveOutcome::Plain
        };

        self.commit(next, from, value, landing.position, outcome, dice);
    }

    /// Steps 5-8: commit, goal check, sabotage window, bonus roll.
    fn commit(
        &self,
        next: &mut MatchState,
        from: u32,
        roll: u8,
        to: u32,
        outcome: MoveOutcome,
        dice: &mut dyn DiceSource,
    ) {
        let active = next.active;
        next.players[active].position = to;
        next.last_roll = Some(roll);
        next.history.push_back(MoveRecord::Moved {
            player: active,
            roll,
            from,
            to,
            outcome,
        });
        debug!(player = %active, roll, from, to, ?outcome, "move committed");

        if to >= self.goal() {
            next.phase = Phase::Concluded;
            next.winner = Some(active);
            next.roll_in_flight = false;
            next.bonus_roll_owed = false;
            debug!(winner = %active, "match concluded");
            return;
        }

        let window = Window::AfterOpponentMove { from, amount: roll };
        if let Some(AbilityOutcome::Suspended) =
            self.open_window(next, active.opponent(), window, dice)
        {
            return;
        }

        next.roll_in_flight = false;
        next.bonus_roll_owed = roll == 6;
    }

    fn resolve_worm_choice(&self, next: &mut MatchState, accept: bool, dice: &mut dyn DiceSource) {
        let Some(Interjection::AwaitingTrapChoice {
            from,
            roll,
            landed,
            tail,
        }) = next.interjection.take()
        else {
            return;
        };
        let active = next.active;

        if accept {
            debug!(player = %active, tail, "worm rider: fell");
            self.commit(next, from, roll, tail, MoveOutcome::Trapped, dice);
            return;
        }

        let ride = self
            .ability(next, active)
            .and_then(|ability| ability.ride_position(landed, tail, self.goal()))
            .unwrap_or(landed);
        next.players[active].ability_used = true;
        debug!(player = %active, landed, ride, "worm rider: rode");
        self.commit(next, from, roll, ride, MoveOutcome::RodeWorm, dice);
    }

    fn resolve_sabotage(&self, next: &mut MatchState, confirm: bool, dice: &mut dyn DiceSource) {
        let Some(Interjection::AwaitingSabotage {
            mover,
            saboteur,
            from,
            amount,
        }) = next.interjection.take()
        else {
            return;
        };

        if !confirm {
            debug!(%saboteur, "sabotage declined");
            next.bonus_roll_owed = amount == 6;
            return;
        }

        next.players[saboteur].ability_used = true;
        let undone = next.players[mover].position;
        next.players[mover].position = from;
        next.history.push_back(MoveRecord::Reverted {
            player: mover,
            saboteur,
            from: undone,
            to: from,
        });

        let reroll = dice.roll();
        debug!(%saboteur, %mover, undone, back_to = from, reroll, "sabotage confirmed");
        self.roll(next, reroll, dice);
    }
}

impl Default for TurnEngine {
    /// Engine on [`BoardConfig::default`], which always validates.
    fn default() -> Self {
        let config = BoardConfig::default();
        let table = config.modifier_table();
        debug_assert!(table.is_ok(), "default board rejected: {table:?}");
        Self {
            table: table.unwrap_or_else(|_| ModifierTable::empty()),
            geometry: BoardGeometry::new(config.size),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedDice;

    fn engine() -> TurnEngine {
        TurnEngine::new(BoardConfig::empty(10)).unwrap()
    }

    fn started(first: Faction, second: Faction) -> MatchState {
        let mut state = MatchState::initial();
        state.players[PlayerId::FIRST].faction = Some(first);
        state.players[PlayerId::SECOND].faction = Some(second);
        state.phase = Phase::InProgress;
        state
    }

    #[test]
    fn test_default_engine_has_default_board() {
        let engine = TurnEngine::default();
        assert_eq!(engine.goal(), 100);
        assert_eq!(engine.table().len(), 16);
    }

    #[test]
    fn test_default_engine_matches_validated_board() {
        let config = BoardConfig::default();
        let table = config.modifier_table().unwrap();
        let engine = TurnEngine::default();

        assert_eq!(engine.config(), &config);
        assert_eq!(engine.table().len(), table.len());
        for m in config.worms.iter().chain(&config.ornithopters) {
            assert_eq!(engine.table().get(m.from), table.get(m.from));
            assert!(engine.table().get(m.from).is_some());
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = BoardConfig::empty(10).with_worms([(50, 60)]);
        assert!(TurnEngine::new(config).is_err());
    }

    #[test]
    fn test_check_names_reason() {
        let engine = engine();
        let state = MatchState::initial();

        assert_eq!(engine.check(&state, &MatchEvent::BeginRoll), Err(Rejection::NotInProgress));
        assert_eq!(engine.check(&state, &MatchEvent::StartMatch), Err(Rejection::FactionsMissing));
        assert_eq!(engine.check(&state, &MatchEvent::ResetMatch), Ok(()));
    }

    #[test]
    fn test_invalid_face_rejected() {
        let engine = engine();
        let mut state = started(Faction::Atreides, Faction::Fremen);
        state.roll_in_flight = true;

        assert_eq!(
            engine.check(&state, &MatchEvent::RollProduced(7)),
            Err(Rejection::InvalidFace(7))
        );
        assert_eq!(
            engine.check(&state, &MatchEvent::RollProduced(0)),
            Err(Rejection::InvalidFace(0))
        );
    }

    #[test]
    fn test_plain_roll_moves_and_hands_off() {
        let engine = engine();
        let mut dice = ScriptedDice::new([]);
        let state = started(Faction::Fremen, Faction::Sardaukar);

        let state = engine.apply(&state, MatchEvent::BeginRoll, &mut dice);
        assert!(state.roll_in_flight);

        let state = engine.apply(&state, MatchEvent::RollProduced(5), &mut dice);
        assert_eq!(state.players[PlayerId::FIRST].position, 5);
        assert_eq!(state.last_roll, Some(5));
        assert!(!state.roll_in_flight);
        assert!(!state.bonus_roll_owed);

        let state = engine.apply(&state, MatchEvent::MoveComplete, &mut dice);
        assert_eq!(state.active, PlayerId::SECOND);
        assert_eq!(state.last_roll, None);
        assert_eq!(state.turn_number, 2);
    }

    #[test]
    fn test_legal_events_in_setup() {
        let engine = engine();
        let mut state = MatchState::initial();
        state.players[PlayerId::FIRST].faction = Some(Faction::Fremen);

        let legal = engine.legal_events(&state);

        assert!(!legal.contains(&MatchEvent::StartMatch));
        assert!(!legal.contains(&MatchEvent::SetPlayerFaction {
            player: PlayerId::SECOND,
            faction: Faction::Fremen,
        }));
        assert!(legal.contains(&MatchEvent::SetPlayerFaction {
            player: PlayerId::SECOND,
            faction: Faction::Harkonnen,
        }));
    }

    #[test]
    fn test_legal_events_during_play() {
        let engine = engine();
        let mut dice = ScriptedDice::new([]);
        let state = started(Faction::Fremen, Faction::Sardaukar);

        assert_eq!(engine.legal_events(&state).as_slice(), &[MatchEvent::BeginRoll]);

        let state = engine.apply(&state, MatchEvent::BeginRoll, &mut dice);
        assert!(engine.legal_events(&state).is_empty());

        let state = engine.apply(&state, MatchEvent::RollProduced(2), &mut dice);
        assert_eq!(engine.legal_events(&state).as_slice(), &[MatchEvent::MoveComplete]);
    }

    #[test]
    fn test_legal_foresight_dedups_equal_dice() {
        let engine = engine();
        let mut state = started(Faction::Atreides, Faction::Fremen);
        state.interjection = Some(Interjection::AwaitingForesight { candidates: [4, 4] });

        assert_eq!(
            engine.legal_events(&state).as_slice(),
            &[MatchEvent::ChooseForesightValue(4)]
        );
    }
}
