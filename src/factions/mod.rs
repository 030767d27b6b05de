//! Factions and their abilities.
//!
//! Each player picks one of four factions before the match. Every faction
//! carries one ability that may fire at most once per match, in its own
//! window of the turn:
//!
//! | Faction   | Ability      | Window                                  |
//! |-----------|--------------|-----------------------------------------|
//! | Sardaukar | Forced March | own roll produced (automatic, +2)       |
//! | Atreides  | Prescience   | own roll produced, before moving        |
//! | Fremen    | Worm Rider   | own landing on a sandworm               |
//! | Harkonnen | Sabotage     | opponent's move applied, before handoff |
//!
//! The windows never overlap, so at most one decision can be pending.

mod ability;

pub use ability::{Ability, AbilityOutcome, AbilityPolicy, AbilityWindow, Window};

use serde::{Deserialize, Serialize};

/// One of the four playable factions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Atreides,
    Harkonnen,
    Fremen,
    Sardaukar,
}

/// Static presentation data for a faction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FactionData {
    pub name: &'static str,
    /// Hex color used for the faction's piece and HUD.
    pub color: &'static str,
    pub ability_name: &'static str,
    pub ability_description: &'static str,
    pub window: AbilityWindow,
}

const ATREIDES: FactionData = FactionData {
    name: "House Atreides",
    color: "#1E3A5F",
    ability_name: "Prescience",
    ability_description: "Roll two dice and choose which one to play",
    window: AbilityWindow::BeforeMove,
};

const HARKONNEN: FactionData = FactionData {
    name: "House Harkonnen",
    color: "#8B0000",
    ability_name: "Sabotage",
    ability_description: "Force opponent to reroll their dice (must keep new result)",
    window: AbilityWindow::AfterOpponentMove,
};

const FREMEN: FactionData = FactionData {
    name: "Fremen",
    color: "#7C9885",
    ability_name: "Worm Rider",
    ability_description: "When landing on sandworm, ride it forward instead of backward",
    window: AbilityWindow::OnWorm,
};

const SARDAUKAR: FactionData = FactionData {
    name: "Sardaukar",
    color: "#5C5C5C",
    ability_name: "Forced March",
    ability_description: "Add +2 to dice result",
    window: AbilityWindow::RollProduced,
};

impl Faction {
    /// All factions in lobby order.
    pub const ALL: [Faction; 4] = [
        Faction::Atreides,
        Faction::Harkonnen,
        Faction::Fremen,
        Faction::Sardaukar,
    ];

    /// Presentation data.
    #[must_use]
    pub const fn data(self) -> &'static FactionData {
        match self {
            Faction::Atreides => &ATREIDES,
            Faction::Harkonnen => &HARKONNEN,
            Faction::Fremen => &FREMEN,
            Faction::Sardaukar => &SARDAUKAR,
        }
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.data().name)
    }
}
