//! Landing resolution.

use serde::{Deserialize, Serialize};

use super::modifiers::ModifierTable;

/// Where a piece ends up after landing on a raw square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Landing {
    /// Square after the goal cap and any modifier.
    pub position: u32,
    /// A sandworm sent the piece backward.
    pub trap_fired: bool,
    /// An ornithopter sent the piece forward.
    pub boost_fired: bool,
}

impl Landing {
    const fn plain(position: u32) -> Self {
        Self {
            position,
            trap_fired: false,
            boost_fired: false,
        }
    }
}

/// Resolve a raw landing square.
///
/// Reaching or passing `goal` caps at `goal` without consulting the table.
/// Otherwise worms are checked before ornithopters and at most one fires.
#[must_use]
pub fn resolve(table: &ModifierTable, goal: u32, raw: u32) -> Landing {
    if raw >= goal {
        return Landing::plain(goal);
    }

    if let Some(tail) = table.worm_tail(raw) {
        return Landing {
            position: tail,
            trap_fired: true,
            boost_fired: false,
        };
    }

    if let Some(destination) = table.ornithopter_destination(raw) {
        return Landing {
            position: destination,
            trap_fired: false,
            boost_fired: true,
        };
    }

    Landing::plain(raw)
}
