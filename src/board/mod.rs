//! The board: geometry, modifier placements, landing resolution.
//!
//! ## Key Components
//!
//! - [`BoardGeometry`]: square number to grid cell, for views
//! - [`ModifierTable`]: validated sandworm/ornithopter lookup
//! - [`resolve`]: turns a raw landing square into a final square
//!
//! ```
//! use arrakis_race::board::{resolve, Modifier, ModifierTable};
//!
//! let table = ModifierTable::new(&[Modifier::new(99, 54)], &[], 100).unwrap();
//!
//! let landing = resolve(&table, 100, 99);
//! assert_eq!(landing.position, 54);
//! assert!(landing.trap_fired);
//!
//! // Past the goal nothing fires.
//! assert_eq!(resolve(&table, 100, 103).position, 100);
//! ```

mod geometry;
mod modifiers;
mod resolver;

pub use geometry::{BoardGeometry, Cell};
pub use modifiers::{Modifier, ModifierKind, ModifierTable};
pub use resolver::{resolve, Landing};
