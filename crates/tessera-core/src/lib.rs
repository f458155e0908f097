//! # Tessera Core
//!
//! Deterministic tile-grid simulation engine for Tessera puzzle levels.
//!
//! A level is a [`Grid`] of terrain [`Cell`]s with [`Actor`]s on top: the
//! player, enemies, pushable blocks, items and fixtures. Every move is a
//! *visit* settled by dominance between the mover and the actors already in
//! the target cell (see [`resolver`]). A seeded [`DeterministicRandom`] and
//! the input [`Recording`] make every session exactly replayable.
//!
//! ## Architecture
//!
//! - **Values**: [`location`], [`dominance`], [`random`]
//! - **Objects**: [`component`], [`cell`], [`actor`], stored in an [`arena`]
//! - **Rules**: [`resolver`] (visits, terrain, interactions, behaviour)
//! - **Loop**: [`grid`], with [`recording`], [`events`] and [`snapshot`]
//! - **Level data**: [`registry`], [`config`], [`error`]
//!
//! ## Usage
//!
//! ```
//! use tessera_core::{ComponentRegistry, ComponentSpec, Direction, Grid, GridConfig};
//! use tessera_core::registry::slots;
//!
//! let specs = vec![
//!     ComponentSpec::new(0, 2, slots::EXIT),
//!     ComponentSpec::new(0, 0, slots::PLAYER),
//! ];
//! let mut grid = Grid::load(
//!     GridConfig::with_dimensions(1, 3),
//!     &ComponentRegistry::standard(),
//!     &specs,
//! )?;
//!
//! let mut frame = 0;
//! for _ in 0..2 {
//!     grid.move_player(Direction::East);
//!     for _ in 0..8 {
//!         grid.update_frame(frame);
//!         frame += 1;
//!     }
//! }
//! assert!(grid.is_level_complete());
//! # Ok::<(), tessera_core::ConfigError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod actor;
pub mod arena;
pub mod cell;
pub mod component;
pub mod config;
pub mod dominance;
pub mod error;
pub mod events;
pub mod grid;
pub mod location;
pub mod random;
pub mod recording;
pub mod registry;
pub mod resolver;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use actor::{Actor, ActorId, ActorKind, ActorTag, Immunity, Inventory, ItemKind};
pub use cell::{Cell, CellKind, KeyColor};
pub use component::Component;
pub use config::GridConfig;
pub use dominance::DominanceLevel;
pub use error::{ConfigError, RecordingError};
pub use events::{EventRecord, GridEvent};
pub use grid::Grid;
pub use location::{Direction, Location};
pub use random::DeterministicRandom;
pub use recording::{Recording, RecordingLog, RecordingMode};
pub use registry::{ComponentRegistry, ComponentSpec};
pub use snapshot::GridSnapshot;
