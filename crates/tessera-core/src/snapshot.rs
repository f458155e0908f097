//! Owned, read-only copies of grid state.
//!
//! A [`GridSnapshot`] captures everything a renderer draws and everything a
//! replay check compares: terrain per slot, every actor in z-order with its
//! locations, pixel position and life state, plus the RNG state. Two runs
//! that are frame-for-frame identical produce equal snapshots.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::actor::{Actor, ActorId, ActorTag, Life};
use crate::cell::{Cell, CellKind};
use crate::location::{Direction, Location};

/// One terrain slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellSnapshot {
    /// Terrain kind.
    pub kind: CellKind,
    /// Displayed frame.
    pub frame: usize,
    /// Whether a transform is scheduled.
    pub transforming: bool,
}

impl From<&Cell> for CellSnapshot {
    fn from(cell: &Cell) -> Self {
        Self {
            kind: cell.kind(),
            frame: cell.component().current_frame(),
            transforming: cell.pending().is_some(),
        }
    }
}

/// One actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    /// Handle in the grid.
    pub id: ActorId,
    /// Kind.
    pub tag: ActorTag,
    /// Logical location.
    pub head: Location,
    /// Visual location.
    pub trailing: Location,
    /// Pixel position.
    pub position: Vec2,
    /// Facing.
    pub heading: Direction,
    /// Life state.
    pub life: Life,
    /// Render opacity.
    pub opacity: f32,
    /// Displayed frame.
    pub frame: usize,
}

impl ActorSnapshot {
    /// Captures `actor` under `id`.
    #[must_use]
    pub fn capture(id: ActorId, actor: &Actor) -> Self {
        let component = actor.component();
        Self {
            id,
            tag: actor.tag(),
            head: component.head(),
            trailing: component.trailing(),
            position: component.position(),
            heading: actor.heading(),
            life: actor.life(),
            opacity: component.opacity(),
            frame: component.current_frame(),
        }
    }
}

/// Complete picture of a grid after some frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// Last frame passed to `update_frame`.
    pub frame: u64,
    /// Number of rows.
    pub rows: i32,
    /// Number of columns.
    pub columns: i32,
    /// Terrain, row-major.
    pub cells: Vec<Option<CellSnapshot>>,
    /// Actors in z-order.
    pub actors: Vec<ActorSnapshot>,
    /// RNG state.
    pub rng_state: u64,
    /// Whether the player reached an exit.
    pub level_complete: bool,
}

impl GridSnapshot {
    /// Terrain at `location`, if in bounds and occupied.
    #[must_use]
    pub fn cell(&self, location: Location) -> Option<&CellSnapshot> {
        if !location.is_valid() || location.row >= self.rows || location.column >= self.columns {
            return None;
        }
        let index = usize::try_from(location.row * self.columns + location.column).ok()?;
        self.cells.get(index)?.as_ref()
    }

    /// Actors whose head is at `location`, in z-order.
    pub fn actors_at(&self, location: Location) -> impl Iterator<Item = &ActorSnapshot> + '_ {
        self.actors
            .iter()
            .filter(move |actor| location.is_valid() && actor.head == location)
    }

    /// Renders the terrain and actors as text, one line per row.
    ///
    /// The top actor of each slot wins; otherwise the terrain is shown.
    #[must_use]
    pub fn to_ascii(&self) -> String {
        let mut out = String::new();
        for row in 0..self.rows {
            for column in 0..self.columns {
                let location = Location::new(row, column);
                let glyph = self
                    .actors_at(location)
                    .last()
                    .map(|actor| actor_glyph(actor.tag))
                    .or_else(|| self.cell(location).map(|cell| cell_glyph(cell.kind)))
                    .unwrap_or(' ');
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}

const fn actor_glyph(tag: ActorTag) -> char {
    match tag {
        ActorTag::Player => '@',
        ActorTag::Block => 'B',
        ActorTag::Roamer => 'r',
        ActorTag::Bouncer => 'b',
        ActorTag::Projectile => '*',
        ActorTag::Item => '$',
        ActorTag::Factory => 'F',
    }
}

const fn cell_glyph(kind: CellKind) -> char {
    match kind {
        CellKind::Floor => '.',
        CellKind::Wall => '#',
        CellKind::Water => '~',
        CellKind::Fire => '^',
        CellKind::Dirt => ',',
        CellKind::Door { .. } => 'D',
        CellKind::Exit => 'E',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> GridSnapshot {
        GridSnapshot {
            frame: 0,
            rows: 1,
            columns: 3,
            cells: vec![
                Some(CellSnapshot {
                    kind: CellKind::Wall,
                    frame: 0,
                    transforming: false,
                }),
                Some(CellSnapshot {
                    kind: CellKind::Floor,
                    frame: 0,
                    transforming: false,
                }),
                None,
            ],
            actors: vec![ActorSnapshot {
                id: ActorId::new(0),
                tag: ActorTag::Player,
                head: Location::new(0, 1),
                trailing: Location::new(0, 1),
                position: Vec2::new(32.0, 0.0),
                heading: Direction::South,
                life: Life::default(),
                opacity: 1.0,
                frame: 0,
            }],
            rng_state: 0,
            level_complete: false,
        }
    }

    #[test]
    fn ascii_shows_top_actor_over_terrain() {
        assert_eq!(tiny().to_ascii(), "#@ \n");
    }

    #[test]
    fn cell_lookup_is_bounds_checked() {
        let snapshot = tiny();
        assert!(snapshot.cell(Location::new(0, 0)).is_some());
        assert!(snapshot.cell(Location::new(0, 2)).is_none());
        assert!(snapshot.cell(Location::new(1, 0)).is_none());
    }

    #[test]
    fn serialization_roundtrip() {
        let snapshot = tiny();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GridSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
