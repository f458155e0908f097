//! Terrain cells.
//!
//! Each grid slot holds at most one [`Cell`]. Cells never move; they decide
//! whether an actor may enter ([`Cell::check_pass`]) and carry out the side
//! effects of entry through the grid's terrain resolver. A cell can schedule
//! its own replacement with [`Cell::transform_to`], which the grid performs
//! once the countdown runs out.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::actor::{Actor, Immunity};
use crate::component::Component;
use crate::config::GridConfig;

/// Colour shared by keys and the doors they open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyColor {
    /// Red key or door.
    Red,
    /// Blue key or door.
    Blue,
    /// Green key or door.
    Green,
    /// Yellow key or door.
    Yellow,
}

impl fmt::Display for KeyColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => write!(f, "red"),
            Self::Blue => write!(f, "blue"),
            Self::Green => write!(f, "green"),
            Self::Yellow => write!(f, "yellow"),
        }
    }
}

/// Terrain variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    /// Open ground.
    Floor,
    /// Impassable.
    Wall,
    /// Drowns visitors without water immunity. A block fills it with dirt.
    Water,
    /// Burns visitors without fire immunity.
    Fire,
    /// Player-only; cleared to floor on entry.
    Dirt,
    /// Player-only with a matching key; opens into floor.
    Door {
        /// Key colour required.
        color: KeyColor,
    },
    /// Player-only; entering completes the level.
    Exit,
}

impl CellKind {
    /// Short name used in logs and attribute errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Floor => "Floor",
            Self::Wall => "Wall",
            Self::Water => "Water",
            Self::Fire => "Fire",
            Self::Dirt => "Dirt",
            Self::Door { .. } => "Door",
            Self::Exit => "Exit",
        }
    }

    /// Number of tileset frames for this kind.
    #[must_use]
    pub const fn frame_count(&self) -> usize {
        match self {
            Self::Water | Self::Fire => 4,
            _ => 1,
        }
    }

    /// Whether this terrain animates continuously.
    #[must_use]
    pub const fn is_animated(&self) -> bool {
        matches!(self, Self::Water | Self::Fire)
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Door { color } => write!(f, "Door({color})"),
            other => f.write_str(other.name()),
        }
    }
}

/// A scheduled replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTransform {
    /// Cell placed in this slot once the countdown ends.
    pub target: Box<Cell>,
    /// Updates left before the replacement.
    pub frames_remaining: u32,
}

/// A terrain cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    component: Component,
    kind: CellKind,
    pending: Option<PendingTransform>,
}

impl Cell {
    /// Creates a detached cell of the given kind.
    #[must_use]
    pub fn new(kind: CellKind) -> Self {
        let mut component = Component::new(kind.frame_count());
        if kind.is_animated() {
            // frames are in range by construction
            let frames: Vec<usize> = (0..kind.frame_count()).collect();
            let _ = component.animate_frames(&frames, true, 6);
        }
        Self {
            component,
            kind,
            pending: None,
        }
    }

    /// Shorthand for a floor cell.
    #[must_use]
    pub fn floor() -> Self {
        Self::new(CellKind::Floor)
    }

    /// Shorthand for a wall cell.
    #[must_use]
    pub fn wall() -> Self {
        Self::new(CellKind::Wall)
    }

    /// The terrain variant.
    #[must_use]
    pub const fn kind(&self) -> CellKind {
        self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut CellKind {
        &mut self.kind
    }

    /// Shared component state.
    #[must_use]
    pub const fn component(&self) -> &Component {
        &self.component
    }

    /// Mutable shared component state.
    pub fn component_mut(&mut self) -> &mut Component {
        &mut self.component
    }

    /// The scheduled transform, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingTransform> {
        self.pending.as_ref()
    }

    /// Pure predicate: may `visitor` enter this cell?
    #[must_use]
    pub fn check_pass(&self, visitor: &Actor) -> bool {
        match self.kind {
            CellKind::Floor | CellKind::Water | CellKind::Fire => true,
            CellKind::Wall => false,
            CellKind::Dirt | CellKind::Exit => visitor.is_player(),
            CellKind::Door { color } => visitor
                .inventory()
                .is_some_and(|inventory| inventory.has_key(color)),
        }
    }

    /// Whether entering this cell is fatal for `visitor`.
    #[must_use]
    pub fn is_hazard_for(&self, visitor: &Actor) -> bool {
        match self.kind {
            CellKind::Water => !visitor.immunity().contains(Immunity::WATER),
            CellKind::Fire => !visitor.immunity().contains(Immunity::FIRE),
            _ => false,
        }
    }

    /// Schedules replacement by `other` after `wait_frames` updates.
    ///
    /// Returns `false` without changing anything if a transform is already
    /// pending. A wait of zero replaces the cell on the next update.
    ///
    /// # Panics
    ///
    /// Panics if this cell is not attached to a grid or `other` is.
    pub fn transform_to(&mut self, other: Cell, wait_frames: u32) -> bool {
        assert!(
            self.component.is_attached(),
            "transform_to called on a detached {} cell",
            self.kind
        );
        assert!(
            !other.component.is_attached(),
            "transform target {} is already attached at {}",
            other.kind,
            other.component.head()
        );
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(PendingTransform {
            target: Box::new(other),
            frames_remaining: wait_frames,
        });
        true
    }

    /// Advances animation and the transform countdown.
    ///
    /// Returns true when a pending transform is due; the grid then collects
    /// it with [`Cell::take_due_transform`].
    pub fn update_frame(&mut self, frame: u64, config: &GridConfig) -> bool {
        self.component.update_frame(frame, config);
        match self.pending.as_mut() {
            Some(pending) => {
                pending.frames_remaining = pending.frames_remaining.saturating_sub(1);
                pending.frames_remaining == 0
            }
            None => false,
        }
    }

    pub(crate) fn take_due_transform(&mut self) -> Option<Cell> {
        match &self.pending {
            Some(pending) if pending.frames_remaining == 0 => {
                self.pending.take().map(|pending| *pending.target)
            }
            _ => None,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::floor()
    }
}

// =============================================================================
// Tests
// =============================================================================
