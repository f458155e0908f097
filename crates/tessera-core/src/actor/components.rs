//! Value types carried by actors: immunities, inventory, items and life state.

use std::collections::BTreeMap;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::cell::KeyColor;

bitflags! {
    /// Terrain hazards an actor survives.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Immunity: u8 {
        /// Survives water.
        const WATER = 1 << 0;
        /// Survives fire.
        const FIRE  = 1 << 1;
    }
}

/// Something the player can pick up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Opens one door of the same colour.
    Key {
        /// Colour of the door it opens.
        color: KeyColor,
    },
    /// Level collectable.
    Chip,
    /// Grants an immunity for as long as it is carried.
    Boots {
        /// Hazards the boots protect against.
        immunity: Immunity,
    },
}

/// What the player is carrying.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    keys: BTreeMap<KeyColor, u32>,
    chips: u32,
    boots: Immunity,
}

impl Inventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item.
    pub fn add(&mut self, item: ItemKind) {
        match item {
            ItemKind::Key { color } => *self.keys.entry(color).or_insert(0) += 1,
            ItemKind::Chip => self.chips += 1,
            ItemKind::Boots { immunity } => self.boots |= immunity,
        }
    }

    /// Whether at least one key of `color` is carried.
    #[must_use]
    pub fn has_key(&self, color: KeyColor) -> bool {
        self.keys.get(&color).is_some_and(|&count| count > 0)
    }

    /// Number of keys of `color` carried.
    #[must_use]
    pub fn key_count(&self, color: KeyColor) -> u32 {
        self.keys.get(&color).copied().unwrap_or(0)
    }

    /// Uses up one key of `color`. Returns false if none is carried.
    pub fn consume_key(&mut self, color: KeyColor) -> bool {
        match self.keys.get_mut(&color) {
            Some(count) if *count > 0 => {
                *count -= 1;
                if *count == 0 {
                    self.keys.remove(&color);
                }
                true
            }
            _ => false,
        }
    }

    /// Chips collected so far.
    #[must_use]
    pub const fn chips(&self) -> u32 {
        self.chips
    }

    /// Immunities granted by carried boots.
    #[must_use]
    pub const fn boots(&self) -> Immunity {
        self.boots
    }
}

/// Alive, dying or dead.
///
/// `dead` implies `dying`. Once dying an actor never comes back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Life {
    /// Set when death starts.
    pub dying: bool,
    /// Set when the dying animation finishes; the grid removes the actor.
    pub dead: bool,
    /// Updates spent dying so far.
    pub die_frame_counter: u32,
}

impl Life {
    /// Neither dying nor dead.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        !self.dying && !self.dead
    }
}
