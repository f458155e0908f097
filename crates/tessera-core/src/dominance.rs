//! Named priorities that arbitrate actor encounters and z-order.
//!
//! Levels compare by numeric value only. In an encounter the side with the
//! greater value becomes the master; in the actor list higher values sit
//! lower in the render stack, so `TOP` is drawn above everything else.

use std::cmp::Ordering;
use std::fmt;

/// A named integer priority.
#[derive(Clone, Copy)]
pub struct DominanceLevel {
    name: &'static str,
    value: i32,
}

impl DominanceLevel {
    /// Drawn above everything, loses every encounter.
    pub const TOP: Self = Self::new("Top", 0);
    /// Airborne or overlay actors.
    pub const FLOATING: Self = Self::new("Floating", 100);
    /// The player.
    pub const PLAYER: Self = Self::new("Player", 200);
    /// Monsters.
    pub const ENEMY: Self = Self::new("Enemy", 300);
    /// Pushable blocks.
    pub const MOVER: Self = Self::new("Mover", 400);
    /// Collectables lying on the floor.
    pub const ITEM: Self = Self::new("Item", 500);
    /// Fixed machinery such as factories.
    pub const FIXTURE: Self = Self::new("Fixture", 600);

    /// Creates a level with a descriptive name.
    #[must_use]
    pub const fn new(name: &'static str, value: i32) -> Self {
        Self { name, value }
    }

    /// Returns the descriptive name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the numeric priority.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.value
    }
}

impl PartialEq for DominanceLevel {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for DominanceLevel {}

impl PartialOrd for DominanceLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DominanceLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl fmt::Debug for DominanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.value)
    }
}

impl fmt::Display for DominanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
