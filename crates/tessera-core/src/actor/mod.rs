//! Actors: everything on the grid that can move, die or be collected.
//!
//! This module provides:
//! - [`ActorId`]: stable handle into the grid's actor arena
//! - [`ActorTag`]: kind classification without payload
//! - [`ActorKind`]: per-kind state (inventory, item, factory template)
//! - [`Actor`]: the complete actor, with life cycle and dominance
//!
//! Per-kind behaviour is dispatched by `match` on [`ActorKind`]. Rules that
//! need to look at other actors or terrain live in
//! [`resolver::interaction`](crate::resolver::interaction).
//!
//! # Example
//!
//! ```
//! use tessera_core::actor::{Actor, ActorKind};
//! use tessera_core::dominance::DominanceLevel;
//!
//! let projectile = Actor::new(ActorKind::Projectile);
//! let player = Actor::player();
//!
//! assert_eq!(projectile.dominance_for(None), DominanceLevel::FLOATING);
//! assert_eq!(projectile.dominance_for(Some(&player)), DominanceLevel::ENEMY);
//! ```

pub mod components;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use components::{Immunity, Inventory, ItemKind, Life};

use crate::component::Component;
use crate::config::GridConfig;
use crate::dominance::DominanceLevel;
use crate::location::Direction;

/// Stable handle for an actor in a grid.
///
/// Ids are assigned monotonically by the grid and never reused, so a handle
/// to a removed actor stays invalid.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(u64);

impl ActorId {
    /// Wraps a raw id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActorId({})", self.0)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ActorId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Actor kind without payload.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorTag {
    /// The player.
    Player,
    /// Pushable block.
    Block,
    /// Enemy wandering in random directions.
    Roamer,
    /// Enemy walking back and forth.
    Bouncer,
    /// Walks straight until it hits something.
    Projectile,
    /// Collectable.
    Item,
    /// Spawns copies of a template.
    Factory,
}

impl fmt::Display for ActorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Player => "Player",
            Self::Block => "Block",
            Self::Roamer => "Roamer",
            Self::Bouncer => "Bouncer",
            Self::Projectile => "Projectile",
            Self::Item => "Item",
            Self::Factory => "Factory",
        };
        f.write_str(name)
    }
}

/// Per-kind actor state.
#[derive(Debug, Clone, PartialEq)]
pub enum ActorKind {
    /// The player and what they carry.
    Player {
        /// Collected items.
        inventory: Inventory,
    },
    /// Pushable block.
    Block,
    /// Random walker.
    Roamer,
    /// Reverses when blocked.
    Bouncer,
    /// Dies when blocked; dissipates after hitting something.
    Projectile,
    /// Collectable lying on the floor.
    Item(ItemKind),
    /// Clones `template` into the cell it faces every `period` frames.
    Factory {
        /// Actor copied on each spawn.
        template: Box<Actor>,
        /// Frames between spawns.
        period: u32,
    },
}

impl ActorKind {
    /// Returns the tag for this kind.
    #[must_use]
    pub const fn tag(&self) -> ActorTag {
        match self {
            Self::Player { .. } => ActorTag::Player,
            Self::Block => ActorTag::Block,
            Self::Roamer => ActorTag::Roamer,
            Self::Bouncer => ActorTag::Bouncer,
            Self::Projectile => ActorTag::Projectile,
            Self::Item(_) => ActorTag::Item,
            Self::Factory { .. } => ActorTag::Factory,
        }
    }
}

/// Drives the dying animation one update at a time.
///
/// Receives the component, the number of updates spent dying (starting at 1)
/// and the configured dying length. Returns true when the animation is over.
pub type DyingHandler = fn(&mut Component, u32, u32) -> bool;

/// Default dying animation: linear fade out over `dying_frames` updates.
#[allow(clippy::cast_precision_loss)]
pub fn fade_out(component: &mut Component, counter: u32, dying_frames: u32) -> bool {
    component.set_opacity(1.0 - counter as f32 / dying_frames as f32);
    counter >= dying_frames
}

/// An actor on (or destined for) the grid.
#[derive(Debug, Clone)]
pub struct Actor {
    component: Component,
    kind: ActorKind,
    life: Life,
    heading: Direction,
    immunity: Immunity,
    dying_handler: DyingHandler,
}

impl PartialEq for Actor {
    fn eq(&self, other: &Self) -> bool {
        self.component == other.component
            && self.kind == other.kind
            && self.life == other.life
            && self.heading == other.heading
            && self.immunity == other.immunity
    }
}

impl Actor {
    /// Creates a detached, living actor facing south.
    #[must_use]
    pub fn new(kind: ActorKind) -> Self {
        Self {
            component: Component::default(),
            kind,
            life: Life::default(),
            heading: Direction::South,
            immunity: Immunity::empty(),
            dying_handler: fade_out,
        }
    }

    /// A player with an empty inventory.
    #[must_use]
    pub fn player() -> Self {
        Self::new(ActorKind::Player {
            inventory: Inventory::new(),
        })
    }

    /// Returns this actor facing `heading`.
    #[must_use]
    pub fn with_heading(mut self, heading: Direction) -> Self {
        self.heading = heading;
        self
    }

    /// Returns this actor with extra innate immunities.
    #[must_use]
    pub fn with_immunity(mut self, immunity: Immunity) -> Self {
        self.immunity |= immunity;
        self
    }

    /// Returns this actor with a custom dying animation.
    #[must_use]
    pub fn with_dying_handler(mut self, handler: DyingHandler) -> Self {
        self.dying_handler = handler;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Kind classification.
    #[must_use]
    pub const fn tag(&self) -> ActorTag {
        self.kind.tag()
    }

    /// Per-kind state.
    #[must_use]
    pub const fn kind(&self) -> &ActorKind {
        &self.kind
    }

    /// Mutable per-kind state.
    pub fn kind_mut(&mut self) -> &mut ActorKind {
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

    /// Life state.
    #[must_use]
    pub const fn life(&self) -> Life {
        self.life
    }

    /// Direction the actor faces.
    #[must_use]
    pub const fn heading(&self) -> Direction {
        self.heading
    }

    /// Turns the actor.
    pub fn set_heading(&mut self, heading: Direction) {
        self.heading = heading;
    }

    /// Innate immunities only.
    #[must_use]
    pub const fn innate_immunity(&self) -> Immunity {
        self.immunity
    }

    /// Innate immunities plus those granted by carried boots.
    #[must_use]
    pub fn immunity(&self) -> Immunity {
        match &self.kind {
            ActorKind::Player { inventory } => self.immunity | inventory.boots(),
            _ => self.immunity,
        }
    }

    /// Sets the innate immunities.
    pub fn set_immunity(&mut self, immunity: Immunity) {
        self.immunity = immunity;
    }

    /// The inventory, for players.
    #[must_use]
    pub const fn inventory(&self) -> Option<&Inventory> {
        match &self.kind {
            ActorKind::Player { inventory } => Some(inventory),
            _ => None,
        }
    }

    /// The mutable inventory, for players.
    pub fn inventory_mut(&mut self) -> Option<&mut Inventory> {
        match &mut self.kind {
            ActorKind::Player { inventory } => Some(inventory),
            _ => None,
        }
    }

    /// Adds `item` to the inventory. Returns false for non-players.
    pub fn collect(&mut self, item: ItemKind) -> bool {
        match self.inventory_mut() {
            Some(inventory) => {
                inventory.add(item);
                true
            }
            None => false,
        }
    }

    /// True for the player.
    #[must_use]
    pub const fn is_player(&self) -> bool {
        matches!(self.kind, ActorKind::Player { .. })
    }

    /// True for pushable blocks.
    #[must_use]
    pub const fn is_block(&self) -> bool {
        matches!(self.kind, ActorKind::Block)
    }

    /// True for walking enemies.
    #[must_use]
    pub const fn is_enemy(&self) -> bool {
        matches!(self.kind, ActorKind::Roamer | ActorKind::Bouncer)
    }

    /// Neither dying nor dead.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.life.is_alive()
    }

    /// Dying but possibly not yet dead.
    #[must_use]
    pub const fn is_dying(&self) -> bool {
        self.life.dying
    }

    /// Finished dying; removed at the end of the frame.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.life.dead
    }

    /// Whether this kind can die at all.
    #[must_use]
    pub const fn can_die(&self) -> bool {
        !matches!(self.kind, ActorKind::Item(_))
    }

    // =========================================================================
    // Dominance
    // =========================================================================

    /// Priority of this actor against `other`, or its generic priority.
    ///
    /// The generic value (`other == None`) orders the actor list. Projectiles
    /// float above everything in the list but fight at enemy level.
    #[must_use]
    pub fn dominance_for(&self, other: Option<&Actor>) -> DominanceLevel {
        match (&self.kind, other) {
            (ActorKind::Player { .. }, _) => DominanceLevel::PLAYER,
            (ActorKind::Block, _) => DominanceLevel::MOVER,
            (ActorKind::Roamer | ActorKind::Bouncer, _) => DominanceLevel::ENEMY,
            (ActorKind::Projectile, None) => DominanceLevel::FLOATING,
            (ActorKind::Projectile, Some(_)) => DominanceLevel::ENEMY,
            (ActorKind::Item(_), _) => DominanceLevel::ITEM,
            (ActorKind::Factory { .. }, _) => DominanceLevel::FIXTURE,
        }
    }

    // =========================================================================
    // Life cycle
    // =========================================================================

    /// Starts dying.
    ///
    /// Refused (returns false) if the actor is already dying or dead, cannot
    /// die, or `attacker` is itself dying.
    pub fn die(&mut self, attacker: Option<&Actor>) -> bool {
        self.die_unless(attacker.is_some_and(Actor::is_dying))
    }

    pub(crate) fn die_unless(&mut self, attacker_dying: bool) -> bool {
        if !self.is_alive() || !self.can_die() || attacker_dying {
            return false;
        }
        self.life.dying = true;
        self.life.die_frame_counter = 0;
        true
    }

    /// Advances animation, slide and dying by one frame.
    ///
    /// Returns true if the actor finished dying during this update.
    pub fn update_frame(&mut self, frame: u64, config: &GridConfig) -> bool {
        self.component.update_frame(frame, config);
        if !self.life.dying || self.life.dead {
            return false;
        }
        self.life.die_frame_counter += 1;
        if (self.dying_handler)(
            &mut self.component,
            self.life.die_frame_counter,
            config.dying_frames,
        ) {
            self.life.dead = true;
            return true;
        }
        false
    }
}

// =============================================================================
// Tests
// =============================================================================
