//! Actor storage for a grid.
//!
//! The [`Arena`] owns every actor on the grid. It provides:
//! - Stable [`ActorId`] handles, assigned monotonically and never reused
//! - Lookup by id through a `BTreeMap`, so id-ordered iteration is
//!   deterministic
//! - The z-order list, which is the order actors are updated, rendered and
//!   considered as residents of a cell
//!
//! # Z-order
//!
//! The list is kept in descending order of generic dominance
//! (`dominance_for(None)`). A newly spawned actor goes in front of the first
//! actor with a strictly lower value, i.e. after all actors of equal rank.
//! The list is read bottom to top: fixtures first, floating actors last.
//!
//! # Example
//!
//! ```
//! use tessera_core::actor::{Actor, ActorKind};
//! use tessera_core::arena::Arena;
//!
//! let mut arena = Arena::new();
//! let player = arena.spawn(Actor::player());
//! let block = arena.spawn(Actor::new(ActorKind::Block));
//!
//! // Blocks outrank the player, so they come first.
//! assert_eq!(arena.order(), &[block, player]);
//! ```

use std::collections::BTreeMap;

use crate::actor::{Actor, ActorId};
use crate::location::Location;

/// Container for the actors of one grid.
#[derive(Debug, Clone, Default)]
pub struct Arena {
    next_id: u64,
    actors: BTreeMap<ActorId, Actor>,
    order: Vec<ActorId>,
}

impl Arena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `actor` and returns its new id.
    pub fn spawn(&mut self, actor: Actor) -> ActorId {
        let id = ActorId::new(self.next_id);
        self.next_id += 1;

        let rank = actor.dominance_for(None);
        let slot = self
            .order
            .iter()
            .position(|other| {
                self.actors
                    .get(other)
                    .is_some_and(|existing| existing.dominance_for(None) < rank)
            })
            .unwrap_or(self.order.len());
        self.order.insert(slot, id);
        self.actors.insert(id, actor);
        id
    }

    /// Removes and returns the actor, if present.
    pub fn despawn(&mut self, id: ActorId) -> Option<Actor> {
        let actor = self.actors.remove(&id)?;
        self.order.retain(|other| *other != id);
        Some(actor)
    }

    /// Looks up an actor.
    #[must_use]
    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    /// Looks up an actor mutably.
    #[must_use]
    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    /// True if `id` refers to a stored actor.
    #[must_use]
    pub fn contains(&self, id: ActorId) -> bool {
        self.actors.contains_key(&id)
    }

    /// Ids in z-order.
    #[must_use]
    pub fn order(&self) -> &[ActorId] {
        &self.order
    }

    /// Actors in z-order.
    pub fn iter(&self) -> impl Iterator<Item = (ActorId, &Actor)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.actors.get(id).map(|actor| (*id, actor)))
    }

    /// Ids of actors whose head is at `location`, in z-order.
    pub fn at(&self, location: Location) -> impl Iterator<Item = ActorId> + '_ {
        self.iter()
            .filter(move |(_, actor)| {
                location.is_valid() && actor.component().head() == location
            })
            .map(|(id, _)| id)
    }

    /// Number of stored actors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// True when no actor is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
