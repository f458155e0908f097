//! Notable things that happened on the grid.
//!
//! The grid appends a [`GridEvent`] whenever an actor is placed, moves, dies,
//! leaves the grid or picks something up, and whenever a cell transforms.
//! Consumers such as a renderer or an audio layer drain the log once per frame
//! with [`Grid::take_events`](crate::grid::Grid::take_events). Events never
//! feed back into the simulation.

use serde::{Deserialize, Serialize};

use crate::actor::{ActorId, ActorTag, ItemKind};
use crate::cell::CellKind;
use crate::location::Location;

/// Something that happened during a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GridEvent {
    /// An actor was placed on the grid.
    Placed {
        /// New actor.
        actor: ActorId,
        /// Its kind.
        tag: ActorTag,
        /// Where it landed.
        at: Location,
    },
    /// An actor started moving to a neighbouring cell.
    Moved {
        /// The mover.
        actor: ActorId,
        /// Previous head location.
        from: Location,
        /// New head location.
        to: Location,
    },
    /// An actor started dying.
    Killed {
        /// The victim.
        actor: ActorId,
        /// Who did it; `None` for terrain or direct kills.
        attacker: Option<ActorId>,
    },
    /// An actor left the grid.
    Removed {
        /// The removed actor.
        actor: ActorId,
    },
    /// The player picked up an item.
    Collected {
        /// The collector.
        actor: ActorId,
        /// What was picked up.
        item: ItemKind,
    },
    /// A cell was replaced by its scheduled transform.
    CellTransformed {
        /// Slot of the cell.
        at: Location,
        /// Kind before.
        from: CellKind,
        /// Kind after.
        to: CellKind,
    },
    /// The player reached an exit.
    LevelComplete {
        /// The exit's location.
        at: Location,
    },
}

/// A [`GridEvent`] stamped with the frame it happened in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Frame number passed to the update that produced the event. Events
    /// from live player input carry the frame the move is recorded under.
    pub frame: u64,
    /// What happened.
    pub event: GridEvent,
}

/// Append-only event buffer drained by consumers.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn push(&mut self, frame: u64, event: GridEvent) {
        self.records.push(EventRecord { frame, event });
    }

    /// Removes and returns every buffered event, oldest first.
    pub fn take(&mut self) -> Vec<EventRecord> {
        std::mem::take(&mut self.records)
    }

    /// Buffered events.
    #[must_use]
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Number of buffered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
