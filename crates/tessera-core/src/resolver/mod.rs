//! Visit resolution: deciding whether an actor may enter a cell, and doing it.
//!
//! Every change of an actor's head location goes through [`visit`]: player
//! moves, pushed blocks, enemy steps, projectiles, factory spawns and initial
//! placement. A visit has a check phase and an execute phase.
//!
//! # Check ([`plan_visit`])
//!
//! 1. The mover must be stationary and the target inside the grid.
//! 2. The target cell must accept the mover (`Cell::check_pass`).
//! 3. The actors already at the target (residents) are ordered by descending
//!    dominance against the mover, ties keeping z-order.
//! 4. For each resident the side with the higher dominance against the other
//!    becomes master; the mover wins ties.
//! 5. Every master must accept its slave. One refusal rejects the visit.
//!
//! # Execute ([`visit`])
//!
//! 6. The terrain's entry effects run ([`terrain::pass`]).
//! 7. Each encounter's interaction runs in order ([`interaction::interact`]).
//!    The first refusal aborts the visit; effects of earlier steps stay.
//! 8. The mover's head moves to the target. Its trailing location stays put
//!    so the slide animates, except on placement where both snap.
//!
//! Per-frame actor behaviour that drives visits lives in [`behavior`].

pub mod behavior;
pub mod interaction;
pub mod terrain;

use tracing::trace;

use crate::actor::ActorId;
use crate::events::GridEvent;
use crate::grid::Grid;
use crate::location::{Direction, Location};

/// One mover/resident pairing within a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encounter {
    /// Side that decides the outcome.
    pub master: ActorId,
    /// Side the master acts on.
    pub slave: ActorId,
    /// The actor entering the cell; either `master` or `slave`.
    pub mover: ActorId,
    /// Mover's head before the visit; invalid during placement.
    pub from: Location,
    /// Cell being entered.
    pub target: Location,
}

impl Encounter {
    /// Direction of travel, `None` when placing from nowhere.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        Direction::between(self.from, self.target)
    }

    /// True if the mover is the master.
    #[must_use]
    pub fn mover_is_master(&self) -> bool {
        self.master == self.mover
    }
}

/// Runs the check phase of a visit without side effects.
///
/// Returns the encounters that the execute phase would run, in order, or
/// `None` if the visit is rejected.
///
/// # Panics
///
/// Panics if `mover` is not an actor of `grid`.
#[must_use]
pub fn plan_visit(grid: &Grid, mover: ActorId, target: Location) -> Option<Vec<Encounter>> {
    let actor = grid.expect_actor(mover);
    if actor.component().is_moving() || !grid.in_bounds(target) {
        return None;
    }
    if grid
        .cell_at(target)
        .is_some_and(|cell| !cell.check_pass(actor))
    {
        return None;
    }

    let from = actor.component().head();
    let mut encounters = Vec::new();
    for resident in grid.residents_at(Some(mover), target) {
        let other = grid.expect_actor(resident);
        let (master, slave) = if actor.dominance_for(Some(other)) >= other.dominance_for(Some(actor)) {
            (mover, resident)
        } else {
            (resident, mover)
        };
        let encounter = Encounter {
            master,
            slave,
            mover,
            from,
            target,
        };
        if !interaction::check_interact(grid, &encounter) {
            return None;
        }
        encounters.push(encounter);
    }
    Some(encounters)
}

/// Checks and executes a visit. Returns whether the mover entered `target`.
pub(crate) fn visit(grid: &mut Grid, mover: ActorId, target: Location) -> bool {
    let Some(encounters) = plan_visit(grid, mover, target) else {
        trace!(actor = %mover, %target, "visit rejected");
        return false;
    };
    let from = grid.expect_actor(mover).component().head();

    if !terrain::pass(grid, mover, target) {
        trace!(actor = %mover, %target, "terrain refused entry");
        return false;
    }
    for encounter in &encounters {
        if !interaction::interact(grid, encounter) {
            trace!(actor = %mover, %target, master = %encounter.master, "interaction aborted visit");
            return false;
        }
    }

    let cell_size = grid.cell_size();
    let Some(actor) = grid.actor_mut(mover) else {
        return false;
    };
    if from.is_valid() {
        actor.component_mut().set_head(target);
        grid.emit(GridEvent::Moved {
            actor: mover,
            from,
            to: target,
        });
    } else {
        actor.component_mut().snap_to(target, cell_size);
    }
    true
}
