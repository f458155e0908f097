//! Per-frame behaviour of self-propelled actors.

use tracing::trace;

use crate::actor::{ActorId, ActorKind};
use crate::grid::Grid;
use crate::location::Direction;

use super::visit;

/// Lets the actor take its turn for `frame`.
///
/// Only living, stationary actors act. Players and blocks never act on their
/// own; items and fixtures other than factories are inert.
pub(crate) fn act(grid: &mut Grid, id: ActorId, frame: u64) {
    let Some(actor) = grid.actor(id) else {
        return;
    };
    if !actor.is_alive() || actor.component().is_moving() {
        return;
    }
    let heading = actor.heading();

    match actor.kind() {
        ActorKind::Roamer => {
            let draw = grid.rng().next_int_bounded(4).unsigned_abs() as usize;
            let direction = Direction::from_index(draw);
            turn(grid, id, direction);
            step(grid, id, direction);
        }
        ActorKind::Bouncer => {
            if !step(grid, id, heading) {
                let reversed = heading.opposite();
                turn(grid, id, reversed);
                step(grid, id, reversed);
            }
        }
        ActorKind::Projectile => {
            if !step(grid, id, heading) {
                trace!(actor = %id, "projectile blocked");
                grid.kill(id, None);
            }
        }
        ActorKind::Factory { template, period } => {
            if *period == 0 || frame % u64::from(*period) != 0 {
                return;
            }
            let spawn = template.as_ref().clone().with_heading(heading);
            let target = actor.component().head().step(heading);
            if grid.place_actor(spawn, target.row, target.column).is_none() {
                trace!(factory = %id, %target, "spawn blocked");
            }
        }
        ActorKind::Player { .. } | ActorKind::Block | ActorKind::Item(_) => {}
    }
}

fn turn(grid: &mut Grid, id: ActorId, direction: Direction) {
    if let Some(actor) = grid.actor_mut(id) {
        actor.set_heading(direction);
    }
}

fn step(grid: &mut Grid, id: ActorId, direction: Direction) -> bool {
    let Some(actor) = grid.actor(id) else {
        return false;
    };
    let target = actor.component().head().step(direction);
    visit(grid, id, target)
}
