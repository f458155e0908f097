//! Entry effects of terrain.
//!
//! [`Cell::check_pass`](crate::cell::Cell::check_pass) already decided that
//! the visitor may enter; this runs what happens when it does.

use tracing::debug;

use crate::actor::ActorId;
use crate::cell::{Cell, CellKind};
use crate::grid::Grid;
use crate::location::Location;

/// Executes the terrain side of a visit. Returns whether the visitor may
/// occupy the cell.
///
/// An empty slot has no terrain and lets everyone in.
pub(crate) fn pass(grid: &mut Grid, visitor: ActorId, target: Location) -> bool {
    let Some(cell) = grid.cell_at(target) else {
        return true;
    };
    let kind = cell.kind();
    let actor = grid.expect_actor(visitor);
    let hazard = cell.is_hazard_for(actor);
    let is_block = actor.is_block();
    let is_player = actor.is_player();

    match kind {
        CellKind::Floor => true,
        CellKind::Wall => false,
        CellKind::Water => {
            if hazard {
                grid.kill(visitor, None);
                if is_block {
                    debug!(%target, "block sank; water fills with dirt");
                    grid.transform_cell(target.row, target.column, Cell::new(CellKind::Dirt), 0);
                }
            }
            true
        }
        CellKind::Fire => {
            if hazard {
                grid.kill(visitor, None);
            }
            true
        }
        CellKind::Dirt => {
            grid.transform_cell(target.row, target.column, Cell::floor(), 0);
            true
        }
        CellKind::Door { color } => {
            let opened = grid
                .actor_mut(visitor)
                .and_then(|actor| actor.inventory_mut())
                .is_some_and(|inventory| inventory.consume_key(color));
            if opened {
                debug!(%target, %color, "door opened");
                grid.transform_cell(target.row, target.column, Cell::floor(), 0);
            }
            opened
        }
        CellKind::Exit => {
            if is_player {
                grid.complete_level(target);
            }
            is_player
        }
    }
}
