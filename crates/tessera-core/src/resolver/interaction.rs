//! Master/slave interaction rules, one arm per actor kind.
//!
//! | Master      | Accepts                                   | Effect                          |
//! |-------------|-------------------------------------------|---------------------------------|
//! | Player      | dying actors                              | none                            |
//! | Roamer      | the player, dying actors                  | kills the player                |
//! | Bouncer     | the player, dying actors                  | kills the player                |
//! | Projectile  | the player, enemies, dying actors         | kills; dissipates when moving   |
//! | Block       | as resident: a pushing player, unless the | moves one cell along the push   |
//! |             | block is dying; as mover: dying actors    |                                 |
//! | Item        | everyone                                  | a live player collects it       |
//! | Factory     | nobody                                    |                                 |

use tracing::debug;

use crate::actor::{ActorKind, ActorTag, ItemKind};
use crate::events::GridEvent;
use crate::grid::Grid;

use super::{plan_visit, visit, Encounter};

/// Pure predicate: does the master accept this encounter?
pub(crate) fn check_interact(grid: &Grid, encounter: &Encounter) -> bool {
    let (Some(master), Some(slave)) = (grid.actor(encounter.master), grid.actor(encounter.slave))
    else {
        return false;
    };

    match master.kind() {
        ActorKind::Player { .. } => slave.is_dying(),
        ActorKind::Roamer | ActorKind::Bouncer => slave.is_player() || slave.is_dying(),
        ActorKind::Projectile => slave.is_player() || slave.is_enemy() || slave.is_dying(),
        ActorKind::Block => {
            if encounter.mover_is_master() || master.is_dying() {
                return slave.is_dying();
            }
            if !slave.is_player() {
                return false;
            }
            encounter.direction().is_some_and(|direction| {
                let next = master.component().head().step(direction);
                plan_visit(grid, encounter.master, next).is_some()
            })
        }
        ActorKind::Item(_) => true,
        ActorKind::Factory { .. } => false,
    }
}

/// Executes an accepted encounter. Returns whether the mover may proceed.
///
/// An encounter whose actors have left the grid in the meantime is a no-op.
pub(crate) fn interact(grid: &mut Grid, encounter: &Encounter) -> bool {
    let (Some(master), Some(slave)) = (grid.actor(encounter.master), grid.actor(encounter.slave))
    else {
        return true;
    };
    let slave_is_player = slave.is_player();
    let slave_is_target = slave.is_alive() && (slave.is_player() || slave.is_enemy());
    let slave_alive = slave.is_alive();
    let master_dying = master.is_dying();
    let item = match master.kind() {
        ActorKind::Item(item) => Some(*item),
        _ => None,
    };

    match master.tag() {
        ActorTag::Player => true,
        ActorTag::Roamer | ActorTag::Bouncer => {
            if slave_is_player {
                grid.kill(encounter.slave, Some(encounter.master));
            }
            true
        }
        ActorTag::Projectile => {
            if slave_is_target {
                grid.kill(encounter.slave, Some(encounter.master));
                if encounter.mover_is_master() {
                    grid.kill(encounter.master, None);
                }
            }
            true
        }
        ActorTag::Block => {
            if encounter.mover_is_master() || master_dying || !slave_is_player {
                return true;
            }
            let Some(direction) = encounter.direction() else {
                return false;
            };
            let next = encounter.target.step(direction);
            let pushed = visit(grid, encounter.master, next);
            if pushed {
                debug!(block = %encounter.master, %next, "block pushed");
            }
            pushed
        }
        ActorTag::Item => {
            if let Some(item) = item.filter(|_| slave_is_player && slave_alive) {
                collect(grid, encounter, item);
            }
            true
        }
        ActorTag::Factory => false,
    }
}

fn collect(grid: &mut Grid, encounter: &Encounter, item: ItemKind) {
    let collected = grid
        .actor_mut(encounter.slave)
        .is_some_and(|player| player.collect(item));
    if collected {
        debug!(player = %encounter.slave, ?item, "item collected");
        grid.emit(GridEvent::Collected {
            actor: encounter.slave,
            item,
        });
        grid.remove_actor(encounter.master);
    }
}
