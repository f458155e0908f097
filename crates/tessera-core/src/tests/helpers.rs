//! Test helper functions for building levels and driving the frame loop.

use crate::actor::{Actor, ActorId, ActorKind};
use crate::cell::{Cell, CellKind};
use crate::config::GridConfig;
use crate::grid::Grid;
use crate::location::{Direction, Location};
use crate::registry::{slots, ComponentRegistry, ComponentSpec};
use crate::snapshot::GridSnapshot;

// =============================================================================
// Level Setup
// =============================================================================

/// Creates a floored grid with no walls.
pub fn open_grid(rows: i32, columns: i32) -> Grid {
    let mut grid = Grid::new(GridConfig::with_dimensions(rows, columns)).unwrap();
    grid.fill_empty(Cell::floor);
    grid
}

/// Replaces the terrain at `row`, `column`.
pub fn set_cell(grid: &mut Grid, row: i32, column: i32, kind: CellKind) {
    grid.remove_cell(row, column);
    assert!(grid.place_cell(Cell::new(kind), row, column));
}

/// Places `actor` and returns its id, failing the test on rejection.
pub fn place(grid: &mut Grid, actor: Actor, row: i32, column: i32) -> ActorId {
    grid.place_actor(actor, row, column)
        .unwrap_or_else(|| panic!("placement at ({row}, {column}) rejected"))
}

/// Places an actor of `kind` facing `heading`.
pub fn place_facing(
    grid: &mut Grid,
    kind: ActorKind,
    heading: Direction,
    row: i32,
    column: i32,
) -> ActorId {
    place(grid, Actor::new(kind).with_heading(heading), row, column)
}

/// Level data for a walled room with a player, two roamers, water and fire.
///
/// ```text
/// #######
/// #@....#
/// #..r..#
/// #.~~..#
/// #...r.#
/// #..^..#
/// #######
/// ```
pub fn roamer_room_specs() -> Vec<ComponentSpec> {
    let mut specs = Vec::new();
    for row in 0..7 {
        for column in 0..7 {
            if row == 0 || column == 0 || row == 6 || column == 6 {
                specs.push(ComponentSpec::new(row, column, slots::WALL));
            }
        }
    }
    specs.push(ComponentSpec::new(3, 2, slots::WATER));
    specs.push(ComponentSpec::new(3, 3, slots::WATER));
    specs.push(ComponentSpec::new(5, 3, slots::FIRE));
    specs.push(ComponentSpec::new(1, 1, slots::PLAYER));
    specs.push(ComponentSpec::new(2, 3, slots::ROAMER));
    specs.push(ComponentSpec::new(4, 4, slots::ROAMER));
    specs
}

/// Loads [`roamer_room_specs`] with `seed`.
pub fn roamer_room(seed: u64) -> Grid {
    Grid::load(
        GridConfig::with_dimensions(7, 7).seeded(seed),
        &ComponentRegistry::standard(),
        &roamer_room_specs(),
    )
    .unwrap()
}

// =============================================================================
// Frame Driving
// =============================================================================

/// Runs updates for every frame in `frames`.
pub fn run_frames(grid: &mut Grid, frames: std::ops::Range<u64>) {
    for frame in frames {
        grid.update_frame(frame);
    }
}

/// Runs one full slide starting at `*frame`, advancing the counter.
pub fn settle(grid: &mut Grid, frame: &mut u64) {
    for _ in 0..grid.config().big_frame {
        grid.update_frame(*frame);
        *frame += 1;
    }
}

/// Issues a player move and lets the slide finish.
pub fn step_player(grid: &mut Grid, direction: Direction, frame: &mut u64) -> bool {
    let moved = grid.move_player(direction);
    settle(grid, frame);
    moved
}

/// Runs `frames` updates and returns the snapshot after each.
///
/// `inputs` maps frame numbers to player moves issued just before that
/// frame's update.
pub fn run_with_inputs(
    grid: &mut Grid,
    frames: u64,
    inputs: &[(u64, Direction)],
) -> Vec<GridSnapshot> {
    let mut snapshots = Vec::new();
    for frame in 0..frames {
        if let Some((_, direction)) = inputs.iter().find(|(at, _)| *at == frame) {
            grid.move_player(*direction);
        }
        grid.update_frame(frame);
        snapshots.push(grid.snapshot());
    }
    snapshots
}

// =============================================================================
// Queries
// =============================================================================

/// Logical location of an actor still on the grid.
pub fn head_of(grid: &Grid, id: ActorId) -> Location {
    grid.actor(id)
        .unwrap_or_else(|| panic!("actor {id} missing"))
        .component()
        .head()
}

/// Terrain kind at `row`, `column`.
pub fn kind_at(grid: &Grid, row: i32, column: i32) -> CellKind {
    grid.cell(row, column)
        .unwrap_or_else(|| panic!("no cell at ({row}, {column})"))
        .kind()
}
