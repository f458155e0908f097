//! The grid: terrain, actors and the per-frame loop.
//!
//! A [`Grid`] owns a row-major array of cell slots, the actor [`Arena`],
//! the one [`DeterministicRandom`] all behaviour draws from, and the
//! [`Recording`] that captures or replays player input.
//!
//! # Frame loop
//!
//! The driver calls [`Grid::move_player`] when input arrives and
//! [`Grid::update_frame`] once per tick. Each update:
//!
//! 1. starts recording if nothing was started,
//! 2. hands the player's move for this tick to the recording, or takes the
//!    recorded move from it during playback,
//! 3. forgets the tick's move,
//! 4. updates every cell, performing transforms that are due,
//! 5. updates every actor in z-order (slide, animation, dying, behaviour),
//!    iterating over a copy of the list so actors may come and go,
//! 6. removes actors that finished dying.
//!
//! # Determinism
//!
//! Given the same level, seed and recorded moves, every update produces the
//! same state. Iteration follows the z-order list, and randomness comes only
//! from the grid's generator.
//!
//! # Example
//!
//! ```
//! use tessera_core::actor::Actor;
//! use tessera_core::cell::Cell;
//! use tessera_core::config::GridConfig;
//! use tessera_core::grid::Grid;
//! use tessera_core::location::{Direction, Location};
//!
//! let mut grid = Grid::new(GridConfig::with_dimensions(3, 3)).unwrap();
//! grid.fill_empty(Cell::floor);
//! let player = grid.place_actor(Actor::player(), 1, 1).unwrap();
//!
//! assert!(grid.move_player(Direction::East));
//! assert_eq!(grid.actor(player).unwrap().component().head(), Location::new(1, 2));
//!
//! for frame in 0..8 {
//!     grid.update_frame(frame);
//! }
//! assert!(!grid.actor(player).unwrap().component().is_moving());
//! ```

use tracing::{debug, trace};

use crate::actor::{Actor, ActorId, ActorTag};
use crate::arena::Arena;
use crate::cell::Cell;
use crate::config::GridConfig;
use crate::error::{ConfigError, RecordingError};
use crate::events::{EventLog, EventRecord, GridEvent};
use crate::location::{Direction, Location};
use crate::random::DeterministicRandom;
use crate::recording::{Recording, RecordingLog, RecordingMode};
use crate::registry::{ComponentRegistry, ComponentSpec, Placeable};
use crate::resolver::{self, behavior};
use crate::snapshot::{ActorSnapshot, CellSnapshot, GridSnapshot};

/// A puzzle level in play.
#[derive(Debug)]
pub struct Grid {
    config: GridConfig,
    cells: Vec<Option<Cell>>,
    arena: Arena,
    rng: DeterministicRandom,
    recording: Recording,
    player: Option<ActorId>,
    last_move: Option<Direction>,
    frame: u64,
    /// Frame stamped on emitted events. Between updates this is the next
    /// frame, the one live player input is recorded under.
    event_frame: u64,
    level_complete: bool,
    events: EventLog,
}

impl Grid {
    /// Creates an empty grid.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidGrid`] if `config` fails validation.
    pub fn new(config: GridConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let slots = usize::try_from(config.rows)
            .ok()
            .zip(usize::try_from(config.columns).ok())
            .and_then(|(rows, columns)| rows.checked_mul(columns))
            .ok_or(ConfigError::InvalidGrid("grid too large"))?;
        let rng = DeterministicRandom::new(config.seed);
        Ok(Self {
            cells: vec![None; slots],
            arena: Arena::new(),
            rng,
            recording: Recording::new(),
            player: None,
            last_move: None,
            frame: 0,
            event_frame: 0,
            level_complete: false,
            events: EventLog::new(),
            config,
        })
    }

    /// Builds a grid from level data.
    ///
    /// Cells are placed first, empty slots become floor, then actors are
    /// placed in the order given.
    ///
    /// # Errors
    ///
    /// Any error from [`ComponentRegistry::create`], plus
    /// [`ConfigError::CellPlacement`] for off-grid or doubled cells and
    /// [`ConfigError::ActorPlacement`] when the grid refuses an actor.
    pub fn load(
        config: GridConfig,
        registry: &ComponentRegistry,
        specs: &[ComponentSpec],
    ) -> Result<Self, ConfigError> {
        let mut grid = Self::new(config)?;
        let mut actors = Vec::new();
        for spec in specs {
            match registry.create(spec)? {
                Placeable::Cell(cell) => {
                    if !grid.place_cell(cell, spec.row, spec.column) {
                        return Err(ConfigError::CellPlacement(spec.location()));
                    }
                }
                Placeable::Actor(actor) => actors.push((spec.location(), actor)),
            }
        }
        grid.fill_empty(Cell::floor);
        for (location, actor) in actors {
            grid.place_actor(actor, location.row, location.column)
                .ok_or(ConfigError::ActorPlacement(location))?;
        }
        debug!(
            rows = grid.rows(),
            columns = grid.columns(),
            actors = grid.arena.len(),
            "level loaded"
        );
        Ok(grid)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> i32 {
        self.config.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(&self) -> i32 {
        self.config.columns
    }

    /// Cell edge length in pixels.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.config.cell_size
    }

    /// Configuration the grid was built with.
    #[must_use]
    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Last frame number passed to [`update_frame`](Self::update_frame).
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// True if `location` lies inside the grid.
    #[must_use]
    pub const fn in_bounds(&self, location: Location) -> bool {
        location.is_valid() && location.row < self.config.rows && location.column < self.config.columns
    }

    /// Terrain at `row`, `column`.
    #[must_use]
    pub fn cell(&self, row: i32, column: i32) -> Option<&Cell> {
        self.cell_at(Location::new(row, column))
    }

    pub(crate) fn cell_at(&self, location: Location) -> Option<&Cell> {
        self.index(location).and_then(|index| self.cells[index].as_ref())
    }

    fn cell_at_mut(&mut self, location: Location) -> Option<&mut Cell> {
        self.index(location).and_then(|index| self.cells[index].as_mut())
    }

    /// Looks up an actor.
    #[must_use]
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.arena.get(id)
    }

    /// Looks up an actor mutably.
    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.arena.get_mut(id)
    }

    pub(crate) fn expect_actor(&self, id: ActorId) -> &Actor {
        match self.arena.get(id) {
            Some(actor) => actor,
            None => panic!("actor {id} is not on this grid"),
        }
    }

    /// Actors in z-order.
    pub fn actors(&self) -> impl Iterator<Item = (ActorId, &Actor)> + '_ {
        self.arena.iter()
    }

    /// The player, if one is on the grid.
    #[must_use]
    pub const fn player(&self) -> Option<ActorId> {
        self.player
    }

    /// The player move issued this tick.
    #[must_use]
    pub const fn last_move(&self) -> Option<Direction> {
        self.last_move
    }

    /// The grid's random number generator.
    #[must_use]
    pub const fn rng(&self) -> &DeterministicRandom {
        &self.rng
    }

    /// Seed the generator was last reset to.
    #[must_use]
    pub fn rng_seed(&self) -> u64 {
        self.rng.seed()
    }

    /// True once the player has reached an exit.
    #[must_use]
    pub const fn is_level_complete(&self) -> bool {
        self.level_complete
    }

    /// The input recording.
    #[must_use]
    pub const fn recording(&self) -> &Recording {
        &self.recording
    }

    /// Drains the event log.
    pub fn take_events(&mut self) -> Vec<EventRecord> {
        self.events.take()
    }

    /// Actors at `row`, `column` other than `visitor`, strongest first.
    ///
    /// Strength is dominance against `visitor`, or generic dominance without
    /// one. Equal strengths keep z-order.
    #[must_use]
    pub fn residents(&self, visitor: Option<ActorId>, row: i32, column: i32) -> Vec<ActorId> {
        self.residents_at(visitor, Location::new(row, column))
    }

    pub(crate) fn residents_at(&self, visitor: Option<ActorId>, location: Location) -> Vec<ActorId> {
        let visitor_actor = visitor.and_then(|id| self.arena.get(id));
        let mut residents: Vec<ActorId> = self
            .arena
            .at(location)
            .filter(|id| Some(*id) != visitor)
            .collect();
        residents.sort_by_key(|id| {
            std::cmp::Reverse(self.expect_actor(*id).dominance_for(visitor_actor))
        });
        residents
    }

    /// Captures the current state.
    #[must_use]
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            frame: self.frame,
            rows: self.config.rows,
            columns: self.config.columns,
            cells: self
                .cells
                .iter()
                .map(|slot| slot.as_ref().map(CellSnapshot::from))
                .collect(),
            actors: self
                .arena
                .iter()
                .map(|(id, actor)| ActorSnapshot::capture(id, actor))
                .collect(),
            rng_state: self.rng.state(),
            level_complete: self.level_complete,
        }
    }

    // =========================================================================
    // Cells
    // =========================================================================

    /// Puts `cell` into an empty in-bounds slot. Returns false otherwise, or
    /// if `cell` is already attached somewhere.
    pub fn place_cell(&mut self, mut cell: Cell, row: i32, column: i32) -> bool {
        let location = Location::new(row, column);
        let Some(index) = self.index(location) else {
            return false;
        };
        if self.cells[index].is_some() || cell.component().is_attached() {
            return false;
        }
        cell.component_mut().snap_to(location, self.config.cell_size);
        if cell.kind().is_animated() {
            cell.component_mut().shuffle_frames(&mut self.rng);
        }
        self.cells[index] = Some(cell);
        true
    }

    /// Fills every empty slot with a cell from `make`.
    pub fn fill_empty(&mut self, make: impl Fn() -> Cell) {
        for row in 0..self.config.rows {
            for column in 0..self.config.columns {
                if self.cell(row, column).is_none() {
                    self.place_cell(make(), row, column);
                }
            }
        }
    }

    /// Takes the cell out of a slot, detached.
    pub fn remove_cell(&mut self, row: i32, column: i32) -> Option<Cell> {
        let index = self.index(Location::new(row, column))?;
        let mut cell = self.cells[index].take()?;
        cell.component_mut().detach();
        Some(cell)
    }

    /// Schedules the cell at `row`, `column` to become `other`.
    ///
    /// Returns false if the slot is empty or a transform is already pending.
    ///
    /// # Panics
    ///
    /// Panics if `other` is attached to a grid.
    pub fn transform_cell(&mut self, row: i32, column: i32, other: Cell, wait_frames: u32) -> bool {
        let Some(cell) = self.cell_at_mut(Location::new(row, column)) else {
            return false;
        };
        cell.transform_to(other, wait_frames)
    }

    // =========================================================================
    // Actors
    // =========================================================================

    /// Places `actor` at `row`, `column` by visiting the cell from nowhere.
    ///
    /// Returns `None` when the target is off-grid, the actor is attached
    /// elsewhere, a second player is offered, or the visit is rejected.
    pub fn place_actor(&mut self, mut actor: Actor, row: i32, column: i32) -> Option<ActorId> {
        let target = Location::new(row, column);
        if !self.in_bounds(target) || actor.component().is_attached() {
            return None;
        }
        if actor.is_player() && self.player.is_some() {
            trace!(%target, "second player refused");
            return None;
        }
        actor.component_mut().detach();
        let tag = actor.tag();
        let id = self.arena.spawn(actor);
        if !resolver::visit(self, id, target) {
            self.arena.despawn(id);
            trace!(?tag, %target, "placement rejected");
            return None;
        }
        if tag == ActorTag::Player {
            self.player = Some(id);
        }
        self.emit(GridEvent::Placed {
            actor: id,
            tag,
            at: target,
        });
        Some(id)
    }

    /// Takes an actor off the grid, detached.
    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        let mut actor = self.arena.despawn(id)?;
        actor.component_mut().detach();
        if self.player == Some(id) {
            self.player = None;
        }
        self.emit(GridEvent::Removed { actor: id });
        Some(actor)
    }

    /// Moves an actor to `row`, `column` if the visit succeeds.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not on this grid.
    pub fn move_actor(&mut self, id: ActorId, row: i32, column: i32) -> bool {
        assert!(self.arena.contains(id), "actor {id} is not on this grid");
        resolver::visit(self, id, Location::new(row, column))
    }

    /// Whether [`move_actor`](Self::move_actor) would succeed, without side
    /// effects.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not on this grid.
    #[must_use]
    pub fn check_move(&self, id: ActorId, row: i32, column: i32) -> bool {
        resolver::plan_visit(self, id, Location::new(row, column)).is_some()
    }

    /// Issues the player's move for this tick.
    ///
    /// Returns false without effect if there is no player, the player is
    /// sliding or dying, a move was already issued this tick, or a recording
    /// is being played back. Otherwise the player turns to `direction`, the
    /// move is remembered for the recording, and the step is attempted.
    pub fn move_player(&mut self, direction: Direction) -> bool {
        if self.recording.mode() == RecordingMode::Playback {
            return false;
        }
        self.issue_player_move(direction)
    }

    fn issue_player_move(&mut self, direction: Direction) -> bool {
        let Some(id) = self.player else {
            return false;
        };
        if self.last_move.is_some() {
            return false;
        }
        let Some(player) = self.arena.get_mut(id) else {
            return false;
        };
        if player.component().is_moving() || player.is_dying() {
            return false;
        }
        player.set_heading(direction);
        let target = player.component().head().step(direction);
        self.last_move = Some(direction);
        let moved = resolver::visit(self, id, target);
        trace!(%direction, moved, "player move");
        moved
    }

    /// Starts dying `target`. Returns false if it is gone, already dying,
    /// cannot die, or `attacker` is dying.
    pub fn kill(&mut self, target: ActorId, attacker: Option<ActorId>) -> bool {
        let attacker_dying = attacker
            .and_then(|id| self.arena.get(id))
            .is_some_and(Actor::is_dying);
        let Some(victim) = self.arena.get_mut(target) else {
            return false;
        };
        if !victim.die_unless(attacker_dying) {
            return false;
        }
        debug!(actor = %target, tag = %victim.tag(), ?attacker, "actor dying");
        self.emit(GridEvent::Killed {
            actor: target,
            attacker,
        });
        true
    }

    // =========================================================================
    // Recording
    // =========================================================================

    /// Starts capturing player moves now rather than at the first update.
    ///
    /// # Errors
    ///
    /// Returns [`RecordingError::AlreadyStarted`] if recording or playback
    /// has begun.
    pub fn start_recording(&mut self) -> Result<(), RecordingError> {
        self.recording.start_recording(&self.rng)
    }

    /// Replays `log` from the next update on.
    ///
    /// # Errors
    ///
    /// Returns [`RecordingError::AlreadyStarted`] if recording or playback
    /// has begun, or [`RecordingError::NothingToPlay`] for an empty log.
    pub fn start_playback(&mut self, log: RecordingLog) -> Result<(), RecordingError> {
        if self.recording.mode() != RecordingMode::Unstarted {
            return Err(RecordingError::AlreadyStarted);
        }
        let mut recording = Recording::from_log(log);
        recording.start_playback(&self.rng)?;
        self.recording = recording;
        Ok(())
    }

    /// Stops recording or playback.
    pub fn stop_recording(&mut self) {
        self.recording.stop();
    }

    // =========================================================================
    // Frame loop
    // =========================================================================

    /// Advances the simulation by one tick.
    pub fn update_frame(&mut self, frame: u64) {
        self.frame = frame;
        self.event_frame = frame;

        self.recording.ensure_started(&self.rng);
        if let Some(direction) = self.recording.on_frame(frame, self.last_move) {
            self.issue_player_move(direction);
        }
        self.last_move = None;

        self.update_cells(frame);

        let order = self.arena.order().to_vec();
        for id in order {
            let Some(actor) = self.arena.get_mut(id) else {
                continue;
            };
            if actor.update_frame(frame, &self.config) {
                debug!(actor = %id, "finished dying");
            }
            behavior::act(self, id, frame);
        }

        let dead: Vec<ActorId> = self
            .arena
            .iter()
            .filter(|(_, actor)| actor.is_dead())
            .map(|(id, _)| id)
            .collect();
        for id in dead {
            self.remove_actor(id);
        }
        self.event_frame = frame.saturating_add(1);
    }

    fn update_cells(&mut self, frame: u64) {
        let mut due = Vec::new();
        for (index, slot) in self.cells.iter_mut().enumerate() {
            if let Some(cell) = slot {
                if cell.update_frame(frame, &self.config) {
                    due.push(index);
                }
            }
        }

        for index in due {
            let Some(cell) = self.cells[index].as_mut() else {
                continue;
            };
            let location = cell.component().head();
            let from = cell.kind();
            let Some(replacement) = cell.take_due_transform() else {
                continue;
            };
            let to = replacement.kind();
            self.remove_cell(location.row, location.column);
            self.place_cell(replacement, location.row, location.column);
            debug!(%location, %from, %to, "cell transformed");
            self.emit(GridEvent::CellTransformed {
                at: location,
                from,
                to,
            });
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    pub(crate) fn emit(&mut self, event: GridEvent) {
        self.events.push(self.event_frame, event);
    }

    pub(crate) fn complete_level(&mut self, at: Location) {
        if !self.level_complete {
            debug!(%at, "level complete");
            self.level_complete = true;
            self.emit(GridEvent::LevelComplete { at });
        }
    }

    fn index(&self, location: Location) -> Option<usize> {
        if !self.in_bounds(location) {
            return None;
        }
        usize::try_from(location.row * self.config.columns + location.column).ok()
    }
}

// =============================================================================
// Tests
// =============================================================================
