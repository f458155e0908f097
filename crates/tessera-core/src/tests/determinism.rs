//! Determinism verification tests.
//!
//! These tests verify that a level produces identical runs when:
//! - Loaded with the same seed
//! - Given identical inputs, live or replayed from a recording
//!
//! Replays, level verification and bug reports all depend on this.

use crate::actor::Actor;
use crate::events::{EventRecord, GridEvent};
use crate::grid::Grid;
use crate::location::{Direction, Location};
use crate::random::DeterministicRandom;
use crate::recording::{RecordingLog, RecordingMode};

use super::helpers::{open_grid, place, roamer_room, run_frames, run_with_inputs};

const INPUTS: &[(u64, Direction)] = &[
    (0, Direction::East),
    (8, Direction::East),
    (16, Direction::South),
    (24, Direction::South),
    (40, Direction::West),
    (56, Direction::North),
];

// =============================================================================
// Seeded Runs
// =============================================================================

#[test]
fn same_seed_same_run() {
    let mut first = roamer_room(1234);
    let mut second = roamer_room(1234);

    let a = run_with_inputs(&mut first, 200, INPUTS);
    let b = run_with_inputs(&mut second, 200, INPUTS);

    for (frame, (left, right)) in a.iter().zip(&b).enumerate() {
        assert_eq!(left, right, "runs diverged at frame {frame}");
    }
}

#[test]
fn different_seeds_different_generators() {
    let mut first = roamer_room(1);
    let mut second = roamer_room(2);
    run_frames(&mut first, 0..50);
    run_frames(&mut second, 0..50);

    assert_ne!(first.rng().state(), second.rng().state());
}

#[test]
fn recording_restarts_generator_from_seed() {
    let mut grid = roamer_room(99);
    let reference = DeterministicRandom::new(99);
    // loading drew from the generator to shuffle the fire and water frames
    assert_ne!(grid.rng().state(), reference.state());
    grid.start_recording().unwrap();
    assert_eq!(grid.rng().state(), reference.state());
}

// =============================================================================
// Recording and Playback
// =============================================================================

#[test]
fn replay_matches_recorded_run() {
    let mut live = roamer_room(77);
    let recorded = run_with_inputs(&mut live, 160, INPUTS);
    let log = live.recording().log().clone();
    assert_eq!(log.max_frame, Some(159));
    assert_eq!(log.moves.get(&0), Some(&Direction::East));

    let mut replay = roamer_room(77);
    replay.start_playback(log).unwrap();
    let replayed = run_with_inputs(&mut replay, 160, &[]);

    for (frame, (left, right)) in recorded.iter().zip(&replayed).enumerate() {
        assert_eq!(left, right, "replay diverged at frame {frame}");
    }
}

#[test]
fn replayed_roamers_match_cell_for_cell() {
    let mut live = roamer_room(5);
    run_with_inputs(&mut live, 96, &[]);
    let log = live.recording().log().clone();

    let mut replay = roamer_room(5);
    replay.start_playback(log).unwrap();
    run_frames(&mut replay, 0..96);

    let expected = live.snapshot();
    let actual = replay.snapshot();
    for row in 0..expected.rows {
        for column in 0..expected.columns {
            let location = Location::new(row, column);
            let want: Vec<_> = expected.actors_at(location).map(|a| a.tag).collect();
            let got: Vec<_> = actual.actors_at(location).map(|a| a.tag).collect();
            assert_eq!(want, got, "actors differ at {location}");
        }
    }
    assert_eq!(expected.rng_state, actual.rng_state);
}

#[test]
fn log_survives_json() {
    let mut live = roamer_room(31);
    let recorded = run_with_inputs(&mut live, 80, INPUTS);
    let json = serde_json::to_string(live.recording().log()).unwrap();

    let log: RecordingLog = serde_json::from_str(&json).unwrap();
    let mut replay = roamer_room(31);
    replay.start_playback(log).unwrap();
    let replayed = run_with_inputs(&mut replay, 80, &[]);

    assert_eq!(recorded.last(), replayed.last());
}

fn corridor() -> Grid {
    let mut grid = open_grid(1, 4);
    place(&mut grid, Actor::player(), 0, 0);
    grid.take_events();
    grid
}

/// Drives `grid` like `run_with_inputs`, collecting the drained events.
fn events_with_inputs(
    grid: &mut Grid,
    frames: u64,
    inputs: &[(u64, Direction)],
) -> Vec<EventRecord> {
    let mut events = Vec::new();
    for frame in 0..frames {
        if let Some((_, direction)) = inputs.iter().find(|(at, _)| *at == frame) {
            grid.move_player(*direction);
        }
        grid.update_frame(frame);
        events.extend(grid.take_events());
    }
    events
}

#[test]
fn replay_reports_the_same_events() {
    let inputs = &[(0, Direction::East), (8, Direction::East)];
    let mut live = corridor();
    let recorded = events_with_inputs(&mut live, 24, inputs);
    let log = live.recording().log().clone();

    let mut replay = corridor();
    replay.start_playback(log).unwrap();
    let replayed = events_with_inputs(&mut replay, 24, &[]);

    let moved_frames: Vec<u64> = recorded
        .iter()
        .filter(|record| matches!(record.event, GridEvent::Moved { .. }))
        .map(|record| record.frame)
        .collect();
    assert_eq!(moved_frames, vec![0, 8]);
    assert_eq!(recorded, replayed);
}

#[test]
fn playback_ignores_live_input() {
    let mut live = roamer_room(8);
    run_with_inputs(&mut live, 24, &[]);
    let log = live.recording().log().clone();

    let mut replay = roamer_room(8);
    replay.start_playback(log).unwrap();
    let replayed = run_with_inputs(&mut replay, 24, INPUTS);

    assert_eq!(replayed.last(), Some(&live.snapshot()));
}

#[test]
fn playback_stops_after_last_recorded_frame() {
    let mut live = roamer_room(3);
    run_frames(&mut live, 0..10);
    let log = live.recording().log().clone();

    let mut replay = roamer_room(3);
    replay.start_playback(log).unwrap();
    run_frames(&mut replay, 0..10);
    assert_eq!(replay.recording().mode(), RecordingMode::Playback);

    replay.update_frame(10);
    assert_eq!(replay.recording().mode(), RecordingMode::Stopped);
}

#[test]
fn playback_needs_a_fresh_grid() {
    let mut live = roamer_room(3);
    run_frames(&mut live, 0..4);
    let log = live.recording().log().clone();

    assert!(live.start_playback(log.clone()).is_err());
    assert!(roamer_room(3).start_playback(RecordingLog::default()).is_err());
}

// =============================================================================
// Generator State
// =============================================================================

#[test]
fn snapshot_carries_generator_state() {
    let mut grid = roamer_room(21);
    run_frames(&mut grid, 0..40);
    let snapshot = grid.snapshot();
    assert_eq!(snapshot.rng_state, grid.rng().state());

    let restored = DeterministicRandom::new(0);
    restored.set_state(snapshot.rng_state);
    assert_eq!(restored.next_int(), grid.rng().next_int());
}
