//! Input recording and playback.
//!
//! A recorded session is the RNG seed plus the player moves keyed by frame.
//! Because every other source of change in the grid is derived from those
//! two, replaying the moves on a freshly loaded level with the same seed
//! reproduces the session exactly.
//!
//! ```text
//! Unstarted ──start_recording──▶ Recording ──stop──▶ Stopped
//!     │                                               ▲
//!     └──────────start_playback──▶ Playback ──stop────┘
//! ```
//!
//! # Example
//!
//! ```
//! use tessera_core::location::Direction;
//! use tessera_core::random::DeterministicRandom;
//! use tessera_core::recording::Recording;
//!
//! let rng = DeterministicRandom::new(5);
//! let mut recording = Recording::new();
//! recording.start_recording(&rng).unwrap();
//! recording.on_frame(0, None);
//! recording.on_frame(1, Some(Direction::East));
//!
//! let mut replay = Recording::from_log(recording.log().clone());
//! replay.start_playback(&rng).unwrap();
//! assert_eq!(replay.on_frame(0, None), None);
//! assert_eq!(replay.on_frame(1, None), Some(Direction::East));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RecordingError;
use crate::location::Direction;
use crate::random::DeterministicRandom;

/// Where the recording is in its life cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordingMode {
    /// Nothing has happened yet.
    Unstarted,
    /// Capturing player moves.
    Recording,
    /// Feeding captured moves back.
    Playback,
    /// Finished; frames are ignored.
    Stopped,
}

/// The persistent part of a recording.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingLog {
    /// Seed the RNG was reset to when recording began.
    pub rng_seed: u64,
    /// Player moves by frame number.
    pub moves: BTreeMap<u64, Direction>,
    /// Highest frame seen while recording, `None` if no frame was recorded.
    pub max_frame: Option<u64>,
}

/// Recording state machine.
#[derive(Debug, Clone)]
pub struct Recording {
    log: RecordingLog,
    mode: RecordingMode,
}

impl Default for Recording {
    fn default() -> Self {
        Self::new()
    }
}

impl Recording {
    /// An empty, unstarted recording.
    #[must_use]
    pub fn new() -> Self {
        Self::from_log(RecordingLog::default())
    }

    /// An unstarted recording holding a previously captured log.
    #[must_use]
    pub fn from_log(log: RecordingLog) -> Self {
        Self {
            log,
            mode: RecordingMode::Unstarted,
        }
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> RecordingMode {
        self.mode
    }

    /// The captured data.
    #[must_use]
    pub const fn log(&self) -> &RecordingLog {
        &self.log
    }

    /// Consumes the recording, returning its log.
    #[must_use]
    pub fn into_log(self) -> RecordingLog {
        self.log
    }

    /// Starts capturing moves.
    ///
    /// Clears any loaded log, remembers the RNG's seed and reseeds the RNG
    /// with it so the recorded session starts from a reproducible state.
    ///
    /// # Errors
    ///
    /// Returns [`RecordingError::AlreadyStarted`] unless unstarted.
    pub fn start_recording(&mut self, rng: &DeterministicRandom) -> Result<(), RecordingError> {
        if self.mode != RecordingMode::Unstarted {
            return Err(RecordingError::AlreadyStarted);
        }
        let seed = rng.seed();
        rng.set_seed(seed);
        self.log = RecordingLog {
            rng_seed: seed,
            ..RecordingLog::default()
        };
        self.mode = RecordingMode::Recording;
        debug!(seed, "recording started");
        Ok(())
    }

    /// Starts feeding the loaded log back, reseeding the RNG from it.
    ///
    /// # Errors
    ///
    /// Returns [`RecordingError::AlreadyStarted`] unless unstarted, and
    /// [`RecordingError::NothingToPlay`] if the log never saw a frame.
    pub fn start_playback(&mut self, rng: &DeterministicRandom) -> Result<(), RecordingError> {
        if self.mode != RecordingMode::Unstarted {
            return Err(RecordingError::AlreadyStarted);
        }
        if self.log.max_frame.is_none() {
            return Err(RecordingError::NothingToPlay);
        }
        rng.set_seed(self.log.rng_seed);
        self.mode = RecordingMode::Playback;
        debug!(
            seed = self.log.rng_seed,
            moves = self.log.moves.len(),
            "playback started"
        );
        Ok(())
    }

    /// Starts recording if nothing has been started yet.
    pub(crate) fn ensure_started(&mut self, rng: &DeterministicRandom) {
        if self.mode == RecordingMode::Unstarted {
            // unstarted, so this cannot fail
            let _ = self.start_recording(rng);
        }
    }

    /// Processes one frame.
    ///
    /// While recording, stores `last_move` (if any) under `frame`. During
    /// playback, returns the move captured for `frame`; once past the last
    /// recorded frame the playback stops itself.
    pub fn on_frame(&mut self, frame: u64, last_move: Option<Direction>) -> Option<Direction> {
        match self.mode {
            RecordingMode::Recording => {
                if let Some(direction) = last_move {
                    self.log.moves.insert(frame, direction);
                }
                self.log.max_frame = Some(self.log.max_frame.map_or(frame, |max| max.max(frame)));
                None
            }
            RecordingMode::Playback => {
                if self.log.max_frame.is_some_and(|max| frame > max) {
                    self.stop();
                    return None;
                }
                self.log.moves.get(&frame).copied()
            }
            RecordingMode::Unstarted | RecordingMode::Stopped => None,
        }
    }

    /// Stops recording or playback. Later frames are ignored.
    pub fn stop(&mut self) {
        if self.mode != RecordingMode::Stopped {
            debug!(mode = ?self.mode, "recording stopped");
        }
        self.mode = RecordingMode::Stopped;
    }
}

// =============================================================================
// Tests
// =============================================================================
