//! Error types for configuration and recording misuse.
//!
//! Gameplay rejections (a wall in the way, an occupied cell) are not errors:
//! they are reported as `bool` or `Option` by the grid. The types here cover
//! malformed level data and broken call sequences, which should stop loading
//! before the first frame runs.

use thiserror::Error;

use crate::location::Location;
use crate::registry::AttributeType;

/// Malformed level or component configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The component type slot has no registered factory.
    #[error("no component registered for slot {0}")]
    UnknownSlot(u16),

    /// The component kind has no attribute with this name.
    #[error("{component} has no attribute named `{name}`")]
    UnknownAttribute {
        /// Component kind name.
        component: &'static str,
        /// Requested attribute name.
        name: String,
    },

    /// The attribute exists but cannot be written.
    #[error("attribute `{name}` of {component} is read-only")]
    ReadOnlyAttribute {
        /// Component kind name.
        component: &'static str,
        /// Attribute name.
        name: String,
    },

    /// The supplied value does not fit the attribute's declared type.
    #[error("attribute `{name}` expects {expected}, got {found}")]
    AttributeType {
        /// Attribute name.
        name: String,
        /// Declared type.
        expected: AttributeType,
        /// Type of the supplied value.
        found: AttributeType,
    },

    /// An integer attribute value does not fit the attribute's range.
    #[error("attribute `{name}` value {value} is out of range")]
    AttributeRange {
        /// Attribute name.
        name: String,
        /// Supplied value.
        value: i64,
    },

    /// A text attribute value names nothing the attribute knows.
    #[error("attribute `{name}` does not accept `{value}`")]
    InvalidValue {
        /// Attribute name.
        name: String,
        /// Supplied value.
        value: String,
    },

    /// An animation references a frame the component does not have.
    #[error("animation frame {index} out of range (component has {available} frames)")]
    FrameOutOfRange {
        /// Offending frame index.
        index: usize,
        /// Number of frames available.
        available: usize,
    },

    /// An animation was declared with no frames or a zero change rate.
    #[error("animation needs at least one frame and a positive change rate")]
    EmptyAnimation,

    /// Grid dimensions or timing constants are unusable.
    #[error("invalid grid configuration: {0}")]
    InvalidGrid(&'static str),

    /// Two cells were specified for the same slot, or the slot is off-grid.
    #[error("cannot place a cell at {0}")]
    CellPlacement(Location),

    /// An actor from the level data was rejected by the grid at placement.
    #[error("actor placement rejected at {0}")]
    ActorPlacement(Location),
}

/// Recording state machine misuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecordingError {
    /// The recording has already been started in some mode.
    #[error("recording already started")]
    AlreadyStarted,

    /// Playback was requested without a loaded recording.
    #[error("no recorded moves to play back")]
    NothingToPlay,
}
