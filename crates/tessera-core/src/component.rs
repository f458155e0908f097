//! State shared by every placeable grid object.
//!
//! A [`Component`] tracks two locations. The *head* is where the object
//! logically is; the *trailing* location is where it visually still is. While
//! the two differ the object is sliding, and [`Component::update_frame`]
//! advances its pixel position towards the head until it arrives and the
//! trailing location snaps forward.
//!
//! Components never move themselves on the grid. Head changes come from the
//! grid's visit resolution; this type only animates the consequences.

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::RngCore;

use crate::config::GridConfig;
use crate::error::ConfigError;
use crate::location::Location;

// =============================================================================
// Animation
// =============================================================================

/// A declared frame sequence and its playback cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    frames: Vec<usize>,
    cycle: bool,
    change_rate: u32,
    cursor: usize,
    ticks: u32,
}

impl Animation {
    /// Frame indices in playback order.
    #[must_use]
    pub fn frames(&self) -> &[usize] {
        &self.frames
    }

    /// Whether playback wraps around after the last frame.
    #[must_use]
    pub const fn cycles(&self) -> bool {
        self.cycle
    }

    /// Ticks each frame stays on screen.
    #[must_use]
    pub const fn change_rate(&self) -> u32 {
        self.change_rate
    }

    /// Returns true once a non-cycling animation holds its last frame.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        !self.cycle && self.cursor + 1 == self.frames.len()
    }

    fn current(&self) -> usize {
        self.frames[self.cursor]
    }

    fn tick(&mut self) {
        self.ticks += 1;
        if self.ticks < self.change_rate {
            return;
        }
        self.ticks = 0;
        if self.cursor + 1 < self.frames.len() {
            self.cursor += 1;
        } else if self.cycle {
            self.cursor = 0;
        }
    }
}

// =============================================================================
// Component
// =============================================================================

/// Location, motion and animation state common to cells and actors.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    head: Location,
    trailing: Location,
    position: Vec2,
    frame_count: usize,
    current_frame: usize,
    animation: Option<Animation>,
    opacity: f32,
}

impl Default for Component {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Component {
    /// Creates a detached component whose tileset has `frame_count` frames.
    #[must_use]
    pub fn new(frame_count: usize) -> Self {
        Self {
            head: Location::invalid(),
            trailing: Location::invalid(),
            position: Vec2::ZERO,
            frame_count: frame_count.max(1),
            current_frame: 0,
            animation: None,
            opacity: 1.0,
        }
    }

    /// Logical location.
    #[must_use]
    pub const fn head(&self) -> Location {
        self.head
    }

    /// Visual location; differs from [`head`](Self::head) while sliding.
    #[must_use]
    pub const fn trailing(&self) -> Location {
        self.trailing
    }

    /// True while a slide is in progress.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.head != self.trailing
    }

    /// True once the component has been placed on a grid.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.head.is_valid()
    }

    /// Pixel position of the top-left corner.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Index of the frame currently displayed.
    #[must_use]
    pub const fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Number of frames the component's tileset provides.
    #[must_use]
    pub const fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// The declared animation, if any.
    #[must_use]
    pub const fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    /// Render opacity in `0.0..=1.0`.
    #[must_use]
    pub const fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Sets the render opacity, clamped to `0.0..=1.0`.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Selects a still frame, cancelling any animation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FrameOutOfRange`] if `index` is not a frame of
    /// this component.
    pub fn set_frame(&mut self, index: usize) -> Result<(), ConfigError> {
        self.check_frame(index)?;
        self.animation = None;
        self.current_frame = index;
        Ok(())
    }

    /// Declares a frame sequence advanced every `change_rate` ticks.
    ///
    /// A cycling animation wraps around; otherwise the last frame is held.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAnimation`] for an empty sequence or a zero
    /// rate, and [`ConfigError::FrameOutOfRange`] if any index is not a frame
    /// of this component.
    pub fn animate_frames(
        &mut self,
        frames: &[usize],
        cycle: bool,
        change_rate: u32,
    ) -> Result<(), ConfigError> {
        if frames.is_empty() || change_rate == 0 {
            return Err(ConfigError::EmptyAnimation);
        }
        for &index in frames {
            self.check_frame(index)?;
        }
        self.current_frame = frames[0];
        self.animation = Some(Animation {
            frames: frames.to_vec(),
            cycle,
            change_rate,
            cursor: 0,
            ticks: 0,
        });
        Ok(())
    }

    /// Permutes the declared frame sequence and restarts it.
    ///
    /// Does nothing without an animation.
    pub fn shuffle_frames<R: RngCore>(&mut self, rng: &mut R) {
        if let Some(animation) = self.animation.as_mut() {
            animation.frames.shuffle(rng);
            animation.cursor = 0;
            animation.ticks = 0;
            self.current_frame = animation.current();
        }
    }

    /// Advances the animation and the slide by one frame.
    pub fn update_frame(&mut self, _frame: u64, config: &GridConfig) {
        if let Some(animation) = self.animation.as_mut() {
            animation.tick();
            self.current_frame = animation.current();
        }

        if !self.head.is_valid() {
            return;
        }
        let target = pixel_origin(self.head, config.cell_size);
        if !self.is_moving() {
            self.position = target;
            return;
        }

        let speed = config.slide_speed();
        let delta = target - self.position;
        let distance = delta.length();
        if distance <= speed {
            self.position = target;
            self.trailing = self.head;
        } else {
            self.position += delta / distance * speed;
        }
    }

    /// Places the component at `location` with no slide.
    pub(crate) fn snap_to(&mut self, location: Location, cell_size: f32) {
        self.head = location;
        self.trailing = location;
        if location.is_valid() {
            self.position = pixel_origin(location, cell_size);
        }
    }

    /// Moves the logical location, leaving the trailing location to slide.
    pub(crate) fn set_head(&mut self, location: Location) {
        self.head = location;
    }

    /// Clears both locations.
    pub(crate) fn detach(&mut self) {
        self.head = Location::invalid();
        self.trailing = Location::invalid();
    }

    fn check_frame(&self, index: usize) -> Result<(), ConfigError> {
        if index < self.frame_count {
            Ok(())
        } else {
            Err(ConfigError::FrameOutOfRange {
                index,
                available: self.frame_count,
            })
        }
    }
}

/// Pixel coordinates of the top-left corner of `location`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn pixel_origin(location: Location, cell_size: f32) -> Vec2 {
    Vec2::new(
        location.column as f32 * cell_size,
        location.row as f32 * cell_size,
    )
}

// =============================================================================
// Tests
// =============================================================================
