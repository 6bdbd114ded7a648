//! Playback backend interface
//!
//! Transitions compute their keyframes up front and hand them to a
//! [`Playback`] implementation, which owns the timeline and returns an
//! [`AnimationHandle`]. This keeps the simulator and mapper independent of
//! any rendering surface.

use crate::completion::Completion;
use crate::easing::Easing;
use crate::keyframe::KeyframeSequence;
use crate::surface::Element;

/// Playback direction for animations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayDirection {
    /// Play forward (0.0 -> 1.0)
    #[default]
    Forward,
    /// Play in reverse (1.0 -> 0.0)
    Reverse,
    /// Alternate between forward and reverse each iteration
    Alternate,
}

/// Fill mode determines the animation state before/after playback
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillMode {
    /// No fill - reset to initial state after animation
    #[default]
    None,
    /// Hold the final keyframe value after animation completes
    Forwards,
    /// Apply the first keyframe value before animation starts
    Backwards,
    /// Apply both forwards and backwards fill
    Both,
}

impl FillMode {
    pub fn fills_forwards(self) -> bool {
        matches!(self, FillMode::Forwards | FillMode::Both)
    }

    pub fn fills_backwards(self) -> bool {
        matches!(self, FillMode::Backwards | FillMode::Both)
    }
}

/// Lifecycle of a playback
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayState {
    Running,
    Paused,
    Finished,
    Cancelled,
}

/// Timing options for one playback
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackOptions {
    pub duration_ms: u32,
    pub easing: Easing,
    pub fill_mode: FillMode,
    /// Number of iterations (-1 for infinite)
    pub iterations: i32,
    pub delay_ms: u32,
    pub direction: PlayDirection,
}

impl PlaybackOptions {
    /// Linear, single iteration, no fill
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            easing: Easing::Linear,
            fill_mode: FillMode::None,
            iterations: 1,
            delay_ms: 0,
            direction: PlayDirection::Forward,
        }
    }

    /// Set the timing function
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set fill mode
    pub fn fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    /// Set number of iterations (-1 for infinite)
    pub fn iterations(mut self, count: i32) -> Self {
        self.iterations = count;
        self
    }

    /// Loop forever
    pub fn loop_infinite(mut self) -> Self {
        self.iterations = -1;
        self
    }

    /// Set delay before animation starts
    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Set playback direction
    pub fn direction(mut self, direction: PlayDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn is_infinite(&self) -> bool {
        self.iterations < 0
    }
}

/// Control over a running or pending playback
pub trait AnimationHandle {
    /// Freeze the timeline at its current position
    fn pause(&self);

    /// Continue a paused timeline from where it stopped
    fn resume(&self);

    /// Abort the playback; its completion rejects
    fn cancel(&self);

    fn play_state(&self) -> PlayState;

    /// Settles once when the timeline finishes or is cancelled
    fn finished(&self) -> Completion;
}

/// A declarative keyframe playback facility
pub trait Playback {
    type Target: Element;
    type Handle: AnimationHandle;

    /// Start playing `keyframes` on `target`
    fn play(
        &self,
        target: &Self::Target,
        keyframes: KeyframeSequence,
        options: PlaybackOptions,
    ) -> Self::Handle;
}
