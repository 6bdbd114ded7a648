//! Aura Motion Engine
//!
//! Spring physics, trajectory-to-keyframe mapping, and the named transitions
//! of the Aura music player.
//!
//! # Features
//!
//! - **Spring Physics**: Semi-implicit Euler springs simulated ahead of time
//!   into bounded trajectories
//! - **Keyframe Mapping**: Parallel trajectories become one declarative
//!   keyframe sequence with normalized offsets
//! - **Named Transitions**: Player expand/collapse, ripples, toasts, modals,
//!   skeletons, list entries and more, started through a [`Playback`] backend
//! - **Palette Interpolation**: A frame-driven loop that writes theme colors
//!   into style variables, superseded by newer transitions on the same root
//! - **Headless Backend**: [`HeadlessPlayback`], [`MemoryElement`] and
//!   [`ManualFrameClock`] run everything without a rendering surface
//!
//! # Quick Start
//!
//! ```rust
//! use aura_animation::{HeadlessPlayback, MemoryElement, MotionEngine, Rect};
//!
//! let playback = HeadlessPlayback::new();
//! let engine = MotionEngine::new(playback.clone());
//! let panel = MemoryElement::new(Rect::new(0.0, 0.0, 390.0, 844.0));
//!
//! let handle = engine.expand_player(Some(&panel));
//! assert!(handle.is_some());
//!
//! while playback.tick(16.0) {}
//! assert_eq!(panel.style("opacity").as_deref(), Some("1"));
//! ```

pub mod color;
pub mod completion;
pub mod config;
pub mod easing;
pub mod error;
pub mod frame;
pub mod gesture;
pub mod headless;
pub mod interpolator;
pub mod keyframe;
pub mod playback;
pub mod presets;
pub mod rotation;
pub mod spring;
pub mod surface;
pub mod transitions;

pub use color::{Palette, Rgb};
pub use completion::Completion;
pub use config::{ConfigError, Durations, MotionConfig};
pub use easing::Easing;
pub use error::{MotionError, Result};
pub use frame::{FrameScheduler, ManualFrameClock};
pub use gesture::{SwipeRelease, SwipeTracker};
pub use headless::{HeadlessHandle, HeadlessPlayback, PlaybackId};
pub use interpolator::{ColorInterpolator, PaletteSample, PaletteTransition, TransitionToken};
pub use keyframe::{
    to_keyframes, DurationWindow, Keyframe, KeyframeMapper, KeyframeProperties,
    KeyframeSequence, KeyframeValue, Property, Track,
};
pub use playback::{AnimationHandle, FillMode, PlayDirection, PlayState, Playback, PlaybackOptions};
pub use presets::{Recipe, TransitionPreset};
pub use rotation::RotationController;
pub use spring::{simulate, simulate_default, Spring, SpringConfig, Trajectory};
pub use surface::{Element, MemoryElement, Point, PointerInput, Rect, StyleSink};
pub use transitions::{ModalHandles, MotionEngine};
