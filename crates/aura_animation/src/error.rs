//! Motion engine error types

use thiserror::Error;

/// Errors surfaced by the motion engine
///
/// Nothing here is fatal to the host: a failed transition degrades to "no
/// visual transition occurred".
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    /// Playback was cancelled before its timeline finished
    #[error("animation cancelled")]
    Cancelled,

    /// The playback backend rejected or aborted a timeline
    #[error("playback failed: {0}")]
    Playback(String),

    /// A keyframe sequence violated its offset invariants
    #[error("invalid keyframes: {0}")]
    InvalidKeyframes(String),

    /// The mapper was given no trajectories
    #[error("cannot map an empty set of trajectories")]
    EmptyTrajectorySet,

    /// A trajectory was constructed without samples
    #[error("trajectory must contain at least one sample")]
    EmptyTrajectory,

    /// A color string could not be parsed
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A transient overlay could not be removed from its container
    #[error("failed to detach element: {0}")]
    Detach(String),
}

/// Result type for motion operations
pub type Result<T> = std::result::Result<T, MotionError>;
