//! Spring physics simulation
//!
//! Semi-implicit Euler integration of a damped harmonic oscillator. The
//! simulator runs a spring from a start value to a target ahead of time and
//! returns the full position [`Trajectory`], which the keyframe mapper turns
//! into a declarative keyframe sequence.

use crate::error::{MotionError, Result};

/// Default simulation rate in samples per second
pub const DEFAULT_SAMPLE_RATE: f64 = 60.0;

/// Hard cap on simulated time, in seconds
pub const MAX_SIMULATED_SECONDS: f64 = 3.0;

/// Distance and speed below which a spring counts as settled
pub const SETTLE_TOLERANCE: f64 = 0.001;

/// Configuration for a spring animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl SpringConfig {
    /// Balanced spring used for opacity and small entries
    pub const DEFAULT: Self = Self::new(170.0, 26.0, 1.0);

    /// Soft, slightly heavy spring (player panel, modal scale)
    pub const GENTLE: Self = Self::new(180.0, 22.0, 1.1);

    /// Lively spring with visible overshoot
    pub const BOUNCY: Self = Self::new(260.0, 12.0, 1.0);

    /// Slow, heavy, no-overshoot spring for large surfaces
    pub const CINEMATIC: Self = Self::new(90.0, 24.0, 1.4);

    /// Loose spring that oscillates several times before settling
    pub const WOBBLY: Self = Self::new(180.0, 10.0, 1.0);

    /// Create a new spring configuration
    pub const fn new(stiffness: f64, damping: f64, mass: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Calculate critical damping for this spring's stiffness and mass
    pub fn critical_damping(&self) -> f64 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Ratio of actual to critical damping (1.0 = critically damped)
    pub fn damping_ratio(&self) -> f64 {
        self.damping / self.critical_damping()
    }

    /// Check if the spring is underdamped (will oscillate)
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }

    /// Check if the spring is overdamped (slow settling, no oscillation)
    pub fn is_overdamped(&self) -> bool {
        self.damping > self.critical_damping()
    }

    fn assert_valid(&self) {
        assert!(
            self.stiffness.is_finite() && self.stiffness > 0.0,
            "spring stiffness must be positive and finite, got {}",
            self.stiffness
        );
        assert!(
            self.mass.is_finite() && self.mass > 0.0,
            "spring mass must be positive and finite, got {}",
            self.mass
        );
        assert!(
            self.damping.is_finite() && self.damping >= 0.0,
            "spring damping must be non-negative and finite, got {}",
            self.damping
        );
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A stepped spring integrator
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f64) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Check if the spring is within tolerance of its target and nearly still
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < SETTLE_TOLERANCE
            && self.velocity.abs() < SETTLE_TOLERANCE
    }

    /// Advance the spring by `dt` seconds (semi-implicit Euler)
    ///
    /// Velocity is updated first; the new velocity moves the position.
    pub fn step(&mut self, dt: f64) {
        let force =
            -self.config.stiffness * (self.value - self.target) - self.config.damping * self.velocity;
        let acceleration = force / self.config.mass;
        self.velocity += acceleration * dt;
        self.value += self.velocity * dt;
    }
}

/// An immutable sequence of scalar samples, one per simulated frame
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    samples: Vec<f64>,
    converged: bool,
}

impl Trajectory {
    /// Build a trajectory from precomputed samples
    pub fn from_samples(samples: Vec<f64>) -> Result<Self> {
        if samples.is_empty() {
            return Err(MotionError::EmptyTrajectory);
        }
        Ok(Self {
            samples,
            converged: false,
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether the simulation settled before hitting the time cap
    pub fn converged(&self) -> bool {
        self.converged
    }

    pub fn first(&self) -> f64 {
        self.samples[0]
    }

    pub fn last(&self) -> f64 {
        self.samples[self.samples.len() - 1]
    }

    /// Sample at `index`, holding the final value past the end
    pub fn sample(&self, index: usize) -> f64 {
        self.samples[index.min(self.samples.len() - 1)]
    }

    /// Keep at most the first `count` samples (at least one is always kept)
    pub fn truncated(&self, count: usize) -> Self {
        let keep = count.clamp(1, self.samples.len());
        Self {
            samples: self.samples[..keep].to_vec(),
            converged: self.converged && keep == self.samples.len(),
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }
}

/// Run a spring from `from` to `to` and record its position every frame.
///
/// Frame 0 is the start value and every integration step adds one frame, up
/// to `ceil(sample_rate * 3)` frames (the 3-second cap). When the spring
/// settles earlier, the exact target is appended so the trajectory ends on
/// `to`.
///
/// # Panics
///
/// Panics if `config` has non-positive stiffness or mass, negative damping, or
/// if `sample_rate` is not positive.
pub fn simulate(from: f64, to: f64, config: SpringConfig, sample_rate: f64) -> Trajectory {
    config.assert_valid();
    assert!(
        sample_rate.is_finite() && sample_rate > 0.0,
        "sample rate must be positive and finite, got {sample_rate}"
    );

    let dt = 1.0 / sample_rate;
    let max_frames = ((sample_rate * MAX_SIMULATED_SECONDS).ceil() as usize).max(1);

    let mut spring = Spring::new(config, from);
    spring.set_target(to);

    let mut samples = Vec::with_capacity(max_frames.min(256) + 1);
    samples.push(from);
    let mut converged = false;

    loop {
        if spring.is_settled() {
            samples.push(to);
            converged = true;
            break;
        }
        if samples.len() >= max_frames {
            break;
        }
        spring.step(dt);
        samples.push(spring.value());
    }

    tracing::trace!(
        from,
        to,
        samples = samples.len(),
        converged,
        "spring simulated"
    );

    Trajectory { samples, converged }
}

/// [`simulate`] at the default 60 Hz sample rate
pub fn simulate_default(from: f64, to: f64, config: SpringConfig) -> Trajectory {
    simulate(from, to, config, DEFAULT_SAMPLE_RATE)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRESETS: [SpringConfig; 5] = [
        SpringConfig::DEFAULT,
        SpringConfig::GENTLE,
        SpringConfig::BOUNCY,
        SpringConfig::CINEMATIC,
        SpringConfig::WOBBLY,
    ];

    #[test]
    fn test_trajectory_is_bounded_and_non_empty() {
        for config in PRESETS {
            for (from, to) in [(0.0, 1.0), (100.0, 0.0), (-80.0, 0.0), (0.92, 1.0)] {
                let trajectory = simulate(from, to, config, 60.0);
                assert!(!trajectory.is_empty());
                assert!(trajectory.len() <= 60 * 3 + 1);
            }
        }
    }

    #[test]
    fn test_converged_trajectory_ends_exactly_on_target() {
        let trajectory = simulate(100.0, 0.0, SpringConfig::GENTLE, 60.0);
        assert!(trajectory.converged());
        assert_eq!(trajectory.last(), 0.0);

        let trajectory = simulate(0.92, 1.0, SpringConfig::GENTLE, 60.0);
        assert!(trajectory.converged());
        assert_eq!(trajectory.last(), 1.0);
    }

    #[test]
    fn test_same_start_and_target_converges_immediately() {
        let trajectory = simulate(42.0, 42.0, SpringConfig::WOBBLY, 60.0);
        assert!(trajectory.converged());
        assert_eq!(trajectory.len(), 2);
        assert_eq!(trajectory.last(), 42.0);
    }

    #[test]
    fn test_undamped_spring_stops_at_cap() {
        let config = SpringConfig::new(200.0, 0.0, 1.0);
        let trajectory = simulate(0.0, 10.0, config, 60.0);
        assert!(!trajectory.converged());
        assert_eq!(trajectory.len(), 180);
    }

    #[test]
    fn test_cap_scales_with_sample_rate() {
        let config = SpringConfig::new(200.0, 0.0, 1.0);
        let trajectory = simulate(0.0, 10.0, config, 120.0);
        assert_eq!(trajectory.len(), 360);
    }

    #[test]
    fn test_trajectory_starts_on_start_value() {
        let config = SpringConfig::new(100.0, 0.0, 1.0);
        let trajectory = simulate(0.0, 1.0, config, 10.0);
        assert_eq!(trajectory.first(), 0.0);
        // One semi-implicit step from rest: v = k*d/m*dt, x = v*dt
        assert!((trajectory.sample(1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_tiny_sample_rate_still_yields_a_sample() {
        let trajectory = simulate(0.0, 1.0, SpringConfig::DEFAULT, 0.1);
        assert_eq!(trajectory.len(), 1);
    }

    #[test]
    #[should_panic(expected = "mass")]
    fn test_zero_mass_fails_fast() {
        simulate(0.0, 1.0, SpringConfig::new(100.0, 10.0, 0.0), 60.0);
    }

    #[test]
    #[should_panic(expected = "stiffness")]
    fn test_zero_stiffness_fails_fast() {
        simulate(0.0, 1.0, SpringConfig::new(0.0, 10.0, 1.0), 60.0);
    }

    #[test]
    fn test_clamped_sample_lookup() {
        let trajectory = Trajectory::from_samples(vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(trajectory.sample(1), 2.0);
        assert_eq!(trajectory.sample(10), 3.0);
    }

    #[test]
    fn test_empty_samples_rejected() {
        assert_eq!(
            Trajectory::from_samples(Vec::new()),
            Err(MotionError::EmptyTrajectory)
        );
    }

    #[test]
    fn test_truncated_keeps_prefix() {
        let trajectory = simulate(0.0, 0.0, SpringConfig::WOBBLY, 60.0).truncated(20);
        assert!(trajectory.len() <= 20);
        assert!(!trajectory.is_empty());
    }

    #[test]
    fn test_spring_presets() {
        assert!(SpringConfig::WOBBLY.is_underdamped());
        assert!(SpringConfig::BOUNCY.is_underdamped());
        assert!(SpringConfig::GENTLE.is_underdamped());
        assert!(SpringConfig::CINEMATIC.is_overdamped());
        assert!(SpringConfig::WOBBLY.damping_ratio() < SpringConfig::GENTLE.damping_ratio());
    }

    #[test]
    fn test_spring_inherits_velocity() {
        let mut spring = Spring::new(SpringConfig::WOBBLY, 0.0);
        spring.set_target(100.0);

        for _ in 0..10 {
            spring.step(1.0 / 60.0);
        }

        let velocity = spring.velocity();
        assert!(velocity > 0.0);

        spring.set_target(50.0);
        assert_eq!(spring.velocity(), velocity);
    }
}
