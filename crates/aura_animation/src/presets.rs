//! Keyframe recipes for the named transitions
//!
//! Each preset returns the keyframes and playback options for one
//! transition without touching any element. Spring-driven presets simulate
//! their trajectories here; the rest are fixed recipes.

use crate::config::MotionConfig;
use crate::easing::Easing;
use crate::error::Result;
use crate::keyframe::{
    spring_duration_ms, DurationWindow, KeyframeMapper, KeyframeProperties, KeyframeSequence,
    KeyframeValue, Property,
};
use crate::playback::{FillMode, PlaybackOptions};
use crate::spring::{simulate, SpringConfig, Trajectory};

/// Tolerance below/above the nominal player expand duration
pub const EXPAND_TOLERANCE: (u32, u32) = (100, 200);

/// Tolerance below/above the nominal player collapse duration
pub const COLLAPSE_TOLERANCE: (u32, u32) = (80, 150);

/// Samples of the shake trajectory that are simulated (and discarded)
const SHAKE_SAMPLES: usize = 20;

/// Keyframes plus the options to play them with
#[derive(Clone, Debug, PartialEq)]
pub struct Recipe {
    pub keyframes: KeyframeSequence,
    pub options: PlaybackOptions,
}

impl Recipe {
    pub fn new(keyframes: KeyframeSequence, options: PlaybackOptions) -> Self {
        Self { keyframes, options }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn blur(px: f64) -> KeyframeValue {
    format!("blur({px}px)").into()
}

fn transform(value: &str) -> KeyframeProperties {
    KeyframeProperties::new().with_transform(value)
}

/// Pre-built transition recipes
pub struct TransitionPreset;

impl TransitionPreset {
    // ========================================================================
    // Player panel
    // ========================================================================

    /// Mini bar to full screen: slide up, grow, fade in, blur the backdrop in
    pub fn player_expand(config: &MotionConfig) -> Result<Recipe> {
        let rate = config.sample_rate;
        let y = simulate(100.0, 0.0, SpringConfig::GENTLE, rate);
        let s = simulate(0.92, 1.0, SpringConfig::GENTLE, rate);
        let o = simulate(0.0, 1.0, SpringConfig::DEFAULT, rate);

        let (below, above) = EXPAND_TOLERANCE;
        let window = DurationWindow::new(config.durations.player_expand, below, above);
        Self::player_panel(&y, &s, &o, (0.0, 24.0), rate, window)
    }

    /// Full screen back to the mini bar
    pub fn player_collapse(config: &MotionConfig) -> Result<Recipe> {
        let rate = config.sample_rate;
        let y = simulate(0.0, 100.0, SpringConfig::GENTLE, rate);
        let s = simulate(1.0, 0.92, SpringConfig::GENTLE, rate);
        let o = simulate(1.0, 0.0, SpringConfig::DEFAULT, rate);

        let (below, above) = COLLAPSE_TOLERANCE;
        let window = DurationWindow::new(config.durations.player_collapse, below, above);
        Self::player_panel(&y, &s, &o, (24.0, 0.0), rate, window)
    }

    fn player_panel(
        y: &Trajectory,
        s: &Trajectory,
        o: &Trajectory,
        (blur_from, blur_to): (f64, f64),
        sample_rate: f64,
        window: DurationWindow,
    ) -> Result<Recipe> {
        let mapper = KeyframeMapper::new()
            .channel("y", y)
            .channel("s", s)
            .channel("o", o)
            .output(Property::Transform, |f| {
                format!("translateY({}%) scale({})", f.get("y"), f.get("s")).into()
            })
            .output(Property::Opacity, |f| f.get("o").into())
            .output(Property::BackdropFilter, move |f| {
                blur(lerp(blur_from, blur_to, f.offset()))
            })
            .output(Property::WebkitBackdropFilter, move |f| {
                blur(lerp(blur_from, blur_to, f.offset()))
            });

        let duration = spring_duration_ms(mapper.max_len(), sample_rate, window);
        let keyframes = mapper.map()?;

        Ok(Recipe::new(
            keyframes,
            PlaybackOptions::new(duration).fill_mode(FillMode::Forwards),
        ))
    }

    // ========================================================================
    // Feedback
    // ========================================================================

    /// Heart pump for the like button
    ///
    /// The bouncy spring is simulated but the hand-tuned pump is what plays.
    pub fn like_bounce(config: &MotionConfig) -> Result<Recipe> {
        let discarded = simulate(1.0, 1.0, SpringConfig::BOUNCY, config.sample_rate);
        tracing::trace!(samples = discarded.len(), "like bounce spring simulated");

        let keyframes = KeyframeSequence::builder()
            .frame(transform("scale(1)"))
            .at(0.3, transform("scale(1.45)"))
            .at(0.6, transform("scale(0.9)"))
            .at(0.8, transform("scale(1.1)"))
            .at(1.0, transform("scale(1)"))
            .build()?;

        Ok(Recipe::new(
            keyframes,
            PlaybackOptions::new(480).easing(Easing::OVERSHOOT),
        ))
    }

    /// Horizontal shake for rejected input
    pub fn shake_error(config: &MotionConfig) -> Result<Recipe> {
        let discarded = simulate(0.0, 0.0, SpringConfig::WOBBLY, config.sample_rate)
            .truncated(SHAKE_SAMPLES);
        tracing::trace!(samples = discarded.len(), "shake spring simulated");

        let keyframes = KeyframeSequence::builder()
            .frame(transform("translateX(0)"))
            .at(0.1, transform("translateX(-12px)"))
            .at(0.2, transform("translateX(12px)"))
            .at(0.3, transform("translateX(-10px)"))
            .at(0.4, transform("translateX(10px)"))
            .at(0.5, transform("translateX(-6px)"))
            .at(0.6, transform("translateX(6px)"))
            .at(0.7, transform("translateX(-3px)"))
            .at(0.8, transform("translateX(3px)"))
            .frame(transform("translateX(0)"))
            .build()?;

        Ok(Recipe::new(
            keyframes,
            PlaybackOptions::new(520).easing(Easing::EaseOut),
        ))
    }

    /// Expanding, fading ripple overlay
    pub fn ripple(duration_ms: u32) -> Result<Recipe> {
        let keyframes = KeyframeSequence::builder()
            .frame(transform("scale(0)").with_opacity(1.0))
            .frame(transform("scale(1)").with_opacity(0.0))
            .build()?;

        Ok(Recipe::new(
            keyframes,
            PlaybackOptions::new(duration_ms).easing(Easing::STANDARD),
        ))
    }

    /// Scale-and-rotate pop for count badges
    pub fn pop_in() -> Result<Recipe> {
        let keyframes = KeyframeSequence::builder()
            .frame(transform("scale(0) rotate(-15deg)").with_opacity(0.0))
            .at(0.6, transform("scale(1.2) rotate(5deg)").with_opacity(1.0))
            .frame(transform("scale(1) rotate(0)").with_opacity(1.0))
            .build()?;

        Ok(Recipe::new(
            keyframes,
            PlaybackOptions::new(360)
                .easing(Easing::OVERSHOOT)
                .fill_mode(FillMode::Forwards),
        ))
    }

    // ========================================================================
    // Loading and lists
    // ========================================================================

    /// Endless background sweep for a skeleton placeholder
    pub fn skeleton_shimmer(duration_ms: u32) -> Result<Recipe> {
        let keyframes = KeyframeSequence::builder()
            .frame(KeyframeProperties::new().with(Property::BackgroundPosition, "-200% 0"))
            .frame(KeyframeProperties::new().with(Property::BackgroundPosition, "200% 0"))
            .build()?;

        Ok(Recipe::new(
            keyframes,
            PlaybackOptions::new(duration_ms)
                .easing(Easing::EaseInOut)
                .loop_infinite(),
        ))
    }

    /// Fade, slide and unblur one list entry; `index` staggers the delay
    pub fn stagger_fade_in(config: &MotionConfig, index: usize, base_delay_ms: u32) -> Result<Recipe> {
        let keyframes = KeyframeSequence::builder()
            .frame(
                transform("translateY(20px)")
                    .with_opacity(0.0)
                    .with(Property::Filter, "blur(4px)"),
            )
            .frame(
                transform("translateY(0)")
                    .with_opacity(1.0)
                    .with(Property::Filter, "blur(0px)"),
            )
            .build()?;

        let durations = &config.durations;
        let step = u32::try_from(index)
            .unwrap_or(u32::MAX)
            .saturating_mul(durations.track_stagger);

        Ok(Recipe::new(
            keyframes,
            PlaybackOptions::new(durations.track_fade_in.saturating_add(40))
                .delay(base_delay_ms.saturating_add(step))
                .easing(Easing::DECELERATE)
                .fill_mode(FillMode::Both),
        ))
    }

    // ========================================================================
    // Toasts and modals
    // ========================================================================

    /// Toast rising into view, horizontally centred
    pub fn toast_enter(config: &MotionConfig) -> Result<Recipe> {
        let rate = config.sample_rate;
        let y = simulate(-80.0, 0.0, SpringConfig::DEFAULT, rate);
        let o = simulate(0.0, 1.0, SpringConfig::DEFAULT, rate);

        let keyframes = KeyframeMapper::new()
            .channel("y", &y)
            .channel("o", &o)
            .output(Property::Transform, |f| {
                format!("translateY({}px) translateX(-50%)", f.get("y")).into()
            })
            .output(Property::Opacity, |f| f.get("o").into())
            .map()?;

        Ok(Recipe::new(
            keyframes,
            PlaybackOptions::new(config.durations.toast_enter).fill_mode(FillMode::Forwards),
        ))
    }

    pub fn toast_exit(duration_ms: u32) -> Result<Recipe> {
        let keyframes = KeyframeSequence::builder()
            .frame(transform("translateY(0) translateX(-50%)").with_opacity(1.0))
            .frame(transform("translateY(80px) translateX(-50%)").with_opacity(0.0))
            .build()?;

        Ok(Recipe::new(
            keyframes,
            PlaybackOptions::new(duration_ms)
                .easing(Easing::ACCELERATE)
                .fill_mode(FillMode::Forwards),
        ))
    }

    pub fn backdrop_open(duration_ms: u32) -> Result<Recipe> {
        Self::backdrop((0.0, 1.0), (0.0, 16.0), duration_ms, Easing::EaseOut)
    }

    pub fn backdrop_close(duration_ms: u32) -> Result<Recipe> {
        Self::backdrop((1.0, 0.0), (16.0, 0.0), duration_ms, Easing::EaseIn)
    }

    fn backdrop(
        (opacity_from, opacity_to): (f64, f64),
        (blur_from, blur_to): (f64, f64),
        duration_ms: u32,
        easing: Easing,
    ) -> Result<Recipe> {
        let keyframes = KeyframeSequence::builder()
            .frame(
                KeyframeProperties::new()
                    .with_opacity(opacity_from)
                    .with(Property::BackdropFilter, blur(blur_from)),
            )
            .frame(
                KeyframeProperties::new()
                    .with_opacity(opacity_to)
                    .with(Property::BackdropFilter, blur(blur_to)),
            )
            .build()?;

        Ok(Recipe::new(
            keyframes,
            PlaybackOptions::new(duration_ms)
                .easing(easing)
                .fill_mode(FillMode::Forwards),
        ))
    }

    /// Modal sheet scaling up from 0.85 while rising 30px
    pub fn modal_open(config: &MotionConfig) -> Result<Recipe> {
        let rate = config.sample_rate;
        let s = simulate(0.85, 1.0, SpringConfig::GENTLE, rate);
        let o = simulate(0.0, 1.0, SpringConfig::DEFAULT, rate);

        let keyframes = KeyframeMapper::new()
            .channel("s", &s)
            .channel("o", &o)
            .output(Property::Transform, |f| {
                format!("scale({}) translateY({}px)", f.get("s"), lerp(30.0, 0.0, f.offset())).into()
            })
            .output(Property::Opacity, |f| f.get("o").into())
            .map()?;

        Ok(Recipe::new(
            keyframes,
            PlaybackOptions::new(config.durations.modal_open).fill_mode(FillMode::Forwards),
        ))
    }

    pub fn modal_close(duration_ms: u32) -> Result<Recipe> {
        let keyframes = KeyframeSequence::builder()
            .frame(transform("scale(1) translateY(0)").with_opacity(1.0))
            .frame(transform("scale(0.88) translateY(20px)").with_opacity(0.0))
            .build()?;

        Ok(Recipe::new(
            keyframes,
            PlaybackOptions::new(duration_ms)
                .easing(Easing::ACCELERATE)
                .fill_mode(FillMode::Forwards),
        ))
    }

    // ========================================================================
    // Player surface
    // ========================================================================

    /// One full artwork revolution per period, forever
    pub fn album_rotation(period_ms: u32) -> Result<Recipe> {
        let keyframes = KeyframeSequence::builder()
            .frame(transform("rotate(0deg)"))
            .frame(transform("rotate(360deg)"))
            .build()?;

        Ok(Recipe::new(keyframes, PlaybackOptions::new(period_ms).loop_infinite()))
    }

    /// Settle a dragged panel back to rest from `current_transform`
    pub fn snap_back(current_transform: &str, duration_ms: u32) -> Result<Recipe> {
        let keyframes = KeyframeSequence::builder()
            .frame(transform(current_transform))
            .frame(transform("translateY(0)"))
            .build()?;

        Ok(Recipe::new(
            keyframes,
            PlaybackOptions::new(duration_ms)
                .easing(Easing::DECELERATE)
                .fill_mode(FillMode::Forwards),
        ))
    }
}
