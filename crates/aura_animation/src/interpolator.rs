//! Continuous palette interpolation
//!
//! Theme colors are not animated through keyframes: the interpolator runs
//! its own frame loop and writes the palette into style variables on a root
//! sink every frame.
//!
//! Each call to [`ColorInterpolator::transition`] takes a new generation. A
//! frame belonging to an older generation stops without writing, so the
//! latest transition on a root always wins.

use crate::color::Palette;
use crate::easing::ease_in_out_sine;
use crate::frame::FrameScheduler;
use crate::surface::StyleSink;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub const VAR_PRIMARY: &str = "--color-primary";
pub const VAR_SECONDARY: &str = "--color-secondary";
pub const VAR_ACCENT: &str = "--color-accent";
pub const VAR_GRADIENT_OPACITY: &str = "--gradient-opacity";

/// Interpolated state at one instant
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaletteSample {
    /// Linear progress in [0, 1]
    pub t: f64,
    /// Sine-eased progress in [0, 1]
    pub eased: f64,
    pub palette: Palette,
}

impl PaletteSample {
    pub fn gradient_opacity(&self) -> f64 {
        self.eased
    }
}

/// A palette transition in flight
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaletteTransition {
    pub from: Palette,
    pub to: Palette,
    pub start_ms: f64,
    pub duration_ms: f64,
}

impl PaletteTransition {
    pub fn new(from: Palette, to: Palette, start_ms: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
        }
    }

    /// Sample the transition at `now_ms`
    ///
    /// A non-positive duration is complete immediately. At completion the
    /// palette is exactly `to`.
    pub fn sample(&self, now_ms: f64) -> PaletteSample {
        let t = if self.duration_ms <= 0.0 {
            1.0
        } else {
            ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
        };

        if t >= 1.0 {
            return PaletteSample {
                t: 1.0,
                eased: 1.0,
                palette: self.to,
            };
        }

        let eased = ease_in_out_sine(t);
        PaletteSample {
            t,
            eased,
            palette: self.from.lerp(&self.to, eased),
        }
    }

    pub fn is_complete(&self, now_ms: f64) -> bool {
        self.sample(now_ms).t >= 1.0
    }
}

/// Write a palette and gradient opacity into style variables
pub fn write_palette<R: StyleSink + ?Sized>(root: &R, palette: &Palette, gradient_opacity: f64) {
    root.set_style(VAR_PRIMARY, &palette.primary.to_css());
    root.set_style(VAR_SECONDARY, &palette.secondary.to_css());
    root.set_style(VAR_ACCENT, &palette.accent.to_css());
    root.set_style(VAR_GRADIENT_OPACITY, &gradient_opacity.to_string());
}

/// Identifies one call to [`ColorInterpolator::transition`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransitionToken(u64);

/// Drives palette transitions on one root
pub struct ColorInterpolator<R, S> {
    root: R,
    scheduler: S,
    generation: Arc<AtomicU64>,
}

impl<R: Clone, S: Clone> Clone for ColorInterpolator<R, S> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            scheduler: self.scheduler.clone(),
            generation: self.generation.clone(),
        }
    }
}

impl<R, S> ColorInterpolator<R, S>
where
    R: StyleSink + Clone + Send + 'static,
    S: FrameScheduler + Clone + Send + 'static,
{
    pub fn new(root: R, scheduler: S) -> Self {
        Self {
            root,
            scheduler,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn root(&self) -> &R {
        &self.root
    }

    /// Start interpolating from `from` to `to`, superseding any earlier
    /// transition on this root
    pub fn transition(&self, from: Palette, to: Palette, duration_ms: f64) -> TransitionToken {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let state = PaletteTransition::new(from, to, self.scheduler.now(), duration_ms);

        tracing::debug!(
            generation = token,
            duration_ms,
            from = %from.primary,
            to = %to.primary,
            "palette transition started"
        );

        schedule(
            self.root.clone(),
            self.scheduler.clone(),
            self.generation.clone(),
            token,
            state,
        );
        TransitionToken(token)
    }

    /// Whether `token` belongs to the most recent transition
    pub fn is_current(&self, token: TransitionToken) -> bool {
        self.generation.load(Ordering::SeqCst) == token.0
    }
}

fn schedule<R, S>(root: R, scheduler: S, generation: Arc<AtomicU64>, token: u64, state: PaletteTransition)
where
    R: StyleSink + Clone + Send + 'static,
    S: FrameScheduler + Clone + Send + 'static,
{
    let next = scheduler.clone();
    scheduler.request_frame(Box::new(move |now| {
        if generation.load(Ordering::SeqCst) != token {
            tracing::trace!(generation = token, "palette transition superseded");
            return;
        }

        let sample = state.sample(now);
        write_palette(&root, &sample.palette, sample.gradient_opacity());
        tracing::trace!(generation = token, t = sample.t, "palette frame");

        if sample.t < 1.0 {
            schedule(root, next, generation, token, state);
        } else {
            tracing::debug!(generation = token, "palette transition complete");
        }
    }));
}
