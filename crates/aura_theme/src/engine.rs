//! Artwork-driven theme engine
//!
//! Owns the current palette and the artwork it came from. New artwork is
//! turned into a palette from its decoded pixels or by a caller-supplied
//! extractor, then faded in through
//! a [`ColorInterpolator`]. Extraction failures are not fatal: the previous
//! theme stays.

use crate::config::ThemeConfig;
use crate::error::Result;
use crate::extract::{palette_from_pixels, DEFAULT_QUALITY};
use aura_animation::interpolator::{
    write_palette, VAR_ACCENT, VAR_GRADIENT_OPACITY, VAR_PRIMARY, VAR_SECONDARY,
};
use aura_animation::{
    ColorInterpolator, FrameScheduler, MotionConfig, Palette, StyleSink, TransitionToken,
};
use rustc_hash::FxHashMap;

/// Style variables for `palette` at the given gradient opacity
pub fn css_variables(palette: &Palette, gradient_opacity: f64) -> FxHashMap<&'static str, String> {
    let mut vars = FxHashMap::default();
    vars.insert(VAR_PRIMARY, palette.primary.to_css());
    vars.insert(VAR_SECONDARY, palette.secondary.to_css());
    vars.insert(VAR_ACCENT, palette.accent.to_css());
    vars.insert(VAR_GRADIENT_OPACITY, gradient_opacity.to_string());
    vars
}

pub struct ThemeEngine<R, S> {
    interpolator: Option<ColorInterpolator<R, S>>,
    current: Palette,
    resting: Palette,
    last_artwork: Option<String>,
    transition_ms: f64,
}

impl<R, S> ThemeEngine<R, S>
where
    R: StyleSink + Clone + Send + 'static,
    S: FrameScheduler + Clone + Send + 'static,
{
    /// Engine with the default preset and transition length
    ///
    /// Without an interpolator the engine only keeps palette bookkeeping.
    pub fn new(interpolator: Option<ColorInterpolator<R, S>>) -> Self {
        Self::with_config(interpolator, &ThemeConfig::default(), &MotionConfig::default())
    }

    pub fn with_config(
        interpolator: Option<ColorInterpolator<R, S>>,
        theme: &ThemeConfig,
        motion: &MotionConfig,
    ) -> Self {
        let resting = theme.resting_palette();
        let transition_ms = theme
            .transition_ms
            .unwrap_or(motion.durations.color_transition);
        Self {
            interpolator,
            current: resting,
            resting,
            last_artwork: None,
            transition_ms: transition_ms as f64,
        }
    }

    /// Palette the theme is at or heading towards
    pub fn current(&self) -> Palette {
        self.current
    }

    pub fn last_artwork(&self) -> Option<&str> {
        self.last_artwork.as_deref()
    }

    pub fn set_transition_ms(&mut self, duration_ms: f64) {
        self.transition_ms = duration_ms;
    }

    /// Write the current palette immediately, without a transition
    pub fn paint(&self) {
        if let Some(interpolator) = &self.interpolator {
            write_palette(interpolator.root(), &self.current, 1.0);
        }
    }

    /// Theme the app from new artwork
    ///
    /// Empty or unchanged URLs are ignored. The URL is remembered before
    /// extraction, so a failing artwork is not retried. Returns whether a
    /// palette transition started.
    pub fn apply_artwork<F>(&mut self, url: &str, extract: F) -> bool
    where
        F: FnOnce(&str) -> Result<Palette>,
    {
        if url.is_empty() || self.last_artwork.as_deref() == Some(url) {
            return false;
        }
        self.last_artwork = Some(url.to_string());

        match extract(url) {
            Ok(palette) => {
                tracing::debug!(url, accent = %palette.accent, "theming from artwork");
                self.set_palette(palette);
                true
            }
            Err(err) => {
                tracing::warn!(url, %err, "palette extraction failed, keeping previous theme");
                false
            }
        }
    }

    /// Theme the app from decoded artwork pixels (RGBA8)
    ///
    /// The dominant color becomes the accent over the resting palette's base
    /// colors. Same URL rules as [`Self::apply_artwork`].
    pub fn apply_artwork_pixels(&mut self, url: &str, rgba: &[u8]) -> bool {
        let base = self.resting;
        self.apply_artwork(url, |_| Ok(palette_from_pixels(base, rgba, DEFAULT_QUALITY)))
    }

    /// Transition to `palette` from wherever the theme is now
    pub fn set_palette(&mut self, palette: Palette) -> Option<TransitionToken> {
        let from = self.current;
        self.current = palette;
        self.interpolator
            .as_ref()
            .map(|interpolator| interpolator.transition(from, palette, self.transition_ms))
    }

    /// Return to the resting palette and forget the last artwork
    pub fn reset(&mut self) -> Option<TransitionToken> {
        self.last_artwork = None;
        tracing::debug!("resetting theme");
        self.set_palette(self.resting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ThemeError;
    use aura_animation::{ManualFrameClock, MemoryElement, Rect, Rgb};

    type Engine = ThemeEngine<MemoryElement, ManualFrameClock>;

    fn accent(hex: &str) -> Palette {
        let base = crate::ThemePreset::Midnight.palette();
        Palette::new(base.primary, base.secondary, Rgb::from_hex_or_fallback(hex))
    }

    #[test]
    fn test_bookkeeping_without_root() {
        let mut engine = Engine::new(None);
        assert!(engine.apply_artwork("a.jpg", |_| Ok(accent("#00ff00"))));
        assert_eq!(engine.current(), accent("#00ff00"));
        assert_eq!(engine.last_artwork(), Some("a.jpg"));

        assert!(engine.reset().is_none());
        assert_eq!(engine.current(), crate::ThemePreset::Midnight.palette());
        assert_eq!(engine.last_artwork(), None);
    }

    #[test]
    fn test_unchanged_and_empty_urls_are_ignored() {
        let mut engine = Engine::new(None);
        assert!(!engine.apply_artwork("", |_| panic!("not called")));
        assert!(engine.apply_artwork("a.jpg", |_| Ok(accent("#00ff00"))));
        assert!(!engine.apply_artwork("a.jpg", |_| panic!("not called")));
    }

    #[test]
    fn test_failed_extraction_keeps_theme_and_url() {
        let mut engine = Engine::new(None);
        let before = engine.current();

        let started = engine.apply_artwork("broken.jpg", |_| {
            Err(ThemeError::Extraction("tainted canvas".into()))
        });
        assert!(!started);
        assert_eq!(engine.current(), before);
        assert_eq!(engine.last_artwork(), Some("broken.jpg"));
    }

    #[test]
    fn test_css_variables() {
        let vars = css_variables(&crate::ThemePreset::Midnight.palette(), 1.0);
        assert_eq!(vars[VAR_PRIMARY], "rgb(26, 26, 46)");
        assert_eq!(vars[VAR_SECONDARY], "rgb(22, 33, 62)");
        assert_eq!(vars[VAR_ACCENT], "rgb(233, 69, 96)");
        assert_eq!(vars[VAR_GRADIENT_OPACITY], "1");
    }

    #[test]
    fn test_paint_writes_current_palette() {
        let root = MemoryElement::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        let engine = Engine::new(Some(ColorInterpolator::new(root.clone(), ManualFrameClock::new())));
        engine.paint();
        assert_eq!(root.style(VAR_ACCENT).as_deref(), Some("rgb(233, 69, 96)"));
    }
}
