//! Named UI transitions
//!
//! [`MotionEngine`] binds the recipes in [`crate::presets`] to elements and
//! starts them on a [`Playback`] backend. Every operation accepts an optional
//! target; an absent target is a no-op.

use crate::completion::Completion;
use crate::config::MotionConfig;
use crate::error::Result;
use crate::gesture::{drag_transform, rubber_band_offset};
use crate::playback::{AnimationHandle, Playback};
use crate::presets::{Recipe, TransitionPreset};
use crate::surface::{Element, Point, PointerInput, Rect, StyleSink};

/// Overlay color used when a ripple has none
pub const DEFAULT_RIPPLE_COLOR: &str = "rgba(255,255,255,0.25)";

/// Blur pixels per unit of scroll velocity
pub const SCROLL_BLUR_FACTOR: f64 = 0.08;

/// Upper bound on scroll blur, in pixels
pub const SCROLL_BLUR_MAX: f64 = 6.0;

/// Blur at or below this radius is not applied
pub const SCROLL_BLUR_THRESHOLD: f64 = 0.5;

/// Placement of a ripple overlay relative to its container
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleGeometry {
    /// Diameter of the overlay
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

/// Overlay geometry for a press at `local` inside a container of `bounds`
///
/// The overlay is twice the container's longer side so it covers every
/// corner, and is centred on the press.
pub fn ripple_geometry(bounds: Rect, local: Point) -> RippleGeometry {
    let size = bounds.width.max(bounds.height) * 2.0;
    RippleGeometry {
        size,
        left: local.x - size / 2.0,
        top: local.y - size / 2.0,
    }
}

/// Blur radius for a scroll velocity in pixels per frame
pub fn scroll_blur_radius(velocity: f64) -> f64 {
    (velocity.abs() * SCROLL_BLUR_FACTOR).clamp(0.0, SCROLL_BLUR_MAX)
}

/// Handles for the two halves of a modal opening
#[derive(Debug)]
pub struct ModalHandles<H> {
    pub backdrop: Option<H>,
    pub modal: Option<H>,
}

/// Starts named transitions on a playback backend
pub struct MotionEngine<P: Playback> {
    playback: P,
    config: MotionConfig,
}

impl<P: Playback> MotionEngine<P> {
    pub fn new(playback: P) -> Self {
        Self::with_config(playback, MotionConfig::default())
    }

    pub fn with_config(playback: P, config: MotionConfig) -> Self {
        Self { playback, config }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn playback(&self) -> &P {
        &self.playback
    }

    fn start(&self, name: &'static str, target: &P::Target, recipe: Result<Recipe>) -> Option<P::Handle> {
        match recipe {
            Ok(recipe) => {
                tracing::debug!(
                    transition = name,
                    duration_ms = recipe.options.duration_ms,
                    keyframes = recipe.keyframes.len(),
                    "starting transition"
                );
                Some(self.playback.play(target, recipe.keyframes, recipe.options))
            }
            Err(err) => {
                tracing::warn!(transition = name, %err, "transition recipe rejected");
                None
            }
        }
    }

    // ========================================================================
    // Player panel
    // ========================================================================

    pub fn expand_player(&self, element: Option<&P::Target>) -> Option<P::Handle> {
        let element = element?;
        self.start("expand_player", element, TransitionPreset::player_expand(&self.config))
    }

    pub fn collapse_player(&self, element: Option<&P::Target>) -> Option<P::Handle> {
        let element = element?;
        self.start("collapse_player", element, TransitionPreset::player_collapse(&self.config))
    }

    /// Move the panel with a downward drag of `delta` pixels
    ///
    /// Drags outside the rubber-band range leave the panel where it is.
    pub fn follow_drag(&self, element: Option<&P::Target>, delta: f64) {
        let Some(element) = element else { return };
        if let Some(offset) = rubber_band_offset(delta) {
            element.set_style("transform", &drag_transform(offset));
        }
    }

    /// Return a dragged panel to rest from wherever it was left
    pub fn snap_back(&self, element: Option<&P::Target>) -> Option<P::Handle> {
        let element = element?;
        let current = element
            .computed_style("transform")
            .unwrap_or_else(|| "translateY(0)".to_string());
        self.start(
            "snap_back",
            element,
            TransitionPreset::snap_back(&current, self.config.durations.snap_back),
        )
    }

    // ========================================================================
    // Feedback
    // ========================================================================

    pub fn like_bounce(&self, element: Option<&P::Target>) -> Option<P::Handle> {
        let element = element?;
        self.start("like_bounce", element, TransitionPreset::like_bounce(&self.config))
    }

    pub fn shake_error(&self, element: Option<&P::Target>) -> Option<P::Handle> {
        let element = element?;
        self.start("shake_error", element, TransitionPreset::shake_error(&self.config))
    }

    pub fn pop_in(&self, element: Option<&P::Target>) -> Option<P::Handle> {
        let element = element?;
        self.start("pop_in", element, TransitionPreset::pop_in())
    }

    /// Spawn a ripple overlay at the press position
    ///
    /// The container is made a positioning context with hidden overflow. The
    /// overlay removes itself once its playback settles.
    pub fn ripple(
        &self,
        element: Option<&P::Target>,
        pointer: &PointerInput,
        color: Option<&str>,
    ) -> Option<P::Handle> {
        let container = element?;
        let press = pointer.position()?;

        let bounds = container.bounds();
        let geometry = ripple_geometry(bounds, bounds.to_local(press));
        let color = color.unwrap_or(DEFAULT_RIPPLE_COLOR);

        let positioned = container
            .computed_style("position")
            .is_some_and(|position| position != "static");
        if !positioned {
            container.set_style("position", "relative");
        }
        container.set_style("overflow", "hidden");

        let overlay = container.spawn_overlay(&[
            ("position", "absolute".to_string()),
            ("left", format!("{}px", geometry.left)),
            ("top", format!("{}px", geometry.top)),
            ("width", format!("{}px", geometry.size)),
            ("height", format!("{}px", geometry.size)),
            ("background", color.to_string()),
            ("border-radius", "50%".to_string()),
            ("pointer-events", "none".to_string()),
            ("z-index", "999".to_string()),
        ]);

        let handle = self.start(
            "ripple",
            &overlay,
            TransitionPreset::ripple(self.config.durations.ripple),
        );
        match &handle {
            Some(handle) => {
                let overlay = overlay.clone();
                handle.finished().on_settle(move |_| {
                    if let Err(err) = overlay.detach() {
                        tracing::warn!(%err, "failed to remove ripple overlay");
                    }
                });
            }
            None => {
                if let Err(err) = overlay.detach() {
                    tracing::warn!(%err, "failed to remove ripple overlay");
                }
            }
        }
        handle
    }

    // ========================================================================
    // Loading and lists
    // ========================================================================

    /// One endless shimmer per skeleton element
    pub fn start_skeleton_shimmer(&self, elements: &[P::Target]) -> Vec<P::Handle> {
        elements
            .iter()
            .filter_map(|element| {
                self.start(
                    "skeleton_shimmer",
                    element,
                    TransitionPreset::skeleton_shimmer(self.config.durations.skeleton_pulse),
                )
            })
            .collect()
    }

    /// Fade list entries in one after another, starting after `base_delay_ms`
    pub fn stagger_fade_in(&self, elements: &[P::Target], base_delay_ms: u32) -> Vec<P::Handle> {
        elements
            .iter()
            .enumerate()
            .filter_map(|(index, element)| {
                self.start(
                    "stagger_fade_in",
                    element,
                    TransitionPreset::stagger_fade_in(&self.config, index, base_delay_ms),
                )
            })
            .collect()
    }

    /// Blur an element in proportion to scroll speed
    pub fn apply_scroll_blur(&self, element: Option<&P::Target>, velocity: f64) {
        let Some(element) = element else { return };
        let radius = scroll_blur_radius(velocity);
        if radius > SCROLL_BLUR_THRESHOLD {
            element.set_style("filter", &format!("blur({radius:.1}px)"));
        } else {
            element.clear_style("filter");
        }
    }

    // ========================================================================
    // Toasts and modals
    // ========================================================================

    pub fn toast_enter(&self, element: Option<&P::Target>) -> Option<P::Handle> {
        let element = element?;
        self.start("toast_enter", element, TransitionPreset::toast_enter(&self.config))
    }

    /// Slide a toast out; the completion settles when it has left
    pub fn toast_exit(&self, element: Option<&P::Target>) -> Completion {
        let Some(element) = element else {
            return Completion::resolved();
        };
        match TransitionPreset::toast_exit(self.config.durations.toast_exit) {
            Ok(recipe) => self
                .start("toast_exit", element, Ok(recipe))
                .map(|handle| handle.finished())
                .unwrap_or_else(Completion::resolved),
            Err(err) => {
                tracing::warn!(transition = "toast_exit", %err, "transition recipe rejected");
                Completion::rejected(err)
            }
        }
    }

    /// Fade in the backdrop and spring the modal into place independently
    pub fn open_modal(
        &self,
        modal: Option<&P::Target>,
        backdrop: Option<&P::Target>,
    ) -> ModalHandles<P::Handle> {
        let backdrop = backdrop.and_then(|element| {
            self.start(
                "modal_backdrop_open",
                element,
                TransitionPreset::backdrop_open(self.config.durations.modal_open),
            )
        });
        let modal = modal.and_then(|element| {
            self.start("modal_open", element, TransitionPreset::modal_open(&self.config))
        });
        ModalHandles { backdrop, modal }
    }

    /// Close both halves; the completion settles when every started
    /// playback has finished, or rejects with the first failure
    pub fn close_modal(&self, modal: Option<&P::Target>, backdrop: Option<&P::Target>) -> Completion {
        let duration = self.config.durations.modal_close;
        let mut finished = Vec::with_capacity(2);

        if let Some(element) = backdrop {
            match TransitionPreset::backdrop_close(duration) {
                Ok(recipe) => finished.extend(
                    self.start("modal_backdrop_close", element, Ok(recipe))
                        .map(|h| h.finished()),
                ),
                Err(err) => finished.push(Completion::rejected(err)),
            }
        }
        if let Some(element) = modal {
            match TransitionPreset::modal_close(duration) {
                Ok(recipe) => finished.extend(
                    self.start("modal_close", element, Ok(recipe))
                        .map(|h| h.finished()),
                ),
                Err(err) => finished.push(Completion::rejected(err)),
            }
        }

        Completion::all(finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ripple_geometry_covers_container() {
        let bounds = Rect::new(10.0, 20.0, 100.0, 60.0);
        let geometry = ripple_geometry(bounds, Point::new(40.0, 30.0));
        assert_eq!(
            geometry,
            RippleGeometry {
                size: 200.0,
                left: -60.0,
                top: -70.0,
            }
        );
    }

    #[test]
    fn test_scroll_blur_radius_is_clamped() {
        assert_eq!(scroll_blur_radius(0.0), 0.0);
        assert_eq!(scroll_blur_radius(-50.0), 4.0);
        assert_eq!(scroll_blur_radius(100.0), 6.0);
        assert_eq!(scroll_blur_radius(5000.0), 6.0);
    }
}
