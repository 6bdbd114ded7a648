//! Swipe-to-dismiss helpers for the player panel

/// Drags at or beyond this distance stop following the finger
pub const RUBBER_BAND_LIMIT: f64 = 300.0;

/// Resistance exponent applied to the drag distance
pub const RUBBER_BAND_EXPONENT: f64 = 0.8;

/// Releases past this distance dismiss the panel
pub const DISMISS_THRESHOLD: f64 = 80.0;

/// Panel offset for a downward drag of `delta` pixels
///
/// Returns `None` outside the open range `(0, RUBBER_BAND_LIMIT)`, where the
/// panel should not move.
pub fn rubber_band_offset(delta: f64) -> Option<f64> {
    if delta > 0.0 && delta < RUBBER_BAND_LIMIT {
        Some(delta.powf(RUBBER_BAND_EXPONENT))
    } else {
        None
    }
}

pub fn should_dismiss(delta: f64) -> bool {
    delta > DISMISS_THRESHOLD
}

pub fn drag_transform(offset: f64) -> String {
    format!("translateY({offset}px)")
}

/// What to do when the finger lifts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeRelease {
    /// Collapse the panel
    Dismiss,
    /// Spring the panel back to rest
    SnapBack,
}

/// Tracks one vertical swipe from touch start to release
#[derive(Clone, Copy, Debug, Default)]
pub struct SwipeTracker {
    start_y: Option<f64>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, y: f64) {
        self.start_y = Some(y);
    }

    /// Distance dragged so far, zero before `begin`
    pub fn delta(&self, y: f64) -> f64 {
        self.start_y.map_or(0.0, |start| y - start)
    }

    /// Transform to apply while the finger is at `y`
    pub fn drag(&self, y: f64) -> Option<String> {
        rubber_band_offset(self.delta(y)).map(drag_transform)
    }

    /// Finish the swipe at `y`
    pub fn release(&mut self, y: f64) -> SwipeRelease {
        let delta = self.delta(y);
        self.start_y = None;
        if should_dismiss(delta) {
            SwipeRelease::Dismiss
        } else {
            SwipeRelease::SnapBack
        }
    }
}
