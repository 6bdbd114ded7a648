//! Frame scheduling
//!
//! Continuous animations that run outside the playback backend (the palette
//! interpolator) drive themselves one display frame at a time through a
//! [`FrameScheduler`].

use std::sync::{Arc, Mutex};

/// Callback invoked with the frame timestamp in milliseconds
pub type FrameCallback = Box<dyn FnOnce(f64) + Send>;

/// Source of display frames
pub trait FrameScheduler {
    /// Current time in milliseconds
    fn now(&self) -> f64;

    /// Run `callback` once on the next frame
    fn request_frame(&self, callback: FrameCallback);
}

#[derive(Default)]
struct ClockState {
    now_ms: f64,
    pending: Vec<FrameCallback>,
}

/// A simulated frame clock advanced by hand
///
/// Clones share the same clock.
#[derive(Clone, Default)]
pub struct ManualFrameClock {
    state: Arc<Mutex<ClockState>>,
}

impl ManualFrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance time by `dt_ms` and run one frame
    ///
    /// Only callbacks requested before this call run; callbacks they request
    /// wait for the next frame. Returns the number of callbacks run.
    pub fn advance(&self, dt_ms: f64) -> usize {
        let (now, callbacks) = {
            let mut state = self.state.lock().unwrap();
            state.now_ms += dt_ms;
            (state.now_ms, std::mem::take(&mut state.pending))
        };

        let count = callbacks.len();
        for callback in callbacks {
            callback(now);
        }
        count
    }

    /// Run frames of `frame_ms` until no callback is pending or `max_frames` ran
    pub fn run_until_idle(&self, frame_ms: f64, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && self.pending_frames() > 0 {
            self.advance(frame_ms);
            frames += 1;
        }
        frames
    }

    /// Callbacks waiting for the next frame
    pub fn pending_frames(&self) -> usize {
        self.state.lock().unwrap().pending.len()
    }
}

impl FrameScheduler for ManualFrameClock {
    fn now(&self) -> f64 {
        self.state.lock().unwrap().now_ms
    }

    fn request_frame(&self, callback: FrameCallback) {
        self.state.lock().unwrap().pending.push(callback);
    }
}
