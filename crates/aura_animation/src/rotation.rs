//! Album artwork rotation
//!
//! The now-playing artwork spins slowly while audio plays. Only one rotation
//! may ever be driven, so the controller owns the single handle and reuses it
//! across play/pause toggles instead of starting a fresh playback each time.

use crate::config::MotionConfig;
use crate::playback::{AnimationHandle, PlayState, Playback};
use crate::presets::TransitionPreset;

/// Owns the single artwork rotation playback
pub struct RotationController<H> {
    handle: Option<H>,
    period_ms: u32,
}

impl<H: AnimationHandle> RotationController<H> {
    pub fn new(period_ms: u32) -> Self {
        Self {
            handle: None,
            period_ms,
        }
    }

    pub fn from_config(config: &MotionConfig) -> Self {
        Self::new(config.durations.rotation_period)
    }

    /// The current rotation, if one was ever started
    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    /// Reflect the playing state on `image`
    ///
    /// Pausing keeps the rotation where it is. Playing resumes a paused
    /// rotation, keeps a running one, and only starts a new playback when
    /// there is none or the last one ended.
    pub fn set_playing<P>(&mut self, playback: &P, image: Option<&P::Target>, is_playing: bool) -> Option<&H>
    where
        P: Playback<Handle = H>,
    {
        let image = image?;

        if !is_playing {
            if let Some(handle) = &self.handle {
                handle.pause();
                tracing::debug!("artwork rotation paused");
            }
            return self.handle.as_ref();
        }

        match self.handle.as_ref().map(|h| h.play_state()) {
            Some(PlayState::Paused) => {
                if let Some(handle) = &self.handle {
                    handle.resume();
                }
                tracing::debug!("artwork rotation resumed");
            }
            Some(PlayState::Running) => {}
            Some(PlayState::Finished) | Some(PlayState::Cancelled) | None => {
                match TransitionPreset::album_rotation(self.period_ms) {
                    Ok(recipe) => {
                        self.handle = Some(playback.play(image, recipe.keyframes, recipe.options));
                        tracing::debug!(period_ms = self.period_ms, "artwork rotation started");
                    }
                    Err(err) => {
                        tracing::warn!(%err, "artwork rotation recipe rejected");
                    }
                }
            }
        }
        self.handle.as_ref()
    }

    /// Cancel and forget the rotation
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
            tracing::debug!("artwork rotation stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessPlayback;
    use crate::surface::{MemoryElement, Rect};

    fn setup() -> (HeadlessPlayback<MemoryElement>, MemoryElement) {
        (
            HeadlessPlayback::new(),
            MemoryElement::new(Rect::new(0.0, 0.0, 300.0, 300.0)),
        )
    }

    #[test]
    fn test_absent_image_is_noop() {
        let (playback, _) = setup();
        let mut rotation = RotationController::new(24_000);
        assert!(rotation.set_playing(&playback, None, true).is_none());
        assert_eq!(playback.active_count(), 0);
    }

    #[test]
    fn test_pause_then_resume_reuses_handle() {
        let (playback, image) = setup();
        let mut rotation = RotationController::new(24_000);

        let id = rotation.set_playing(&playback, Some(&image), true).unwrap().id();
        playback.tick(13_000.0);
        assert_eq!(image.style("transform").as_deref(), Some("rotate(360deg)"));

        rotation.set_playing(&playback, Some(&image), false);
        assert_eq!(rotation.handle().unwrap().play_state(), PlayState::Paused);

        let resumed = rotation.set_playing(&playback, Some(&image), true).unwrap();
        assert_eq!(resumed.id(), id);
        assert_eq!(resumed.play_state(), PlayState::Running);
        assert_eq!(playback.active_count(), 1);
    }

    #[test]
    fn test_repeated_play_does_not_duplicate() {
        let (playback, image) = setup();
        let mut rotation = RotationController::new(24_000);

        for _ in 0..3 {
            rotation.set_playing(&playback, Some(&image), true);
        }
        assert_eq!(playback.active_count(), 1);
    }

    #[test]
    fn test_restarts_after_stop() {
        let (playback, image) = setup();
        let mut rotation = RotationController::new(24_000);

        rotation.set_playing(&playback, Some(&image), true);
        rotation.stop();
        assert!(rotation.handle().is_none());
        assert_eq!(playback.active_count(), 0);

        rotation.set_playing(&playback, Some(&image), true);
        assert_eq!(playback.active_count(), 1);
    }
}
