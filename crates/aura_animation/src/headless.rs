//! Headless playback backend
//!
//! Implements [`Playback`] without a rendering surface: timelines live in a
//! slot map and advance when the host calls [`HeadlessPlayback::tick`]. Each
//! tick samples the keyframes and writes the values to the target element.

use crate::completion::Completion;
use crate::error::MotionError;
use crate::keyframe::KeyframeSequence;
use crate::playback::{AnimationHandle, PlayDirection, PlayState, Playback, PlaybackOptions};
use crate::surface::Element;
use slotmap::{new_key_type, SlotMap};
use std::sync::{Arc, Mutex, Weak};

new_key_type! {
    pub struct PlaybackId;
}

struct ActiveAnimation<E> {
    target: E,
    keyframes: KeyframeSequence,
    options: PlaybackOptions,
    /// Milliseconds into the current iteration (negative during the delay)
    current_time: f64,
    current_iteration: i32,
    reversed: bool,
    state: PlayState,
    completion: Completion,
}

impl<E: Element> ActiveAnimation<E> {
    /// Write the keyframes sampled at iteration progress `progress`
    fn apply(&self, progress: f64) {
        let directed = if self.reversed { 1.0 - progress } else { progress };
        let eased = self.options.easing.apply(directed);
        for property in self.keyframes.properties() {
            if let Some(value) = self.keyframes.sample(property, eased) {
                self.target
                    .set_style(property.css_name(), &value.to_string());
            }
        }
    }

    fn clear(&self) {
        for property in self.keyframes.properties() {
            self.target.clear_style(property.css_name());
        }
    }

    fn progress(&self) -> f64 {
        if self.options.duration_ms == 0 {
            return 1.0;
        }
        (self.current_time / self.options.duration_ms as f64).clamp(0.0, 1.0)
    }

    /// Advance by `dt_ms`; returns true once the final iteration is done
    fn advance(&mut self, dt_ms: f64) -> bool {
        self.current_time += dt_ms;

        if self.current_time < 0.0 {
            if self.options.fill_mode.fills_backwards() {
                self.apply(0.0);
            }
            return false;
        }

        let duration = self.options.duration_ms as f64;
        while self.current_time >= duration {
            self.current_iteration += 1;

            let more = self.options.is_infinite() || self.current_iteration < self.options.iterations;
            if !more || duration <= 0.0 {
                self.current_time = duration;
                return true;
            }

            self.current_time -= duration;
            if self.options.direction == PlayDirection::Alternate {
                self.reversed = !self.reversed;
            }
        }

        self.apply(self.progress());
        false
    }

    fn finish(&mut self) {
        self.state = PlayState::Finished;
        if self.options.fill_mode.fills_forwards() {
            self.apply(1.0);
        } else {
            self.clear();
        }
    }
}

struct HeadlessInner<E> {
    animations: SlotMap<PlaybackId, ActiveAnimation<E>>,
}

/// An in-process playback backend driven by explicit ticks
pub struct HeadlessPlayback<E> {
    inner: Arc<Mutex<HeadlessInner<E>>>,
}

impl<E> Clone for HeadlessPlayback<E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<E: Element> Default for HeadlessPlayback<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Element> HeadlessPlayback<E> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HeadlessInner {
                animations: SlotMap::with_key(),
            })),
        }
    }

    /// Advance every running timeline by `dt_ms` milliseconds
    ///
    /// Returns true while any timeline is still running or paused.
    pub fn tick(&self, dt_ms: f64) -> bool {
        let (finished, still_active) = {
            let mut inner = self.inner.lock().unwrap();

            let mut done = Vec::new();
            for (id, animation) in inner.animations.iter_mut() {
                if animation.state != PlayState::Running {
                    continue;
                }
                if animation.advance(dt_ms) {
                    animation.finish();
                    done.push(id);
                }
            }

            let completions: Vec<Completion> = done
                .into_iter()
                .filter_map(|id| inner.animations.remove(id))
                .map(|animation| animation.completion)
                .collect();

            tracing::trace!(
                dt_ms,
                finished = completions.len(),
                active = inner.animations.len(),
                "headless playback tick"
            );

            (completions, !inner.animations.is_empty())
        };

        // Settle outside the lock; callbacks may start new playbacks
        for completion in finished {
            completion.resolve();
        }
        still_active
    }

    /// Number of running or paused timelines
    pub fn active_count(&self) -> usize {
        self.inner.lock().unwrap().animations.len()
    }

    /// Abort every timeline as a backend failure; completions reject
    pub fn abort_all(&self, reason: &str) {
        let aborted: Vec<ActiveAnimation<E>> = {
            let mut inner = self.inner.lock().unwrap();
            inner.animations.drain().map(|(_, a)| a).collect()
        };
        if !aborted.is_empty() {
            tracing::warn!(count = aborted.len(), reason, "aborting headless playbacks");
        }
        for animation in aborted {
            animation.clear();
            animation
                .completion
                .reject(MotionError::Playback(reason.to_string()));
        }
    }
}

impl<E: Element> Playback for HeadlessPlayback<E> {
    type Target = E;
    type Handle = HeadlessHandle<E>;

    fn play(&self, target: &E, keyframes: KeyframeSequence, options: PlaybackOptions) -> Self::Handle {
        let completion = Completion::new();
        let animation = ActiveAnimation {
            target: target.clone(),
            keyframes: keyframes.clone(),
            options,
            current_time: -(options.delay_ms as f64),
            current_iteration: 0,
            reversed: options.direction == PlayDirection::Reverse,
            state: PlayState::Running,
            completion: completion.clone(),
        };

        if options.delay_ms == 0 {
            animation.apply(0.0);
        } else if options.fill_mode.fills_backwards() {
            animation.apply(0.0);
        }

        let id = self.inner.lock().unwrap().animations.insert(animation);
        tracing::trace!(
            ?id,
            duration_ms = options.duration_ms,
            keyframes = keyframes.len(),
            "headless playback started"
        );

        HeadlessHandle {
            id,
            player: Arc::downgrade(&self.inner),
            keyframes,
            options,
            completion,
        }
    }
}

/// Handle to a timeline in a [`HeadlessPlayback`]
pub struct HeadlessHandle<E> {
    id: PlaybackId,
    player: Weak<Mutex<HeadlessInner<E>>>,
    keyframes: KeyframeSequence,
    options: PlaybackOptions,
    completion: Completion,
}

impl<E> HeadlessHandle<E> {
    pub fn id(&self) -> PlaybackId {
        self.id
    }

    /// Keyframes this playback was started with
    pub fn keyframes(&self) -> &KeyframeSequence {
        &self.keyframes
    }

    /// Options this playback was started with
    pub fn options(&self) -> &PlaybackOptions {
        &self.options
    }

    fn set_state(&self, from: PlayState, to: PlayState) {
        if let Some(player) = self.player.upgrade() {
            let mut inner = player.lock().unwrap();
            if let Some(animation) = inner.animations.get_mut(self.id) {
                if animation.state == from {
                    animation.state = to;
                }
            }
        }
    }
}

impl<E: Element> AnimationHandle for HeadlessHandle<E> {
    fn pause(&self) {
        self.set_state(PlayState::Running, PlayState::Paused);
    }

    fn resume(&self) {
        self.set_state(PlayState::Paused, PlayState::Running);
    }

    fn cancel(&self) {
        let removed = self
            .player
            .upgrade()
            .and_then(|player| player.lock().unwrap().animations.remove(self.id));
        if let Some(animation) = removed {
            animation.clear();
        }
        self.completion.reject(MotionError::Cancelled);
    }

    fn play_state(&self) -> PlayState {
        if let Some(player) = self.player.upgrade() {
            if let Some(animation) = player.lock().unwrap().animations.get(self.id) {
                return animation.state;
            }
        }
        match self.completion.outcome() {
            Some(Ok(())) => PlayState::Finished,
            _ => PlayState::Cancelled,
        }
    }

    fn finished(&self) -> Completion {
        self.completion.clone()
    }
}
