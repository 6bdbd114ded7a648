//! One-shot completion signals
//!
//! A [`Completion`] settles exactly once, either resolved or rejected. It can
//! be observed with a callback, polled, or awaited.

use crate::error::{MotionError, Result};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, Waker};

type SettleCallback = Box<dyn FnOnce(&Result<()>) + Send>;

#[derive(Default)]
struct CompletionInner {
    outcome: Option<Result<()>>,
    callbacks: Vec<SettleCallback>,
    wakers: Vec<Waker>,
}

/// Shared completion signal for a playback
#[derive(Clone, Default)]
pub struct Completion {
    inner: Arc<Mutex<CompletionInner>>,
}

impl Completion {
    /// A pending completion
    pub fn new() -> Self {
        Self::default()
    }

    /// A completion that is already resolved
    pub fn resolved() -> Self {
        let completion = Self::new();
        completion.resolve();
        completion
    }

    /// A completion that is already rejected
    pub fn rejected(error: MotionError) -> Self {
        let completion = Self::new();
        completion.reject(error);
        completion
    }

    /// Resolve; returns false if already settled
    pub fn resolve(&self) -> bool {
        self.settle(Ok(()))
    }

    /// Reject; returns false if already settled
    pub fn reject(&self, error: MotionError) -> bool {
        self.settle(Err(error))
    }

    fn settle(&self, outcome: Result<()>) -> bool {
        let (callbacks, wakers) = {
            let mut inner = self.inner.lock().unwrap();
            if inner.outcome.is_some() {
                return false;
            }
            inner.outcome = Some(outcome.clone());
            (
                std::mem::take(&mut inner.callbacks),
                std::mem::take(&mut inner.wakers),
            )
        };

        // Callbacks run outside the lock so they may chain further completions
        for callback in callbacks {
            callback(&outcome);
        }
        for waker in wakers {
            waker.wake();
        }
        true
    }

    pub fn is_settled(&self) -> bool {
        self.inner.lock().unwrap().outcome.is_some()
    }

    /// The outcome, once settled
    pub fn outcome(&self) -> Option<Result<()>> {
        self.inner.lock().unwrap().outcome.clone()
    }

    /// Run `f` once settled (immediately if already settled)
    pub fn on_settle<F>(&self, f: F)
    where
        F: FnOnce(&Result<()>) + Send + 'static,
    {
        let outcome = {
            let mut inner = self.inner.lock().unwrap();
            match &inner.outcome {
                Some(outcome) => outcome.clone(),
                None => {
                    inner.callbacks.push(Box::new(f));
                    return;
                }
            }
        };
        f(&outcome);
    }

    /// Resolves when every input resolves; rejects with the first rejection
    pub fn all(completions: impl IntoIterator<Item = Completion>) -> Completion {
        let joined = Completion::new();
        let completions: Vec<Completion> = completions.into_iter().collect();

        if completions.is_empty() {
            joined.resolve();
            return joined;
        }

        let remaining = Arc::new(Mutex::new(completions.len()));
        for completion in completions {
            let joined = joined.clone();
            let remaining = remaining.clone();
            completion.on_settle(move |outcome| match outcome {
                Ok(()) => {
                    let mut left = remaining.lock().unwrap();
                    *left -= 1;
                    if *left == 0 {
                        drop(left);
                        joined.resolve();
                    }
                }
                Err(error) => {
                    joined.reject(error.clone());
                }
            });
        }
        joined
    }
}

impl std::fmt::Debug for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completion")
            .field("outcome", &self.outcome())
            .finish()
    }
}

impl Future for Completion {
    type Output = Result<()>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut inner = self.inner.lock().unwrap();
        match &inner.outcome {
            Some(outcome) => Poll::Ready(outcome.clone()),
            None => {
                let waker = cx.waker();
                if !inner.wakers.iter().any(|w| w.will_wake(waker)) {
                    inner.wakers.push(waker.clone());
                }
                Poll::Pending
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::task::Wake;

    struct CountingWaker(AtomicUsize);

    impl Wake for CountingWaker {
        fn wake(self: Arc<Self>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_settles_exactly_once() {
        let completion = Completion::new();
        assert!(completion.resolve());
        assert!(!completion.reject(MotionError::Cancelled));
        assert_eq!(completion.outcome(), Some(Ok(())));
    }

    #[test]
    fn test_callback_runs_on_settle_and_when_late() {
        let calls = Arc::new(AtomicUsize::new(0));
        let completion = Completion::new();

        let c = calls.clone();
        completion.on_settle(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        completion.reject(MotionError::Cancelled);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let c = calls.clone();
        completion.on_settle(move |outcome| {
            assert_eq!(outcome, &Err(MotionError::Cancelled));
            c.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_all_waits_for_every_input() {
        let a = Completion::new();
        let b = Completion::new();
        let joined = Completion::all([a.clone(), b.clone()]);

        a.resolve();
        assert!(!joined.is_settled());
        b.resolve();
        assert_eq!(joined.outcome(), Some(Ok(())));
    }

    #[test]
    fn test_all_rejects_on_first_failure() {
        let a = Completion::new();
        let b = Completion::new();
        let joined = Completion::all([a.clone(), b.clone()]);

        b.reject(MotionError::Playback("bad keyframe".into()));
        assert_eq!(
            joined.outcome(),
            Some(Err(MotionError::Playback("bad keyframe".into())))
        );
        a.resolve();
        assert!(joined.outcome().unwrap().is_err());
    }

    #[test]
    fn test_all_of_nothing_is_resolved() {
        assert_eq!(Completion::all(Vec::new()).outcome(), Some(Ok(())));
    }

    #[test]
    fn test_future_wakes_on_resolve() {
        let counter = Arc::new(CountingWaker(AtomicUsize::new(0)));
        let waker = Waker::from(counter.clone());
        let mut cx = Context::from_waker(&waker);

        let mut completion = Completion::new();
        assert!(Pin::new(&mut completion).poll(&mut cx).is_pending());

        completion.clone().resolve();
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
        assert_eq!(Pin::new(&mut completion).poll(&mut cx), Poll::Ready(Ok(())));
    }

    #[test]
    fn test_repeated_polls_keep_one_waker() {
        let counter = Arc::new(CountingWaker(AtomicUsize::new(0)));
        let waker = Waker::from(counter.clone());
        let mut cx = Context::from_waker(&waker);

        let mut completion = Completion::new();
        for _ in 0..100 {
            assert!(Pin::new(&mut completion).poll(&mut cx).is_pending());
        }
        assert_eq!(completion.inner.lock().unwrap().wakers.len(), 1);

        completion.clone().resolve();
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }
}
