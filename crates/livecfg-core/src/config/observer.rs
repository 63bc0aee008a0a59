//! Observer callbacks and their cancellation handles.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Change callback registered with [`Manager::on_change`](super::Manager::on_change).
///
/// It runs synchronously inside `update`, while the holder's exclusive lock is
/// held. It must not call back into the same holder: `get`, `update` and
/// `on_change` would wait on the lock the caller already owns and deadlock.
/// Keep it short, or hand the value off with
/// [`Manager::on_change_queued`](super::Manager::on_change_queued).
pub type Observer<T> = Box<dyn Fn(&T) + Send + Sync>;

/// Removes a registered observer.
///
/// [`cancel`](Self::cancel) only removes the observer it was returned for; if a
/// newer observer has replaced it in the meantime, the call does nothing.
/// Cancelling is idempotent. Dropping the handle leaves the observer
/// registered.
#[derive(Clone)]
pub struct CancelHandle {
    inner: Arc<CancelInner>,
}

struct CancelInner {
    cancelled: AtomicBool,
    action: Box<dyn Fn() + Send + Sync>,
}

impl CancelHandle {
    /// Creates a handle that runs `action` on the first call to `cancel`.
    pub fn new<F>(action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(CancelInner {
                cancelled: AtomicBool::new(false),
                action: Box::new(action),
            }),
        }
    }

    /// Creates a handle whose cancellation does nothing.
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    /// Deregisters the observer if it is still the registered one.
    pub fn cancel(&self) {
        if !self.inner.cancelled.swap(true, Ordering::AcqRel) {
            (self.inner.action)();
        }
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }
}

impl fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelHandle")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_cancel_runs_action_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);
        let handle = CancelHandle::new(move || {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!handle.is_cancelled());
        handle.cancel();
        handle.cancel();
        handle.clone().cancel();

        assert!(handle.is_cancelled());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_noop_handle() {
        let handle = CancelHandle::noop();
        handle.cancel();
        assert!(handle.is_cancelled());
    }
}
