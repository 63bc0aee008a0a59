//! Live configuration holders.
//!
//! A holder stores one value of a caller-chosen type and lets any number of
//! threads read it while others replace it. A single observer can be
//! registered to hear about every replacement.
//!
//! ```text
//!  get() ──shared lock──▶ ┌──────────────┐
//!  get() ──shared lock──▶ │ value: T     │
//!                         │ observer: cb │ ──▶ cb(&new)   (inline, lock held)
//!  update(new) ─excl.───▶ └──────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use livecfg_core::config::{self, Manager, ZeroValue};
//!
//! #[derive(Debug, Clone, Default, PartialEq, ZeroValue)]
//! struct AppConfig {
//!     secret: String,
//! }
//!
//! let conf = config::local::<AppConfig>()
//!     .watch()
//!     .init_data(AppConfig { secret: "hello world".into() });
//! assert_eq!(conf.get().secret, "hello world");
//!
//! conf.update(AppConfig { secret: "updated secret".into() }).unwrap();
//! assert_eq!(conf.get().secret, "updated secret");
//! ```
//!
//! # Observer reentrancy
//!
//! The observer runs while `update` still holds the exclusive lock. A callback
//! that calls back into the same holder deadlocks. Use
//! [`Manager::on_change_queued`] when the reaction needs the holder.

mod local;
mod observer;
mod remote;
mod zero;

use std::any::type_name;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use crate::errorx::Result;

pub use livecfg_macros::ZeroValue;
pub use local::LocalManager;
pub use observer::{CancelHandle, Observer};
pub use remote::{CODE_REMOTE_UNIMPLEMENTED, remote};
pub use zero::ZeroValue;

/// Shared handle to a holder.
pub type SharedManager<T> = Arc<dyn Manager<T>>;

/// The capability set of a live configuration holder.
///
/// Implementations must be safe to share across threads. `update` reports
/// failures through [`Error`](crate::errorx::Error); an implementation backed
/// by an external store must return its errors unchanged rather than
/// swallow them.
pub trait Manager<T>: Send + Sync
where
    T: Clone + Send + Sync + 'static,
{
    /// Returns a copy of the current value.
    fn get(&self) -> T;

    /// Replaces the value and notifies the observer, if any.
    ///
    /// The observer runs synchronously, before this call returns.
    fn update(&self, value: T) -> Result<()>;

    /// Registers `callback` as the only observer, replacing any previous one.
    fn on_change(&self, callback: Observer<T>) -> CancelHandle;

    /// Returns a handle to this same holder, for callers that want live updates.
    fn watch(self: Arc<Self>) -> SharedManager<T>;

    /// Stores `initial` if the current value is empty, and returns the holder.
    ///
    /// The check and the store happen under one exclusive lock. The observer
    /// is not notified.
    fn init_data(self: Arc<Self>, initial: T) -> SharedManager<T>;

    /// Registers an observer that forwards every new value into a bounded queue.
    ///
    /// The returned receiver may call back into the holder freely. When the
    /// queue is full or the receiver is gone the value is dropped and a warning
    /// is logged. A `capacity` of zero is treated as one.
    fn on_change_queued(&self, capacity: usize) -> (mpsc::Receiver<T>, CancelHandle) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let cancel = self.on_change(Box::new(move |value: &T| {
            if let Err(err) = tx.try_send(value.clone()) {
                warn!(
                    value_type = type_name::<T>(),
                    error = %err,
                    "Dropped queued change notification"
                );
            }
        }));
        (rx, cancel)
    }
}

/// Closure-friendly helpers for any [`Manager`].
pub trait ManagerExt<T>: Manager<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Registers a closure as the observer. See [`Manager::on_change`].
    fn observe<F>(&self, callback: F) -> CancelHandle
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.on_change(Box::new(callback))
    }
}

impl<T, M> ManagerExt<T> for M
where
    T: Clone + Send + Sync + 'static,
    M: Manager<T> + ?Sized,
{
}

/// Creates an empty in-memory holder.
pub fn local<T>() -> SharedManager<T>
where
    T: Clone + Default + ZeroValue + Send + Sync + 'static,
{
    Arc::new(LocalManager::new())
}
