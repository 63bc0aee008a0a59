//! In-memory [`Manager`] implementation.

use std::any::type_name;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::{debug, trace};

use super::observer::{CancelHandle, Observer};
use super::zero::ZeroValue;
use super::{Manager, SharedManager};
use crate::errorx::Result;

type ZeroCheck<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// A live value held in process memory.
///
/// One reader-writer lock guards both the value and the observer slot:
/// [`get`](Manager::get) takes the shared side, every other operation the
/// exclusive side. The holder is meant to be shared behind an [`Arc`]; see
/// [`local`](super::local).
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use livecfg_core::config::{LocalManager, Manager, ManagerExt};
///
/// let holder = Arc::new(LocalManager::<u32>::new());
/// let cancel = holder.observe(|port: &u32| println!("port is now {port}"));
///
/// holder.update(8080).unwrap();
/// assert_eq!(holder.get(), 8080);
/// cancel.cancel();
/// ```
pub struct LocalManager<T> {
    shared: Arc<Shared<T>>,
}

struct Shared<T> {
    state: RwLock<State<T>>,
    is_zero: ZeroCheck<T>,
}

struct State<T> {
    value: T,
    observer: Option<Registration<T>>,
    next_id: u64,
}

struct Registration<T> {
    id: u64,
    callback: Observer<T>,
}

impl<T> LocalManager<T>
where
    T: Clone + Default + ZeroValue + Send + Sync + 'static,
{
    /// Creates an empty holder, using [`ZeroValue`] for the emptiness check.
    pub fn new() -> Self {
        Self::with_zero_check(T::is_zero)
    }

    /// Creates a holder that already contains `value`.
    pub fn with_value(value: T) -> Self {
        let manager = Self::new();
        manager.shared.state.write().value = value;
        manager
    }
}

impl<T> LocalManager<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    /// Creates an empty holder with a caller-supplied emptiness check.
    ///
    /// Use this for value types that do not implement [`ZeroValue`]. The
    /// holder starts at `T::default()`.
    pub fn with_zero_check<F>(is_zero: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            shared: Arc::new(Shared {
                state: RwLock::new(State {
                    value: T::default(),
                    observer: None,
                    next_id: 0,
                }),
                is_zero: Box::new(is_zero),
            }),
        }
    }
}

impl<T> LocalManager<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Returns `true` if an observer is registered.
    pub fn has_observer(&self) -> bool {
        self.shared.state.read().observer.is_some()
    }

    /// Returns `true` while the stored value is still empty.
    pub fn is_empty(&self) -> bool {
        let state = self.shared.state.read();
        (self.shared.is_zero)(&state.value)
    }
}

impl<T> Default for LocalManager<T>
where
    T: Clone + Default + ZeroValue + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Manager<T> for LocalManager<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn get(&self) -> T {
        let state = self.shared.state.read();
        trace!(value_type = type_name::<T>(), "Reading live value");
        state.value.clone()
    }

    fn update(&self, value: T) -> Result<()> {
        let mut guard = self.shared.state.write();
        let state = &mut *guard;
        state.value = value;

        let notified = match &state.observer {
            Some(registration) => {
                (registration.callback)(&state.value);
                true
            }
            None => false,
        };

        trace!(value_type = type_name::<T>(), notified, "Live value replaced");
        Ok(())
    }

    fn on_change(&self, callback: Observer<T>) -> CancelHandle {
        let id = {
            let mut state = self.shared.state.write();
            state.next_id += 1;
            let id = state.next_id;
            let replaced = state
                .observer
                .replace(Registration { id, callback })
                .is_some();
            debug!(
                value_type = type_name::<T>(),
                observer = id,
                replaced,
                "Observer registered"
            );
            id
        };

        let shared: Weak<Shared<T>> = Arc::downgrade(&self.shared);
        CancelHandle::new(move || {
            let Some(shared) = shared.upgrade() else {
                return;
            };
            let mut state = shared.state.write();
            if state.observer.as_ref().is_some_and(|reg| reg.id == id) {
                state.observer = None;
                debug!(value_type = type_name::<T>(), observer = id, "Observer cancelled");
            }
        })
    }

    fn watch(self: Arc<Self>) -> SharedManager<T> {
        self
    }

    fn init_data(self: Arc<Self>, initial: T) -> SharedManager<T> {
        {
            let mut state = self.shared.state.write();
            if (self.shared.is_zero)(&state.value) {
                state.value = initial;
                debug!(value_type = type_name::<T>(), "Live value initialized");
            } else {
                debug!(
                    value_type = type_name::<T>(),
                    "Live value already set, initial data ignored"
                );
            }
        }
        self
    }
}

impl<T> fmt::Debug for LocalManager<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.read();
        f.debug_struct("LocalManager")
            .field("value_type", &type_name::<T>())
            .field("observer", &state.observer.as_ref().map(|reg| reg.id))
            .finish_non_exhaustive()
    }
}
