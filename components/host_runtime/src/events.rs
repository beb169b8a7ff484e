//! Event target and listener primitives
//!
//! Listener registrations carry no id, so identity is the
//! (target, event type, listener reference) triple. [`Listener`] wraps an
//! `Arc`'d callback and compares by pointer: removing with a different
//! reference than the one added must never match.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

static NEXT_TARGET_ID: AtomicU64 = AtomicU64::new(1);

/// An event callback compared by reference identity
#[derive(Clone)]
pub struct Listener(Arc<dyn Fn() + Send + Sync>);

impl Listener {
    /// Wrap a callback
    pub fn new(callback: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    /// Exact reference equality — the only valid removal match
    pub fn same(&self, other: &Listener) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Invoke the callback
    pub fn invoke(&self) {
        (self.0)()
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({:p})", Arc::as_ptr(&self.0))
    }
}

/// A host object listeners can be attached to
#[derive(Debug)]
pub struct EventTarget {
    id: u64,
    type_name: String,
    listeners: Mutex<Vec<(String, Listener)>>,
}

impl EventTarget {
    /// Create a target with the given type name (e.g. "Button", "Document")
    pub fn new(type_name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            id: NEXT_TARGET_ID.fetch_add(1, Ordering::SeqCst),
            type_name: type_name.into(),
            listeners: Mutex::new(Vec::new()),
        })
    }

    /// Unique id of this target
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Type name used for leak grouping
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub(crate) fn add(&self, event_type: &str, listener: Listener) {
        self.listeners
            .lock()
            .push((event_type.to_string(), listener));
    }

    pub(crate) fn remove(&self, event_type: &str, listener: &Listener) {
        let mut listeners = self.listeners.lock();
        if let Some(pos) = listeners
            .iter()
            .position(|(event, l)| event == event_type && l.same(listener))
        {
            listeners.remove(pos);
        }
    }

    /// Invoke every listener registered for `event_type`
    pub fn dispatch(&self, event_type: &str) {
        let to_invoke: Vec<Listener> = self
            .listeners
            .lock()
            .iter()
            .filter(|(event, _)| event == event_type)
            .map(|(_, l)| l.clone())
            .collect();
        for listener in to_invoke {
            listener.invoke();
        }
    }

    /// Number of listeners currently attached
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }
}

/// Listener registration primitive
pub type AddListenerFn = Arc<dyn Fn(&Arc<EventTarget>, &str, Listener) + Send + Sync>;

/// Listener removal primitive
pub type RemoveListenerFn = Arc<dyn Fn(&Arc<EventTarget>, &str, &Listener) + Send + Sync>;

/// The runtime's listener primitive table
#[derive(Clone)]
pub struct ListenerPrimitives {
    /// Add a listener to a target
    pub add_listener: AddListenerFn,
    /// Remove a previously added listener (reference match)
    pub remove_listener: RemoveListenerFn,
}

impl ListenerPrimitives {
    /// Original primitives dispatching straight to the target
    pub(crate) fn direct() -> Self {
        Self {
            add_listener: Arc::new(|target, event, listener| target.add(event, listener)),
            remove_listener: Arc::new(|target, event, listener| target.remove(event, listener)),
        }
    }
}

impl fmt::Debug for ListenerPrimitives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerPrimitives").finish_non_exhaustive()
    }
}
