//! Signal dispatcher for the Ember hub
//!
//! Platforms connect callbacks to named signals (e.g. the vendor discovery
//! signal) and receive every payload sent on that signal until they release
//! their [`Subscription`]. Callbacks run synchronously on the sender's
//! thread, in registration order, each invocation handled to completion
//! before the next signal is processed.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// A unique identifier for a connected listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Dispatcher for named signals carrying payloads of type `T`.
pub struct Dispatcher<T> {
    /// Connected listeners per signal, in registration order
    listeners: DashMap<String, Vec<(ListenerId, Callback<T>)>>,
    /// Counter for generating unique listener IDs
    next_listener_id: AtomicU64,
}

impl<T> Dispatcher<T> {
    pub fn new() -> Self {
        Self {
            listeners: DashMap::new(),
            next_listener_id: AtomicU64::new(1),
        }
    }

    /// Connect a callback to a signal.
    ///
    /// The returned [`Subscription`] is the cancellation handle: dropping it
    /// (or calling [`Subscription::unsubscribe`]) disconnects the callback,
    /// after which it is never invoked again.
    pub fn connect(
        self: &Arc<Self>,
        signal: impl Into<String>,
        callback: impl Fn(&T) + Send + Sync + 'static,
    ) -> Subscription<T> {
        let signal = signal.into();
        let id = ListenerId(self.next_listener_id.fetch_add(1, Ordering::SeqCst));
        trace!(signal = %signal, ?id, "Connecting signal listener");

        self.listeners
            .entry(signal.clone())
            .or_default()
            .push((id, Arc::new(callback)));

        Subscription {
            dispatcher: Arc::clone(self),
            signal,
            id,
        }
    }

    /// Send a payload to every listener connected to `signal`.
    ///
    /// Listeners are invoked synchronously; a signal with no listeners is a
    /// no-op.
    pub fn send(&self, signal: &str, payload: &T) {
        // Snapshot the callbacks so a listener may connect or unsubscribe
        // from within its own invocation without deadlocking the registry.
        let callbacks: Vec<Callback<T>> = match self.listeners.get(signal) {
            Some(entry) => entry.iter().map(|(_, cb)| Arc::clone(cb)).collect(),
            None => return,
        };

        debug!(signal = %signal, listeners = callbacks.len(), "Dispatching signal");
        for callback in callbacks {
            callback(payload);
        }
    }

    /// Number of listeners currently connected to a signal.
    pub fn listener_count(&self, signal: &str) -> usize {
        self.listeners.get(signal).map_or(0, |entry| entry.len())
    }

    fn disconnect(&self, signal: &str, id: ListenerId) {
        if let Some(mut entry) = self.listeners.get_mut(signal) {
            entry.retain(|(listener_id, _)| *listener_id != id);
            trace!(signal = %signal, ?id, "Disconnected signal listener");
        }
    }
}

impl<T> Default for Dispatcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancellation handle for a connected listener.
///
/// The listener stays connected for the lifetime of this handle.
pub struct Subscription<T> {
    dispatcher: Arc<Dispatcher<T>>,
    signal: String,
    id: ListenerId,
}

impl<T> Subscription<T> {
    /// Disconnect the listener now.
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.dispatcher.disconnect(&self.signal, self.id);
    }
}
