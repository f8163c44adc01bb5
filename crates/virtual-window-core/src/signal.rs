//! Signal/slot notifications for Virtual Window.
//!
//! A [`Signal`] is how a row store tells its display that something changed:
//! rows were appended, the layout was reordered by a sort, or the whole model
//! was reset. Displays connect slots (closures) and the store emits.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The notifier type
//! - [`ConnectionId`] - Identifier returned when connecting a slot
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//!
//! # Invocation
//!
//! The data window has exactly one logical consumer driving it through
//! synchronous calls, so every slot runs immediately on the emitting thread,
//! in connection order. Slots are snapshotted before they run, which means a
//! slot may connect to or disconnect from the signal that is invoking it.
//!
//! # Example
//!
//! ```
//! use virtual_window_core::Signal;
//!
//! let rows_inserted = Signal::<(usize, usize)>::new();
//!
//! let conn_id = rows_inserted.connect(|(first, last)| {
//!     println!("rows {first}..={last} appended");
//! });
//!
//! rows_inserted.emit((0, 9));
//! rows_inserted.disconnect(conn_id);
//! ```

use std::sync::{Arc, Weak};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe signal that can have multiple connected slots.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a tuple like `(usize, usize)` for multiple arguments.
pub struct Signal<Args> {
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots with `args`.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }

    /// Connect a slot that is disconnected automatically when the returned
    /// guard is dropped.
    ///
    /// The guard holds a weak reference, so it never keeps the signal alive
    /// and dropping it after the signal is gone is harmless.
    ///
    /// # Example
    ///
    /// ```
    /// use virtual_window_core::Signal;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use std::sync::Arc;
    ///
    /// let signal = Arc::new(Signal::<usize>::new());
    /// let total = Arc::new(AtomicUsize::new(0));
    /// {
    ///     let total = total.clone();
    ///     let _guard = signal.connect_scoped(move |&n| {
    ///         total.fetch_add(n, Ordering::SeqCst);
    ///     });
    ///     signal.emit(42);
    /// }
    /// signal.emit(43);
    /// assert_eq!(total.load(Ordering::SeqCst), 42);
    /// ```
    pub fn connect_scoped<F>(self: &Arc<Self>, slot: F) -> ConnectionGuard<Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard {
            signal: Arc::downgrade(self),
            id,
        }
    }
}

/// A connection guard that disconnects its slot when dropped.
///
/// Created via [`Signal::connect_scoped`].
pub struct ConnectionGuard<Args: 'static> {
    signal: Weak<Signal<Args>>,
    id: ConnectionId,
}

impl<Args: 'static> ConnectionGuard<Args> {
    /// The identifier of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args: 'static> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        if let Some(signal) = self.signal.upgrade() {
            signal.disconnect(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_connect_emit() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(42);
        signal.emit(100);

        assert_eq!(*received.lock(), vec![42, 100]);
    }

    #[test]
    fn test_signal_disconnect() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        let conn_id = signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(1);
        assert!(signal.disconnect(conn_id));
        assert!(!signal.disconnect(conn_id));
        signal.emit(2);

        assert_eq!(*received.lock(), vec![1]);
    }

    #[test]
    fn test_signal_blocked() {
        let signal = Signal::<()>::new();
        let count = Arc::new(Mutex::new(0));

        let count_clone = count.clone();
        signal.connect(move |_| *count_clone.lock() += 1);

        signal.set_blocked(true);
        assert!(signal.is_blocked());
        signal.emit(());
        assert_eq!(*count.lock(), 0);

        signal.set_blocked(false);
        signal.emit(());
        assert_eq!(*count.lock(), 1);
    }

    #[test]
    fn test_disconnect_all() {
        let signal = Signal::<usize>::new();
        signal.connect(|_| {});
        signal.connect(|_| {});
        assert_eq!(signal.connection_count(), 2);

        signal.disconnect_all();
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_slots_run_in_connection_order() {
        let signal = Signal::<(usize, usize)>::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = order.clone();
            signal.connect(move |(a, b)| order.lock().push((tag, *a, *b)));
        }

        signal.emit((3, 7));
        assert_eq!(
            *order.lock(),
            vec![("first", 3, 7), ("second", 3, 7), ("third", 3, 7)]
        );
    }

    #[test]
    fn test_slot_may_disconnect_itself() {
        let signal = Arc::new(Signal::<()>::new());
        let hits = Arc::new(Mutex::new(0));
        let own_id = Arc::new(Mutex::new(None));

        let weak = Arc::downgrade(&signal);
        let hits_clone = hits.clone();
        let id_clone = own_id.clone();
        let id = signal.connect(move |_| {
            *hits_clone.lock() += 1;
            if let (Some(signal), Some(id)) = (weak.upgrade(), *id_clone.lock()) {
                signal.disconnect(id);
            }
        });
        *own_id.lock() = Some(id);

        signal.emit(());
        signal.emit(());
        assert_eq!(*hits.lock(), 1);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_connection_guard() {
        let signal = Arc::new(Signal::<i32>::new());
        let received = Arc::new(Mutex::new(Vec::new()));

        {
            let received_clone = received.clone();
            let _guard = signal.connect_scoped(move |&v| received_clone.lock().push(v));
            assert_eq!(signal.connection_count(), 1);
            signal.emit(1);
        }

        assert_eq!(signal.connection_count(), 0);
        signal.emit(2);
        assert_eq!(*received.lock(), vec![1]);
    }

    #[test]
    fn test_connection_guard_outlives_signal() {
        let signal = Arc::new(Signal::<i32>::new());
        let guard = signal.connect_scoped(|_| {});
        drop(signal);
        drop(guard);
    }
}
