//! Change notifications emitted by a row store.

use virtual_window_core::Signal;

use super::value::SortOrder;

/// Collection of signals emitted by a [`RowStore`](super::RowStore).
///
/// Displays connect to these to stay synchronized with the store.
///
/// # Signal Usage
///
/// - **Appends**: `rows_inserted` after rows land at the end
/// - **Sorting**: `layout_about_to_change`, then `layout_changed` once the new
///   order and its tags are in place. A display must fully reset its view on
///   `layout_changed`; every index it holds is stale.
/// - **Clearing**: `model_about_to_reset`, then `model_reset`
pub struct StoreSignals {
    /// Emitted after rows are appended.
    /// Args: (first row, last row)
    pub rows_inserted: Signal<(usize, usize)>,

    /// Emitted before a sort reorders rows.
    pub layout_about_to_change: Signal<()>,

    /// Emitted after a sort has reordered rows and re-tagged them.
    pub layout_changed: Signal<()>,

    /// Emitted after a successful sort.
    /// Args: (column, direction)
    pub sort_changed: Signal<(usize, SortOrder)>,

    /// Emitted before the store is cleared.
    pub model_about_to_reset: Signal<()>,

    /// Emitted after the store is cleared.
    pub model_reset: Signal<()>,

    /// Emitted once, when the producer is exhausted.
    /// Args: final row count
    pub populated: Signal<usize>,

    /// Emitted when a row gains or loses a tag.
    /// Args: row index
    pub tags_changed: Signal<usize>,

    /// Emitted when a column is shown or hidden.
    /// Args: (column, visible)
    pub column_visibility_changed: Signal<(usize, bool)>,
}

impl Default for StoreSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreSignals {
    /// Creates a new set of store signals.
    pub fn new() -> Self {
        Self {
            rows_inserted: Signal::new(),
            layout_about_to_change: Signal::new(),
            layout_changed: Signal::new(),
            sort_changed: Signal::new(),
            model_about_to_reset: Signal::new(),
            model_reset: Signal::new(),
            populated: Signal::new(),
            tags_changed: Signal::new(),
            column_visibility_changed: Signal::new(),
        }
    }

    /// Emits signals for a model reset.
    ///
    /// Calls the provided function between the about_to_reset and reset signals.
    pub fn emit_reset<F>(&self, reset_fn: F)
    where
        F: FnOnce(),
    {
        self.model_about_to_reset.emit(());
        reset_fn();
        self.model_reset.emit(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_store_signals_creation() {
        let signals = StoreSignals::new();
        assert_eq!(signals.rows_inserted.connection_count(), 0);
        assert_eq!(signals.layout_changed.connection_count(), 0);
    }

    #[test]
    fn test_emit_reset() {
        let signals = StoreSignals::new();
        let events = Arc::new(Mutex::new(Vec::new()));

        let about = events.clone();
        signals
            .model_about_to_reset
            .connect(move |_| about.lock().push("about"));
        let done = events.clone();
        signals.model_reset.connect(move |_| done.lock().push("done"));

        let during = events.clone();
        signals.emit_reset(|| during.lock().push("reset"));

        assert_eq!(*events.lock(), vec!["about", "reset", "done"]);
    }
}
