//! Display adapter.
//!
//! [`DataWindow`] bundles a [`RowStore`] with its [`Paginator`] and exposes
//! the handful of callbacks an index-addressed display (a virtual list or
//! table view) invokes: count and cell queries on the read side, and event
//! hooks for scrolling, resizing, selection, focus and header clicks. Each
//! hook is a thin translation into store and paginator calls; the store's
//! tag table stays the only place selection and focus live.
//!
//! # Example
//!
//! ```
//! use virtual_window::{positional_columns, producer, DataWindow, WindowConfig};
//!
//! let mut window = DataWindow::new(
//!     positional_columns::<(&str, u32), _, _>(["Name", "Age"]),
//!     WindowConfig::default(),
//! )?;
//! window.populate(producer::from_iter(vec![("bo", 41), ("al", 33), ("cy", 27)]))?;
//!
//! window.on_visible_range_changed(0, 20)?;
//! window.on_row_focused(2)?;
//!
//! let outcome = window.on_column_header_activated(1)?;
//! assert_eq!(outcome.current, Some(0));
//! assert_eq!(window.get_item_text(0, 0)?, "cy");
//! # Ok::<(), virtual_window::Error>(())
//! ```

#![warn(missing_docs)]

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use virtual_window_core::logging::targets;

use crate::config::WindowConfig;
use crate::error::Result;
use crate::model::{
    Column, DisplayValue, ImageIndex, ItemState, Paginator, RowProducer, RowStore, SortOrder,
    StoreSignals, TAG_CURRENT, TAG_SELECTED,
};

/// A data window behind a single mutex, for callers that share it between
/// threads. The whole window is locked as a unit.
pub type SharedWindow<R> = Arc<Mutex<DataWindow<R>>>;

/// The row range the display last reported as visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// First visible row.
    pub top: usize,
    /// Last visible row.
    pub bottom: usize,
    /// Rows that fit on one page, once the display has reported it.
    pub page_capacity: Option<usize>,
}

/// What a display needs to restore its view after a header click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOutcome {
    /// The sorted column.
    pub column: usize,
    /// The direction it was sorted in.
    pub order: SortOrder,
    /// Indices to re-select, ascending.
    pub selected: Vec<usize>,
    /// Index to re-focus.
    pub current: Option<usize>,
    /// Row to scroll to the top so the focused row keeps its page offset.
    pub top_row: usize,
}

/// A lazily populated, sortable row cache driven by display callbacks.
pub struct DataWindow<R> {
    store: RowStore<R>,
    paginator: Paginator<R>,
    config: WindowConfig,
    viewport: Viewport,
}

impl<R: 'static> DataWindow<R> {
    /// Creates an empty window over `columns`.
    pub fn new(columns: Vec<Column<R>>, config: WindowConfig) -> Result<Self> {
        config.validate()?;
        let store = RowStore::new(columns)?;
        Ok(Self::from_store(store, config))
    }

    /// Wraps an existing store.
    ///
    /// The config is assumed valid; a zero batch size is treated as one.
    pub fn from_store(store: RowStore<R>, config: WindowConfig) -> Self {
        Self {
            paginator: Paginator::new(&config),
            store,
            config,
            viewport: Viewport::default(),
        }
    }

    /// Supplies per-row images.
    pub fn with_image_provider<F>(mut self, provider: F) -> Self
    where
        F: Fn(&R) -> ImageIndex + Send + Sync + 'static,
    {
        self.store = self.store.with_image_provider(provider);
        self
    }

    /// Moves the window behind a shared mutex.
    pub fn into_shared(self) -> SharedWindow<R> {
        Arc::new(Mutex::new(self))
    }
}

impl<R> DataWindow<R> {
    /// Attaches the row producer. Rows are pulled as the display asks for
    /// them.
    pub fn populate<P>(&mut self, producer: P) -> Result<()>
    where
        P: RowProducer<R> + Send + 'static,
    {
        self.paginator.populate(producer)
    }

    // =========================================================================
    // Read side
    // =========================================================================

    /// Rows fetched so far.
    pub fn get_count(&self) -> usize {
        self.store.get_count()
    }

    /// Row count the display should report.
    ///
    /// While more rows may follow and the placeholder row is enabled this is
    /// one more than [`get_count`](Self::get_count), so the display can
    /// scroll past the fetched end. Once the producer is exhausted it is the
    /// true total.
    pub fn display_count(&self) -> usize {
        let count = self.store.get_count();
        if self.has_placeholder() {
            count + 1
        } else {
            count
        }
    }

    fn has_placeholder(&self) -> bool {
        self.config.placeholder_row && !self.store.is_finished() && self.paginator.can_fetch_more()
    }

    fn is_placeholder(&self, row_index: usize) -> bool {
        row_index == self.store.get_count() && self.has_placeholder()
    }

    /// Display value of one cell. The placeholder row renders as empty.
    pub fn get_item(&self, row_index: usize, column_index: usize) -> Result<DisplayValue> {
        if self.is_placeholder(row_index) && column_index < self.store.column_count() {
            return Ok(DisplayValue::None);
        }
        self.store.get_item(row_index, column_index)
    }

    /// Display text of one cell.
    pub fn get_item_text(&self, row_index: usize, column_index: usize) -> Result<String> {
        self.get_item(row_index, column_index)
            .map(|value| value.to_string())
    }

    /// Image for one row. The placeholder row has none.
    pub fn get_item_image(&self, row_index: usize) -> Result<ImageIndex> {
        if self.is_placeholder(row_index) {
            return Ok(ImageIndex::NONE);
        }
        self.store.get_item_image(row_index)
    }

    /// Rendering hints for one row.
    pub fn get_item_state(&self, row_index: usize) -> ItemState {
        self.store.get_item_state(row_index)
    }

    /// Returns `true` once every row is in the store.
    pub fn is_populated(&self) -> bool {
        self.store.is_populated()
    }

    /// The configuration the window was built with.
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// The range the display last reported as visible.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Read access to the underlying row store.
    pub fn store(&self) -> &RowStore<R> {
        &self.store
    }

    /// Mutable access to the store, for manual appends and tagging.
    ///
    /// Use [`clear`](Self::clear) rather than [`RowStore::clear`] to empty
    /// the window: clearing only the store leaves the producer attached, so
    /// it keeps pulling into the emptied store and `populate` stays rejected.
    pub fn store_mut(&mut self) -> &mut RowStore<R> {
        &mut self.store
    }

    /// Read access to the paginator.
    pub fn paginator(&self) -> &Paginator<R> {
        &self.paginator
    }

    /// The store's change notifications.
    pub fn signals(&self) -> &StoreSignals {
        self.store.signals()
    }

    /// `(heading, visible)` for every column.
    pub fn column_headers(&self) -> Vec<(&str, bool)> {
        self.store.column_headers()
    }

    /// Shows or hides a column.
    pub fn set_column_visible(&mut self, column: usize, visible: bool) -> Result<()> {
        self.store.set_column_visible(column, visible)
    }

    // =========================================================================
    // Event hooks
    // =========================================================================

    /// The display scrolled or redrew rows `from..=to`.
    ///
    /// Returns the number of rows fetched to cover the range.
    pub fn on_visible_range_changed(&mut self, from: usize, to: usize) -> Result<usize> {
        self.viewport.top = from;
        self.viewport.bottom = to;
        self.paginator.ensure_populated(&mut self.store, from, to)
    }

    /// The display now fits `rows` rows per page.
    pub fn on_page_capacity_changed(&mut self, rows: usize) {
        self.viewport.page_capacity = Some(rows);
        self.paginator.set_page_capacity(rows);
    }

    /// Lazy-loading hook: pulls one more batch if the producer has any.
    pub fn fetch_more(&mut self) -> Result<usize> {
        self.paginator.fetch_more(&mut self.store)
    }

    /// Returns `true` while the producer may have more rows.
    pub fn can_fetch_more(&self) -> bool {
        self.paginator.can_fetch_more()
    }

    /// The display selected `index`. Returns `true` if newly selected.
    pub fn on_row_selected(&mut self, index: usize) -> Result<bool> {
        self.store.set_tag(index, TAG_SELECTED)
    }

    /// The display deselected `index`. Returns `true` if it was selected.
    pub fn on_row_deselected(&mut self, index: usize) -> bool {
        self.store.remove_tag(index, TAG_SELECTED)
    }

    /// Moves focus to `index`.
    pub fn on_row_focused(&mut self, index: usize) -> Result<bool> {
        self.store.set_tag(index, TAG_CURRENT)
    }

    /// Selects every fetched row. Returns how many were newly selected.
    pub fn select_all(&mut self) -> usize {
        let mut added = 0;
        for index in 0..self.store.get_count() {
            if let Ok(true) = self.store.set_tag(index, TAG_SELECTED) {
                added += 1;
            }
        }
        added
    }

    /// Sorts by `column` and reports how the display should restore its
    /// selection, focus and scroll position.
    ///
    /// The focused row is scrolled so it sits at the same offset from the top
    /// of the page as before the sort, clamped at the first row. Without a
    /// focused row the view goes back to the top.
    pub fn on_column_header_activated(&mut self, column: usize) -> Result<SortOutcome> {
        let page_offset = self
            .store
            .tagged_items(TAG_CURRENT)
            .next()
            .map(|focused| focused as i128 - self.viewport.top as i128);

        let order = self.store.sort(column)?;

        let selected: Vec<usize> = self.store.tagged_items(TAG_SELECTED).collect();
        let current = self.store.tagged_items(TAG_CURRENT).next();
        let top_row = match (current, page_offset) {
            (Some(focused), Some(offset)) => {
                (focused as i128 - offset).clamp(0, usize::MAX as i128) as usize
            }
            _ => 0,
        };

        let height = self.viewport.bottom.saturating_sub(self.viewport.top);
        self.viewport.top = top_row;
        self.viewport.bottom = top_row.saturating_add(height);

        tracing::debug!(
            target: targets::WINDOW,
            column,
            ?order,
            selected = selected.len(),
            ?current,
            top_row,
            "header activated"
        );

        Ok(SortOutcome {
            column,
            order,
            selected,
            current,
            top_row,
        })
    }

    /// Empties the store and detaches the producer.
    pub fn clear(&mut self) {
        self.store.clear();
        self.paginator.reset();
        self.viewport.top = 0;
        self.viewport.bottom = 0;
        tracing::debug!(target: targets::WINDOW, "window cleared");
    }
}

impl<R> fmt::Debug for DataWindow<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataWindow")
            .field("store", &self.store)
            .field("paginator", &self.paginator)
            .field("config", &self.config)
            .field("viewport", &self.viewport)
            .finish()
    }
}
