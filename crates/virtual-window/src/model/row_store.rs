//! The row store: a growing, sortable sequence of opaque rows.
//!
//! `RowStore` owns every row fetched so far, the [`TagTable`] carrying
//! selection and focus, and the current sort state. Rows are addressed by
//! 0-based contiguous index; all column access goes through the configured
//! [`Column`] extractors.
//!
//! # Example
//!
//! ```
//! use virtual_window::{positional_columns, RowStore, SortOrder, TAG_SELECTED};
//!
//! let mut store = RowStore::new(positional_columns::<(&str, i64), _, _>(["Name", "Rank"]))?;
//! store.append(("b", 2));
//! store.append(("a", 3));
//! store.set_tag(1, TAG_SELECTED)?;
//!
//! assert_eq!(store.sort(0)?, SortOrder::Ascending);
//! assert_eq!(store.get_item(0, 0)?.to_string(), "a");
//! assert_eq!(store.tagged_items(TAG_SELECTED).collect::<Vec<_>>(), vec![0]);
//! # Ok::<(), virtual_window::Error>(())
//! ```

use std::fmt;
use std::sync::Arc;

use virtual_window_core::PerfSpan;
use virtual_window_core::logging::{span_names, targets};

use crate::error::{Error, Result};

use super::column::Column;
use super::signals::StoreSignals;
use super::tags::{TAG_CURRENT, TAG_SELECTED, TagTable, TaggedItems};
use super::value::{DisplayValue, ImageIndex, ItemState, SortKey, SortOrder};

/// Type alias for a per-row image lookup.
pub type ImageProvider<R> = Arc<dyn Fn(&R) -> ImageIndex + Send + Sync>;

/// Stable identity of a row within one store.
///
/// Assigned on append and never reused by the same store, so it survives any
/// reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

impl RowId {
    /// The raw identity value.
    pub fn value(self) -> u64 {
        self.0
    }
}

struct Entry<R> {
    id: RowId,
    row: R,
}

/// A growing collection of rows with tags and column-based sorting.
pub struct RowStore<R> {
    entries: Vec<Entry<R>>,
    columns: Vec<Column<R>>,
    tags: TagTable,
    finished: bool,
    sort_column: Option<usize>,
    sort_order: SortOrder,
    next_id: u64,
    image_provider: Option<ImageProvider<R>>,
    signals: StoreSignals,
}

impl<R: 'static> RowStore<R> {
    /// Creates an empty store with the given columns.
    ///
    /// Fails with [`Error::NoColumns`] for an empty column list, and with
    /// [`Error::MissingExtractor`] for any column lacking a text or sort-key
    /// extractor.
    pub fn new(columns: Vec<Column<R>>) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::NoColumns);
        }
        for (index, column) in columns.iter().enumerate() {
            if let Some(accessor) = column.missing_accessor() {
                return Err(Error::MissingExtractor {
                    column: index,
                    heading: column.heading().to_string(),
                    accessor,
                });
            }
        }

        Ok(Self {
            entries: Vec::new(),
            columns,
            tags: TagTable::new(),
            finished: false,
            sort_column: None,
            sort_order: SortOrder::Ascending,
            next_id: 0,
            image_provider: None,
            signals: StoreSignals::new(),
        })
    }

    /// Overrides the default "no image" answer of
    /// [`get_item_image`](Self::get_item_image).
    pub fn with_image_provider<F>(mut self, provider: F) -> Self
    where
        F: Fn(&R) -> ImageIndex + Send + Sync + 'static,
    {
        self.image_provider = Some(Arc::new(provider));
        self
    }
}

impl<R> RowStore<R> {
    // =========================================================================
    // Rows
    // =========================================================================

    /// Appends one row and returns its identity.
    ///
    /// The row lands at the end, then moves to its place if the store is
    /// sorted.
    pub fn append(&mut self, row: R) -> RowId {
        let index = self.entries.len();
        let id = self.push_entry(row);
        self.signals.rows_inserted.emit((index, index));
        self.resort_appended();
        id
    }

    /// Appends rows at the end, emitting a single `rows_inserted`.
    ///
    /// If the store is sorted, the active sort is then re-applied in the
    /// same direction. Returns the number of rows appended.
    pub fn extend<I>(&mut self, rows: I) -> usize
    where
        I: IntoIterator<Item = R>,
    {
        let first = self.entries.len();
        for row in rows {
            self.push_entry(row);
        }
        let appended = self.entries.len() - first;
        if appended > 0 {
            self.signals
                .rows_inserted
                .emit((first, self.entries.len() - 1));
            self.resort_appended();
        }
        appended
    }

    fn push_entry(&mut self, row: R) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, row });
        id
    }

    /// Number of rows fetched so far.
    ///
    /// This is the eventual total only once [`is_finished`](Self::is_finished).
    pub fn get_count(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no rows have been fetched.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the row at `index`.
    pub fn row(&self, index: usize) -> Option<&R> {
        self.entries.get(index).map(|entry| &entry.row)
    }

    /// Returns the identity of the row at `index`.
    pub fn row_id(&self, index: usize) -> Option<RowId> {
        self.entries.get(index).map(|entry| entry.id)
    }

    /// Returns the current index of the row with identity `id`.
    pub fn index_of(&self, id: RowId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Iterates the rows in their current order.
    pub fn rows(&self) -> impl Iterator<Item = &R> + '_ {
        self.entries.iter().map(|entry| &entry.row)
    }

    fn entry(&self, index: usize) -> Result<&Entry<R>> {
        self.entries
            .get(index)
            .ok_or_else(|| Error::index_out_of_range(index, self.entries.len()))
    }

    fn column_at(&self, column: usize) -> Result<&Column<R>> {
        self.columns
            .get(column)
            .ok_or_else(|| Error::invalid_column(column, self.columns.len()))
    }

    // =========================================================================
    // Display-facing reads
    // =========================================================================

    /// Returns the display value of `column_index` for the row at `row_index`.
    pub fn get_item(&self, row_index: usize, column_index: usize) -> Result<DisplayValue> {
        let entry = self.entry(row_index)?;
        let column = self.column_at(column_index)?;
        Ok(column.display(&entry.row))
    }

    /// Returns the display text of `column_index` for the row at `row_index`.
    pub fn get_item_text(&self, row_index: usize, column_index: usize) -> Result<String> {
        self.get_item(row_index, column_index)
            .map(|value| value.to_string())
    }

    /// Returns the sort key of `column_index` for the row at `row_index`.
    pub fn get_sort_key(&self, row_index: usize, column_index: usize) -> Result<SortKey> {
        let entry = self.entry(row_index)?;
        let column = self.column_at(column_index)?;
        Ok(column.sort_key(&entry.row))
    }

    /// Returns the image for the row at `row_index`.
    ///
    /// [`ImageIndex::NONE`] unless an image provider was configured.
    pub fn get_item_image(&self, row_index: usize) -> Result<ImageIndex> {
        let entry = self.entry(row_index)?;
        Ok(self
            .image_provider
            .as_ref()
            .map_or(ImageIndex::NONE, |provider| provider(&entry.row)))
    }

    /// Returns rendering hints for the row at `row_index`.
    ///
    /// Out-of-range rows have no special state.
    pub fn get_item_state(&self, row_index: usize) -> ItemState {
        if row_index >= self.entries.len() {
            return ItemState::NORMAL;
        }
        let mut state = ItemState::NORMAL;
        for name in self.tags.tags_at(row_index) {
            match name {
                TAG_SELECTED => state.selected = true,
                TAG_CURRENT => state.current = true,
                _ => state.highlighted = true,
            }
        }
        state
    }

    // =========================================================================
    // Population state
    // =========================================================================

    /// Returns `true` once the producer has been exhausted.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns `true` if every row of the sequence is in the store.
    pub fn is_populated(&self) -> bool {
        self.finished
    }

    /// Records that the producer is exhausted. Only ever moves false to true.
    pub(crate) fn mark_finished(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        tracing::debug!(target: targets::STORE, count = self.entries.len(), "store fully populated");
        self.signals.populated.emit(self.entries.len());
    }

    /// Drops all rows, tags and sort state.
    pub fn clear(&mut self) {
        self.signals.emit_reset(|| {
            self.entries.clear();
            self.tags.clear();
            self.finished = false;
            self.sort_column = None;
            self.sort_order = SortOrder::Ascending;
        });
        tracing::debug!(target: targets::STORE, "store cleared");
    }

    // =========================================================================
    // Columns
    // =========================================================================

    /// The configured columns, in display order.
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Number of configured columns, hidden ones included.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `(heading, visible)` for every column.
    pub fn column_headers(&self) -> Vec<(&str, bool)> {
        self.columns
            .iter()
            .map(|column| (column.heading(), column.is_visible()))
            .collect()
    }

    /// Indices of the visible columns.
    pub fn visible_columns(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.is_visible())
            .map(|(index, _)| index)
            .collect()
    }

    /// Shows or hides a column.
    pub fn set_column_visible(&mut self, column: usize, visible: bool) -> Result<()> {
        let count = self.columns.len();
        let target = self
            .columns
            .get_mut(column)
            .ok_or_else(|| Error::invalid_column(column, count))?;
        if target.is_visible() != visible {
            target.set_visible(visible);
            self.signals.column_visibility_changed.emit((column, visible));
        }
        Ok(())
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// The most recently sorted column.
    pub fn sort_column(&self) -> Option<usize> {
        self.sort_column
    }

    /// Direction of the most recent sort.
    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Stable-sorts the rows by `column_index` and returns the direction used.
    ///
    /// Sorting the most recently sorted column again flips the direction;
    /// any other column starts from its `first_direction`. Every tag follows
    /// its row: tags are lifted off by row identity before the reorder and
    /// put back at the rows' new indices afterwards.
    ///
    /// Once sorted, the store stays sorted: rows appended later are merged
    /// into the active order.
    ///
    /// An invalid column is rejected before anything changes.
    pub fn sort(&mut self, column_index: usize) -> Result<SortOrder> {
        let column = self.column_at(column_index)?;
        let order = if self.sort_column == Some(column_index) {
            self.sort_order.reversed()
        } else {
            column.first_direction()
        };

        self.reorder(column_index, order);
        self.sort_column = Some(column_index);
        self.sort_order = order;
        tracing::debug!(
            target: targets::STORE,
            column = column_index,
            ?order,
            rows = self.entries.len(),
            "sorted rows"
        );

        self.signals.sort_changed.emit((column_index, order));
        Ok(order)
    }

    /// Re-applies the active sort after rows landed at the end.
    fn resort_appended(&mut self) {
        if let Some(column_index) = self.sort_column {
            self.reorder(column_index, self.sort_order);
            tracing::trace!(
                target: targets::STORE,
                column = column_index,
                rows = self.entries.len(),
                "appended rows merged into sort order"
            );
        }
    }

    /// Stable reorder by one column, moving tags by row identity.
    fn reorder(&mut self, column_index: usize, order: SortOrder) {
        let Some(column) = self.columns.get(column_index) else {
            return;
        };
        let keys: Vec<SortKey> = self
            .entries
            .iter()
            .map(|entry| column.sort_key(&entry.row))
            .collect();

        let _perf = PerfSpan::new(span_names::SORT);
        self.signals.layout_about_to_change.emit(());

        let entries = &self.entries;
        let mut carried = self
            .tags
            .detach(|index| entries.get(index).map(|entry| entry.id));

        let mut decorated: Vec<(SortKey, Entry<R>)> =
            keys.into_iter().zip(self.entries.drain(..)).collect();
        decorated.sort_by(|(a, _), (b, _)| order.apply(a.cmp(b)));
        self.entries = decorated.into_iter().map(|(_, entry)| entry).collect();

        for (index, entry) in self.entries.iter().enumerate() {
            if let Some(names) = carried.remove(&entry.id) {
                self.tags.attach(index, names);
            }
        }

        self.signals.layout_changed.emit(());
    }

    // =========================================================================
    // Tags
    // =========================================================================

    /// Tags the row at `index` with `name`.
    ///
    /// Returns `true` if the tag was newly added. Fails with
    /// [`Error::IndexOutOfRange`] if the row has not been fetched.
    pub fn set_tag(&mut self, index: usize, name: &str) -> Result<bool> {
        if index >= self.entries.len() {
            return Err(Error::index_out_of_range(index, self.entries.len()));
        }
        let previous_current: Vec<usize> = if name == TAG_CURRENT {
            self.tags.tagged(TAG_CURRENT).filter(|&i| i != index).collect()
        } else {
            Vec::new()
        };

        let added = self.tags.set(index, name);
        if added {
            tracing::trace!(target: targets::STORE, index, tag = name, "tag set");
            for moved_from in previous_current {
                self.signals.tags_changed.emit(moved_from);
            }
            self.signals.tags_changed.emit(index);
        }
        Ok(added)
    }

    /// Removes `name` from the row at `index`. Returns `true` if it was set.
    pub fn remove_tag(&mut self, index: usize, name: &str) -> bool {
        let removed = self.tags.remove(index, name);
        if removed {
            tracing::trace!(target: targets::STORE, index, tag = name, "tag removed");
            self.signals.tags_changed.emit(index);
        }
        removed
    }

    /// Returns `true` if the row at `index` carries `name`.
    pub fn has_tag(&self, index: usize, name: &str) -> bool {
        self.tags.has(index, name)
    }

    /// All tag names carried by the row at `index`, in name order.
    pub fn tags_at(&self, index: usize) -> Vec<&str> {
        self.tags.tags_at(index)
    }

    /// Iterates, in ascending order, the indices currently tagged `name`.
    pub fn tagged_items(&self, name: &str) -> TaggedItems<'_> {
        self.tags.tagged(name)
    }

    /// Removes `name` from every row, returning the indices that had it.
    pub fn clear_tag(&mut self, name: &str) -> Vec<usize> {
        let cleared = self.tags.clear_tag(name);
        for &index in &cleared {
            self.signals.tags_changed.emit(index);
        }
        cleared
    }

    /// Read access to the whole tag table.
    pub fn tags(&self) -> &TagTable {
        &self.tags
    }

    /// The store's change notifications.
    pub fn signals(&self) -> &StoreSignals {
        &self.signals
    }
}

impl<R> fmt::Debug for RowStore<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowStore")
            .field("count", &self.entries.len())
            .field("columns", &self.columns.len())
            .field("finished", &self.finished)
            .field("sort_column", &self.sort_column)
            .field("sort_order", &self.sort_order)
            .finish_non_exhaustive()
    }
}
