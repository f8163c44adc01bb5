//! Row storage and population.
//!
//! # Core Types
//!
//! - `RowStore`: the fetched rows, their tags and the sort state
//! - `Column`: text and sort-key extraction for one column
//! - `TagTable`: named markers (selection, focus) on row indices
//! - `Paginator`: pulls rows from a `RowProducer` in batches, on demand
//! - `StoreSignals`: change notifications for the display
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Producer   │────>│  Paginator  │────>│  RowStore   │──> StoreSignals
//! │ (next_row)  │     │ (batching)  │     │ rows + tags │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! Sorting happens entirely inside the store. Tags are moved with their rows
//! by identity, so selection and focus survive any reorder.

mod column;
mod paginator;
pub mod producer;
mod row_store;
mod signals;
mod tags;
mod value;

pub use column::{Column, KeyExtractor, PositionalRow, TextExtractor, positional_columns};
pub use paginator::Paginator;
pub use producer::RowProducer;
pub use row_store::{ImageProvider, RowId, RowStore};
pub use signals::StoreSignals;
pub use tags::{TAG_CURRENT, TAG_SELECTED, TagTable, TaggedItems};
pub use value::{Alignment, DisplayValue, ImageIndex, ItemState, SortKey, SortOrder};
