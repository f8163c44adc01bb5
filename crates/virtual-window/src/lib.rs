//! Virtual Window: a lazily populated, sortable row cache for
//! index-addressed displays.
//!
//! A display that only ever draws a few dozen rows at a time (a virtual list
//! or table view) asks this crate for a row count and for individual cells.
//! Rows come from a [`RowProducer`] that may be slow or of unknown length;
//! they are pulled in batches only when the display scrolls towards them,
//! kept in a [`RowStore`], and can be re-sorted by any column without losing
//! the display's selection and focus.
//!
//! # Example
//!
//! ```
//! use virtual_window::{producer, Column, DataWindow, SortOrder, WindowConfig};
//!
//! struct Track {
//!     title: &'static str,
//!     plays: u32,
//! }
//!
//! let columns = vec![
//!     Column::new("Title")
//!         .with_text(|t: &Track| t.title)
//!         .with_key(|t: &Track| t.title.to_lowercase()),
//!     Column::new("Plays")
//!         .with_text(|t: &Track| t.plays)
//!         .with_key(|t: &Track| t.plays)
//!         .with_first_direction(SortOrder::Descending),
//! ];
//!
//! let mut window = DataWindow::new(columns, WindowConfig::default())?;
//! window.populate(producer::from_iter(vec![
//!     Track { title: "Blue", plays: 12 },
//!     Track { title: "amber", plays: 40 },
//! ]))?;
//!
//! window.on_visible_range_changed(0, 30)?;
//! assert!(window.is_populated());
//!
//! window.on_column_header_activated(1)?;
//! assert_eq!(window.get_item_text(0, 0)?, "amber");
//! # Ok::<(), virtual_window::Error>(())
//! ```
//!
//! # Logging
//!
//! The crate logs through `tracing` under the targets in
//! [`virtual_window_core::logging::targets`]. Install a subscriber to see it.

pub mod config;
pub mod error;
pub mod model;
pub mod window;

pub use config::WindowConfig;
pub use error::{BoxError, Error, Result};
pub use model::producer;
pub use model::{
    Alignment, Column, DisplayValue, ImageIndex, ItemState, Paginator, PositionalRow, RowId,
    RowProducer, RowStore, SortKey, SortOrder, StoreSignals, TAG_CURRENT, TAG_SELECTED, TagTable,
    TaggedItems, positional_columns,
};
pub use window::{DataWindow, SharedWindow, SortOutcome, Viewport};

pub use virtual_window_core::{ConnectionGuard, ConnectionId, Signal};
