//! Core systems for Virtual Window.
//!
//! This crate provides the building blocks shared by the data window crate:
//!
//! - **Signal/Slot System**: Type-safe change notification from a row store
//!   to the display that renders it
//! - **Logging**: `tracing` targets, span names and a performance span guard
//!
//! # Signal/Slot Example
//!
//! ```
//! use virtual_window_core::Signal;
//!
//! let layout_changed = Signal::<()>::new();
//!
//! let conn_id = layout_changed.connect(|_| {
//!     println!("reset the view");
//! });
//!
//! layout_changed.emit(());
//! layout_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
