//! Logging facilities for Virtual Window.
//!
//! Virtual Window uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("virtual_window=debug")
//!         .init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! The constants in [`targets`] and [`span_names`] can be used in filter
//! directives to narrow output to one subsystem.

/// Span names used throughout Virtual Window for tracing.
pub mod span_names {
    /// Sorting the row store.
    pub const SORT: &str = "virtual_window::sort";
    /// Pulling one batch from a producer.
    pub const FETCH_BATCH: &str = "virtual_window::fetch_batch";
}

/// Target names for log filtering.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "virtual_window_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "virtual_window_core::signal";
    /// Row store target.
    pub const STORE: &str = "virtual_window::store";
    /// Paginator target.
    pub const PAGINATOR: &str = "virtual_window::paginator";
    /// Display adapter target.
    pub const WINDOW: &str = "virtual_window::window";
    /// Performance spans.
    pub const PERF: &str = "virtual_window::perf";
}

/// A guard that keeps a tracing span entered until it is dropped.
///
/// Useful for timing an operation with a span-aware subscriber.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let _span = PerfSpan::new(span_names::SORT);
        tracing::debug!(target: targets::CORE, "inside perf span");
    }

    #[test]
    fn test_perf_span_uses_perf_target() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let perf = PerfSpan::new(span_names::FETCH_BATCH);
            let target = perf._span.metadata().map(|meta| meta.target());
            assert_eq!(target, Some(targets::PERF));
        });
    }

    #[test]
    fn test_targets_are_namespaced() {
        for target in [targets::STORE, targets::PAGINATOR, targets::WINDOW, targets::PERF] {
            assert!(target.starts_with("virtual_window::"));
        }
        assert!(targets::SIGNAL.starts_with(targets::CORE));
    }
}
