//! Lazy, batched population of a row store.
//!
//! The [`Paginator`] owns the producer handed to [`populate`](Paginator::populate)
//! and pulls from it only when a caller asks for rows the store does not
//! have yet. Pulls happen in batches of `batch_size` rows, which bounds the
//! time a single display refresh can spend blocked in the producer.
//!
//! # Example
//!
//! ```
//! use virtual_window::{positional_columns, producer, Paginator, RowStore, WindowConfig};
//!
//! let mut store = RowStore::new(positional_columns::<(u32,), _, _>(["N"]))?;
//! let mut paginator = Paginator::new(&WindowConfig::new().batch_size(4));
//! paginator.populate(producer::from_iter((0..100).map(|n| (n,))))?;
//!
//! paginator.ensure_populated(&mut store, 0, 5)?;
//! assert_eq!(store.get_count(), 8);
//! assert!(!store.is_finished());
//! # Ok::<(), virtual_window::Error>(())
//! ```

use std::fmt;

use virtual_window_core::PerfSpan;
use virtual_window_core::logging::{span_names, targets};

use crate::config::WindowConfig;
use crate::error::{Error, Result};

use super::producer::RowProducer;
use super::row_store::RowStore;

type BoxedProducer<R> = Box<dyn RowProducer<R> + Send>;

/// Pulls rows from a producer into a [`RowStore`] on demand.
pub struct Paginator<R> {
    producer: Option<BoxedProducer<R>>,
    attached: bool,
    batch_size: usize,
    pulls: usize,
}

impl<R> Paginator<R> {
    /// Creates a paginator with no producer attached.
    pub fn new(config: &WindowConfig) -> Self {
        Self {
            producer: None,
            attached: false,
            batch_size: config.batch_size.max(1),
            pulls: 0,
        }
    }

    /// Attaches the producer. Nothing is pulled until rows are requested.
    ///
    /// Fails with [`Error::AlreadyPopulated`] if a producer was attached
    /// since the last [`reset`](Self::reset), even one that is already
    /// exhausted.
    pub fn populate<P>(&mut self, producer: P) -> Result<()>
    where
        P: RowProducer<R> + Send + 'static,
    {
        if self.attached {
            tracing::warn!(target: targets::PAGINATOR, "rejected second populate call");
            return Err(Error::AlreadyPopulated);
        }
        self.producer = Some(Box::new(producer));
        self.attached = true;
        tracing::debug!(target: targets::PAGINATOR, batch_size = self.batch_size, "producer attached");
        Ok(())
    }

    /// Makes sure rows up to `to_index` are in the store, unless the
    /// producer runs out first.
    ///
    /// Afterwards `store.get_count() > to_index` or the store is finished.
    /// Returns how many rows this call appended; an already satisfied range
    /// pulls nothing. Running out early is not an error.
    ///
    /// A producer error aborts the call. Rows pulled before the failure stay
    /// in the store, the store stays unfinished and the producer stays
    /// attached so a later call can retry.
    pub fn ensure_populated(
        &mut self,
        store: &mut RowStore<R>,
        from_index: usize,
        to_index: usize,
    ) -> Result<usize> {
        let mut appended = 0;
        while to_index >= store.get_count() && !store.is_finished() && self.producer.is_some() {
            appended += self.fetch_batch(store)?;
        }
        if appended > 0 {
            tracing::trace!(
                target: targets::PAGINATOR,
                from_index,
                to_index,
                appended,
                "range populated"
            );
        }
        Ok(appended)
    }

    /// Pulls one batch if the producer may have more rows.
    ///
    /// Returns the number of rows appended.
    pub fn fetch_more(&mut self, store: &mut RowStore<R>) -> Result<usize> {
        if self.can_fetch_more() {
            self.fetch_batch(store)
        } else {
            Ok(0)
        }
    }

    /// Returns `true` while a producer is attached and not exhausted.
    pub fn can_fetch_more(&self) -> bool {
        self.producer.is_some()
    }

    /// Returns `true` if a producer was attached since the last reset.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Rows pulled per batch.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Raises the batch size to at least one page plus one row.
    ///
    /// The batch size never shrinks.
    pub fn set_page_capacity(&mut self, rows_per_page: usize) {
        let wanted = rows_per_page.saturating_add(1);
        if wanted > self.batch_size {
            tracing::debug!(
                target: targets::PAGINATOR,
                from = self.batch_size,
                to = wanted,
                "batch size raised to page capacity"
            );
            self.batch_size = wanted;
        }
    }

    /// Number of producer calls since the last reset.
    pub fn pulls(&self) -> usize {
        self.pulls
    }

    /// Drops the producer so another one can be attached.
    pub fn reset(&mut self) {
        self.producer = None;
        self.attached = false;
        self.pulls = 0;
    }

    fn fetch_batch(&mut self, store: &mut RowStore<R>) -> Result<usize> {
        let Some(producer) = self.producer.as_mut() else {
            return Ok(0);
        };
        let _perf = PerfSpan::new(span_names::FETCH_BATCH);

        let mut batch = Vec::with_capacity(self.batch_size);
        let mut exhausted = false;
        let mut failure = None;
        while batch.len() < self.batch_size {
            self.pulls += 1;
            match producer.next_row() {
                Ok(Some(row)) => batch.push(row),
                Ok(None) => {
                    exhausted = true;
                    break;
                }
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            }
        }

        let appended = store.extend(batch);
        tracing::debug!(
            target: targets::PAGINATOR,
            appended,
            count = store.get_count(),
            exhausted,
            "fetched batch"
        );

        if let Some(err) = failure {
            tracing::warn!(target: targets::PAGINATOR, error = %err, appended, "producer failed");
            return Err(Error::Producer(err));
        }
        if exhausted {
            self.producer = None;
            store.mark_finished();
        }
        Ok(appended)
    }
}

impl<R> fmt::Debug for Paginator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("attached", &self.attached)
            .field("has_producer", &self.producer.is_some())
            .field("batch_size", &self.batch_size)
            .field("pulls", &self.pulls)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use crate::model::column::positional_columns;
    use crate::model::producer;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    type Pair = (&'static str, i64);

    fn empty_store() -> RowStore<Pair> {
        RowStore::new(positional_columns(["Name", "Value", "Extra"])).unwrap()
    }

    fn numbered(total: usize) -> impl RowProducer<Pair> + Send {
        producer::from_iter((0..total).map(|n| ("row", n as i64)))
    }

    #[test]
    fn test_scenario_small_producer() {
        let mut store = empty_store();
        let mut paginator = Paginator::new(&WindowConfig::default());
        paginator
            .populate(producer::from_iter(vec![("b", 2), ("a", 3), ("c", 1)]))
            .unwrap();

        assert_eq!(paginator.ensure_populated(&mut store, 0, 2).unwrap(), 3);
        assert_eq!(store.get_count(), 3);
        assert!(store.is_finished());
        assert!(!paginator.can_fetch_more());
    }

    #[test]
    fn test_early_exhaustion_is_not_an_error() {
        let mut store = empty_store();
        let mut paginator = Paginator::new(&WindowConfig::default());
        paginator.populate(numbered(3)).unwrap();

        assert!(paginator.ensure_populated(&mut store, 0, 5).is_ok());
        assert_eq!(store.get_count(), 3);
        assert!(store.is_finished());
    }

    #[test]
    fn test_pulls_in_batches() {
        let mut store = empty_store();
        let mut paginator = Paginator::new(&WindowConfig::new().batch_size(4));
        paginator.populate(numbered(100)).unwrap();

        paginator.ensure_populated(&mut store, 0, 4).unwrap();
        assert_eq!(store.get_count(), 8);
        assert_eq!(paginator.pulls(), 8);
        assert!(!store.is_finished());
    }

    #[test]
    fn test_idempotent() {
        let mut store = empty_store();
        let mut paginator = Paginator::new(&WindowConfig::new().batch_size(5));
        paginator.populate(numbered(50)).unwrap();

        paginator.ensure_populated(&mut store, 0, 9).unwrap();
        let pulls = paginator.pulls();
        assert_eq!(paginator.ensure_populated(&mut store, 0, 9).unwrap(), 0);
        assert_eq!(paginator.ensure_populated(&mut store, 2, 4).unwrap(), 0);
        assert_eq!(paginator.pulls(), pulls);
    }

    #[test]
    fn test_no_pull_after_exhaustion() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut remaining = 2;
        let source = producer::from_fn(move || -> std::result::Result<Option<Pair>, BoxError> {
            counter.fetch_add(1, Ordering::SeqCst);
            if remaining == 0 {
                return Ok(None);
            }
            remaining -= 1;
            Ok(Some(("x", remaining)))
        });

        let mut store = empty_store();
        let mut paginator = Paginator::new(&WindowConfig::default());
        paginator.populate(source).unwrap();

        paginator.ensure_populated(&mut store, 0, 20).unwrap();
        paginator.ensure_populated(&mut store, 0, 40).unwrap();
        assert_eq!(paginator.fetch_more(&mut store).unwrap(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_producer_error_keeps_rows_and_allows_retry() {
        let mut step = 0;
        let source = producer::from_fn(move || -> std::result::Result<Option<Pair>, BoxError> {
            step += 1;
            match step {
                1 | 2 => Ok(Some(("ok", step))),
                3 => Err("connection reset".into()),
                4 => Ok(Some(("late", step))),
                _ => Ok(None),
            }
        });

        let mut store = empty_store();
        let mut paginator = Paginator::new(&WindowConfig::default());
        paginator.populate(source).unwrap();

        let err = paginator.ensure_populated(&mut store, 0, 5).unwrap_err();
        assert!(matches!(err, Error::Producer(_)));
        assert_eq!(store.get_count(), 2);
        assert!(!store.is_finished());
        assert!(paginator.can_fetch_more());

        paginator.ensure_populated(&mut store, 0, 5).unwrap();
        assert_eq!(store.get_count(), 3);
        assert!(store.is_finished());
    }

    #[test]
    fn test_populate_twice_rejected() {
        let mut store = empty_store();
        let mut paginator = Paginator::new(&WindowConfig::default());
        paginator.populate(numbered(1)).unwrap();
        paginator.ensure_populated(&mut store, 0, 0).unwrap();

        assert!(matches!(
            paginator.populate(numbered(1)),
            Err(Error::AlreadyPopulated)
        ));

        paginator.reset();
        store.clear();
        assert!(paginator.populate(numbered(1)).is_ok());
        assert_eq!(paginator.pulls(), 0);
    }

    #[test]
    fn test_without_producer_is_noop() {
        let mut store = empty_store();
        store.append(("manual", 1));
        let mut paginator: Paginator<Pair> = Paginator::new(&WindowConfig::default());

        assert_eq!(paginator.ensure_populated(&mut store, 0, 10).unwrap(), 0);
        assert_eq!(store.get_count(), 1);
        assert_eq!(paginator.pulls(), 0);
    }

    #[test]
    fn test_page_capacity_only_raises() {
        let mut paginator: Paginator<Pair> = Paginator::new(&WindowConfig::default());
        paginator.set_page_capacity(24);
        assert_eq!(paginator.batch_size(), 25);
        paginator.set_page_capacity(3);
        assert_eq!(paginator.batch_size(), 25);
    }

    #[test]
    fn test_later_batches_follow_sort() {
        let mut store = empty_store();
        let mut paginator = Paginator::new(&WindowConfig::new().batch_size(3));
        paginator
            .populate(producer::from_iter(vec![
                ("m", 0),
                ("c", 1),
                ("x", 2),
                ("a", 3),
                ("z", 4),
                ("b", 5),
            ]))
            .unwrap();

        paginator.ensure_populated(&mut store, 0, 2).unwrap();
        store.sort(0).unwrap();
        paginator.ensure_populated(&mut store, 3, 5).unwrap();

        let names: Vec<&str> = store.rows().map(|row| row.0).collect();
        assert_eq!(names, vec!["a", "b", "c", "m", "x", "z"]);
        assert_eq!(store.sort_column(), Some(0));
        assert_eq!(store.sort_order(), crate::model::SortOrder::Ascending);
    }

    #[test]
    fn test_fetch_more() {
        let mut store = empty_store();
        let mut paginator = Paginator::new(&WindowConfig::new().batch_size(3));
        paginator.populate(numbered(4)).unwrap();

        assert_eq!(paginator.fetch_more(&mut store).unwrap(), 3);
        assert_eq!(paginator.fetch_more(&mut store).unwrap(), 1);
        assert!(store.is_finished());
        assert_eq!(paginator.fetch_more(&mut store).unwrap(), 0);
    }
}
