//! Row producers: resumable, pull-based sources of rows.
//!
//! A producer is pulled one row at a time by the
//! [`Paginator`](super::Paginator). It answers either with the next row,
//! with `Ok(None)` once exhausted, or with an error that aborts the current
//! batch. Producers may be finite or of unknown length and may block inside
//! [`next_row`](RowProducer::next_row) (file reads, network pages).

use crate::error::BoxError;

/// A resumable source of rows.
pub trait RowProducer<R> {
    /// Pulls the next row.
    ///
    /// `Ok(None)` means the sequence is exhausted; the caller will not pull
    /// again after that.
    fn next_row(&mut self) -> Result<Option<R>, BoxError>;
}

impl<R, P: RowProducer<R> + ?Sized> RowProducer<R> for Box<P> {
    fn next_row(&mut self) -> Result<Option<R>, BoxError> {
        (**self).next_row()
    }
}

/// Producer over an infallible iterator.
#[derive(Debug, Clone)]
pub struct IterProducer<I> {
    iter: I,
}

impl<I: Iterator> RowProducer<I::Item> for IterProducer<I> {
    fn next_row(&mut self) -> Result<Option<I::Item>, BoxError> {
        Ok(self.iter.next())
    }
}

/// Producer over an iterator of fallible rows.
#[derive(Debug, Clone)]
pub struct ResultsProducer<I> {
    iter: I,
}

impl<I, R, E> RowProducer<R> for ResultsProducer<I>
where
    I: Iterator<Item = Result<R, E>>,
    E: Into<BoxError>,
{
    fn next_row(&mut self) -> Result<Option<R>, BoxError> {
        self.iter.next().transpose().map_err(Into::into)
    }
}

/// Producer backed by a closure.
pub struct FnProducer<F> {
    pull: F,
}

impl<R, F> RowProducer<R> for FnProducer<F>
where
    F: FnMut() -> Result<Option<R>, BoxError>,
{
    fn next_row(&mut self) -> Result<Option<R>, BoxError> {
        (self.pull)()
    }
}

impl<F> std::fmt::Debug for FnProducer<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnProducer").finish_non_exhaustive()
    }
}

/// Wraps an iterator of rows.
///
/// ```
/// use virtual_window::producer::{self, RowProducer};
///
/// let mut rows = producer::from_iter(["a", "b"]);
/// assert_eq!(rows.next_row().unwrap(), Some("a"));
/// ```
pub fn from_iter<I: IntoIterator>(rows: I) -> IterProducer<I::IntoIter> {
    IterProducer {
        iter: rows.into_iter(),
    }
}

/// Wraps an iterator of `Result` rows; an `Err` item becomes a producer error.
///
/// Reading lines from a file is the typical use:
///
/// ```no_run
/// use std::io::{BufRead, BufReader};
/// use virtual_window::producer;
///
/// let file = std::fs::File::open("records.log")?;
/// let lines = producer::from_results(BufReader::new(file).lines());
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn from_results<I, R, E>(rows: I) -> ResultsProducer<I::IntoIter>
where
    I: IntoIterator<Item = Result<R, E>>,
    E: Into<BoxError>,
{
    ResultsProducer {
        iter: rows.into_iter(),
    }
}

/// Wraps a pull closure.
pub fn from_fn<R, F>(pull: F) -> FnProducer<F>
where
    F: FnMut() -> Result<Option<R>, BoxError>,
{
    FnProducer { pull }
}
