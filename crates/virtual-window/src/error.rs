//! Error types for the data window.

use std::path::PathBuf;

/// Boxed error type produced by row producers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for data window operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while populating, reading or sorting a data window.
///
/// Every variant is recoverable: an operation that fails leaves the store
/// exactly as it was before the call (or, for [`Error::Producer`], with the
/// rows appended before the failure still in place).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A row index was outside `[0, count)`.
    #[error("row index {index} out of range (row count is {count})")]
    IndexOutOfRange { index: usize, count: usize },

    /// A column index did not name a configured column.
    #[error("column index {column} out of range ({count} columns configured)")]
    InvalidColumnIndex { column: usize, count: usize },

    /// A producer was attached to a window that already has one.
    #[error("data window is already populated; clear it before attaching another producer")]
    AlreadyPopulated,

    /// The row producer failed while pulling a row.
    #[error("row producer failed: {0}")]
    Producer(#[source] BoxError),

    /// A column was configured without one of its accessors.
    #[error("column {column} ('{heading}') has no {accessor} extractor")]
    MissingExtractor {
        column: usize,
        heading: String,
        accessor: &'static str,
    },

    /// A row store was configured with no columns.
    #[error("a row store needs at least one column")]
    NoColumns,

    /// A configuration value was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// File I/O error.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a row index error.
    pub fn index_out_of_range(index: usize, count: usize) -> Self {
        Self::IndexOutOfRange { index, count }
    }

    /// Create a column index error.
    pub fn invalid_column(column: usize, count: usize) -> Self {
        Self::InvalidColumnIndex { column, count }
    }

    /// Wrap a producer failure.
    pub fn producer(source: impl Into<BoxError>) -> Self {
        Self::Producer(source.into())
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::index_out_of_range(5, 3).to_string(),
            "row index 5 out of range (row count is 3)"
        );
        assert_eq!(
            Error::invalid_column(4, 2).to_string(),
            "column index 4 out of range (2 columns configured)"
        );
    }

    #[test]
    fn test_producer_error_keeps_source() {
        use std::error::Error as _;

        let err = Error::producer("disk unplugged");
        assert!(err.to_string().contains("disk unplugged"));
        assert!(err.source().is_some());
    }
}
