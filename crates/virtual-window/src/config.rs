//! Data window configuration.
//!
//! Configuration can be built in code or loaded from TOML. Missing keys take
//! their defaults:
//!
//! ```toml
//! batch_size = 25
//! placeholder_row = false
//! ```
//!
//! ```
//! use virtual_window::WindowConfig;
//!
//! let config = WindowConfig::from_toml_str("batch_size = 25")?;
//! assert_eq!(config.batch_size, 25);
//! assert!(config.placeholder_row);
//! # Ok::<(), virtual_window::Error>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default number of rows pulled from a producer per batch.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Settings for a [`DataWindow`](crate::DataWindow) and its paginator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Rows pulled from the producer per batch. Raised automatically to one
    /// page plus one once the display reports its page capacity.
    pub batch_size: usize,

    /// Report one extra row to the display while more rows may follow, so
    /// it can scroll past the fetched end and trigger the next batch.
    pub placeholder_row: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            placeholder_row: true,
        }
    }
}

impl WindowConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the batch size.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Enables or disables the trailing placeholder row.
    pub fn placeholder_row(mut self, enabled: bool) -> Self {
        self.placeholder_row = enabled;
        self
    }

    /// Checks the configuration for values the paginator cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::invalid_config("batch_size must be at least 1"));
        }
        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(
            target: virtual_window_core::logging::targets::WINDOW,
            path = %path.display(),
            batch_size = config.batch_size,
            "loaded window configuration"
        );
        Ok(config)
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::invalid_config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = WindowConfig::default();
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert!(config.placeholder_row);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = WindowConfig::new().batch_size(3).placeholder_row(false);
        assert_eq!(config.batch_size, 3);
        assert!(!config.placeholder_row);
    }

    #[test]
    fn test_zero_batch_rejected() {
        let err = WindowConfig::new().batch_size(0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        assert!(matches!(
            WindowConfig::from_toml_str("batch_size = 0"),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_parse_partial_document() {
        let config = WindowConfig::from_toml_str("placeholder_row = false").unwrap();
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert!(!config.placeholder_row);

        let config = WindowConfig::from_toml_str("").unwrap();
        assert_eq!(config, WindowConfig::default());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            WindowConfig::from_toml_str("batch_size = \"many\""),
            Err(Error::ConfigParse(_))
        ));
    }

    #[test]
    fn test_toml_string_roundtrip() {
        let config = WindowConfig::new().batch_size(42);
        let text = config.to_toml_string().unwrap();
        assert_eq!(WindowConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "batch_size = 64").unwrap();
        writeln!(file, "placeholder_row = false").unwrap();

        let config = WindowConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.batch_size, 64);
        assert!(!config.placeholder_row);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = WindowConfig::from_toml_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
