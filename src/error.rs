use thiserror::Error;

/// A configuration value that can never produce a meaningful run
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid configuration `{field}`: {reason}")]
pub struct ConfigError {
    /// Dotted path of the offending option
    pub field: &'static str,
    /// What is wrong with it
    pub reason: String,
}

impl ConfigError {
    pub(crate) fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by the public entry points
///
/// Missing barcodes are never an error: those calls return empty results.
#[derive(Debug, Error)]
pub enum LocateError {
    /// Rejected configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Image could not be opened or decoded
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    /// Raw pixel buffer does not match the stated dimensions
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    DimensionMismatch {
        /// width * height
        expected: usize,
        /// Buffer length
        actual: usize,
    },
    /// Configuration file could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration file is not valid TOML for this schema
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Configuration could not be written as TOML
    #[error("config serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}
