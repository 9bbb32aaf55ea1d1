//! Error types for radparams.

use crate::params::Format;

/// Result type alias for radparams operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for radparams.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read a parameter file.
    #[error("failed to read parameter file '{path}': {source}")]
    ParamsRead {
        /// Path to the parameter file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// File extension does not map to a known document format.
    #[error("unsupported parameter file format: '{path}' (expected .yaml, .yml, .json or .toml)")]
    UnsupportedFormat {
        /// Path to the parameter file.
        path: std::path::PathBuf,
    },

    /// Document text is not valid in its outer syntax.
    #[error("failed to parse {format} document: {reason}")]
    Parse {
        /// Syntax the document was parsed as.
        format: Format,
        /// Parser diagnostic.
        reason: String,
    },

    /// Key not allowed by the schema: unrecognized or repeated.
    #[error("{reason} '{path}' (value: {value})")]
    Schema {
        /// What is wrong with the key, e.g. `unrecognized key`.
        reason: String,
        /// Key path, e.g. `setting.bogusOption`.
        path: String,
        /// Received value, rendered compactly.
        value: String,
    },

    /// Value does not match its field contract.
    #[error("invalid value at '{path}': expected {expected}, got {value}")]
    Type {
        /// Key path, e.g. `setting.binWidth`.
        path: String,
        /// Description of the accepted values.
        expected: String,
        /// Received value, rendered compactly.
        value: String,
    },

    /// Required collection is empty or missing.
    #[error("'{path}' must contain at least one entry")]
    EmptyCollection {
        /// Key path of the collection.
        path: String,
    },

    /// Failed to render a document.
    #[error("failed to render {format} document: {reason}")]
    Render {
        /// Target syntax.
        format: Format,
        /// Serializer diagnostic.
        reason: String,
    },

    /// Feature extraction engine failed.
    #[error("feature extraction failed: {reason}")]
    Extraction {
        /// Description of the engine failure.
        reason: String,
    },
}

impl Error {
    /// Key path of a validation error, if this is one.
    pub fn key_path(&self) -> Option<&str> {
        match self {
            Self::Schema { path, .. } | Self::Type { path, .. } | Self::EmptyCollection { path } => {
                Some(path)
            }
            _ => None,
        }
    }
}
