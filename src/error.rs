//! Error handling for phpcs-coverage
//!
//! Every failure a scan can hit is one variant of [`CoverageError`]. None of
//! them are retried: a scan either produces a complete result or fails.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type for coverage scans
#[derive(Error, Debug)]
pub enum CoverageError {
    /// A file or directory could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The ruleset is not well-formed XML
    #[error("malformed ruleset {}: {message}", path.display())]
    Ruleset { path: PathBuf, message: String },

    /// Pattern input is not a JSON array of strings
    #[error("invalid pattern list: {0}")]
    Patterns(#[from] serde_json::Error),

    /// A pattern is not a valid regular expression
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Invalid option value
    #[error("configuration error: {0}")]
    Config(String),
}

/// Specialized Result type for coverage operations
pub type Result<T> = std::result::Result<T, CoverageError>;

/// Creates a CoverageError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::CoverageError::$error_type(format!($($arg)*))
    };
}

/// Extension trait for attaching the offending path to I/O errors
pub trait ResultExt<T> {
    /// Turn an I/O failure into a [`CoverageError::Read`] for `path`
    fn with_path<P: AsRef<Path>>(self, path: P) -> Result<T>;
}

impl<T> ResultExt<T> for io::Result<T> {
    fn with_path<P: AsRef<Path>>(self, path: P) -> Result<T> {
        self.map_err(|source| CoverageError::Read {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

// Lets tests and callers working in io::Result use `?` on scan results
impl From<CoverageError> for io::Error {
    fn from(err: CoverageError) -> Self {
        match err {
            CoverageError::Read { source, .. } => source,
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}
