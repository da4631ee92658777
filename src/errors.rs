//! Error types for desymm operations.
//!
//! Errors carry optional file and line context so a failure deep in a
//! streaming pass still points at the offending input line.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for desymm operations
#[derive(Debug, Error)]
pub enum Error {
    /// Input file does not exist
    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// File system failures during reading or writing
    #[error("I/O error{}: {message}", DisplayPath(.path))]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Malformed header or data line
    #[error("Parse error{}{}: {message}", DisplayPath(.path), DisplayLine(.line))]
    Parse {
        message: String,
        path: Option<PathBuf>,
        line: Option<usize>,
    },
}

/// Formats the optional path context of an error message.
struct DisplayPath<'a>(&'a Option<PathBuf>);

impl fmt::Display for DisplayPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(path) => write!(f, " in {}", path.display()),
            None => Ok(()),
        }
    }
}

/// Formats the optional line context of an error message.
struct DisplayLine<'a>(&'a Option<usize>);

impl fmt::Display for DisplayLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(line) => write!(f, " at line {line}"),
            None => Ok(()),
        }
    }
}

impl Error {
    /// Create an I/O error with a message only
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Create a parse error with no location context
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            path: None,
            line: None,
        }
    }

    /// Create a parse error pointing at a 1-based input line
    pub fn parse_at(message: impl Into<String>, path: Option<&Path>, line: usize) -> Self {
        Self::Parse {
            message: message.into(),
            path: path.map(Path::to_path_buf),
            line: Some(line),
        }
    }

    /// Convert an I/O error for a known file, mapping a missing file to
    /// the dedicated variant
    pub fn from_io_error(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileNotFound { path },
            _ => Self::Io {
                message: err.to_string(),
                path: Some(path),
                source: Some(err),
            },
        }
    }

    /// Attach a path to an error that has none, leaving existing context
    /// untouched
    pub fn with_path(mut self, new_path: &Path) -> Self {
        match &mut self {
            Self::Io { path, .. } | Self::Parse { path, .. } => {
                if path.is_none() {
                    *path = Some(new_path.to_path_buf());
                }
            }
            Self::FileNotFound { .. } => {}
        }
        self
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

/// Extension trait for attaching path context to results
pub trait ResultExt<T> {
    /// Fill in the path on any error that is missing one
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| e.with_path(path))
    }
}
