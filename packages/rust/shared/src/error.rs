//! Error types for guidegen.
//!
//! Library crates use [`GuideGenError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all guidegen operations.
#[derive(Debug, thiserror::Error)]
pub enum GuideGenError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// The guide collection is missing or does not match the expected schema.
    #[error("failed to load guide collection from {path:?}: {message}")]
    Load { path: PathBuf, message: String },

    /// Filesystem I/O error while reading.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A rendered guide (or the collection) could not be written.
    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A tab variant claims real content but carries no node.
    #[error("tab variant '{lang}' (id '{id}') has no content node")]
    MissingVariantContent { lang: String, id: String },

    /// An error raised while compiling a specific guide.
    #[error("guide '{guide}': {source}")]
    Guide {
        guide: String,
        #[source]
        source: Box<GuideGenError>,
    },

    /// Data validation error (serialization failure, invalid format, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, GuideGenError>;

impl GuideGenError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a load error for the collection at `path`.
    pub fn load(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Load {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach the id of the guide being compiled.
    pub fn in_guide(guide: impl Into<String>, source: GuideGenError) -> Self {
        Self::Guide {
            guide: guide.into(),
            source: Box::new(source),
        }
    }

    /// Wrap a failed write with its destination path.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
