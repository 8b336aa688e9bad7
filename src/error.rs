//! Error types for the matterpress library
//!
//! Every failure is fatal to a run: nothing here is retried, and the binary
//! exits non-zero with the rendered message.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum MatterPressError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Image encoding errors while saving a cover
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Neither a path hint nor document content was supplied
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// A header fence was found but its content is not a YAML mapping
    #[error("Malformed front matter in {path}: {reason}")]
    MalformedFrontMatter { path: PathBuf, reason: String },

    /// Background template or font could not be loaded
    #[error("Failed to load {kind} asset {path}: {reason}")]
    AssetLoad {
        kind: AssetKind,
        path: PathBuf,
        reason: String,
    },

    /// Any hosting API call failed
    #[error("Transport error during {operation}: {reason}")]
    Transport { operation: String, reason: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, MatterPressError>;

/// Which cover asset failed to load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Font,
    Background,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Font => write!(f, "font"),
            Self::Background => write!(f, "background"),
        }
    }
}

impl MatterPressError {
    /// Create a new invalid input error
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Create a new malformed front matter error
    pub fn malformed_front_matter(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedFrontMatter {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new font load error
    pub fn font_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::AssetLoad {
            kind: AssetKind::Font,
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new background image load error
    pub fn image_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::AssetLoad {
            kind: AssetKind::Background,
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new transport error
    pub fn transport(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Transport {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error came from the hosting API
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
