//! Error types for `DictCol`.
//!
//! One error type covers every fatal condition of the engine. Negative query
//! results ("not found", "no items found") are not errors; they are reported
//! through [`crate::query::QueryOutcome`].

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for `DictCol` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in `DictCol` operations.
///
/// Error codes follow the pattern `DCOL-XXX`.
#[derive(Error, Debug)]
pub enum Error {
    /// Raw column source file is missing (DCOL-001).
    #[error("[DCOL-001] Column source '{}' not found", .0.display())]
    ColumnNotFound(PathBuf),

    /// A value has no dictionary entry while encoding (DCOL-002).
    ///
    /// The dictionary was not built from the column being encoded.
    #[error("[DCOL-002] Value '{value}' at row {row} has no dictionary entry")]
    UnknownValue {
        /// Row of the offending value.
        row: usize,
        /// The value itself.
        value: String,
    },

    /// Artifact file is missing (DCOL-003).
    #[error("[DCOL-003] Artifact '{}' not found", .0.display())]
    ArtifactNotFound(PathBuf),

    /// Artifact is truncated or structurally invalid (DCOL-004).
    #[error("[DCOL-004] Artifact corrupted: {0}")]
    ArtifactCorrupted(String),

    /// Configuration error (DCOL-005).
    #[error("[DCOL-005] Configuration error: {0}")]
    Config(String),

    /// IO error (DCOL-006).
    #[error("[DCOL-006] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error (DCOL-007).
    #[error("[DCOL-007] Serialization error: {0}")]
    Serialization(String),

    /// Internal error (DCOL-008).
    ///
    /// Indicates an unexpected internal error. Please report if encountered.
    #[error("[DCOL-008] Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Returns the error code (e.g., "DCOL-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ColumnNotFound(_) => "DCOL-001",
            Self::UnknownValue { .. } => "DCOL-002",
            Self::ArtifactNotFound(_) => "DCOL-003",
            Self::ArtifactCorrupted(_) => "DCOL-004",
            Self::Config(_) => "DCOL-005",
            Self::Io(_) => "DCOL-006",
            Self::Serialization(_) => "DCOL-007",
            Self::Internal(_) => "DCOL-008",
        }
    }

    /// Returns true if this error is recoverable.
    ///
    /// A corrupted artifact or a dictionary/column mismatch cannot be fixed by
    /// retrying; the column must be re-encoded.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::UnknownValue { .. } | Self::ArtifactCorrupted(_) | Self::Internal(_)
        )
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
