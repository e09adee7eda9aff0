//! Error types for the transaction importer
//!
//! This module defines all error types that can occur during an import run.
//! Errors are designed to be descriptive and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **File/Stream Errors**: File not found, I/O failure while reading the input
//! - **Reconciliation Errors**: Unresolvable category uniqueness conflicts,
//!   missing category mappings during materialization
//! - **Persistence Errors**: Store write failures for the final batch
//!
//! Malformed input rows are NOT errors: they are skipped during validation
//! and never abort a run.

use thiserror::Error;

/// Main error type for the import pipeline
///
/// Every variant is fatal to the run in which it occurs: no partial set of
/// transactions is ever returned alongside an error. Whether a failed run
/// can be retried depends on the variant (see individual docs).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportError {
    /// Input file not found at the specified path
    ///
    /// Surfaced before any store interaction takes place.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading the input stream
    ///
    /// The parse sequence terminates early; no persistence is attempted
    /// and the source file is left in place.
    #[error("Stream read error: {message}")]
    StreamRead {
        /// Description of the underlying I/O failure
        message: String,
    },

    /// Category uniqueness conflict that could not be resolved
    ///
    /// Raised when batched category creation keeps colliding with rows
    /// created by a concurrent run and the retry budget is exhausted.
    /// The run can be retried from the same source file.
    #[error("Category creation conflict for title(s): {}", titles.join(", "))]
    CategoryConflict {
        /// The titles still unresolved when the retry budget ran out
        titles: Vec<String>,
    },

    /// No category mapping found for a validated candidate
    ///
    /// Invariant violation: reconciliation guarantees a mapping for every
    /// referenced name, so this indicates a reconciler bug. Never retried.
    #[error("No category resolved for '{category}'")]
    ReconciliationGap {
        /// The category name with no mapping
        category: String,
    },

    /// Store failure outside the uniqueness-conflict path
    ///
    /// Covers write failures for the final transaction batch as well as
    /// outright category-store failures. The source file is left intact so
    /// the run can be retried.
    #[error("Persistence error: {message}")]
    Persistence {
        /// Description of the store failure
        message: String,
    },
}

impl From<std::io::Error> for ImportError {
    fn from(error: std::io::Error) -> Self {
        ImportError::StreamRead {
            message: error.to_string(),
        }
    }
}

impl From<StoreError> for ImportError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::UniqueViolation { titles } => ImportError::CategoryConflict { titles },
            StoreError::Backend { message } => ImportError::Persistence { message },
        }
    }
}

impl ImportError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &str) -> Self {
        ImportError::FileNotFound {
            path: path.to_string(),
        }
    }

    /// Create a StreamRead error
    pub fn stream_read(message: impl Into<String>) -> Self {
        ImportError::StreamRead {
            message: message.into(),
        }
    }

    /// Create a CategoryConflict error
    pub fn category_conflict(titles: Vec<String>) -> Self {
        ImportError::CategoryConflict { titles }
    }

    /// Create a ReconciliationGap error
    pub fn reconciliation_gap(category: &str) -> Self {
        ImportError::ReconciliationGap {
            category: category.to_string(),
        }
    }

    /// Create a Persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        ImportError::Persistence {
            message: message.into(),
        }
    }
}

/// Error type surfaced by store implementations
///
/// The pipeline consumes the store through the traits in [`crate::core`];
/// this is the error contract those traits use.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// A batched category insert collided with existing titles
    ///
    /// Carries exactly the conflicting titles. Stores with partial-batch
    /// reporting insert the non-conflicting rows of the batch; the
    /// reconciler picks those up on its re-fetch.
    #[error("Unique constraint violation for title(s): {}", titles.join(", "))]
    UniqueViolation {
        /// Titles that already existed when the insert ran
        titles: Vec<String>,
    },

    /// Any other store failure (connection loss, write error, etc.)
    #[error("Store backend error: {message}")]
    Backend {
        /// Description of the backend failure
        message: String,
    },
}

impl StoreError {
    /// Create a UniqueViolation error
    pub fn unique_violation(titles: Vec<String>) -> Self {
        StoreError::UniqueViolation { titles }
    }

    /// Create a Backend error
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend {
            message: message.into(),
        }
    }
}
