//! # Error Types
//!
//! Domain-specific error types for vitrina-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  Collaborator errors (returned by trait implementations)               │
//! │  ├── RepoError        - Repository lookups and writes                  │
//! │  ├── AssetStoreError  - Binary upload/delete                           │
//! │  └── CacheError       - Cache backend (never surfaced to callers)      │
//! │                                                                         │
//! │  Operation errors (returned by services)                               │
//! │  ├── ContentError     - NotFound / StorageUnavailable / AssetIo /      │
//! │  │                      Validation                                     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  Flow: DbError → RepoError → ContentError → panel output               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::asset::AssetField;

// =============================================================================
// Content Error
// =============================================================================

/// Failure of a content or admin operation.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Identifier does not resolve to a record.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Repository backend unreachable or a write was rejected.
    ///
    /// ## When This Occurs
    /// - Reads for a homepage/cart view failed (no partial data is served)
    /// - A write failed after assets were uploaded (those uploads are orphaned)
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// AssetStore upload failed. Nothing was written to the repository.
    #[error("asset {step} failed for {field}: {reason}")]
    AssetIo {
        field: AssetField,
        step: AssetStep,
        reason: String,
    },

    /// Input validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl ContentError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        ContentError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<RepoError> for ContentError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound { entity, id } => ContentError::NotFound { entity, id },
            RepoError::Unavailable(msg) => ContentError::StorageUnavailable(msg),
        }
    }
}

/// Which AssetStore call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetStep {
    Upload,
    Delete,
}

impl std::fmt::Display for AssetStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetStep::Upload => f.write_str("upload"),
            AssetStep::Delete => f.write_str("delete"),
        }
    }
}

// =============================================================================
// Collaborator Errors
// =============================================================================

/// Errors returned by [`Repository`](crate::ports::Repository) implementations.
#[derive(Debug, Error)]
pub enum RepoError {
    /// Update/delete targeted a row that does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Backend unreachable, query failed, constraint rejected.
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

impl RepoError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        RepoError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Errors returned by [`AssetStore`](crate::ports::AssetStore) implementations.
#[derive(Debug, Error)]
pub enum AssetStoreError {
    /// Transient I/O failure talking to the store.
    #[error("asset store I/O error: {0}")]
    Io(String),

    /// Upload carried no bytes.
    #[error("uploaded file is empty")]
    EmptyPayload,

    /// Reference was not issued by this store (e.g. a manually entered URL).
    #[error("reference is not managed by this store: {0}")]
    ForeignReference(String),
}

/// Errors returned by [`Cache`](crate::ports::Cache) implementations.
///
/// Services treat every cache error as a miss.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any AssetStore or Repository call is made.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., color that is not hex).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ContentError.
pub type ContentResult<T> = Result<T, ContentError>;

// =============================================================================
// Unit Tests
// =============================================================================
