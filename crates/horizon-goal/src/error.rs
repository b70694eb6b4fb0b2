// error.rs — Error types for goal storage and hierarchy validation.

use thiserror::Error;
use uuid::Uuid;

/// A rejected goal field or link. Always surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("goal title must not be empty")]
    EmptyTitle,

    #[error("goal deadline is required")]
    MissingDeadline,

    #[error("unknown category '{0}' (expected personal, professional, health, learning)")]
    UnknownCategory(String),

    #[error("unknown period '{0}' (expected daily, weekly, monthly, quarterly, yearly)")]
    UnknownPeriod(String),

    #[error("unknown status '{0}' (expected not-started, in-progress, completed, paused)")]
    UnknownStatus(String),

    #[error("malformed date '{0}' (expected YYYY-MM-DD)")]
    MalformedDate(String),

    /// The requested parent is missing, on the same or a shorter horizon,
    /// or in a different category.
    #[error("goal {parent} is not an eligible parent for a {period} {category} goal")]
    IneligibleParent {
        parent: Uuid,
        period: String,
        category: String,
    },

    #[error("goal {0} cannot be its own parent")]
    SelfParent(Uuid),

    #[error("duplicate goal id {0}")]
    DuplicateId(Uuid),
}

/// Errors that can occur during goal store and sink operations.
#[derive(Debug, Error)]
pub enum GoalError {
    /// Input failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The requested goal was not found.
    #[error("goal not found: {0}")]
    NotFound(Uuid),

    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize/deserialize goal data.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A notification dispatch failed (non-fatal).
    #[error("notification error: {0}")]
    NotificationError(String),

    /// A backup document's checksum does not match its goal array.
    #[error("backup checksum mismatch: expected {expected}, found {found}")]
    ChecksumMismatch { expected: String, found: String },
}
