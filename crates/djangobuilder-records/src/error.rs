//! Record layer error types.

use thiserror::Error;

use crate::record::EntityType;

/// Result type for record operations.
pub type Result<T> = std::result::Result<T, RecordError>;

/// Errors raised while applying or rebuilding from records.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The schema rejected the record contents.
    #[error("schema error: {0}")]
    Core(#[from] djangobuilder_core::Error),

    /// A parent record lists a child id that is not in the store.
    #[error("missing {entity} record {id} referenced by {parent}")]
    MissingRecord {
        /// Kind of the missing record.
        entity: EntityType,
        /// The missing record id.
        id: String,
        /// Id of the record that referenced it.
        parent: String,
    },

    /// A change event carried data that does not match its entity type.
    #[error("invalid {entity} record {id}: {reason}")]
    InvalidRecord {
        /// Kind of record.
        entity: EntityType,
        /// Record id.
        id: String,
        /// What was wrong.
        reason: String,
    },

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
