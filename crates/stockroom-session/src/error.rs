//! # Session Error Type
//!
//! Unified error type for session operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockroom                              │
//! │                                                                         │
//! │  Session operation                                                      │
//! │  Result<T, SessionError>                                                │
//! │         │                                                               │
//! │         ├── Core validation?  ValidationError ──► Validation           │
//! │         ├── Domain rule?      CoreError ────────► Domain / NotFound    │
//! │         ├── Record store?     DbError ──────────► Storage / NotFound   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Caller matches on the taxonomy:                                       │
//! │    NotFound   → 404-style handling                                     │
//! │    Validation → show the field error on the form                       │
//! │    Domain     → business rule message                                  │
//! │    Storage    → retry/report, message surfaced verbatim                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No retries happen at this layer: transient storage failures surface
//! immediately and retry policy belongs to the caller.

use thiserror::Error;

use stockroom_core::{CoreError, ValidationError};
use stockroom_db::DbError;

/// Error returned by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Referenced record does not exist in the session's tenant scope.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Input rejected before any persistence call was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A domain rule was violated (empty order, oversized quantity, ...).
    #[error(transparent)]
    Domain(CoreError),

    /// The record store rejected a read or write. The driver's message is
    /// carried along verbatim.
    #[error("Storage error: {0}")]
    Storage(DbError),
}

impl SessionError {
    /// Creates a not found error.
    pub fn not_found(entity: &str, id: &str) -> Self {
        SessionError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }
}

/// Converts core errors, pulling not-found and validation cases into their
/// own taxonomy slots.
impl From<CoreError> for SessionError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => SessionError::not_found("Product", &id),
            CoreError::OrderNotFound(id) => SessionError::not_found("Order", &id),
            CoreError::Validation(e) => SessionError::Validation(e),
            other => SessionError::Domain(other),
        }
    }
}

/// Converts record store errors, pulling not-found into its taxonomy slot.
impl From<DbError> for SessionError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => SessionError::NotFound { entity, id },
            other => SessionError::Storage(other),
        }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

// =============================================================================
// Unit Tests
// =============================================================================
