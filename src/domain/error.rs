//! Domain Layer - Errors
//!
//! Common error and result types shared by every layer of the engine.

use serde::{Deserialize, Serialize};

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
///
/// Serializable so errors can cross an IPC boundary to a UI host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainError {
    /// Board or item absent; surfaced as an empty/error state, never fatal
    NotFound(String),
    /// Malformed input (bad schema change, out-of-range position, ...)
    InvalidInput(String),
    /// Remote persistence call failed
    Persistence(String),
    Internal(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::Persistence(msg) => write!(f, "Persistence error: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
