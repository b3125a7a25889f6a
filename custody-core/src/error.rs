//! Error types for the custody ledger

use thiserror::Error;

/// Result type for custody operations
pub type Result<T> = std::result::Result<T, Error>;

/// Custody errors
#[derive(Error, Debug)]
pub enum Error {
    /// Referenced asset has no live record
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller lacks the required ownership relationship
    #[error("Not owner: {0}")]
    NotOwner(String),

    /// Malformed or disallowed input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// External asset or funds transfer did not complete
    #[error("Transfer rejected: {0}")]
    TransferRejected(String),

    /// Cross-reference invariant violated (owner index vs reverse index)
    #[error("Index inconsistency: {0}")]
    Inconsistent(String),
}
