//! Error types for the swap engine

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type for swap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Swap engine errors
///
/// Every error aborts the whole operation with no partial state change; the
/// registry restores its pre-call state and compensates any external
/// transfer already performed. Retries are the caller's business.
#[derive(Error, Debug)]
pub enum Error {
    /// Custody ledger error
    #[error("Custody error: {0}")]
    Custody(#[from] custody_core::Error),

    /// Referenced proposal or asset has no live record
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller lacks the required custody/creator relationship
    #[error("Not owner: {0}")]
    NotOwner(String),

    /// Proposal past its expiry
    #[error("Expired: {0}")]
    Expired(String),

    /// Attached or realized funds differ from the required amount
    #[error("Amount mismatch: expected {expected}, realized {realized}")]
    AmountMismatch {
        /// Amount the operation required
        expected: Decimal,
        /// Amount actually attached or received
        realized: Decimal,
    },

    /// External asset or funds transfer did not complete
    #[error("Transfer rejected: {0}")]
    TransferRejected(String),

    /// Outbound payment was refused by the recipient
    #[error("Payout failed: {0}")]
    PayoutFailed(String),

    /// Malformed or disallowed input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A state-mutating entry point re-entered while another was active
    #[error("Operation already in progress")]
    Reentrancy,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
