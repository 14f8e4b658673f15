//! Ledger Operation Errors

use lib_types::{Address, Amount, AssetId, Phase};
use thiserror::Error;

/// Error during ledger operations
///
/// Every error aborts the triggering operation in full; no partial
/// mutation is ever retained.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid recipient: zero address")]
    InvalidRecipient,

    #[error("Batch length mismatch: {left} assets, {right} amounts")]
    LengthMismatch { left: usize, right: usize },

    #[error("Unauthorized: {caller} is not {holder} or an approved operator")]
    Unauthorized { caller: Address, holder: Address },

    #[error("Insufficient balance: available {available}, required {required}")]
    InsufficientBalance { available: Amount, required: Amount },

    #[error("Asset already exists: {0} is phase-0 owned")]
    AlreadyExists(AssetId),

    #[error("Asset not found: {0} has no recorded owner")]
    NotFound(AssetId),

    #[error("Invalid phase {phase} for asset {asset}")]
    InvalidPhase { asset: AssetId, phase: Phase },

    #[error("Invalid amount: {0}")]
    InvalidAmount(Amount),

    #[error("Recipient rejected the operation: {0:?}")]
    RecipientRejected(Address),

    #[error("Re-entrant call into a mutating ledger operation")]
    ReentrantCall,

    #[error("Arithmetic overflow")]
    Overflow,
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_balance_carries_amounts() {
        let err = LedgerError::InsufficientBalance {
            available: 5,
            required: 12,
        };
        let msg = err.to_string();
        assert!(msg.contains("available 5"));
        assert!(msg.contains("required 12"));
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = LedgerError::LengthMismatch { left: 3, right: 2 };
        assert_eq!(
            err.to_string(),
            "Batch length mismatch: 3 assets, 2 amounts"
        );
    }
}
