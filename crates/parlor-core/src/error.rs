//! Error taxonomy for core operations.

use parlor_store::StoreError;
use thiserror::Error;

/// Core operation errors.
///
/// All variants except `Store` are caller mistakes and non-retryable; the
/// caller must correct its input. Store failures surface unchanged and are
/// never retried here.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Malformed input; carries every violation, not just the first.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// A participant with this name is already registered.
    #[error("Participant already registered: {0}")]
    Conflict(String),

    /// No participant with this name.
    #[error("Participant not found: {0}")]
    NotFound(String),

    /// Message sender is not a registered participant.
    #[error("Unknown sender: {0}")]
    UnknownSender(String),

    /// The store failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ChatError {
    /// Build a validation error from collected violations.
    ///
    /// Must only be called with a non-empty list.
    #[must_use]
    pub fn validation(violations: Vec<String>) -> Self {
        debug_assert!(!violations.is_empty());
        ChatError::Validation(violations)
    }
}
