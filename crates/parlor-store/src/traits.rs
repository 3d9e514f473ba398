//! Store abstraction traits for Parlor.
//!
//! These traits define the contract the core expects from a document
//! store, allowing the registry and router to be storage-agnostic.

use async_trait::async_trait;
use parlor_model::{Message, Participant};
use thiserror::Error;

/// Store errors.
///
/// Every failure is terminal for the call that hit it; the core performs
/// no retries and surfaces these as internal errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached or refused the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A stored record could not be decoded.
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// A document store holding the `participants` and `messages` collections.
///
/// Implementations must tolerate interleaved reads and writes from
/// concurrent handlers and the eviction sweep: a reader either sees a
/// record or it does not, never a torn one. Uniqueness of participant
/// names is NOT enforced here - the registry performs a best-effort
/// check-then-insert.
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a participant record.
    async fn insert_participant(&self, participant: Participant) -> Result<(), StoreError>;

    /// Find one participant by name.
    async fn find_participant(&self, name: &str) -> Result<Option<Participant>, StoreError>;

    /// List all participants in registration order.
    async fn list_participants(&self) -> Result<Vec<Participant>, StoreError>;

    /// Update one participant's `last_seen` by name.
    ///
    /// Returns `false` when no such participant exists.
    async fn touch_participant(&self, name: &str, last_seen: u64) -> Result<bool, StoreError>;

    /// Delete one participant by name.
    ///
    /// Returns `false` when no such participant exists.
    async fn remove_participant(&self, name: &str) -> Result<bool, StoreError>;

    /// Append a message to the stream.
    async fn insert_message(&self, message: Message) -> Result<(), StoreError>;

    /// List the full message stream in insertion order.
    ///
    /// Insertion order is the chronological order; callers apply their own
    /// visibility filtering and reversal.
    async fn list_messages(&self) -> Result<Vec<Message>, StoreError>;
}
