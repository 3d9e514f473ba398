//! Presence registry.
//!
//! Tracks the set of active participants and their last-seen timestamps,
//! and owns the eviction sweep that removes the stale and emits departure
//! notices into the shared message stream.
//!
//! Lifecycle per participant:
//!
//! ```text
//! unregistered ──register──▶ active ──sweep timeout──▶ removed
//!                              ▲ │
//!                              └─┘ heartbeat
//! ```
//!
//! There is no explicit logout; departure is inferred from silence.

use crate::clock::{wall_time, Clock};
use crate::error::ChatError;
use parlor_model::{validate_name, Message, Participant};
use parlor_store::Store;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// The presence registry.
///
/// Cheap to clone; both handles point at the same store and clock.
#[derive(Clone)]
pub struct Registry {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    stale_after: Duration,
}

impl Registry {
    /// Create a registry over the given collaborators.
    ///
    /// `stale_after` is how long a participant may stay silent before the
    /// sweep evicts it.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>, stale_after: Duration) -> Self {
        Self {
            store,
            clock,
            stale_after,
        }
    }

    /// Register a new participant.
    ///
    /// Inserts the participant and appends a `status` "joined" notice. The
    /// two writes are independent: a failure after the insert leaves a
    /// registered participant without a join notice, which is tolerated
    /// and not rolled back.
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed name, `Conflict` when the name is
    /// taken, `Store` when persistence fails. The duplicate check is
    /// check-then-insert; concurrent registrations of the same name can
    /// both pass it (the store holds one row, the stream two notices).
    pub async fn register(&self, name: &str) -> Result<(), ChatError> {
        let mut violations = Vec::new();
        if let Err(v) = validate_name(name) {
            violations.push(v.to_string());
        }
        if !violations.is_empty() {
            return Err(ChatError::validation(violations));
        }

        if self.store.find_participant(name).await?.is_some() {
            debug!(participant = %name, "Registration conflict");
            return Err(ChatError::Conflict(name.to_string()));
        }

        let now = self.clock.now_ms();
        self.store
            .insert_participant(Participant::new(name, now))
            .await?;
        self.store
            .insert_message(Message::status(name, "joined", wall_time(now)))
            .await?;

        info!(participant = %name, "Registered");
        Ok(())
    }

    /// List all currently registered participants. Side-effect-free.
    ///
    /// # Errors
    ///
    /// `Store` when persistence fails.
    pub async fn list(&self) -> Result<Vec<Participant>, ChatError> {
        Ok(self.store.list_participants().await?)
    }

    /// Refresh a participant's liveness timestamp.
    ///
    /// # Errors
    ///
    /// `NotFound` when no such participant is registered.
    pub async fn heartbeat(&self, name: &str) -> Result<(), ChatError> {
        let now = self.clock.now_ms();
        if self.store.touch_participant(name, now).await? {
            debug!(participant = %name, "Heartbeat");
            Ok(())
        } else {
            Err(ChatError::NotFound(name.to_string()))
        }
    }

    /// Evict every participant that has been silent longer than the
    /// staleness threshold, appending a `status` "left" notice for each.
    ///
    /// Returns the evicted names. Per-participant failures are logged and
    /// skipped so one bad record cannot halt eviction of the others; there
    /// is no caller to propagate them to.
    pub async fn sweep(&self) -> Vec<String> {
        let now = self.clock.now_ms();
        let timeout_ms = self.stale_after.as_millis() as u64;

        let participants = match self.store.list_participants().await {
            Ok(list) => list,
            Err(e) => {
                warn!(error = %e, "Sweep could not list participants");
                return Vec::new();
            }
        };

        let mut evicted = Vec::new();
        for participant in participants {
            if !participant.is_stale(now, timeout_ms) {
                continue;
            }
            match self.evict(&participant.name, now).await {
                Ok(true) => evicted.push(participant.name),
                // Already gone: removed concurrently, nothing to do.
                Ok(false) => {}
                Err(e) => {
                    warn!(participant = %participant.name, error = %e, "Eviction failed")
                }
            }
        }

        if !evicted.is_empty() {
            info!(count = evicted.len(), "Swept stale participants");
        }
        evicted
    }

    async fn evict(&self, name: &str, now: u64) -> Result<bool, ChatError> {
        if !self.store.remove_participant(name).await? {
            return Ok(false);
        }
        self.store
            .insert_message(Message::status(name, "left", wall_time(now)))
            .await?;
        debug!(participant = %name, "Evicted stale participant");
        Ok(true)
    }
}
