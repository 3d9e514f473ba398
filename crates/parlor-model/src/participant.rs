//! Participant record.
//!
//! A participant is a registered named actor. Its `last_seen` timestamp is
//! refreshed by heartbeats and read by the eviction sweep.

use serde::{Deserialize, Serialize};

/// A registered chat participant.
///
/// The name doubles as the unique key and the display name. Uniqueness is
/// enforced at registration time, not by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique display name.
    pub name: String,
    /// Last heartbeat or registration time, epoch milliseconds.
    #[serde(rename = "lastSeen")]
    pub last_seen: u64,
}

impl Participant {
    /// Create a participant seen now.
    #[must_use]
    pub fn new(name: impl Into<String>, last_seen: u64) -> Self {
        Self {
            name: name.into(),
            last_seen,
        }
    }

    /// Check if this participant is stale (no heartbeat within `timeout_ms`).
    #[must_use]
    pub fn is_stale(&self, now_ms: u64, timeout_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_seen) > timeout_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_staleness() {
        let p = Participant::new("alice", 1_000);

        assert!(!p.is_stale(5_000, 10_000));
        assert!(!p.is_stale(11_000, 10_000)); // exactly at the threshold
        assert!(p.is_stale(11_001, 10_000));
    }

    #[test]
    fn test_participant_staleness_clock_skew() {
        // A last_seen in the future must not underflow.
        let p = Participant::new("alice", 5_000);
        assert!(!p.is_stale(1_000, 10_000));
    }

    #[test]
    fn test_participant_serde_shape() {
        let p = Participant::new("alice", 42);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["name"], "alice");
        assert_eq!(json["lastSeen"], 42);
    }
}
