//! Message router.
//!
//! Accepts inbound messages, validates addressing, persists them, and
//! computes the per-reader visible slice of the stream.

use crate::clock::{wall_time, Clock};
use crate::error::ChatError;
use parlor_model::{validate_recipient, validate_text, Message, MessageKind};
use parlor_store::Store;
use std::sync::Arc;
use tracing::debug;

/// The message router.
///
/// Cheap to clone; both handles point at the same store and clock.
#[derive(Clone)]
pub struct MessageRouter {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
}

impl MessageRouter {
    /// Create a router over the given collaborators.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Post a message from a registered participant.
    ///
    /// A `broadcast` addresses the reserved "everyone" audience; `to` on a
    /// `direct` names a specific participant but is not required to be
    /// currently registered, only well-formed.
    ///
    /// # Errors
    ///
    /// `Validation` carrying every shape violation, `UnknownSender` when
    /// `from` is not registered, `Store` when persistence fails.
    pub async fn post(
        &self,
        from: &str,
        to: &str,
        text: &str,
        kind: MessageKind,
    ) -> Result<(), ChatError> {
        let mut violations = Vec::new();
        if let Err(v) = validate_recipient(to) {
            violations.push(v.to_string());
        }
        if let Err(v) = validate_text(text) {
            violations.push(v.to_string());
        }
        if !kind.is_postable() {
            violations.push("kind must be \"broadcast\" or \"direct\"".to_string());
        }
        if !violations.is_empty() {
            return Err(ChatError::validation(violations));
        }

        if self.store.find_participant(from).await?.is_none() {
            return Err(ChatError::UnknownSender(from.to_string()));
        }

        let time = wall_time(self.clock.now_ms());
        self.store
            .insert_message(Message::new(from, to, text, kind, time))
            .await?;

        debug!(from = %from, to = %to, kind = ?kind, "Message posted");
        Ok(())
    }

    /// List the messages visible to `reader`, most recent first.
    ///
    /// `reader` may be empty (an unauthenticated caller sees only
    /// broadcast and status rows). With `limit`, only the most recent
    /// `limit` visible messages are returned, still most-recent-first.
    ///
    /// # Errors
    ///
    /// `Validation` when `limit` is not a positive integer, `Store` when
    /// persistence fails.
    pub async fn list(&self, reader: &str, limit: Option<i64>) -> Result<Vec<Message>, ChatError> {
        let limit = match limit {
            Some(n) if n < 1 => {
                return Err(ChatError::validation(vec![
                    "limit must be a positive integer".to_string(),
                ]))
            }
            Some(n) => Some(n as usize),
            None => None,
        };

        let mut visible: Vec<Message> = self
            .store
            .list_messages()
            .await?
            .into_iter()
            .filter(|m| m.visible_to(reader))
            .collect();
        visible.reverse();

        if let Some(n) = limit {
            visible.truncate(n);
        }
        Ok(visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::registry::Registry;
    use parlor_model::{Participant, BROADCAST_TO};
    use parlor_store::MemoryStore;
    use std::time::Duration;

    fn setup() -> (MessageRouter, Arc<MemoryStore>, Arc<ManualClock>) {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(0));
        let router = MessageRouter::new(store.clone(), clock.clone());
        (router, store, clock)
    }

    async fn seed_participant(store: &MemoryStore, name: &str) {
        store
            .insert_participant(Participant::new(name, 0))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_post_persists_with_wall_time() {
        let (router, store, clock) = setup();
        seed_participant(&store, "alice").await;
        clock.set(37_056_789); // 10:17:36 UTC

        router
            .post("alice", BROADCAST_TO, "hi there", MessageKind::Broadcast)
            .await
            .unwrap();

        let messages = store.list_messages().await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].from, "alice");
        assert_eq!(messages[0].to, "everyone");
        assert_eq!(messages[0].time, "10:17:36");
    }

    #[tokio::test]
    async fn test_post_unknown_sender() {
        let (router, _, _) = setup();

        let err = router
            .post("ghost", "everyone", "hi there", MessageKind::Broadcast)
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::UnknownSender(name) if name == "ghost"));
    }

    #[tokio::test]
    async fn test_post_aggregates_all_violations() {
        let (router, store, _) = setup();
        seed_participant(&store, "alice").await;

        let err = router
            .post("alice", "yo", "hi", MessageKind::Status)
            .await
            .unwrap_err();

        match err {
            ChatError::Validation(violations) => assert_eq!(violations.len(), 3),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(store.list_messages().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_post_rejects_status_kind() {
        let (router, store, _) = setup();
        seed_participant(&store, "alice").await;

        assert!(matches!(
            router
                .post("alice", "everyone", "sneaky notice", MessageKind::Status)
                .await,
            Err(ChatError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_direct_hidden_from_third_parties() {
        let (router, store, _) = setup();
        seed_participant(&store, "alice").await;

        router
            .post("alice", "bob", "our secret", MessageKind::Direct)
            .await
            .unwrap();

        assert_eq!(router.list("alice", None).await.unwrap().len(), 1);
        assert_eq!(router.list("bob", None).await.unwrap().len(), 1);
        assert!(router.list("carol", None).await.unwrap().is_empty());
        assert!(router.list("", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_broadcast_and_status_visible_to_everyone() {
        let (router, store, _) = setup();
        seed_participant(&store, "alice").await;

        store
            .insert_message(Message::status("bob", "joined", "00:00:00"))
            .await
            .unwrap();
        router
            .post("alice", "everyone", "hi all", MessageKind::Broadcast)
            .await
            .unwrap();

        for reader in ["alice", "bob", "carol", ""] {
            assert_eq!(router.list(reader, None).await.unwrap().len(), 2);
        }
    }

    #[tokio::test]
    async fn test_list_most_recent_first() {
        let (router, store, _) = setup();
        seed_participant(&store, "alice").await;

        for text in ["first one", "second one", "third one"] {
            router
                .post("alice", "everyone", text, MessageKind::Broadcast)
                .await
                .unwrap();
        }

        let texts: Vec<String> = router
            .list("", None)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.text)
            .collect();
        assert_eq!(texts, ["third one", "second one", "first one"]);
    }

    #[tokio::test]
    async fn test_limit_is_a_prefix_of_the_full_listing() {
        let (router, store, _) = setup();
        seed_participant(&store, "alice").await;

        for i in 0..5 {
            router
                .post("alice", "everyone", &format!("message {i}"), MessageKind::Broadcast)
                .await
                .unwrap();
        }

        let all = router.list("bob", None).await.unwrap();
        let limited = router.list("bob", Some(2)).await.unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[..], all[..2]);

        // Limit larger than the stream returns everything.
        let generous = router.list("bob", Some(100)).await.unwrap();
        assert_eq!(generous.len(), 5);
    }

    #[tokio::test]
    async fn test_limit_must_be_positive() {
        let (router, _, _) = setup();

        assert!(matches!(
            router.list("alice", Some(0)).await,
            Err(ChatError::Validation(_))
        ));
        assert!(matches!(
            router.list("alice", Some(-1)).await,
            Err(ChatError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_limit_counts_visible_messages_only() {
        let (router, store, _) = setup();
        seed_participant(&store, "alice").await;

        router
            .post("alice", "bob", "secret one", MessageKind::Direct)
            .await
            .unwrap();
        router
            .post("alice", "everyone", "public one", MessageKind::Broadcast)
            .await
            .unwrap();
        router
            .post("alice", "bob", "secret two", MessageKind::Direct)
            .await
            .unwrap();

        // carol sees only the broadcast; the limit applies after filtering.
        let listing = router.list("carol", Some(2)).await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].text, "public one");
    }

    #[tokio::test]
    async fn test_register_then_post_then_read_scenario() {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(0));
        let registry = Registry::new(store.clone(), clock.clone(), Duration::from_secs(10));
        let router = MessageRouter::new(store.clone(), clock.clone());

        registry.register("alice").await.unwrap();
        assert!(matches!(
            registry.register("alice").await,
            Err(ChatError::Conflict(_))
        ));

        router
            .post("alice", "everyone", "hi there", MessageKind::Broadcast)
            .await
            .unwrap();

        let seen_by_bob = router.list("bob", None).await.unwrap();
        assert!(seen_by_bob
            .iter()
            .any(|m| m.text == "hi there" && m.kind == MessageKind::Broadcast));
    }
}
