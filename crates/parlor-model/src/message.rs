//! Message records for the shared stream.
//!
//! Messages are created once and never mutated or deleted. Insertion order
//! in the store is the chronological order; the `time` field is a
//! display-only wall-clock string.

use serde::{Deserialize, Serialize};

/// Reserved recipient meaning "every participant".
pub const BROADCAST_TO: &str = "everyone";

/// Message kinds.
///
/// `Broadcast` and `Direct` are user-postable; `Status` rows are emitted by
/// the system on join and leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Visible to every reader.
    Broadcast,
    /// Visible only to sender and recipient.
    Direct,
    /// System join/leave notice, visible to every reader.
    Status,
}

impl MessageKind {
    /// Whether users may post this kind. `Status` is system-only.
    #[must_use]
    pub fn is_postable(self) -> bool {
        matches!(self, MessageKind::Broadcast | MessageKind::Direct)
    }

    /// Wire name of this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Broadcast => "broadcast",
            MessageKind::Direct => "direct",
            MessageKind::Status => "status",
        }
    }
}

/// One entry in the message stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Sender name, or a departed participant's name on status rows.
    pub from: String,
    /// Recipient name, or [`BROADCAST_TO`].
    pub to: String,
    /// Body.
    pub text: String,
    /// Addressing kind; authoritative for visibility.
    pub kind: MessageKind,
    /// Wall-clock creation time, `HH:MM:SS`. Display only.
    pub time: String,
}

impl Message {
    /// Create a new message.
    #[must_use]
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        text: impl Into<String>,
        kind: MessageKind,
        time: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            text: text.into(),
            kind,
            time: time.into(),
        }
    }

    /// Create a system status notice addressed to everyone.
    #[must_use]
    pub fn status(name: impl Into<String>, text: impl Into<String>, time: impl Into<String>) -> Self {
        Self::new(name, BROADCAST_TO, text, MessageKind::Status, time)
    }

    /// Whether `reader` may see this message.
    ///
    /// Kind is authoritative: broadcast and status rows are visible to all
    /// readers regardless of `to`; direct rows only to their endpoints.
    #[must_use]
    pub fn visible_to(&self, reader: &str) -> bool {
        match self.kind {
            MessageKind::Broadcast | MessageKind::Status => true,
            MessageKind::Direct => self.from == reader || self.to == reader,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_postable() {
        assert!(MessageKind::Broadcast.is_postable());
        assert!(MessageKind::Direct.is_postable());
        assert!(!MessageKind::Status.is_postable());
    }

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&MessageKind::Direct).unwrap(),
            "\"direct\""
        );
        let kind: MessageKind = serde_json::from_str("\"broadcast\"").unwrap();
        assert_eq!(kind, MessageKind::Broadcast);
        assert!(serde_json::from_str::<MessageKind>("\"shout\"").is_err());
    }

    #[test]
    fn test_direct_visibility_endpoints_only() {
        let msg = Message::new("alice", "bob", "psst", MessageKind::Direct, "10:00:00");

        assert!(msg.visible_to("alice"));
        assert!(msg.visible_to("bob"));
        assert!(!msg.visible_to("carol"));
        assert!(!msg.visible_to(""));
    }

    #[test]
    fn test_broadcast_visible_even_with_named_recipient() {
        // Kind wins over `to`: a broadcast addressed at bob stays public.
        let msg = Message::new("alice", "bob", "hi all", MessageKind::Broadcast, "10:00:00");
        assert!(msg.visible_to("carol"));
    }

    #[test]
    fn test_status_notice() {
        let msg = Message::status("carol", "left", "10:00:00");
        assert_eq!(msg.to, BROADCAST_TO);
        assert_eq!(msg.kind, MessageKind::Status);
        assert!(msg.visible_to("anyone"));
    }
}
