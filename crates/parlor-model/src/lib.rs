//! # parlor-model
//!
//! Domain records shared by every layer of the Parlor chat backend.
//!
//! This crate defines the two records the system persists, the message
//! kinds, and the field-level validation rules applied at the edges:
//!
//! - `Participant` - a registered named actor and its liveness timestamp
//! - `Message` - one immutable entry in the shared message stream
//! - `MessageKind` - `broadcast`, `direct`, or system `status`
//!
//! ## Example
//!
//! ```rust
//! use parlor_model::{Message, MessageKind, BROADCAST_TO};
//!
//! let msg = Message::new("alice", BROADCAST_TO, "hi there", MessageKind::Broadcast, "12:00:00");
//! assert!(msg.kind.is_postable());
//! ```

pub mod message;
pub mod participant;
pub mod validate;

pub use message::{Message, MessageKind, BROADCAST_TO};
pub use participant::Participant;
pub use validate::{validate_name, validate_recipient, validate_text};
