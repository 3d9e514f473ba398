//! # parlor-core
//!
//! Presence lifecycle and message visibility for the Parlor chat backend.
//!
//! This crate holds the two components with real design content:
//!
//! - **Registry** - tracks active participants and their last-seen
//!   timestamps, and owns the eviction sweep
//! - **MessageRouter** - accepts inbound messages, validates addressing,
//!   and computes the per-reader visible slice of the stream
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│             │
//! └─────────────┘     │    Store    │
//! ┌─────────────┐     │ (documents) │
//! │MessageRouter│────▶│             │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! Both components write into the same message stream: the registry emits
//! `status` join/leave notices, the router persists user messages. The
//! store is the only coupling between them.

pub mod clock;
pub mod error;
pub mod registry;
pub mod router;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::ChatError;
pub use registry::Registry;
pub use router::MessageRouter;
