//! # parlor-store
//!
//! Persistence abstraction for the Parlor chat backend.
//!
//! The core never talks to a concrete database. It is handed a
//! [`Store`] trait object covering two collections, `participants` and
//! `messages`, with plain insert/find/update/delete capabilities - no
//! transactions, joins, or aggregations. The store is also the sole
//! synchronization point between concurrent request handlers and the
//! background eviction sweep.
//!
//! ```rust,ignore
//! use parlor_store::{MemoryStore, Store};
//! use std::sync::Arc;
//!
//! let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
//! ```

pub mod memory;
pub mod traits;

pub use memory::MemoryStore;
pub use traits::{Store, StoreError};
