//! In-memory store.
//!
//! The default (and only bundled) `Store` implementation. Participants
//! live in a concurrent map with a side list preserving registration
//! order; the message stream is an append-only vector. Locks are held
//! only for the duration of each call, never across awaits.

use crate::traits::{Store, StoreError};
use async_trait::async_trait;
use dashmap::DashMap;
use parlor_model::{Message, Participant};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory document store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Participants by name.
    participants: DashMap<String, Participant>,
    /// Names in registration order.
    order: RwLock<Vec<String>>,
    /// Append-only message stream, insertion order = chronological order.
    messages: RwLock<Vec<Message>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, StoreError> {
        lock.read()
            .map_err(|_| StoreError::Unavailable("poisoned lock".into()))
    }

    fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, StoreError> {
        lock.write()
            .map_err(|_| StoreError::Unavailable("poisoned lock".into()))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_participant(&self, participant: Participant) -> Result<(), StoreError> {
        let name = participant.name.clone();
        if self.participants.insert(name.clone(), participant).is_none() {
            Self::write(&self.order)?.push(name);
        }
        Ok(())
    }

    async fn find_participant(&self, name: &str) -> Result<Option<Participant>, StoreError> {
        Ok(self.participants.get(name).map(|p| p.clone()))
    }

    async fn list_participants(&self) -> Result<Vec<Participant>, StoreError> {
        let order = Self::read(&self.order)?;
        Ok(order
            .iter()
            .filter_map(|name| self.participants.get(name).map(|p| p.clone()))
            .collect())
    }

    async fn touch_participant(&self, name: &str, last_seen: u64) -> Result<bool, StoreError> {
        match self.participants.get_mut(name) {
            Some(mut p) => {
                p.last_seen = last_seen;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove_participant(&self, name: &str) -> Result<bool, StoreError> {
        let removed = self.participants.remove(name).is_some();
        if removed {
            Self::write(&self.order)?.retain(|n| n != name);
        }
        Ok(removed)
    }

    async fn insert_message(&self, message: Message) -> Result<(), StoreError> {
        Self::write(&self.messages)?.push(message);
        Ok(())
    }

    async fn list_messages(&self) -> Result<Vec<Message>, StoreError> {
        Ok(Self::read(&self.messages)?.clone())
    }
}
