// src/services/chat_storage.rs
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::{Arc, RwLock},
};

use tracing::debug;

use crate::error::StorageError;

const CHAT_ID_KEY: &str = "chatId";
const USER_NAME_KEY: &str = "userName";
const PROBE_KEY: &str = "__test__";

/// String key-value store scoped to one client "tab".
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process store. Its contents live as long as the client process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self.inner.read().map_err(|_| StorageError::Unavailable)?;
        Ok(guard.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self.inner.write().map_err(|_| StorageError::Unavailable)?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self.inner.write().map_err(|_| StorageError::Unavailable)?;
        guard.remove(key);
        Ok(())
    }
}

/// Chat id and user name of the current tab. Storage failures read as "absent".
#[derive(Clone)]
pub struct ChatStorage {
    store: Arc<dyn KeyValueStore>,
}

impl Debug for ChatStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatStorage").finish_non_exhaustive()
    }
}

impl ChatStorage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    fn is_available(&self) -> bool {
        self.store
            .set_item(PROBE_KEY, PROBE_KEY)
            .and_then(|_| self.store.remove_item(PROBE_KEY))
            .is_ok()
    }

    fn read(&self, key: &str) -> Option<String> {
        if !self.is_available() {
            debug!(key, "storage unavailable, treating as absent");
            return None;
        }
        self.store.get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: &str) {
        if !self.is_available() {
            debug!(key, "storage unavailable, dropping write");
            return;
        }
        if let Err(e) = self.store.set_item(key, value) {
            debug!(key, error = %e, "storage write failed");
        }
    }

    pub fn set_id(&self, id: u64) {
        self.write(CHAT_ID_KEY, &id.to_string());
    }

    /// Stored chat id, `0` when nothing usable is stored.
    pub fn get_id(&self) -> u64 {
        self.read(CHAT_ID_KEY)
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn set_user_name(&self, name: &str) {
        self.write(USER_NAME_KEY, name);
    }

    pub fn get_user_name(&self) -> String {
        self.read(USER_NAME_KEY).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }
        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn empty_store_reads_defaults() {
        let storage = ChatStorage::in_memory();
        assert_eq!(storage.get_id(), 0);
        assert_eq!(storage.get_user_name(), "");
    }

    #[test]
    fn last_write_wins() {
        let storage = ChatStorage::in_memory();
        storage.set_id(42);
        assert_eq!(storage.get_id(), 42);
        storage.set_id(7);
        assert_eq!(storage.get_id(), 7);

        storage.set_user_name("Alice");
        assert_eq!(storage.get_user_name(), "Alice");
    }

    #[test]
    fn clones_share_the_same_tab() {
        let storage = ChatStorage::in_memory();
        let other = storage.clone();
        storage.set_id(17);
        assert_eq!(other.get_id(), 17);
    }

    #[test]
    fn unavailable_storage_is_swallowed() {
        let storage = ChatStorage::new(Arc::new(BrokenStore));
        storage.set_id(42);
        storage.set_user_name("Alice");
        assert_eq!(storage.get_id(), 0);
        assert_eq!(storage.get_user_name(), "");
    }

    #[test]
    fn garbage_id_reads_as_absent() {
        let store = Arc::new(MemoryStore::new());
        store.set_item(CHAT_ID_KEY, "not-a-number").unwrap();
        let storage = ChatStorage::new(store);
        assert_eq!(storage.get_id(), 0);
    }
}
