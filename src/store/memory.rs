//! In-memory preference store for ephemeral sessions and tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::store::{PreferenceStore, ReadOutcome, StoreError};

/// A [`PreferenceStore`] that keeps everything in process memory.
///
/// Nothing survives the process; useful for incognito-style sessions
/// where no preference must touch disk, and as a store double in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with `(key, value)` pairs.
    pub fn seeded<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let items = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            items: Mutex::new(items),
        }
    }
}

#[async_trait]
impl PreferenceStore for MemoryStore {
    async fn get_item(&self, key: &str) -> ReadOutcome {
        match self.items.lock().await.get(key) {
            Some(value) => ReadOutcome::Value(value.clone()),
            None => ReadOutcome::Empty,
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_store_reads_empty() {
        let store = MemoryStore::new();
        assert!(matches!(store.get_item("bitRate").await, ReadOutcome::Empty));
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let store = MemoryStore::new();
        store.set_item("displayName", "Alice").await.expect("set");

        let outcome = store.get_item("displayName").await;
        assert!(matches!(outcome, ReadOutcome::Value(v) if v == "Alice"));
    }

    #[tokio::test]
    async fn seeded_values_are_visible() {
        let store = MemoryStore::seeded([("bitRate", "rate1")]);

        let outcome = store.get_item("bitRate").await;
        assert!(matches!(outcome, ReadOutcome::Value(v) if v == "rate1"));
    }

    #[tokio::test]
    async fn set_overwrites() {
        let store = MemoryStore::seeded([("bitRate", "rate1")]);
        store.set_item("bitRate", "rate2").await.expect("set");

        let outcome = store.get_item("bitRate").await;
        assert!(matches!(outcome, ReadOutcome::Value(v) if v == "rate2"));
    }

    /// MemoryStore must be usable behind `Arc<dyn PreferenceStore>`.
    #[test]
    fn memory_store_is_object_safe() {
        let _: Box<dyn PreferenceStore> = Box::new(MemoryStore::new());
    }
}
