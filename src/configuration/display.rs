//! Display-name manager: validates, truncates and persists the user's
//! free-text identifier.
//!
//! # Contract
//!
//! [`DisplayNameManager::on_name_change`] runs after every edit:
//!
//! - no name set → no-op, the length flag resets to `false`;
//! - at most 199 characters → name unchanged, flag `false`;
//! - longer than 199 characters → name truncated to exactly the first
//!   199 characters and flag `true`, however large the overflow was.
//!
//! The validator itself never writes to the store; [`initialize`] and
//! [`save`] handle the best-effort load/write-through around it.
//!
//! [`initialize`]: DisplayNameManager::initialize
//! [`save`]: DisplayNameManager::save

use std::sync::Arc;

use crate::store::{PreferenceStore, ReadOutcome};

/// Preference-store key owned by this manager.
pub const DISPLAY_NAME_KEY: &str = "displayName";

/// Maximum effective display-name length, in Unicode scalar values.
pub const MAX_DISPLAY_NAME_CHARS: usize = 199;

/// Per-session manager for the user's display name.
pub struct DisplayNameManager {
    store: Arc<dyn PreferenceStore>,
    name: Option<String>,
    length_error: bool,
}

impl DisplayNameManager {
    /// Create a manager with no name set.  Call [`initialize`] before
    /// reading state.
    ///
    /// [`initialize`]: DisplayNameManager::initialize
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            store,
            name: None,
            length_error: false,
        }
    }

    /// Load the stored display name, if any.
    ///
    /// A stored value is adopted and re-validated (a hand-edited document
    /// can hold an oversized name).  `Empty` and `Failure` both leave the
    /// in-memory state untouched.
    pub async fn initialize(&mut self) {
        match self.store.get_item(DISPLAY_NAME_KEY).await {
            ReadOutcome::Value(stored) => {
                self.name = Some(stored);
                self.on_name_change();
            }
            ReadOutcome::Empty => {}
            ReadOutcome::Failure(e) => {
                log::debug!("stored display name unavailable ({e}); keeping current state");
            }
        }
    }

    /// The current (already normalized) display name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether the last change exceeded [`MAX_DISPLAY_NAME_CHARS`] and was
    /// truncated.  UI feedback only, never an error.
    pub fn length_error(&self) -> bool {
        self.length_error
    }

    /// Replace the raw name, as a UI binding does on every keystroke.
    /// Callers follow up with [`on_name_change`].
    ///
    /// [`on_name_change`]: DisplayNameManager::on_name_change
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Validate and normalize the current name.
    pub fn on_name_change(&mut self) {
        self.length_error = false;

        let Some(name) = self.name.as_mut() else {
            return;
        };

        if let Some((boundary, _)) = name.char_indices().nth(MAX_DISPLAY_NAME_CHARS) {
            name.truncate(boundary);
            self.length_error = true;
        }
    }

    /// Best-effort write-through of the current name to the store.
    ///
    /// A write failure is logged and ignored; the in-memory name stays as
    /// is and nothing is retried.
    pub async fn save(&self) {
        let Some(name) = self.name.as_deref() else {
            return;
        };

        if let Err(e) = self.store.set_item(DISPLAY_NAME_KEY, name).await {
            log::warn!("could not persist display name: {e}");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError};
    use async_trait::async_trait;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// A store whose every operation fails.
    struct BrokenStore;

    #[async_trait]
    impl PreferenceStore for BrokenStore {
        async fn get_item(&self, _key: &str) -> ReadOutcome {
            ReadOutcome::Failure(StoreError::Io("disk gone".into()))
        }

        async fn set_item(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io("disk gone".into()))
        }
    }

    fn manager() -> DisplayNameManager {
        DisplayNameManager::new(Arc::new(MemoryStore::new()))
    }

    fn repeated(c: char, len: usize) -> String {
        std::iter::repeat(c).take(len).collect()
    }

    // -----------------------------------------------------------------------
    // on_name_change
    // -----------------------------------------------------------------------

    #[test]
    fn no_name_is_a_no_op() {
        let mut mgr = manager();
        mgr.on_name_change();

        assert_eq!(mgr.name(), None);
        assert!(!mgr.length_error());
    }

    #[test]
    fn short_name_is_unchanged() {
        let mut mgr = manager();
        mgr.set_name("aName");
        mgr.on_name_change();

        assert_eq!(mgr.name(), Some("aName"));
        assert!(!mgr.length_error());
    }

    #[test]
    fn exactly_max_length_is_unchanged_and_unflagged() {
        let name = repeated('a', MAX_DISPLAY_NAME_CHARS);
        let mut mgr = manager();
        mgr.set_name(name.clone());
        mgr.on_name_change();

        assert_eq!(mgr.name(), Some(name.as_str()));
        assert!(!mgr.length_error());
    }

    #[test]
    fn two_hundred_chars_truncate_to_max() {
        let mut mgr = manager();
        mgr.set_name(repeated('a', 200));
        mgr.on_name_change();

        assert_eq!(mgr.name(), Some(repeated('a', 199).as_str()));
        assert!(mgr.length_error());
    }

    #[test]
    fn truncation_is_independent_of_overflow_amount() {
        let mut mgr = manager();
        mgr.set_name(repeated('a', 250));
        mgr.on_name_change();

        assert_eq!(mgr.name(), Some(repeated('a', 199).as_str()));
        assert!(mgr.length_error());
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        // 'ß' is two bytes in UTF-8; byte-indexed truncation would panic
        // or cut mid-code-point.
        let mut mgr = manager();
        mgr.set_name(repeated('ß', 250));
        mgr.on_name_change();

        assert_eq!(mgr.name(), Some(repeated('ß', 199).as_str()));
        assert!(mgr.length_error());
    }

    #[test]
    fn flag_resets_on_subsequent_valid_change() {
        let mut mgr = manager();
        mgr.set_name(repeated('a', 250));
        mgr.on_name_change();
        assert!(mgr.length_error());

        mgr.set_name("short");
        mgr.on_name_change();
        assert!(!mgr.length_error());
        assert_eq!(mgr.name(), Some("short"));
    }

    // -----------------------------------------------------------------------
    // initialize
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn initialize_adopts_stored_name() {
        let store = Arc::new(MemoryStore::seeded([(DISPLAY_NAME_KEY, "Alice")]));
        let mut mgr = DisplayNameManager::new(store);
        mgr.initialize().await;

        assert_eq!(mgr.name(), Some("Alice"));
        assert!(!mgr.length_error());
    }

    #[tokio::test]
    async fn initialize_truncates_oversized_stored_name() {
        let oversized = repeated('a', 300);
        let store = Arc::new(MemoryStore::seeded([(DISPLAY_NAME_KEY, oversized)]));
        let mut mgr = DisplayNameManager::new(store);
        mgr.initialize().await;

        assert_eq!(mgr.name(), Some(repeated('a', 199).as_str()));
        assert!(mgr.length_error());
    }

    #[tokio::test]
    async fn initialize_with_empty_store_leaves_state() {
        let mut mgr = manager();
        mgr.initialize().await;

        assert_eq!(mgr.name(), None);
        assert!(!mgr.length_error());
    }

    #[tokio::test]
    async fn initialize_with_broken_store_leaves_state() {
        let mut mgr = DisplayNameManager::new(Arc::new(BrokenStore));
        mgr.initialize().await;

        assert_eq!(mgr.name(), None);
        assert!(!mgr.length_error());
    }

    // -----------------------------------------------------------------------
    // save
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn save_writes_through() {
        let store = Arc::new(MemoryStore::new());
        let mut mgr = DisplayNameManager::new(Arc::clone(&store) as Arc<dyn PreferenceStore>);
        mgr.set_name("Bob");
        mgr.on_name_change();
        mgr.save().await;

        let outcome = store.get_item(DISPLAY_NAME_KEY).await;
        assert!(matches!(outcome, ReadOutcome::Value(v) if v == "Bob"));
    }

    #[tokio::test]
    async fn save_without_a_name_writes_nothing() {
        let store = Arc::new(MemoryStore::new());
        let mgr = DisplayNameManager::new(Arc::clone(&store) as Arc<dyn PreferenceStore>);
        mgr.save().await;

        assert!(matches!(
            store.get_item(DISPLAY_NAME_KEY).await,
            ReadOutcome::Empty
        ));
    }

    #[tokio::test]
    async fn save_absorbs_store_failure() {
        let mut mgr = DisplayNameManager::new(Arc::new(BrokenStore));
        mgr.set_name("Carol");
        mgr.on_name_change();
        // Must not panic or alter the in-memory name.
        mgr.save().await;

        assert_eq!(mgr.name(), Some("Carol"));
    }
}
