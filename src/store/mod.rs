//! Asynchronous keyed preference store.
//!
//! # Overview
//!
//! [`PreferenceStore`] is the persistence seam the configuration managers
//! talk to.  It is object-safe and `Send + Sync` so it can be held behind
//! an `Arc<dyn PreferenceStore>`.
//!
//! Reads resolve to a [`ReadOutcome`] with three variants — `Value`,
//! `Empty`, `Failure`.  `Empty` (nothing stored under the key) and
//! `Failure` (the store itself broke) currently feed the same default
//! policy in every manager, but they are distinct situations and are kept
//! as distinct variants.
//!
//! [`FileStore`] persists one JSON document per named instance under the
//! platform data directory; [`MemoryStore`] keeps everything in process
//! memory (ephemeral sessions, tests).

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

// ---------------------------------------------------------------------------
// StoreError
// ---------------------------------------------------------------------------

/// All errors that can arise from the preference store.
///
/// Carries stringified causes so the error stays `Clone` — a failed read
/// is embedded in [`ReadOutcome::Failure`], which test doubles hand out
/// repeatedly.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The underlying storage could not be read or written.
    #[error("storage I/O failed: {0}")]
    Io(String),

    /// The stored document exists but could not be parsed.
    #[error("stored document is malformed: {0}")]
    Malformed(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Malformed(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// ReadOutcome
// ---------------------------------------------------------------------------

/// The three-way result of [`PreferenceStore::get_item`].
///
/// Callers must branch on all three arms; `Empty` and `Failure` are never
/// collapsed even where today's policy treats them alike.
#[derive(Debug, Clone)]
pub enum ReadOutcome {
    /// A value is stored under the key.
    Value(String),
    /// The store is reachable but holds nothing under the key.
    Empty,
    /// The store could not be consulted.
    Failure(StoreError),
}

impl From<Result<Option<String>, StoreError>> for ReadOutcome {
    fn from(res: Result<Option<String>, StoreError>) -> Self {
        match res {
            Ok(Some(value)) => ReadOutcome::Value(value),
            Ok(None) => ReadOutcome::Empty,
            Err(e) => ReadOutcome::Failure(e),
        }
    }
}

// ---------------------------------------------------------------------------
// PreferenceStore trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for keyed preference persistence.
///
/// # Contract
///
/// - `get_item` never fails as a future; every error is folded into
///   [`ReadOutcome::Failure`].
/// - `set_item` is best-effort: callers observe the result for logging
///   only and must not gate any state change on it.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Look up the value stored under `key`.
    async fn get_item(&self, key: &str) -> ReadOutcome;

    /// Store `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

// Compile-time assertion: Box<dyn PreferenceStore> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn PreferenceStore>) {}
};

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
