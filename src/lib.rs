//! Client-side meeting-configuration persistence manager.
//!
//! Reads and writes a user's conferencing preferences — display name,
//! audio/video bandwidth tier, camera enablement — to a local persistent
//! store, reconciles storage failures with sensible defaults, validates
//! user input, and triggers the dependent side effects (reconfiguring the
//! media transport, surfacing a UI alert) when settings change.
//!
//! Three independent managers live in [`configuration`], sharing one
//! [`store::PreferenceStore`]; the media transport and the UI alert sink
//! are collaborators behind the [`media::MediaTransport`] and
//! [`alert::AlertSink`] traits.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use room_config::{BitrateManager, BitrateTable, FileStore, MediaTransport};
//!
//! struct Transport;
//!
//! impl MediaTransport for Transport {
//!     fn configure_bandwidth(&self, tier: &str) {
//!         println!("applying tier {tier}");
//!     }
//!     fn is_video_enabled(&self) -> bool {
//!         true
//!     }
//!     fn enable_video(&self) {}
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = Arc::new(FileStore::open("roomConfiguration"));
//! let mut bitrate = BitrateManager::new(store, Arc::new(Transport), BitrateTable::default());
//!
//! // Restores the persisted tier, or applies the default.
//! bitrate.initialize().await;
//!
//! // User selections are validated, applied and persisted best-effort.
//! bitrate.select("low").await;
//! # }
//! ```

pub mod alert;
pub mod config;
pub mod configuration;
pub mod media;
pub mod store;

pub use alert::{Alert, AlertSink};
pub use config::AppConfig;
pub use configuration::{BitrateManager, BitrateTable, DisplayNameManager, VideoStatusObserver};
pub use media::MediaTransport;
pub use store::{FileStore, MemoryStore, PreferenceStore, ReadOutcome, StoreError};
