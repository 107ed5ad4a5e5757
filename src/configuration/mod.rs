//! Meeting-configuration managers.
//!
//! Three independent per-session managers share one preference store,
//! each owning a disjoint key:
//!
//! - [`DisplayNameManager`] — validates and truncates the display name
//!   (`displayName`).
//! - [`BitrateManager`] — restores/persists the bandwidth tier
//!   (`bitRate`) and reconfigures the media transport.
//! - [`VideoStatusObserver`] — checks the transport's video state once
//!   and raises the disabled-video warning.
//!
//! Construct each with `new`, then call `initialize()` once; user-driven
//! operations become available afterwards.

pub mod bitrate;
pub mod display;
pub mod video;

pub use bitrate::{BitrateManager, BitrateTable, BIT_RATE_KEY};
pub use display::{DisplayNameManager, DISPLAY_NAME_KEY, MAX_DISPLAY_NAME_CHARS};
pub use video::{
    VideoStatusObserver, DISABLE_VIDEO_ALERT_SECS, DISABLE_VIDEO_ALERT_TEMPLATE,
    DISABLE_VIDEO_WARNING_CONTAINER,
};
