//! Video-enablement observer: checks the transport's video state once per
//! session and warns the user when video is disabled.
//!
//! One-shot by design — a transport state change after [`initialize`] is
//! not observed unless the observer is reconstructed.
//!
//! [`initialize`]: VideoStatusObserver::initialize

use std::sync::Arc;

use crate::alert::{Alert, AlertSink};
use crate::media::MediaTransport;

/// UI region the disabled-video warning attaches to.
pub const DISABLE_VIDEO_WARNING_CONTAINER: &str = "#disableVideoWarning";

/// View template rendered inside the warning region.
pub const DISABLE_VIDEO_ALERT_TEMPLATE: &str =
    "/views/modules/configuration/disable-video-alert.html";

/// How long the warning stays visible, in seconds.
pub const DISABLE_VIDEO_ALERT_SECS: u64 = 5;

/// Per-session observer of the transport's video-enablement state.
pub struct VideoStatusObserver {
    transport: Arc<dyn MediaTransport>,
    alerts: Arc<dyn AlertSink>,
    video_enabled: bool,
}

impl VideoStatusObserver {
    /// Create an observer.  [`video_enabled`] is meaningful only after
    /// [`initialize`] has run.
    ///
    /// [`video_enabled`]: VideoStatusObserver::video_enabled
    /// [`initialize`]: VideoStatusObserver::initialize
    pub fn new(transport: Arc<dyn MediaTransport>, alerts: Arc<dyn AlertSink>) -> Self {
        Self {
            transport,
            alerts,
            video_enabled: true,
        }
    }

    /// Read the transport's video state and raise the disabled-video
    /// warning if needed.
    ///
    /// Raises exactly one alert when video is disabled, none otherwise.
    pub fn initialize(&mut self) {
        self.video_enabled = self.transport.is_video_enabled();

        if !self.video_enabled {
            self.alerts.raise(Alert {
                container: DISABLE_VIDEO_WARNING_CONTAINER.to_string(),
                template: DISABLE_VIDEO_ALERT_TEMPLATE.to_string(),
                duration: DISABLE_VIDEO_ALERT_SECS,
            });
        }
    }

    /// The video state observed at initialization (or flipped by
    /// [`enable_video`]).
    ///
    /// [`enable_video`]: VideoStatusObserver::enable_video
    pub fn video_enabled(&self) -> bool {
        self.video_enabled
    }

    /// Ask the transport to enable video and record the new state.
    ///
    /// No store interaction and no alert; the warning is only ever raised
    /// by [`initialize`].
    ///
    /// [`initialize`]: VideoStatusObserver::initialize
    pub fn enable_video(&mut self) {
        self.transport.enable_video();
        self.video_enabled = true;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
