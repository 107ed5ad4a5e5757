//! UI alert sink.
//!
//! Fire-and-forget notifications raised by the configuration managers.
//! The UI layer decides how a raised [`Alert`] is rendered; this crate
//! only produces the payload.

/// Payload of a UI notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Identifier of the UI region the alert attaches to
    /// (CSS-selector-style, e.g. `#disableVideoWarning`).
    pub container: String,
    /// Path of the view template rendered inside the container.
    pub template: String,
    /// How long the alert stays visible, in seconds.
    pub duration: u64,
}

/// Fire-and-forget notification sink implemented by the UI layer.
pub trait AlertSink: Send + Sync {
    /// Raise `alert`.  No result is consumed; a sink that cannot display
    /// the alert drops it.
    fn raise(&self, alert: Alert);
}

// Compile-time assertion: Box<dyn AlertSink> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn AlertSink>) {}
};
