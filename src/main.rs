//! Application entry point — room-config demo client.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Parse CLI options.
//! 4. Create a current-thread [`tokio`] runtime — the managers only ever
//!    suspend at store accesses.
//! 5. Open the [`FileStore`] named by the config and wire the three
//!    managers to it with logging transport/alert stubs.
//! 6. Initialise every manager, apply any CLI-driven changes, and report
//!    the resulting state.

use std::sync::Arc;

use anyhow::bail;

use room_config::{
    alert::{Alert, AlertSink},
    config::AppConfig,
    configuration::{
        BitrateManager, BitrateTable, DisplayNameManager, VideoStatusObserver,
        MAX_DISPLAY_NAME_CHARS,
    },
    media::MediaTransport,
    store::{FileStore, PreferenceStore},
};

// ---------------------------------------------------------------------------
// CLI options
// ---------------------------------------------------------------------------

const USAGE: &str =
    "usage: room-config [--display-name <name>] [--bitrate <tier>] [--video-off] [--enable-video]";

#[derive(Debug, Default, PartialEq, Eq)]
struct CliOptions {
    display_name: Option<String>,
    bitrate: Option<String>,
    video_off: bool,
    enable_video: bool,
}

impl CliOptions {
    fn parse(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut opts = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--display-name" => match args.next() {
                    Some(name) => opts.display_name = Some(name),
                    None => bail!("--display-name needs a value\n{USAGE}"),
                },
                "--bitrate" => match args.next() {
                    Some(tier) => opts.bitrate = Some(tier),
                    None => bail!("--bitrate needs a value\n{USAGE}"),
                },
                "--video-off" => opts.video_off = true,
                "--enable-video" => opts.enable_video = true,
                other => bail!("unknown argument {other:?}\n{USAGE}"),
            }
        }

        Ok(opts)
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("room-config starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. CLI options
    let opts = CliOptions::parse(std::env::args().skip(1))?;

    // 4. Tokio runtime
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(run(config, opts))
}

async fn run(config: AppConfig, opts: CliOptions) -> anyhow::Result<()> {
    // 5. Store, collaborators, managers
    let store: Arc<dyn PreferenceStore> = Arc::new(FileStore::open(&config.store.instance));

    let table = BitrateTable::from(&config.bandwidth);
    let transport: Arc<dyn MediaTransport> = Arc::new(LogTransport {
        table: table.clone(),
        video_enabled: !opts.video_off,
    });
    let alerts: Arc<dyn AlertSink> = Arc::new(LogAlertSink);

    let mut display = DisplayNameManager::new(Arc::clone(&store));
    let mut bitrate = BitrateManager::new(Arc::clone(&store), Arc::clone(&transport), table);
    let mut video = VideoStatusObserver::new(Arc::clone(&transport), alerts);

    // 6. Initialise, apply CLI-driven changes, report
    display.initialize().await;
    bitrate.initialize().await;
    video.initialize();

    if let Some(name) = opts.display_name {
        display.set_name(name);
        display.on_name_change();
        if display.length_error() {
            log::warn!(
                "display name exceeded {MAX_DISPLAY_NAME_CHARS} characters and was truncated"
            );
        }
        display.save().await;
    }

    if let Some(tier) = opts.bitrate {
        bitrate.select(&tier).await;
    }

    if opts.enable_video {
        video.enable_video();
    }

    log::info!("display name: {}", display.name().unwrap_or("<unset>"));
    log::info!("bandwidth tier: {}", bitrate.selected().unwrap_or("<unset>"));
    log::info!("video enabled: {}", video.video_enabled());

    Ok(())
}

// ---------------------------------------------------------------------------
// LogTransport — stand-in media transport for the demo binary
// ---------------------------------------------------------------------------

/// Logs every transport call instead of driving a real peer connection.
struct LogTransport {
    table: BitrateTable,
    video_enabled: bool,
}

impl MediaTransport for LogTransport {
    fn configure_bandwidth(&self, tier: &str) {
        match self.table.limits(tier) {
            Some(limits) => log::info!(
                "configuring bandwidth tier {tier:?} (audio {}, video {})",
                limits
                    .audio_kbps
                    .map_or_else(|| "uncapped".to_string(), |k| format!("{k} kbps")),
                limits
                    .video_kbps
                    .map_or_else(|| "uncapped".to_string(), |k| format!("{k} kbps")),
            ),
            None => log::info!("configuring bandwidth tier {tier:?}"),
        }
    }

    fn is_video_enabled(&self) -> bool {
        self.video_enabled
    }

    fn enable_video(&self) {
        log::info!("enabling video");
    }
}

// ---------------------------------------------------------------------------
// LogAlertSink — stand-in UI alert sink for the demo binary
// ---------------------------------------------------------------------------

/// Writes raised alerts to the log instead of a UI region.
struct LogAlertSink;

impl AlertSink for LogAlertSink {
    fn raise(&self, alert: Alert) {
        log::warn!(
            "UI alert: container={} template={} duration={}s",
            alert.container,
            alert.template,
            alert.duration
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<CliOptions> {
        CliOptions::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parse_empty_args() {
        let opts = parse(&[]).expect("parse");
        assert_eq!(opts, CliOptions::default());
    }

    #[test]
    fn parse_all_options() {
        let opts = parse(&[
            "--display-name",
            "Alice",
            "--bitrate",
            "low",
            "--video-off",
            "--enable-video",
        ])
        .expect("parse");
        assert_eq!(opts.display_name.as_deref(), Some("Alice"));
        assert_eq!(opts.bitrate.as_deref(), Some("low"));
        assert!(opts.video_off);
        assert!(opts.enable_video);
    }

    #[test]
    fn parse_rejects_unknown_argument() {
        assert!(parse(&["--frobnicate"]).is_err());
    }

    #[test]
    fn parse_rejects_missing_value() {
        assert!(parse(&["--bitrate"]).is_err());
    }
}
