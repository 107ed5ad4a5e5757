//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// TierLimits
// ---------------------------------------------------------------------------

/// Per-tier bandwidth caps handed to the media transport.
///
/// `None` means "no cap" for that stream kind; a tier with both fields
/// `None` (the `nolimit` tier in the default table) leaves the transport
/// unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierLimits {
    /// Audio cap in kbit/s.
    #[serde(default)]
    pub audio_kbps: Option<u32>,
    /// Video cap in kbit/s.
    #[serde(default)]
    pub video_kbps: Option<u32>,
}

impl TierLimits {
    /// A tier with the given audio/video caps.
    pub fn capped(audio_kbps: u32, video_kbps: u32) -> Self {
        Self {
            audio_kbps: Some(audio_kbps),
            video_kbps: Some(video_kbps),
        }
    }

    /// A tier without any caps.
    pub fn unlimited() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// BandwidthConfig
// ---------------------------------------------------------------------------

/// The enumerated bandwidth-tier set and its designated default.
///
/// The tier names are the values persisted under the `bitRate` preference
/// key and passed verbatim to the media transport; anything outside
/// `tiers` is rejected by the bitrate manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandwidthConfig {
    /// Name of the tier applied when nothing usable is stored.
    ///
    /// Must be a member of `tiers`; [`BitrateTable`] enforces this when
    /// the config is turned into a table.
    ///
    /// [`BitrateTable`]: crate::configuration::BitrateTable
    pub default_tier: String,
    /// Tier name → caps. `BTreeMap` keeps the TOML output stable.
    pub tiers: BTreeMap<String, TierLimits>,
}

impl Default for BandwidthConfig {
    fn default() -> Self {
        let mut tiers = BTreeMap::new();
        tiers.insert("low".to_string(), TierLimits::capped(32, 256));
        tiers.insert("medium".to_string(), TierLimits::capped(64, 768));
        tiers.insert("nolimit".to_string(), TierLimits::unlimited());

        Self {
            default_tier: "medium".to_string(),
            tiers,
        }
    }
}

// ---------------------------------------------------------------------------
// StoreConfig
// ---------------------------------------------------------------------------

/// Settings for the preference store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Name of the store instance holding the room preferences.  Becomes
    /// the document file stem (`<instance>.json`) for the file-backed
    /// store.
    pub instance: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            instance: "roomConfiguration".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use room_config::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Bandwidth-tier table and default.
    pub bandwidth: BandwidthConfig,
    /// Preference-store settings.
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns `true` when no `settings.toml` file exists yet.
    pub fn is_first_run() -> bool {
        !AppPaths::new().settings_file.exists()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Verify that a default `AppConfig` can be serialised to TOML and
    /// deserialised back without any data loss.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original, loaded);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");

        assert_eq!(config, AppConfig::default());
    }

    /// Verify the shipped default table.
    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.bandwidth.default_tier, "medium");
        assert_eq!(cfg.bandwidth.tiers.len(), 3);
        assert!(cfg.bandwidth.tiers.contains_key("low"));
        assert!(cfg.bandwidth.tiers.contains_key("medium"));
        assert!(cfg.bandwidth.tiers.contains_key("nolimit"));
        assert_eq!(cfg.store.instance, "roomConfiguration");
    }

    /// The designated default tier must be a member of the tier set.
    #[test]
    fn default_tier_is_a_member() {
        let cfg = BandwidthConfig::default();
        assert!(cfg.tiers.contains_key(&cfg.default_tier));
    }

    /// The `nolimit` tier must carry no caps.
    #[test]
    fn nolimit_tier_has_no_caps() {
        let cfg = BandwidthConfig::default();
        let nolimit = &cfg.tiers["nolimit"];
        assert!(nolimit.audio_kbps.is_none());
        assert!(nolimit.video_kbps.is_none());
    }

    /// Verify that modified non-default values survive a round trip.
    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.bandwidth.default_tier = "low".into();
        cfg.bandwidth
            .tiers
            .insert("turbo".into(), TierLimits::capped(128, 2_048));
        cfg.store.instance = "otherRoom".into();

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.bandwidth.default_tier, "low");
        assert_eq!(
            loaded.bandwidth.tiers["turbo"],
            TierLimits::capped(128, 2_048)
        );
        assert_eq!(loaded.store.instance, "otherRoom");
    }
}
