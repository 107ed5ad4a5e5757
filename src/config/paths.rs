//! Cross-platform application paths using the `dirs` crate.
//!
//! Layout:
//!
//! Config dir (settings):
//!   Windows: %APPDATA%\room-config\
//!   macOS:   ~/Library/Application Support/room-config/
//!   Linux:   ~/.config/room-config/
//!
//! Data dir (preference documents):
//!   Windows: %LOCALAPPDATA%\room-config\
//!   macOS:   ~/Library/Application Support/room-config/
//!   Linux:   ~/.local/share/room-config/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Directory for preference-store documents (one JSON file per named
    /// instance, e.g. `roomConfiguration.json`).
    pub preferences_dir: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "room-config";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path (should be extremely rare in practice).
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let settings_file = config_dir.join("settings.toml");
        let preferences_dir = data_dir.join("preferences");

        Self {
            config_dir,
            settings_file,
            preferences_dir,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
