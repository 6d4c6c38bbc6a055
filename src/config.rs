use crate::error::ConfigError;
use crate::io::ListingOptions;
use crate::state::{SortBy, SortOptions, SortOrder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeConfig,
    pub panel: PanelConfig,
    pub font: FontConfig,
    pub ui: UiConfig,
    pub preview: PreviewConfig,
}

/// Theme configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ThemeConfig {
    /// "dark" or "light"
    pub mode: String,
}

/// Panel layout configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PanelConfig {
    /// Width of each browser column (in pixels)
    pub column_width: f32,
    /// Width of the preview pane (in pixels)
    pub preview_width: f32,
}

/// Font and text rendering configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    /// Size of the main interface font (in points)
    pub font_size: f32,
    /// Size of icons (in points)
    pub icon_size: f32,
}

/// Listing behavior configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Show hidden files by default
    pub show_hidden: bool,
    /// Sort field: "name", "size", "modified", "extension"
    pub sort_by: String,
    /// Sort order: "asc" or "desc"
    pub sort_order: String,
    /// Group directories before files
    pub dirs_first: bool,
}

/// Preview pane limits
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PreviewConfig {
    /// Bytes of a text file read for preview
    pub max_bytes: u64,
    /// Lines of a text file that get highlighted
    pub max_lines: usize,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            mode: "dark".to_string(),
        }
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            column_width: 220.0,
            preview_width: 380.0,
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            font_size: 13.0,
            icon_size: 14.0,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_hidden: false,
            sort_by: "name".to_string(),
            sort_order: "asc".to_string(),
            dirs_first: false,
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_bytes: 256 * 1024,
            max_lines: 1000,
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "columnar")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default location, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            log::warn!("no config directory available, using defaults");
            return Config::default();
        };
        if !path.exists() {
            return Config::default();
        }
        match Self::load_from(&path) {
            Ok(config) => {
                log::info!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{}; using default configuration", e);
                Config::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(io_err)
    }

    /// Create a default config file if it doesn't exist
    pub fn create_default() -> Result<(), ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        if !path.exists() {
            Config::default().save_to(&path)?;
        }
        Ok(())
    }

    pub fn is_dark(&self) -> bool {
        !self.theme.mode.eq_ignore_ascii_case("light")
    }

    /// Sort options described by the `[ui]` section; unknown values fall back.
    pub fn sort_options(&self) -> SortOptions {
        let defaults = SortOptions::default();
        SortOptions {
            sort_by: SortBy::parse(&self.ui.sort_by).unwrap_or(defaults.sort_by),
            sort_order: SortOrder::parse(&self.ui.sort_order).unwrap_or(defaults.sort_order),
            dirs_first: self.ui.dirs_first,
        }
    }

    pub fn listing_options(&self) -> ListingOptions {
        ListingOptions {
            show_hidden: self.ui.show_hidden,
            sort: self.sort_options(),
        }
    }
}
