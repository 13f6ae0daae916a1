//! Configuration file support for scribblepad.
//!
//! Settings are read from `~/.config/scribblepad/config.toml` (or an explicit
//! path). They cover the tool controls a pad mounts with and the sizing rules
//! of its backing store. A missing file means defaults.

pub mod enums;
pub mod types;

pub use enums::ColorSpec;
pub use types::{SurfaceConfig, ToolConfig};

use crate::input::{MAX_WIDTH, MIN_WIDTH, ToolState};
use crate::surface::geometry::{MAX_SURFACE_DIMENSION, MIN_DEVICE_PIXEL_RATIO};
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [tool]
/// default_tool = "pencil"
/// default_width = 4
/// default_color = "#39FF14"
///
/// [surface]
/// min_width = 300
/// min_height = 200
/// height_inset = 8.0
/// fallback_device_pixel_ratio = 1.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Tool defaults (tool kind, width, color)
    #[serde(default)]
    pub tool: ToolConfig,

    /// Raster surface sizing
    #[serde(default)]
    pub surface: SurfaceConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Validated ranges:
    /// - `tool.default_width`: 1 - 40
    /// - `surface.min_width`, `surface.min_height`: 1 - 32767
    /// - `surface.height_inset`: finite and non-negative
    /// - `surface.fallback_device_pixel_ratio`: finite and at least 1/64
    pub fn validate_and_clamp(&mut self) {
        if !(MIN_WIDTH..=MAX_WIDTH).contains(&self.tool.default_width) {
            log::warn!(
                "Invalid default_width {}, clamping to {}-{} range",
                self.tool.default_width,
                MIN_WIDTH,
                MAX_WIDTH
            );
            self.tool.default_width = self.tool.default_width.clamp(MIN_WIDTH, MAX_WIDTH);
        }

        if !self.tool.default_color.is_valid() {
            log::warn!(
                "Invalid default_color {:?}, falling back to '#39FF14'",
                self.tool.default_color
            );
            self.tool.default_color = ColorSpec::Name("#39FF14".to_string());
        }

        if !(1..=MAX_SURFACE_DIMENSION).contains(&self.surface.min_width) {
            log::warn!(
                "Invalid min_width {}, clamping to 1-{} range",
                self.surface.min_width,
                MAX_SURFACE_DIMENSION
            );
            self.surface.min_width = self.surface.min_width.clamp(1, MAX_SURFACE_DIMENSION);
        }

        if !(1..=MAX_SURFACE_DIMENSION).contains(&self.surface.min_height) {
            log::warn!(
                "Invalid min_height {}, clamping to 1-{} range",
                self.surface.min_height,
                MAX_SURFACE_DIMENSION
            );
            self.surface.min_height = self.surface.min_height.clamp(1, MAX_SURFACE_DIMENSION);
        }

        if !self.surface.height_inset.is_finite() || self.surface.height_inset < 0.0 {
            log::warn!(
                "Invalid height_inset {}, using 0.0",
                self.surface.height_inset
            );
            self.surface.height_inset = 0.0;
        }

        let dpr = self.surface.fallback_device_pixel_ratio;
        if !dpr.is_finite() || dpr < MIN_DEVICE_PIXEL_RATIO {
            log::warn!("Invalid fallback_device_pixel_ratio {dpr}, using 1.0");
            self.surface.fallback_device_pixel_ratio = 1.0;
        }
    }

    /// Tool state a freshly mounted pad starts with.
    pub fn initial_tool_state(&self) -> ToolState {
        ToolState::new(
            self.tool.default_tool,
            self.tool.default_width,
            self.tool.default_color.to_color(),
        )
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("scribblepad");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or defaults if absent.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or defaults if it doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Serializes the config to `config_path`, creating parent directories.
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be written.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::NEON_GREEN;
    use crate::input::Tool;

    #[test]
    fn empty_file_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.surface.min_width, 300);
        assert_eq!(config.surface.min_height, 200);
        assert_eq!(config.initial_tool_state().color(), NEON_GREEN);
    }

    #[test]
    fn parses_all_sections() {
        let config: Config = toml::from_str(
            r#"
            [tool]
            default_tool = "eraser"
            default_width = 12
            default_color = [0, 0, 255]

            [surface]
            min_width = 64
            min_height = 48
            height_inset = 0.0
            fallback_device_pixel_ratio = 2.0
            "#,
        )
        .unwrap();

        let tools = config.initial_tool_state();
        assert_eq!(tools.tool(), Tool::Eraser);
        assert_eq!(tools.width(), 12);
        assert_eq!(config.surface.min_width, 64);
        assert_eq!(config.surface.fallback_device_pixel_ratio, 2.0);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config: Config = toml::from_str(
            r#"
            [tool]
            default_width = 90
            default_color = "not-a-color"

            [surface]
            min_width = 0
            height_inset = -3.0
            fallback_device_pixel_ratio = 0.0
            "#,
        )
        .unwrap();
        config.validate_and_clamp();

        assert_eq!(config.tool.default_width, 40);
        assert!(config.tool.default_color.is_valid());
        assert_eq!(config.surface.min_width, 1);
        assert_eq!(config.surface.height_inset, 0.0);
        assert_eq!(config.surface.fallback_device_pixel_ratio, 1.0);
    }

    #[test]
    fn oversized_minimums_clamp_to_cairo_limit() {
        let mut config: Config = toml::from_str(
            r#"
            [surface]
            min_width = 4000000000
            min_height = 40000
            fallback_device_pixel_ratio = 1e-300
            "#,
        )
        .unwrap();
        config.validate_and_clamp();

        assert_eq!(config.surface.min_width, 32767);
        assert_eq!(config.surface.min_height, 32767);
        assert_eq!(config.surface.fallback_device_pixel_ratio, 1.0);
    }

    #[test]
    fn save_then_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.tool.default_width = 9;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn schema_names_both_sections() {
        let schema = serde_json::to_string(&Config::json_schema()).unwrap();
        assert!(schema.contains("default_width"));
        assert!(schema.contains("height_inset"));
    }
}
