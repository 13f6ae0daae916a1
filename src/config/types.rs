//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::input::Tool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Initial tool controls when a pad mounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ToolConfig {
    /// Tool selected on mount ("pencil" or "eraser")
    #[serde(default)]
    pub default_tool: Tool,

    /// Stroke width in logical pixels (valid range: 1 - 40)
    #[serde(default = "default_width")]
    pub default_width: u32,

    /// Pencil color: "#RRGGBB", a named color, or `[r, g, b]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            default_tool: Tool::default(),
            default_width: default_width(),
            default_color: default_color(),
        }
    }
}

/// Backing-store sizing rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SurfaceConfig {
    /// Minimum physical width in device pixels
    #[serde(default = "default_min_width")]
    pub min_width: u32,

    /// Minimum physical height in device pixels
    #[serde(default = "default_min_height")]
    pub min_height: u32,

    /// Logical units taken off the container height before scaling
    #[serde(default = "default_height_inset")]
    pub height_inset: f64,

    /// Device-pixel-ratio used when the platform reports an unusable value
    #[serde(default = "default_fallback_dpr")]
    pub fallback_device_pixel_ratio: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            min_width: default_min_width(),
            min_height: default_min_height(),
            height_inset: default_height_inset(),
            fallback_device_pixel_ratio: default_fallback_dpr(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_width() -> u32 {
    4
}

fn default_color() -> ColorSpec {
    ColorSpec::Name("#39FF14".to_string())
}

fn default_min_width() -> u32 {
    300
}

fn default_min_height() -> u32 {
    200
}

fn default_height_inset() -> f64 {
    8.0
}

fn default_fallback_dpr() -> f64 {
    1.0
}
