//! Configuration enum types.

use crate::draw::{Color, color::NEON_GREEN};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - a hex string, a named color, or RGB values.
///
/// # Examples
/// ```toml
/// # Hex color
/// default_color = "#39FF14"
///
/// # Named color
/// default_color = "black"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// `#RRGGBB`, `#RGB`, or a name: red, green, blue, white, black, neon-green
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the specification to a [`Color`].
    ///
    /// Unrecognized strings fall back to the default neon green with a warning.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => crate::util::parse_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using {}", name, NEON_GREEN.to_hex());
                NEON_GREEN
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }

    /// Returns `true` if [`Self::to_color`] would not need its fallback.
    pub fn is_valid(&self) -> bool {
        match self {
            ColorSpec::Name(name) => crate::util::parse_color(name).is_some(),
            ColorSpec::Rgb(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::BLACK;

    #[test]
    fn hex_name_and_rgb_specs_resolve() {
        assert_eq!(ColorSpec::Name("#39FF14".into()).to_color(), NEON_GREEN);
        assert_eq!(ColorSpec::Name("Black".into()).to_color(), BLACK);
        assert_eq!(
            ColorSpec::Rgb([255, 0, 0]).to_color(),
            Color::from_rgb8(255, 0, 0)
        );
    }

    #[test]
    fn unknown_spec_falls_back() {
        let spec = ColorSpec::Name("chartreuse-ish".into());
        assert!(!spec.is_valid());
        assert_eq!(spec.to_color(), NEON_GREEN);
    }
}
