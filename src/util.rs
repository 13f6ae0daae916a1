//! Color name and hex lookup used by the configuration and replay scripts.

use crate::draw::{Color, color::*};

/// Maps color name strings to Color values.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "white", "black", "neon-green"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "neon-green" | "neon_green" => Some(NEON_GREEN),
        _ => None,
    }
}

/// Parses what a color picker or config file may hand us.
///
/// Strings starting with `#` are hex; anything else is tried as a name, then
/// as bare hex digits.
pub fn parse_color(spec: &str) -> Option<Color> {
    let spec = spec.trim();
    if spec.starts_with('#') {
        return Color::from_hex(spec);
    }
    name_to_color(spec).or_else(|| Color::from_hex(spec))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_hex_resolve() {
        assert_eq!(name_to_color("WHITE"), Some(WHITE));
        assert_eq!(parse_color("neon-green"), Some(NEON_GREEN));
        assert_eq!(parse_color(" #000000 "), Some(BLACK));
        assert_eq!(parse_color("ff0000"), Some(RED));
    }

    #[test]
    fn unknown_values_are_rejected() {
        assert!(name_to_color("chartreuse").is_none());
        assert!(parse_color("#12").is_none());
        assert!(parse_color("").is_none());
    }
}
