//! Drawing tool selection and the live tool configuration.

use crate::draw::{Color, color::NEON_GREEN};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Smallest stroke width the width control allows.
pub const MIN_WIDTH: u32 = 1;
/// Largest stroke width the width control allows.
pub const MAX_WIDTH: u32 = 40;

/// Drawing tool selection.
///
/// The active tool decides how each segment is composited onto the raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    /// Paints the current color with source-over blending
    #[default]
    Pencil,
    /// Punches transparency with destination-out blending; color is ignored
    Eraser,
}

impl Tool {
    /// Human-readable tool name, e.g. for log lines.
    pub fn label(self) -> &'static str {
        match self {
            Tool::Pencil => "pencil",
            Tool::Eraser => "eraser",
        }
    }
}

/// Current tool kind, stroke width and stroke color.
///
/// Mutated by the surrounding controls and read by the stroke renderer on
/// every segment, so a change made mid-gesture applies to the next segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolState {
    tool: Tool,
    width: u32,
    color: Color,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: Tool::Pencil,
            width: 4,
            color: NEON_GREEN,
        }
    }
}

impl ToolState {
    /// Creates a tool state, clamping `width` into the allowed range.
    pub fn new(tool: Tool, width: u32, color: Color) -> Self {
        Self {
            tool,
            width: width.clamp(MIN_WIDTH, MAX_WIDTH),
            color,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Sets the stroke width, clamped to 1-40.
    ///
    /// Returns `true` if the stored width changed.
    pub fn set_width(&mut self, width: u32) -> bool {
        let clamped = width.clamp(MIN_WIDTH, MAX_WIDTH);
        let changed = clamped != self.width;
        self.width = clamped;
        changed
    }

    /// Steps the width by `delta`, clamped the same way as [`Self::set_width`].
    pub fn adjust_width(&mut self, delta: i32) -> bool {
        let target = (self.width as i64 + delta as i64).clamp(MIN_WIDTH as i64, MAX_WIDTH as i64);
        self.set_width(target as u32)
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::RED;

    #[test]
    fn defaults_match_pad_controls() {
        let state = ToolState::default();
        assert_eq!(state.tool(), Tool::Pencil);
        assert_eq!(state.width(), 4);
        assert_eq!(state.color(), NEON_GREEN);
    }

    #[test]
    fn width_is_clamped_on_construction_and_set() {
        assert_eq!(ToolState::new(Tool::Eraser, 0, RED).width(), 1);
        assert_eq!(ToolState::new(Tool::Eraser, 99, RED).width(), 40);

        let mut state = ToolState::default();
        assert!(state.set_width(40));
        assert!(!state.set_width(400));
        assert_eq!(state.width(), 40);
    }

    #[test]
    fn adjust_width_saturates_at_bounds() {
        let mut state = ToolState::default();
        state.adjust_width(-100);
        assert_eq!(state.width(), MIN_WIDTH);
        state.adjust_width(i32::MAX);
        assert_eq!(state.width(), MAX_WIDTH);
        assert!(state.adjust_width(-1));
        assert_eq!(state.width(), 39);
    }
}
