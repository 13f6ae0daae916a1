//! Colors and Cairo paint primitives for the drawing pad.
//!
//! - [`Color`]: RGBA color with hex parsing and named constants
//! - [`render`]: segment stroking, full-buffer clears, and snapshot repaint

pub mod color;
pub mod render;

pub use color::Color;
pub use color::{BLACK, BLUE, GREEN, NEON_GREEN, RED, WHITE};
pub use render::{apply_line_style, clear_buffer, operator_for, paint_image, stroke_segment};
