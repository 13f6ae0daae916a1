//! Freehand drawing pad engine.
//!
//! A [`DrawingPad`] owns a Cairo raster surface sized in device pixels,
//! translates pointer and touch input into logical coordinates, paints
//! pencil and eraser segments incrementally, and keeps its content across
//! container and device-pixel-ratio changes.

pub mod config;
pub mod draw;
pub mod input;
pub mod pad;
pub mod replay;
pub mod surface;
pub mod util;

pub use config::Config;
pub use pad::DrawingPad;
