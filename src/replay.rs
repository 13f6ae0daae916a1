//! Headless replay of scripted pointer gestures against a pad.
//!
//! Scripts are TOML: a `[geometry]` table describing the container and an
//! ordered `[[step]]` array of events. See [`Step`] for the actions.

use crate::config::Config;
use crate::input::{PointerEvent, Tool};
use crate::pad::DrawingPad;
use crate::surface::{LogicalSize, Point, StaticGeometry};
use crate::util;
use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Container the script starts with.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptGeometry {
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_dpr")]
    pub device_pixel_ratio: f64,
    /// Client-space position of the surface's top-left corner
    #[serde(default)]
    pub origin: [f64; 2],
}

fn default_dpr() -> f64 {
    1.0
}

/// One scripted event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    /// Pointer press at client coordinates
    Down { x: f64, y: f64 },
    /// Pointer movement at client coordinates
    Move { x: f64, y: f64 },
    /// Touch start at the first contact
    TouchDown { x: f64, y: f64 },
    /// Touch movement at the first contact
    TouchMove { x: f64, y: f64 },
    Up,
    Leave,
    /// Switch to "pencil" or "eraser"
    Tool { tool: Tool },
    Width { width: u32 },
    /// Hex string or color name
    Color { color: String },
    Clear,
    /// Container resize, optionally with a new device-pixel-ratio
    Resize {
        width: f64,
        height: f64,
        device_pixel_ratio: Option<f64>,
    },
    /// Let every in-flight restoration complete
    Flush,
}

/// A parsed gesture script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    pub geometry: ScriptGeometry,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn parse(source: &str) -> Result<Self> {
        toml::from_str(source).context("Failed to parse replay script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read replay script {}", path.display()))?;
        Self::parse(&source).with_context(|| format!("Invalid replay script {}", path.display()))
    }

    fn initial_geometry(&self) -> StaticGeometry {
        let [left, top] = self.geometry.origin;
        StaticGeometry::new(
            self.geometry.width,
            self.geometry.height,
            self.geometry.device_pixel_ratio,
        )
        .with_origin(Point::new(left, top))
    }
}

/// Mounts a pad, plays every step, then drains pending restorations.
pub fn run(script: &Script, config: &Config) -> Result<DrawingPad<StaticGeometry>> {
    let mut pad = DrawingPad::new(script.initial_geometry(), config);
    pad.mount().context("Failed to mount drawing surface")?;

    for (index, step) in script.steps.iter().enumerate() {
        debug!("Step {index}: {step:?}");
        apply(&mut pad, step).with_context(|| format!("Replay step {index} failed"))?;
    }

    let flushed = pad.complete_restorations();
    info!(
        "Replayed {} steps ({} trailing restorations flushed)",
        script.steps.len(),
        flushed
    );
    Ok(pad)
}

fn apply(pad: &mut DrawingPad<StaticGeometry>, step: &Step) -> Result<()> {
    match step {
        Step::Down { x, y } => {
            pad.on_pointer_down(&PointerEvent::pointer(*x, *y));
        }
        Step::Move { x, y } => pad.on_pointer_move(&PointerEvent::pointer(*x, *y)),
        Step::TouchDown { x, y } => {
            pad.on_pointer_down(&PointerEvent::touch([Point::new(*x, *y)]));
        }
        Step::TouchMove { x, y } => pad.on_pointer_move(&PointerEvent::touch([Point::new(*x, *y)])),
        Step::Up => pad.on_pointer_up(),
        Step::Leave => pad.on_pointer_leave(),
        Step::Tool { tool } => pad.set_tool(*tool),
        Step::Width { width } => pad.set_width(*width),
        Step::Color { color } => {
            let parsed = util::parse_color(color).ok_or_else(|| anyhow!("Unknown color '{color}'"))?;
            pad.set_color(parsed);
        }
        Step::Clear => pad.clear(),
        Step::Resize {
            width,
            height,
            device_pixel_ratio,
        } => {
            let geometry = pad.geometry_mut();
            geometry.size = LogicalSize::new(*width, *height);
            if let Some(dpr) = device_pixel_ratio {
                geometry.device_pixel_ratio = *dpr;
            }
            pad.on_container_resize()?;
        }
        Step::Flush => {
            pad.complete_restorations();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const L_SHAPE: &str = r##"
        [geometry]
        width = 400.0
        height = 308.0
        origin = [100.0, 50.0]

        [[step]]
        action = "down"
        x = 110.0
        y = 60.0

        [[step]]
        action = "move"
        x = 120.0
        y = 60.0

        [[step]]
        action = "color"
        color = "#FF0000"

        [[step]]
        action = "move"
        x = 120.0
        y = 70.0

        [[step]]
        action = "up"
    "##;

    #[test]
    fn parses_tagged_steps() {
        let script = Script::parse(L_SHAPE).unwrap();
        assert_eq!(script.geometry.device_pixel_ratio, 1.0);
        assert_eq!(script.steps.len(), 5);
        assert_eq!(script.steps[0], Step::Down { x: 110.0, y: 60.0 });
        assert_eq!(script.steps[4], Step::Up);
    }

    #[test]
    fn run_paints_in_local_coordinates() {
        let script = Script::parse(L_SHAPE).unwrap();
        let pad = run(&script, &Config::default()).unwrap();
        let raster = pad.raster().unwrap();

        let first = raster.pixel(15, 10).unwrap();
        assert_eq!((first.r, first.g, first.b, first.a), (0x39, 0xFF, 0x14, 0xFF));
        let second = raster.pixel(20, 16).unwrap();
        assert_eq!((second.r, second.g, second.b, second.a), (0xFF, 0, 0, 0xFF));
        assert!(raster.pixel(110, 60).unwrap().is_transparent());
    }

    #[test]
    fn unknown_color_fails_the_step() {
        let script = Script::parse(
            r#"
            [geometry]
            width = 400.0
            height = 300.0

            [[step]]
            action = "color"
            color = "mauve-ish"
            "#,
        )
        .unwrap();
        let err = run(&script, &Config::default()).unwrap_err();
        assert!(format!("{err:#}").contains("Unknown color"));
    }

    #[test]
    fn rejects_unknown_actions() {
        let result = Script::parse(
            r#"
            [geometry]
            width = 1.0
            height = 1.0

            [[step]]
            action = "teleport"
            "#,
        );
        assert!(result.is_err());
    }
}
