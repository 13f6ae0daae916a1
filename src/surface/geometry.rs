//! Logical vs. physical sizing for the raster surface.

use crate::config::SurfaceConfig;

/// A point in logical (CSS-space) or client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Container size in logical units as reported by the hosting layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LogicalSize {
    pub width: f64,
    pub height: f64,
}

impl LogicalSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Backing-store size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicalSize {
    pub width: i32,
    pub height: i32,
}

/// Read-only view of the container hosting the pad.
///
/// The pad never controls these values; it samples them on every
/// (re)initialization and whenever it translates pointer input.
pub trait ContainerGeometry {
    /// Current container size in logical units.
    fn container_size(&self) -> LogicalSize;

    /// Platform device-pixel-ratio. May be garbage; the surface sanitizes it.
    fn device_pixel_ratio(&self) -> f64;

    /// On-screen top-left corner of the drawing surface in client space.
    fn surface_origin(&self) -> Point;
}

/// Fixed geometry, mutated explicitly by whoever owns it.
///
/// Used by the headless replay driver and tests; hosts with a live layout
/// implement [`ContainerGeometry`] themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticGeometry {
    pub size: LogicalSize,
    pub device_pixel_ratio: f64,
    pub origin: Point,
}

impl StaticGeometry {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            size: LogicalSize::new(width, height),
            device_pixel_ratio,
            origin: Point::ORIGIN,
        }
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }
}

impl ContainerGeometry for StaticGeometry {
    fn container_size(&self) -> LogicalSize {
        self.size
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    fn surface_origin(&self) -> Point {
        self.origin
    }
}

/// Largest width or height Cairo will allocate for an image surface.
pub const MAX_SURFACE_DIMENSION: u32 = 32767;

/// Smallest DPR accepted from the platform; below this the scale matrix
/// degenerates.
pub const MIN_DEVICE_PIXEL_RATIO: f64 = 1.0 / 64.0;

/// Replaces a non-finite or too-small DPR with the configured fallback.
pub fn sanitize_dpr(dpr: f64, limits: &SurfaceConfig) -> f64 {
    if dpr.is_finite() && dpr >= MIN_DEVICE_PIXEL_RATIO {
        dpr
    } else {
        limits.fallback_device_pixel_ratio
    }
}

/// Computes the backing-store size for a container.
///
/// `max(min_width, floor(width * dpr))` and
/// `max(min_height, floor((height - inset) * dpr))`. Non-finite logical
/// extents count as zero so the result is never degenerate.
pub fn physical_size(logical: LogicalSize, dpr: f64, limits: &SurfaceConfig) -> PhysicalSize {
    let scaled = |extent: f64, floor: u32| -> i32 {
        let extent = if extent.is_finite() { extent } else { 0.0 };
        let pixels = (extent * dpr).floor();
        // `as` saturates on overflow
        (pixels as i32).max(floor.min(MAX_SURFACE_DIMENSION) as i32)
    };

    PhysicalSize {
        width: scaled(logical.width, limits.min_width),
        height: scaled(logical.height - limits.height_inset, limits.min_height),
    }
}
