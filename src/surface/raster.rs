//! The Cairo-backed raster buffer and its persistent drawing context.

use super::error::SurfaceError;
use super::geometry::{LogicalSize, PhysicalSize, Point};
use crate::draw::render;
use crate::input::ToolState;
use log::warn;

/// An unpremultiplied 8-bit RGBA pixel read back from the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const TRANSPARENT: Pixel = Pixel {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

/// The drawing buffer: a physical-size image surface plus a context that
/// carries the uniform DPR scale, so all drawing happens in logical units.
pub struct RasterSurface {
    surface: cairo::ImageSurface,
    ctx: cairo::Context,
    logical: LogicalSize,
    device_pixel_ratio: f64,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("logical", &self.logical)
            .field("physical", &self.physical_size())
            .field("device_pixel_ratio", &self.device_pixel_ratio)
            .finish()
    }
}

impl RasterSurface {
    /// Allocates a fresh, fully transparent buffer of `physical` pixels.
    ///
    /// The context gets the DPR scale and the current line style applied.
    pub fn allocate(
        logical: LogicalSize,
        physical: PhysicalSize,
        device_pixel_ratio: f64,
        tools: &ToolState,
    ) -> Result<Self, SurfaceError> {
        let surface =
            cairo::ImageSurface::create(cairo::Format::ARgb32, physical.width, physical.height)
                .map_err(|source| SurfaceError::Allocation {
                    width: physical.width,
                    height: physical.height,
                    source,
                })?;
        let ctx = cairo::Context::new(&surface).map_err(SurfaceError::Context)?;
        ctx.scale(device_pixel_ratio, device_pixel_ratio);
        render::apply_line_style(&ctx, tools);

        Ok(Self {
            surface,
            ctx,
            logical,
            device_pixel_ratio,
        })
    }

    pub fn context(&self) -> &cairo::Context {
        &self.ctx
    }

    pub fn image(&self) -> &cairo::ImageSurface {
        &self.surface
    }

    /// Container size the buffer was allocated for.
    pub fn logical_size(&self) -> LogicalSize {
        self.logical
    }

    pub fn physical_size(&self) -> PhysicalSize {
        PhysicalSize {
            width: self.surface.width(),
            height: self.surface.height(),
        }
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Logical extent covering the whole physical buffer (`physical / dpr`).
    ///
    /// Differs from [`Self::logical_size`] whenever the minimum-size floor or
    /// the height inset kicked in.
    pub fn buffer_extent(&self) -> LogicalSize {
        let physical = self.physical_size();
        LogicalSize::new(
            physical.width as f64 / self.device_pixel_ratio,
            physical.height as f64 / self.device_pixel_ratio,
        )
    }

    /// Reapplies width and color to the live context.
    pub fn apply_tool_state(&self, tools: &ToolState) {
        render::apply_line_style(&self.ctx, tools);
    }

    /// Paints one segment; Cairo failures are logged, never propagated.
    pub fn stroke_segment(&self, from: Point, to: Point, tools: &ToolState) {
        if let Err(err) = render::stroke_segment(&self.ctx, from, to, tools) {
            warn!("Failed to stroke segment {from:?} -> {to:?}: {err}");
        }
    }

    /// Clears every physical pixel to transparent.
    pub fn clear(&self) {
        if let Err(err) = render::clear_buffer(&self.ctx) {
            warn!("Failed to clear raster surface: {err}");
        }
    }

    /// Reads the physical pixel at (`x`, `y`), or `None` when out of bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Pixel> {
        let physical = self.physical_size();
        if x < 0 || y < 0 || x >= physical.width || y >= physical.height {
            return None;
        }

        let stride = self.surface.stride() as usize;
        let offset = y as usize * stride + x as usize * 4;
        let mut pixel = None;
        let read = self.surface.with_data(|data| {
            if let Some(bytes) = data.get(offset..offset + 4) {
                let word = u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
                pixel = Some(unpremultiply(word));
            }
        });
        if let Err(err) = read {
            warn!("Failed to read raster data: {err}");
        }
        pixel
    }

    /// Returns `true` if any pixel in the buffer has non-zero alpha.
    pub fn has_content(&self) -> bool {
        let mut found = false;
        let stride = self.surface.stride() as usize;
        let row_bytes = self.surface.width() as usize * 4;
        let read = self.surface.with_data(|data| {
            found = data
                .chunks(stride)
                .flat_map(|row| row[..row_bytes.min(row.len())].chunks_exact(4))
                .any(|px| u32::from_ne_bytes([px[0], px[1], px[2], px[3]]) >> 24 != 0);
        });
        if let Err(err) = read {
            warn!("Failed to read raster data: {err}");
        }
        found
    }
}

// ARgb32 stores premultiplied alpha in a native-endian u32
fn unpremultiply(word: u32) -> Pixel {
    let a = (word >> 24) as u8;
    if a == 0 {
        return Pixel::TRANSPARENT;
    }
    let channel = |shift: u32| {
        let premultiplied = (word >> shift) & 0xff;
        ((premultiplied * 255 + a as u32 / 2) / a as u32).min(255) as u8
    };
    Pixel {
        r: channel(16),
        g: channel(8),
        b: channel(0),
        a,
    }
}
