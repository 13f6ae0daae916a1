//! Surface manager: owns the raster buffer across resizes.
//!
//! Reallocating a Cairo image surface discards its pixels, so a resize that
//! should keep the drawing first captures a [`Snapshot`]. The snapshot is not
//! painted back immediately; it is queued as a [`PendingRestoration`] and
//! applied when the host drives [`SurfaceManager::complete_next_restoration`]
//! (or drains the queue). Strokes may land on the new buffer in between.

pub mod error;
pub mod geometry;
pub mod raster;
pub mod snapshot;

pub use error::SurfaceError;
pub use geometry::{
    ContainerGeometry, LogicalSize, PhysicalSize, Point, StaticGeometry, physical_size,
    sanitize_dpr,
};
pub use raster::{Pixel, RasterSurface};
pub use snapshot::{PendingRestoration, Snapshot};

use crate::config::SurfaceConfig;
use crate::draw::render;
use crate::input::ToolState;
use log::{debug, info, warn};
use std::collections::VecDeque;

/// Owns the raster surface and any restorations still in flight.
#[derive(Debug)]
pub struct SurfaceManager {
    limits: SurfaceConfig,
    raster: Option<RasterSurface>,
    pending: VecDeque<PendingRestoration>,
    next_restoration_id: u64,
}

impl SurfaceManager {
    /// Creates an uninitialized manager; nothing is allocated until
    /// [`Self::initialize`] runs.
    pub fn new(limits: SurfaceConfig) -> Self {
        Self {
            limits,
            raster: None,
            pending: VecDeque::new(),
            next_restoration_id: 0,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.raster.is_some()
    }

    /// The live raster surface, if initialized.
    pub fn raster(&self) -> Option<&RasterSurface> {
        self.raster.as_ref()
    }

    /// Measures the container and (re)allocates the backing buffer.
    ///
    /// With `preserve_content` and an existing buffer, the old pixels are
    /// snapshotted first and a restoration is queued. The new buffer gets
    /// the DPR scale and `tools`' line style before this returns. On error
    /// the previous buffer, if any, stays in place.
    pub fn initialize<G: ContainerGeometry + ?Sized>(
        &mut self,
        geometry: &G,
        tools: &ToolState,
        preserve_content: bool,
    ) -> Result<(), SurfaceError> {
        let logical = geometry.container_size();
        let dpr = sanitize_dpr(geometry.device_pixel_ratio(), &self.limits);
        let physical = physical_size(logical, dpr, &self.limits);

        let snapshot = match (&self.raster, preserve_content) {
            (Some(current), true) => match Snapshot::capture(current.image()) {
                Ok(snapshot) => Some(snapshot),
                Err(err) => {
                    warn!("Resize snapshot failed, previous content will be lost: {err}");
                    None
                }
            },
            _ => None,
        };

        let raster = RasterSurface::allocate(logical, physical, dpr, tools)?;
        info!(
            "Allocated raster surface {}x{} ({:.1}x{:.1} logical @ {dpr}x)",
            physical.width, physical.height, logical.width, logical.height
        );
        self.raster = Some(raster);

        if let Some(snapshot) = snapshot {
            let id = self.next_restoration_id;
            self.next_restoration_id += 1;
            debug!("Queued restoration #{id} ({:?})", snapshot);
            self.pending.push_back(PendingRestoration::new(id, snapshot));
        }

        Ok(())
    }

    /// Reinitializes for a new container size, keeping drawn content.
    ///
    /// A no-op until the surface has been initialized once.
    pub fn on_container_resize<G: ContainerGeometry + ?Sized>(
        &mut self,
        geometry: &G,
        tools: &ToolState,
    ) -> Result<(), SurfaceError> {
        let Some(current) = &self.raster else {
            debug!("Ignoring container resize before first mount");
            return Ok(());
        };
        debug!(
            "Container resized from {:?} to {:?}",
            current.logical_size(),
            geometry.container_size()
        );
        self.initialize(geometry, tools, true)
    }

    /// Pushes width and color into the live context, if there is one.
    pub fn apply_tool_state(&self, tools: &ToolState) {
        if let Some(raster) = &self.raster {
            raster.apply_tool_state(tools);
        }
    }

    /// Number of restorations captured but not yet applied.
    pub fn pending_restorations(&self) -> usize {
        self.pending.len()
    }

    /// Applies the oldest pending restoration.
    ///
    /// The snapshot is decoded now and stretched over the *current* buffer,
    /// whatever size it has by then. Decode failures leave the buffer as it
    /// is. Returns `false` when nothing was pending.
    pub fn complete_next_restoration(&mut self) -> bool {
        let Some(restoration) = self.pending.pop_front() else {
            return false;
        };

        let Some(raster) = &self.raster else {
            debug!("Dropping restoration #{} for unmounted surface", restoration.id());
            return true;
        };

        match restoration.snapshot().decode() {
            Ok(image) => {
                let extent = raster.buffer_extent();
                if let Err(err) =
                    render::paint_image(raster.context(), &image, extent.width, extent.height)
                {
                    warn!("Failed to repaint restoration #{}: {err}", restoration.id());
                } else {
                    debug!("Applied restoration #{}", restoration.id());
                }
            }
            Err(err) => {
                warn!("Skipping restoration #{}: {err}", restoration.id());
            }
        }
        true
    }

    /// Applies every pending restoration in capture order.
    ///
    /// Returns how many were processed.
    pub fn complete_restorations(&mut self) -> usize {
        let mut applied = 0;
        while self.complete_next_restoration() {
            applied += 1;
        }
        applied
    }

    /// Queues an externally produced snapshot for restoration.
    pub fn schedule_restoration(&mut self, snapshot: Snapshot) -> u64 {
        let id = self.next_restoration_id;
        self.next_restoration_id += 1;
        self.pending.push_back(PendingRestoration::new(id, snapshot));
        id
    }

    /// Releases the buffer and forgets in-flight restorations.
    pub fn unmount(&mut self) {
        if self.raster.take().is_some() {
            info!("Raster surface released");
        }
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Color;
    use crate::input::Tool;

    fn manager() -> SurfaceManager {
        SurfaceManager::new(SurfaceConfig::default())
    }

    fn assert_line_style(raster: &RasterSurface, tools: &ToolState) {
        let ctx = raster.context();
        assert_eq!(ctx.line_width(), tools.width() as f64);
        assert_eq!(ctx.line_cap(), cairo::LineCap::Round);
        assert_eq!(ctx.line_join(), cairo::LineJoin::Round);

        let source = cairo::SolidPattern::try_from(ctx.source()).unwrap();
        let (r, g, b, a) = source.rgba().unwrap();
        let expected = tools.color();
        for (got, want) in [(r, expected.r), (g, expected.g), (b, expected.b), (a, expected.a)] {
            assert!((got - want).abs() < 1e-9, "source {got} != {want}");
        }
    }

    #[test]
    fn mount_applies_dpr_and_line_style() {
        let mut manager = manager();
        let tools = ToolState::new(Tool::Pencil, 7, Color::from_rgb8(10, 20, 30));
        let geometry = StaticGeometry::new(400.0, 308.0, 2.0);
        manager.initialize(&geometry, &tools, false).unwrap();

        let raster = manager.raster().unwrap();
        assert_line_style(raster, &tools);
        assert_eq!(raster.context().matrix().xx(), 2.0);
        assert_eq!(raster.context().matrix().yy(), 2.0);
    }

    #[test]
    fn resize_reapplies_current_tool_state() {
        let mut manager = manager();
        let geometry = StaticGeometry::new(400.0, 308.0, 1.0);
        manager
            .initialize(&geometry, &ToolState::default(), false)
            .unwrap();

        let changed = ToolState::new(Tool::Eraser, 33, Color::from_rgb8(200, 100, 0));
        let resized = StaticGeometry::new(640.0, 488.0, 1.5);
        manager.on_container_resize(&resized, &changed).unwrap();

        let raster = manager.raster().unwrap();
        assert_eq!(raster.logical_size(), LogicalSize::new(640.0, 488.0));
        assert_line_style(raster, &changed);
        assert_eq!(raster.context().matrix().xx(), 1.5);
    }

    #[test]
    fn apply_tool_state_updates_live_context() {
        let mut manager = manager();
        let geometry = StaticGeometry::new(400.0, 308.0, 1.0);
        manager
            .initialize(&geometry, &ToolState::default(), false)
            .unwrap();

        let mut tools = ToolState::default();
        tools.set_width(17);
        tools.set_color(Color::from_rgb8(0, 0, 255));
        manager.apply_tool_state(&tools);
        assert_line_style(manager.raster().unwrap(), &tools);
    }

    #[test]
    fn resize_before_mount_is_noop() {
        let mut manager = manager();
        let geometry = StaticGeometry::new(640.0, 480.0, 1.0);
        manager
            .on_container_resize(&geometry, &ToolState::default())
            .unwrap();
        assert!(!manager.is_initialized());
        assert_eq!(manager.pending_restorations(), 0);
    }

    #[test]
    fn first_mount_queues_no_restoration() {
        let mut manager = manager();
        let geometry = StaticGeometry::new(640.0, 488.0, 2.0);
        manager
            .initialize(&geometry, &ToolState::default(), false)
            .unwrap();

        let raster = manager.raster().unwrap();
        assert_eq!(raster.physical_size(), PhysicalSize { width: 1280, height: 960 });
        assert_eq!(raster.device_pixel_ratio(), 2.0);
        assert_eq!(manager.pending_restorations(), 0);
    }

    #[test]
    fn each_resize_queues_an_independent_restoration() {
        let mut manager = manager();
        let tools = ToolState::default();
        let mut geometry = StaticGeometry::new(400.0, 300.0, 1.0);
        manager.initialize(&geometry, &tools, false).unwrap();

        geometry.size = LogicalSize::new(500.0, 300.0);
        manager.on_container_resize(&geometry, &tools).unwrap();
        geometry.size = LogicalSize::new(600.0, 300.0);
        manager.on_container_resize(&geometry, &tools).unwrap();

        assert_eq!(manager.pending_restorations(), 2);
        assert_eq!(manager.complete_restorations(), 2);
        assert!(!manager.complete_next_restoration());
    }

    #[test]
    fn corrupt_restoration_leaves_buffer_blank() {
        let mut manager = manager();
        let geometry = StaticGeometry::new(400.0, 300.0, 1.0);
        manager
            .initialize(&geometry, &ToolState::default(), false)
            .unwrap();

        manager.schedule_restoration(Snapshot::from_png(vec![0, 1, 2, 3]));
        assert!(manager.complete_next_restoration());
        assert!(!manager.raster().unwrap().has_content());
    }

    #[test]
    fn unmount_drops_surface_and_queue() {
        let mut manager = manager();
        let tools = ToolState::default();
        let geometry = StaticGeometry::new(400.0, 300.0, 1.0);
        manager.initialize(&geometry, &tools, false).unwrap();
        manager.on_container_resize(&geometry, &tools).unwrap();

        manager.unmount();
        assert!(!manager.is_initialized());
        assert_eq!(manager.pending_restorations(), 0);
    }
}
