//! The drawing pad: surface manager, stroke session, and tool state wired
//! to the host's geometry and event stream.

use crate::config::Config;
use crate::draw::Color;
use crate::input::{
    PointerCapture, PointerEvent, StrokeSession, Tool, ToolState, to_local_point,
};
use crate::surface::{ContainerGeometry, RasterSurface, Snapshot, SurfaceError, SurfaceManager};
use log::{debug, trace};

/// One drawing pad instance.
///
/// Every pad owns its own raster and context; nothing is shared between
/// instances. All handlers run to completion on the caller's thread.
#[derive(Debug)]
pub struct DrawingPad<G: ContainerGeometry> {
    geometry: G,
    surface: SurfaceManager,
    tools: ToolState,
    session: StrokeSession,
}

impl<G: ContainerGeometry> DrawingPad<G> {
    /// Creates an unmounted pad; call [`Self::mount`] before drawing.
    pub fn new(geometry: G, config: &Config) -> Self {
        Self {
            geometry,
            surface: SurfaceManager::new(config.surface.clone()),
            tools: config.initial_tool_state(),
            session: StrokeSession::new(),
        }
    }

    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    /// Mutable access for hosts whose geometry is a plain value; follow up
    /// with [`Self::on_container_resize`] once the layout has changed.
    pub fn geometry_mut(&mut self) -> &mut G {
        &mut self.geometry
    }

    pub fn surface(&self) -> &SurfaceManager {
        &self.surface
    }

    pub fn raster(&self) -> Option<&RasterSurface> {
        self.surface.raster()
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn session(&self) -> &StrokeSession {
        &self.session
    }

    /// Allocates the first buffer. Nothing is drawn before this.
    pub fn mount(&mut self) -> Result<(), SurfaceError> {
        self.surface.initialize(&self.geometry, &self.tools, false)
    }

    /// Releases the raster; later events are no-ops until remounted.
    pub fn unmount(&mut self) {
        self.session.end();
        self.surface.unmount();
    }

    /// Re-measures the container and reallocates, queueing a restoration.
    pub fn on_container_resize(&mut self) -> Result<(), SurfaceError> {
        self.surface.on_container_resize(&self.geometry, &self.tools)
    }

    /// Starts a gesture and returns the pointer the host should capture so
    /// movement keeps arriving outside the surface bounds.
    ///
    /// Ignored before mount: no session starts and nothing is captured.
    pub fn on_pointer_down(&mut self, event: &PointerEvent) -> Option<PointerCapture> {
        if !self.surface.is_initialized() {
            debug!("Ignoring pointer press before mount");
            return None;
        }
        let start = to_local_point(event, self.geometry.surface_origin());
        self.session.begin(start);
        debug!(
            "Stroke started at {:?} with {}",
            self.session.last_point(),
            self.tools.tool().label()
        );
        Some(PointerCapture::for_event(event))
    }

    /// Paints the segment from the previous point to this event's point.
    ///
    /// Ignored while idle or before mount. Tool state is read here, per
    /// segment, so control changes mid-gesture apply immediately.
    pub fn on_pointer_move(&mut self, event: &PointerEvent) {
        if !self.session.is_active() {
            return;
        }
        let Some(raster) = self.surface.raster() else {
            return;
        };

        let point = to_local_point(event, self.geometry.surface_origin());
        if let Some((from, to)) = self.session.advance(point) {
            trace!("Segment {from:?} -> {to:?}");
            raster.stroke_segment(from, to, &self.tools);
        }
    }

    /// Ends the gesture without painting.
    pub fn on_pointer_up(&mut self) {
        if self.session.is_active() {
            debug!("Stroke ended at {:?}", self.session.last_point());
        }
        self.session.end();
    }

    /// Same as [`Self::on_pointer_up`]; leaving the surface ends the gesture.
    pub fn on_pointer_leave(&mut self) {
        self.on_pointer_up();
    }

    pub fn set_tool(&mut self, tool: Tool) {
        if self.tools.tool() != tool {
            debug!("Tool changed to {}", tool.label());
        }
        self.tools.set_tool(tool);
    }

    /// Sets the stroke width (clamped to 1-40) and pushes it to the context.
    pub fn set_width(&mut self, width: u32) {
        self.tools.set_width(width);
        self.surface.apply_tool_state(&self.tools);
    }

    pub fn set_color(&mut self, color: Color) {
        self.tools.set_color(color);
        self.surface.apply_tool_state(&self.tools);
    }

    /// Clears the whole buffer to transparent. No-op before mount.
    pub fn clear(&mut self) {
        if let Some(raster) = self.surface.raster() {
            raster.clear();
            debug!("Cleared raster surface");
        }
    }

    pub fn pending_restorations(&self) -> usize {
        self.surface.pending_restorations()
    }

    /// Lets the oldest restoration finish decoding and repaint.
    pub fn complete_next_restoration(&mut self) -> bool {
        self.surface.complete_next_restoration()
    }

    /// Completes every pending restoration, oldest first.
    pub fn complete_restorations(&mut self) -> usize {
        self.surface.complete_restorations()
    }

    /// Encodes the current buffer as PNG, or `None` before mount.
    pub fn export_png(&self) -> Result<Option<Snapshot>, SurfaceError> {
        self.surface
            .raster()
            .map(|raster| Snapshot::capture(raster.image()))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Point, StaticGeometry};

    fn mounted_pad() -> DrawingPad<StaticGeometry> {
        let mut pad = DrawingPad::new(StaticGeometry::new(400.0, 308.0, 1.0), &Config::default());
        pad.mount().unwrap();
        pad
    }

    #[test]
    fn events_before_mount_are_noops() {
        let mut pad = DrawingPad::new(StaticGeometry::new(400.0, 308.0, 1.0), &Config::default());
        assert_eq!(pad.on_pointer_down(&PointerEvent::pointer(1.0, 1.0)), None);
        assert!(!pad.session().is_active());
        pad.on_pointer_move(&PointerEvent::pointer(9.0, 9.0));
        pad.clear();
        pad.on_container_resize().unwrap();
        assert!(pad.raster().is_none());
        assert_eq!(pad.export_png().unwrap(), None);
    }

    #[test]
    fn press_before_mount_does_not_carry_into_mounted_pad() {
        let mut pad = DrawingPad::new(StaticGeometry::new(400.0, 308.0, 1.0), &Config::default());
        pad.on_pointer_down(&PointerEvent::pointer(10.0, 10.0));
        pad.mount().unwrap();
        pad.on_pointer_move(&PointerEvent::pointer(50.0, 10.0));

        assert!(!pad.session().is_active());
        assert!(!pad.raster().unwrap().has_content());
    }

    #[test]
    fn capture_request_defaults_to_pointer_one() {
        let mut pad = mounted_pad();
        assert_eq!(
            pad.on_pointer_down(&PointerEvent::pointer(1.0, 1.0)),
            Some(PointerCapture(1))
        );
        pad.on_pointer_up();
        assert_eq!(
            pad.on_pointer_down(&PointerEvent::pointer(1.0, 1.0).with_pointer_id(7)),
            Some(PointerCapture(7))
        );
    }

    #[test]
    fn press_without_coordinates_resumes_from_last_point() {
        let mut pad = mounted_pad();
        pad.on_pointer_down(&PointerEvent::pointer(30.0, 40.0));
        pad.on_pointer_up();
        pad.on_pointer_down(&PointerEvent::empty());
        assert_eq!(pad.session().last_point(), Point::new(30.0, 40.0));
    }

    #[test]
    fn width_changes_are_clamped() {
        let mut pad = mounted_pad();
        pad.set_width(0);
        assert_eq!(pad.tools().width(), 1);
        pad.set_width(41);
        assert_eq!(pad.tools().width(), 40);
    }

    #[test]
    fn unmount_ends_the_gesture() {
        let mut pad = mounted_pad();
        pad.on_pointer_down(&PointerEvent::pointer(5.0, 5.0));
        pad.unmount();
        assert!(!pad.session().is_active());
        assert!(pad.raster().is_none());
    }
}
