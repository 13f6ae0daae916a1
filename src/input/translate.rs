//! Client-space to logical surface-space translation.

use super::events::PointerEvent;
use crate::surface::Point;

/// Converts an event's client coordinates into logical surface coordinates.
///
/// Only the surface's on-screen origin is subtracted. The device-pixel-ratio
/// lives in the context transform, so scaling here would double it.
/// Returns `None` if the event has no usable coordinates.
pub fn to_local_point(event: &PointerEvent, surface_origin: Point) -> Option<Point> {
    event
        .client_position()
        .map(|client| Point::new(client.x - surface_origin.x, client.y - surface_origin.y))
}
