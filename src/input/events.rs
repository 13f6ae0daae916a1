//! Platform-neutral pointer and touch events.

use crate::surface::Point;

/// One pointer, pen, or touch event in client (viewport) coordinates.
///
/// Mouse and pen events carry `client_x`/`client_y` directly; touch events
/// carry their contact points in `touches`. Either side may be missing on a
/// malformed event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerEvent {
    /// Platform pointer id, used when requesting pointer capture
    pub pointer_id: Option<i32>,
    /// Client-space X of a mouse/pen event
    pub client_x: Option<f64>,
    /// Client-space Y of a mouse/pen event
    pub client_y: Option<f64>,
    /// Active touch points, first contact first
    pub touches: Vec<Point>,
}

impl PointerEvent {
    /// A mouse/pen event at client coordinates (`x`, `y`).
    pub fn pointer(x: f64, y: f64) -> Self {
        Self {
            client_x: Some(x),
            client_y: Some(y),
            ..Self::default()
        }
    }

    /// A touch event with the given contact points.
    pub fn touch(touches: impl IntoIterator<Item = Point>) -> Self {
        Self {
            touches: touches.into_iter().collect(),
            ..Self::default()
        }
    }

    /// An event that carries no coordinates at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_pointer_id(mut self, id: i32) -> Self {
        self.pointer_id = Some(id);
        self
    }

    /// Resolves client coordinates, preferring the direct pointer fields and
    /// falling back to the first touch per axis.
    pub fn client_position(&self) -> Option<Point> {
        let first_touch = self.touches.first();
        let x = self
            .client_x
            .or_else(|| first_touch.map(|touch| touch.x))
            .filter(|x| x.is_finite())?;
        let y = self
            .client_y
            .or_else(|| first_touch.map(|touch| touch.y))
            .filter(|y| y.is_finite())?;
        Some(Point::new(x, y))
    }
}

/// Pointer id the host should capture after a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerCapture(pub i32);

impl PointerCapture {
    pub(crate) fn for_event(event: &PointerEvent) -> Self {
        Self(event.pointer_id.unwrap_or(1))
    }
}
