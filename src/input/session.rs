//! Per-gesture stroke session state machine.

use crate::surface::Point;

/// Whether a gesture is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokePhase {
    /// No button held; movement draws nothing
    #[default]
    Idle,
    /// Between pointer-down and pointer-up/leave
    Active,
}

/// Transient state for one continuous gesture.
///
/// `last_point` is kept after the gesture ends so a later press with no
/// coordinates has somewhere to start.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrokeSession {
    phase: StrokePhase,
    last_point: Point,
}

impl StrokeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> StrokePhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == StrokePhase::Active
    }

    pub fn last_point(&self) -> Point {
        self.last_point
    }

    /// Idle -> Active at `start` (or the previous point if unknown).
    pub fn begin(&mut self, start: Option<Point>) {
        self.phase = StrokePhase::Active;
        if let Some(start) = start {
            self.last_point = start;
        }
    }

    /// Moves the pen and returns the segment to paint.
    ///
    /// `None` while idle. An unknown position repeats `last_point`, giving a
    /// zero-length segment.
    pub fn advance(&mut self, to: Option<Point>) -> Option<(Point, Point)> {
        if !self.is_active() {
            return None;
        }
        let from = self.last_point;
        let to = to.unwrap_or(from);
        self.last_point = to;
        Some((from, to))
    }

    /// Active -> Idle. Paints nothing.
    pub fn end(&mut self) {
        self.phase = StrokePhase::Idle;
    }
}
