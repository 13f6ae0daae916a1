//! Input handling: pointer events, coordinate translation, tool state, and
//! the per-gesture stroke session.

pub mod events;
pub mod session;
pub mod tool;
pub mod translate;

pub use events::{PointerCapture, PointerEvent};
pub use session::{StrokePhase, StrokeSession};
pub use tool::{MAX_WIDTH, MIN_WIDTH, Tool, ToolState};
pub use translate::to_local_point;
