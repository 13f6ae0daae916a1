//! Cairo paint operations used by the stroke renderer and surface manager.
//!
//! The painting functions save and restore the context state they touch, so
//! the persistent DPR transform and line style survive each call.

use crate::input::{Tool, ToolState};
use crate::surface::Point;

/// Compositing operator a tool paints with.
pub fn operator_for(tool: Tool) -> cairo::Operator {
    match tool {
        Tool::Pencil => cairo::Operator::Over,
        Tool::Eraser => cairo::Operator::DestOut,
    }
}

/// Applies the persistent line style for a tool state.
///
/// Called after every buffer reallocation (which resets context state) and
/// whenever a control changes width or color.
pub fn apply_line_style(ctx: &cairo::Context, tools: &ToolState) {
    let color = tools.color();
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);
    ctx.set_line_width(tools.width() as f64);
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
}

/// Strokes one straight segment in logical coordinates.
///
/// Pencil segments composite the current color source-over; eraser segments
/// use destination-out and ignore color entirely. A zero-length segment
/// still leaves a round dot, matching a tap without movement.
pub fn stroke_segment(
    ctx: &cairo::Context,
    from: Point,
    to: Point,
    tools: &ToolState,
) -> Result<(), cairo::Error> {
    ctx.save()?;

    ctx.set_operator(operator_for(tools.tool()));
    ctx.set_line_width(tools.width() as f64);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);
    if tools.tool() == Tool::Pencil {
        let color = tools.color();
        ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    } else {
        // destination-out only reads source alpha
        ctx.set_source_rgba(0.0, 0.0, 0.0, 1.0);
    }

    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    let stroked = ctx.stroke();

    ctx.restore()?;
    stroked
}

/// Resets the whole physical buffer to transparent.
///
/// The transform is dropped to identity first so the clear covers every
/// device pixel, not just the logical rectangle.
pub fn clear_buffer(ctx: &cairo::Context) -> Result<(), cairo::Error> {
    ctx.save()?;
    ctx.identity_matrix();
    ctx.set_operator(cairo::Operator::Clear);
    let painted = ctx.paint();
    ctx.restore()?;
    painted
}

/// Draws a decoded snapshot stretched over `logical_width` x `logical_height`.
///
/// Uses plain source-over so a restored snapshot never erases anything.
pub fn paint_image(
    ctx: &cairo::Context,
    image: &cairo::ImageSurface,
    logical_width: f64,
    logical_height: f64,
) -> Result<(), cairo::Error> {
    let (image_width, image_height) = (image.width(), image.height());
    if image_width <= 0 || image_height <= 0 {
        return Ok(());
    }

    ctx.save()?;
    ctx.set_operator(cairo::Operator::Over);
    ctx.scale(
        logical_width / image_width as f64,
        logical_height / image_height as f64,
    );
    ctx.set_source_surface(image, 0.0, 0.0)?;
    let painted = ctx.paint();
    ctx.restore()?;
    painted
}
