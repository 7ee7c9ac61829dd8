use std::io::Write;

use crate::core::{FontFace, NormalizedColor, Point};
use crate::error::ChartResult;

/// Logical extent of a laid-out string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtents {
    pub width: f64,
    pub height: f64,
    /// Distance from the top of the extent to the baseline.
    pub baseline: f64,
}

/// Immediate-mode vector drawing surface the renderer forwards to.
///
/// The method set mirrors cairo's context API: path construction, transform
/// state with save/restore, paint source, stroke/fill and text. Coordinates
/// are in user space; the current transform applies at the time each path
/// element is added.
pub trait Canvas {
    fn save(&mut self) -> ChartResult<()>;
    fn restore(&mut self) -> ChartResult<()>;

    fn translate(&mut self, tx: f64, ty: f64);
    fn scale(&mut self, sx: f64, sy: f64);
    fn rotate(&mut self, radians: f64);

    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64);
    fn arc(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64);
    fn arc_negative(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64);
    fn new_sub_path(&mut self);
    fn close_path(&mut self);

    /// Current point in user space, `None` when the path has no current point.
    fn current_point(&self) -> ChartResult<Option<Point>>;

    fn set_source_rgba(&mut self, color: NormalizedColor);
    fn set_line_width(&mut self, width: f64);
    /// An empty pattern disables dashing.
    fn set_dash(&mut self, dashes: &[f64], offset: f64);

    fn stroke(&mut self) -> ChartResult<()>;
    fn fill(&mut self) -> ChartResult<()>;
    fn fill_preserve(&mut self) -> ChartResult<()>;

    /// Draws `text` with its baseline origin at the current point.
    fn show_text(&mut self, face: &FontFace, size: f64, text: &str) -> ChartResult<()>;
    fn text_extents(&mut self, face: &FontFace, size: f64, text: &str) -> ChartResult<TextExtents>;

    /// Writes the finished surface to `writer`.
    ///
    /// Surfaces that are already on screen have nothing to export; the
    /// default does nothing.
    fn write_output(&mut self, writer: &mut dyn Write) -> ChartResult<()> {
        let _ = writer;
        Ok(())
    }
}

/// Runs `draw` between `save` and `restore`.
///
/// The restore is issued even when `draw` fails; the draw error wins over a
/// restore error.
pub fn with_saved_state<C, T, F>(canvas: &mut C, draw: F) -> ChartResult<T>
where
    C: Canvas + ?Sized,
    F: FnOnce(&mut C) -> ChartResult<T>,
{
    canvas.save()?;
    let drawn = draw(canvas);
    let restored = canvas.restore();
    let value = drawn?;
    restored?;
    Ok(value)
}
