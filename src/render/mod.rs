mod canvas;
mod canvas_renderer;
mod config;
mod recording;

pub use canvas::{Canvas, TextExtents, with_saved_state};
pub use canvas_renderer::{CanvasRenderer, StyleState};
pub use config::RendererConfig;
pub use recording::{CanvasCommand, CommandLog, RecordingCanvas, RecordingProvider};

use std::io::Write;

use crate::core::{ChartBox, Color, FontFace};
use crate::error::ChartResult;

/// Resolution reported by every renderer; surface scale is owned by the host.
pub const DEFAULT_DPI: f64 = 92.0;

/// Drawing-primitive interface chart code renders through.
///
/// Style setters only mutate renderer state; paint and text calls read that
/// state when they run. Callers set colors before the paint call that uses
/// them and call `reset_style` between unrelated chart elements, since text
/// rotation is never cleared implicitly.
pub trait Renderer {
    /// Clears text rotation and restores colors, stroke width and dash
    /// pattern to the renderer defaults. Font face and size are kept.
    fn reset_style(&mut self);

    fn dpi(&self) -> f64;
    /// Accepted and ignored.
    fn set_dpi(&mut self, dpi: f64);
    /// Accepted and ignored; only meaningful for markup outputs.
    fn set_class_name(&mut self, class_name: &str);

    fn set_stroke_color(&mut self, color: Color);
    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_width(&mut self, width: f64);
    /// An empty slice turns dashing off.
    fn set_stroke_dash_array(&mut self, dash_array: &[f64]);

    fn move_to(&mut self, x: f64, y: f64);
    /// Adds a line from the current point, starting a shape when there is none.
    fn line_to(&mut self, x: f64, y: f64);
    /// Quadratic curve with control point `(cx, cy)` ending at `(x, y)`.
    fn quad_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) -> ChartResult<()>;
    /// Elliptical arc around `(cx, cy)` with radii `(rx, ry)`, starting at
    /// `start_angle` and sweeping `delta` radians. Positive sweeps run
    /// clockwise on screen.
    fn arc_to(
        &mut self,
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        start_angle: f64,
        delta: f64,
    ) -> ChartResult<()>;
    fn close(&mut self);

    fn stroke(&mut self) -> ChartResult<()>;
    fn fill(&mut self) -> ChartResult<()>;
    /// Fills with the fill color, then strokes the same path.
    fn fill_stroke(&mut self) -> ChartResult<()>;
    fn circle(&mut self, radius: f64, x: f64, y: f64);

    fn set_font(&mut self, font: &FontFace);
    fn set_font_color(&mut self, color: Color);
    fn set_font_size(&mut self, size: f64);
    /// Draws `body` with its baseline origin at `(x, y)`, rotated about that
    /// point by the current text rotation.
    fn text(&mut self, body: &str, x: f64, y: f64) -> ChartResult<()>;
    /// Extent of `body` in the current font, re-bounded after rotation.
    fn measure_text(&mut self, body: &str) -> ChartResult<ChartBox>;
    /// Distance from the top of the unrotated extent of `body` to its
    /// baseline, in the current font.
    fn text_baseline(&mut self, body: &str) -> ChartResult<f64>;

    fn set_text_rotation(&mut self, radians: f64);
    fn clear_text_rotation(&mut self);

    /// Writes the rendered output. On-screen surfaces write nothing.
    fn save(&mut self, writer: &mut dyn Write) -> ChartResult<()>;
}

/// Factory yielding a renderer bound to a target size.
pub trait RendererProvider {
    fn renderer(&self, width: u32, height: u32) -> ChartResult<Box<dyn Renderer>>;
}

impl<F> RendererProvider for F
where
    F: Fn(u32, u32) -> ChartResult<Box<dyn Renderer>>,
{
    fn renderer(&self, width: u32, height: u32) -> ChartResult<Box<dyn Renderer>> {
        self(width, height)
    }
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{
    CairoCanvas, CairoContextProvider, CairoOutput, PngOutput, PngRenderer, PngRendererProvider,
    SvgOutput, SvgRenderer, SvgRendererProvider, WindowOutput, WindowRenderer,
};
