use std::f64::consts::TAU;
use std::io::Write;

use smallvec::SmallVec;
use tracing::{Span, debug, trace};

use crate::core::{
    ArcDirection, ChartBox, Color, FontFace, Point, normalize_arc, quad_to_cubic,
    radians_to_degrees,
};
use crate::error::ChartResult;
use crate::render::canvas::{Canvas, with_saved_state};
use crate::render::{DEFAULT_DPI, Renderer, RendererConfig};

/// Mutable style registers consulted by later paint and text calls.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleState {
    pub stroke_color: Color,
    pub fill_color: Color,
    pub font_color: Color,
    pub stroke_width: f64,
    pub dash_array: SmallVec<[f64; 4]>,
    pub font: FontFace,
    pub font_size: f64,
    /// Text rotation in radians.
    pub text_rotation: f64,
}

impl StyleState {
    #[must_use]
    pub fn from_config(config: &RendererConfig) -> Self {
        Self {
            stroke_color: config.stroke_color,
            fill_color: config.fill_color,
            font_color: config.font_color,
            stroke_width: config.stroke_width,
            dash_array: SmallVec::new(),
            font: config.font_face(),
            font_size: config.font_size,
            text_rotation: 0.0,
        }
    }
}

/// [`Renderer`] implementation forwarding every primitive to a [`Canvas`].
///
/// One renderer lives for one render pass. Construction does not touch the
/// canvas, so a host-owned context keeps its state until the first primitive
/// arrives. Each call is logged as a `trace` event under the renderer's span.
#[derive(Debug)]
pub struct CanvasRenderer<C: Canvas> {
    canvas: C,
    config: RendererConfig,
    style: StyleState,
    span: Span,
}

impl<C: Canvas> CanvasRenderer<C> {
    pub fn new(canvas: C, config: RendererConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            canvas,
            style: StyleState::from_config(&config),
            config,
            span: Span::none(),
        })
    }

    /// Replaces the span every primitive event is attached to.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    #[must_use]
    pub fn span(&self) -> &Span {
        &self.span
    }

    #[must_use]
    pub fn style(&self) -> &StyleState {
        &self.style
    }

    #[must_use]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    #[must_use]
    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    fn apply_source(&mut self, color: Color) {
        self.canvas.set_source_rgba(color.normalized());
    }
}

impl<C: Canvas> Renderer for CanvasRenderer<C> {
    fn reset_style(&mut self) {
        trace!(parent: &self.span, "reset_style");
        self.style = StyleState {
            font: self.style.font.clone(),
            font_size: self.style.font_size,
            ..StyleState::from_config(&self.config)
        };
        self.canvas.set_line_width(self.style.stroke_width);
        self.canvas.set_dash(&[], 0.0);
    }

    fn dpi(&self) -> f64 {
        DEFAULT_DPI
    }

    fn set_dpi(&mut self, dpi: f64) {
        debug!(parent: &self.span, dpi, "ignoring dpi change, surface scale belongs to the host");
    }

    fn set_class_name(&mut self, class_name: &str) {
        trace!(parent: &self.span, class_name, "set_class_name");
    }

    fn set_stroke_color(&mut self, color: Color) {
        trace!(parent: &self.span, ?color, "set_stroke_color");
        self.style.stroke_color = color;
    }

    fn set_fill_color(&mut self, color: Color) {
        trace!(parent: &self.span, ?color, "set_fill_color");
        self.style.fill_color = color;
    }

    fn set_stroke_width(&mut self, width: f64) {
        trace!(parent: &self.span, width, "set_stroke_width");
        self.style.stroke_width = width;
        self.canvas.set_line_width(width);
    }

    fn set_stroke_dash_array(&mut self, dash_array: &[f64]) {
        trace!(parent: &self.span, ?dash_array, "set_stroke_dash_array");
        self.style.dash_array = SmallVec::from_slice(dash_array);
        self.canvas.set_dash(dash_array, 0.0);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        trace!(parent: &self.span, x, y, "move_to");
        self.canvas.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        trace!(parent: &self.span, x, y, "line_to");
        self.canvas.line_to(x, y);
    }

    fn quad_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) -> ChartResult<()> {
        trace!(parent: &self.span, cx, cy, x, y, "quad_curve_to");
        let control = Point::new(cx, cy);
        let start = match self.canvas.current_point()? {
            Some(point) => point,
            None => {
                self.canvas.move_to(cx, cy);
                control
            }
        };
        let cubic = quad_to_cubic(start, control, Point::new(x, y));
        self.canvas.curve_to(
            cubic.control1.x,
            cubic.control1.y,
            cubic.control2.x,
            cubic.control2.y,
            cubic.end.x,
            cubic.end.y,
        );
        Ok(())
    }

    fn arc_to(
        &mut self,
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        start_angle: f64,
        delta: f64,
    ) -> ChartResult<()> {
        trace!(parent: &self.span, cx, cy, rx, ry, start_angle, delta, "arc_to");
        let sweep = normalize_arc(start_angle, delta);
        with_saved_state(&mut self.canvas, |canvas| {
            canvas.translate(cx, cy);
            if rx != ry {
                canvas.scale(1.0, ry / rx);
            }
            match sweep.direction {
                ArcDirection::Clockwise => canvas.arc(0.0, 0.0, rx, sweep.start, sweep.end),
                ArcDirection::CounterClockwise => {
                    canvas.arc_negative(0.0, 0.0, rx, sweep.start, sweep.end);
                }
            }
            Ok(())
        })
    }

    fn close(&mut self) {
        trace!(parent: &self.span, "close");
        self.canvas.close_path();
    }

    fn stroke(&mut self) -> ChartResult<()> {
        trace!(parent: &self.span, "stroke");
        self.apply_source(self.style.stroke_color);
        self.canvas.stroke()
    }

    fn fill(&mut self) -> ChartResult<()> {
        trace!(parent: &self.span, "fill");
        self.apply_source(self.style.fill_color);
        self.canvas.fill()
    }

    fn fill_stroke(&mut self) -> ChartResult<()> {
        trace!(parent: &self.span, "fill_stroke");
        self.apply_source(self.style.fill_color);
        self.canvas.fill_preserve()?;
        self.apply_source(self.style.stroke_color);
        self.canvas.stroke()
    }

    fn circle(&mut self, radius: f64, x: f64, y: f64) {
        trace!(parent: &self.span, radius, x, y, "circle");
        self.canvas.new_sub_path();
        self.canvas.arc(x, y, radius, 0.0, TAU);
    }

    fn set_font(&mut self, font: &FontFace) {
        trace!(parent: &self.span, family = %font.family, ?font.weight, ?font.slant, "set_font");
        self.style.font = font.clone();
    }

    fn set_font_color(&mut self, color: Color) {
        trace!(parent: &self.span, ?color, "set_font_color");
        self.style.font_color = color;
    }

    fn set_font_size(&mut self, size: f64) {
        trace!(parent: &self.span, size, "set_font_size");
        self.style.font_size = size;
    }

    fn text(&mut self, body: &str, x: f64, y: f64) -> ChartResult<()> {
        trace!(parent: &self.span, body, x, y, rotation = self.style.text_rotation, "text");
        let color = self.style.font_color.normalized();
        let rotation = self.style.text_rotation;
        let font = &self.style.font;
        let size = self.style.font_size;
        with_saved_state(&mut self.canvas, |canvas| {
            canvas.set_source_rgba(color);
            canvas.translate(x, y);
            if rotation != 0.0 {
                canvas.rotate(rotation);
            }
            canvas.move_to(0.0, 0.0);
            canvas.show_text(font, size, body)
        })
    }

    fn measure_text(&mut self, body: &str) -> ChartResult<ChartBox> {
        trace!(parent: &self.span, body, "measure_text");
        let extents = self
            .canvas
            .text_extents(&self.style.font, self.style.font_size, body)?;
        let text_box = ChartBox::from_size(extents.width, extents.height);
        if self.style.text_rotation == 0.0 {
            return Ok(text_box);
        }
        Ok(text_box
            .corners()
            .rotate(radians_to_degrees(self.style.text_rotation))
            .bounds())
    }

    fn text_baseline(&mut self, body: &str) -> ChartResult<f64> {
        trace!(parent: &self.span, body, "text_baseline");
        let extents = self
            .canvas
            .text_extents(&self.style.font, self.style.font_size, body)?;
        Ok(extents.baseline)
    }

    fn set_text_rotation(&mut self, radians: f64) {
        trace!(parent: &self.span, radians, "set_text_rotation");
        self.style.text_rotation = radians;
    }

    fn clear_text_rotation(&mut self) {
        trace!(parent: &self.span, "clear_text_rotation");
        self.style.text_rotation = 0.0;
    }

    fn save(&mut self, writer: &mut dyn Write) -> ChartResult<()> {
        trace!(parent: &self.span, "save");
        self.canvas.write_output(writer)
    }
}
