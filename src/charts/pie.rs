use std::f64::consts::TAU;
use std::io::Write;

use tracing::debug;

use crate::charts::draw::{
    BACKGROUND_COLOR, CANVAS_PADDING, LABEL_FONT_SIZE, draw_title, fill_background, label_style,
    text_middle_aligned,
};
use crate::charts::{Chart, Value, validate_values};
use crate::core::{Color, Point, Viewport, series_color};
use crate::error::{ChartError, ChartResult};
use crate::render::{Renderer, RendererProvider};

const SLICE_STROKE_WIDTH: f64 = 2.0;
const PIE_LABEL_RADIUS_RATIO: f64 = 2.0 / 3.0;
const DEFAULT_DONUT_HOLE_RATIO: f64 = 0.5;

/// Proportional slices of a full circle.
#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: String,
    pub viewport: Viewport,
    pub values: Vec<Value>,
}

impl PieChart {
    #[must_use]
    pub fn new(viewport: Viewport, values: Vec<Value>) -> Self {
        Self {
            title: String::new(),
            viewport,
            values,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

impl Chart for PieChart {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn render(&self, provider: &dyn RendererProvider, writer: &mut dyn Write) -> ChartResult<()> {
        let layout = SliceLayout::resolve(self.viewport, &self.values)?;
        let mut renderer = provider.renderer(self.viewport.width, self.viewport.height)?;
        let renderer = renderer.as_mut();
        fill_background(renderer, self.viewport)?;
        let top = draw_title(renderer, &self.title, self.viewport)?;
        let disc = layout.disc(self.viewport, top);
        draw_slices(renderer, &self.values, layout.total, disc)?;
        draw_slice_labels(
            renderer,
            &self.values,
            layout.total,
            disc,
            disc.radius * PIE_LABEL_RADIUS_RATIO,
        )?;
        debug!(slices = self.values.len(), "pie chart drawn");
        renderer.save(writer)
    }
}

/// Pie chart with a hollow center.
#[derive(Debug, Clone, PartialEq)]
pub struct DonutChart {
    pub title: String,
    pub viewport: Viewport,
    pub values: Vec<Value>,
    /// Hole radius relative to the outer radius, in `[0, 1)`.
    pub hole_ratio: f64,
}

impl DonutChart {
    #[must_use]
    pub fn new(viewport: Viewport, values: Vec<Value>) -> Self {
        Self {
            title: String::new(),
            viewport,
            values,
            hole_ratio: DEFAULT_DONUT_HOLE_RATIO,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_hole_ratio(mut self, hole_ratio: f64) -> Self {
        self.hole_ratio = hole_ratio;
        self
    }
}

impl Chart for DonutChart {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn render(&self, provider: &dyn RendererProvider, writer: &mut dyn Write) -> ChartResult<()> {
        if !self.hole_ratio.is_finite() || !(0.0..1.0).contains(&self.hole_ratio) {
            return Err(ChartError::InvalidData(
                "donut hole ratio must be in [0, 1)".to_owned(),
            ));
        }
        let layout = SliceLayout::resolve(self.viewport, &self.values)?;
        let mut renderer = provider.renderer(self.viewport.width, self.viewport.height)?;
        let renderer = renderer.as_mut();
        fill_background(renderer, self.viewport)?;
        let top = draw_title(renderer, &self.title, self.viewport)?;
        let disc = layout.disc(self.viewport, top);
        draw_slices(renderer, &self.values, layout.total, disc)?;

        let hole_radius = disc.radius * self.hole_ratio;
        renderer.set_fill_color(BACKGROUND_COLOR);
        renderer.set_stroke_color(BACKGROUND_COLOR);
        renderer.set_stroke_width(SLICE_STROKE_WIDTH);
        renderer.circle(hole_radius, disc.center.x, disc.center.y);
        renderer.fill_stroke()?;
        renderer.reset_style();

        draw_slice_labels(
            renderer,
            &self.values,
            layout.total,
            disc,
            (disc.radius + hole_radius) / 2.0,
        )?;
        debug!(slices = self.values.len(), "donut chart drawn");
        renderer.save(writer)
    }
}

#[derive(Debug, Clone, Copy)]
struct SliceLayout {
    total: f64,
}

#[derive(Debug, Clone, Copy)]
struct Disc {
    center: Point,
    radius: f64,
}

impl SliceLayout {
    fn resolve(viewport: Viewport, values: &[Value]) -> ChartResult<Self> {
        viewport.validate()?;
        let total = validate_values(values)?;
        if values.iter().any(|value| value.value < 0.0) {
            return Err(ChartError::InvalidData(
                "slice values must not be negative".to_owned(),
            ));
        }
        if total <= 0.0 {
            return Err(ChartError::InvalidData(
                "slice values must sum to more than zero".to_owned(),
            ));
        }
        Ok(Self { total })
    }

    fn disc(self, viewport: Viewport, top: f64) -> Disc {
        let width = f64::from(viewport.width);
        let bottom = f64::from(viewport.height) - CANVAS_PADDING;
        let radius = ((width - 2.0 * CANVAS_PADDING).min(bottom - top) / 2.0).max(0.0);
        Disc {
            center: Point::new(width / 2.0, top + (bottom - top) / 2.0),
            radius,
        }
    }
}

fn draw_slices(
    renderer: &mut dyn Renderer,
    values: &[Value],
    total: f64,
    disc: Disc,
) -> ChartResult<()> {
    let mut start = 0.0;
    for (index, value) in values.iter().enumerate() {
        let delta = value.value / total * TAU;
        renderer.set_fill_color(series_color(index));
        renderer.set_stroke_color(BACKGROUND_COLOR);
        renderer.set_stroke_width(SLICE_STROKE_WIDTH);
        renderer.move_to(disc.center.x, disc.center.y);
        renderer.arc_to(
            disc.center.x,
            disc.center.y,
            disc.radius,
            disc.radius,
            start,
            delta,
        )?;
        renderer.line_to(disc.center.x, disc.center.y);
        renderer.close();
        renderer.fill_stroke()?;
        renderer.reset_style();
        start += delta;
    }
    Ok(())
}

fn draw_slice_labels(
    renderer: &mut dyn Renderer,
    values: &[Value],
    total: f64,
    disc: Disc,
    label_radius: f64,
) -> ChartResult<()> {
    let mut start = 0.0;
    for value in values {
        let delta = value.value / total * TAU;
        if value.label.is_empty() || delta == 0.0 {
            start += delta;
            continue;
        }
        let (sin, cos) = (start + delta / 2.0).sin_cos();
        let anchor = Point::new(
            disc.center.x + label_radius * cos,
            disc.center.y + label_radius * sin,
        );
        label_style(renderer, LABEL_FONT_SIZE, Color::WHITE);
        let measured = renderer.measure_text(&value.label)?;
        text_middle_aligned(
            renderer,
            &value.label,
            anchor.x - measured.width() / 2.0,
            anchor.y,
        )?;
        renderer.reset_style();
        start += delta;
    }
    Ok(())
}
