use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::charts::draw::{
    AXIS_COLOR, BACKGROUND_COLOR, CANVAS_PADDING, GRID_COLOR, LABEL_FONT_SIZE, LABEL_GAP,
    TEXT_COLOR, draw_title, fill_background, format_value, label_style, rounded_box_path,
    stroke_line, text_centered, text_middle_aligned, text_top_aligned,
};
use crate::charts::{Chart, LinearRange};
use crate::core::{ChartBox, Color, Viewport, series_color};
use crate::error::{ChartError, ChartResult};
use crate::render::{Renderer, RendererProvider};

const AXIS_TICK_COUNT: usize = 5;
const SERIES_STROKE_WIDTH: f64 = 2.0;
const ANNOTATION_PADDING: f64 = 5.0;
const ANNOTATION_CORNER_RADIUS: f64 = 4.0;
const ANNOTATION_POINTER: f64 = 6.0;

/// X/Y samples joined by straight segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuousSeries {
    pub name: String,
    pub x_values: Vec<f64>,
    pub y_values: Vec<f64>,
    #[serde(default)]
    pub color: Option<Color>,
}

impl ContinuousSeries {
    #[must_use]
    pub fn new(name: impl Into<String>, x_values: Vec<f64>, y_values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            x_values,
            y_values,
            color: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.x_values.is_empty() || self.x_values.len() != self.y_values.len() {
            return Err(ChartError::InvalidData(format!(
                "series `{}` needs matching, non-empty x and y values",
                self.name
            )));
        }
        if self
            .x_values
            .iter()
            .chain(&self.y_values)
            .any(|value| !value.is_finite())
        {
            return Err(ChartError::InvalidData(format!(
                "series `{}` contains non-finite values",
                self.name
            )));
        }
        Ok(())
    }

    fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x_values.iter().copied().zip(self.y_values.iter().copied())
    }
}

/// Text callout pinned to a data coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

impl Annotation {
    #[must_use]
    pub fn new(x: f64, y: f64, label: impl Into<String>) -> Self {
        Self {
            x,
            y,
            label: label.into(),
        }
    }
}

/// Line chart with linear axes and optional annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub viewport: Viewport,
    pub series: Vec<ContinuousSeries>,
    pub annotations: Vec<Annotation>,
}

impl LineChart {
    #[must_use]
    pub fn new(viewport: Viewport, series: Vec<ContinuousSeries>) -> Self {
        Self {
            title: String::new(),
            viewport,
            series,
            annotations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.viewport.validate()?;
        if self.series.is_empty() {
            return Err(ChartError::InvalidData(
                "line chart needs at least one series".to_owned(),
            ));
        }
        for series in &self.series {
            series.validate()?;
        }
        if self
            .annotations
            .iter()
            .any(|annotation| !annotation.x.is_finite() || !annotation.y.is_finite())
        {
            return Err(ChartError::InvalidData(
                "annotation coordinates must be finite".to_owned(),
            ));
        }
        Ok(())
    }

    fn ranges(&self) -> ChartResult<(LinearRange, LinearRange)> {
        let xs = self
            .series
            .iter()
            .flat_map(|series| series.x_values.iter().copied())
            .chain(self.annotations.iter().map(|annotation| annotation.x));
        let ys = self
            .series
            .iter()
            .flat_map(|series| series.y_values.iter().copied())
            .chain(self.annotations.iter().map(|annotation| annotation.y));
        Ok((LinearRange::covering(xs)?, LinearRange::covering(ys)?))
    }

    fn draw(&self, renderer: &mut dyn Renderer) -> ChartResult<()> {
        fill_background(renderer, self.viewport)?;
        let plot_top = draw_title(renderer, &self.title, self.viewport)?;

        let (x_range, y_range) = self.ranges()?;
        let x_ticks = x_range.ticks(AXIS_TICK_COUNT);
        let y_ticks = y_range.ticks(AXIS_TICK_COUNT);

        label_style(renderer, LABEL_FONT_SIZE, TEXT_COLOR);
        let mut y_label_width: f64 = 0.0;
        for tick in &y_ticks {
            let measured = renderer.measure_text(&format_value(*tick))?;
            y_label_width = y_label_width.max(measured.width());
        }
        let x_label_height = renderer.measure_text(&format_value(x_ticks[0]))?.height();
        renderer.reset_style();

        let plot = ChartBox::new(
            plot_top,
            CANVAS_PADDING + y_label_width + LABEL_GAP,
            f64::from(self.viewport.width) - CANVAS_PADDING,
            f64::from(self.viewport.height) - CANVAS_PADDING - x_label_height - LABEL_GAP,
        );
        if plot.is_empty() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        let x_range = x_range.with_pixels(plot.left, plot.right);
        let y_range = y_range.with_pixels(plot.bottom, plot.top);

        for tick in &y_ticks {
            let y = y_range.translate(*tick);
            stroke_line(renderer, (plot.left, y), (plot.right, y), GRID_COLOR, 1.0)?;
            label_style(renderer, LABEL_FONT_SIZE, TEXT_COLOR);
            let label = format_value(*tick);
            let measured = renderer.measure_text(&label)?;
            text_middle_aligned(renderer, &label, plot.left - LABEL_GAP - measured.width(), y)?;
            renderer.reset_style();
        }
        for tick in &x_ticks {
            let x = x_range.translate(*tick);
            label_style(renderer, LABEL_FONT_SIZE, TEXT_COLOR);
            text_centered(renderer, &format_value(*tick), x, plot.bottom + LABEL_GAP)?;
            renderer.reset_style();
        }

        stroke_line(renderer, (plot.left, plot.top), (plot.left, plot.bottom), AXIS_COLOR, 1.0)?;
        stroke_line(renderer, (plot.left, plot.bottom), (plot.right, plot.bottom), AXIS_COLOR, 1.0)?;

        for (index, series) in self.series.iter().enumerate() {
            renderer.set_stroke_color(series.color.unwrap_or_else(|| series_color(index)));
            renderer.set_stroke_width(SERIES_STROKE_WIDTH);
            let mut points = series.points();
            if let Some((x, y)) = points.next() {
                renderer.move_to(x_range.translate(x), y_range.translate(y));
            }
            for (x, y) in points {
                renderer.line_to(x_range.translate(x), y_range.translate(y));
            }
            renderer.stroke()?;
            renderer.reset_style();
        }

        for annotation in &self.annotations {
            draw_annotation(
                renderer,
                &annotation.label,
                x_range.translate(annotation.x),
                y_range.translate(annotation.y),
            )?;
        }
        debug!(
            series = self.series.len(),
            annotations = self.annotations.len(),
            "line chart drawn"
        );
        Ok(())
    }
}

/// Rounded label box to the right of `(x, y)` with a pointer back to it.
fn draw_annotation(renderer: &mut dyn Renderer, label: &str, x: f64, y: f64) -> ChartResult<()> {
    label_style(renderer, LABEL_FONT_SIZE, TEXT_COLOR);
    let measured = renderer.measure_text(label)?;
    let label_box = ChartBox::new(
        y - measured.height() / 2.0 - ANNOTATION_PADDING,
        x + ANNOTATION_POINTER,
        x + ANNOTATION_POINTER + measured.width() + 2.0 * ANNOTATION_PADDING,
        y + measured.height() / 2.0 + ANNOTATION_PADDING,
    );

    renderer.set_fill_color(BACKGROUND_COLOR);
    renderer.set_stroke_color(AXIS_COLOR);
    renderer.set_stroke_width(1.0);
    renderer.move_to(x, y);
    renderer.line_to(label_box.left, y - ANNOTATION_POINTER / 2.0);
    renderer.line_to(label_box.left, y + ANNOTATION_POINTER / 2.0);
    renderer.close();
    renderer.fill_stroke()?;

    rounded_box_path(renderer, label_box, ANNOTATION_CORNER_RADIUS)?;
    renderer.fill_stroke()?;

    text_top_aligned(
        renderer,
        label,
        label_box.left + ANNOTATION_PADDING,
        label_box.top + ANNOTATION_PADDING,
    )?;
    renderer.reset_style();
    Ok(())
}

impl Chart for LineChart {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn render(&self, provider: &dyn RendererProvider, writer: &mut dyn Write) -> ChartResult<()> {
        self.validate()?;
        let mut renderer = provider.renderer(self.viewport.width, self.viewport.height)?;
        self.draw(renderer.as_mut())?;
        renderer.save(writer)
    }
}
