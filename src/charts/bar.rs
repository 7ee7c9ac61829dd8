use std::f64::consts::FRAC_PI_4;
use std::io::Write;

use tracing::debug;

use crate::charts::draw::{
    AXIS_COLOR, CANVAS_PADDING, GRID_COLOR, LABEL_FONT_SIZE, LABEL_GAP, TEXT_COLOR, draw_title,
    fill_background, format_value, label_style, rect_path, stroke_line, text_centered,
    text_middle_aligned, text_top_aligned,
};
use crate::charts::{Chart, LinearRange, Value, validate_values};
use crate::core::{ChartBox, Viewport, series_color};
use crate::error::{ChartError, ChartResult};
use crate::render::{Renderer, RendererProvider};

const VALUE_TICK_COUNT: usize = 5;
const MAX_BAR_SLOT_FILL: f64 = 0.8;

/// Vertical bars on a shared value axis, one label under each bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub viewport: Viewport,
    pub bar_width: f64,
    /// Extra space reserved above the plot, below the title.
    pub padding_top: f64,
    pub bars: Vec<Value>,
}

impl BarChart {
    #[must_use]
    pub fn new(title: impl Into<String>, viewport: Viewport, bars: Vec<Value>) -> Self {
        Self {
            title: title.into(),
            viewport,
            bar_width: 50.0,
            padding_top: 0.0,
            bars,
        }
    }

    #[must_use]
    pub fn with_bar_width(mut self, bar_width: f64) -> Self {
        self.bar_width = bar_width;
        self
    }

    #[must_use]
    pub fn with_padding_top(mut self, padding_top: f64) -> Self {
        self.padding_top = padding_top;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.viewport.validate()?;
        validate_values(&self.bars)?;
        if !self.bar_width.is_finite() || self.bar_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "bar width must be finite and > 0".to_owned(),
            ));
        }
        if !self.padding_top.is_finite() || self.padding_top < 0.0 {
            return Err(ChartError::InvalidData(
                "top padding must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn value_range(&self) -> ChartResult<LinearRange> {
        let values = self.bars.iter().map(|bar| bar.value);
        // Bars grow from zero, so zero is always on the axis.
        LinearRange::covering(values.chain(std::iter::once(0.0)))
    }

    fn draw(&self, renderer: &mut dyn Renderer) -> ChartResult<()> {
        fill_background(renderer, self.viewport)?;
        let plot_top = draw_title(renderer, &self.title, self.viewport)? + self.padding_top;

        let range = self.value_range()?;
        let ticks = range.ticks(VALUE_TICK_COUNT);

        label_style(renderer, LABEL_FONT_SIZE, TEXT_COLOR);
        let mut axis_label_width: f64 = 0.0;
        for tick in &ticks {
            let measured = renderer.measure_text(&format_value(*tick))?;
            axis_label_width = axis_label_width.max(measured.width());
        }
        let plot_left = CANVAS_PADDING + axis_label_width + LABEL_GAP;
        let plot_right = f64::from(self.viewport.width) - CANVAS_PADDING;
        let slot = (plot_right - plot_left) / self.bars.len() as f64;
        let label_band = self.label_band_height(renderer, slot)?;
        renderer.reset_style();

        let plot = ChartBox::new(
            plot_top,
            plot_left,
            plot_right,
            f64::from(self.viewport.height) - CANVAS_PADDING - label_band,
        );
        if plot.is_empty() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        let range = range.with_pixels(plot.bottom, plot.top);

        for tick in &ticks {
            let y = range.translate(*tick);
            stroke_line(renderer, (plot.left, y), (plot.right, y), GRID_COLOR, 1.0)?;
            label_style(renderer, LABEL_FONT_SIZE, TEXT_COLOR);
            let label = format_value(*tick);
            let measured = renderer.measure_text(&label)?;
            text_middle_aligned(renderer, &label, plot.left - LABEL_GAP - measured.width(), y)?;
            renderer.reset_style();
        }

        let bar_width = self.bar_width.min(slot * MAX_BAR_SLOT_FILL);
        let zero = range.translate(0.0);
        for (index, bar) in self.bars.iter().enumerate() {
            let center = plot.left + slot * (index as f64 + 0.5);
            let value_y = range.translate(bar.value);
            let bar_box = ChartBox::new(
                value_y.min(zero),
                center - bar_width / 2.0,
                center + bar_width / 2.0,
                value_y.max(zero),
            );
            let color = series_color(index);
            renderer.set_fill_color(color);
            renderer.set_stroke_color(color);
            renderer.set_stroke_width(1.0);
            rect_path(renderer, bar_box);
            renderer.fill_stroke()?;
            renderer.reset_style();

            self.draw_bar_label(renderer, &bar.label, center, plot.bottom + LABEL_GAP, slot)?;
        }

        stroke_line(
            renderer,
            (plot.left, plot.top),
            (plot.left, plot.bottom),
            AXIS_COLOR,
            1.0,
        )?;
        stroke_line(
            renderer,
            (plot.left, zero),
            (plot.right, zero),
            AXIS_COLOR,
            1.0,
        )?;
        debug!(bars = self.bars.len(), "bar chart drawn");
        Ok(())
    }

    /// Height reserved under the plot for bar labels, rotated when they
    /// do not fit their slot.
    fn label_band_height(&self, renderer: &mut dyn Renderer, slot: f64) -> ChartResult<f64> {
        let mut height: f64 = 0.0;
        for bar in &self.bars {
            let flat = renderer.measure_text(&bar.label)?;
            let label_height = if flat.width() <= slot {
                flat.height()
            } else {
                renderer.set_text_rotation(FRAC_PI_4);
                let rotated = renderer.measure_text(&bar.label);
                renderer.clear_text_rotation();
                rotated?.height()
            };
            height = height.max(label_height);
        }
        Ok(height + LABEL_GAP)
    }

    fn draw_bar_label(
        &self,
        renderer: &mut dyn Renderer,
        label: &str,
        center_x: f64,
        top: f64,
        slot: f64,
    ) -> ChartResult<()> {
        label_style(renderer, LABEL_FONT_SIZE, TEXT_COLOR);
        let flat = renderer.measure_text(label)?;
        if flat.width() <= slot {
            text_centered(renderer, label, center_x, top)?;
        } else {
            renderer.set_text_rotation(FRAC_PI_4);
            let rotated = renderer.measure_text(label)?;
            text_top_aligned(renderer, label, center_x - rotated.width() / 2.0, top)?;
        }
        renderer.reset_style();
        Ok(())
    }
}

impl Chart for BarChart {
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
