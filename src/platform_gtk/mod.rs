//! GTK4 host view: one `DrawingArea` per chart, rendered on every draw.

use std::io;
use std::rc::Rc;
use std::time::Instant;

use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::{error, info};

use crate::charts::Chart;
use crate::error::ChartResult;
use crate::render::{CairoContextProvider, RendererConfig};

/// Binds a chart to a drawing area sized to the chart viewport.
///
/// All drawing happens on the GTK main thread inside the draw function; the
/// cairo context handed to it is only used for the duration of the callback.
pub struct GtkChartView {
    drawing_area: gtk::DrawingArea,
}

impl GtkChartView {
    pub fn new(chart: Rc<dyn Chart>, config: RendererConfig) -> ChartResult<Self> {
        config.validate()?;
        let viewport = chart.viewport().validate()?;
        let drawing_area = gtk::DrawingArea::builder()
            .content_width(i32::try_from(viewport.width).unwrap_or(i32::MAX))
            .content_height(i32::try_from(viewport.height).unwrap_or(i32::MAX))
            .build();

        drawing_area.set_draw_func(move |_area, context, width, height| {
            render_on_context(chart.as_ref(), context, &config, width, height);
        });

        Ok(Self { drawing_area })
    }

    #[must_use]
    pub fn drawing_area(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }
}

fn render_on_context(
    chart: &dyn Chart,
    context: &cairo::Context,
    config: &RendererConfig,
    width: i32,
    height: i32,
) {
    let provider = CairoContextProvider::new(context, config.clone());
    let started = Instant::now();
    match chart.render(&provider, &mut io::sink()) {
        Ok(()) => info!(
            width,
            height,
            elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
            "chart rendered"
        ),
        Err(err) => error!(error = %err, width, height, "chart render failed"),
    }
}
