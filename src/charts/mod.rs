//! Small chart set drawn entirely through [`Renderer`](crate::render::Renderer) primitives.
//!
//! Each chart asks the provider for one renderer sized to its viewport,
//! paints a background, draws its elements with `reset_style` between them
//! and finally hands the writer to `Renderer::save`.

mod bar;
mod draw;
mod line;
mod pie;
mod scale;

pub use bar::BarChart;
pub use line::{Annotation, ContinuousSeries, LineChart};
pub use pie::{DonutChart, PieChart};
pub use scale::LinearRange;

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::RendererProvider;

/// A chart that can render itself through any renderer provider.
pub trait Chart {
    fn viewport(&self) -> Viewport;

    fn render(&self, provider: &dyn RendererProvider, writer: &mut dyn Write) -> ChartResult<()>;
}

/// One labelled value of a bar, pie or donut chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Value {
    pub value: f64,
    pub label: String,
}

impl Value {
    #[must_use]
    pub fn new(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// Rejects empty input and non-finite values; returns the sum.
pub(crate) fn validate_values(values: &[Value]) -> ChartResult<f64> {
    if values.is_empty() {
        return Err(ChartError::InvalidData(
            "chart must contain at least one value".to_owned(),
        ));
    }
    let mut total = 0.0;
    for value in values {
        if !value.value.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "value for `{}` must be finite",
                value.label
            )));
        }
        total += value.value;
    }
    Ok(total)
}
