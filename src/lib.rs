//! chart-cairo: drawing-primitive chart renderer on top of cairo.
//!
//! Chart code talks to the [`render::Renderer`] trait. Renderers come from a
//! [`render::RendererProvider`] and forward each primitive to a
//! [`render::Canvas`]: a host-owned cairo context, an owned PNG or SVG
//! surface, or a headless recording canvas.

pub mod charts;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use charts::Chart;
pub use error::{ChartError, ChartResult};
pub use render::{Renderer, RendererConfig, RendererProvider};
