pub mod color;
pub mod curves;
pub mod font;
pub mod geometry;
pub mod types;

pub use color::{Color, DEFAULT_SERIES_COLORS, NormalizedColor, normalize_channel, series_color};
pub use curves::{ArcDirection, ArcSweep, CubicSegment, normalize_arc, quad_to_cubic};
pub use font::{FontFace, FontSlant, FontWeight};
pub use geometry::{BoxCorners, ChartBox, Point, degrees_to_radians, radians_to_degrees};
pub use types::Viewport;
