use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Straight-alpha RGBA color with 8-bit channels.
///
/// This is the color type renderer callers work with. Backends receive the
/// [`NormalizedColor`] form through [`Color::normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Maps every channel to `channel / 255`.
    #[must_use]
    pub fn normalized(self) -> NormalizedColor {
        NormalizedColor::rgba(
            normalize_channel(self.r),
            normalize_channel(self.g),
            normalize_channel(self.b),
            normalize_channel(self.a),
        )
    }
}

#[must_use]
pub fn normalize_channel(channel: u8) -> f64 {
    f64::from(channel) / 255.0
}

/// RGBA color in normalized 0..=1 channel values, as drawing contexts expect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedColor {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl NormalizedColor {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Series colors cycled by the bundled charts.
pub const DEFAULT_SERIES_COLORS: [Color; 6] = [
    Color::rgb(0, 116, 217),
    Color::rgb(0, 217, 101),
    Color::rgb(217, 0, 116),
    Color::rgb(0, 217, 210),
    Color::rgb(217, 101, 0),
    Color::rgb(52, 52, 52),
];

#[must_use]
pub fn series_color(index: usize) -> Color {
    DEFAULT_SERIES_COLORS[index % DEFAULT_SERIES_COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::{Color, series_color};

    #[test]
    fn normalized_extremes_are_exact() {
        let white = Color::WHITE.normalized();
        assert_eq!(white.red, 1.0);
        assert_eq!(white.alpha, 1.0);

        let clear = Color::TRANSPARENT.normalized();
        assert_eq!(clear.red, 0.0);
        assert_eq!(clear.alpha, 0.0);
    }

    #[test]
    fn series_colors_wrap_around() {
        assert_eq!(series_color(0), series_color(6));
        assert_ne!(series_color(0), series_color(1));
    }
}
