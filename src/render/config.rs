use serde::{Deserialize, Serialize};

use crate::core::{Color, FontFace, FontSlant, FontWeight};
use crate::error::{ChartError, ChartResult};

/// Defaults a renderer starts from and returns to on `reset_style`.
///
/// This type is serializable so host applications can keep renderer setup in
/// the same JSON files as the rest of their chart configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RendererConfig {
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_weight")]
    pub font_weight: FontWeight,
    #[serde(default)]
    pub font_slant: FontSlant,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default)]
    pub stroke_color: Color,
    #[serde(default)]
    pub fill_color: Color,
    #[serde(default)]
    pub font_color: Color,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_slant: FontSlant::Normal,
            font_size: default_font_size(),
            stroke_width: default_stroke_width(),
            stroke_color: Color::TRANSPARENT,
            fill_color: Color::TRANSPARENT,
            font_color: Color::TRANSPARENT,
        }
    }
}

impl RendererConfig {
    #[must_use]
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    #[must_use]
    pub fn with_font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    #[must_use]
    pub fn with_font_slant(mut self, slant: FontSlant) -> Self {
        self.font_slant = slant;
        self
    }

    #[must_use]
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    #[must_use]
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    #[must_use]
    pub fn with_default_colors(mut self, stroke: Color, fill: Color, font: Color) -> Self {
        self.stroke_color = stroke;
        self.fill_color = fill;
        self.font_color = font;
        self
    }

    #[must_use]
    pub fn font_face(&self) -> FontFace {
        FontFace {
            family: self.font_family.clone(),
            weight: self.font_weight,
            slant: self.font_slant,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.font_family.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "font family must not be empty".to_owned(),
            ));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "stroke width must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|err| ChartError::InvalidData(format!("invalid renderer config: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| ChartError::InvalidData(format!("cannot serialize config: {err}")))
    }
}

fn default_font_family() -> String {
    "Sans".to_owned()
}

fn default_font_weight() -> FontWeight {
    FontWeight::Bold
}

fn default_font_size() -> f64 {
    10.0
}

fn default_stroke_width() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::RendererConfig;
    use crate::core::{Color, FontSlant, FontWeight};

    #[test]
    fn empty_json_object_yields_defaults() {
        let config = RendererConfig::from_json_str("{}").expect("config");
        assert_eq!(config, RendererConfig::default());
        assert_eq!(config.font_weight, FontWeight::Bold);
    }

    #[test]
    fn non_positive_font_size_is_rejected() {
        let err = RendererConfig::from_json_str(r#"{"font_size": 0.0}"#);
        assert!(err.is_err());
    }

    #[test]
    fn non_positive_stroke_width_is_rejected() {
        assert!(RendererConfig::from_json_str(r#"{"stroke_width": 0.0}"#).is_err());
        assert!(RendererConfig::from_json_str(r#"{"stroke_width": -1.5}"#).is_err());
        assert!(
            RendererConfig::default()
                .with_stroke_width(0.0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn customized_config_survives_json() {
        let config = RendererConfig::default()
            .with_font_family("Monospace")
            .with_font_weight(FontWeight::Normal)
            .with_font_slant(FontSlant::Italic)
            .with_font_size(13.5)
            .with_stroke_width(2.25)
            .with_default_colors(
                Color::rgb(10, 20, 30),
                Color::rgba(200, 100, 50, 128),
                Color::BLACK,
            );

        let json = config.to_json_string().expect("serialize");
        assert!(json.contains("\"italic\""));
        let restored = RendererConfig::from_json_str(&json).expect("deserialize");
        assert_eq!(restored, config);
    }
}
