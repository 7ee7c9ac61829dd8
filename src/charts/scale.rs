use crate::error::{ChartError, ChartResult};

/// Linear mapping from a value domain onto a pixel span.
///
/// The pixel span may be inverted (`start > end`), which is how value axes
/// grow upwards on a y-down surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRange {
    domain_min: f64,
    domain_max: f64,
    pixel_start: f64,
    pixel_end: f64,
}

impl LinearRange {
    pub fn new(domain_min: f64, domain_max: f64) -> ChartResult<Self> {
        if !domain_min.is_finite() || !domain_max.is_finite() || domain_min == domain_max {
            return Err(ChartError::InvalidData(
                "range domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_min,
            domain_max,
            pixel_start: 0.0,
            pixel_end: 1.0,
        })
    }

    /// Domain covering `values`, widened to a unit span when all values match.
    pub fn covering(values: impl IntoIterator<Item = f64>) -> ChartResult<Self> {
        let (min, max) = values
            .into_iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
                (min.min(value), max.max(value))
            });
        if !min.is_finite() || !max.is_finite() {
            return Err(ChartError::InvalidData(
                "range needs at least one finite value".to_owned(),
            ));
        }
        if min == max {
            return Self::new(min - 0.5, max + 0.5);
        }
        Self::new(min, max)
    }

    #[must_use]
    pub fn with_pixels(mut self, start: f64, end: f64) -> Self {
        self.pixel_start = start;
        self.pixel_end = end;
        self
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    #[must_use]
    pub fn translate(self, value: f64) -> f64 {
        let span = self.domain_max - self.domain_min;
        let normalized = (value - self.domain_min) / span;
        self.pixel_start + normalized * (self.pixel_end - self.pixel_start)
    }

    /// `count` evenly spaced domain values, both ends included.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        if count < 2 {
            return vec![self.domain_min];
        }
        let step = (self.domain_max - self.domain_min) / (count - 1) as f64;
        (0..count)
            .map(|index| self.domain_min + step * index as f64)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::LinearRange;

    #[test]
    fn inverted_pixel_span_maps_max_to_top() {
        let range = LinearRange::new(0.0, 10.0)
            .expect("range")
            .with_pixels(100.0, 0.0);
        assert_eq!(range.translate(0.0), 100.0);
        assert_eq!(range.translate(10.0), 0.0);
        assert_eq!(range.translate(5.0), 50.0);
    }

    #[test]
    fn covering_widens_degenerate_domain() {
        let range = LinearRange::covering([3.0, 3.0]).expect("range");
        assert_eq!(range.domain(), (2.5, 3.5));
    }

    #[test]
    fn ticks_include_both_ends() {
        let ticks = LinearRange::new(0.0, 1.0).expect("range").ticks(5);
        assert_eq!(ticks, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }
}
