use std::f64::consts::TAU;

use crate::core::Point;

/// Control points of a cubic Bézier segment starting at the current point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl CubicSegment {
    /// Evaluates the curve at `t` in `[0, 1]` given its start point.
    #[must_use]
    pub fn point_at(self, start: Point, t: f64) -> Point {
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        Point::new(
            a * start.x + b * self.control1.x + c * self.control2.x + d * self.end.x,
            a * start.y + b * self.control1.y + c * self.control2.y + d * self.end.y,
        )
    }
}

/// Re-expresses the quadratic curve `start -> control -> end` as a cubic.
///
/// Each cubic control point sits two thirds of the way from an endpoint to the
/// quadratic control point.
#[must_use]
pub fn quad_to_cubic(start: Point, control: Point, end: Point) -> CubicSegment {
    const TWO_THIRDS: f64 = 2.0 / 3.0;
    const ONE_THIRD: f64 = 1.0 / 3.0;
    CubicSegment {
        control1: Point::new(
            ONE_THIRD * start.x + TWO_THIRDS * control.x,
            ONE_THIRD * start.y + TWO_THIRDS * control.y,
        ),
        control2: Point::new(
            ONE_THIRD * end.x + TWO_THIRDS * control.x,
            ONE_THIRD * end.y + TWO_THIRDS * control.y,
        ),
        end,
    }
}

/// Winding of an arc on a y-down surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcDirection {
    /// Increasing angles (cairo `arc`).
    Clockwise,
    /// Decreasing angles (cairo `arc_negative`).
    CounterClockwise,
}

/// Start/end angles in radians plus the winding to travel between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSweep {
    pub start: f64,
    pub end: f64,
    pub direction: ArcDirection,
}

impl ArcSweep {
    /// Signed angular distance travelled from `start` to `end`.
    #[must_use]
    pub fn span(self) -> f64 {
        self.end - self.start
    }
}

/// Turns a start angle and a signed delta into a directional sweep.
///
/// A non-negative delta winds clockwise, a negative one counter-clockwise.
/// The sweep never exceeds one full turn, and `end` always lies on the
/// winding side of `start`.
#[must_use]
pub fn normalize_arc(start: f64, delta: f64) -> ArcSweep {
    let direction = if delta < 0.0 {
        ArcDirection::CounterClockwise
    } else {
        ArcDirection::Clockwise
    };

    // Anything past a full turn would retrace the circle.
    let end = start + delta.clamp(-TAU, TAU);

    ArcSweep {
        start,
        end,
        direction,
    }
}
