use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotates this point about `center` by `theta` radians.
    ///
    /// Positive angles turn clockwise on a y-down surface.
    #[must_use]
    pub fn rotate_about(self, center: Point, theta: f64) -> Point {
        let (sin, cos) = theta.sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Point::new(
            center.x + dx * cos - dy * sin,
            center.y + dx * sin + dy * cos,
        )
    }
}

/// Axis-aligned rectangle described by its edges.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartBox {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

impl ChartBox {
    #[must_use]
    pub const fn new(top: f64, left: f64, right: f64, bottom: f64) -> Self {
        Self {
            top,
            left,
            right,
            bottom,
        }
    }

    /// Box anchored at the origin with the given extent.
    #[must_use]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn center(self) -> Point {
        Point::new(
            self.left + self.width() / 2.0,
            self.top + self.height() / 2.0,
        )
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Moves the box so its top-left corner sits at `(left, top)`.
    #[must_use]
    pub fn moved_to(self, left: f64, top: f64) -> Self {
        Self::new(top, left, left + self.width(), top + self.height())
    }

    #[must_use]
    pub fn corners(self) -> BoxCorners {
        BoxCorners {
            top_left: Point::new(self.left, self.top),
            top_right: Point::new(self.right, self.top),
            bottom_right: Point::new(self.right, self.bottom),
            bottom_left: Point::new(self.left, self.bottom),
        }
    }
}

/// The four corners of a box, possibly rotated away from the axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCorners {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_right: Point,
    pub bottom_left: Point,
}

impl BoxCorners {
    #[must_use]
    pub fn points(self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    #[must_use]
    pub fn center(self) -> Point {
        let points = self.points();
        let sum = points
            .iter()
            .fold(Point::default(), |acc, p| Point::new(acc.x + p.x, acc.y + p.y));
        Point::new(sum.x / 4.0, sum.y / 4.0)
    }

    /// Rotates every corner about the corners' center.
    #[must_use]
    pub fn rotate(self, degrees: f64) -> BoxCorners {
        let center = self.center();
        let theta = degrees_to_radians(degrees);
        BoxCorners {
            top_left: self.top_left.rotate_about(center, theta),
            top_right: self.top_right.rotate_about(center, theta),
            bottom_right: self.bottom_right.rotate_about(center, theta),
            bottom_left: self.bottom_left.rotate_about(center, theta),
        }
    }

    /// Smallest axis-aligned box containing all four corners.
    #[must_use]
    pub fn bounds(self) -> ChartBox {
        let points = self.points();
        let mut bounds = ChartBox::new(
            f64::INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
        );
        for point in points {
            bounds.left = bounds.left.min(point.x);
            bounds.right = bounds.right.max(point.x);
            bounds.top = bounds.top.min(point.y);
            bounds.bottom = bounds.bottom.max(point.y);
        }
        bounds
    }
}

#[must_use]
pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * 180.0 / PI
}

#[must_use]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}
