//! Points and rectangles
//!
//! A [`Rect`] stores its four edges as given. Whether `top` is numerically
//! smaller or larger than `bottom` depends on the coordinate space it lives in
//! (screen and page-local space grow downwards, PDF document space grows
//! upwards), so all containment and distance queries work on the normalized
//! extents.

use serde::{Deserialize, Serialize};

/// Direction in which the vertical axis of a coordinate space grows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YAxis {
    /// Screen convention: y increases towards the bottom of the page
    #[default]
    Down,
    /// PDF convention: y increases towards the top of the page
    Up,
}

/// A fully specified point
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Approximate equality with a relative tolerance
    pub fn approx_eq(&self, other: Point, tolerance: f64) -> bool {
        approx_eq(self.x, other.x, tolerance) && approx_eq(self.y, other.y, tolerance)
    }
}

/// A point where either coordinate may be unspecified
///
/// Destinations frequently carry only a vertical scroll position, so most
/// lookups have to work with half a point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
}

impl PartialPoint {
    pub fn new(left: Option<f64>, top: Option<f64>) -> Self {
        Self { left, top }
    }

    /// Both coordinates, if both are defined and finite
    pub fn full(&self) -> Option<Point> {
        match (self.left, self.top) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some(Point::new(x, y)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.top.is_none()
    }
}

impl From<Point> for PartialPoint {
    fn from(point: Point) -> Self {
        Self {
            left: Some(point.x),
            top: Some(point.y),
        }
    }
}

/// Rectangle given by its four edges
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build from an origin and a size in a y-down space
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// All four edges are finite numbers
    pub fn is_valid(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
    }

    pub fn min_x(&self) -> f64 {
        self.left.min(self.right)
    }

    pub fn max_x(&self) -> f64 {
        self.left.max(self.right)
    }

    pub fn min_y(&self) -> f64 {
        self.top.min(self.bottom)
    }

    pub fn max_y(&self) -> f64 {
        self.top.max(self.bottom)
    }

    pub fn width(&self) -> f64 {
        self.max_x() - self.min_x()
    }

    pub fn height(&self) -> f64 {
        self.max_y() - self.min_y()
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Edge-inclusive containment
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }

    /// Strict overlap of the interiors
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min_x() < other.max_x()
            && self.max_x() > other.min_x()
            && self.min_y() < other.max_y()
            && self.max_y() > other.min_y()
    }

    /// Smallest rectangle covering both, keeping the vertical orientation of `self`
    pub fn union(&self, other: &Rect) -> Rect {
        let (min_y, max_y) = (
            self.min_y().min(other.min_y()),
            self.max_y().max(other.max_y()),
        );
        let (top, bottom) = if self.top <= self.bottom {
            (min_y, max_y)
        } else {
            (max_y, min_y)
        };
        Rect::new(
            self.min_x().min(other.min_x()),
            top,
            self.max_x().max(other.max_x()),
            bottom,
        )
    }
}

/// Relative float comparison, falling back to absolute near zero
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= tolerance * scale
}
