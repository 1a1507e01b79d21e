//! Screen ↔ page-local ↔ document space conversions
//!
//! ```text
//!  screen (pointer px)
//!      │  − page bounds origin − border − padding
//!      ▼
//!  page-local (viewport px)
//!      │  inverse(viewport transform)
//!      ▼
//!  document (PDF units)
//! ```
//!
//! The viewport transform is the renderer's own document → viewport matrix and
//! is applied as given. Scale, rotation and the Y flip are all encoded in it.

use serde::{Deserialize, Serialize};

use super::rect::{Point, Rect};
use super::GeometryError;

/// Determinants below this magnitude are treated as singular
const SINGULAR_EPSILON: f64 = 1e-12;

/// Left/top inset of a page element
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Insets {
    pub left: f64,
    pub top: f64,
}

impl Insets {
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }
}

/// Affine map `[a, b, c, d, e, f]` from document space to viewport pixels
///
/// `x' = a·x + c·y + e`, `y' = b·x + d·y + f`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTransform(pub [f64; 6]);

impl ViewportTransform {
    pub fn identity() -> Self {
        Self([1.0, 0.0, 0.0, 1.0, 0.0, 0.0])
    }

    /// Unrotated viewport of a page `page_height` units tall, drawn at `scale`
    pub fn pdf_viewport(scale: f64, page_height: f64) -> Self {
        Self([scale, 0.0, 0.0, -scale, 0.0, scale * page_height])
    }

    pub fn apply(&self, point: Point) -> Point {
        let [a, b, c, d, e, f] = self.0;
        Point::new(a * point.x + c * point.y + e, b * point.x + d * point.y + f)
    }

    pub fn inverse(&self) -> Result<Self, GeometryError> {
        let [a, b, c, d, e, f] = self.0;
        let det = a * d - b * c;
        if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
            return Err(GeometryError::SingularTransform(det));
        }
        Ok(Self([
            d / det,
            -b / det,
            -c / det,
            a / det,
            (c * f - d * e) / det,
            (b * e - a * f) / det,
        ]))
    }
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Everything needed to place a page on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFrame {
    /// Screen-space bounding box of the page element
    pub bounds: Rect,
    /// Border widths of the page element
    #[serde(default)]
    pub border: Insets,
    /// Padding of the page element
    #[serde(default)]
    pub padding: Insets,
    /// Renderer's document → viewport mapping
    #[serde(default)]
    pub viewport: ViewportTransform,
}

impl PageFrame {
    pub fn new(bounds: Rect, viewport: ViewportTransform) -> Self {
        Self {
            bounds,
            border: Insets::default(),
            padding: Insets::default(),
            viewport,
        }
    }

    pub fn with_insets(mut self, border: Insets, padding: Insets) -> Self {
        self.border = border;
        self.padding = padding;
        self
    }

    /// Screen-space position of the page-local origin
    fn content_origin(&self) -> Point {
        Point::new(
            self.bounds.min_x() + self.border.left + self.padding.left,
            self.bounds.min_y() + self.border.top + self.padding.top,
        )
    }

    pub fn screen_to_page_local(&self, screen: Point) -> Point {
        let origin = self.content_origin();
        Point::new(screen.x - origin.x, screen.y - origin.y)
    }

    pub fn page_local_to_screen(&self, local: Point) -> Point {
        let origin = self.content_origin();
        Point::new(local.x + origin.x, local.y + origin.y)
    }
}

/// Map a pointer position to document space
pub fn to_document_space(screen: Point, frame: &PageFrame) -> Result<Point, GeometryError> {
    let local = frame.screen_to_page_local(screen);
    Ok(frame.viewport.inverse()?.apply(local))
}

/// Map a document-space point to its on-screen position
pub fn to_screen_space(document: Point, frame: &PageFrame) -> Point {
    frame.page_local_to_screen(frame.viewport.apply(document))
}

/// Map a screen rectangle to document space through two opposite corners
pub fn rect_to_document_space(screen: Rect, frame: &PageFrame) -> Result<Rect, GeometryError> {
    let inverse = frame.viewport.inverse()?;
    let top_left = inverse.apply(frame.screen_to_page_local(Point::new(screen.left, screen.top)));
    let bottom_right =
        inverse.apply(frame.screen_to_page_local(Point::new(screen.right, screen.bottom)));
    Ok(Rect::new(top_left.x, top_left.y, bottom_right.x, bottom_right.y))
}

/// Map a document rectangle to screen space through two opposite corners
pub fn rect_to_screen_space(document: Rect, frame: &PageFrame) -> Rect {
    let top_left = to_screen_space(Point::new(document.left, document.top), frame);
    let bottom_right = to_screen_space(Point::new(document.right, document.bottom), frame);
    Rect::new(top_left.x, top_left.y, bottom_right.x, bottom_right.y)
}
