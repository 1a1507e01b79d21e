//! Coordinate geometry
//!
//! Three coordinate spaces meet here:
//!
//! - **screen**: raw pointer pixels, as reported by the host
//! - **page-local**: viewport pixels relative to the page content box
//! - **document**: PDF user space, independent of zoom, scroll and rotation
//!
//! [`PageFrame`] carries what the renderer knows about one page on screen, and
//! the free functions re-exported here move points and rectangles between the
//! spaces.

mod rect;
mod transform;

use thiserror::Error;

pub use rect::{approx_eq, PartialPoint, Point, Rect, YAxis};
pub use transform::{
    rect_to_document_space, rect_to_screen_space, to_document_space, to_screen_space, Insets,
    PageFrame, ViewportTransform,
};

/// Geometry errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// The viewport transform cannot be inverted
    #[error("Viewport transform is singular (determinant {0})")]
    SingularTransform(f64),
}
