//! Destination records
//!
//! A destination points at a place inside one PDF: a page, optionally narrowed
//! to an annotation, a scroll offset, a rectangle or a captured text range.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::{PartialPoint, Point, Rect};
use crate::selection::SelectionRange;

/// Structured form of a destination subpath
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationRecord {
    /// Page number (1-indexed)
    pub page: u32,
    /// Annotation identifier as reported by the mutation back end
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation_id: Option<String>,
    /// Scroll offset in document space; either side may be unspecified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<PartialPoint>,
    /// Rectangle in document space
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rect: Option<Rect>,
    /// Captured text range on the page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectionRange>,
    /// Highlight colour name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl DestinationRecord {
    /// Page-only destination
    pub fn page(page: u32) -> Self {
        Self {
            page,
            annotation_id: None,
            offset: None,
            rect: None,
            selection: None,
            color: None,
        }
    }

    pub fn with_annotation(mut self, id: impl Into<String>) -> Self {
        self.annotation_id = Some(id.into());
        self
    }

    pub fn with_offset(mut self, left: Option<f64>, top: Option<f64>) -> Self {
        self.offset = Some(PartialPoint::new(left, top));
        self
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }

    pub fn with_selection(mut self, selection: SelectionRange) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// The point this destination designates, if any
    ///
    /// An offset wins whenever one of its sides is defined. A destination that
    /// only carries a rectangle designates the rectangle's centre.
    pub fn target_point(&self) -> Option<PartialPoint> {
        if let Some(offset) = self.offset.filter(|offset| !offset.is_empty()) {
            return Some(offset);
        }
        self.rect
            .filter(Rect::is_valid)
            .map(|rect| PartialPoint::from(rect.center()))
    }

    /// Full point form of [`Self::target_point`]
    pub fn target_full_point(&self) -> Option<Point> {
        self.target_point().and_then(|point| point.full())
    }
}

impl fmt::Display for DestinationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::codec::encode(self))
    }
}

impl std::str::FromStr for DestinationRecord {
    type Err = super::codec::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::codec::decode(s)
    }
}
