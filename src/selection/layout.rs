//! Text layout collaborator

use async_trait::async_trait;
use thiserror::Error;

use crate::geometry::{Rect, YAxis};

/// Text layout lookup failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextLayoutError {
    /// The page's text layer has not been built yet
    #[error("Text layer of page {0} is not loaded")]
    NotLoaded(u32),

    /// The requested run does not exist on the page
    #[error("Text run {run_index} not found on page {page}")]
    RunNotFound { page: u32, run_index: u32 },
}

/// Per-glyph geometry of a page's text runs
///
/// Implemented by the viewer that owns the text layer. Rectangles are in
/// document space unless [`TextLayout::y_axis`] says otherwise.
#[async_trait]
pub trait TextLayout: Send + Sync {
    /// Number of pages in the document
    fn page_count(&self) -> u32;

    /// Vertical orientation of the rectangles returned by [`TextLayout::run_glyphs`]
    fn y_axis(&self) -> YAxis {
        YAxis::Up
    }

    /// One rectangle per character of text run `run_index` on `page`
    async fn run_glyphs(&self, page: u32, run_index: u32) -> Result<Vec<Rect>, TextLayoutError>;
}
