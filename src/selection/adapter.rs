//! Selection range → rectangles

use std::sync::Arc;

use super::layout::{TextLayout, TextLayoutError};
use super::merge::{merge_line_rects, MergeOptions};
use super::types::{SelectionError, SelectionRange};
use crate::geometry::Rect;

/// Computes the rectangles covering a selection on a page
#[derive(Clone)]
pub struct SelectionGeometry {
    layout: Arc<dyn TextLayout>,
    options: MergeOptions,
}

impl SelectionGeometry {
    pub fn new(layout: Arc<dyn TextLayout>) -> Self {
        Self::with_options(layout, MergeOptions::default())
    }

    pub fn with_options(layout: Arc<dyn TextLayout>, options: MergeOptions) -> Self {
        Self { layout, options }
    }

    /// Merged rectangles covering `range` on `page`, in reading order
    ///
    /// A collapsed range yields an empty set without touching the layout.
    pub async fn rects_for_range(
        &self,
        page: u32,
        range: &SelectionRange,
    ) -> Result<Vec<Rect>, SelectionError> {
        let page_count = self.layout.page_count();
        if page == 0 || page > page_count {
            return Err(SelectionError::PageOutOfBounds { page, page_count });
        }

        if range.is_collapsed() {
            return Ok(Vec::new());
        }

        let mut glyphs = Vec::new();
        for run_index in range.begin_index..=range.end_index {
            let run = self
                .layout
                .run_glyphs(page, run_index)
                .await
                .map_err(|e| match e {
                    TextLayoutError::NotLoaded(page) => SelectionError::RangeUnavailable(page),
                    TextLayoutError::RunNotFound { page, run_index } => {
                        SelectionError::StaleRange { page, run_index }
                    }
                })?;

            let (start, end) = range.span_in_run(run_index, run.len());
            glyphs.extend_from_slice(&run[start..end]);
        }

        let options = MergeOptions {
            y_axis: self.layout.y_axis(),
            ..self.options
        };
        let rects = merge_line_rects(&glyphs, &options);

        tracing::debug!(
            page,
            glyphs = glyphs.len(),
            rects = rects.len(),
            "Computed selection rectangles"
        );

        Ok(rects)
    }
}
