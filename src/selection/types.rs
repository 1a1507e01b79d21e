//! Selection types and errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Contiguous span of rendered text on one page
///
/// Positions are addressed by text run index plus a character offset within
/// the run. The end offset is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRange {
    pub begin_index: u32,
    pub begin_offset: u32,
    pub end_index: u32,
    pub end_offset: u32,
}

impl SelectionRange {
    pub fn new(
        begin_index: u32,
        begin_offset: u32,
        end_index: u32,
        end_offset: u32,
    ) -> Result<Self, SelectionError> {
        if end_index < begin_index {
            return Err(SelectionError::InvalidRange {
                begin_index,
                end_index,
            });
        }
        Ok(Self {
            begin_index,
            begin_offset,
            end_index,
            end_offset,
        })
    }

    /// True when the range covers no characters
    pub fn is_collapsed(&self) -> bool {
        self.begin_index == self.end_index && self.end_offset <= self.begin_offset
    }

    /// Character span `[start, end)` covered within `run_index`, given the run length
    pub fn span_in_run(&self, run_index: u32, run_len: usize) -> (usize, usize) {
        let start = if run_index == self.begin_index {
            (self.begin_offset as usize).min(run_len)
        } else {
            0
        };
        let end = if run_index == self.end_index {
            (self.end_offset as usize).min(run_len)
        } else {
            run_len
        };
        (start, end.max(start))
    }
}

/// Selection geometry errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The page's text layout has not been loaded yet; retry once it is
    #[error("Text layout of page {0} is not loaded")]
    RangeUnavailable(u32),

    /// Page number outside `[1, page_count]`
    #[error("Page {page} is out of bounds (document has {page_count} pages)")]
    PageOutOfBounds { page: u32, page_count: u32 },

    /// The range references a text run the current layout does not have
    #[error("Text run {run_index} no longer exists on page {page}")]
    StaleRange { page: u32, run_index: u32 },

    /// End run precedes begin run
    #[error("Invalid selection range: end run {end_index} precedes begin run {begin_index}")]
    InvalidRange { begin_index: u32, end_index: u32 },
}
