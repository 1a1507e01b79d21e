//! Text selections and their geometry
//!
//! A [`SelectionRange`] addresses text by run index and character offset. The
//! [`SelectionGeometry`] adapter asks the viewer's [`TextLayout`] for the glyph
//! boxes of every covered run and merges them into one rectangle per line.
//!
//! ```text
//!  run 0:  Lorem ip[sum dolor]        ─┐
//!  run 1:  [sit amet, consectetur]     ├─ glyph boxes ─▶ merge ─▶ 3 rects
//!  run 2:  [adip]iscing elit          ─┘
//! ```

mod adapter;
mod layout;
mod merge;
mod types;

pub use adapter::SelectionGeometry;
pub use layout::{TextLayout, TextLayoutError};
pub use merge::{merge_line_rects, MergeOptions};
pub use types::{SelectionError, SelectionRange};
