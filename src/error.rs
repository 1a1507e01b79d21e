//! Crate-level error type
//!
//! Each module reports its own error enum; this one gathers them for callers
//! that drive several modules at once.

use thiserror::Error;

use crate::annotate::{BackendError, PipelineError};
use crate::destination::ParseError;
use crate::geometry::GeometryError;
use crate::link::LinkError;
use crate::selection::SelectionError;

#[derive(Debug, Error)]
pub enum AnchorError {
    #[error("Invalid destination: {0}")]
    Destination(#[from] ParseError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Link(#[from] LinkError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Result type alias using AnchorError
pub type Result<T> = std::result::Result<T, AnchorError>;
