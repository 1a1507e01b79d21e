//! Host collaborators of the creation pipeline
//!
//! The document back end, the render surface and the live selection all
//! belong to the host. The pipeline only talks to them through these traits
//! and re-queries them on every call.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::destination::DestinationRecord;
use crate::geometry::Rect;
use crate::link::FileRef;
use crate::resolver::{AnnotationCandidate, TextMarkupSubtype};
use crate::selection::SelectionRange;

/// Failures reported by the document back end
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Annotation {id} not found on page {page}")]
    NotFound { page: u32, id: String },

    #[error("Write rejected: {0}")]
    Rejected(String),
}

/// Where a link annotation leads
#[derive(Debug, Clone, PartialEq)]
pub enum LinkDestination {
    /// A destination inside the same PDF, written as a native PDF link
    Internal(DestinationRecord),
    /// A `[[...]]` link the PDF format cannot express; needs click handling
    Wikilink(String),
}

impl LinkDestination {
    pub fn wikilink(&self) -> Option<&str> {
        match self {
            LinkDestination::Wikilink(text) => Some(text),
            LinkDestination::Internal(_) => None,
        }
    }
}

/// Writes and reads annotation objects in a PDF file
#[async_trait]
pub trait AnnotationBackend: Send + Sync {
    async fn add_text_markup_annotation(
        &self,
        file: &FileRef,
        page: u32,
        rects: &[Rect],
        subtype: TextMarkupSubtype,
        color: Option<&str>,
    ) -> Result<String, BackendError>;

    async fn add_link_annotation(
        &self,
        file: &FileRef,
        page: u32,
        rects: &[Rect],
        destination: &LinkDestination,
        color: Option<&str>,
        contents: Option<&str>,
    ) -> Result<String, BackendError>;

    async fn add_text_annotation(
        &self,
        file: &FileRef,
        page: u32,
        x: f64,
        y: f64,
        contents: &str,
        color: Option<&str>,
    ) -> Result<String, BackendError>;

    async fn delete_annotation(&self, file: &FileRef, page: u32, id: &str)
        -> Result<(), BackendError>;

    async fn get_annotation_contents(
        &self,
        file: &FileRef,
        page: u32,
        id: &str,
    ) -> Result<Option<String>, BackendError>;

    async fn set_annotation_contents(
        &self,
        file: &FileRef,
        page: u32,
        id: &str,
        text: &str,
    ) -> Result<(), BackendError>;
}

/// A text selection pinned to its page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedSelection {
    pub page: u32,
    pub range: SelectionRange,
}

/// The viewer's current text selection
pub trait SelectionProvider: Send + Sync {
    fn current_selection(&self) -> Option<CapturedSelection>;
}

/// Live representation of an annotation in the viewer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationElement {
    pub page: u32,
    pub annotation_id: String,
    /// Host-specific element key
    pub handle: u64,
}

/// The viewer's rendered pages
pub trait RenderSurface: Send + Sync {
    /// Snapshot of the annotations currently rendered on `page`
    fn candidates(&self, page: u32) -> Vec<AnnotationCandidate>;

    /// The rendered element for annotation `id`, if the page currently shows it
    fn find_annotation_element(&self, page: u32, id: &str) -> Option<AnnotationElement>;
}

/// Attaches interactive behaviour (click handling) to a rendered annotation
pub trait Registrar: Send + Sync {
    fn register(&self, element: &AnnotationElement, destination: &str);
}
