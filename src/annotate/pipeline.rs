//! Annotation creation pipeline
//!
//! ```text
//! Idle ─► SelectionCaptured ─► RangeResolved ─► RectsComputed ─► Persisted
//!                                                                    │
//!                                       Done ◄─ RegistrationAttempted ◄┘
//! ```
//!
//! Each call walks the states once and stops at the first failure. Nothing
//! is written before `Persisted`, so dropping the future earlier leaves no
//! trace in the file.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use super::registration::{PendingRegistration, RegistrationCoordinator, RegistrationOutcome};
use super::traits::{
    AnnotationBackend, BackendError, CapturedSelection, LinkDestination, SelectionProvider,
};
use crate::destination::DestinationRecord;
use crate::geometry::{to_document_space, GeometryError, PageFrame, Point, Rect};
use crate::link::FileRef;
use crate::resolver::TextMarkupSubtype;
use crate::selection::{SelectionError, SelectionGeometry};

/// Pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("No text is selected")]
    NoSelection,

    #[error("Selection covers no text")]
    EmptySelection,

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("Failed to persist annotation: {0}")]
    PersistenceFailure(#[from] BackendError),
}

/// Where the selection comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    /// Ask the viewer for its current selection
    Live,
    /// A selection captured earlier, e.g. before a menu took focus
    Captured(CapturedSelection),
}

/// What kind of annotation to write
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationSpec {
    TextMarkup {
        /// Falls back to the pipeline default
        subtype: Option<TextMarkupSubtype>,
        color: Option<String>,
    },
    Link {
        destination: LinkDestination,
        color: Option<String>,
        contents: Option<String>,
    },
}

impl AnnotationSpec {
    pub fn highlight() -> Self {
        AnnotationSpec::TextMarkup {
            subtype: None,
            color: None,
        }
    }

    pub fn wikilink(text: impl Into<String>) -> Self {
        AnnotationSpec::Link {
            destination: LinkDestination::Wikilink(text.into()),
            color: None,
            contents: None,
        }
    }
}

/// A creation request
#[derive(Debug, Clone)]
pub struct CreateRequest {
    pub file: FileRef,
    pub source: SelectionSource,
    pub spec: AnnotationSpec,
}

/// Result of a successful creation
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedAnnotation {
    pub id: String,
    pub page: u32,
    pub rects: Vec<Rect>,
    pub registration: RegistrationOutcome,
}

impl CreatedAnnotation {
    /// Destination pointing at the new annotation
    pub fn destination(&self) -> DestinationRecord {
        DestinationRecord::page(self.page).with_annotation(self.id.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    SelectionCaptured,
    RangeResolved,
    RectsComputed,
    Persisted,
    RegistrationAttempted,
    Done,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Idle => "idle",
            PipelineState::SelectionCaptured => "selection_captured",
            PipelineState::RangeResolved => "range_resolved",
            PipelineState::RectsComputed => "rects_computed",
            PipelineState::Persisted => "persisted",
            PipelineState::RegistrationAttempted => "registration_attempted",
            PipelineState::Done => "done",
        };
        f.write_str(name)
    }
}

/// Defaults applied when a request leaves them open
#[derive(Debug, Clone, Default)]
pub struct AnnotationDefaults {
    pub color: Option<String>,
    pub subtype: TextMarkupSubtype,
}

/// Per-call state tracker
struct Progress {
    state: PipelineState,
}

impl Progress {
    fn new() -> Self {
        Self {
            state: PipelineState::Idle,
        }
    }

    fn advance(&mut self, next: PipelineState) {
        tracing::debug!(from = %self.state, to = %next, "Pipeline transition");
        self.state = next;
    }
}

/// Creates annotations from text selections
#[derive(Clone)]
pub struct AnnotationPipeline {
    backend: Arc<dyn AnnotationBackend>,
    geometry: SelectionGeometry,
    selection: Arc<dyn SelectionProvider>,
    registrations: Arc<RegistrationCoordinator>,
    defaults: AnnotationDefaults,
}

impl AnnotationPipeline {
    pub fn new(
        backend: Arc<dyn AnnotationBackend>,
        geometry: SelectionGeometry,
        selection: Arc<dyn SelectionProvider>,
        registrations: Arc<RegistrationCoordinator>,
    ) -> Self {
        Self {
            backend,
            geometry,
            selection,
            registrations,
            defaults: AnnotationDefaults::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: AnnotationDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn registrations(&self) -> &Arc<RegistrationCoordinator> {
        &self.registrations
    }

    /// Run the pipeline for one request
    pub async fn create(&self, request: CreateRequest) -> Result<CreatedAnnotation, PipelineError> {
        let mut progress = Progress::new();

        let captured = match request.source {
            SelectionSource::Live => self
                .selection
                .current_selection()
                .ok_or(PipelineError::NoSelection)?,
            SelectionSource::Captured(captured) => captured,
        };
        progress.advance(PipelineState::SelectionCaptured);

        let CapturedSelection { page, range } = captured;
        progress.advance(PipelineState::RangeResolved);

        let rects = self.geometry.rects_for_range(page, &range).await?;
        if rects.is_empty() {
            return Err(PipelineError::EmptySelection);
        }
        progress.advance(PipelineState::RectsComputed);

        let id = self
            .persist(&request.file, page, &rects, &request.spec)
            .await
            .map_err(|e| {
                tracing::warn!(file = %request.file, page, error = %e, "Failed to write annotation");
                PipelineError::PersistenceFailure(e)
            })?;
        progress.advance(PipelineState::Persisted);

        tracing::info!(
            file = %request.file,
            page,
            annotation_id = %id,
            rects = rects.len(),
            "Created annotation"
        );

        let registration = match &request.spec {
            AnnotationSpec::Link { destination, .. } => match destination.wikilink() {
                Some(text) => self.registrations.attempt(PendingRegistration {
                    page_number: page,
                    annotation_id: id.clone(),
                    destination: text.to_string(),
                }),
                None => RegistrationOutcome::NotRequired,
            },
            AnnotationSpec::TextMarkup { .. } => RegistrationOutcome::NotRequired,
        };
        progress.advance(PipelineState::RegistrationAttempted);
        progress.advance(PipelineState::Done);

        Ok(CreatedAnnotation {
            id,
            page,
            rects,
            registration,
        })
    }

    async fn persist(
        &self,
        file: &FileRef,
        page: u32,
        rects: &[Rect],
        spec: &AnnotationSpec,
    ) -> Result<String, BackendError> {
        match spec {
            AnnotationSpec::TextMarkup { subtype, color } => {
                let subtype = subtype.unwrap_or(self.defaults.subtype);
                let color = color.as_deref().or(self.defaults.color.as_deref());
                self.backend
                    .add_text_markup_annotation(file, page, rects, subtype, color)
                    .await
            }
            AnnotationSpec::Link {
                destination,
                color,
                contents,
            } => {
                let color = color.as_deref().or(self.defaults.color.as_deref());
                self.backend
                    .add_link_annotation(file, page, rects, destination, color, contents.as_deref())
                    .await
            }
        }
    }

    // =========================================================================
    // Direct edits
    // =========================================================================

    /// Place a sticky note at a point on screen
    pub async fn add_sticky_note(
        &self,
        file: &FileRef,
        page: u32,
        frame: &PageFrame,
        screen_point: Point,
        contents: &str,
        color: Option<&str>,
    ) -> Result<String, PipelineError> {
        let at = to_document_space(screen_point, frame)?;
        let color = color.or(self.defaults.color.as_deref());
        let id = self
            .backend
            .add_text_annotation(file, page, at.x, at.y, contents, color)
            .await?;

        tracing::info!(file = %file, page, annotation_id = %id, "Added sticky note");
        Ok(id)
    }

    pub async fn delete_annotation(
        &self,
        file: &FileRef,
        page: u32,
        id: &str,
    ) -> Result<(), PipelineError> {
        self.backend.delete_annotation(file, page, id).await?;
        self.registrations.forget(page, id);
        tracing::info!(file = %file, page, annotation_id = %id, "Deleted annotation");
        Ok(())
    }

    pub async fn annotation_contents(
        &self,
        file: &FileRef,
        page: u32,
        id: &str,
    ) -> Result<Option<String>, PipelineError> {
        Ok(self.backend.get_annotation_contents(file, page, id).await?)
    }

    pub async fn set_annotation_contents(
        &self,
        file: &FileRef,
        page: u32,
        id: &str,
        text: &str,
    ) -> Result<(), PipelineError> {
        self.backend
            .set_annotation_contents(file, page, id, text)
            .await?;
        tracing::debug!(file = %file, page, annotation_id = %id, "Updated annotation contents");
        Ok(())
    }
}
