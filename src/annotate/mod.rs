//! Annotation creation
//!
//! Turns a text selection into a persisted annotation and, for links the PDF
//! format cannot express natively, attaches click handling once the viewer
//! shows the new annotation.

mod pipeline;
mod registration;
mod traits;

pub use pipeline::{
    AnnotationDefaults, AnnotationPipeline, AnnotationSpec, CreateRequest, CreatedAnnotation,
    PipelineError, PipelineState, SelectionSource,
};
pub use registration::{PendingRegistration, RegistrationCoordinator, RegistrationOutcome};
pub use traits::{
    AnnotationBackend, AnnotationElement, BackendError, CapturedSelection, LinkDestination,
    Registrar, RenderSurface, SelectionProvider,
};
