//! Annotation lookup on a rendered page
//!
//! Given the candidates a viewer reports for one page and an approximate
//! document-space target, pick the annotation the target most plausibly means.

mod nearest;
mod types;

pub use nearest::{nearest, resolve, resolve_for_destination};
pub use types::{AnnotationCandidate, AnnotationKind, TextMarkupSubtype};
