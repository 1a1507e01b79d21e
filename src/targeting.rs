//! Navigating to a resolved link target
//!
//! Once a link is resolved and its page is rendered, the viewer needs to know
//! what to flash and where to scroll. [`locate`] works that out in screen
//! space from the destination, the page's annotation snapshot and its frame.

use async_trait::async_trait;
use serde::Serialize;

use crate::annotate::RenderSurface;
use crate::destination::DestinationRecord;
use crate::geometry::{rect_to_screen_space, to_screen_space, GeometryError, PageFrame, Point, Rect};
use crate::link::{FileRef, ResolvedTarget};
use crate::resolver::{resolve_for_destination, AnnotationCandidate};

/// What the viewer should show for a target
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightRequest {
    pub page: u32,
    /// Annotation chosen on the page, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation_id: Option<String>,
    /// Screen rectangle to flash, top above bottom
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rect: Option<Rect>,
    /// Screen point to scroll into view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_to: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Shows highlight requests to the user
#[async_trait]
pub trait Highlighter: Send + Sync {
    async fn highlight(&self, file: &FileRef, request: HighlightRequest);
}

/// Work out what to show for `destination` on a rendered page
pub fn locate(
    destination: &DestinationRecord,
    candidates: &[AnnotationCandidate],
    frame: &PageFrame,
) -> Result<HighlightRequest, GeometryError> {
    // a degenerate viewport cannot place anything on screen
    frame.viewport.inverse()?;

    let chosen = resolve_for_destination(candidates, destination)
        .and_then(|candidate| candidate.valid_rect().map(|rect| (candidate.id.clone(), rect)));

    let (annotation_id, document_rect) = match chosen {
        Some((id, rect)) => (Some(id), Some(rect)),
        None => (None, destination.rect.filter(Rect::is_valid)),
    };

    let rect = document_rect.map(|rect| normalized(rect_to_screen_space(rect, frame)));
    let scroll_to = destination
        .offset
        .and_then(|offset| offset.full())
        .map(|point| to_screen_space(point, frame))
        .or_else(|| rect.map(|rect| Point::new(rect.left, rect.top)));

    Ok(HighlightRequest {
        page: destination.page,
        annotation_id,
        rect,
        scroll_to,
        color: destination.color.clone(),
    })
}

/// Locate `target` on its rendered page and hand the result to `highlighter`
pub async fn reveal(
    target: &ResolvedTarget,
    surface: &dyn RenderSurface,
    frame: &PageFrame,
    highlighter: &dyn Highlighter,
) -> Result<HighlightRequest, GeometryError> {
    let candidates = surface.candidates(target.page);
    let request = locate(&target.destination(), &candidates, frame)?;

    tracing::debug!(
        file = %target.file,
        page = request.page,
        annotation_id = ?request.annotation_id,
        "Revealing link target"
    );
    highlighter.highlight(&target.file, request.clone()).await;
    Ok(request)
}

fn normalized(rect: Rect) -> Rect {
    Rect::new(rect.min_x(), rect.min_y(), rect.max_x(), rect.max_y())
}
