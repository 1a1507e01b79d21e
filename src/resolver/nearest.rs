//! Nearest-annotation lookup
//!
//! Candidates are first split into markup-like annotations (text markup, links,
//! everything else) and sticky notes. Notes are only considered when a page has
//! no markup-like annotation at all: they render as small fixed-size icons that
//! rarely coincide with the geometry a destination was captured from.
//!
//! Within the chosen group the ordering key is
//! `(contains target desc, is text markup desc, distance asc)`; ties keep the
//! order in which the viewer reported the candidates.

use std::cmp::Ordering;

use super::types::AnnotationCandidate;
use crate::destination::DestinationRecord;
use crate::geometry::{PartialPoint, Point, Rect};

struct Scored<'a> {
    candidate: &'a AnnotationCandidate,
    contains: bool,
    is_text_markup: bool,
    distance: f64,
}

impl Scored<'_> {
    fn rank(&self, other: &Self) -> Ordering {
        other
            .contains
            .cmp(&self.contains)
            .then_with(|| other.is_text_markup.cmp(&self.is_text_markup))
            .then_with(|| self.distance.total_cmp(&other.distance))
    }
}

/// Containment and distance of `target` relative to `rect`
fn measure(rect: &Rect, target: PartialPoint) -> (bool, f64) {
    let left = target.left.filter(|v| v.is_finite());
    let top = target.top.filter(|v| v.is_finite());
    let center = rect.center();

    match (left, top) {
        (Some(x), Some(y)) => {
            let point = Point::new(x, y);
            if rect.contains(point) {
                (true, 0.0)
            } else {
                (false, point.distance_to(center))
            }
        }
        (Some(x), None) => (false, (x - center.x).abs()),
        (None, Some(y)) => (false, (y - center.y).abs()),
        (None, None) => (false, 0.0),
    }
}

/// Best-matching candidate for `target`
pub fn nearest(
    candidates: &[AnnotationCandidate],
    target: PartialPoint,
) -> Option<&AnnotationCandidate> {
    let (markup, notes): (Vec<Scored<'_>>, Vec<Scored<'_>>) = candidates
        .iter()
        .filter_map(|candidate| {
            let rect = candidate.valid_rect()?;
            let (contains, distance) = measure(&rect, target);
            Some(Scored {
                candidate,
                contains,
                is_text_markup: candidate.kind.is_text_markup(),
                distance,
            })
        })
        .partition(|scored| !scored.candidate.kind.is_note());

    let mut pool = if markup.is_empty() { notes } else { markup };
    pool.sort_by(|a, b| a.rank(b));

    let best = pool.first().map(|scored| scored.candidate);
    if let Some(candidate) = best {
        tracing::trace!(
            annotation_id = %candidate.id,
            left = ?target.left,
            top = ?target.top,
            "Resolved nearest annotation"
        );
    }
    best
}

/// Identifier of the best-matching candidate for `target`
pub fn resolve(candidates: &[AnnotationCandidate], target: PartialPoint) -> Option<String> {
    nearest(candidates, target).map(|candidate| candidate.id.clone())
}

/// Candidate a destination refers to
///
/// An annotation id that names one of the candidates is taken as is. Otherwise
/// the destination's target point (offset, or rectangle centre) is looked up
/// with [`nearest`]. A page-only destination designates no annotation.
pub fn resolve_for_destination<'a>(
    candidates: &'a [AnnotationCandidate],
    destination: &DestinationRecord,
) -> Option<&'a AnnotationCandidate> {
    if let Some(id) = destination.annotation_id.as_deref() {
        if let Some(candidate) = candidates.iter().find(|c| c.id == id) {
            return Some(candidate);
        }
        tracing::debug!(annotation_id = %id, "Annotation not on page, falling back to position");
    }

    let target = destination.target_point()?;
    nearest(candidates, target)
}
