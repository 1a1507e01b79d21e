//! Per-line rectangle merging
//!
//! Glyph boxes are grouped into visual lines and coalesced so a selection over
//! several lines produces one rectangle per line (or per column segment when a
//! line has a wide horizontal gap). Output is in reading order and the
//! rectangles never overlap.

use crate::geometry::{Rect, YAxis};

/// Merge tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeOptions {
    /// Minimum vertical overlap, as a fraction of the smaller height, for two
    /// boxes to share a line
    pub line_tolerance: f64,
    /// Largest horizontal gap, as a multiple of the line height, bridged
    /// within a line
    pub gap_tolerance: f64,
    /// Vertical orientation of the input rectangles
    pub y_axis: YAxis,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            line_tolerance: 0.5,
            gap_tolerance: 1.0,
            y_axis: YAxis::Down,
        }
    }
}

/// Rectangle in reading space: y grows downwards regardless of input axis
#[derive(Debug, Clone, Copy)]
struct Span {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl Span {
    fn from_rect(rect: &Rect, axis: YAxis) -> Self {
        match axis {
            YAxis::Down => Self {
                x0: rect.min_x(),
                y0: rect.min_y(),
                x1: rect.max_x(),
                y1: rect.max_y(),
            },
            YAxis::Up => Self {
                x0: rect.min_x(),
                y0: -rect.max_y(),
                x1: rect.max_x(),
                y1: -rect.min_y(),
            },
        }
    }

    fn to_rect(self, axis: YAxis) -> Rect {
        match axis {
            YAxis::Down => Rect::new(self.x0, self.y0, self.x1, self.y1),
            YAxis::Up => Rect::new(self.x0, -self.y0, self.x1, -self.y1),
        }
    }

    fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    fn union(&self, other: &Span) -> Span {
        Span {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    fn shares_line_with(&self, band: &Span, tolerance: f64) -> bool {
        if self.y0 > band.y1 || self.y1 < band.y0 {
            return false;
        }
        let overlap = self.y1.min(band.y1) - self.y0.max(band.y0);
        overlap >= tolerance * self.height().min(band.height())
    }
}

/// Coalesce glyph rectangles into one rectangle per line segment
pub fn merge_line_rects(rects: &[Rect], options: &MergeOptions) -> Vec<Rect> {
    let mut spans: Vec<Span> = rects
        .iter()
        .filter(|rect| rect.is_valid())
        .map(|rect| Span::from_rect(rect, options.y_axis))
        .collect();
    spans.sort_by(|a, b| a.y0.total_cmp(&b.y0).then_with(|| a.x0.total_cmp(&b.x0)));

    // group into lines
    let mut lines: Vec<(Span, Vec<Span>)> = Vec::new();
    for span in spans {
        match lines.last_mut() {
            Some((band, members)) if span.shares_line_with(band, options.line_tolerance) => {
                *band = band.union(&span);
                members.push(span);
            }
            _ => lines.push((span, vec![span])),
        }
    }

    // coalesce within each line
    let mut merged_lines: Vec<Vec<Span>> = lines
        .into_iter()
        .map(|(band, mut members)| {
            members.sort_by(|a, b| a.x0.total_cmp(&b.x0));
            let max_gap = options.gap_tolerance * band.height();
            let mut segments: Vec<Span> = Vec::new();
            for span in members {
                match segments.last_mut() {
                    Some(segment) if span.x0 - segment.x1 <= max_gap => {
                        *segment = segment.union(&span);
                    }
                    _ => segments.push(span),
                }
            }
            segments
        })
        .collect();

    separate_lines(&mut merged_lines);

    merged_lines
        .into_iter()
        .flatten()
        .filter(|span| span.height() > 0.0)
        .map(|span| span.to_rect(options.y_axis))
        .collect()
}

/// Split any vertical overlap between consecutive lines at its midpoint
///
/// Spans lying entirely on the wrong side of the midpoint collapse to zero
/// height and are dropped by the caller.
fn separate_lines(lines: &mut [Vec<Span>]) {
    for i in 1..lines.len() {
        let prev_bottom = lines[i - 1].iter().map(|s| s.y1).fold(f64::MIN, f64::max);
        let next_top = lines[i].iter().map(|s| s.y0).fold(f64::MAX, f64::min);
        if prev_bottom <= next_top {
            continue;
        }

        let mid = (prev_bottom + next_top) / 2.0;
        for span in &mut lines[i - 1] {
            span.y1 = span.y1.min(mid).max(span.y0);
        }
        for span in &mut lines[i] {
            span.y0 = span.y0.max(mid).min(span.y1);
        }
    }
}
