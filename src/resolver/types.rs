//! Annotation snapshots used for lookup

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::Rect;

/// Text markup annotation subtypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextMarkupSubtype {
    #[default]
    Highlight,
    Underline,
    Squiggly,
    StrikeOut,
}

impl TextMarkupSubtype {
    /// PDF `/Subtype` name
    pub fn pdf_name(&self) -> &'static str {
        match self {
            TextMarkupSubtype::Highlight => "Highlight",
            TextMarkupSubtype::Underline => "Underline",
            TextMarkupSubtype::Squiggly => "Squiggly",
            TextMarkupSubtype::StrikeOut => "StrikeOut",
        }
    }
}

impl fmt::Display for TextMarkupSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pdf_name())
    }
}

impl std::str::FromStr for TextMarkupSubtype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "highlight" => Ok(Self::Highlight),
            "underline" => Ok(Self::Underline),
            "squiggly" => Ok(Self::Squiggly),
            "strikeout" | "strike-out" => Ok(Self::StrikeOut),
            other => Err(format!("unknown text markup subtype '{}'", other)),
        }
    }
}

/// Kind of an annotation as seen by the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "subtype", rename_all = "camelCase")]
pub enum AnnotationKind {
    TextMarkup(TextMarkupSubtype),
    Link,
    /// Sticky note (PDF `/Text` annotation)
    StickyNote,
    Other,
}

impl AnnotationKind {
    pub fn is_text_markup(&self) -> bool {
        matches!(self, AnnotationKind::TextMarkup(_))
    }

    pub fn is_note(&self) -> bool {
        matches!(self, AnnotationKind::StickyNote)
    }
}

/// Read-only snapshot of one annotation on a rendered page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationCandidate {
    /// Annotation identifier
    pub id: String,
    /// Bounding rectangle in document space; missing when the viewer has none
    #[serde(default)]
    pub rect: Option<Rect>,
    /// Annotation kind
    pub kind: AnnotationKind,
}

impl AnnotationCandidate {
    pub fn new(id: impl Into<String>, rect: Rect, kind: AnnotationKind) -> Self {
        Self {
            id: id.into(),
            rect: Some(rect),
            kind,
        }
    }

    /// The rectangle, if it has four finite components
    pub fn valid_rect(&self) -> Option<Rect> {
        self.rect.filter(Rect::is_valid)
    }
}
