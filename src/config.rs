//! Configuration for pdf-anchor
//!
//! Values come from the environment (a `.env` file is loaded first by the
//! binary). Unset or unparsable values fall back to the defaults.

use std::env;

use crate::annotate::AnnotationDefaults;
use crate::resolver::TextMarkupSubtype;
use crate::selection::MergeOptions;

#[derive(Debug, Clone, PartialEq)]
pub struct AnchorConfig {
    /// Colour for new annotations when the request names none
    pub default_color: Option<String>,
    /// Subtype for text markup requests that leave it open
    pub default_subtype: TextMarkupSubtype,
    /// Minimum vertical overlap, as a share of line height, for glyphs on one line
    pub line_tolerance: f64,
    /// Largest horizontal gap, in line heights, bridged when merging
    pub gap_tolerance: f64,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        let merge = MergeOptions::default();
        AnchorConfig {
            default_color: None,
            default_subtype: TextMarkupSubtype::default(),
            line_tolerance: merge.line_tolerance,
            gap_tolerance: merge.gap_tolerance,
        }
    }
}

impl AnchorConfig {
    pub fn from_env() -> Self {
        let defaults = AnchorConfig::default();
        AnchorConfig {
            default_color: env::var("PDF_ANCHOR_DEFAULT_COLOR")
                .ok()
                .filter(|color| !color.trim().is_empty()),
            default_subtype: env::var("PDF_ANCHOR_DEFAULT_SUBTYPE")
                .ok()
                .and_then(|subtype| subtype.parse().ok())
                .unwrap_or(defaults.default_subtype),
            line_tolerance: parse_tolerance("PDF_ANCHOR_LINE_TOLERANCE")
                .unwrap_or(defaults.line_tolerance),
            gap_tolerance: parse_tolerance("PDF_ANCHOR_GAP_TOLERANCE")
                .unwrap_or(defaults.gap_tolerance),
        }
    }

    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            line_tolerance: self.line_tolerance,
            gap_tolerance: self.gap_tolerance,
            ..MergeOptions::default()
        }
    }

    pub fn annotation_defaults(&self) -> AnnotationDefaults {
        AnnotationDefaults {
            color: self.default_color.clone(),
            subtype: self.default_subtype,
        }
    }
}

fn parse_tolerance(key: &str) -> Option<f64> {
    let value = env::var(key).ok()?;
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Some(v),
        _ => {
            tracing::warn!(key, value = %value, "Ignoring invalid tolerance");
            None
        }
    }
}
