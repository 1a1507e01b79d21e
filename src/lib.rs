//! pdf-anchor
//!
//! Targeting and creation of PDF annotations for a note-taking host: link
//! destinations, nearest-annotation lookup, selection geometry and the
//! annotation creation pipeline. The command line front end is in main.rs.
//!
//! # Modules
//!
//! - `destination`: `#page=...` subpath codec
//! - `geometry`: rectangles and screen/document coordinate mapping
//! - `resolver`: nearest annotation to a point
//! - `selection`: text ranges to merged line rectangles
//! - `annotate`: creation pipeline and link registration
//! - `link`: wikilink and destination resolution
//! - `targeting`: what to flash and where to scroll for a target

pub mod annotate;
pub mod cli;
pub mod config;
pub mod destination;
pub mod error;
pub mod geometry;
pub mod link;
pub mod resolver;
pub mod selection;
pub mod targeting;

#[cfg(test)]
mod testing;

pub use config::AnchorConfig;
pub use error::{AnchorError, Result};
