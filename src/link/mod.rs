//! Links between documents
//!
//! Resolves a destination record or a `[[path#subpath]]` wikilink, written in
//! some context file, to a concrete file and page. File lookup is delegated to
//! a [`PathResolver`]; a link whose file cannot be found resolves to `None`.

mod fs;
mod resolver;
mod wikilink;

use thiserror::Error;

use crate::destination::ParseError;

pub use fs::FsPathResolver;
pub use resolver::{
    FileRef, LinkResolver, LinkSource, PathResolver, ResolvedTarget, DEFAULT_PAGE,
};
pub use wikilink::Wikilink;

/// Link resolution errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("Malformed wikilink: {0}")]
    MalformedWikilink(String),

    #[error("Invalid destination: {0}")]
    Destination(#[from] ParseError),
}
