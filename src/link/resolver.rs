//! Destination and wikilink resolution

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::wikilink::Wikilink;
use super::LinkError;
use crate::destination::{decode_with_default_page, DestinationRecord};
use crate::geometry::{PartialPoint, Rect};
use crate::selection::SelectionRange;

/// Page used when a wikilink subpath names none
pub const DEFAULT_PAGE: u32 = 1;

/// A file known to the host, identified by its vault-relative path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileRef {
    pub path: String,
}

impl FileRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Directory part of the path, empty at the vault root
    pub fn parent(&self) -> &str {
        self.path.rsplit_once('/').map_or("", |(parent, _)| parent)
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Resolves link paths to files
#[async_trait]
pub trait PathResolver: Send + Sync {
    /// The file `link_path` refers to when written inside `context`, if any
    async fn resolve_path(&self, link_path: &str, context: &FileRef) -> Option<FileRef>;
}

/// What to resolve
#[derive(Debug, Clone, PartialEq)]
pub enum LinkSource {
    /// Destination within the context file
    Destination(DestinationRecord),
    /// `[[path#subpath]]` or `![[path#subpath]]` text
    Wikilink(String),
}

/// Concrete location a link points to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTarget {
    pub file: FileRef,
    pub page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<PartialPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rect: Option<Rect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectionRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ResolvedTarget {
    fn from_record(file: FileRef, record: DestinationRecord) -> Self {
        Self {
            file,
            page: record.page,
            annotation_id: record.annotation_id,
            offset: record.offset,
            rect: record.rect,
            selection: record.selection,
            color: record.color,
        }
    }

    /// The destination part, without the file
    pub fn destination(&self) -> DestinationRecord {
        DestinationRecord {
            page: self.page,
            annotation_id: self.annotation_id.clone(),
            offset: self.offset,
            rect: self.rect,
            selection: self.selection,
            color: self.color.clone(),
        }
    }
}

/// Resolves destinations and wikilinks to files and pages
#[derive(Clone)]
pub struct LinkResolver {
    paths: Arc<dyn PathResolver>,
}

impl LinkResolver {
    pub fn new(paths: Arc<dyn PathResolver>) -> Self {
        Self { paths }
    }

    /// Resolve `source` as written in `context`
    ///
    /// A link to a file that cannot be found is a dangling link and resolves
    /// to `Ok(None)`.
    pub async fn resolve(
        &self,
        source: &LinkSource,
        context: &FileRef,
    ) -> Result<Option<ResolvedTarget>, LinkError> {
        match source {
            LinkSource::Destination(record) => Ok(Some(ResolvedTarget::from_record(
                context.clone(),
                record.clone(),
            ))),
            LinkSource::Wikilink(text) => self.resolve_wikilink(text, context).await,
        }
    }

    pub async fn resolve_wikilink(
        &self,
        text: &str,
        context: &FileRef,
    ) -> Result<Option<ResolvedTarget>, LinkError> {
        let link: Wikilink = text.parse()?;

        let file = if link.path.is_empty() {
            Some(context.clone())
        } else {
            self.paths.resolve_path(&link.path, context).await
        };
        let Some(file) = file else {
            tracing::debug!(link_path = %link.path, context = %context, "Dangling link");
            return Ok(None);
        };

        let record = decode_with_default_page(link.subpath.as_deref().unwrap_or(""), DEFAULT_PAGE)?;
        Ok(Some(ResolvedTarget::from_record(file, record)))
    }
}
