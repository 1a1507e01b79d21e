//! Filesystem-backed path resolution
//!
//! Resolves link paths against a vault directory on disk: first relative to
//! the folder of the linking file, then relative to the vault root.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::resolver::{FileRef, PathResolver};

pub struct FsPathResolver {
    root: PathBuf,
}

impl FsPathResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn is_file(path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }
}

#[async_trait]
impl PathResolver for FsPathResolver {
    async fn resolve_path(&self, link_path: &str, context: &FileRef) -> Option<FileRef> {
        let link_path = link_path.trim_start_matches('/');
        let parent = context.parent();

        let mut candidates = Vec::with_capacity(2);
        if !parent.is_empty() {
            candidates.push(format!("{}/{}", parent, link_path));
        }
        candidates.push(link_path.to_string());

        for candidate in candidates {
            if Self::is_file(&self.root.join(&candidate)).await {
                return Some(FileRef::new(candidate));
            }
        }
        None
    }
}
