//! In-memory collaborators for unit tests

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

use crate::annotate::{
    AnnotationBackend, AnnotationElement, BackendError, CapturedSelection, LinkDestination,
    Registrar, RenderSurface, SelectionProvider,
};
use crate::geometry::{Rect, YAxis};
use crate::link::{FileRef, PathResolver};
use crate::resolver::{AnnotationCandidate, TextMarkupSubtype};
use crate::selection::{TextLayout, TextLayoutError};

// =============================================================================
// Text layout
// =============================================================================

/// Monospaced text, one run per line; glyphs are 5 wide and 10 high, y down
pub(crate) struct FakeLayout {
    pub page_count: u32,
    pub loaded: bool,
    pub runs: HashMap<(u32, u32), Vec<Rect>>,
}

impl FakeLayout {
    pub fn lines(page: u32, chars_per_line: &[usize]) -> Self {
        let mut runs = HashMap::new();
        for (line, &chars) in chars_per_line.iter().enumerate() {
            let top = line as f64 * 10.0;
            let glyphs = (0..chars)
                .map(|c| {
                    let left = c as f64 * 5.0;
                    Rect::new(left, top, left + 5.0, top + 10.0)
                })
                .collect();
            runs.insert((page, line as u32), glyphs);
        }
        Self {
            page_count: page,
            loaded: true,
            runs,
        }
    }
}

#[async_trait]
impl TextLayout for FakeLayout {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn y_axis(&self) -> YAxis {
        YAxis::Down
    }

    async fn run_glyphs(&self, page: u32, run_index: u32) -> Result<Vec<Rect>, TextLayoutError> {
        if !self.loaded {
            return Err(TextLayoutError::NotLoaded(page));
        }
        self.runs
            .get(&(page, run_index))
            .cloned()
            .ok_or(TextLayoutError::RunNotFound { page, run_index })
    }
}

// =============================================================================
// Paths
// =============================================================================

pub(crate) struct FakePaths {
    files: HashSet<String>,
}

impl FakePaths {
    pub fn new(files: &[&str]) -> Self {
        Self {
            files: files.iter().map(|f| f.to_string()).collect(),
        }
    }
}

#[async_trait]
impl PathResolver for FakePaths {
    async fn resolve_path(&self, link_path: &str, context: &FileRef) -> Option<FileRef> {
        let parent = context.parent();
        let relative = if parent.is_empty() {
            link_path.to_string()
        } else {
            format!("{}/{}", parent, link_path)
        };
        [relative, link_path.to_string()]
            .into_iter()
            .find(|candidate| self.files.contains(candidate))
            .map(FileRef::new)
    }
}

// =============================================================================
// Annotation back end
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BackendCall {
    TextMarkup {
        page: u32,
        rects: Vec<Rect>,
        subtype: TextMarkupSubtype,
        color: Option<String>,
    },
    Link {
        page: u32,
        rects: Vec<Rect>,
        destination: LinkDestination,
        color: Option<String>,
        contents: Option<String>,
    },
    Text {
        page: u32,
        x: f64,
        y: f64,
        contents: String,
        color: Option<String>,
    },
}

#[derive(Default)]
struct BackendState {
    next_id: u32,
    fail_writes: bool,
    calls: Vec<BackendCall>,
    /// Contents by `(page, id)`
    annotations: HashMap<(u32, String), Option<String>>,
}

/// Records writes and hands out ids `1R`, `2R`, ...
#[derive(Default)]
pub(crate) struct FakeBackend {
    state: Mutex<BackendState>,
}

impl FakeBackend {
    pub fn fail_writes(&self, fail: bool) {
        self.state.lock().fail_writes = fail;
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.state.lock().calls.clone()
    }

    fn write(&self, page: u32, call: BackendCall, contents: Option<String>) -> Result<String, BackendError> {
        let mut state = self.state.lock();
        if state.fail_writes {
            return Err(BackendError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only file",
            )));
        }
        state.next_id += 1;
        let id = format!("{}R", state.next_id);
        state.calls.push(call);
        state.annotations.insert((page, id.clone()), contents);
        Ok(id)
    }

    fn not_found(page: u32, id: &str) -> BackendError {
        BackendError::NotFound {
            page,
            id: id.to_string(),
        }
    }
}

#[async_trait]
impl AnnotationBackend for FakeBackend {
    async fn add_text_markup_annotation(
        &self,
        _file: &FileRef,
        page: u32,
        rects: &[Rect],
        subtype: TextMarkupSubtype,
        color: Option<&str>,
    ) -> Result<String, BackendError> {
        let call = BackendCall::TextMarkup {
            page,
            rects: rects.to_vec(),
            subtype,
            color: color.map(str::to_string),
        };
        self.write(page, call, None)
    }

    async fn add_link_annotation(
        &self,
        _file: &FileRef,
        page: u32,
        rects: &[Rect],
        destination: &LinkDestination,
        color: Option<&str>,
        contents: Option<&str>,
    ) -> Result<String, BackendError> {
        let call = BackendCall::Link {
            page,
            rects: rects.to_vec(),
            destination: destination.clone(),
            color: color.map(str::to_string),
            contents: contents.map(str::to_string),
        };
        self.write(page, call, contents.map(str::to_string))
    }

    async fn add_text_annotation(
        &self,
        _file: &FileRef,
        page: u32,
        x: f64,
        y: f64,
        contents: &str,
        color: Option<&str>,
    ) -> Result<String, BackendError> {
        let call = BackendCall::Text {
            page,
            x,
            y,
            contents: contents.to_string(),
            color: color.map(str::to_string),
        };
        self.write(page, call, Some(contents.to_string()))
    }

    async fn delete_annotation(&self, _file: &FileRef, page: u32, id: &str) -> Result<(), BackendError> {
        self.state
            .lock()
            .annotations
            .remove(&(page, id.to_string()))
            .map(|_| ())
            .ok_or_else(|| Self::not_found(page, id))
    }

    async fn get_annotation_contents(
        &self,
        _file: &FileRef,
        page: u32,
        id: &str,
    ) -> Result<Option<String>, BackendError> {
        self.state
            .lock()
            .annotations
            .get(&(page, id.to_string()))
            .cloned()
            .ok_or_else(|| Self::not_found(page, id))
    }

    async fn set_annotation_contents(
        &self,
        _file: &FileRef,
        page: u32,
        id: &str,
        text: &str,
    ) -> Result<(), BackendError> {
        let mut state = self.state.lock();
        let contents = state
            .annotations
            .get_mut(&(page, id.to_string()))
            .ok_or_else(|| Self::not_found(page, id))?;
        *contents = Some(text.to_string());
        Ok(())
    }
}

// =============================================================================
// Viewer
// =============================================================================

pub(crate) struct FakeSelection(pub Option<CapturedSelection>);

impl SelectionProvider for FakeSelection {
    fn current_selection(&self) -> Option<CapturedSelection> {
        self.0
    }
}

#[derive(Default)]
struct SurfaceState {
    next_handle: u64,
    elements: HashMap<(u32, String), u64>,
    candidates: HashMap<u32, Vec<AnnotationCandidate>>,
}

/// Render surface whose elements appear when a test calls [`FakeSurface::show`]
#[derive(Default)]
pub(crate) struct FakeSurface {
    state: Mutex<SurfaceState>,
}

impl FakeSurface {
    pub fn show(&self, page: u32, id: &str) {
        let mut state = self.state.lock();
        state.next_handle += 1;
        let handle = state.next_handle;
        state.elements.insert((page, id.to_string()), handle);
    }

    pub fn set_candidates(&self, page: u32, candidates: Vec<AnnotationCandidate>) {
        self.state.lock().candidates.insert(page, candidates);
    }
}

impl RenderSurface for FakeSurface {
    fn candidates(&self, page: u32) -> Vec<AnnotationCandidate> {
        self.state
            .lock()
            .candidates
            .get(&page)
            .cloned()
            .unwrap_or_default()
    }

    fn find_annotation_element(&self, page: u32, id: &str) -> Option<AnnotationElement> {
        self.state
            .lock()
            .elements
            .get(&(page, id.to_string()))
            .map(|&handle| AnnotationElement {
                page,
                annotation_id: id.to_string(),
                handle,
            })
    }
}

#[derive(Default)]
pub(crate) struct CountingRegistrar {
    registered: Mutex<Vec<(AnnotationElement, String)>>,
}

impl CountingRegistrar {
    pub fn count(&self) -> usize {
        self.registered.lock().len()
    }

    pub fn destinations(&self) -> Vec<String> {
        self.registered
            .lock()
            .iter()
            .map(|(_, destination)| destination.clone())
            .collect()
    }
}

impl Registrar for CountingRegistrar {
    fn register(&self, element: &AnnotationElement, destination: &str) {
        self.registered
            .lock()
            .push((element.clone(), destination.to_string()));
    }
}
