//! Registration of follow-up behaviour on freshly written annotations
//!
//! A new link annotation only shows up in the viewer after the host reloads
//! the page, so registration has two producers: an immediate attempt right
//! after the write, and a deferred one driven by the host's "layer rendered"
//! event. Both go through [`RegistrationCoordinator::register_once`], which
//! keeps a marker per annotation so only the first of them has an effect.
//!
//! There is no timeout. A queued entry gets exactly one deferred pass: the
//! next render of its page either registers it or drops it. The annotation
//! itself is already persisted either way.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;

use super::traits::{AnnotationElement, Registrar, RenderSurface};

/// Registration waiting for its annotation to appear
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRegistration {
    pub page_number: u32,
    pub annotation_id: String,
    /// Wikilink text the click handler opens
    pub destination: String,
}

/// How a created annotation got (or will get) its registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// Registered right after the write
    Immediate,
    /// Queued until the page's layer renders
    Deferred,
    /// Nothing to register for this annotation
    NotRequired,
}

#[derive(Default)]
struct Markers {
    /// `(page, annotation id)` pairs already registered
    registered: HashSet<(u32, String)>,
    /// Pending registrations per page
    pending: HashMap<u32, Vec<PendingRegistration>>,
}

/// Coordinates immediate and deferred registration
pub struct RegistrationCoordinator {
    surface: Arc<dyn RenderSurface>,
    registrar: Arc<dyn Registrar>,
    markers: Mutex<Markers>,
}

impl RegistrationCoordinator {
    pub fn new(surface: Arc<dyn RenderSurface>, registrar: Arc<dyn Registrar>) -> Self {
        Self {
            surface,
            registrar,
            markers: Mutex::new(Markers::default()),
        }
    }

    /// Register now if the annotation is rendered, otherwise queue it
    pub fn attempt(&self, pending: PendingRegistration) -> RegistrationOutcome {
        if self.attempt_immediate(&pending) {
            RegistrationOutcome::Immediate
        } else {
            self.defer(pending);
            RegistrationOutcome::Deferred
        }
    }

    /// Optimistic attempt against the current render; true if the annotation
    /// is now registered
    pub fn attempt_immediate(&self, pending: &PendingRegistration) -> bool {
        if self.is_registered(pending.page_number, &pending.annotation_id) {
            return true;
        }
        match self
            .surface
            .find_annotation_element(pending.page_number, &pending.annotation_id)
        {
            Some(element) => {
                self.register_once(&element, &pending.destination);
                true
            }
            None => {
                tracing::debug!(
                    page = pending.page_number,
                    annotation_id = %pending.annotation_id,
                    "Annotation not rendered yet, deferring registration"
                );
                false
            }
        }
    }

    /// Queue `pending` until the next render of its page
    pub fn defer(&self, pending: PendingRegistration) {
        let mut markers = self.markers.lock();
        markers
            .pending
            .entry(pending.page_number)
            .or_default()
            .push(pending);
    }

    /// Host hook: the annotation layer of `page` finished rendering
    ///
    /// Returns the number of registrations performed.
    pub fn on_layer_rendered(&self, page: u32) -> usize {
        let queued = self.markers.lock().pending.remove(&page).unwrap_or_default();
        if queued.is_empty() {
            return 0;
        }

        let mut performed = 0;
        let mut dropped = 0;
        for pending in queued {
            match self
                .surface
                .find_annotation_element(page, &pending.annotation_id)
            {
                Some(element) => {
                    if self.register_once(&element, &pending.destination) {
                        performed += 1;
                    }
                }
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            tracing::debug!(
                page,
                count = dropped,
                "Annotations still missing after render, dropping registration"
            );
        }

        performed
    }

    /// Perform the registration unless this annotation is already marked
    ///
    /// Returns true if this call performed it.
    pub fn register_once(&self, element: &AnnotationElement, destination: &str) -> bool {
        let key = (element.page, element.annotation_id.clone());
        if !self.markers.lock().registered.insert(key) {
            return false;
        }

        self.registrar.register(element, destination);
        tracing::info!(
            page = element.page,
            annotation_id = %element.annotation_id,
            "Registered annotation link handler"
        );
        true
    }

    pub fn is_registered(&self, page: u32, annotation_id: &str) -> bool {
        self.markers
            .lock()
            .registered
            .contains(&(page, annotation_id.to_string()))
    }

    /// Number of registrations waiting on `page`
    pub fn pending_on(&self, page: u32) -> usize {
        self.markers
            .lock()
            .pending
            .get(&page)
            .map_or(0, Vec::len)
    }

    /// Drop marker and pending entry of a deleted annotation
    pub fn forget(&self, page: u32, annotation_id: &str) {
        let mut markers = self.markers.lock();
        markers
            .registered
            .remove(&(page, annotation_id.to_string()));
        if let Some(queue) = markers.pending.get_mut(&page) {
            queue.retain(|pending| pending.annotation_id != annotation_id);
        }
    }
}
