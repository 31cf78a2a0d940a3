//! Page controllers for the care-facility front end.
//!
//! Each controller owns the element IDs of its own region of a
//! [`pagedom::Document`] and is instantiated per page, never shared globally.

pub mod config;
pub mod error;
pub mod filters;
pub mod format;
pub mod model;
pub mod pages;
pub mod source;
pub mod widgets;

pub use config::{Endpoints, PageConfig};
pub use error::PageError;
pub use source::{ContentSource, SourceError};

use std::sync::{Arc, Mutex, MutexGuard};

use pagedom::Document;

/// Document shared between synchronous listeners and async page actions.
pub type SharedDocument = Arc<Mutex<Document>>;

pub fn share(doc: Document) -> SharedDocument {
    Arc::new(Mutex::new(doc))
}

/// Lock the shared document, recovering it from a poisoned lock.
pub fn lock_document(doc: &SharedDocument) -> MutexGuard<'_, Document> {
    doc.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
