//! Overlay popups whose content is loaded from the backend.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use pagedom::{Display, Document};

/// Written into a popup's content region while its request is in flight.
pub const LOADING_PLACEHOLDER: &str = "Chargement...";

/// Written into a popup's content region when its request failed.
pub const LOAD_ERROR_MARKUP: &str = "<div style=\"color:red;\">Erreur de chargement.</div>";

/// Written into a PDF frame's `srcdoc` when generation failed.
pub const PDF_ERROR_MARKUP: &str =
    "<p style='color:red'>Erreur lors de la génération du PDF.</p>";

/// Identifies one content request. Only the latest token of a popup may
/// write its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

/// What became of a response handed to `finish_load`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response was written.
    Applied,
    /// The request failed and the error content was written.
    Failed,
    /// A newer request was issued meanwhile; the response was dropped.
    Stale,
    /// The target element is not in the document.
    Missing,
}

/// An overlay with an optional content region.
#[derive(Debug, Clone)]
pub struct Popup {
    /// Overlay candidates; the first one present in the document is used.
    overlay_ids: Vec<String>,
    content_id: Option<String>,
    placeholder: Option<String>,
    latest: Arc<AtomicU64>,
}

impl Popup {
    pub fn new(overlay_id: impl Into<String>) -> Self {
        Self {
            overlay_ids: vec![overlay_id.into()],
            content_id: None,
            placeholder: None,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Use `overlay_id` when the preferred overlay is absent.
    pub fn with_fallback(mut self, overlay_id: impl Into<String>) -> Self {
        self.overlay_ids.push(overlay_id.into());
        self
    }

    pub fn with_content(mut self, content_id: impl Into<String>) -> Self {
        self.content_id = Some(content_id.into());
        self
    }

    /// Text shown in the content region while loading.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    // -------------------------------------------------------------------------
    // Presets
    // -------------------------------------------------------------------------

    /// Recap of the last days, printable.
    pub fn impression() -> Self {
        Self::new("impressionPopup").with_content("impressionContentInner")
    }

    /// Sidebar variant of [`Popup::impression`].
    pub fn impression_global() -> Self {
        Self::new("impressionPopupGlobal")
            .with_fallback("impressionPopup")
            .with_content("impressionContentInner")
    }

    /// Appointment detail for a planning row.
    pub fn row_detail() -> Self {
        Self::new("rowPopupOverlay")
            .with_content("rowPopupInner")
            .with_placeholder(LOADING_PLACEHOLDER)
    }

    pub fn row_detail_alt() -> Self {
        Self::new("rowPopupOverlayAlt")
            .with_content("rowPopupContentAlt")
            .with_placeholder(LOADING_PLACEHOLDER)
    }

    /// Daily stool sheet.
    pub fn stool_sheet() -> Self {
        Self::new("sellesPopup")
            .with_content("sellesPopupContent")
            .with_placeholder(LOADING_PLACEHOLDER)
    }

    pub fn admission_form() -> Self {
        Self::new("popupForm")
    }

    pub fn departure_form() -> Self {
        Self::new("departPopupForm")
    }

    // -------------------------------------------------------------------------
    // Visibility
    // -------------------------------------------------------------------------

    pub fn overlay_id(&self, doc: &Document) -> Option<String> {
        self.overlay_ids.iter().find(|id| doc.contains(id)).cloned()
    }

    pub fn content_id(&self) -> Option<&str> {
        self.content_id.as_deref()
    }

    pub fn open(&self, doc: &mut Document) -> bool {
        match self.overlay_id(doc) {
            Some(id) => doc.set_display(&id, Display::Flex),
            None => false,
        }
    }

    pub fn close(&self, doc: &mut Document) -> bool {
        match self.overlay_id(doc) {
            Some(id) => doc.set_display(&id, Display::None),
            None => false,
        }
    }

    pub fn is_open(&self, doc: &Document) -> bool {
        self.overlay_id(doc)
            .and_then(|id| doc.display(&id))
            .is_some_and(|display| !display.is_hidden())
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Open the popup, show the placeholder, and issue a new token.
    /// Responses to every earlier token are dropped from now on.
    pub fn begin_load(&self, doc: &mut Document) -> RequestToken {
        let token = RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1);
        if let (Some(content_id), Some(placeholder)) = (&self.content_id, &self.placeholder) {
            doc.set_markup(content_id, placeholder.as_str());
        }
        self.open(doc);
        token
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }

    /// Write a response into the content region, unless `token` was superseded.
    pub fn finish_load<E: std::fmt::Display>(
        &self,
        doc: &mut Document,
        token: RequestToken,
        result: Result<String, E>,
    ) -> LoadOutcome {
        if !self.is_current(token) {
            log::debug!("Popup {:?}: dropping stale response {:?}", self.overlay_ids, token);
            return LoadOutcome::Stale;
        }
        let Some(content_id) = self.content_id.as_deref() else {
            return LoadOutcome::Missing;
        };

        match result {
            Ok(markup) => {
                if doc.set_markup(content_id, markup) {
                    LoadOutcome::Applied
                } else {
                    LoadOutcome::Missing
                }
            }
            Err(err) => {
                log::warn!("Popup {:?}: load failed: {}", self.overlay_ids, err);
                if doc.set_markup(content_id, LOAD_ERROR_MARKUP) {
                    LoadOutcome::Failed
                } else {
                    LoadOutcome::Missing
                }
            }
        }
    }
}

/// Inline PDF URL for an iframe `src`.
pub fn pdf_data_url(bytes: &[u8]) -> String {
    format!("data:application/pdf;base64,{}", STANDARD.encode(bytes))
}

/// A popup hosting an iframe that displays a generated PDF.
#[derive(Debug, Clone)]
pub struct PdfFrame {
    popup: Popup,
    iframe_id: String,
}

impl PdfFrame {
    pub fn new(popup: Popup, iframe_id: impl Into<String>) -> Self {
        Self {
            popup,
            iframe_id: iframe_id.into(),
        }
    }

    /// Row-level PDF, preferring the dedicated `impressionPopupDF` overlay.
    pub fn row_pdf() -> Self {
        Self::new(
            Popup::new("impressionPopupDF").with_fallback("impressionPopup"),
            "pdfIframe",
        )
    }

    pub fn popup(&self) -> &Popup {
        &self.popup
    }

    /// Open the overlay and issue a token. `None` when there is no iframe to
    /// load into; the overlay is opened regardless.
    pub fn begin_load(&self, doc: &mut Document) -> Option<RequestToken> {
        let token = self.popup.begin_load(doc);
        doc.contains(&self.iframe_id).then_some(token)
    }

    pub fn finish_load<E: std::fmt::Display>(
        &self,
        doc: &mut Document,
        token: RequestToken,
        result: Result<Vec<u8>, E>,
    ) -> LoadOutcome {
        if !self.popup.is_current(token) {
            return LoadOutcome::Stale;
        }
        match result {
            Ok(bytes) => {
                if doc.set_attr(&self.iframe_id, "src", pdf_data_url(&bytes)) {
                    LoadOutcome::Applied
                } else {
                    LoadOutcome::Missing
                }
            }
            Err(err) => {
                log::warn!("PdfFrame {}: generation failed: {}", self.iframe_id, err);
                if doc.set_attr(&self.iframe_id, "srcdoc", PDF_ERROR_MARKUP) {
                    LoadOutcome::Failed
                } else {
                    LoadOutcome::Missing
                }
            }
        }
    }

    /// Hide the overlay and unload the document shown in the frame.
    pub fn close(&self, doc: &mut Document) {
        self.popup.close(doc);
        doc.set_attr(&self.iframe_id, "src", "");
    }
}
