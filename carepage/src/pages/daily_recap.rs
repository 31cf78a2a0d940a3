//! Daily recap: service filters, notes, stool records and the printable recap.

use std::sync::Arc;

use pagedom::{Document, EventKind};

use crate::error::PageError;
use crate::filters::{CardFilter, NoteFilter, attach_service_filters};
use crate::model::{collect_stool_sheet, restyle_note};
use crate::source::ContentSource;
use crate::widgets::{LoadOutcome, PaneSwitch, Popup};
use crate::{SharedDocument, lock_document};

use super::load_markup;

/// Button opening the printable recap.
pub const IMPRESSION_BUTTON: &str = "imprimerBtn";

const CLOSE_IMPRESSION_BUTTON: &str = "closeImpressionBtn";
const CLOSE_STOOL_BUTTON: &str = "closeSellesBtn";

#[derive(Debug, Clone)]
pub struct DailyRecapPage {
    filters_bound: bool,
    stool_switch: Option<PaneSwitch>,
    impression: Popup,
    stool_sheet: Popup,
}

impl DailyRecapPage {
    pub fn attach(doc: &mut Document) -> Self {
        let filters_bound =
            attach_service_filters(doc, CardFilter::default(), NoteFilter::default());
        let stool_switch = PaneSwitch::attach(doc, PaneSwitch::stool_recap());

        let page = Self {
            filters_bound,
            stool_switch,
            impression: Popup::impression(),
            stool_sheet: Popup::stool_sheet(),
        };

        let impression = page.impression.clone();
        doc.add_listener(
            CLOSE_IMPRESSION_BUTTON,
            EventKind::Click,
            Arc::new(move |doc, _| {
                impression.close(doc);
            }),
        );
        let stool_sheet = page.stool_sheet.clone();
        doc.add_listener(
            CLOSE_STOOL_BUTTON,
            EventKind::Click,
            Arc::new(move |doc, _| {
                stool_sheet.close(doc);
            }),
        );

        log::debug!(
            "DailyRecapPage::attach filters={} stool_switch={}",
            page.filters_bound,
            page.stool_switch.is_some()
        );
        page
    }

    pub fn filters_bound(&self) -> bool {
        self.filters_bound
    }

    pub fn stool_switch(&self) -> Option<&PaneSwitch> {
        self.stool_switch.as_ref()
    }

    pub fn impression(&self) -> &Popup {
        &self.impression
    }

    pub fn stool_sheet(&self) -> &Popup {
        &self.stool_sheet
    }

    pub async fn open_impression(
        &self,
        doc: &SharedDocument,
        source: &dyn ContentSource,
    ) -> LoadOutcome {
        load_markup(doc, &self.impression, source.impression()).await
    }

    pub async fn open_stool_sheet(
        &self,
        doc: &SharedDocument,
        source: &dyn ContentSource,
    ) -> LoadOutcome {
        load_markup(doc, &self.stool_sheet, source.stool_sheet()).await
    }

    pub fn close_stool_sheet(&self, doc: &mut Document) -> bool {
        self.stool_sheet.close(doc)
    }

    /// Save the rendered stool sheet and close it. Returns the server's message.
    pub async fn submit_stool_sheet(
        &self,
        doc: &SharedDocument,
        source: &dyn ContentSource,
    ) -> Result<String, PageError> {
        let sheet = {
            let doc = lock_document(doc);
            let content_id = self.stool_sheet.content_id().unwrap_or_default();
            collect_stool_sheet(&doc, content_id)
        };
        let reply = source.save_stool_sheet(&sheet).await?;
        self.stool_sheet.close(&mut lock_document(doc));
        log::debug!("stool sheet saved: {} entries", sheet.len());
        Ok(reply.message)
    }

    /// Restyle the note holding `checkbox_id` and send its new status.
    ///
    /// `Ok(None)` when the checkbox is absent.
    pub async fn update_note_status(
        &self,
        doc: &SharedDocument,
        source: &dyn ContentSource,
        checkbox_id: &str,
    ) -> Result<Option<serde_json::Value>, PageError> {
        let Some(status) = restyle_note(&mut lock_document(doc), checkbox_id) else {
            return Ok(None);
        };
        let reply = source.update_status(&status).await?;
        Ok(Some(reply))
    }
}
