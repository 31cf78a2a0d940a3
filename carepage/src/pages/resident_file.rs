//! Resident file: identity card, planning, admission/departure forms and the
//! appointment popups.

use std::sync::Arc;

use chrono::NaiveDate;
use pagedom::{Display, Document, EventKind};

use super::{FormMessages, SubmitOutcome, load_markup, settle_submission};
use crate::config::PageConfig;
use crate::error::PageError;
use crate::filters::PlanningFilter;
use crate::format::format_birth_date;
use crate::model::RowRequest;
use crate::source::ContentSource;
use crate::widgets::{
    FilterableSelect, FormFields, LoadOutcome, Notice, PdfFrame, Popup, SelectConfig, ViewToggle,
    collect_fields,
};
use crate::{SharedDocument, lock_document};

const ADMISSION_FORM: &str = "popupFormInner";
const DEPARTURE_FORM: &str = "departPopupFormInner";
const HISTORY_TOGGLE: &str = "toggleHistoriqueBtn";
const RESIDENT_ID_FIELD: &str = "residentIdHidden";
const CHART_POPUP: &str = "popup";

const ADMISSION_MESSAGES: FormMessages = FormMessages {
    saved: "✅ Résident ajouté avec succès !",
    refused: "Impossible d'ajouter le résident.",
};

const DEPARTURE_MESSAGES: FormMessages = FormMessages {
    saved: "✅ Résident supprimé avec succès !",
    refused: "Impossible de supprimer le résident.",
};

/// What a planning row button asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    /// `.dots-btn[data-row]`: the appointment sheet as PDF.
    Pdf(String),
    /// `.dots-btn-alt[data-row-alt]`: the alternate detail popup.
    DetailAlt(String),
}

#[derive(Debug, Clone)]
pub struct ResidentFilePage {
    config: PageConfig,
    planning: PlanningFilter,
    admission: Option<FilterableSelect>,
    departure: Option<FilterableSelect>,
    admission_form: Popup,
    departure_form: Popup,
    row_detail: Popup,
    row_detail_alt: Popup,
    row_pdf: PdfFrame,
    impression: Popup,
    views: ViewToggle,
    notice: Notice,
}

impl ResidentFilePage {
    /// Wire the page's synchronous behaviour into `doc`.
    ///
    /// Parts whose elements are missing are left out.
    pub fn attach(doc: &mut Document, config: PageConfig, today: NaiveDate) -> Self {
        if let Some(naissance) = config.naissance.as_deref().filter(|n| !n.is_empty()) {
            doc.set_text("naissance", format_birth_date(naissance));
        }

        let planning = PlanningFilter::resident_planning(today);
        planning.bind_history_toggle(doc, HISTORY_TOGGLE);
        planning.apply(doc, false);

        let admission = FilterableSelect::attach(
            doc,
            SelectConfig::new("nomPatientInput", "patientList", "patient-item")
                .with_hidden("nomPatientHidden"),
        );
        let departure = FilterableSelect::attach(
            doc,
            SelectConfig::new("departNomPatientInput", "departPatientList", "patient-item")
                .with_hidden("departNomPatientHidden"),
        );

        let page = Self {
            config,
            planning,
            admission,
            departure,
            admission_form: Popup::admission_form(),
            departure_form: Popup::departure_form(),
            row_detail: Popup::row_detail(),
            row_detail_alt: Popup::row_detail_alt(),
            row_pdf: PdfFrame::row_pdf(),
            impression: Popup::impression_global(),
            views: ViewToggle::default(),
            notice: Notice::page_message(),
        };

        bind_popup_button(doc, "openPopupBtn", &page.admission_form, true);
        bind_popup_button(doc, "closePopupBtn", &page.admission_form, false);
        bind_popup_button(doc, "openDepartPopupBtn", &page.departure_form, true);
        bind_popup_button(doc, "closeDepartPopupBtn", &page.departure_form, false);
        bind_popup_button(doc, "closeImpressionGlobalBtn", &page.impression, false);

        for button in doc.query_class("rowPopupOverlay", "row-close-btn") {
            bind_popup_button(doc, &button, &page.row_detail, false);
        }
        for button in doc.query_class("rowPopupOverlayAlt", "row-close-alt-btn") {
            bind_popup_button(doc, &button, &page.row_detail_alt, false);
        }

        let pdf = page.row_pdf.clone();
        doc.add_listener(
            "closeImpressionBtn",
            EventKind::Click,
            Arc::new(move |doc, _| pdf.close(doc)),
        );
        doc.add_listener(
            "popup-close",
            EventKind::Click,
            Arc::new(|doc, _| {
                doc.set_display(CHART_POPUP, Display::None);
            }),
        );

        log::debug!(
            "ResidentFilePage::attach admission={} departure={}",
            page.admission.is_some(),
            page.departure.is_some()
        );
        page
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn planning(&self) -> &PlanningFilter {
        &self.planning
    }

    pub fn admission(&self) -> Option<&FilterableSelect> {
        self.admission.as_ref()
    }

    pub fn departure(&self) -> Option<&FilterableSelect> {
        self.departure.as_ref()
    }

    pub fn row_detail(&self) -> &Popup {
        &self.row_detail
    }

    pub fn row_pdf(&self) -> &PdfFrame {
        &self.row_pdf
    }

    pub fn toggle_view(&self, doc: &mut Document, button_id: &str) -> bool {
        self.views.toggle(doc, button_id)
    }

    /// Merge a row button's JSON with the configured resident summary.
    pub fn row_request(&self, raw: &str) -> Result<RowRequest, PageError> {
        RowRequest::parse(raw, &self.config.resident)
    }

    /// The action behind a planning row button, if it is one.
    pub fn row_action(&self, doc: &Document, button_id: &str) -> Option<RowAction> {
        let button = doc.get(button_id)?;
        if button.has_class("dots-btn")
            && let Some(raw) = button.get_data("row")
        {
            return Some(RowAction::Pdf(raw.clone()));
        }
        if button.has_class("dots-btn-alt")
            && let Some(raw) = button.get_data("row-alt")
        {
            return Some(RowAction::DetailAlt(raw.clone()));
        }
        None
    }

    pub async fn run_row_action(
        &self,
        doc: &SharedDocument,
        source: &dyn ContentSource,
        action: &RowAction,
    ) -> Result<LoadOutcome, PageError> {
        match action {
            RowAction::Pdf(raw) => self.open_row_pdf(doc, source, raw).await,
            RowAction::DetailAlt(raw) => self.open_row_detail_alt(doc, source, raw).await,
        }
    }

    pub async fn open_row_detail(
        &self,
        doc: &SharedDocument,
        source: &dyn ContentSource,
        raw_row: &str,
    ) -> Result<LoadOutcome, PageError> {
        let request = self.row_request(raw_row)?;
        Ok(load_markup(doc, &self.row_detail, source.row_detail(&request)).await)
    }

    pub async fn open_row_detail_alt(
        &self,
        doc: &SharedDocument,
        source: &dyn ContentSource,
        raw_row: &str,
    ) -> Result<LoadOutcome, PageError> {
        let request = self.row_request(raw_row).map_err(|err| match err {
            PageError::InvalidRowData(cause) => PageError::InvalidAltRowData(cause),
            other => other,
        })?;
        Ok(load_markup(doc, &self.row_detail_alt, source.row_detail_alt(&request)).await)
    }

    pub async fn open_row_pdf(
        &self,
        doc: &SharedDocument,
        source: &dyn ContentSource,
        raw_row: &str,
    ) -> Result<LoadOutcome, PageError> {
        let request = self.row_request(raw_row)?;
        let Some(token) = self.row_pdf.begin_load(&mut lock_document(doc)) else {
            return Ok(LoadOutcome::Missing);
        };
        let result = source.row_pdf(&request).await;
        Ok(self
            .row_pdf
            .finish_load(&mut lock_document(doc), token, result))
    }

    pub async fn open_impression(
        &self,
        doc: &SharedDocument,
        source: &dyn ContentSource,
    ) -> LoadOutcome {
        load_markup(doc, &self.impression, source.impression()).await
    }

    pub async fn submit_admission(
        &self,
        doc: &SharedDocument,
        source: &dyn ContentSource,
    ) -> SubmitOutcome {
        let Some(fields) = form_fields(doc, ADMISSION_FORM) else {
            return SubmitOutcome::Missing;
        };
        let reply = source.add_resident(&fields).await;
        settle_submission(
            doc,
            &self.admission_form,
            ADMISSION_FORM,
            &self.notice,
            &ADMISSION_MESSAGES,
            reply,
        )
    }

    pub async fn submit_departure(
        &self,
        doc: &SharedDocument,
        source: &dyn ContentSource,
    ) -> SubmitOutcome {
        let Some(fields) = form_fields(doc, DEPARTURE_FORM) else {
            return SubmitOutcome::Missing;
        };
        let reply = source.delete_resident(&fields).await;
        settle_submission(
            doc,
            &self.departure_form,
            DEPARTURE_FORM,
            &self.notice,
            &DEPARTURE_MESSAGES,
            reply,
        )
    }

    /// Fetch the stool chart of the resident in `residentIdHidden` and open
    /// its popup. Returns the figure for the caller to draw.
    pub async fn load_stool_chart(
        &self,
        doc: &SharedDocument,
        source: &dyn ContentSource,
    ) -> Result<serde_json::Value, PageError> {
        let pk = lock_document(doc)
            .value(RESIDENT_ID_FIELD)
            .unwrap_or_default();
        if pk.is_empty() {
            return Err(PageError::NoResidentSelected);
        }
        let figure = source.stool_chart(&pk).await?;
        lock_document(doc).set_display(CHART_POPUP, Display::Block);
        Ok(figure)
    }
}

fn form_fields(doc: &SharedDocument, form_id: &str) -> Option<FormFields> {
    let doc = lock_document(doc);
    doc.contains(form_id).then(|| collect_fields(&doc, form_id))
}

fn bind_popup_button(doc: &mut Document, button_id: &str, popup: &Popup, open: bool) -> bool {
    let popup = popup.clone();
    doc.add_listener(
        button_id,
        EventKind::Click,
        Arc::new(move |doc, _| {
            if open {
                popup.open(doc);
            } else {
                popup.close(doc);
            }
        }),
    )
}
