//! Drives a page document with script commands.

use std::sync::Arc;

use carepage::pages::{DailyRecapPage, ResidentFilePage};
use carepage::widgets::FilterableSelect;
use carepage::{ContentSource, SharedDocument, lock_document, share};
use chrono::NaiveDate;
use pagedom::Document;

use crate::error::CliError;
use crate::page::{PageFile, PageKind};
use crate::script::Command;

enum Controller {
    ResidentFile(ResidentFilePage),
    DailyRecap(DailyRecapPage),
    Plain,
}

pub struct Harness {
    doc: SharedDocument,
    kind: PageKind,
    controller: Controller,
    selects: Vec<FilterableSelect>,
    source: Option<Arc<dyn ContentSource>>,
}

impl Harness {
    /// Build the document and attach the page's controller and selects.
    ///
    /// `today` is used when the page file does not fix a date.
    pub fn new(page: PageFile, today: NaiveDate) -> Result<Self, CliError> {
        let today = match page.today.as_deref() {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| CliError::InvalidDate(raw.to_string()))?,
            None => today,
        };

        let mut doc = Document::new(page.root.into_element());
        let controller = match page.kind {
            PageKind::ResidentFile => {
                Controller::ResidentFile(ResidentFilePage::attach(&mut doc, page.config, today))
            }
            PageKind::DailyRecap => Controller::DailyRecap(DailyRecapPage::attach(&mut doc)),
            PageKind::Plain => Controller::Plain,
        };
        let selects = page
            .selects
            .iter()
            .filter_map(|spec| FilterableSelect::attach(&mut doc, spec.into()))
            .collect::<Vec<_>>();

        log::info!(
            "Harness: {} page, {} extra selects attached",
            page.kind.name(),
            selects.len()
        );

        Ok(Self {
            doc: share(doc),
            kind: page.kind,
            controller,
            selects,
            source: None,
        })
    }

    /// Enable the async commands against `source`.
    pub fn with_source(mut self, source: Arc<dyn ContentSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn document(&self) -> &SharedDocument {
        &self.doc
    }

    pub fn selects(&self) -> &[FilterableSelect] {
        &self.selects
    }

    /// One-line summary of an element's state.
    pub fn describe(&self, id: &str) -> String {
        let doc = lock_document(&self.doc);
        match doc.get(id) {
            Some(el) => format!(
                "{id}: display={:?} value={:?} text={:?}",
                el.display.as_css(),
                el.value.as_deref().unwrap_or_default(),
                el.text_content().trim()
            ),
            None => format!("{id}: <missing>"),
        }
    }

    fn source(&self, command: &Command) -> Result<&dyn ContentSource, CliError> {
        self.source
            .as_deref()
            .ok_or(CliError::NoBackend(command.name()))
    }

    fn unsupported(&self, command: &Command) -> CliError {
        CliError::Unsupported {
            command: command.name(),
            kind: self.kind.name(),
        }
    }

    /// Run one command. Returns what it printed, if anything.
    pub async fn run(&self, command: &Command) -> Result<Option<String>, CliError> {
        match command {
            Command::Focus(id) => {
                lock_document(&self.doc).focus(id);
            }
            Command::Blur => {
                lock_document(&self.doc).blur();
            }
            Command::Type { id, text } => {
                lock_document(&self.doc).type_text(id, text.as_str());
            }
            Command::Click(id) => {
                lock_document(&self.doc).click(id);
            }
            Command::Change { id, value } => {
                lock_document(&self.doc).select_value(id, value.as_str());
            }
            Command::Check { id, checked } => {
                lock_document(&self.doc).toggle(id, *checked);
            }
            Command::Wait(delay) => {
                lock_document(&self.doc).advance(*delay);
            }
            Command::Show(id) => return Ok(Some(self.describe(id))),
            Command::OpenImpression => {
                let source = self.source(command)?;
                let outcome = match &self.controller {
                    Controller::ResidentFile(page) => page.open_impression(&self.doc, source).await,
                    Controller::DailyRecap(page) => page.open_impression(&self.doc, source).await,
                    Controller::Plain => return Err(self.unsupported(command)),
                };
                return Ok(Some(format!("open-impression: {outcome:?}")));
            }
            Command::OpenRow(button) => {
                let Controller::ResidentFile(page) = &self.controller else {
                    return Err(self.unsupported(command));
                };
                let source = self.source(command)?;
                let action = page
                    .row_action(&lock_document(&self.doc), button)
                    .ok_or_else(|| CliError::NotARowButton(button.clone()))?;
                let outcome = page.run_row_action(&self.doc, source, &action).await?;
                return Ok(Some(format!("open-row {button}: {outcome:?}")));
            }
            Command::SubmitStool => {
                let Controller::DailyRecap(page) = &self.controller else {
                    return Err(self.unsupported(command));
                };
                let source = self.source(command)?;
                let message = page.submit_stool_sheet(&self.doc, source).await?;
                return Ok(Some(format!("submit-stool: {message}")));
            }
        }
        Ok(None)
    }
}

impl std::fmt::Debug for Harness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Harness")
            .field("kind", &self.kind)
            .field("selects", &self.selects.len())
            .field("backend", &self.source.is_some())
            .finish()
    }
}
