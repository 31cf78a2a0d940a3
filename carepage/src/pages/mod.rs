//! Page controllers: the wiring of one template's widgets, plus its async
//! actions against a [`ContentSource`](crate::ContentSource).
//!
//! Actions lock the shared document only around synchronous mutation, never
//! across an `await`.

mod daily_recap;
mod resident_file;

pub use daily_recap::{DailyRecapPage, IMPRESSION_BUTTON};
pub use resident_file::{ResidentFilePage, RowAction};

use std::future::Future;

use crate::source::{ActionReply, SourceError};
use crate::widgets::{LoadOutcome, Notice, NoticeKind, Popup};
use crate::{SharedDocument, lock_document};

/// Result of submitting a popup form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The backend accepted it; the form was closed and reset.
    Saved,
    /// The backend refused it, with the message shown.
    Refused(String),
    /// The request failed.
    Failed(String),
    /// The form is not in the document.
    Missing,
}

/// Load markup into `popup`, dropping the response if another load started meanwhile.
pub(crate) async fn load_markup(
    doc: &SharedDocument,
    popup: &Popup,
    fetch: impl Future<Output = Result<String, SourceError>>,
) -> LoadOutcome {
    let token = popup.begin_load(&mut lock_document(doc));
    let result = fetch.await;
    popup.finish_load(&mut lock_document(doc), token, result)
}

/// Copy for one resident form: what to say on success, and the fallback refusal.
pub(crate) struct FormMessages {
    pub saved: &'static str,
    pub refused: &'static str,
}

pub(crate) fn settle_submission(
    doc: &SharedDocument,
    popup: &Popup,
    form_id: &str,
    notice: &Notice,
    messages: &FormMessages,
    reply: Result<ActionReply, SourceError>,
) -> SubmitOutcome {
    let mut doc = lock_document(doc);
    match reply {
        Ok(reply) if reply.success => {
            notice.show(&mut doc, messages.saved, NoticeKind::Success);
            popup.close(&mut doc);
            crate::widgets::reset_fields(&mut doc, form_id);
            SubmitOutcome::Saved
        }
        Ok(reply) => {
            let message = format!(
                "❌ Erreur : {}",
                reply
                    .error
                    .as_deref()
                    .filter(|error| !error.is_empty())
                    .unwrap_or(messages.refused)
            );
            notice.show(&mut doc, &message, NoticeKind::Error);
            SubmitOutcome::Refused(message)
        }
        Err(err) => {
            log::warn!("form {} submission failed: {}", form_id, err);
            let message = "⚠️ Erreur réseau ou serveur.".to_string();
            notice.show(&mut doc, &message, NoticeKind::Error);
            SubmitOutcome::Failed(message)
        }
    }
}
