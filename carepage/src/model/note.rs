use pagedom::Document;
use serde::{Deserialize, Serialize};

pub const DONE_COLOR: &str = "#abababff";
pub const PENDING_TEXT_COLOR: &str = "#5c5859";
pub const PENDING_BADGE_COLOR: &str = "#eebbc3";

/// Status change of a daily note: `0` done, `1` pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteStatus {
    pub id: String,
    pub status: u8,
}

impl NoteStatus {
    pub fn from_checked(id: impl Into<String>, checked: bool) -> Self {
        Self {
            id: id.into(),
            status: if checked { 0 } else { 1 },
        }
    }
}

/// Grey out (or restore) the note holding `checkbox_id` and build its status.
///
/// `None` when the checkbox is absent.
pub fn restyle_note(doc: &mut Document, checkbox_id: &str) -> Option<NoteStatus> {
    let checked = doc.is_checked(checkbox_id)?;
    let note_id = doc.data(checkbox_id, "id").unwrap_or_default();

    if let Some(item) = doc.closest(checkbox_id, |el| el.tag == "li") {
        let text = doc.query(&item, |el| el.has_class("note-text")).into_iter().next();
        let badge = first_child_span(doc, &item);
        let (text_color, badge_color) = if checked {
            (DONE_COLOR, DONE_COLOR)
        } else {
            (PENDING_TEXT_COLOR, PENDING_BADGE_COLOR)
        };
        if let Some(text) = text {
            doc.set_style(&text, "color", text_color);
        }
        if let Some(badge) = badge {
            doc.set_style(&badge, "background", badge_color);
        }
    }

    Some(NoteStatus::from_checked(note_id, checked))
}

/// First `span` in `scope` (or below) that is the first child of its parent.
fn first_child_span(doc: &Document, scope: &str) -> Option<String> {
    std::iter::once(scope.to_string())
        .chain(doc.query(scope, |_| true))
        .find_map(|parent| {
            doc.children_ids(&parent)
                .into_iter()
                .next()
                .filter(|first| doc.get(first).is_some_and(|el| el.tag == "span"))
        })
}
