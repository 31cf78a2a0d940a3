//! Filters narrowing the daily recap to one care service.

use std::sync::Arc;
use std::time::Duration;

use pagedom::{Display, Document, EventKind};

/// Selection value matching every service; also tags items meant for everyone.
pub const ALL_SERVICES: &str = "Tous";

pub const SERVICE_SELECT_ID: &str = "serviceSelect";

/// Delay before the first application, once the page has settled.
pub const INITIAL_FILTER_DELAY: Duration = Duration::from_millis(10);

/// Whether an item tagged `tag` is shown when `selected` is chosen.
pub fn service_matches(selected: &str, tag: Option<&str>) -> bool {
    selected == ALL_SERVICES || tag.is_some_and(|tag| tag == selected || tag == ALL_SERVICES)
}

/// Hides card entries of other services, and cards left with nothing visible.
#[derive(Debug, Clone)]
pub struct CardFilter {
    select_id: String,
    card_classes: Vec<String>,
    tag_key: String,
}

impl Default for CardFilter {
    fn default() -> Self {
        Self {
            select_id: SERVICE_SELECT_ID.to_string(),
            card_classes: vec!["cardbox-modern".to_string(), "filterable".to_string()],
            tag_key: "responsable".to_string(),
        }
    }
}

impl CardFilter {
    pub fn apply(&self, doc: &mut Document) -> bool {
        let Some(selected) = doc.value(&self.select_id) else {
            return false;
        };
        let root = doc.root().id.clone();
        let cards = doc.query(&root, |el| self.card_classes.iter().all(|c| el.has_class(c)));

        for card in cards {
            let items = doc.query(&card, |el| el.tag == "li" && el.data.contains_key(&self.tag_key));
            let mut visible = 0;
            for item in items {
                let tag = doc.data(&item, &self.tag_key);
                if service_matches(&selected, tag.as_deref()) {
                    doc.set_display(&item, Display::Unset);
                    visible += 1;
                } else {
                    doc.set_display(&item, Display::None);
                }
            }
            let display = if visible == 0 { Display::None } else { Display::Unset };
            doc.set_display(&card, display);
        }
        true
    }
}

/// Hides notes of other services. Shown notes are laid out as flex rows.
#[derive(Debug, Clone)]
pub struct NoteFilter {
    select_id: String,
    tag_key: String,
}

impl Default for NoteFilter {
    fn default() -> Self {
        Self {
            select_id: SERVICE_SELECT_ID.to_string(),
            tag_key: "service".to_string(),
        }
    }
}

impl NoteFilter {
    pub fn apply(&self, doc: &mut Document) -> bool {
        let Some(selected) = doc.value(&self.select_id) else {
            return false;
        };
        let root = doc.root().id.clone();
        for item in doc.query(&root, |el| el.tag == "li" && el.data.contains_key(&self.tag_key)) {
            let tag = doc.data(&item, &self.tag_key);
            let display = if service_matches(&selected, tag.as_deref()) {
                Display::Flex
            } else {
                Display::None
            };
            doc.set_display(&item, display);
        }
        true
    }
}

/// Apply both filters on every change of the service select. Only the card
/// filter also runs once shortly after wiring. Returns false when the select
/// is absent.
pub fn attach_service_filters(doc: &mut Document, cards: CardFilter, notes: NoteFilter) -> bool {
    if !doc.contains(SERVICE_SELECT_ID) {
        return false;
    }

    let c = cards.clone();
    doc.add_listener(
        SERVICE_SELECT_ID,
        EventKind::Change,
        Arc::new(move |doc, _| {
            c.apply(doc);
            notes.apply(doc);
        }),
    );

    doc.set_timeout(INITIAL_FILTER_DELAY, move |doc| {
        cards.apply(doc);
    });
    true
}
