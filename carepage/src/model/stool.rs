//! Daily stool sheet: one row per resident, three time-of-day slots.

use std::collections::BTreeMap;

use pagedom::Document;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeSlot {
    Nuit,
    Matin,
    ApresMidi,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 3] = [TimeSlot::Nuit, TimeSlot::Matin, TimeSlot::ApresMidi];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::Nuit => "nuit",
            TimeSlot::Matin => "matin",
            TimeSlot::ApresMidi => "apres_midi",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoolEntry {
    pub pk: String,
    pub nuit: String,
    pub matin: String,
    pub apres_midi: String,
    pub commentaire: String,
}

impl StoolEntry {
    fn set_slot(&mut self, slot: TimeSlot, value: String) {
        match slot {
            TimeSlot::Nuit => self.nuit = value,
            TimeSlot::Matin => self.matin = value,
            TimeSlot::ApresMidi => self.apres_midi = value,
        }
    }

    pub fn slot(&self, slot: TimeSlot) -> &str {
        match slot {
            TimeSlot::Nuit => &self.nuit,
            TimeSlot::Matin => &self.matin,
            TimeSlot::ApresMidi => &self.apres_midi,
        }
    }
}

/// Entries keyed by resident display name, as the backend expects them.
pub type StoolSheet = BTreeMap<String, StoolEntry>;

/// ID of the select holding `slot` for the resident `pk`.
pub fn slot_select_id(pk: &str, slot: TimeSlot) -> String {
    format!("{}-{}-select", pk.replace(' ', "_"), slot.as_str())
}

/// Read the sheet rendered under `content_id`.
///
/// Each body row gives the name in its first cell, the pk in its last, the
/// slots in the selects named after the pk, and the comment in its first text
/// input. Missing selects or inputs read as empty.
pub fn collect_stool_sheet(doc: &Document, content_id: &str) -> StoolSheet {
    let mut sheet = StoolSheet::new();

    let rows: Vec<String> = doc
        .query(content_id, |el| el.tag == "tbody")
        .iter()
        .flat_map(|tbody| doc.children_ids(tbody))
        .filter(|id| doc.get(id).is_some_and(|el| el.tag == "tr"))
        .collect();

    for row in rows {
        let cells: Vec<String> = doc
            .children_ids(&row)
            .into_iter()
            .filter(|id| doc.get(id).is_some_and(|el| el.tag == "td"))
            .collect();
        let (Some(first), Some(last)) = (cells.first(), cells.last()) else {
            continue;
        };

        let nom = doc.text_content(first).unwrap_or_default().trim().to_string();
        let pk = doc.text_content(last).unwrap_or_default().trim().to_string();

        let mut entry = StoolEntry {
            pk: pk.clone(),
            ..Default::default()
        };
        for slot in TimeSlot::ALL {
            let value = doc.value(&slot_select_id(&pk, slot)).unwrap_or_default();
            entry.set_slot(slot, value);
        }
        entry.commentaire = doc
            .query(&row, |el| {
                el.tag == "input" && el.get_attr("type").is_some_and(|t| t == "text")
            })
            .first()
            .and_then(|input| doc.value(input))
            .unwrap_or_default();

        sheet.insert(nom, entry);
    }

    log::debug!("collect_stool_sheet: {} rows under {}", sheet.len(), content_id);
    sheet
}
