//! Planning table filter: upcoming appointments only, or full history with
//! past rows marked.

use std::sync::{Arc, LazyLock};

use chrono::NaiveDate;
use pagedom::{Display, Document, EventKind};
use regex::Regex;

pub const PAST_ROW_CLASS: &str = "past-row";

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})-(\d{2})-(\d{2})").expect("valid regex"));
static FR_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2})/(\d{2})/(\d{4})").expect("valid regex"));

fn date_from(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// Whether a date cell falls on or after `today`.
///
/// Accepts `YYYY-MM-DD` and `DD/MM/YYYY`, anything around them ignored.
/// Empty text is in the past, unrecognised text in the future, and a date
/// of the right shape that does not exist is in the past.
pub fn is_date_in_future(text: &str, today: NaiveDate) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }

    let date = if let Some(caps) = ISO_DATE.captures(text) {
        date_from(&caps[1], &caps[2], &caps[3])
    } else if let Some(caps) = FR_DATE.captures(text) {
        date_from(&caps[3], &caps[2], &caps[1])
    } else {
        return true;
    };

    date.is_some_and(|date| date >= today)
}

#[derive(Debug, Clone)]
pub struct PlanningFilter {
    table_id: String,
    today: NaiveDate,
}

impl PlanningFilter {
    pub fn new(table_id: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            table_id: table_id.into(),
            today,
        }
    }

    pub fn resident_planning(today: NaiveDate) -> Self {
        Self::new("planningTable", today)
    }

    fn section(&self, doc: &Document, tag: &str) -> Vec<String> {
        doc.query(&self.table_id, |el| el.tag == tag)
    }

    /// Index of the first header cell mentioning "date".
    fn date_column(&self, doc: &Document) -> Option<usize> {
        let header_cells: Vec<String> = self
            .section(doc, "thead")
            .iter()
            .flat_map(|thead| doc.query(thead, |el| el.tag == "th"))
            .collect();
        header_cells.iter().position(|th| {
            doc.text_content(th)
                .is_some_and(|text| text.trim().to_lowercase().contains("date"))
        })
    }

    /// Show upcoming rows only, or every row with past ones marked.
    pub fn apply(&self, doc: &mut Document, show_all: bool) -> bool {
        if !doc.contains(&self.table_id) {
            return false;
        }
        let date_column = self.date_column(doc);
        let rows: Vec<String> = self
            .section(doc, "tbody")
            .iter()
            .flat_map(|tbody| doc.children_ids(tbody))
            .filter(|id| doc.get(id).is_some_and(|el| el.tag == "tr"))
            .collect();

        for row in rows {
            let cell_text = date_column
                .and_then(|idx| doc.children_ids(&row).get(idx).cloned())
                .and_then(|cell| doc.text_content(&cell))
                .map(|text| text.trim().to_string())
                .unwrap_or_default();
            let upcoming = is_date_in_future(&cell_text, self.today);

            if show_all {
                doc.set_display(&row, Display::Unset);
                if upcoming {
                    doc.remove_class(&row, PAST_ROW_CLASS);
                } else {
                    doc.add_class(&row, PAST_ROW_CLASS);
                }
            } else {
                doc.remove_class(&row, PAST_ROW_CLASS);
                let display = if upcoming { Display::Unset } else { Display::None };
                doc.set_display(&row, display);
            }
        }
        true
    }

    /// Re-apply with the checkbox state on every change of `checkbox_id`.
    pub fn bind_history_toggle(&self, doc: &mut Document, checkbox_id: &str) -> bool {
        let this = self.clone();
        doc.add_listener(
            checkbox_id,
            EventKind::Change,
            Arc::new(move |doc, event| {
                let show_all = doc.is_checked(event.target()).unwrap_or(false);
                this.apply(doc, show_all);
            }),
        )
    }
}
