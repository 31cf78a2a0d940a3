//! Two-way visibility switches.

use std::sync::Arc;

use pagedom::{Display, Document, EventKind};

pub const SHOW_CALENDAR_LABEL: &str = "Afficher le calendrier";
pub const SHOW_TABLE_LABEL: &str = "Afficher la table";

/// Swaps the planning table and the calendar.
#[derive(Debug, Clone)]
pub struct ViewToggle {
    table_id: String,
    calendar_id: String,
}

impl Default for ViewToggle {
    fn default() -> Self {
        Self::new("fiche-planning_id", "calendar")
    }
}

impl ViewToggle {
    pub fn new(table_id: impl Into<String>, calendar_id: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
            calendar_id: calendar_id.into(),
        }
    }

    /// Flip which view is shown and relabel `button_id` to offer the other one.
    pub fn toggle(&self, doc: &mut Document, button_id: &str) -> bool {
        let Some(table) = doc.display(&self.table_id) else {
            return false;
        };
        if !doc.contains(&self.calendar_id) {
            return false;
        }

        if table.is_hidden() {
            doc.set_display(&self.table_id, Display::Block);
            doc.set_display(&self.calendar_id, Display::None);
            doc.set_text(button_id, SHOW_CALENDAR_LABEL);
        } else {
            doc.set_display(&self.table_id, Display::None);
            doc.set_display(&self.calendar_id, Display::Block);
            doc.set_text(button_id, SHOW_TABLE_LABEL);
        }
        true
    }

    /// Toggle on every click of `button_id`.
    pub fn bind(&self, doc: &mut Document, button_id: &str) -> bool {
        let this = self.clone();
        let button = button_id.to_string();
        doc.add_listener(
            button_id,
            EventKind::Click,
            Arc::new(move |doc, _| {
                this.toggle(doc, &button);
            }),
        )
    }
}

/// A checkbox switching between two panes, each with its own label.
#[derive(Debug, Clone)]
pub struct PaneSwitch {
    switch_id: String,
    checked_pane: String,
    unchecked_pane: String,
    checked_label: String,
    unchecked_label: String,
}

impl PaneSwitch {
    pub fn new(
        switch_id: impl Into<String>,
        checked: (impl Into<String>, impl Into<String>),
        unchecked: (impl Into<String>, impl Into<String>),
    ) -> Self {
        Self {
            switch_id: switch_id.into(),
            checked_pane: checked.0.into(),
            checked_label: checked.1.into(),
            unchecked_pane: unchecked.0.into(),
            unchecked_label: unchecked.1.into(),
        }
    }

    /// Stool recap: today's records versus the last days.
    pub fn stool_recap() -> Self {
        Self::new(
            "sellesSliderSwitch",
            ("sellesContentNormal", "sliderLabelAuj"),
            ("sellesContentDerniersJours", "sliderLabelDerniers"),
        )
    }

    pub fn apply(&self, doc: &mut Document) -> bool {
        let Some(checked) = doc.is_checked(&self.switch_id) else {
            return false;
        };
        let (shown, hidden) = if checked {
            (
                [&self.checked_pane, &self.checked_label],
                [&self.unchecked_pane, &self.unchecked_label],
            )
        } else {
            (
                [&self.unchecked_pane, &self.unchecked_label],
                [&self.checked_pane, &self.checked_label],
            )
        };
        for id in shown {
            doc.set_display(id, Display::Unset);
        }
        for id in hidden {
            doc.set_display(id, Display::None);
        }
        true
    }

    /// Re-apply on every change of the switch, and once now.
    /// Returns `None` when the switch is absent.
    pub fn attach(doc: &mut Document, switch: PaneSwitch) -> Option<Self> {
        if !doc.contains(&switch.switch_id) {
            return None;
        }
        let this = switch.clone();
        doc.add_listener(
            &switch.switch_id,
            EventKind::Change,
            Arc::new(move |doc, _| {
                this.apply(doc);
            }),
        );
        switch.apply(doc);
        Some(switch)
    }
}
