//! Page configuration provided by the template.

use serde::{Deserialize, Serialize};

use crate::error::PageError;
use crate::model::ResidentSummary;

/// Backend paths, relative to the client's base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub impression: String,
    pub update_status: String,
    pub stool_sheet: String,
    pub row_detail: String,
    pub row_detail_alt: String,
    pub row_pdf: String,
    pub add_resident: String,
    pub delete_resident: String,
    pub stool_chart: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            impression: "/impression".to_string(),
            update_status: "/update_status".to_string(),
            stool_sheet: "/enregistre_selles".to_string(),
            row_detail: "/popup_row".to_string(),
            row_detail_alt: "/popup_row_alt".to_string(),
            row_pdf: "/popup_row_pdf".to_string(),
            add_resident: "/add_resident".to_string(),
            delete_resident: "/delete_resident".to_string(),
            stool_chart: "/graphique_selles".to_string(),
        }
    }
}

impl Endpoints {
    /// Mount every path under `prefix` (e.g. `/soins`).
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        let prefix = prefix.trim_end_matches('/');
        for path in [
            &mut self.impression,
            &mut self.update_status,
            &mut self.stool_sheet,
            &mut self.row_detail,
            &mut self.row_detail_alt,
            &mut self.row_pdf,
            &mut self.add_resident,
            &mut self.delete_resident,
            &mut self.stool_chart,
        ] {
            *path = format!("{prefix}{path}");
        }
        self
    }
}

/// One appointment of the resident's planning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningEvent {
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
    #[serde(rename = "Rendez-vous", default)]
    pub title: Option<String>,
    #[serde(rename = "Note", default)]
    pub note: Option<String>,
}

/// Calendar entry derived from a [`PlanningEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    pub title: String,
    pub start: Option<String>,
    pub description: String,
}

impl From<&PlanningEvent> for CalendarEvent {
    fn from(event: &PlanningEvent) -> Self {
        Self {
            title: event
                .title
                .clone()
                .unwrap_or_else(|| "Rendez-vous".to_string()),
            start: event.date.clone(),
            description: event
                .note
                .clone()
                .unwrap_or_else(|| "<Aucun commentaire>".to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub endpoints: Endpoints,
    /// Birth date, `YYYY-MM-DD`.
    pub naissance: Option<String>,
    pub resident: ResidentSummary,
    pub nodes: Vec<PlanningEvent>,
}

impl PageConfig {
    pub fn from_json(raw: &str) -> Result<Self, PageError> {
        serde_json::from_str(raw).map_err(PageError::Config)
    }

    pub fn calendar_events(&self) -> Vec<CalendarEvent> {
        self.nodes.iter().map(CalendarEvent::from).collect()
    }
}
