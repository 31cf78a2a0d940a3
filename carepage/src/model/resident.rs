use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PageError;

/// Resident attributes sent along with every appointment request.
///
/// Supplied by the page template as structured data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResidentSummary {
    pub nom_resident: String,
    /// `Oui` / `Non`
    pub oxygen: String,
    /// `Oui` / `Non`
    pub diabete: String,
}

/// A planning row merged with the resident summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RowRequest(Map<String, Value>);

impl RowRequest {
    /// Merge `row` with `resident`; resident fields win over same-named row keys.
    pub fn new(row: Map<String, Value>, resident: &ResidentSummary) -> Self {
        let mut fields = row;
        fields.insert("nom_resident".into(), resident.nom_resident.clone().into());
        fields.insert("oxygen".into(), resident.oxygen.clone().into());
        fields.insert("diabete".into(), resident.diabete.clone().into());
        Self(fields)
    }

    /// Parse the JSON object stored in a row button's data attribute.
    pub fn parse(raw: &str, resident: &ResidentSummary) -> Result<Self, PageError> {
        let row: Map<String, Value> =
            serde_json::from_str(raw).map_err(PageError::InvalidRowData)?;
        Ok(Self::new(row, resident))
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}
