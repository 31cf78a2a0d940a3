//! The backend seam: everything the pages fetch or submit.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{NoteStatus, RowRequest, StoolSheet};
use crate::widgets::FormFields;

/// Errors a [`ContentSource`] reports.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// Non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never got a response.
    #[error("Network error: {0}")]
    Transport(String),

    /// The response body was not what was expected.
    #[error("Response parse error: {0}")]
    Decode(String),
}

/// Reply to resident admission and departure forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionReply {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Reply carrying a message for the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageReply {
    #[serde(default)]
    pub status: Option<String>,
    pub message: String,
}

#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Recap of the last days, as markup.
    async fn impression(&self) -> Result<String, SourceError>;

    /// Today's stool sheet, as markup.
    async fn stool_sheet(&self) -> Result<String, SourceError>;

    async fn save_stool_sheet(&self, sheet: &StoolSheet) -> Result<MessageReply, SourceError>;

    /// Appointment detail, as markup.
    async fn row_detail(&self, row: &RowRequest) -> Result<String, SourceError>;

    async fn row_detail_alt(&self, row: &RowRequest) -> Result<String, SourceError>;

    /// Appointment sheet, as PDF bytes.
    async fn row_pdf(&self, row: &RowRequest) -> Result<Vec<u8>, SourceError>;

    async fn update_status(&self, status: &NoteStatus) -> Result<serde_json::Value, SourceError>;

    async fn add_resident(&self, fields: &FormFields) -> Result<ActionReply, SourceError>;

    async fn delete_resident(&self, fields: &FormFields) -> Result<ActionReply, SourceError>;

    /// Stool chart figure for the resident `pk`.
    async fn stool_chart(&self, pk: &str) -> Result<serde_json::Value, SourceError>;
}
