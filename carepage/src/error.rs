//! Error types

use crate::source::SourceError;

/// Errors raised by page actions.
///
/// Missing elements are never errors: the corresponding step is skipped.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// A row button carried data that is not a JSON object.
    #[error("invalid row data: {0}")]
    InvalidRowData(#[source] serde_json::Error),

    /// Same as `InvalidRowData`, for the alternate detail button.
    #[error("invalid alternate row data: {0}")]
    InvalidAltRowData(#[source] serde_json::Error),

    /// The template-provided page configuration could not be parsed.
    #[error("invalid page configuration: {0}")]
    Config(#[source] serde_json::Error),

    /// An action needing a resident ran before one was selected.
    #[error("no resident selected")]
    NoResidentSelected,

    /// The backend request failed.
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl PageError {
    /// Message shown to the user for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidRowData(_) => {
                "Erreur lors de l'ouverture de la fiche : données invalides."
            }
            Self::InvalidAltRowData(_) => {
                "Erreur lors de l'ouverture de la fiche (alt) : données invalides."
            }
            Self::Config(_) => "Configuration de la page invalide.",
            Self::NoResidentSelected => "Aucun résident sélectionné",
            Self::Source(_) => "⚠️ Erreur réseau ou serveur.",
        }
    }
}
