//! Error types

use std::path::PathBuf;

use carepage::PageError;
use carepage_client::ClientError;

/// Errors raised while parsing an interaction script.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: `{command}` expects {expected}")]
    MissingArgument {
        line: usize,
        command: String,
        expected: &'static str,
    },

    #[error("line {line}: invalid value `{value}`, expected {expected}")]
    InvalidArgument {
        line: usize,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid page description: {0}")]
    PageFile(#[source] serde_json::Error),

    #[error("invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error("{}", .0.user_message())]
    Page(#[from] PageError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("`{0}` needs a backend, pass --base-url")]
    NoBackend(&'static str),

    #[error("`{command}` is not available on a {kind} page")]
    Unsupported {
        command: &'static str,
        kind: &'static str,
    },

    #[error("`{0}` is not a row action button")]
    NotARowButton(String),
}
