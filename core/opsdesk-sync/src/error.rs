//! Error types for the console session.

use crate::validation::ValidationError;
use opsdesk_table::TableError;
use opsdesk_types::RowId;
use thiserror::Error;

/// Notice shown when a failed request carries no message of its own.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Result type for console operations.
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Errors that can occur in console operations.
///
/// None of them is fatal to a session: the worst outcome is a stale or empty
/// cache, which [`crate::ConsoleSession::refresh`] recovers from.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// The request never got an answer.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with an error status.
    #[error("backend returned status {status}")]
    Backend {
        status: u16,
        /// Message from the error body, if the backend sent one.
        message: Option<String>,
    },

    /// A response body did not have the expected shape.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The commit payload failed the pre-submit gate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A sort or page request the table rejected.
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// The operation needs an open detail view.
    #[error("no row selected")]
    NoSubject,

    #[error("row not found: {0}")]
    RowNotFound(RowId),

    /// The session was disposed.
    #[error("session disposed")]
    Disposed,
}

impl ConsoleError {
    /// Text to surface to the operator: the backend's own message when it
    /// sent one, otherwise a generic notice.
    pub fn user_message(&self) -> String {
        match self {
            Self::Backend {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            Self::Validation(err) => err.to_string(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}
