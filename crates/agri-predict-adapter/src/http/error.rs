/*
[INPUT]:  Error sources (HTTP, backend status, serialization, form input)
[OUTPUT]: Structured error types with user-facing messages
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or changing user-facing messages
*/

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::TaskKind;

/// Raw transport failure. Kept as the source of domain errors for logs.
#[derive(Error, Debug)]
pub enum TransportError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status
    #[error("API error (code {code}): {message}")]
    Api { code: u16, message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Call ended without a response (task panicked or was aborted)
    #[error("Call interrupted: {0}")]
    Interrupted(String),
}

impl TransportError {
    /// Create an API error from status code and body
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        TransportError::Api {
            code: status.as_u16(),
            message: message.into(),
        }
    }
}

/// Main error type for agri-predict
#[derive(Error, Debug)]
pub enum AgriError {
    /// Required field left empty, or no image selected
    #[error("{field} is required")]
    MissingInput { field: &'static str },

    /// Non-empty field that is not a finite number
    #[error("{field} must be a number, got {value:?}")]
    InvalidInput { field: &'static str, value: String },

    /// Field name not present on the task's form
    #[error("{task} has no field named {field:?}")]
    UnknownField { task: TaskKind, field: String },

    /// Prediction call failed; only the task's generic message is displayed
    #[error("{}", failure_message(.task))]
    PredictionUnavailable {
        task: TaskKind,
        #[source]
        source: TransportError,
    },

    /// Advice call failed; logged, never shown
    #[error("Recommendation unavailable")]
    RecommendationUnavailable {
        #[source]
        source: TransportError,
    },

    /// Call outside the prediction and advice flows failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Client construction failed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AgriError {
    /// Input errors block submission locally and never reach the network
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AgriError::MissingInput { .. }
                | AgriError::InvalidInput { .. }
                | AgriError::UnknownField { .. }
        )
    }

    /// Field named by an input error
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AgriError::MissingInput { field } | AgriError::InvalidInput { field, .. } => {
                Some(*field)
            }
            _ => None,
        }
    }
}

fn failure_message(task: &TaskKind) -> &'static str {
    task.failure_message()
}

/// Result type alias for agri-predict operations
pub type Result<T> = std::result::Result<T, AgriError>;
