use serde::Serialize;
use thiserror::Error;

/// Unified extraction error type.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported url: {0}")]
    Unsupported(String),

    /// Failure reported by the site itself; the message is shown to the user as-is.
    #[error("{0}")]
    Expected(String),

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("http status {status}")]
    Http { status: u16 },

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid json: {0}")]
    Json(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl ExtractError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unsupported(_) => "unsupported",
            Self::Expected(_) => "expected",
            Self::MissingField(_) => "missing_field",
            Self::Http { .. } => "http_error",
            Self::Network(_) => "network_error",
            Self::Json(_) => "invalid_json",
            Self::InvalidUrl(_) => "invalid_url",
        }
    }

    /// Errors a batch run reports and moves past without treating as a bug.
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Unsupported(_) | Self::Expected(_))
    }
}

impl From<url::ParseError> for ExtractError {
    fn from(e: url::ParseError) -> Self {
        Self::InvalidUrl(e.to_string())
    }
}

/// JSON error envelope: `{ "error": { "code": "…", "message": "…", "details": {} } }`
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
}

impl ErrorEnvelope {
    /// Attach the offending input so batch output lines can be correlated.
    pub fn for_input(e: &ExtractError, input: &str) -> Self {
        let mut envelope = Self::from(e);
        envelope.error.details = serde_json::json!({ "input": input });
        envelope
    }
}

impl From<&ExtractError> for ErrorEnvelope {
    fn from(e: &ExtractError) -> Self {
        Self {
            error: ErrorBody {
                code: e.code().to_string(),
                message: e.to_string(),
                details: serde_json::Value::Object(serde_json::Map::new()),
            },
        }
    }
}
