use serde::Deserialize;
use thiserror::Error;

/// Closed set of failure kinds the orchestrator switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Missing, expired or rejected credentials; forces re-authentication.
    Unauthorized,
    Validation,
    NotFound,
    Server,
    Network,
    Decode,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub status: Option<u16>,
    pub message: String,
    /// `message` was generated locally because the response body carried none.
    generic: bool,
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Credential-expiry phrasing the backend uses in error bodies.
///
/// Some routes answer an expired token with a non-401 status, so the text is
/// still consulted when classifying.
pub fn mentions_expired_credentials(message: &str) -> bool {
    message.contains("Session expired")
        || message.contains("Token is not valid")
        || message.to_lowercase().contains("token")
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
            generic: false,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, None, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Decode, None, message)
    }

    /// Classify a non-2xx response from its status and raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let reported = parsed
            .message
            .or(parsed.error)
            .filter(|m| !m.trim().is_empty());
        let generic = reported.is_none();
        let message = reported.unwrap_or_else(|| format!("Request failed with status {status}"));

        let kind = match status {
            401 | 403 => ApiErrorKind::Unauthorized,
            _ if mentions_expired_credentials(&message) => ApiErrorKind::Unauthorized,
            400 | 422 => ApiErrorKind::Validation,
            404 => ApiErrorKind::NotFound,
            _ => ApiErrorKind::Server,
        };

        Self {
            generic,
            ..Self::new(kind, Some(status), message)
        }
    }

    /// Message worth showing to the operator, if the failure carried one.
    pub fn reported_message(&self) -> Option<&str> {
        if self.generic || self.message.trim().is_empty() {
            None
        } else {
            Some(&self.message)
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }
}
