use reqwest::StatusCode;
use thiserror::Error;

/// Failure of one admin API request.
///
/// Every variant except [`RequestError::Status`] happens before a response
/// status is known, so [`RequestError::status`] is `None` for them.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),
    #[error("api token contains characters not allowed in a header")]
    InvalidToken,
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error(
        "server responded with status {status}{}",
        .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
    )]
    Status {
        status: u16,
        message: Option<String>,
    },
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl RequestError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable message supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub(super) fn from_response(status: StatusCode, body: &[u8]) -> Self {
        Self::Status {
            status: status.as_u16(),
            message: extract_message(body),
        }
    }
}

const MESSAGE_FIELDS: [&str; 3] = ["message", "errorMessage", "error"];

/// Pull a message out of an error body: a JSON `message`, `errorMessage` or
/// `error` string field, else the trimmed body text when it is not JSON.
pub(crate) fn extract_message(body: &[u8]) -> Option<String> {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        return MESSAGE_FIELDS.iter().find_map(|field| {
            value
                .get(field)
                .and_then(serde_json::Value::as_str)
                .filter(|text| !text.trim().is_empty())
                .map(str::to_string)
        });
    }

    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
