use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("timeout")]
    Timeout,
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    #[error("json error: {0}")]
    Serde(String),
    #[error("missing api token: ADMIN_API_TOKEN not configured")]
    MissingToken,
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    pub(crate) fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::NOT_FOUND => Self::NotFound,
            s => Self::Http {
                status: s.as_u16(),
                body,
            },
        }
    }

    /// Text suitable for an error notification.
    ///
    /// Prefers the server's own `message` field when the error body carries one.
    pub fn user_message(&self) -> String {
        if let Self::Http { body, .. } = self
            && let Ok(value) = serde_json::from_str::<serde_json::Value>(body)
            && let Some(message) = value.get("message").and_then(|m| m.as_str())
            && !message.trim().is_empty()
        {
            return message.to_string();
        }

        match self {
            Self::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
            Self::NotFound => "The requested record no longer exists.".to_string(),
            Self::Transport(_) | Self::Timeout => {
                "Could not reach the server. Check your connection.".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub(crate) fn map_reqwest_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::Transport(e.to_string())
    }
}
