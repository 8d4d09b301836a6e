use reqwest::StatusCode;
use serde::Deserialize;

/// Failure of a call to the catalog service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx with a JSON body carrying a message.
    #[error("{message} (HTTP {status})")]
    Status { status: StatusCode, message: String },

    /// Non-2xx without a usable body.
    #[error("request failed with HTTP {status}")]
    StatusWithoutMessage { status: StatusCode },

    /// 2xx whose body did not decode into the expected type.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text for the operator notice: the service's own message verbatim when it sent one,
    /// `fallback` otherwise.
    pub fn notice_text(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } | ApiError::StatusWithoutMessage { status } => {
                Some(*status)
            }
            ApiError::Transport(e) => e.status(),
            ApiError::Decode(_) => None,
        }
    }

    /// Classifies a non-2xx response body.
    pub fn from_status_body(status: StatusCode, body: &[u8]) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            #[serde(default)]
            message: Option<String>,
            #[serde(default)]
            error: Option<String>,
        }

        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(ErrorBody {
                message: Some(message),
                ..
            })
            | Ok(ErrorBody {
                message: None,
                error: Some(message),
            }) if !message.trim().is_empty() => ApiError::Status { status, message },
            _ => ApiError::StatusWithoutMessage { status },
        }
    }
}
