use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response (offline, CORS, aborted).
    #[error("Network error: {0}")]
    Transport(String),

    #[error("HTTP error {status}: {body}")]
    Server { status: u16, body: String },

    /// The server refused a title update with 400.
    #[error("Validation failed: {body}")]
    Validation { body: String },

    #[error("JSON parse error: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Maps a non-2xx response. Only callers that submit user input ask for
    /// 400s to be reported as validation failures.
    pub fn from_status(status: u16, body: String, validates_input: bool) -> Self {
        if validates_input && status == 400 {
            ApiError::Validation { body }
        } else {
            ApiError::Server { status, body }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Validation { .. } => Some(400),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation { .. })
    }

    /// Text shown in notifications: the server's own message when it sent one,
    /// otherwise something derived from the status.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(_) => "No response from server".to_string(),
            ApiError::Decode(_) => "Unexpected response from server".to_string(),
            ApiError::Server { status, body } => {
                server_message(body).unwrap_or_else(|| status_text(*status))
            }
            ApiError::Validation { body } => {
                server_message(body).unwrap_or_else(|| status_text(400))
            }
        }
    }
}

/// Error bodies are sometimes `{"message": "..."}` and sometimes plain text.
fn server_message(body: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        error: Option<String>,
    }

    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => message,
        Ok(ErrorBody {
            error: Some(error), ..
        }) => error,
        _ => body.trim().to_string(),
    };
    Some(message).filter(|m| !m.is_empty())
}

fn status_text(status: u16) -> String {
    let reason = match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        413 => "Payload Too Large",
        415 => "Unsupported Media Type",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Server error",
    };
    format!("{reason} ({status})")
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Transport(other.to_string()),
        }
    }
}
