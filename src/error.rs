use thiserror::Error;

/// Failure of one REST call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Non-OK status; `message` comes from the `{message}` body when present.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("not logged in")]
    Unauthorized,
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        if status == 401 {
            return ApiError::Unauthorized;
        }
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        ApiError::Rejected { status, message }
    }

    /// Text for the blocking alert shown on business errors.
    pub fn alert_text(&self) -> String {
        format!("Error: {self}")
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Decode(_))
    }
}
