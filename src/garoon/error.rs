use thiserror::Error;

/// Failure taxonomy for Garoon calls. Upstream rejections keep the raw
/// status and body so the calling agent can diagnose what Garoon said.
#[derive(Debug, Error)]
pub enum GaroonError {
    #[error("invalid argument: {0}")]
    Validation(String),

    #[error("authentication rejected by Garoon (status {status}): {body}")]
    Authentication { status: u16, body: String },

    #[error("not found (status {status}): {body}")]
    NotFound { status: u16, body: String },

    #[error("Garoon returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Garoon returned an unparseable body: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("request to Garoon timed out")]
    Timeout,

    #[error("transport failure talking to Garoon: {0}")]
    Transport(#[source] reqwest::Error),
}

impl GaroonError {
    /// Classify a non-2xx upstream response.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => GaroonError::Authentication { status, body },
            404 => GaroonError::NotFound { status, body },
            _ => GaroonError::Upstream { status, body },
        }
    }

    /// Stable error kind reported in tool failure payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            GaroonError::Validation(_) => "ValidationError",
            GaroonError::Authentication { .. } => "AuthenticationError",
            GaroonError::NotFound { .. } => "NotFoundError",
            GaroonError::Upstream { .. } => "UpstreamError",
            GaroonError::MalformedResponse(_) => "MalformedResponseError",
            GaroonError::Timeout => "TimeoutError",
            GaroonError::Transport(_) => "TransportError",
        }
    }

    /// HTTP status of the upstream rejection, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            GaroonError::Authentication { status, .. }
            | GaroonError::NotFound { status, .. }
            | GaroonError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GaroonError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GaroonError::Timeout
        } else {
            GaroonError::Transport(err)
        }
    }
}
