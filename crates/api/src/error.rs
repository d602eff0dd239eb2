use rblog_types::envelope::EnvelopeError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("Status code: {0}")]
    StatusCode(reqwest::StatusCode),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Connect and timeout failures, as opposed to a reply the upstream did send.
    pub fn is_unreachable(&self) -> bool {
        match self {
            Error::Reqwest(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

impl From<EnvelopeError> for Error {
    fn from(e: EnvelopeError) -> Self {
        match e {
            EnvelopeError::NotFound => Error::NotFound(e.to_string()),
            _ => Error::InvalidResponse(e.to_string()),
        }
    }
}
