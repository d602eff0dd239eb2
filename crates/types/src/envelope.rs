use serde::{Deserialize, Serialize};

/// The wrapper every JSON endpoint of the blog backend answers with:
/// `{ "data": { "code": 200, "list": ... } }`.
/// The backend always replies with HTTP 200 and signals failure through `code`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub data: EnvelopeData<T>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EnvelopeData<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    #[error("Record not found")]
    NotFound,

    #[error("Backend reported code {0}")]
    Code(u16),

    #[error("Envelope has no payload")]
    MissingPayload,
}

impl<T> Envelope<T> {
    pub const CODE_OK: u16 = 200;
    pub const CODE_NOT_FOUND: u16 = 404;

    /// Unwraps the payload. A missing `code` is accepted as long as `list` is present.
    pub fn into_payload(self) -> Result<T, EnvelopeError> {
        match self.data.code {
            Some(Self::CODE_NOT_FOUND) => return Err(EnvelopeError::NotFound),
            Some(code) if code != Self::CODE_OK => return Err(EnvelopeError::Code(code)),
            _ => {}
        }
        self.data.list.ok_or(EnvelopeError::MissingPayload)
    }
}
