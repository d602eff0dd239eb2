use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rblog_types::post::PostIdError;
use serde::Serialize;

/// JSON body of every error response: `{ "error": "..." }`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] PostIdError),

    #[error("Upstream error: {0}")]
    Upstream(#[from] rblog_api::error::Error),
}

/// What went wrong, as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    BadShape,
    UpstreamStatus,
    UpstreamUnreachable,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        use rblog_api::error::Error;
        match self {
            AppError::InvalidInput(_) => ErrorKind::InvalidInput,
            AppError::Upstream(e) if e.is_not_found() => ErrorKind::NotFound,
            AppError::Upstream(e) if e.is_unreachable() => ErrorKind::UpstreamUnreachable,
            AppError::Upstream(Error::StatusCode(_)) => ErrorKind::UpstreamStatus,
            AppError::Upstream(_) => ErrorKind::BadShape,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::BadShape | ErrorKind::UpstreamStatus | ErrorKind::UpstreamUnreachable => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use rblog_api::error::Error;

    use super::*;

    #[test]
    fn test_statuses() {
        let err = AppError::from(PostIdError::Missing);
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = AppError::from(Error::NotFound("/api/v1/blog/content?id=1".to_string()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err = AppError::from(Error::StatusCode(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(err.kind(), ErrorKind::UpstreamStatus);
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);

        let err = AppError::from(Error::InvalidResponse("Envelope has no payload".to_string()));
        assert_eq!(err.kind(), ErrorKind::BadShape);
    }
}
