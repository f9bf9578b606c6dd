use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use slink_core::{ErrorKind, LinkError};
use tracing::{debug, error};

use crate::model::ErrorResponse;
use crate::render::{Format, Rendered};

pub type Result<T> = std::result::Result<T, AppError>;

/// A request failure together with the format the client asked for.
///
/// This is the only place a [`LinkError`] turns into a status code.
#[derive(Debug)]
pub struct AppError {
    error: LinkError,
    format: Format,
}

impl AppError {
    pub fn new(error: LinkError, format: Format) -> Self {
        Self { error, format }
    }

    pub fn error(&self) -> &LinkError {
        &self.error
    }

    pub fn status(&self) -> StatusCode {
        status_for(self.error.kind())
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::StorageUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::PersistFailed => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn status_text(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::InvalidRequest => "Invalid request.",
        ErrorKind::NotFound => "Resource not found.",
        ErrorKind::StorageUnavailable => "Service unavailable.",
        ErrorKind::PersistFailed => "Internal server error.",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.error.kind();
        let status = status_for(kind);

        // Backend details stay in the logs.
        let message = match &self.error {
            LinkError::StorageUnavailable(detail) => {
                error!(error = %detail, "storage backend unavailable");
                "storage backend is unavailable, try again later".to_string()
            }
            LinkError::PersistFailed(detail) => {
                error!(error = %detail, "failed to persist link");
                "the link could not be stored".to_string()
            }
            other => {
                debug!(status = %status, error = %other, "rejecting request");
                other.to_string()
            }
        };

        Rendered::new(
            status,
            self.format,
            ErrorResponse {
                status: status_text(kind),
                error: message,
            },
        )
        .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (LinkError::invalid_request("x"), StatusCode::BAD_REQUEST),
            (LinkError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (
                LinkError::StorageUnavailable("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                LinkError::PersistFailed("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let response = AppError::new(error, Format::Json).into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
