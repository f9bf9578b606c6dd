use axum::http::Uri;
use slink_core::LinkError;

use crate::error::AppError;
use crate::render::Negotiated;

/// `GET /` and `POST /`: there is no listing or bare create at the root.
pub async fn reject_root_handler(Negotiated(format): Negotiated) -> AppError {
    AppError::new(
        LinkError::invalid_request("a link path is required, e.g. POST /new-link or GET /{id}"),
        format,
    )
}

pub async fn fallback_handler(Negotiated(format): Negotiated, uri: Uri) -> AppError {
    AppError::new(LinkError::NotFound(uri.path().to_string()), format)
}
