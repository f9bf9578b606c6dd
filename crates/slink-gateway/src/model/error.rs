use serde::Serialize;

use crate::render::Document;

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable status text, e.g. "Invalid request.".
    pub status: &'static str,
    /// What went wrong with this request.
    pub error: String,
}

impl Document for ErrorResponse {
    const ROOT: &'static str = "error";
}
