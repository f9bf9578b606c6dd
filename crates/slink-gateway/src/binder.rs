//! Decoding and validation of create requests.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use serde::Deserialize;
use slink_core::{LinkError, NewLink, TargetUrl};

use crate::error::AppError;
use crate::render::Negotiated;

/// Fields accepted in a create request.
///
/// Only `url` is read. Anything else, including an `id`, is dropped during
/// decoding: ids are always assigned by the store.
#[derive(Debug, Default, Deserialize)]
struct CreateLinkPayload {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PayloadFormat {
    Json,
    Form,
}

fn payload_format(content_type: Option<&str>) -> Result<PayloadFormat, LinkError> {
    let Some(content_type) = content_type else {
        return Ok(PayloadFormat::Json);
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.as_str() {
        "" | "application/json" => Ok(PayloadFormat::Json),
        "application/x-www-form-urlencoded" => Ok(PayloadFormat::Form),
        other if other.ends_with("+json") => Ok(PayloadFormat::Json),
        other => Err(LinkError::InvalidRequest(format!(
            "unsupported content type '{other}', expected application/json or application/x-www-form-urlencoded"
        ))),
    }
}

/// Decodes `body` according to `content_type` and validates it into a [`NewLink`].
///
/// A missing content type is read as JSON.
pub fn bind(content_type: Option<&str>, body: &[u8]) -> Result<NewLink, LinkError> {
    let payload: CreateLinkPayload = match payload_format(content_type)? {
        PayloadFormat::Json if body.iter().all(u8::is_ascii_whitespace) => {
            CreateLinkPayload::default()
        }
        PayloadFormat::Json => serde_json::from_slice(body)
            .map_err(|e| LinkError::InvalidRequest(format!("malformed JSON body: {e}")))?,
        PayloadFormat::Form => serde_urlencoded::from_bytes(body)
            .map_err(|e| LinkError::InvalidRequest(format!("malformed form body: {e}")))?,
    };

    let url = payload
        .url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| LinkError::invalid_request("missing required URL field"))?;

    TargetUrl::parse(url).map(NewLink::new)
}

/// Extracts a validated [`NewLink`] from a create request.
#[derive(Debug)]
pub struct LinkPayload(pub NewLink);

impl<S: Send + Sync> FromRequest<S> for LinkPayload {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Negotiated(format) = Negotiated::from_headers(req.headers());
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let body = Bytes::from_request(req, state).await.map_err(|e| {
            AppError::new(
                LinkError::InvalidRequest(format!("failed to read request body: {e}")),
                format,
            )
        })?;

        bind(content_type.as_deref(), &body)
            .map(LinkPayload)
            .map_err(|e| AppError::new(e, format))
    }
}
