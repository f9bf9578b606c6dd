use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::http::{HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use slink_core::{LinkError, LinkId, TargetUrl};
use tracing::{debug, info};

use crate::binder::LinkPayload;
use crate::error::{AppError, Result};
use crate::model::LinkResponse;
use crate::render::{Negotiated, Rendered};
use crate::state::AppState;

/// `POST /{anything}`: stores the submitted URL and renders the link.
///
/// The path segment is not an id. A URL that is already stored answers
/// with its existing link.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Negotiated(format): Negotiated,
    LinkPayload(link): LinkPayload,
) -> Result<Rendered<LinkResponse>> {
    let created = state
        .store()
        .fetch_or_create(link)
        .await
        .map_err(|e| AppError::new(e, format))?;

    if created.is_new() {
        info!(id = %created.link().id, "created link");
    } else {
        debug!(id = %created.link().id, "url already shortened");
    }

    Ok(Rendered::new(
        StatusCode::CREATED,
        format,
        LinkResponse::new(created.link(), state.base_url()),
    ))
}

/// `GET /{id}`: redirects to the stored URL.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Negotiated(format): Negotiated,
    uri: Uri,
    id: std::result::Result<Path<String>, PathRejection>,
) -> Result<Response> {
    // A segment that does not decode, or is not a valid id, was never issued.
    let not_found = || AppError::new(LinkError::NotFound(uri.path().to_string()), format);
    let Path(id) = id.map_err(|e| {
        debug!(path = %uri.path(), error = %e, "undecodable link path");
        not_found()
    })?;
    let id = LinkId::new(id).map_err(|_| not_found())?;

    let link = state
        .store()
        .fetch_by_id(&id)
        .await
        .map_err(|e| AppError::new(e, format))?;

    debug!(id = %link.id, url = %link.url, "redirecting");
    found(&link.url).map_err(|e| AppError::new(e, format))
}

/// Builds a 302 with the conventional short HTML body.
fn found(url: &TargetUrl) -> std::result::Result<Response, LinkError> {
    let location = location(url)?;
    let body = format!("<a href=\"{}\">Found</a>.\n\n", escape_html(url.as_str()));

    Ok((
        StatusCode::FOUND,
        [
            (LOCATION, location),
            (
                CONTENT_TYPE,
                HeaderValue::from_static("text/html; charset=utf-8"),
            ),
        ],
        body,
    )
        .into_response())
}

/// Header values must be visible ASCII; non-ASCII URLs fall back to
/// their punycode / percent-encoded serialization.
fn location(url: &TargetUrl) -> std::result::Result<HeaderValue, LinkError> {
    if let Ok(value) = HeaderValue::from_str(url.as_str()) {
        return Ok(value);
    }

    url::Url::parse(url.as_str())
        .ok()
        .and_then(|parsed| HeaderValue::from_str(parsed.as_str()).ok())
        .ok_or_else(|| {
            LinkError::PersistFailed(format!("stored url '{url}' is not a valid Location header"))
        })
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
