//! Response rendering and content negotiation.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

const JSON_CONTENT_TYPE: &str = "application/json";
const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";
const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Wire format of a rendered body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Json,
    Xml,
}

/// Picks the response format from an `Accept` header value.
///
/// XML is chosen only when the header names an XML media type and names no
/// JSON media type. Wildcards name neither, so they fall back to JSON.
pub fn negotiate(accept: Option<&str>) -> Format {
    let Some(accept) = accept else {
        return Format::Json;
    };

    let mut names_xml = false;
    let mut names_json = false;

    for range in accept.split(',') {
        let essence = range
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "application/json" => names_json = true,
            "application/xml" | "text/xml" => names_xml = true,
            other if other.ends_with("+json") => names_json = true,
            other if other.ends_with("+xml") => names_xml = true,
            _ => {}
        }
    }

    if names_xml && !names_json {
        Format::Xml
    } else {
        Format::Json
    }
}

/// Negotiates the response format from the request's `Accept` header.
#[derive(Debug, Clone, Copy)]
pub struct Negotiated(pub Format);

impl Negotiated {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self(negotiate(
            headers.get(ACCEPT).and_then(|value| value.to_str().ok()),
        ))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Negotiated {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

/// A response body that can be rendered as JSON or XML.
pub trait Document: Serialize {
    /// Root element name used for XML.
    const ROOT: &'static str;
}

/// A status, a format and a body: everything needed to answer a request.
#[derive(Debug)]
pub struct Rendered<T> {
    pub status: StatusCode,
    pub format: Format,
    pub body: T,
}

impl<T: Document> Rendered<T> {
    pub fn new(status: StatusCode, format: Format, body: T) -> Self {
        Self {
            status,
            format,
            body,
        }
    }

    fn encode(&self) -> Result<String, String> {
        match self.format {
            Format::Json => serde_json::to_string(&self.body).map_err(|e| e.to_string()),
            Format::Xml => quick_xml::se::to_string_with_root(T::ROOT, &self.body)
                .map(|xml| format!("{XML_DECLARATION}{xml}"))
                .map_err(|e| e.to_string()),
        }
    }
}

impl<T: Document> IntoResponse for Rendered<T> {
    fn into_response(self) -> Response {
        let content_type = match self.format {
            Format::Json => JSON_CONTENT_TYPE,
            Format::Xml => XML_CONTENT_TYPE,
        };

        match self.encode() {
            Ok(body) => (
                self.status,
                [(CONTENT_TYPE, HeaderValue::from_static(content_type))],
                body,
            )
                .into_response(),
            Err(e) => {
                error!(error = %e, root = T::ROOT, "failed to render response body");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_wildcard_accept_is_json() {
        assert_eq!(negotiate(None), Format::Json);
        assert_eq!(negotiate(Some("")), Format::Json);
        assert_eq!(negotiate(Some("*/*")), Format::Json);
        assert_eq!(negotiate(Some("text/html")), Format::Json);
    }

    #[test]
    fn xml_only_is_xml() {
        assert_eq!(negotiate(Some("application/xml")), Format::Xml);
        assert_eq!(negotiate(Some("text/xml")), Format::Xml);
        assert_eq!(negotiate(Some("application/atom+xml")), Format::Xml);
        assert_eq!(negotiate(Some("Application/XML; q=0.9, */*;q=0.1")), Format::Xml);
    }

    #[test]
    fn json_wins_when_both_are_named() {
        assert_eq!(
            negotiate(Some("application/xml, application/json")),
            Format::Json
        );
        assert_eq!(
            negotiate(Some("text/xml;q=1.0, application/problem+json;q=0.5")),
            Format::Json
        );
    }

    #[derive(Serialize)]
    struct Sample {
        id: &'static str,
        url: &'static str,
    }

    impl Document for Sample {
        const ROOT: &'static str = "sample";
    }

    #[test]
    fn xml_encoding_escapes_and_wraps_in_root() {
        let rendered = Rendered::new(
            StatusCode::OK,
            Format::Xml,
            Sample {
                id: "abc",
                url: "https://example.com/?a=1&b=2",
            },
        );

        let xml = rendered.encode().unwrap();
        assert_eq!(
            xml,
            format!(
                "{XML_DECLARATION}<sample><id>abc</id><url>https://example.com/?a=1&amp;b=2</url></sample>"
            )
        );
    }

    #[test]
    fn json_encoding() {
        let rendered = Rendered::new(
            StatusCode::OK,
            Format::Json,
            Sample {
                id: "abc",
                url: "https://example.com",
            },
        );

        assert_eq!(
            rendered.encode().unwrap(),
            r#"{"id":"abc","url":"https://example.com"}"#
        );
    }
}
