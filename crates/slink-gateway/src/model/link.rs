use serde::Serialize;
use slink_core::Link;

use crate::render::Document;

/// A link as returned to clients.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: String,
    pub url: String,
    /// Derived from the id and the public base URL on every render.
    /// It is never stored.
    pub short_url: String,
}

impl LinkResponse {
    pub fn new(link: &Link, base_url: &str) -> Self {
        Self {
            id: link.id.to_string(),
            url: link.url.to_string(),
            short_url: link.id.to_url(base_url),
        }
    }
}

impl Document for LinkResponse {
    const ROOT: &'static str = "link";
}
