use crate::error::LinkError;
use crate::link_id::LinkId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A destination URL that passed syntax validation.
///
/// The original string is kept as submitted; parsing only checks it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TargetUrl(String);

impl TargetUrl {
    /// Validates `raw` as an absolute URL with a scheme and a host.
    ///
    /// Surrounding whitespace is trimmed. Reachability is not checked.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, LinkError> {
        let raw = raw.as_ref().trim();
        if raw.is_empty() {
            return Err(LinkError::invalid_request("missing required URL field"));
        }

        let parsed = url::Url::parse(raw)
            .map_err(|e| LinkError::InvalidRequest(format!("malformed URL: {e}")))?;

        if !parsed.has_host() {
            return Err(LinkError::InvalidRequest(format!(
                "malformed URL: '{raw}' has no host"
            )));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TargetUrl {
    type Error = LinkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<TargetUrl> for String {
    fn from(value: TargetUrl) -> Self {
        value.0
    }
}

impl Display for TargetUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored link: an identifier and the URL it redirects to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    pub url: TargetUrl,
}

/// A validated request to store a URL. It carries no id: the store assigns one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub url: TargetUrl,
}

impl NewLink {
    pub fn new(url: TargetUrl) -> Self {
        Self { url }
    }

    /// Attaches a store-assigned id.
    pub fn with_id(self, id: LinkId) -> Link {
        Link { id, url: self.url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn accepts_absolute_urls() {
        assert!(TargetUrl::parse("https://example.com").is_ok());
        assert!(TargetUrl::parse("http://localhost:8080/a?b=c#d").is_ok());
        assert!(TargetUrl::parse("ftp://files.example.org/pub").is_ok());
    }

    #[test]
    fn keeps_the_submitted_string() {
        let url = TargetUrl::parse("  https://example.com  ").unwrap();
        assert_eq!(url.as_str(), "https://example.com");
    }

    #[test]
    fn empty_is_missing() {
        let err = TargetUrl::parse("   ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        assert_eq!(err.to_string(), "missing required URL field");
    }

    #[test]
    fn rejects_malformed_urls() {
        for raw in ["not a url", "example.com", "/relative/path", "mailto:someone@example.com"] {
            let err = TargetUrl::parse(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidRequest, "{raw}");
            assert!(err.to_string().starts_with("malformed URL"), "{raw}");
        }
    }

    #[test]
    fn link_serializes_as_plain_strings() {
        let link = NewLink::new(TargetUrl::parse("https://example.com").unwrap())
            .with_id(LinkId::new("abc").unwrap());

        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "abc", "url": "https://example.com"})
        );
    }
}
