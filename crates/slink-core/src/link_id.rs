use crate::error::LinkError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The short identifier of a stored link.
///
/// Ids are 1-64 characters long and contain only alphanumeric
/// characters, hyphens, or underscores. They are assigned by the store;
/// clients never choose them.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LinkId(String);

const MIN_LENGTH: usize = 1;
const MAX_LENGTH: usize = 64;

impl LinkId {
    /// Creates a new `LinkId` after validating the input.
    pub fn new(id: impl Into<String>) -> Result<Self, LinkError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Creates a `LinkId` without validation.
    ///
    /// Use this only for ids produced by trusted internal sources
    /// (e.g. generators that are guaranteed to produce valid output).
    pub fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Builds the public short URL for this id under `base_url`.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(id: &str) -> Result<(), LinkError> {
        if id.len() < MIN_LENGTH || id.len() > MAX_LENGTH {
            return Err(LinkError::InvalidRequest(format!(
                "link id length must be between {} and {}, got {}",
                MIN_LENGTH,
                MAX_LENGTH,
                id.len()
            )));
        }

        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(LinkError::InvalidRequest(format!(
                "link id must contain only alphanumeric characters, hyphens, or underscores: '{}'",
                id
            )));
        }

        Ok(())
    }
}

impl TryFrom<String> for LinkId {
    type Error = LinkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LinkId> for String {
    fn from(value: LinkId) -> Self {
        value.0
    }
}

impl Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_ids() {
        assert!(LinkId::new("a").is_ok());
        assert!(LinkId::new("Abc-123_xyz").is_ok());
        assert!(LinkId::new("a".repeat(64)).is_ok());
    }

    #[test]
    fn empty_or_too_long() {
        assert!(LinkId::new("").is_err());
        assert!(LinkId::new("a".repeat(65)).is_err());
    }

    #[test]
    fn invalid_characters() {
        assert!(LinkId::new("abc def").is_err());
        assert!(LinkId::new("abc/def").is_err());
        assert!(LinkId::new("abc.def").is_err());
    }

    #[test]
    fn to_url_joins_base() {
        let id = LinkId::new("abc123").unwrap();
        assert_eq!(id.to_url("https://sl.ink"), "https://sl.ink/abc123");
        assert_eq!(id.to_url("https://sl.ink/"), "https://sl.ink/abc123");
    }

    #[test]
    fn deserialize_rejects_invalid_id() {
        assert!(serde_json::from_str::<LinkId>("\"ok-id\"").is_ok());
        assert!(serde_json::from_str::<LinkId>("\"not ok\"").is_err());
    }
}
