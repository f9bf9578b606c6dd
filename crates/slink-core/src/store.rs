use crate::error::Result;
use crate::link::{Link, NewLink};
use crate::link_id::LinkId;
use async_trait::async_trait;

/// Outcome of [`LinkStore::fetch_or_create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Created {
    /// A fresh id was assigned and the link persisted.
    New(Link),
    /// The URL was already stored; this is the existing link.
    Existing(Link),
}

impl Created {
    pub fn link(&self) -> &Link {
        match self {
            Created::New(link) | Created::Existing(link) => link,
        }
    }

    pub fn into_link(self) -> Link {
        match self {
            Created::New(link) | Created::Existing(link) => link,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Created::New(_))
    }
}

/// The link storage contract the HTTP layer is written against.
///
/// Duplicate URLs dedupe: storing a URL that is already present returns
/// the existing link instead of minting a second id.
#[async_trait]
pub trait LinkStore: Send + Sync + 'static {
    /// Returns the link already stored for the URL, or assigns a fresh
    /// unique id and persists it.
    async fn fetch_or_create(&self, link: NewLink) -> Result<Created>;

    /// Stores `link` and returns it with its assigned id.
    async fn create(&self, link: NewLink) -> Result<Link> {
        self.fetch_or_create(link).await.map(Created::into_link)
    }

    /// Returns the link whose id matches exactly, or `LinkError::NotFound`.
    async fn fetch_by_id(&self, id: &LinkId) -> Result<Link>;
}
