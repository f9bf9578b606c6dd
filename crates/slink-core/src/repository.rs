use crate::error::StorageError;
use crate::link::{Link, TargetUrl};
use crate::link_id::LinkId;
use async_trait::async_trait;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Read operations of a storage backend.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the link stored under `id`.
    /// Returns `None` if the id does not exist.
    async fn get(&self, id: &LinkId) -> Result<Option<Link>>;

    /// Looks up the link already stored for `url`, if any.
    async fn find_by_url(&self, url: &TargetUrl) -> Result<Option<Link>>;
}

/// Outcome of [`Repository::insert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inserted {
    /// The link was written under its id.
    Stored,
    /// The URL was already indexed; nothing was written.
    Existing(Link),
}

/// A storage backend.
///
/// Implementations never overwrite. `insert` checks the URL index, claims
/// the id and indexes the URL as one atomic step, so dedup and id
/// uniqueness hold across every writer sharing the backend.
#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new link.
    ///
    /// Returns `Inserted::Existing` if the URL is already stored, and
    /// `Err(Conflict)` if the id is taken by another URL.
    async fn insert(&self, link: &Link) -> Result<Inserted>;
}
