use async_trait::async_trait;
use parking_lot::RwLock;
use slink_core::repository::{Inserted, ReadRepository, Repository, Result};
use slink_core::{Link, LinkId, StorageError, TargetUrl};
use std::collections::{BTreeMap, HashMap};
use tracing::trace;

#[derive(Debug, Default)]
struct Tables {
    links: BTreeMap<LinkId, TargetUrl>,
    by_url: HashMap<TargetUrl, LinkId>,
}

/// In-memory implementation of the Repository trait.
///
/// Links live in an ordered map keyed by id, with a URL index next to it.
/// Both sit behind a single lock so an insert updates them together.
/// Each instance owns its data; nothing is shared between instances.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.tables.read().links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, id: &LinkId) -> Result<Option<Link>> {
        let tables = self.tables.read();
        Ok(tables.links.get(id).map(|url| Link {
            id: id.clone(),
            url: url.clone(),
        }))
    }

    async fn find_by_url(&self, url: &TargetUrl) -> Result<Option<Link>> {
        let tables = self.tables.read();
        Ok(tables.by_url.get(url).map(|id| Link {
            id: id.clone(),
            url: url.clone(),
        }))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, link: &Link) -> Result<Inserted> {
        let mut tables = self.tables.write();

        if let Some(id) = tables.by_url.get(&link.url) {
            trace!(id = %id, "url already stored");
            return Ok(Inserted::Existing(Link {
                id: id.clone(),
                url: link.url.clone(),
            }));
        }

        if tables.links.contains_key(&link.id) {
            trace!(id = %link.id, "link id already taken");
            return Err(StorageError::Conflict(link.id.to_string()));
        }

        tables.links.insert(link.id.clone(), link.url.clone());
        tables.by_url.insert(link.url.clone(), link.id.clone());
        Ok(Inserted::Stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(id: &str, url: &str) -> Link {
        Link {
            id: LinkId::new_unchecked(id),
            url: TargetUrl::parse(url).unwrap(),
        }
    }

    #[tokio::test]
    async fn insert_and_get() {
        let repo = InMemoryRepository::new();

        repo.insert(&link("abc123", "https://example.com"))
            .await
            .unwrap();

        let result = repo
            .get(&LinkId::new_unchecked("abc123"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(result.url.as_str(), "https://example.com");
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let repo = InMemoryRepository::new();

        let result = repo.get(&LinkId::new_unchecked("nope")).await.unwrap();
        assert!(result.is_none());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn insert_conflict_keeps_original() {
        let repo = InMemoryRepository::new();

        repo.insert(&link("abc123", "https://example.com"))
            .await
            .unwrap();

        let err = repo
            .insert(&link("abc123", "https://other.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));

        let stored = repo
            .get(&LinkId::new_unchecked("abc123"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.url.as_str(), "https://example.com");
        assert!(repo
            .find_by_url(&TargetUrl::parse("https://other.com").unwrap())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn insert_of_stored_url_returns_existing_link() {
        let repo = InMemoryRepository::new();

        let first = link("first", "https://example.com");
        assert_eq!(repo.insert(&first).await.unwrap(), Inserted::Stored);
        assert_eq!(
            repo.insert(&link("second", "https://example.com"))
                .await
                .unwrap(),
            Inserted::Existing(first.clone())
        );

        assert!(repo
            .get(&LinkId::new_unchecked("second"))
            .await
            .unwrap()
            .is_none());
        let found = repo
            .find_by_url(&TargetUrl::parse("https://example.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found, first);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_access() {
        use std::sync::Arc;

        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..10u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                let l = link(
                    &format!("code-{:03}", i),
                    &format!("https://example{}.com", i),
                );
                repo.insert(&l).await.unwrap();
            }));
        }

        for i in 0..10u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                let _ = repo.get(&LinkId::new_unchecked(format!("code-{:03}", i))).await;
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        for i in 0..10u64 {
            let id = LinkId::new_unchecked(format!("code-{:03}", i));
            let result = repo.get(&id).await.unwrap().unwrap();
            assert_eq!(result.url.as_str(), format!("https://example{}.com", i));
        }
    }
}
