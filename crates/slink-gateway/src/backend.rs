//! Storage backend selection from the configured database URL.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use slink_core::{LinkStore, StorageError};
use slink_generator::RandomGenerator;
use slink_shortener::{AllocationPolicy, LinkService};
use slink_storage::{InMemoryRepository, RedisRepository};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("invalid database url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unknown database protocol '{0}:', expected memory: or redis:")]
    UnknownProtocol(String),
    #[error("failed to open storage backend: {0}")]
    Storage(#[from] StorageError),
}

/// The storage backend named by a database URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// `memory://`: links live in this process and vanish on exit.
    InMemory,
    /// `redis://` or `rediss://`: the full connection URL.
    Redis(String),
}

impl StorageBackend {
    /// Picks the backend from the URL scheme.
    pub fn from_database_url(database_url: &str) -> Result<Self, BackendError> {
        let parsed = url::Url::parse(database_url).map_err(|source| BackendError::InvalidUrl {
            url: database_url.to_string(),
            source,
        })?;

        match parsed.scheme() {
            "memory" => Ok(Self::InMemory),
            "redis" | "rediss" => Ok(Self::Redis(database_url.to_string())),
            other => Err(BackendError::UnknownProtocol(other.to_string())),
        }
    }

    /// Opens the backend and wraps it in a [`LinkService`].
    ///
    /// Fails if a remote backend cannot be reached.
    pub async fn connect(
        self,
        generator: RandomGenerator,
        policy: AllocationPolicy,
    ) -> Result<Arc<dyn LinkStore>, BackendError> {
        let store: Arc<dyn LinkStore> = match self {
            Self::InMemory => Arc::new(LinkService::with_policy(
                InMemoryRepository::new(),
                generator,
                policy,
            )),
            Self::Redis(redis_url) => {
                let repository = RedisRepository::connect(&redis_url).await?;
                Arc::new(LinkService::with_policy(repository, generator, policy))
            }
        };

        Ok(store)
    }
}

// Never prints the URL: it may carry credentials.
impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::InMemory => write!(f, "in-memory"),
            StorageBackend::Redis(_) => write!(f, "redis"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slink_core::{NewLink, TargetUrl};

    #[test]
    fn scheme_selects_backend() {
        assert_eq!(
            StorageBackend::from_database_url("memory://").unwrap(),
            StorageBackend::InMemory
        );
        assert_eq!(
            StorageBackend::from_database_url("memory:").unwrap(),
            StorageBackend::InMemory
        );
        assert_eq!(
            StorageBackend::from_database_url("redis://:secret@127.0.0.1:6379/0").unwrap(),
            StorageBackend::Redis("redis://:secret@127.0.0.1:6379/0".to_string())
        );
    }

    #[test]
    fn unknown_scheme_is_rejected() {
        let err = StorageBackend::from_database_url("sqlite://links.db").unwrap_err();
        assert!(matches!(err, BackendError::UnknownProtocol(ref s) if s == "sqlite"));

        let err = StorageBackend::from_database_url("not a url").unwrap_err();
        assert!(matches!(err, BackendError::InvalidUrl { .. }));
    }

    #[test]
    fn display_hides_credentials() {
        let backend = StorageBackend::Redis("redis://:secret@host".to_string());
        assert_eq!(backend.to_string(), "redis");
    }

    #[tokio::test]
    async fn in_memory_backend_stores_links() {
        let store = StorageBackend::InMemory
            .connect(RandomGenerator::default(), AllocationPolicy::default())
            .await
            .unwrap();

        let link = store
            .create(NewLink::new(TargetUrl::parse("https://example.com").unwrap()))
            .await
            .unwrap();
        let fetched = store.fetch_by_id(&link.id).await.unwrap();
        assert_eq!(fetched, link);
    }
}
