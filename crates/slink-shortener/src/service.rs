use async_trait::async_trait;
use slink_core::error::Result;
use slink_core::{
    Created, Inserted, Link, LinkError, LinkId, LinkStore, NewLink, Repository, StorageError,
};
use slink_generator::Generator;
use std::sync::Arc;
use tracing::{debug, trace, warn};
use typed_builder::TypedBuilder;

/// How hard the service tries to find a free id for a new link.
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct AllocationPolicy {
    /// Ids drawn per create before giving up. Zero is treated as one.
    #[builder(default = 5)]
    pub max_attempts: u32,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A concrete implementation of the [`LinkStore`] trait.
///
/// This service wraps a `Repository` and a `Generator` to handle:
/// - URL deduplication (a stored URL keeps its first id)
/// - id allocation with retry when a drawn id is already taken
///
/// The service holds no lock of its own. The repository's insert checks
/// the URL and claims the id atomically, so services in different
/// processes sharing one backend still agree on a single id per URL.
#[derive(Debug)]
pub struct LinkService<R, G> {
    repository: Arc<R>,
    generator: G,
    policy: AllocationPolicy,
}

impl<R: Repository, G: Generator> LinkService<R, G> {
    pub fn new(repository: R, generator: G) -> Self {
        Self::with_policy(repository, generator, AllocationPolicy::default())
    }

    pub fn with_policy(repository: R, generator: G, policy: AllocationPolicy) -> Self {
        Self {
            repository: Arc::new(repository),
            generator,
            policy,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    async fn allocate(&self, link: NewLink) -> Result<Created> {
        let attempts = self.policy.max_attempts.max(1);

        for attempt in 1..=attempts {
            let candidate = link.clone().with_id(self.generator.generate().into());

            match self.repository.insert(&candidate).await {
                Ok(Inserted::Stored) => {
                    debug!(id = %candidate.id, attempt, "stored new link");
                    return Ok(Created::New(candidate));
                }
                Ok(Inserted::Existing(existing)) => {
                    debug!(id = %existing.id, "url stored concurrently by another writer");
                    return Ok(Created::Existing(existing));
                }
                Err(StorageError::Conflict(id)) => {
                    debug!(id = %id, attempt, "generated id collided, drawing another");
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(attempts, "no free link id found");
        Err(LinkError::PersistFailed(format!(
            "could not allocate a unique id after {attempts} attempts"
        )))
    }
}

#[async_trait]
impl<R: Repository, G: Generator> LinkStore for LinkService<R, G> {
    async fn fetch_or_create(&self, link: NewLink) -> Result<Created> {
        if let Some(existing) = self.repository.find_by_url(&link.url).await? {
            trace!(id = %existing.id, "url already stored");
            return Ok(Created::Existing(existing));
        }

        self.allocate(link).await
    }

    async fn fetch_by_id(&self, id: &LinkId) -> Result<Link> {
        trace!(id = %id, "fetching link");
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| LinkError::NotFound(id.to_string()))
    }
}
