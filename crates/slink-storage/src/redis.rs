use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use redis::Script;
use slink_core::repository::{Inserted, ReadRepository, Repository, Result};
use slink_core::{Link, LinkId, StorageError, TargetUrl};
use tracing::{debug, trace, warn};

pub const DEFAULT_KEY_PREFIX: &str = "slink:";

const STORED: &str = ":stored";
const CONFLICT: &str = ":conflict";

// KEYS: link key, url key. ARGV: url, id.
// Replies with the indexed id, or one of the ':'-prefixed markers (ids
// never contain ':').
const INSERT_SCRIPT: &str = r#"
local existing = redis.call('GET', KEYS[2])
if existing then
    return existing
end
if redis.call('SETNX', KEYS[1], ARGV[1]) == 0 then
    return ':conflict'
end
redis.call('SET', KEYS[2], ARGV[2])
return ':stored'
"#;

/// Redis implementation of the repository contract.
///
/// Each link is stored twice: `{prefix}link:{id}` holds the URL and
/// `{prefix}url:{url}` holds the id. An insert checks the URL index, claims
/// the id key and writes the index in one Lua script. Redis runs scripts
/// atomically, so every process sharing the server sees one id per URL and
/// one URL per id, and a failed insert leaves no keys behind.
#[derive(Debug, Clone)]
pub struct RedisRepository {
    conn: MultiplexedConnection,
    key_prefix: String,
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> StorageError {
    let message = format!("{operation}: {err}");
    if err.is_io_error() || err.is_connection_dropped() {
        StorageError::Unavailable(message)
    } else if err.is_timeout() {
        StorageError::Timeout(message)
    } else {
        StorageError::Query(message)
    }
}

fn map_write_error(operation: &str, err: redis::RedisError) -> StorageError {
    match map_redis_error(operation, err) {
        StorageError::Query(message) => StorageError::PersistFailed(message),
        other => other,
    }
}

impl RedisRepository {
    /// Creates a repository from an existing connection.
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self::with_prefix(conn, DEFAULT_KEY_PREFIX)
    }

    /// Creates a repository with a custom key prefix (e.g., "myapp:").
    pub fn with_prefix(conn: MultiplexedConnection, key_prefix: impl Into<String>) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
        }
    }

    /// Opens a connection to `redis_url` and checks it with `PING`.
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url).map_err(|e| {
            StorageError::Unavailable(format!("invalid redis url '{redis_url}': {e}"))
        })?;
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| StorageError::Unavailable(format!("failed to connect to redis: {e}")))?;

        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| StorageError::Unavailable(format!("redis did not answer PING: {e}")))?;

        debug!("connected to redis");
        Ok(Self::new(conn))
    }

    fn link_key(&self, id: &LinkId) -> String {
        format!("{}link:{}", self.key_prefix, id.as_str())
    }

    fn url_key(&self, url: &TargetUrl) -> String {
        format!("{}url:{}", self.key_prefix, url.as_str())
    }
}

#[async_trait]
impl ReadRepository for RedisRepository {
    async fn get(&self, id: &LinkId) -> Result<Option<Link>> {
        let key = self.link_key(id);
        trace!(id = %id, "fetching link from redis");

        let mut conn = self.conn.clone();
        let stored: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| map_redis_error("failed to fetch link", e))?;

        let Some(raw) = stored else {
            trace!(id = %id, "link not found in redis");
            return Ok(None);
        };

        let url = TargetUrl::parse(&raw).map_err(|e| {
            warn!(id = %id, error = %e, "stored url is invalid");
            StorageError::InvalidData(format!("invalid url under '{key}': {e}"))
        })?;

        Ok(Some(Link {
            id: id.clone(),
            url,
        }))
    }

    async fn find_by_url(&self, url: &TargetUrl) -> Result<Option<Link>> {
        let key = self.url_key(url);

        let mut conn = self.conn.clone();
        let stored: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| map_redis_error("failed to look up url index", e))?;

        let Some(raw) = stored else {
            return Ok(None);
        };

        let id = LinkId::new(raw).map_err(|e| {
            StorageError::InvalidData(format!("invalid id under '{key}': {e}"))
        })?;

        Ok(Some(Link {
            id,
            url: url.clone(),
        }))
    }
}

#[async_trait]
impl Repository for RedisRepository {
    async fn insert(&self, link: &Link) -> Result<Inserted> {
        let mut conn = self.conn.clone();
        let url_key = self.url_key(&link.url);

        let reply: String = Script::new(INSERT_SCRIPT)
            .key(self.link_key(&link.id))
            .key(&url_key)
            .arg(link.url.as_str())
            .arg(link.id.as_str())
            .invoke_async(&mut conn)
            .await
            .map_err(|e| map_write_error("failed to write link", e))?;

        match reply.as_str() {
            STORED => Ok(Inserted::Stored),
            CONFLICT => {
                trace!(id = %link.id, "link id already taken in redis");
                Err(StorageError::Conflict(link.id.to_string()))
            }
            existing => {
                debug!(id = %existing, "url already indexed");
                let id = LinkId::new(existing).map_err(|e| {
                    StorageError::InvalidData(format!("invalid id under '{url_key}': {e}"))
                })?;
                Ok(Inserted::Existing(Link {
                    id,
                    url: link.url.clone(),
                }))
            }
        }
    }
}
