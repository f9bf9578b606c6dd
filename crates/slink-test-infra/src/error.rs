use thiserror::Error;

/// Failures while standing up a disposable backing service.
#[derive(Debug, Error)]
pub enum TestInfraError {
    /// The container could not be started, or its host or port looked up.
    #[error("test container failed: {0}")]
    Container(#[from] testcontainers::TestcontainersError),

    /// The server is up but the Redis client could not reach it.
    #[error("redis client failed: {0}")]
    Redis(#[from] redis::RedisError),
}

pub type Result<T> = std::result::Result<T, TestInfraError>;
