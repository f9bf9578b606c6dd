use crate::Result;
use std::time::Duration;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};
use typed_builder::TypedBuilder;

#[derive(Debug, Clone, TypedBuilder)]
pub struct RedisConfig {
    #[builder(default = "redis".to_string())]
    image: String,
    #[builder(default = "8.6.0".to_string())]
    tag: String,
    /// Extra startup delay once the readiness line has been logged.
    #[builder(default = Duration::from_millis(200))]
    settle: Duration,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Test fixture for a disposable Redis server.
pub struct RedisServer {
    container: ContainerAsync<GenericImage>,
}

impl RedisServer {
    /// Starts a Redis container and waits until it accepts connections.
    pub async fn new(config: RedisConfig) -> Result<Self> {
        let container = GenericImage::new(config.image.as_str(), config.tag.as_str())
            .with_exposed_port(6379_u16.tcp())
            .with_wait_for(WaitFor::message_on_stdout("Ready to accept connections"))
            .with_startup_timeout(Duration::from_secs(60))
            .start()
            .await?;

        tokio::time::sleep(config.settle).await;

        Ok(Self { container })
    }

    pub async fn host(&self) -> Result<String> {
        let host = self.container.get_host().await?.to_string();

        Ok(match host.as_str() {
            "localhost" => String::from("127.0.0.1"),
            _ => host,
        })
    }

    pub async fn port(&self) -> Result<u16> {
        Ok(self.container.get_host_port_ipv4(6379).await?)
    }

    pub async fn redis_url(&self) -> Result<String> {
        let host = self.host().await?;
        let port = self.port().await?;
        Ok(format!("redis://{}:{}", host, port))
    }

    /// Opens a fresh multiplexed connection to the server.
    pub async fn connection(&self) -> Result<redis::aio::MultiplexedConnection> {
        let client = redis::Client::open(self.redis_url().await?.as_str())?;
        Ok(client.get_multiplexed_async_connection().await?)
    }
}
