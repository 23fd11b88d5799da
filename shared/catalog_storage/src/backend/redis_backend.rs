//! Redis collection backend

use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, Script};
use tokio::time::timeout;

use super::CollectionBackend;
use crate::store::{CatalogStorageError, CatalogStorageResult};

/// Upper bound on every Redis round trip
const REDIS_TIMEOUT: Duration = Duration::from_secs(3);

/// Sets `KEYS[1]` to `ARGV[3]` only if it still holds `ARGV[1]`
/// (or is absent when `ARGV[2]` is `0`). Returns 1 on write, 0 otherwise.
const COMPARE_AND_SWAP_SCRIPT: &str = r"
local current = redis.call('GET', KEYS[1])
if ARGV[2] == '1' then
    if current ~= ARGV[1] then
        return 0
    end
elseif current then
    return 0
end
redis.call('SET', KEYS[1], ARGV[3])
return 1
";

/// Shared Redis connection, cheap to clone
#[derive(Clone)]
pub struct RedisClient {
    connection_manager: ConnectionManager,
}

impl RedisClient {
    /// Create a new Redis client with connection manager
    ///
    /// # Errors
    /// Returns an error if:
    /// - The Redis URL is invalid
    /// - Connection to Redis server fails
    pub async fn new(url: &str) -> CatalogStorageResult<Self> {
        let client = Client::open(url)?;
        let connection_manager = ConnectionManager::new(client).await?;

        Ok(Self { connection_manager })
    }

    /// Get a clone of the connection manager
    #[must_use]
    pub fn conn(&self) -> ConnectionManager {
        self.connection_manager.clone()
    }
}

/// Collection backend on a single Redis string key per collection
pub struct RedisBackend {
    redis_client: RedisClient,
    cas_script: Script,
}

impl RedisBackend {
    /// Creates a backend issuing its commands through `redis_client`
    #[must_use]
    pub fn new(redis_client: RedisClient) -> Self {
        Self {
            redis_client,
            cas_script: Script::new(COMPARE_AND_SWAP_SCRIPT),
        }
    }
}

#[async_trait]
impl CollectionBackend for RedisBackend {
    async fn load(&self, key: &str) -> CatalogStorageResult<Option<String>> {
        let mut conn = self.redis_client.conn();
        let value: Option<String> = timeout(REDIS_TIMEOUT, conn.get(key))
            .await
            .map_err(|_| CatalogStorageError::Timeout)??;
        Ok(value)
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        new: &str,
    ) -> CatalogStorageResult<bool> {
        let mut conn = self.redis_client.conn();
        let mut invocation = self.cas_script.key(key);
        invocation
            .arg(expected.unwrap_or_default())
            .arg(if expected.is_some() { "1" } else { "0" })
            .arg(new);

        let written: i64 = timeout(REDIS_TIMEOUT, invocation.invoke_async(&mut conn))
            .await
            .map_err(|_| CatalogStorageError::Timeout)??;

        Ok(written == 1)
    }
}
