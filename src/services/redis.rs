//! Redis service for the token revocation denylist.

use redis::{AsyncCommands, Client};

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct RedisService {
    client: Client,
}

impl RedisService {
    /// Create a new Redis service
    pub async fn new(url: &str) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        // Test connection
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection test failed: {}", e)))?;

        Ok(Self { client })
    }

    /// Put a token id on the denylist until the token itself would expire.
    ///
    /// The entry carries the token's remaining lifetime as its TTL, so Redis
    /// drops it exactly when the token stops being valid anyway.
    pub async fn revoke_token(&self, jti: &str, remaining_seconds: u64) -> AppResult<()> {
        // A token at (or past) its expiry needs no denylist entry.
        if remaining_seconds == 0 {
            return Ok(());
        }

        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))?;

        let key = format!("revoked:{}", jti);
        conn.set_ex::<_, _, ()>(&key, "1", remaining_seconds)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store revoked token in Redis: {}", e)))?;

        Ok(())
    }

    /// Check whether a token id has been revoked.
    pub async fn is_token_revoked(&self, jti: &str) -> AppResult<bool> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))?;

        let key = format!("revoked:{}", jti);
        let exists: bool = conn
            .exists(&key)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to check revoked token in Redis: {}", e)))?;

        Ok(exists)
    }
}
