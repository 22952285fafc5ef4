//! Business logic services

pub mod auth;
pub mod listings;
pub mod redis;
pub mod requests;
pub mod stats;

use crate::{config::AuthConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub listings: listings::ListingsService,
    pub requests: requests::RequestsService,
    pub stats: stats::StatsService,
    pub redis: redis::RedisService,
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub async fn new(
        repository: Repository,
        auth_config: AuthConfig,
        redis_service: redis::RedisService,
    ) -> AppResult<Self> {
        Ok(Self {
            auth: auth::AuthService::new(repository.clone(), auth_config, redis_service.clone()),
            listings: listings::ListingsService::new(repository.clone()),
            requests: requests::RequestsService::new(repository.clone()),
            stats: stats::StatsService::new(repository.clone()),
            redis: redis_service,
            repository,
        })
    }
}
