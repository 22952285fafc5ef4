//! Statistics service

use sqlx::Row;
use uuid::Uuid;

use crate::{
    api::stats::{ItemStats, RequestStats, StatEntry, StatsResponse},
    error::AppResult,
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Dashboard numbers for one user: item counts plus request counts by
    /// status, split by side (received as owner, sent as borrower).
    pub async fn get_user_stats(&self, user_id: Uuid) -> AppResult<StatsResponse> {
        let pool = &self.repository.pool;

        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE is_available) AS available
            FROM items
            WHERE owner_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        let total: i64 = row.get("total");
        let available: i64 = row.get("available");
        let items = ItemStats {
            total,
            available,
            unavailable: total - available,
        };

        let requests_received = self.request_stats(user_id, "owner_id").await?;
        let requests_sent = self.request_stats(user_id, "borrower_id").await?;

        Ok(StatsResponse {
            items,
            requests_received,
            requests_sent,
        })
    }

    /// Request counts grouped by status for one side of the relationship
    /// (`owner_id` or `borrower_id`).
    async fn request_stats(&self, user_id: Uuid, side: &str) -> AppResult<RequestStats> {
        let q = format!(
            r#"
            SELECT status::text AS label, COUNT(*) AS value
            FROM borrow_requests
            WHERE {} = $1
            GROUP BY status
            ORDER BY value DESC
            "#,
            side
        );

        let by_status: Vec<StatEntry> = sqlx::query(&q)
            .bind(user_id)
            .fetch_all(&self.repository.pool)
            .await?
            .into_iter()
            .map(|row| StatEntry {
                label: row.get("label"),
                value: row.get("value"),
            })
            .collect();

        let total = by_status.iter().map(|entry| entry.value).sum();

        Ok(RequestStats { total, by_status })
    }
}
