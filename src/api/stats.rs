//! Statistics endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

use super::AuthenticatedUser;

/// Dashboard statistics response
#[derive(Serialize, ToSchema)]
pub struct StatsResponse {
    /// Item statistics
    pub items: ItemStats,
    /// Requests where the caller is the owner
    pub requests_received: RequestStats,
    /// Requests where the caller is the borrower
    pub requests_sent: RequestStats,
}

#[derive(Serialize, ToSchema)]
pub struct ItemStats {
    /// Total number of items owned
    pub total: i64,
    /// Items currently marked available
    pub available: i64,
    /// Items currently marked unavailable
    pub unavailable: i64,
}

#[derive(Serialize, ToSchema)]
pub struct RequestStats {
    /// Total number of requests on this side
    pub total: i64,
    /// Requests by status
    pub by_status: Vec<StatEntry>,
}

#[derive(Serialize, ToSchema)]
pub struct StatEntry {
    /// Label
    pub label: String,
    /// Value
    pub value: i64,
}

/// Get the caller's dashboard statistics
#[utoipa::path(
    get,
    path = "/my/stats",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Item and request counts", body = StatsResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<StatsResponse>> {
    let stats = state.services.stats.get_user_stats(claims.user_id).await?;
    Ok(Json(stats))
}
