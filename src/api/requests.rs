//! Borrow request endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::request::{
        BorrowRequest, BorrowRequestDetails, CreateBorrowRequest, RequestRole, RequestStatus,
    },
};

use super::AuthenticatedUser;

#[derive(Deserialize)]
pub struct ListRequestsParams {
    pub role: Option<RequestRole>,
}

/// Submit a borrow request
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    request_body = CreateBorrowRequest,
    responses(
        (status = 201, description = "Request created as pending", body = BorrowRequest),
        (status = 400, description = "Invalid dates or own item"),
        (status = 404, description = "Item not found"),
        (status = 422, description = "Item is not available")
    )
)]
pub async fn create_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<CreateBorrowRequest>,
) -> AppResult<(StatusCode, Json<BorrowRequest>)> {
    payload.validate()?;

    let created = state
        .services
        .requests
        .create(claims.user_id, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// List requests involving the caller
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(
        ("role" = Option<String>, Query, description = "received (as owner, default) or sent (as borrower)")
    ),
    responses(
        (status = 200, description = "Requests, newest first", body = Vec<BorrowRequestDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_requests(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(params): Query<ListRequestsParams>,
) -> AppResult<Json<Vec<BorrowRequestDetails>>> {
    let role = params.role.unwrap_or(RequestRole::Received);
    let requests = state.services.requests.list(claims.user_id, role).await?;
    Ok(Json(requests))
}

/// Approve a pending request
#[utoipa::path(
    post,
    path = "/requests/{id}/approve",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request approved", body = BorrowRequest),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request is no longer pending")
    )
)]
pub async fn approve_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BorrowRequest>> {
    let updated = state
        .services
        .requests
        .decide(claims.user_id, id, RequestStatus::Approved)
        .await?;

    Ok(Json(updated))
}

/// Reject a pending request
#[utoipa::path(
    post,
    path = "/requests/{id}/reject",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request rejected", body = BorrowRequest),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request is no longer pending")
    )
)]
pub async fn reject_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BorrowRequest>> {
    let updated = state
        .services
        .requests
        .decide(claims.user_id, id, RequestStatus::Rejected)
        .await?;

    Ok(Json(updated))
}
