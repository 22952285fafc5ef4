//! Listing endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        gallery::GalleryImage,
        item::{BrowseQuery, CreateItem, Item, ItemWithOwner, UpdateAvailability},
    },
};

use super::AuthenticatedUser;

/// Browse available listings
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    security(("bearer_auth" = [])),
    params(
        ("search" = Option<String>, Query, description = "Substring match on title or description"),
        ("category" = Option<String>, Query, description = "Exact category name")
    ),
    responses(
        (status = 200, description = "Available listings, newest first", body = Vec<ItemWithOwner>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_items(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<BrowseQuery>,
) -> AppResult<Json<Vec<ItemWithOwner>>> {
    let listings = state.services.listings.browse(&query).await?;
    Ok(Json(listings))
}

/// Get one listing with its owner
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Listing details", body = ItemWithOwner),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_item(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ItemWithOwner>> {
    let item = state.services.listings.get_item(id).await?;
    Ok(Json(item))
}

/// Get one gallery image with its wraparound neighbors
#[utoipa::path(
    get,
    path = "/items/{id}/images/{index}",
    tag = "items",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Item ID"),
        ("index" = usize, Path, description = "Zero-based image index")
    ),
    responses(
        (status = 200, description = "Image with prev/next indices", body = GalleryImage),
        (status = 404, description = "Item or image index not found")
    )
)]
pub async fn get_gallery_image(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path((id, index)): Path<(Uuid, usize)>,
) -> AppResult<Json<GalleryImage>> {
    let image = state.services.listings.gallery_image(id, index).await?;
    Ok(Json(image))
}

/// List the fixed categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "items",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Category names", body = Vec<String>)
    )
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<&'static str>>> {
    Ok(Json(state.services.listings.categories()))
}

/// Create a new listing
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    security(("bearer_auth" = [])),
    request_body = CreateItem,
    responses(
        (status = 201, description = "Listing created", body = Item),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_item(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<CreateItem>,
) -> AppResult<(StatusCode, Json<Item>)> {
    payload.validate()?;

    let created = state
        .services
        .listings
        .create_item(claims.user_id, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Set a listing's availability flag
#[utoipa::path(
    put,
    path = "/items/{id}/availability",
    tag = "items",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    request_body = UpdateAvailability,
    responses(
        (status = 200, description = "Updated listing", body = Item),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn set_availability(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAvailability>,
) -> AppResult<Json<Item>> {
    let updated = state
        .services
        .listings
        .set_availability(claims.user_id, id, payload.is_available)
        .await?;

    Ok(Json(updated))
}

/// Delete a listing
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "items",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 204, description = "Listing deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn delete_item(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.listings.delete_item(claims.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List the caller's own items, available or not
#[utoipa::path(
    get,
    path = "/my/items",
    tag = "items",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own items, newest first", body = Vec<Item>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_items(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Item>>> {
    let items = state.services.listings.my_items(claims.user_id).await?;
    Ok(Json(items))
}
