//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, health, items, requests, stats, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "NeighborShare API",
        version = "1.0.0",
        description = "Community Item Sharing REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "NeighborShare Team", email = "contact@neighborshare.org")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::signup,
        auth::login,
        auth::logout,
        auth::me,
        // Items
        items::list_items,
        items::get_item,
        items::get_gallery_image,
        items::list_categories,
        items::create_item,
        items::set_availability,
        items::delete_item,
        items::my_items,
        // Users
        users::get_user,
        // Requests
        requests::create_request,
        requests::list_requests,
        requests::approve_request,
        requests::reject_request,
        // Stats
        stats::my_stats,
    ),
    components(
        schemas(
            // Auth
            auth::SignupRequest,
            auth::LoginRequest,
            auth::AuthResponse,
            // Items
            crate::models::item::Item,
            crate::models::item::ItemWithOwner,
            crate::models::item::ItemSummary,
            crate::models::item::CreateItem,
            crate::models::item::UpdateAvailability,
            crate::models::item::Category,
            crate::models::item::Condition,
            crate::models::gallery::GalleryImage,
            // Users
            crate::models::user::User,
            crate::models::user::UserSummary,
            crate::models::user::PublicProfile,
            // Requests
            crate::models::request::BorrowRequest,
            crate::models::request::BorrowRequestDetails,
            crate::models::request::CreateBorrowRequest,
            crate::models::request::RequestStatus,
            // Stats
            stats::StatsResponse,
            stats::ItemStats,
            stats::RequestStats,
            stats::StatEntry,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "items", description = "Listing management and browsing"),
        (name = "users", description = "Public member profiles"),
        (name = "requests", description = "Borrow request lifecycle"),
        (name = "stats", description = "Dashboard statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
