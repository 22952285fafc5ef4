//! API handlers for NeighborShare REST endpoints

pub mod auth;
pub mod health;
pub mod items;
pub mod openapi;
pub mod requests;
pub mod stats;
pub mod users;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{error::AppError, models::user::UserClaims, AppState};

/// Extractor for authenticated user from JWT token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let claims = claims_from_parts(parts, state)?;

        // A logged-out token is dead even though its signature still checks out
        if state.services.redis.is_token_revoked(&claims.jti).await? {
            return Err(AppError::Authentication("Token has been revoked".to_string()));
        }

        Ok(AuthenticatedUser(claims))
    }
}

/// Extractor that rejects callers who already hold a valid session.
///
/// Sign-in and sign-up are guest-only routes; an authenticated caller gets
/// a conflict instead of a second session.
pub struct GuestOnly;

#[async_trait]
impl FromRequestParts<AppState> for GuestOnly {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match claims_from_parts(parts, state) {
            Ok(claims) => {
                if state.services.redis.is_token_revoked(&claims.jti).await? {
                    return Ok(GuestOnly);
                }
                Err(AppError::Conflict("Already signed in".to_string()))
            }
            Err(_) => Ok(GuestOnly),
        }
    }
}

/// Parse and verify the bearer token carried by a request, if any.
fn claims_from_parts(parts: &Parts, state: &AppState) -> Result<UserClaims, AppError> {
    // Get the Authorization header
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

    // Check for Bearer token
    if !auth_header.starts_with("Bearer ") {
        return Err(AppError::Authentication(
            "Invalid authorization header format".to_string(),
        ));
    }

    let token = &auth_header[7..];

    // Validate JWT token using the secret from configuration
    UserClaims::from_token(token, &state.config.auth.jwt_secret)
        .map_err(|e| AppError::Authentication(e.to_string()))
}
