//! User model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Full user model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    /// Community rating, 0 to 5. Maintained by the review pipeline, read-only here.
    pub rating: f64,
    pub total_reviews: i32,
    pub items_shared: i32,
    pub items_borrowed: i32,
    pub created_at: DateTime<Utc>,
}

/// Short user card embedded in listings and requests
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: Uuid,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub rating: f64,
}

/// Public profile view of a user. Contact details stay private.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PublicProfile {
    pub id: Uuid,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub rating: f64,
    pub total_reviews: i32,
    pub items_shared: i32,
    pub items_borrowed: i32,
    pub member_since: DateTime<Utc>,
}

impl From<User> for PublicProfile {
    fn from(user: User) -> Self {
        PublicProfile {
            id: user.id,
            full_name: user.full_name,
            avatar_url: user.avatar_url,
            bio: user.bio,
            location: user.location,
            rating: user.rating,
            total_reviews: user.total_reviews,
            items_shared: user.items_shared,
            items_borrowed: user.items_borrowed,
            member_since: user.created_at,
        }
    }
}

/// JWT Claims for authenticated users
///
/// An immutable snapshot of the caller's identity, minted at sign-in and
/// handed to every handler. The `jti` identifies the token itself so that
/// sign-out can revoke it without touching the user row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: Uuid,
    pub full_name: String,
    pub jti: String,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        // Zero expiry leeway: one clock mints and checks these tokens, and
        // the logout denylist TTL only reaches `exp`. A leeway would keep a
        // logged-out token alive past its Redis entry.
        let mut validation = Validation::default();
        validation.leeway = 0;
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )?;
        Ok(token_data.claims)
    }

    /// Seconds until this token stops verifying (0 once expired).
    ///
    /// The expiry second itself counts: with integer timestamps a token
    /// still verifies while `now == exp`, so a denylist entry with this
    /// TTL outlives the token.
    pub fn remaining_seconds(&self, now: i64) -> u64 {
        (self.exp - now + 1).max(0) as u64
    }
}
