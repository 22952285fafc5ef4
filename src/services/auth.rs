//! Authentication service: signup, login, logout, session introspection.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{User, UserClaims},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
    redis: crate::services::redis::RedisService,
}

impl AuthService {
    pub fn new(
        repository: Repository,
        config: AuthConfig,
        redis: crate::services::redis::RedisService,
    ) -> Self {
        Self {
            repository,
            config,
            redis,
        }
    }

    /// Register a new account and open a session for it.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> AppResult<(String, User)> {
        if self.repository.users.email_exists(email).await? {
            return Err(AppError::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }

        let password_hash = self.hash_password(password)?;
        let user = self
            .repository
            .users
            .create(email, &password_hash, full_name)
            .await?;
        let token = self.create_token_for_user(&user)?;

        Ok((token, user))
    }

    /// Authenticate by email and password and return a JWT token.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(String, User)> {
        // Same message whether the email is unknown or the password is wrong
        let user = self
            .repository
            .users
            .get_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication(
                "Invalid email or password".to_string(),
            ));
        }

        let token = self.create_token_for_user(&user)?;

        Ok((token, user))
    }

    /// Close the session by revoking the presented token.
    pub async fn logout(&self, claims: &UserClaims) -> AppResult<()> {
        let remaining = claims.remaining_seconds(Utc::now().timestamp());
        self.redis.revoke_token(&claims.jti, remaining).await
    }

    /// Load the account behind a set of claims.
    pub async fn me(&self, claims: &UserClaims) -> AppResult<User> {
        self.repository.users.get_by_id(claims.user_id).await
    }

    /// Load any account by id, for public profile views.
    pub async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// Create JWT token for a user
    fn create_token_for_user(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.email.clone(),
            user_id: user.id,
            full_name: user.full_name.clone(),
            jti: Uuid::new_v4().to_string(),
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Verify user password
    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}
