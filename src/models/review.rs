//! Review and message models
//!
//! Stored but not yet surfaced: no endpoint reads or writes these tables.
//! They back the rating fields on [`crate::models::user::User`] once the
//! review flow ships.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Which side of a completed borrow wrote the review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "review_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReviewKind {
    Borrower,
    Lender,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Review {
    pub id: Uuid,
    pub request_id: Uuid,
    pub reviewer_id: Uuid,
    pub reviewee_id: Uuid,
    pub item_id: Option<Uuid>,
    pub rating: i16,
    pub comment: Option<String>,
    pub kind: ReviewKind,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Message {
    pub id: Uuid,
    pub request_id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
