//! Borrow request model and status machine

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::item::ItemSummary;
use crate::models::user::UserSummary;

/// Lifecycle states of a borrow request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Active,
    Returned,
    Completed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
            RequestStatus::Active => "active",
            RequestStatus::Returned => "returned",
            RequestStatus::Completed => "completed",
        }
    }

    /// Exhaustive transition table for the request lifecycle.
    ///
    /// The owner's decision on a pending request is the only mutation any
    /// endpoint drives. The later states exist in the schema but no
    /// hand-over flow enters them, so every other edge is illegal.
    pub fn can_transition_to(self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::Pending, RequestStatus::Approved)
                | (RequestStatus::Pending, RequestStatus::Rejected)
        )
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which side of a request the caller is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestRole {
    /// Requests for items the caller owns
    Received,
    /// Requests the caller submitted as a borrower
    Sent,
}

/// Full borrow request model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowRequest {
    pub id: Uuid,
    pub item_id: Uuid,
    pub borrower_id: Uuid,
    pub owner_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub message: Option<String>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Borrow request with the cards the inbox/outbox displays
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BorrowRequestDetails {
    #[serde(flatten)]
    pub request: BorrowRequest,
    pub item: ItemSummary,
    pub borrower: UserSummary,
    pub owner: UserSummary,
}

/// Create borrow request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBorrowRequest {
    pub item_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(length(max = 1000, message = "Message must be at most 1000 characters"))]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [RequestStatus; 6] = [
        RequestStatus::Pending,
        RequestStatus::Approved,
        RequestStatus::Rejected,
        RequestStatus::Active,
        RequestStatus::Returned,
        RequestStatus::Completed,
    ];

    #[test]
    fn test_pending_can_be_decided() {
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Approved));
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Rejected));
    }

    #[test]
    fn test_only_two_edges_are_legal() {
        let mut legal = 0;
        for from in ALL {
            for to in ALL {
                if from.can_transition_to(to) {
                    legal += 1;
                    assert_eq!(from, RequestStatus::Pending);
                }
            }
        }
        assert_eq!(legal, 2);
    }

    #[test]
    fn test_decided_requests_are_final() {
        for to in ALL {
            assert!(!RequestStatus::Approved.can_transition_to(to));
            assert!(!RequestStatus::Rejected.can_transition_to(to));
        }
    }

    #[test]
    fn test_no_self_transitions() {
        for status in ALL {
            assert!(!status.can_transition_to(status));
        }
    }
}
