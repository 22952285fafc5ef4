//! Borrow request service: submission, inbox/outbox, and owner decisions.

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::request::{
        BorrowRequest, BorrowRequestDetails, CreateBorrowRequest, RequestRole, RequestStatus,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
}

impl RequestsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Submit a borrow request for an item. Every check runs before any write.
    pub async fn create(
        &self,
        borrower_id: Uuid,
        request: &CreateBorrowRequest,
    ) -> AppResult<BorrowRequest> {
        if request.end_date < request.start_date {
            return Err(AppError::Validation(
                "end_date must not be before start_date".to_string(),
            ));
        }

        let item = self.repository.items.get_by_id(request.item_id).await?;

        if item.owner_id == borrower_id {
            return Err(AppError::Validation(
                "You cannot borrow your own item".to_string(),
            ));
        }

        if !item.is_available {
            return Err(AppError::BusinessRule(
                "This item is not available for borrowing".to_string(),
            ));
        }

        self.repository
            .requests
            .create(borrower_id, item.owner_id, request)
            .await
    }

    /// Requests involving the user, as owner (`received`) or borrower (`sent`).
    pub async fn list(
        &self,
        user_id: Uuid,
        role: RequestRole,
    ) -> AppResult<Vec<BorrowRequestDetails>> {
        self.repository.requests.list_for_user(user_id, role).await
    }

    /// Apply the owner's decision to a pending request.
    ///
    /// The transition table is checked first, then the update itself only
    /// matches a still-pending row, so two concurrent decisions cannot both
    /// win.
    pub async fn decide(
        &self,
        actor_id: Uuid,
        request_id: Uuid,
        decision: RequestStatus,
    ) -> AppResult<BorrowRequest> {
        let request = self.repository.requests.get_by_id(request_id).await?;

        if request.owner_id != actor_id {
            return Err(AppError::Authorization(
                "Only the item's owner can decide this request".to_string(),
            ));
        }

        if !request.status.can_transition_to(decision) {
            return Err(AppError::Conflict(format!(
                "Request is {} and cannot become {}",
                request.status, decision
            )));
        }

        self.repository
            .requests
            .decide(request_id, decision)
            .await?
            .ok_or_else(|| AppError::Conflict("Request was already decided".to_string()))
    }
}
