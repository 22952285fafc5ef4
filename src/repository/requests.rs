//! Borrow requests repository for database operations.

use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        BorrowRequest, BorrowRequestDetails, CreateBorrowRequest, ItemSummary, RequestRole,
        RequestStatus, UserSummary,
    },
};

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Postgres>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BorrowRequest> {
        let request = sqlx::query_as::<_, BorrowRequest>("SELECT * FROM borrow_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request with id {} not found", id)))?;

        Ok(request)
    }

    /// Requests where the user is the owner (`received`) or the borrower
    /// (`sent`), newest first, each carrying item, borrower, and owner
    /// summaries.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        role: RequestRole,
    ) -> AppResult<Vec<BorrowRequestDetails>> {
        let filter = match role {
            RequestRole::Received => "r.owner_id = $1",
            RequestRole::Sent => "r.borrower_id = $1",
        };

        let query = format!(
            r#"
            SELECT r.*,
                   i.title AS item_title, i.images AS item_images,
                   i.daily_value AS item_daily_value,
                   b.id AS borrower_user_id, b.full_name AS borrower_full_name,
                   b.avatar_url AS borrower_avatar_url, b.location AS borrower_location,
                   b.rating AS borrower_rating,
                   o.id AS owner_user_id, o.full_name AS owner_full_name,
                   o.avatar_url AS owner_avatar_url, o.location AS owner_location,
                   o.rating AS owner_rating
            FROM borrow_requests r
            JOIN items i ON i.id = r.item_id
            JOIN users b ON b.id = r.borrower_id
            JOIN users o ON o.id = r.owner_id
            WHERE {}
            ORDER BY r.created_at DESC
            "#,
            filter
        );

        let rows = sqlx::query(&query).bind(user_id).fetch_all(&self.pool).await?;

        rows.iter().map(details_from_row).collect()
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    pub async fn create(
        &self,
        borrower_id: Uuid,
        owner_id: Uuid,
        request: &CreateBorrowRequest,
    ) -> AppResult<BorrowRequest> {
        let created = sqlx::query_as::<_, BorrowRequest>(
            r#"
            INSERT INTO borrow_requests (item_id, borrower_id, owner_id, start_date, end_date, message)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(request.item_id)
        .bind(borrower_id)
        .bind(owner_id)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(&request.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Applies the owner's decision. The status guard makes the write atomic:
    /// a request decided concurrently matches zero rows and `None` comes back.
    pub async fn decide(&self, id: Uuid, status: RequestStatus) -> AppResult<Option<BorrowRequest>> {
        let request = sqlx::query_as::<_, BorrowRequest>(
            r#"
            UPDATE borrow_requests
            SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }
}

fn details_from_row(row: &sqlx::postgres::PgRow) -> AppResult<BorrowRequestDetails> {
    let request = BorrowRequest {
        id: row.try_get("id")?,
        item_id: row.try_get("item_id")?,
        borrower_id: row.try_get("borrower_id")?,
        owner_id: row.try_get("owner_id")?,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        message: row.try_get("message")?,
        status: row.try_get("status")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    };

    let item = ItemSummary {
        id: request.item_id,
        title: row.try_get("item_title")?,
        images: row.try_get("item_images")?,
        daily_value: row.try_get("item_daily_value")?,
    };

    let borrower = UserSummary {
        id: row.try_get("borrower_user_id")?,
        full_name: row.try_get("borrower_full_name")?,
        avatar_url: row.try_get("borrower_avatar_url")?,
        location: row.try_get("borrower_location")?,
        rating: row.try_get("borrower_rating")?,
    };

    let owner = UserSummary {
        id: row.try_get("owner_user_id")?,
        full_name: row.try_get("owner_full_name")?,
        avatar_url: row.try_get("owner_avatar_url")?,
        location: row.try_get("owner_location")?,
        rating: row.try_get("owner_rating")?,
    };

    Ok(BorrowRequestDetails {
        request,
        item,
        borrower,
        owner,
    })
}
