//! Items repository for database operations.

use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{CreateItem, Item, ItemWithOwner, UserSummary},
};

#[derive(Clone)]
pub struct ItemsRepository {
    pool: Pool<Postgres>,
}

impl ItemsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Item> {
        let item = sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item with id {} not found", id)))?;

        Ok(item)
    }

    /// Fetches one item together with its owner's public summary.
    pub async fn get_with_owner(&self, id: Uuid) -> AppResult<ItemWithOwner> {
        let row = sqlx::query(
            r#"
            SELECT i.*,
                   u.id AS owner_user_id, u.full_name AS owner_full_name,
                   u.avatar_url AS owner_avatar_url, u.location AS owner_location,
                   u.rating AS owner_rating
            FROM items i
            JOIN users u ON u.id = i.owner_id
            WHERE i.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Item with id {} not found", id)))?;

        item_with_owner_from_row(&row)
    }

    /// All items currently marked available, with owner summaries,
    /// newest first.
    pub async fn list_available(&self) -> AppResult<Vec<ItemWithOwner>> {
        let rows = sqlx::query(
            r#"
            SELECT i.*,
                   u.id AS owner_user_id, u.full_name AS owner_full_name,
                   u.avatar_url AS owner_avatar_url, u.location AS owner_location,
                   u.rating AS owner_rating
            FROM items i
            JOIN users u ON u.id = i.owner_id
            WHERE i.is_available = TRUE
            ORDER BY i.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(item_with_owner_from_row).collect()
    }

    /// Every item belonging to one owner, available or not, newest first.
    pub async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT * FROM items WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    pub async fn create(&self, owner_id: Uuid, item: &CreateItem) -> AppResult<Item> {
        let created = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (owner_id, title, description, category, condition, daily_value, location, images)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.category)
        .bind(item.condition)
        .bind(item.daily_value)
        .bind(&item.location)
        .bind(&item.images)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Flips the availability flag and returns the updated row.
    pub async fn set_availability(&self, id: Uuid, is_available: bool) -> AppResult<Item> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET is_available = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(is_available)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Item with id {} not found", id)))?;

        Ok(item)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Item with id {} not found", id)));
        }

        Ok(())
    }
}

/// Maps a joined `items x users` row into an [`ItemWithOwner`].
///
/// The owner columns are aliased with an `owner_` prefix so they never
/// collide with the item's own columns.
fn item_with_owner_from_row(row: &sqlx::postgres::PgRow) -> AppResult<ItemWithOwner> {
    let item = Item {
        id: row.try_get("id")?,
        owner_id: row.try_get("owner_id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        category: row.try_get("category")?,
        condition: row.try_get("condition")?,
        daily_value: row.try_get("daily_value")?,
        location: row.try_get("location")?,
        images: row.try_get("images")?,
        is_available: row.try_get("is_available")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    };

    let owner = UserSummary {
        id: row.try_get("owner_user_id")?,
        full_name: row.try_get("owner_full_name")?,
        avatar_url: row.try_get("owner_avatar_url")?,
        location: row.try_get("owner_location")?,
        rating: row.try_get("owner_rating")?,
    };

    Ok(ItemWithOwner { item, owner })
}
