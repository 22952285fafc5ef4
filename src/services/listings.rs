//! Listings service: browsing, item detail, gallery, and owner inventory.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        gallery::{Carousel, GalleryImage},
        item::{BrowseQuery, Category, CreateItem, Item, ItemWithOwner},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ListingsService {
    repository: Repository,
}

impl ListingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All available listings matching the query, newest first.
    ///
    /// Availability and ordering come from the database; the search and
    /// category predicates are applied here so they keep the exact
    /// case-insensitive substring semantics of the browse filter.
    pub async fn browse(&self, query: &BrowseQuery) -> AppResult<Vec<ItemWithOwner>> {
        let mut listings = self.repository.items.list_available().await?;
        listings.retain(|listing| query.matches(&listing.item));

        Ok(listings)
    }

    pub async fn get_item(&self, id: Uuid) -> AppResult<ItemWithOwner> {
        self.repository.items.get_with_owner(id).await
    }

    /// Resolve one gallery position of an item, with wraparound neighbors.
    pub async fn gallery_image(&self, item_id: Uuid, index: usize) -> AppResult<GalleryImage> {
        let item = self.repository.items.get_by_id(item_id).await?;

        let carousel = Carousel::new(item.images.len());
        if !carousel.contains(index) {
            return Err(AppError::NotFound(format!(
                "Item {} has no image at index {}",
                item_id, index
            )));
        }

        Ok(GalleryImage {
            index,
            url: item.images[index].clone(),
            prev: carousel.prev(index),
            next: carousel.next(index),
        })
    }

    /// The fixed set of listing categories.
    pub fn categories(&self) -> Vec<&'static str> {
        Category::ALL.iter().map(|c| c.as_str()).collect()
    }

    pub async fn create_item(&self, owner_id: Uuid, item: &CreateItem) -> AppResult<Item> {
        if let Some(value) = item.daily_value {
            if value < Decimal::ZERO {
                return Err(AppError::Validation(
                    "daily_value must not be negative".to_string(),
                ));
            }
        }

        self.repository.items.create(owner_id, item).await
    }

    /// Owner-only availability toggle.
    pub async fn set_availability(
        &self,
        actor_id: Uuid,
        item_id: Uuid,
        is_available: bool,
    ) -> AppResult<Item> {
        let item = self.repository.items.get_by_id(item_id).await?;
        if item.owner_id != actor_id {
            return Err(AppError::Authorization(
                "Only the owner can change an item's availability".to_string(),
            ));
        }

        self.repository.items.set_availability(item_id, is_available).await
    }

    /// Owner-only deletion. Dependent borrow requests go away with the item.
    pub async fn delete_item(&self, actor_id: Uuid, item_id: Uuid) -> AppResult<()> {
        let item = self.repository.items.get_by_id(item_id).await?;
        if item.owner_id != actor_id {
            return Err(AppError::Authorization(
                "Only the owner can delete an item".to_string(),
            ));
        }

        self.repository.items.delete(item_id).await
    }

    /// Every item the user owns, available or not.
    pub async fn my_items(&self, owner_id: Uuid) -> AppResult<Vec<Item>> {
        self.repository.items.list_by_owner(owner_id).await
    }
}
