//! Item model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::user::UserSummary;

/// Fixed set of listing categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Category {
    #[serde(rename = "Tools & Equipment")]
    ToolsEquipment,
    #[serde(rename = "Electronics")]
    Electronics,
    #[serde(rename = "Sports & Recreation")]
    SportsRecreation,
    #[serde(rename = "Books & Media")]
    BooksMedia,
    #[serde(rename = "Kitchen & Appliances")]
    KitchenAppliances,
    #[serde(rename = "Garden & Outdoor")]
    GardenOutdoor,
    #[serde(rename = "Baby & Kids")]
    BabyKids,
    #[serde(rename = "Clothing & Accessories")]
    ClothingAccessories,
    #[serde(rename = "Home & Furniture")]
    HomeFurniture,
    #[serde(rename = "Art & Crafts")]
    ArtCrafts,
    #[serde(rename = "Musical Instruments")]
    MusicalInstruments,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::ToolsEquipment,
        Category::Electronics,
        Category::SportsRecreation,
        Category::BooksMedia,
        Category::KitchenAppliances,
        Category::GardenOutdoor,
        Category::BabyKids,
        Category::ClothingAccessories,
        Category::HomeFurniture,
        Category::ArtCrafts,
        Category::MusicalInstruments,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ToolsEquipment => "Tools & Equipment",
            Category::Electronics => "Electronics",
            Category::SportsRecreation => "Sports & Recreation",
            Category::BooksMedia => "Books & Media",
            Category::KitchenAppliances => "Kitchen & Appliances",
            Category::GardenOutdoor => "Garden & Outdoor",
            Category::BabyKids => "Baby & Kids",
            Category::ClothingAccessories => "Clothing & Accessories",
            Category::HomeFurniture => "Home & Furniture",
            Category::ArtCrafts => "Art & Crafts",
            Category::MusicalInstruments => "Musical Instruments",
            Category::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Invalid category: {}", s))
    }
}

// Categories are stored as their display name (TEXT column)
impl sqlx::Type<Postgres> for Category {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for Category {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for Category {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Physical condition of a listed item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "item_condition", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Excellent,
    Good,
    Fair,
    Poor,
}

/// Full item model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Item {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub condition: Condition,
    /// Ordered image URLs, at most 5
    pub images: Vec<String>,
    /// Estimated daily value, for display only
    #[schema(value_type = Option<f64>)]
    pub daily_value: Option<Decimal>,
    pub location: Option<String>,
    /// Whether the item can currently accept new borrow requests
    pub is_available: bool,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Item with its owner card, as shown in the listing browser
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItemWithOwner {
    #[serde(flatten)]
    pub item: Item,
    pub owner: UserSummary,
}

/// Short item representation embedded in borrow requests
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemSummary {
    pub id: Uuid,
    pub title: String,
    pub images: Vec<String>,
    #[schema(value_type = Option<f64>)]
    pub daily_value: Option<Decimal>,
}

/// Create item request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, max = 5000, message = "Description is required"))]
    pub description: String,
    pub category: Category,
    pub condition: Condition,
    /// Image URLs, at most 5
    #[validate(length(max = 5, message = "An item can have at most 5 images"))]
    #[serde(default)]
    pub images: Vec<String>,
    #[schema(value_type = Option<f64>)]
    pub daily_value: Option<Decimal>,
    pub location: Option<String>,
}

/// Availability flag update
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAvailability {
    pub is_available: bool,
}

/// Browse filter parameters
///
/// The predicates mirror what members type into the browser: a free-text
/// term matched as a case-insensitive substring of title or description,
/// and an exact category. When both are present, both must hold.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct BrowseQuery {
    pub search: Option<String>,
    /// An absent or empty parameter ("All Categories") filters nothing.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub category: Option<Category>,
}

/// A form GET encodes an unselected filter as `?category=`; that is no
/// filter, not a parse failure. Anything non-empty must still be a known
/// value.
fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}

impl BrowseQuery {
    pub fn matches(&self, item: &Item) -> bool {
        let matches_search = match self.search.as_deref() {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                item.title.to_lowercase().contains(&term)
                    || item.description.to_lowercase().contains(&term)
            }
        };
        let matches_category = match self.category {
            None => true,
            Some(category) => item.category == category,
        };
        matches_search && matches_category
    }
}
