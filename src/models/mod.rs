//! Data models for NeighborShare

pub mod gallery;
pub mod item;
pub mod request;
pub mod review;
pub mod user;

// Re-export commonly used types
pub use gallery::{Carousel, GalleryImage};
pub use item::{
    BrowseQuery, Category, Condition, CreateItem, Item, ItemSummary, ItemWithOwner,
    UpdateAvailability,
};
pub use request::{
    BorrowRequest, BorrowRequestDetails, CreateBorrowRequest, RequestRole, RequestStatus,
};
pub use review::{Message, Review, ReviewKind};
pub use user::{PublicProfile, User, UserClaims, UserSummary};
