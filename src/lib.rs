//! NeighborShare Community Item Sharing Server
//!
//! A Rust REST API server for a neighborhood item-sharing service:
//! members list the things they own, browse what others share, and
//! borrow from each other through an owner-approved request flow.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
