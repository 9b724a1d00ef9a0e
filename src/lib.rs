//! Inventory Dashboard
//!
//! Operator gateway for an inventory borrowing system. Sessions, items and the
//! borrow/return collections live on an external backend; this crate adds the
//! transaction lifecycle rules (status transitions, overdue tracking, the sanction
//! view and the status list policy) and serves them as a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod lifecycle;
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
