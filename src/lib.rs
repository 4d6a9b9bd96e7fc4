//! Tool Library Server
//!
//! A community tool lending library: members browse a shared catalogue,
//! reserve tools, pick them up and return them with a condition report,
//! and propose new tools for admins to review.

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
