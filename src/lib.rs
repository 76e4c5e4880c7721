//! Holdings status service
//!
//! Summarizes the copies a library holds of each catalog record into the
//! one option that serves the patron best (take from shelf, order, recall,
//! use on site, ...) and serves these summaries to the catalog front end.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod holdings;
pub mod models;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
