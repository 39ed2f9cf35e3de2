pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod storage;

// Re-export commonly used types
pub use api::error::{ApiError, ApiResult};
pub use api::event::{ProxyRequest, ProxyResponse};
pub use api::AppState;
pub use config::{AppConfig, ConfigError};
pub use models::{Listing, ListingCreatedEvent};
pub use storage::{ListingStore, ObjectStore, StorageError};
