pub mod add_hotel;
pub mod error;
pub mod event;
pub mod list_hotels;
pub mod multipart;
pub mod server;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::storage::{ListingStore, ObjectStore};

pub use add_hotel::add_hotel;
pub use list_hotels::list_hotels;

/// Per-process handler dependencies.
///
/// The storage collaborators are trait objects so tests can substitute
/// in-memory fakes for the AWS clients.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub object_store: Arc<dyn ObjectStore>,
    pub listing_store: Arc<dyn ListingStore>,
}
