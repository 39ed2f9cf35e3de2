use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A hotel listing record owned by a single caller.
///
/// `(owner_id, id)` is the unique key: `owner_id` is the DynamoDB partition
/// key, `id` the range key. `id` is generated server-side at creation and is
/// never client-supplied. `file_name` references an object in the upload
/// bucket that is written before the record is committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub owner_id: String,
    pub id: String,
    pub name: String,
    pub price: i32,
    pub rating: i32,
    pub city_name: String,
    pub file_name: String,
}

/// Event payload mirroring [`Listing`] plus the creation timestamp.
///
/// Extension point for event-driven notification of new listings; no
/// producer or consumer is wired up yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingCreatedEvent {
    pub owner_id: String,
    pub id: String,
    pub name: String,
    pub price: i32,
    pub rating: i32,
    pub city_name: String,
    pub file_name: String,
    pub creation_date_time: DateTime<Utc>,
}

impl ListingCreatedEvent {
    pub fn from_listing(listing: &Listing, created_at: DateTime<Utc>) -> Self {
        Self {
            owner_id: listing.owner_id.clone(),
            id: listing.id.clone(),
            name: listing.name.clone(),
            price: listing.price,
            rating: listing.rating,
            city_name: listing.city_name.clone(),
            file_name: listing.file_name.clone(),
            creation_date_time: created_at,
        }
    }
}

/// Success envelope for CreateListing.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    #[serde(rename = "Message")]
    pub message: String,
}

/// Error envelope shared by every failure response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "Error")]
    pub error: String,
}

/// Response body for ListListings.
#[derive(Debug, Serialize)]
pub struct HotelsResponse {
    #[serde(rename = "Hotels")]
    pub hotels: Vec<Listing>,
}
