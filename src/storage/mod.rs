pub mod dynamo;
pub mod s3;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::models::Listing;

pub use dynamo::DynamoListingStore;
pub use s3::S3ObjectStore;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("object store error: {0}")]
    ObjectStore(String),

    #[error("listing store error: {0}")]
    ListingStore(String),

    #[error("invalid stored record: {0}")]
    InvalidRecord(String),
}

/// Blob storage for uploaded listing files, keyed by file name.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Bytes) -> Result<(), StorageError>;

    /// Remove an object, used to compensate for a failed metadata write.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Persistence for listing metadata records.
#[async_trait]
pub trait ListingStore: Send + Sync {
    async fn put(&self, listing: &Listing) -> Result<(), StorageError>;

    async fn listings_for_owner(&self, owner_id: &str) -> Result<Vec<Listing>, StorageError>;
}
