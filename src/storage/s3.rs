//! S3-backed object store for uploaded listing files.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use tracing::instrument;

use crate::storage::{ObjectStore, StorageError};

pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(sdk_config: &aws_config::SdkConfig, bucket: String) -> Self {
        Self {
            client: Client::new(sdk_config),
            bucket,
        }
    }
}

impl std::fmt::Debug for S3ObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3ObjectStore")
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    #[instrument(skip(self, bytes), fields(bucket = %self.bucket, key = key, size = bytes.len()))]
    async fn put(&self, key: &str, bytes: Bytes) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::ObjectStore(format!("put_object failed: {}", e)))?;
        Ok(())
    }

    #[instrument(skip(self), fields(bucket = %self.bucket, key = key))]
    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::ObjectStore(format!("delete_object failed: {}", e)))?;
        Ok(())
    }
}
