//! DynamoDB-backed listing store.
//!
//! Attribute names match the deployed `Hotels` table: `userId` is the
//! partition key, `Id` the range key, remaining attributes PascalCase.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use tracing::instrument;

use crate::models::Listing;
use crate::storage::{ListingStore, StorageError};

pub struct DynamoListingStore {
    client: Client,
    table: String,
}

impl DynamoListingStore {
    pub fn new(sdk_config: &aws_config::SdkConfig, table: String) -> Self {
        Self {
            client: Client::new(sdk_config),
            table,
        }
    }
}

impl std::fmt::Debug for DynamoListingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamoListingStore")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ListingStore for DynamoListingStore {
    #[instrument(skip(self, listing), fields(table = %self.table, listing_id = %listing.id))]
    async fn put(&self, listing: &Listing) -> Result<(), StorageError> {
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(to_item(listing)))
            .send()
            .await
            .map_err(|e| StorageError::ListingStore(format!("put_item failed: {}", e)))?;
        Ok(())
    }

    // Query on the partition key rather than a filtered table scan: same
    // result set, without reading every owner's records.
    #[instrument(skip(self), fields(table = %self.table, owner_id = owner_id))]
    async fn listings_for_owner(&self, owner_id: &str) -> Result<Vec<Listing>, StorageError> {
        let mut listings = Vec::new();
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;

        loop {
            let output = self
                .client
                .query()
                .table_name(&self.table)
                .key_condition_expression("userId = :ownerId")
                .expression_attribute_values(":ownerId", AttributeValue::S(owner_id.to_string()))
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| StorageError::ListingStore(format!("query failed: {}", e)))?;

            for item in output.items.unwrap_or_default() {
                listings.push(from_item(&item)?);
            }

            start_key = output.last_evaluated_key;
            if start_key.is_none() {
                break;
            }
        }

        Ok(listings)
    }
}

fn to_item(listing: &Listing) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            "userId".to_string(),
            AttributeValue::S(listing.owner_id.clone()),
        ),
        ("Id".to_string(), AttributeValue::S(listing.id.clone())),
        ("Name".to_string(), AttributeValue::S(listing.name.clone())),
        (
            "Price".to_string(),
            AttributeValue::N(listing.price.to_string()),
        ),
        (
            "Rating".to_string(),
            AttributeValue::N(listing.rating.to_string()),
        ),
        (
            "CityName".to_string(),
            AttributeValue::S(listing.city_name.clone()),
        ),
        (
            "FileName".to_string(),
            AttributeValue::S(listing.file_name.clone()),
        ),
    ])
}

fn from_item(item: &HashMap<String, AttributeValue>) -> Result<Listing, StorageError> {
    Ok(Listing {
        owner_id: string_attr(item, "userId")?,
        id: string_attr(item, "Id")?,
        name: string_attr(item, "Name")?,
        price: number_attr(item, "Price")?,
        rating: number_attr(item, "Rating")?,
        city_name: string_attr(item, "CityName")?,
        file_name: string_attr(item, "FileName")?,
    })
}

fn string_attr(item: &HashMap<String, AttributeValue>, name: &str) -> Result<String, StorageError> {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| StorageError::InvalidRecord(format!("missing string attribute {}", name)))
}

fn number_attr(item: &HashMap<String, AttributeValue>, name: &str) -> Result<i32, StorageError> {
    item.get(name)
        .and_then(|v| v.as_n().ok())
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| StorageError::InvalidRecord(format!("missing numeric attribute {}", name)))
}
