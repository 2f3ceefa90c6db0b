//! Entity repositories: a [`RecordClient`] bound to one collection and one
//! field-bag type. Pure delegation.

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::app_error::AppError;
use crate::record_client::RecordClient;
use crate::record_model::{CategoryFields, Entity, InventoryItemFields, LocationFields, Record};
use crate::transport::Transport;

pub struct Repository<E, T> {
    client: Arc<RecordClient<T>>,
    collection_id: String,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity, T: Transport> Repository<E, T> {
    pub fn new(client: Arc<RecordClient<T>>, collection_id: impl Into<String>) -> Self {
        Self {
            client,
            collection_id: collection_id.into(),
            _entity: PhantomData,
        }
    }

    /// Binds to the collection configured for `E`'s kind.
    pub fn for_entity(client: Arc<RecordClient<T>>) -> Self {
        let collection_id = client.config().collection_id(E::KIND).to_string();
        Self::new(client, collection_id)
    }

    pub fn collection_id(&self) -> &str {
        &self.collection_id
    }

    pub async fn list_all(&self) -> Result<Vec<Record<E>>, AppError> {
        self.client.list(&self.collection_id).await
    }

    pub async fn get_one(&self, record_id: &str) -> Result<Record<E>, AppError> {
        self.client.get(&self.collection_id, record_id).await
    }

    pub async fn create_one(&self, fields: &E) -> Result<JsonValue, AppError> {
        self.client.create(&self.collection_id, fields).await
    }

    pub async fn update_one(&self, record_id: &str, fields: &E) -> Result<JsonValue, AppError> {
        self.client.update(&self.collection_id, record_id, fields).await
    }

    pub async fn delete_one(&self, record_id: &str) -> Result<bool, AppError> {
        self.client.delete(&self.collection_id, record_id).await
    }
}

pub type InventoryRepository<T> = Repository<InventoryItemFields, T>;
pub type CategoryRepository<T> = Repository<CategoryFields, T>;
pub type LocationRepository<T> = Repository<LocationFields, T>;
