//! Generic client for the hosted record store.
//!
//! One HTTP call per operation against
//! `{base_url}/apps/{collection_id}/records[/{id}]`. Every non-success status
//! fails with [`AppError::RemoteStore`] carrying the raw response body; there
//! is no per-status handling and no retry.

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value as JsonValue};

use crate::app_error::AppError;
use crate::config::StoreConfig;
use crate::record_model::{RawRecord, Record};
use crate::transport::{HttpRequest, Method, Transport};

pub struct RecordClient<T> {
    config: StoreConfig,
    transport: T,
}

impl<T: Transport> RecordClient<T> {
    pub fn new(config: StoreConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Fetches every record of a collection.
    ///
    /// The store answers with an object keyed by record id; each key becomes
    /// the `record_id` of the record built from its value. The order of the
    /// returned records is not meaningful. An entry whose body cannot be read
    /// at all is kept under its key with an empty field bag and a warning, so
    /// the result always has one record per key.
    pub async fn list<F>(&self, collection_id: &str) -> Result<Vec<Record<F>>, AppError>
    where
        F: DeserializeOwned + Default,
    {
        let url = self.config.records_url(collection_id);
        let body = self.call(Method::Get, url, None).await?;
        let keyed: Map<String, JsonValue> = parse_body(&body)?;

        let mut records = Vec::with_capacity(keyed.len());
        for (record_id, value) in keyed {
            match serde_json::from_value::<RawRecord<F>>(value) {
                Ok(raw) => records.push(raw.into_record(record_id)),
                Err(e) => {
                    warn!("Unreadable record {record_id} in {collection_id}: {e}");
                    records.push(Record {
                        record_id,
                        createdat: None,
                        updatedat: None,
                        fields: F::default(),
                    });
                }
            }
        }

        debug!("Listed {} records from {}", records.len(), collection_id);
        Ok(records)
    }

    /// Fetches one record. The response names the identifier `id`; when it is
    /// missing the requested id is used.
    pub async fn get<F>(&self, collection_id: &str, record_id: &str) -> Result<Record<F>, AppError>
    where
        F: DeserializeOwned + Default,
    {
        let url = self.config.record_url(collection_id, record_id);
        let body = self.call(Method::Get, url, None).await?;
        let mut raw: RawRecord<F> = parse_body(&body)?;
        let id = raw.id.take().unwrap_or_else(|| record_id.to_string());

        Ok(raw.into_record(id))
    }

    /// Creates a record from a full field bag. The result shape is whatever
    /// the store returns; re-list to observe the assigned id and timestamps.
    pub async fn create<F: Serialize>(&self, collection_id: &str, fields: &F) -> Result<JsonValue, AppError> {
        let url = self.config.records_url(collection_id);
        let body = json!({ "fields": serde_json::to_value(fields)? });
        let response = self.call(Method::Post, url, Some(body)).await?;

        Ok(parse_opaque(&response))
    }

    /// Sends a partial field bag. Keys absent from `fields` keep their
    /// stored values.
    pub async fn update<F: Serialize>(
        &self,
        collection_id: &str,
        record_id: &str,
        fields: &F,
    ) -> Result<JsonValue, AppError> {
        let url = self.config.record_url(collection_id, record_id);
        let body = json!({ "fields": serde_json::to_value(fields)? });
        let response = self.call(Method::Patch, url, Some(body)).await?;

        Ok(parse_opaque(&response))
    }

    /// Deletes a record. Any success status counts, whatever the body.
    pub async fn delete(&self, collection_id: &str, record_id: &str) -> Result<bool, AppError> {
        let url = self.config.record_url(collection_id, record_id);
        self.call(Method::Delete, url, None).await?;
        Ok(true)
    }

    async fn call(&self, method: Method, url: String, body: Option<JsonValue>) -> Result<String, AppError> {
        debug!("{method} {url}");
        let request = HttpRequest { method, url, body };
        let url = request.url.clone();

        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("{method} {url} failed: {e}");
                return Err(e);
            }
        };

        if !response.is_success() {
            warn!("{method} {url} returned status {}", response.status);
            return Err(AppError::RemoteStore(response.body));
        }

        Ok(response.body)
    }
}

fn parse_body<D: DeserializeOwned>(body: &str) -> Result<D, AppError> {
    serde_json::from_str(body)
        .map_err(|e| AppError::SerializationError(format!("Unexpected response body: {e}")))
}

/// Write responses are not guaranteed to be JSON; an empty body maps to `null`
/// and anything unparseable is kept as a string.
fn parse_opaque(body: &str) -> JsonValue {
    if body.trim().is_empty() {
        return JsonValue::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| JsonValue::String(body.to_string()))
}
