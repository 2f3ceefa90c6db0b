//! Store configuration.
//!
//! The base URL and the collection ("app") identifiers are fixed per build.
//! [`StoreConfig::default`] carries the production values; a deployment that
//! targets a different workspace bakes in its own JSON via
//! [`StoreConfig::from_json`].

use serde::{Deserialize, Serialize};

use crate::app_error::AppError;
use crate::record_model::EntityKind;

/// Base path of the hosted record store REST API.
pub const API_BASE_URL: &str = "https://my.living-apps.de/rest";

pub const INVENTORY_ITEMS_APP_ID: &str = "698494eea42675c0592289b9";
pub const CATEGORIES_APP_ID: &str = "698494eea42675c0592289ba";
pub const LOCATIONS_APP_ID: &str = "698494eea42675c0592289bb";

/// One collection identifier per entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionIds {
    pub inventory_items: String,
    pub categories: String,
    pub locations: String,
}

impl Default for CollectionIds {
    fn default() -> Self {
        Self {
            inventory_items: INVENTORY_ITEMS_APP_ID.to_string(),
            categories: CATEGORIES_APP_ID.to_string(),
            locations: LOCATIONS_APP_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub collections: CollectionIds,
}

fn default_base_url() -> String {
    API_BASE_URL.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            collections: CollectionIds::default(),
        }
    }
}

impl StoreConfig {
    /// Parses a baked-in JSON configuration. Missing members fall back to the
    /// production defaults.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let mut config: StoreConfig = serde_json::from_str(json)?;
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        if config.base_url.is_empty() {
            return Err(AppError::BadRequest("base_url must not be empty".to_string()));
        }
        Ok(config)
    }

    pub fn collection_id(&self, kind: EntityKind) -> &str {
        match kind {
            EntityKind::InventoryItem => &self.collections.inventory_items,
            EntityKind::Category => &self.collections.categories,
            EntityKind::Location => &self.collections.locations,
        }
    }

    /// `{base_url}/apps/{collection_id}/records`
    pub fn records_url(&self, collection_id: &str) -> String {
        format!("{}/apps/{}/records", self.base_url, collection_id)
    }

    /// `{base_url}/apps/{collection_id}/records/{record_id}`
    pub fn record_url(&self, collection_id: &str, record_id: &str) -> String {
        format!("{}/{}", self.records_url(collection_id), record_id)
    }
}
