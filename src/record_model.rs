//! Record and field-bag definitions.
//!
//! The remote store does not enforce a schema: every attribute of a field bag
//! may be absent. Field bags therefore hold `Option`s only and skip absent
//! members when serialized, which lets the same type act as a full record
//! body on create and as a partial patch on update.
//!
//! # Wire shapes
//!
//! A list response is a JSON object keyed by record id:
//!
//! ```json
//! {
//!   "698494eea42675c0592289c1": {
//!     "createdat": "2025-02-05T10:12:00",
//!     "updatedat": null,
//!     "fields": { "name": "Lampe", "sku": "A1", "quantity": 4 }
//!   }
//! }
//! ```
//!
//! A single-record response carries the same members plus an `id` key.
//!
//! Attribute values are decoded leniently: a value of the wrong JSON type is
//! treated as absent (numeric strings are read as numbers), so one odd record
//! never hides the rest of a collection.

use std::fmt::{Display, Formatter};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/// One entity instance of the remote store.
///
/// `record_id` is assigned by the store and never generated locally.
///
/// ```rust
/// use living_inventory::record_model::{InventoryItemFields, Record};
///
/// let record = Record {
///     record_id: "698494eea42675c0592289c1".to_string(),
///     createdat: Some("2025-02-05T10:12:00".to_string()),
///     updatedat: None,
///     fields: InventoryItemFields {
///         name: Some("Lampe".to_string()),
///         quantity: Some(4.0),
///         ..Default::default()
///     },
/// };
/// assert_eq!(record.fields.quantity_or_zero(), 4.0);
/// assert_eq!(record.fields.unit_price_or_zero(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<F> {
    pub record_id: String,
    #[serde(default)]
    pub createdat: Option<String>,
    #[serde(default)]
    pub updatedat: Option<String>,
    pub fields: F,
}

/// Record body as the store sends it, before the identifier is attached.
#[derive(Debug, Deserialize)]
pub(crate) struct RawRecord<F> {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub createdat: Option<String>,
    #[serde(default)]
    pub updatedat: Option<String>,
    #[serde(default)]
    pub fields: Option<F>,
}

impl<F: Default> RawRecord<F> {
    pub(crate) fn into_record(self, record_id: String) -> Record<F> {
        Record {
            record_id,
            createdat: self.createdat,
            updatedat: self.updatedat,
            fields: self.fields.unwrap_or_default(),
        }
    }
}

/// Entity kinds the dashboard knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    InventoryItem,
    Category,
    Location,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::InventoryItem => write!(f, "inventory_items"),
            EntityKind::Category => write!(f, "categories"),
            EntityKind::Location => write!(f, "locations"),
        }
    }
}

/// A typed field bag bound to one entity kind.
pub trait Entity:
    Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static
{
    const KIND: EntityKind;

    /// Name shown when another record references this one.
    fn display_name(&self) -> Option<&str>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryItemFields {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Foreign identifier into the categories collection.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub min_quantity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    /// Foreign identifier into the locations collection.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl InventoryItemFields {
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn sku_or_empty(&self) -> &str {
        self.sku.as_deref().unwrap_or("")
    }

    pub fn quantity_or_zero(&self) -> f64 {
        self.quantity.unwrap_or(0.0)
    }

    pub fn min_quantity_or_zero(&self) -> f64 {
        self.min_quantity.unwrap_or(0.0)
    }

    pub fn unit_price_or_zero(&self) -> f64 {
        self.unit_price.unwrap_or(0.0)
    }

    /// Stock value of this item, `quantity * unit_price`.
    pub fn value(&self) -> f64 {
        self.quantity_or_zero() * self.unit_price_or_zero()
    }
}

impl Entity for InventoryItemFields {
    const KIND: EntityKind = EntityKind::InventoryItem;

    fn display_name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryFields {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Entity for CategoryFields {
    const KIND: EntityKind = EntityKind::Category;

    fn display_name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationFields {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Entity for LocationFields {
    const KIND: EntityKind = EntityKind::Location;

    fn display_name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Numeric attribute as stored. Numeric strings are coerced; any other
/// shape counts as absent.
fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match JsonValue::deserialize(deserializer)? {
        JsonValue::Number(number) => number.as_f64(),
        JsonValue::String(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    })
}

/// Text attribute as stored. Numbers and booleans are rendered as text;
/// arrays and objects count as absent.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match JsonValue::deserialize(deserializer)? {
        JsonValue::String(text) => Some(text),
        JsonValue::Number(number) => Some(number.to_string()),
        JsonValue::Bool(flag) => Some(flag.to_string()),
        _ => None,
    })
}

pub type InventoryItem = Record<InventoryItemFields>;
pub type Category = Record<CategoryFields>;
pub type Location = Record<LocationFields>;
