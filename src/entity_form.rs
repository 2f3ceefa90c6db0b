//! Dialog-scoped form inputs.
//!
//! Each add or edit dialog owns its own form value holding the raw text of
//! its inputs. [`FormInput::submit`] is pure: it trims text and coerces the
//! numeric inputs, nothing more. Plain text is always sent, empty or not, so
//! an edit can clear a stored value. An empty category or location is a
//! missing reference and is left out of the body: a create stores no
//! reference, an edit keeps the stored one.

use crate::app_error::AppError;
use crate::record_model::{CategoryFields, Entity, InventoryItemFields, LocationFields, Record};

/// Pre-filled minimum stock threshold of a new item.
pub const DEFAULT_MIN_QUANTITY: f64 = 10.0;

pub trait FormInput: Clone + Send + Sync {
    type Fields: Entity;

    /// Inputs of a fresh add dialog.
    fn blank() -> Self;

    /// Inputs of an edit dialog opened on `record`.
    fn from_record(record: &Record<Self::Fields>) -> Self;

    fn submit(&self) -> Result<Self::Fields, AppError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryForm {
    pub name: String,
    pub sku: String,
    pub category: String,
    pub quantity: String,
    pub min_quantity: String,
    pub unit_price: String,
    pub location: String,
}

impl FormInput for InventoryForm {
    type Fields = InventoryItemFields;

    fn blank() -> Self {
        Self {
            name: String::new(),
            sku: String::new(),
            category: String::new(),
            quantity: "0".to_string(),
            min_quantity: format_number(DEFAULT_MIN_QUANTITY),
            unit_price: "0".to_string(),
            location: String::new(),
        }
    }

    fn from_record(record: &Record<InventoryItemFields>) -> Self {
        let fields = &record.fields;
        Self {
            name: fields.name_or_empty().to_string(),
            sku: fields.sku_or_empty().to_string(),
            category: fields.category.clone().unwrap_or_default(),
            quantity: format_number(fields.quantity_or_zero()),
            // an unset or zero threshold opens with the add-dialog default
            min_quantity: format_number(
                fields
                    .min_quantity
                    .filter(|min| *min != 0.0)
                    .unwrap_or(DEFAULT_MIN_QUANTITY),
            ),
            unit_price: format_number(fields.unit_price_or_zero()),
            location: fields.location.clone().unwrap_or_default(),
        }
    }

    fn submit(&self) -> Result<InventoryItemFields, AppError> {
        Ok(InventoryItemFields {
            name: Some(self.name.trim().to_string()),
            sku: Some(self.sku.trim().to_string()),
            category: reference(&self.category),
            quantity: Some(coerce_number("quantity", &self.quantity)?),
            min_quantity: Some(coerce_number("min_quantity", &self.min_quantity)?),
            unit_price: Some(coerce_number("unit_price", &self.unit_price)?),
            location: reference(&self.location),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
}

impl FormInput for CategoryForm {
    type Fields = CategoryFields;

    fn blank() -> Self {
        Self::default()
    }

    fn from_record(record: &Record<CategoryFields>) -> Self {
        Self {
            name: record.fields.name.clone().unwrap_or_default(),
        }
    }

    fn submit(&self) -> Result<CategoryFields, AppError> {
        Ok(CategoryFields {
            name: Some(self.name.trim().to_string()),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationForm {
    pub name: String,
    pub description: String,
}

impl FormInput for LocationForm {
    type Fields = LocationFields;

    fn blank() -> Self {
        Self::default()
    }

    fn from_record(record: &Record<LocationFields>) -> Self {
        Self {
            name: record.fields.name.clone().unwrap_or_default(),
            description: record.fields.description.clone().unwrap_or_default(),
        }
    }

    fn submit(&self) -> Result<LocationFields, AppError> {
        Ok(LocationFields {
            name: Some(self.name.trim().to_string()),
            description: Some(self.description.trim().to_string()),
        })
    }
}

fn reference(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Empty input counts as zero.
fn coerce_number(field: &str, raw: &str) -> Result<f64, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AppError::BadRequest(format!("{field} is not a number: {raw}"))),
    }
}

fn format_number(value: f64) -> String {
    value.to_string()
}
