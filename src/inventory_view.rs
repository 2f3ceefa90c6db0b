//! Views derived from a snapshot. Everything here is recomputed on demand
//! and never cached.

use std::fmt::{Display, Formatter};

use crate::record_model::{Entity, InventoryItem, InventoryItemFields, Record};

/// Category filter value that disables category matching.
pub const CATEGORY_FILTER_ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    SoldOut,
    LowStock,
    InStock,
}

impl StockStatus {
    /// Missing quantity or threshold counts as zero.
    ///
    /// ```rust
    /// use living_inventory::inventory_view::StockStatus;
    /// use living_inventory::record_model::InventoryItemFields;
    ///
    /// let item = InventoryItemFields { quantity: Some(5.0), min_quantity: Some(10.0), ..Default::default() };
    /// assert_eq!(StockStatus::of(&item), StockStatus::LowStock);
    /// assert_eq!(StockStatus::of(&InventoryItemFields::default()), StockStatus::SoldOut);
    /// ```
    pub fn of(fields: &InventoryItemFields) -> Self {
        let quantity = fields.quantity_or_zero();
        if quantity == 0.0 {
            StockStatus::SoldOut
        } else if quantity <= fields.min_quantity_or_zero() {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::SoldOut => "sold out",
            StockStatus::LowStock => "low stock",
            StockStatus::InStock => "in stock",
        }
    }
}

impl Display for StockStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Items whose name or sku contains `search` (case-insensitive) and whose
/// category equals `category`, unless `category` is [`CATEGORY_FILTER_ALL`].
pub fn filter_items<'a>(items: &'a [InventoryItem], search: &str, category: &str) -> Vec<&'a InventoryItem> {
    let needle = search.to_lowercase();
    items
        .iter()
        .filter(|item| {
            let fields = &item.fields;
            let matches_search = fields.name_or_empty().to_lowercase().contains(&needle)
                || fields.sku_or_empty().to_lowercase().contains(&needle);
            let matches_category =
                category == CATEGORY_FILTER_ALL || fields.category.as_deref() == Some(category);
            matches_search && matches_category
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InventoryTotals {
    pub item_count: usize,
    pub total_quantity: f64,
    pub total_value: f64,
    /// Items at or below their minimum threshold, sold-out ones included.
    pub low_stock_count: usize,
}

impl InventoryTotals {
    pub fn compute(items: &[InventoryItem]) -> Self {
        items.iter().fold(Self::default(), |mut totals, item| {
            let fields = &item.fields;
            totals.item_count += 1;
            totals.total_quantity += fields.quantity_or_zero();
            totals.total_value += fields.value();
            if fields.quantity_or_zero() <= fields.min_quantity_or_zero() {
                totals.low_stock_count += 1;
            }
            totals
        })
    }
}

/// Display name of the record `id` refers to, or `id` itself when the
/// reference dangles or the target has no name.
pub fn resolve_name<E: Entity>(records: &[Record<E>], id: &str) -> String {
    records
        .iter()
        .find(|record| record.record_id == id)
        .and_then(|record| record.fields.display_name())
        .filter(|name| !name.is_empty())
        .unwrap_or(id)
        .to_string()
}
