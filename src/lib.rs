//! # Living Inventory
//!
//! A typed client and dashboard state controller for inventory data kept in a
//! hosted "Living Apps" record database. The store is reached over a small
//! JSON REST API; this crate wraps it in a generic record client, binds that
//! client to one collection per entity kind, and keeps an in-memory snapshot
//! of every collection consistent with the user's actions.
//!
//! ## Features
//!
//! - **Generic record client**: list, get, create, update (partial patch) and
//!   delete against `{base_url}/apps/{collection}/records[/{id}]`
//! - **Typed repositories**: inventory items, categories and locations, each
//!   bound to its fixed collection identifier
//! - **Snapshot reconciliation**: full reload after every create and update,
//!   local removal after delete
//! - **Derived views**: text and category filtering, stock totals, three-tier
//!   stock status, dangling-reference-tolerant name resolution
//! - **Single-flight saves**: overlapping saves on the same record are rejected
//! - **Injectable transport and credentials**: swap the HTTP layer or the
//!   session cookie source in tests
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use living_inventory::{Dashboard, ReqwestTransport, SessionCookie, StoreConfig, CATEGORY_FILTER_ALL};
//!
//! # async fn run() -> Result<(), living_inventory::AppError> {
//! let transport = ReqwestTransport::new(Arc::new(SessionCookie("session=abc".to_string())));
//! let dashboard = Dashboard::new(StoreConfig::default(), transport);
//!
//! dashboard.refresh().await?;
//! for item in dashboard.filtered_items("lam", CATEGORY_FILTER_ALL) {
//!     let category = dashboard.category_name(item.fields.category.as_deref().unwrap_or(""));
//!     println!("{} ({category})", item.fields.name_or_empty());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Every remote failure surfaces as [`AppError::RemoteStore`] carrying the raw
//! response body. There is no retry; the controller records a [`Notice`] and
//! leaves its snapshot and the submitted form untouched.

pub mod app_error;
pub mod config;
pub mod credentials;
pub mod dashboard_state;
pub mod entity_form;
pub mod inventory_view;
pub mod record_client;
pub mod record_model;
pub mod record_url;
pub mod repository;
pub mod single_flight;
pub mod transport;

pub use crate::app_error::AppError;
pub use crate::config::{CollectionIds, StoreConfig, API_BASE_URL};
pub use crate::credentials::{CredentialProvider, NoCredentials, SessionCookie};
pub use crate::dashboard_state::{CollectionPhase, Dashboard, Notice, Rejected, SnapshotEntity};
pub use crate::entity_form::{CategoryForm, FormInput, InventoryForm, LocationForm};
pub use crate::inventory_view::{
    filter_items, resolve_name, InventoryTotals, StockStatus, CATEGORY_FILTER_ALL,
};
pub use crate::record_client::RecordClient;
pub use crate::record_model::{
    Category, CategoryFields, Entity, EntityKind, InventoryItem, InventoryItemFields, Location,
    LocationFields, Record,
};
pub use crate::record_url::{create_record_url, extract_record_id};
pub use crate::repository::{CategoryRepository, InventoryRepository, LocationRepository, Repository};
pub use crate::transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};
