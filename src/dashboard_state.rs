//! Dashboard view state.
//!
//! [`Dashboard`] owns the in-memory snapshot of every collection and is the
//! only thing that mutates it. Snapshots are replaced wholesale by
//! [`Dashboard::refresh`] and filtered in place after a successful delete;
//! creates and updates always end in a full refresh.
//!
//! Per collection the phase moves `Idle -> Loading -> Ready` on refresh and
//! `Ready -> Saving -> Ready` around a create or update. A collection stays
//! `Saving` until its last in-flight save has finished. Saves are guarded
//! per record (per collection for creates): an overlapping save on the same
//! key fails with [`AppError::Busy`] before anything is sent.
//!
//! ```no_run
//! use std::sync::Arc;
//! use living_inventory::{
//!     Dashboard, FormInput, InventoryForm, ReqwestTransport, SessionCookie, StoreConfig,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = ReqwestTransport::new(Arc::new(SessionCookie("session=abc".to_string())));
//! let dashboard = Dashboard::new(StoreConfig::default(), transport);
//! dashboard.refresh().await?;
//!
//! let mut form = InventoryForm::blank();
//! form.name = "Monitor".to_string();
//! form.quantity = "5".to_string();
//! let form = dashboard.create(form).await.map_err(|rejected| rejected.error)?;
//! assert_eq!(form, InventoryForm::blank());
//!
//! let totals = dashboard.totals();
//! println!("{} items worth {:.2}", totals.item_count, totals.total_value);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};

use log::{info, warn};

use crate::app_error::AppError;
use crate::config::StoreConfig;
use crate::entity_form::FormInput;
use crate::inventory_view::{filter_items, resolve_name, InventoryTotals, StockStatus};
use crate::record_client::RecordClient;
use crate::record_model::{
    Category, CategoryFields, Entity, EntityKind, InventoryItem, InventoryItemFields, Location,
    LocationFields, Record,
};
use crate::repository::Repository;
use crate::single_flight::SingleFlight;
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionPhase {
    Idle,
    Loading,
    Ready,
    Saving,
}

/// Most recent user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A write failed; the UI should block until acknowledged.
    Blocking(String),
    /// A load failed; the previous snapshot is still shown.
    Background(String),
}

/// A save that did not go through, with the form exactly as submitted.
#[derive(Debug)]
pub struct Rejected<F> {
    pub form: F,
    pub error: AppError,
}

impl<F> Display for Rejected<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Snapshots {
    pub items: Vec<InventoryItem>,
    pub categories: Vec<Category>,
    pub locations: Vec<Location>,
}

/// Field bags that have a snapshot slot in the dashboard.
pub trait SnapshotEntity: Entity {
    fn slot(snapshots: &Snapshots) -> &Vec<Record<Self>>;
    fn slot_mut(snapshots: &mut Snapshots) -> &mut Vec<Record<Self>>;
}

impl SnapshotEntity for InventoryItemFields {
    fn slot(snapshots: &Snapshots) -> &Vec<Record<Self>> {
        &snapshots.items
    }

    fn slot_mut(snapshots: &mut Snapshots) -> &mut Vec<Record<Self>> {
        &mut snapshots.items
    }
}

impl SnapshotEntity for CategoryFields {
    fn slot(snapshots: &Snapshots) -> &Vec<Record<Self>> {
        &snapshots.categories
    }

    fn slot_mut(snapshots: &mut Snapshots) -> &mut Vec<Record<Self>> {
        &mut snapshots.categories
    }
}

impl SnapshotEntity for LocationFields {
    fn slot(snapshots: &Snapshots) -> &Vec<Record<Self>> {
        &snapshots.locations
    }

    fn slot_mut(snapshots: &mut Snapshots) -> &mut Vec<Record<Self>> {
        &mut snapshots.locations
    }
}

const ALL_KINDS: [EntityKind; 3] = [EntityKind::InventoryItem, EntityKind::Category, EntityKind::Location];

struct ViewState {
    snapshots: Snapshots,
    phases: HashMap<EntityKind, CollectionPhase>,
    /// In-flight creates and updates per collection.
    saving: HashMap<EntityKind, usize>,
    notice: Option<Notice>,
}

impl ViewState {
    fn pending_saves(&self, kind: EntityKind) -> usize {
        self.saving.get(&kind).copied().unwrap_or(0)
    }

    /// `Saving` while any save of `kind` is in flight, `Ready` otherwise.
    fn settle_phase(&mut self, kind: EntityKind) {
        let phase = if self.pending_saves(kind) > 0 {
            CollectionPhase::Saving
        } else {
            CollectionPhase::Ready
        };
        self.phases.insert(kind, phase);
    }
}

pub struct Dashboard<T> {
    client: Arc<RecordClient<T>>,
    state: Mutex<ViewState>,
    in_flight: SingleFlight,
}

impl<T: Transport> Dashboard<T> {
    pub fn new(config: StoreConfig, transport: T) -> Self {
        Self::with_client(Arc::new(RecordClient::new(config, transport)))
    }

    pub fn with_client(client: Arc<RecordClient<T>>) -> Self {
        let phases = ALL_KINDS.iter().map(|kind| (*kind, CollectionPhase::Idle)).collect();
        Self {
            client,
            state: Mutex::new(ViewState {
                snapshots: Snapshots::default(),
                phases,
                saving: HashMap::new(),
                notice: None,
            }),
            in_flight: SingleFlight::new(),
        }
    }

    pub fn repository<E: Entity>(&self) -> Repository<E, T> {
        Repository::for_entity(Arc::clone(&self.client))
    }

    /// Reloads every collection concurrently.
    ///
    /// Snapshots are replaced only when every fetch succeeded, so the three
    /// collections never mix old and new data. On any failure all previous
    /// snapshots stay in place and the first failure is returned and left as
    /// a background notice.
    pub async fn refresh(&self) -> Result<(), AppError> {
        {
            let mut state = self.state();
            for kind in ALL_KINDS {
                if state.pending_saves(kind) == 0 {
                    state.phases.insert(kind, CollectionPhase::Loading);
                }
            }
        }

        let items_repo = self.repository::<InventoryItemFields>();
        let categories_repo = self.repository::<CategoryFields>();
        let locations_repo = self.repository::<LocationFields>();

        let (items, categories, locations) = tokio::join!(
            items_repo.list_all(),
            categories_repo.list_all(),
            locations_repo.list_all(),
        );

        let mut first_error = None;
        let items = keep_loaded(&mut first_error, EntityKind::InventoryItem, items);
        let categories = keep_loaded(&mut first_error, EntityKind::Category, categories);
        let locations = keep_loaded(&mut first_error, EntityKind::Location, locations);

        {
            let mut state = self.state();
            for kind in ALL_KINDS {
                state.settle_phase(kind);
            }

            if let Some(e) = &first_error {
                state.notice = Some(Notice::Background(format!("Failed to load data: {e}")));
            } else if let (Some(items), Some(categories), Some(locations)) = (items, categories, locations) {
                state.snapshots = Snapshots {
                    items,
                    categories,
                    locations,
                };
                info!(
                    "Refreshed {} items, {} categories, {} locations",
                    state.snapshots.items.len(),
                    state.snapshots.categories.len(),
                    state.snapshots.locations.len()
                );
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Creates a record from an add dialog's inputs.
    ///
    /// On success the collections are reloaded and a blank form is returned;
    /// on failure the submitted form comes back untouched for a retry.
    pub async fn create<Fm>(&self, form: Fm) -> Result<Fm, Rejected<Fm>>
    where
        Fm: FormInput,
        Fm::Fields: SnapshotEntity,
    {
        let kind = <Fm::Fields as Entity>::KIND;
        let fields = match form.submit() {
            Ok(fields) => fields,
            Err(e) => return Err(self.reject(kind, "create", form, e)),
        };
        let _guard = match self.in_flight.try_acquire(format!("{kind}:new")) {
            Ok(guard) => guard,
            Err(e) => return Err(self.reject(kind, "create", form, e)),
        };

        self.begin_save(kind);
        let result = self.repository::<Fm::Fields>().create_one(&fields).await;
        self.finish_save(kind, "create", form, result).await
    }

    /// Sends an edit dialog's inputs as a patch of `record_id`.
    pub async fn update<Fm>(&self, record_id: &str, form: Fm) -> Result<Fm, Rejected<Fm>>
    where
        Fm: FormInput,
        Fm::Fields: SnapshotEntity,
    {
        let kind = <Fm::Fields as Entity>::KIND;
        let fields = match form.submit() {
            Ok(fields) => fields,
            Err(e) => return Err(self.reject(kind, "update", form, e)),
        };
        let _guard = match self.in_flight.try_acquire(format!("{kind}:{record_id}")) {
            Ok(guard) => guard,
            Err(e) => return Err(self.reject(kind, "update", form, e)),
        };

        self.begin_save(kind);
        let result = self.repository::<Fm::Fields>().update_one(record_id, &fields).await;
        self.finish_save(kind, "update", form, result).await
    }

    /// Deletes `record_id` and drops it from the local snapshot without a
    /// reload. The snapshot is untouched when the call fails.
    pub async fn delete<E: SnapshotEntity>(&self, record_id: &str) -> Result<(), AppError> {
        let kind = E::KIND;
        let _guard = match self.in_flight.try_acquire(format!("{kind}:{record_id}")) {
            Ok(guard) => guard,
            Err(e) => return Err(self.fail_write(kind, "delete", e)),
        };

        if let Err(e) = self.repository::<E>().delete_one(record_id).await {
            return Err(self.fail_write(kind, "delete", e));
        }

        let mut state = self.state();
        E::slot_mut(&mut state.snapshots).retain(|record| record.record_id != record_id);
        info!("Deleted {record_id} from {kind}");
        Ok(())
    }

    pub fn phase(&self, kind: EntityKind) -> CollectionPhase {
        self.state()
            .phases
            .get(&kind)
            .copied()
            .unwrap_or(CollectionPhase::Idle)
    }

    pub fn is_saving(&self, key: &str) -> bool {
        self.in_flight.is_in_flight(key)
    }

    /// Returns and clears the pending notice.
    pub fn take_notice(&self) -> Option<Notice> {
        self.state().notice.take()
    }

    pub fn snapshot<E: SnapshotEntity>(&self) -> Vec<Record<E>> {
        E::slot(&self.state().snapshots).clone()
    }

    pub fn items(&self) -> Vec<InventoryItem> {
        self.snapshot::<InventoryItemFields>()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.snapshot::<CategoryFields>()
    }

    pub fn locations(&self) -> Vec<Location> {
        self.snapshot::<LocationFields>()
    }

    pub fn filtered_items(&self, search: &str, category: &str) -> Vec<InventoryItem> {
        let state = self.state();
        filter_items(&state.snapshots.items, search, category)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn totals(&self) -> InventoryTotals {
        InventoryTotals::compute(&self.state().snapshots.items)
    }

    pub fn stock_status(&self, record_id: &str) -> Option<StockStatus> {
        self.state()
            .snapshots
            .items
            .iter()
            .find(|item| item.record_id == record_id)
            .map(|item| StockStatus::of(&item.fields))
    }

    pub fn category_name(&self, category_id: &str) -> String {
        resolve_name(&self.state().snapshots.categories, category_id)
    }

    pub fn location_name(&self, location_id: &str) -> String {
        resolve_name(&self.state().snapshots.locations, location_id)
    }

    async fn finish_save<Fm: FormInput>(
        &self,
        kind: EntityKind,
        action: &str,
        form: Fm,
        result: Result<serde_json::Value, AppError>,
    ) -> Result<Fm, Rejected<Fm>> {
        match result {
            Ok(_) => {
                // a failed reload is already reported as a background notice
                let _ = self.refresh().await;
                self.end_save(kind);
                Ok(Fm::blank())
            }
            Err(e) => {
                self.end_save(kind);
                Err(self.reject(kind, action, form, e))
            }
        }
    }

    fn reject<Fm>(&self, kind: EntityKind, action: &str, form: Fm, error: AppError) -> Rejected<Fm> {
        let error = self.fail_write(kind, action, error);
        Rejected { form, error }
    }

    fn fail_write(&self, kind: EntityKind, action: &str, error: AppError) -> AppError {
        warn!("Failed to {action} {kind}: {error}");
        self.state().notice = Some(Notice::Blocking(format!("Failed to {action} {kind}: {error}")));
        error
    }

    fn begin_save(&self, kind: EntityKind) {
        let mut state = self.state();
        *state.saving.entry(kind).or_insert(0) += 1;
        state.phases.insert(kind, CollectionPhase::Saving);
    }

    fn end_save(&self, kind: EntityKind) {
        let mut state = self.state();
        if let Some(count) = state.saving.get_mut(&kind) {
            *count = count.saturating_sub(1);
        }
        state.settle_phase(kind);
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn keep_loaded<R>(
    first_error: &mut Option<AppError>,
    kind: EntityKind,
    result: Result<Vec<R>, AppError>,
) -> Option<Vec<R>> {
    match result {
        Ok(records) => Some(records),
        Err(error) => {
            warn!("Failed to load {kind}: {error}");
            first_error.get_or_insert(error);
            None
        }
    }
}
