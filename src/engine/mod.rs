mod admission;
mod conflict;
mod error;
mod lifecycle;
mod queries;
mod store;

pub use error::{EngineError, StoreError};
pub use store::{
    InMemoryRegistry, InMemoryStore, ReservationQuery, ReservationStore, ResourceRegistry,
};

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use ulid::Ulid;

use crate::model::*;
use crate::notify::NotifyHub;

/// The reservation scheduling engine. Holds explicit handles to its
/// collaborators (no process-wide singletons) so embedders can supply
/// database-backed stores and tests can supply doubles.
pub struct Engine {
    registry: Arc<dyn ResourceRegistry>,
    store: Arc<dyn ReservationStore>,
    pub notify: Arc<NotifyHub>,
    /// Per-resource advisory locks. Admission's conflict-check-then-insert
    /// and same-resource transitions serialize here; distinct resources
    /// never contend.
    resource_locks: DashMap<Ulid, Arc<Mutex<()>>>,
}

impl Engine {
    pub fn new(
        registry: Arc<dyn ResourceRegistry>,
        store: Arc<dyn ReservationStore>,
        notify: Arc<NotifyHub>,
    ) -> Self {
        Self {
            registry,
            store,
            notify,
            resource_locks: DashMap::new(),
        }
    }

    /// Engine over the bundled in-memory collaborators.
    pub fn in_memory() -> (Self, Arc<InMemoryRegistry>, Arc<InMemoryStore>) {
        let registry = Arc::new(InMemoryRegistry::new());
        let store = Arc::new(InMemoryStore::new());
        let engine = Self::new(
            registry.clone(),
            store.clone(),
            Arc::new(NotifyHub::new()),
        );
        (engine, registry, store)
    }

    pub(super) fn resource_lock(&self, resource_id: Ulid) -> Arc<Mutex<()>> {
        self.resource_locks
            .entry(resource_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone()
    }

    // ── Read-side store access with the retry-once policy ────
    //
    // A store failure before any mutation has been issued is side-effect
    // free, so it is retried exactly once. Mutating calls (insert,
    // update_status) are never retried — a repeat could double-insert.

    pub(super) async fn fetch_resource(
        &self,
        id: &Ulid,
    ) -> Result<Option<Resource>, EngineError> {
        match self.registry.get_resource(id).await {
            Ok(found) => Ok(found),
            Err(first) => {
                tracing::warn!("registry read failed, retrying once: {first}");
                metrics::counter!(crate::observability::STORE_RETRIES_TOTAL).increment(1);
                Ok(self.registry.get_resource(id).await?)
            }
        }
    }

    pub(super) async fn fetch_active(
        &self,
        resource_id: &Ulid,
    ) -> Result<Vec<Reservation>, EngineError> {
        match self.store.find_active_by_resource(resource_id).await {
            Ok(active) => Ok(active),
            Err(first) => {
                tracing::warn!("store read failed, retrying once: {first}");
                metrics::counter!(crate::observability::STORE_RETRIES_TOTAL).increment(1);
                Ok(self.store.find_active_by_resource(resource_id).await?)
            }
        }
    }

    pub(super) async fn fetch_reservation(
        &self,
        id: &Ulid,
    ) -> Result<Option<Reservation>, EngineError> {
        match self.store.find_by_id(id).await {
            Ok(found) => Ok(found),
            Err(first) => {
                tracing::warn!("store read failed, retrying once: {first}");
                metrics::counter!(crate::observability::STORE_RETRIES_TOTAL).increment(1);
                Ok(self.store.find_by_id(id).await?)
            }
        }
    }

    pub(super) fn store(&self) -> &dyn ReservationStore {
        self.store.as_ref()
    }
}
