use async_trait::async_trait;
use dashmap::DashMap;
use rust_decimal::Decimal;
use ulid::Ulid;

use crate::model::*;

use super::error::StoreError;

/// Typed query criteria. Each set field maps to one predicate; unset fields
/// match everything. Replaces ad hoc conditionally-built filter objects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationQuery {
    pub resource_id: Option<Ulid>,
    pub requester_id: Option<Ulid>,
    pub statuses: Option<Vec<ReservationStatus>>,
    pub overlapping: Option<Period>,
}

impl ReservationQuery {
    pub fn resource(mut self, id: Ulid) -> Self {
        self.resource_id = Some(id);
        self
    }

    pub fn requester(mut self, id: Ulid) -> Self {
        self.requester_id = Some(id);
        self
    }

    pub fn with_statuses(mut self, statuses: &[ReservationStatus]) -> Self {
        self.statuses = Some(statuses.to_vec());
        self
    }

    /// Restrict to reservations whose period overlaps `period` (half-open).
    pub fn overlapping(mut self, period: Period) -> Self {
        self.overlapping = Some(period);
        self
    }

    pub fn matches(&self, r: &Reservation) -> bool {
        if let Some(rid) = self.resource_id
            && r.resource_id != rid
        {
            return false;
        }
        if let Some(uid) = self.requester_id
            && r.requester_id != uid
        {
            return false;
        }
        if let Some(ref statuses) = self.statuses
            && !statuses.contains(&r.status)
        {
            return false;
        }
        if let Some(ref period) = self.overlapping
            && !r.period.overlaps(period)
        {
            return false;
        }
        true
    }
}

/// Durable home of reservation records. Implementations must be safe under
/// concurrent calls; the engine layers per-resource mutual exclusion on top
/// for the conflict-check-then-insert critical section.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn insert(&self, reservation: Reservation) -> Result<Reservation, StoreError>;

    async fn find_by_id(&self, id: &Ulid) -> Result<Option<Reservation>, StoreError>;

    /// All reservations on the resource whose status is pending or confirmed.
    async fn find_active_by_resource(
        &self,
        resource_id: &Ulid,
    ) -> Result<Vec<Reservation>, StoreError>;

    /// Set status and updated_at. Returns `None` when the id is unknown.
    async fn update_status(
        &self,
        id: &Ulid,
        status: ReservationStatus,
        updated_at: Ms,
    ) -> Result<Option<Reservation>, StoreError>;

    async fn find(&self, query: &ReservationQuery) -> Result<Vec<Reservation>, StoreError>;
}

/// Read-mostly lookup of bookable resources. Writes come from an external
/// management collaborator; the engine only reads a snapshot at admission.
#[async_trait]
pub trait ResourceRegistry: Send + Sync {
    async fn get_resource(&self, id: &Ulid) -> Result<Option<Resource>, StoreError>;
}

/// In-memory reservation store: record map plus a per-resource id index.
pub struct InMemoryStore {
    reservations: DashMap<Ulid, Reservation>,
    by_resource: DashMap<Ulid, Vec<Ulid>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            reservations: DashMap::new(),
            by_resource: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }
}

#[async_trait]
impl ReservationStore for InMemoryStore {
    async fn insert(&self, reservation: Reservation) -> Result<Reservation, StoreError> {
        self.by_resource
            .entry(reservation.resource_id)
            .or_default()
            .push(reservation.id);
        self.reservations.insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn find_by_id(&self, id: &Ulid) -> Result<Option<Reservation>, StoreError> {
        Ok(self.reservations.get(id).map(|e| e.value().clone()))
    }

    async fn find_active_by_resource(
        &self,
        resource_id: &Ulid,
    ) -> Result<Vec<Reservation>, StoreError> {
        let ids = self
            .by_resource
            .get(resource_id)
            .map(|e| e.value().clone())
            .unwrap_or_default();
        let mut active = Vec::new();
        for id in ids {
            if let Some(r) = self.reservations.get(&id)
                && r.status.is_active()
            {
                active.push(r.value().clone());
            }
        }
        Ok(active)
    }

    async fn update_status(
        &self,
        id: &Ulid,
        status: ReservationStatus,
        updated_at: Ms,
    ) -> Result<Option<Reservation>, StoreError> {
        match self.reservations.get_mut(id) {
            Some(mut entry) => {
                entry.status = status;
                entry.updated_at = updated_at;
                Ok(Some(entry.value().clone()))
            }
            None => Ok(None),
        }
    }

    async fn find(&self, query: &ReservationQuery) -> Result<Vec<Reservation>, StoreError> {
        // Narrow by the resource index when the criteria allow it.
        let mut hits: Vec<Reservation> = match query.resource_id {
            Some(rid) => {
                let ids = self
                    .by_resource
                    .get(&rid)
                    .map(|e| e.value().clone())
                    .unwrap_or_default();
                ids.iter()
                    .filter_map(|id| self.reservations.get(id).map(|e| e.value().clone()))
                    .filter(|r| query.matches(r))
                    .collect()
            }
            None => self
                .reservations
                .iter()
                .filter(|e| query.matches(e.value()))
                .map(|e| e.value().clone())
                .collect(),
        };
        hits.sort_by_key(|r| (r.created_at, r.id));
        hits.truncate(crate::limits::MAX_QUERY_RESULTS);
        Ok(hits)
    }
}

/// In-memory resource registry. The mutating methods model the external
/// management collaborator; the engine itself only calls `get_resource`.
pub struct InMemoryRegistry {
    resources: DashMap<Ulid, Resource>,
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self {
            resources: DashMap::new(),
        }
    }

    /// Insert or replace. Rejects a non-positive day rate up front so the
    /// invariant holds for every stored resource.
    pub fn upsert(&self, resource: Resource) -> Result<(), super::EngineError> {
        if resource.day_rate <= Decimal::ZERO {
            return Err(super::EngineError::InvalidDayRate(resource.id));
        }
        self.resources.insert(resource.id, resource);
        Ok(())
    }

    pub fn set_available(&self, id: &Ulid, available: bool) -> bool {
        match self.resources.get_mut(id) {
            Some(mut entry) => {
                entry.available = available;
                true
            }
            None => false,
        }
    }

    pub fn remove(&self, id: &Ulid) -> Option<Resource> {
        self.resources.remove(id).map(|(_, r)| r)
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }
}

#[async_trait]
impl ResourceRegistry for InMemoryRegistry {
    async fn get_resource(&self, id: &Ulid) -> Result<Option<Resource>, StoreError> {
        Ok(self.resources.get(id).map(|e| e.value().clone()))
    }
}
