use ulid::Ulid;

use crate::model::*;

use super::{Engine, EngineError, ReservationQuery};

impl Engine {
    /// Snapshot of a resource as the registry currently sees it.
    pub async fn resource(&self, id: &Ulid) -> Result<Option<Resource>, EngineError> {
        self.fetch_resource(id).await
    }

    pub async fn reservation(&self, id: &Ulid) -> Result<Option<Reservation>, EngineError> {
        self.fetch_reservation(id).await
    }

    /// Active (pending/confirmed) reservations occupying the resource.
    pub async fn active_for_resource(
        &self,
        resource_id: &Ulid,
    ) -> Result<Vec<Reservation>, EngineError> {
        self.fetch_active(resource_id).await
    }

    /// All of a requester's reservations, newest first.
    pub async fn reservations_for_requester(
        &self,
        requester_id: Ulid,
    ) -> Result<Vec<Reservation>, EngineError> {
        let mut found = self
            .store()
            .find(&ReservationQuery::default().requester(requester_id))
            .await?;
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    /// Criteria-based lookup, passed straight to the store.
    pub async fn find_reservations(
        &self,
        query: &ReservationQuery,
    ) -> Result<Vec<Reservation>, EngineError> {
        Ok(self.store().find(query).await?)
    }
}
