use ulid::Ulid;

use crate::model::*;
use crate::observability;

use super::conflict::now_ms;
use super::{Engine, EngineError};

impl Engine {
    /// Apply a status transition, enforcing the state machine:
    /// pending → confirmed | cancelled, confirmed → completed | cancelled,
    /// terminal states sticky.
    ///
    /// The status change is durably committed before any notification fires,
    /// so a delivery failure can never leave the status ambiguous.
    pub async fn transition(
        &self,
        reservation_id: Ulid,
        target: ReservationStatus,
    ) -> Result<Reservation, EngineError> {
        let current = self
            .fetch_reservation(&reservation_id)
            .await?
            .ok_or(EngineError::ReservationNotFound(reservation_id))?;

        // Serialize with admissions and competing transitions on the same
        // resource; re-read under the lock so the check sees committed state.
        let lock = self.resource_lock(current.resource_id);
        let _guard = lock.lock().await;

        let current = self
            .fetch_reservation(&reservation_id)
            .await?
            .ok_or(EngineError::ReservationNotFound(reservation_id))?;

        if !current.status.can_transition_to(target) {
            metrics::counter!(observability::TRANSITIONS_REJECTED_TOTAL).increment(1);
            return Err(EngineError::InvalidTransition {
                from: current.status,
                to: target,
            });
        }

        let previous = current.status;
        let updated = self
            .store()
            .update_status(&reservation_id, target, now_ms())
            .await?
            .ok_or(EngineError::ReservationNotFound(reservation_id))?;

        metrics::counter!(observability::TRANSITIONS_TOTAL, "to" => target.as_str()).increment(1);
        tracing::info!("reservation {reservation_id}: {previous} -> {target}");

        self.notify.send(
            updated.resource_id,
            &ReservationEvent::StatusChanged {
                reservation: updated.clone(),
                previous,
            },
        );
        Ok(updated)
    }
}
