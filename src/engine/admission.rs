use ulid::Ulid;

use crate::model::*;
use crate::observability;
use crate::pricing;

use super::conflict::{check_no_conflict, now_ms, validate_period};
use super::{Engine, EngineError};

impl Engine {
    /// Admit or reject a reservation request.
    ///
    /// Precondition order (first failure short-circuits): period well-formed,
    /// start not in the past, resource exists, resource available, no active
    /// reservation overlapping the period. On success the reservation is
    /// priced, committed as `pending`, and announced post-commit.
    ///
    /// Conflict check and insert run under the resource's advisory lock, so
    /// two racing requests for the same resource cannot both pass the check.
    pub async fn request_reservation(
        &self,
        resource_id: Ulid,
        period: Period,
        requester_id: Ulid,
    ) -> Result<Reservation, EngineError> {
        let started = std::time::Instant::now();
        let result = self.admit(resource_id, period, requester_id).await;
        metrics::histogram!(observability::ADMISSION_DURATION_SECONDS)
            .record(started.elapsed().as_secs_f64());

        match &result {
            Ok(reservation) => {
                metrics::counter!(observability::ADMISSIONS_TOTAL).increment(1);
                tracing::info!(
                    "admitted reservation {} on resource {resource_id} [{}, {}) for {}",
                    reservation.id,
                    period.start,
                    period.end,
                    reservation.total_price,
                );
            }
            Err(err) => {
                metrics::counter!(
                    observability::ADMISSIONS_REJECTED_TOTAL,
                    "reason" => observability::rejection_label(err)
                )
                .increment(1);
                tracing::debug!("rejected request on resource {resource_id}: {err}");
            }
        }
        result
    }

    async fn admit(
        &self,
        resource_id: Ulid,
        period: Period,
        requester_id: Ulid,
    ) -> Result<Reservation, EngineError> {
        validate_period(&period)?;

        // "now" is fixed at request entry; no backdating.
        let now = now_ms();
        if period.start < now {
            return Err(EngineError::PastStart {
                start: period.start,
                now,
            });
        }

        // Critical section: everything from resource snapshot through insert
        // must be indivisible with respect to other requests for this
        // resource, or two could both pass the conflict check.
        let lock = self.resource_lock(resource_id);
        let _guard = lock.lock().await;

        let resource = self
            .fetch_resource(&resource_id)
            .await?
            .ok_or(EngineError::ResourceNotFound(resource_id))?;
        if !resource.available {
            return Err(EngineError::ResourceUnavailable(resource_id));
        }

        let active = self.fetch_active(&resource_id).await?;
        check_no_conflict(&active, &period)?;

        let total_price = pricing::total_price(resource.day_rate, &period)?;
        let reservation = Reservation {
            id: Ulid::new(),
            resource_id,
            requester_id,
            period,
            total_price,
            status: ReservationStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        // Mutation: no retry from here on.
        let committed = self.store().insert(reservation).await?;

        self.notify.send(
            resource_id,
            &ReservationEvent::Created {
                reservation: committed.clone(),
            },
        );
        Ok(committed)
    }
}
