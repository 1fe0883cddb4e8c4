use crate::model::*;

use super::EngineError;

pub(crate) fn now_ms() -> Ms {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as Ms
}

pub(crate) fn validate_period(period: &Period) -> Result<(), EngineError> {
    use crate::limits::*;
    if period.start >= period.end {
        return Err(EngineError::InvalidPeriod("start must be before end"));
    }
    if period.start < MIN_VALID_TIMESTAMP_MS || period.end > MAX_VALID_TIMESTAMP_MS {
        return Err(EngineError::InvalidPeriod("timestamp out of range"));
    }
    if period.duration_ms() > MAX_PERIOD_DURATION_MS {
        return Err(EngineError::InvalidPeriod("period too wide"));
    }
    Ok(())
}

/// Linear scan over a resource's active reservations; the first overlap is
/// the representative conflict. Overlap sets per resource are small, so no
/// interval index — correctness does not depend on one.
pub(crate) fn check_no_conflict(
    active: &[Reservation],
    period: &Period,
) -> Result<(), EngineError> {
    for existing in active {
        debug_assert!(existing.status.is_active(), "store returned inactive row");
        if existing.period.overlaps(period) {
            return Err(EngineError::Conflict {
                reservation_id: existing.id,
                period: existing.period,
            });
        }
    }
    Ok(())
}
