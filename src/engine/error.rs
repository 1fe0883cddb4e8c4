use ulid::Ulid;

use crate::model::{Ms, Period, ReservationStatus};

/// Store-level failure, distinct from business rejections. Implementations
/// wrap their transport error text; the engine maps this into
/// `EngineError::StoreUnavailable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError(pub String);

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "store error: {}", self.0)
    }
}

impl std::error::Error for StoreError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Malformed period: start >= end, or timestamps out of range.
    InvalidPeriod(&'static str),
    /// Requested start precedes the clock at request time.
    PastStart { start: Ms, now: Ms },
    ResourceNotFound(Ulid),
    ResourceUnavailable(Ulid),
    /// An active reservation already occupies an overlapping period.
    /// Carries one representative conflict for the rejection message.
    Conflict { reservation_id: Ulid, period: Period },
    ReservationNotFound(Ulid),
    InvalidTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },
    /// Resource day rate is zero or negative.
    InvalidDayRate(Ulid),
    LimitExceeded(&'static str),
    /// Underlying persistence failure. The only retryable kind.
    StoreUnavailable(String),
}

impl EngineError {
    /// Business rejections must never be retried without caller input;
    /// only a store outage is worth a backoff-and-retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, EngineError::StoreUnavailable(_))
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidPeriod(msg) => write!(f, "invalid period: {msg}"),
            EngineError::PastStart { start, now } => {
                write!(f, "start {start} precedes current time {now}")
            }
            EngineError::ResourceNotFound(id) => write!(f, "resource not found: {id}"),
            EngineError::ResourceUnavailable(id) => {
                write!(f, "resource {id} is not available for booking")
            }
            EngineError::Conflict {
                reservation_id,
                period,
            } => {
                write!(
                    f,
                    "conflicts with reservation {reservation_id} over [{}, {})",
                    period.start, period.end
                )
            }
            EngineError::ReservationNotFound(id) => write!(f, "reservation not found: {id}"),
            EngineError::InvalidTransition { from, to } => {
                write!(f, "invalid status transition: {from} -> {to}")
            }
            EngineError::InvalidDayRate(id) => {
                write!(f, "resource {id} has a non-positive day rate")
            }
            EngineError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
            EngineError::StoreUnavailable(e) => write!(f, "store unavailable: {e}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<StoreError> for EngineError {
    fn from(e: StoreError) -> Self {
        EngineError::StoreUnavailable(e.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_store_failures_are_retryable() {
        assert!(EngineError::StoreUnavailable("down".into()).is_retryable());
        assert!(!EngineError::ResourceNotFound(Ulid::new()).is_retryable());
        assert!(!EngineError::Conflict {
            reservation_id: Ulid::new(),
            period: Period::new(0, 1),
        }
        .is_retryable());
        assert!(!EngineError::InvalidPeriod("start >= end").is_retryable());
    }

    #[test]
    fn conflict_message_names_the_competitor() {
        let id = Ulid::new();
        let err = EngineError::Conflict {
            reservation_id: id,
            period: Period::new(100, 200),
        };
        let msg = err.to_string();
        assert!(msg.contains(&id.to_string()));
        assert!(msg.contains("[100, 200)"));
    }
}
