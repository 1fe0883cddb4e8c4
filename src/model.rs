use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unix milliseconds — the only time type.
pub type Ms = i64;

pub const MS_PER_DAY: Ms = 86_400_000;

/// Half-open rental period `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: Ms,
    pub end: Ms,
}

impl Period {
    pub fn new(start: Ms, end: Ms) -> Self {
        debug_assert!(start < end, "Period start must be before end");
        Self { start, end }
    }

    pub fn duration_ms(&self) -> Ms {
        self.end - self.start
    }

    /// Billable duration in whole days: ceiling of the millisecond width,
    /// never less than one. Partial days bill as a full day.
    pub fn duration_days(&self) -> i64 {
        let days = (self.duration_ms() + MS_PER_DAY - 1) / MS_PER_DAY;
        days.max(1)
    }

    pub fn overlaps(&self, other: &Period) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains_instant(&self, t: Ms) -> bool {
        self.start <= t && t < self.end
    }
}

/// Reservation lifecycle status. Only `Pending` and `Confirmed` occupy
/// capacity for conflict purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Legal transitions:
    /// pending → confirmed | cancelled, confirmed → completed | cancelled.
    /// Terminal states accept nothing; self-transitions are illegal.
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Completed)
                | (Self::Confirmed, Self::Cancelled)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bookable unit. Read-only to the scheduling core; an external
/// management collaborator writes it through the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: Ulid,
    pub name: Option<String>,
    /// Price per billable day. Must be strictly positive.
    pub day_rate: Decimal,
    /// Administratively bookable. Defaults to true.
    pub available: bool,
}

impl Resource {
    pub fn new(id: Ulid, name: Option<String>, day_rate: Decimal) -> Self {
        Self {
            id,
            name,
            day_rate,
            available: true,
        }
    }
}

/// A committed request to use a resource for a period. Owned by the
/// reservation store once inserted; never physically deleted by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Ulid,
    pub resource_id: Ulid,
    pub requester_id: Ulid,
    pub period: Period,
    pub total_price: Decimal,
    pub status: ReservationStatus,
    pub created_at: Ms,
    pub updated_at: Ms,
}

/// Post-commit notification payload, broadcast per resource. Fired only
/// after the corresponding store mutation has committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationEvent {
    Created {
        reservation: Reservation,
    },
    StatusChanged {
        reservation: Reservation,
        previous: ReservationStatus,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: Ms = MS_PER_DAY;

    #[test]
    fn period_basics() {
        let p = Period::new(100, 200);
        assert_eq!(p.duration_ms(), 100);
        assert!(p.contains_instant(100));
        assert!(p.contains_instant(199));
        assert!(!p.contains_instant(200)); // half-open
    }

    #[test]
    fn period_overlap() {
        let a = Period::new(100, 200);
        let b = Period::new(150, 250);
        let c = Period::new(200, 300);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c)); // adjacent, not overlapping
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn duration_whole_days() {
        let p = Period::new(0, 3 * DAY);
        assert_eq!(p.duration_days(), 3);
    }

    #[test]
    fn duration_partial_day_rounds_up() {
        let p = Period::new(0, 2 * DAY + 1);
        assert_eq!(p.duration_days(), 3);
    }

    #[test]
    fn duration_sub_day_bills_one() {
        let p = Period::new(0, 1);
        assert_eq!(p.duration_days(), 1);
        let p = Period::new(0, DAY - 1);
        assert_eq!(p.duration_days(), 1);
    }

    #[test]
    fn duration_exact_day_boundary() {
        let p = Period::new(5 * DAY, 6 * DAY);
        assert_eq!(p.duration_days(), 1);
    }

    #[test]
    fn active_statuses() {
        assert!(ReservationStatus::Pending.is_active());
        assert!(ReservationStatus::Confirmed.is_active());
        assert!(!ReservationStatus::Completed.is_active());
        assert!(!ReservationStatus::Cancelled.is_active());
    }

    #[test]
    fn terminal_statuses() {
        assert!(ReservationStatus::Completed.is_terminal());
        assert!(ReservationStatus::Cancelled.is_terminal());
        assert!(!ReservationStatus::Pending.is_terminal());
        assert!(!ReservationStatus::Confirmed.is_terminal());
    }

    #[test]
    fn transition_table() {
        use ReservationStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(Confirmed.can_transition_to(Cancelled));

        assert!(!Pending.can_transition_to(Completed));
        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Pending));
        for from in [Completed, Cancelled] {
            for to in [Pending, Confirmed, Completed, Cancelled] {
                assert!(!from.can_transition_to(to), "{from} -> {to} must fail");
            }
        }
    }
}
