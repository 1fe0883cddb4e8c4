//! Hard limits enforced at the engine boundary. Requests beyond these are
//! malformed input, not capacity problems.

use crate::model::Ms;

/// 2000-01-01T00:00:00Z — anything earlier is a unit bug (seconds, not ms).
pub const MIN_VALID_TIMESTAMP_MS: Ms = 946_684_800_000;

/// 2100-01-01T00:00:00Z.
pub const MAX_VALID_TIMESTAMP_MS: Ms = 4_102_444_800_000;

/// Longest single rental period: 366 days.
pub const MAX_PERIOD_DURATION_MS: Ms = 366 * crate::model::MS_PER_DAY;

/// Upper bound on reservations returned by a single criteria query.
pub const MAX_QUERY_RESULTS: usize = 10_000;
