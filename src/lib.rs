//! Reservation scheduling core: an interval-overlap admission system with
//! status-aware conflict detection.
//!
//! Given a resource, a half-open rental period, and a requester, the engine
//! decides whether the request may be admitted, derives the total price, and
//! arbitrates concurrent attempts for overlapping periods with per-resource
//! mutual exclusion. Status changes flow through a small state machine;
//! collaborators hear about committed changes on a per-resource broadcast
//! hub. Persistence and resource management are behind traits — the bundled
//! in-memory implementations serve tests and small deployments.

pub mod engine;
pub mod limits;
pub mod model;
pub mod notify;
pub mod observability;
pub mod pricing;

pub use engine::{
    Engine, EngineError, InMemoryRegistry, InMemoryStore, ReservationQuery, ReservationStore,
    ResourceRegistry, StoreError,
};
pub use model::{
    Ms, Period, Reservation, ReservationEvent, ReservationStatus, Resource, MS_PER_DAY,
};
pub use notify::NotifyHub;
