//! End-to-end booking flow over the public API: one vehicle, three
//! competing rental requests, then the confirmation lifecycle.

use std::sync::Arc;

use rust_decimal_macros::dec;
use ulid::Ulid;

use reserva::{
    Engine, EngineError, Ms, Period, ReservationStatus, Resource, MS_PER_DAY,
};

const BASE: Ms = 4_000_000_000_000;

fn day(n: i64) -> Ms {
    BASE + n * MS_PER_DAY
}

#[tokio::test]
async fn booking_counter_scenario() {
    let (engine, registry, _store) = Engine::in_memory();
    let engine = Arc::new(engine);

    let vehicle = Ulid::new();
    registry
        .upsert(Resource::new(vehicle, Some("sedan".into()), dec!(1000)))
        .unwrap();

    // Request A: three days, accepted at 3 × 1000.
    let a = engine
        .request_reservation(vehicle, Period::new(day(10), day(13)), Ulid::new())
        .await
        .unwrap();
    assert_eq!(a.total_price, dec!(3000));
    assert_eq!(a.status, ReservationStatus::Pending);

    // Request B overlaps A's last day and is rejected, naming A.
    let err = engine
        .request_reservation(vehicle, Period::new(day(12), day(15)), Ulid::new())
        .await
        .unwrap_err();
    match err {
        EngineError::Conflict {
            reservation_id,
            period,
        } => {
            assert_eq!(reservation_id, a.id);
            assert_eq!(period, a.period);
        }
        other => panic!("expected Conflict, got {other:?}"),
    }

    // Request C picks up exactly where A ends — adjacency is allowed.
    let c = engine
        .request_reservation(vehicle, Period::new(day(13), day(15)), Ulid::new())
        .await
        .unwrap();
    assert_eq!(c.total_price, dec!(2000));

    // Confirm A; reverting a confirmation is illegal.
    let confirmed = engine
        .transition(a.id, ReservationStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(confirmed.status, ReservationStatus::Confirmed);

    let err = engine
        .transition(a.id, ReservationStatus::Pending)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::InvalidTransition {
            from: ReservationStatus::Confirmed,
            to: ReservationStatus::Pending,
        }
    ));
}

#[tokio::test]
async fn subscriber_sees_the_whole_history() {
    let (engine, registry, _store) = Engine::in_memory();

    let vehicle = Ulid::new();
    registry
        .upsert(Resource::new(vehicle, None, dec!(250)))
        .unwrap();
    let mut rx = engine.notify.subscribe(vehicle);

    let r = engine
        .request_reservation(vehicle, Period::new(day(1), day(4)), Ulid::new())
        .await
        .unwrap();
    engine
        .transition(r.id, ReservationStatus::Confirmed)
        .await
        .unwrap();
    engine
        .transition(r.id, ReservationStatus::Completed)
        .await
        .unwrap();

    use reserva::ReservationEvent::*;
    match rx.recv().await.unwrap() {
        Created { reservation } => assert_eq!(reservation.id, r.id),
        other => panic!("expected Created, got {other:?}"),
    }
    match rx.recv().await.unwrap() {
        StatusChanged { previous, .. } => assert_eq!(previous, ReservationStatus::Pending),
        other => panic!("expected StatusChanged, got {other:?}"),
    }
    match rx.recv().await.unwrap() {
        StatusChanged {
            reservation,
            previous,
        } => {
            assert_eq!(previous, ReservationStatus::Confirmed);
            assert_eq!(reservation.status, ReservationStatus::Completed);
        }
        other => panic!("expected StatusChanged, got {other:?}"),
    }
}
