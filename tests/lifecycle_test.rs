///! Integration test for the booking lifecycle and wallet ledger rules,
///! exercised through the library's public surface. No running server or
///! database is needed.
///!
///! Run with: `cargo test --test lifecycle_test`
use chrono::Utc;
use uuid::Uuid;

use servana_backend::booking::geo::{GeoPoint, haversine_km};
use servana_backend::booking::status::{ensure_transition, is_legal};
use servana_backend::db::counters::{format_booking_code, format_txn_no, format_wallet_no};
use servana_backend::fare::{compute_fare, parse_scheduled_hour};
use servana_backend::models::bookings::BookingStatus;
use servana_backend::models::vehicle_types;
use servana_backend::models::wallet_transactions::{self, TxnKind};

fn sedan() -> vehicle_types::Model {
    vehicle_types::Model {
        id: Uuid::new_v4(),
        name: "sedan".to_string(),
        base_fare: 100.0,
        per_km_rate: 10.0,
        per_minute_rate: 2.0,
        night_surcharge_rate: 0.2,
        surge_multiplier: 1.0,
        is_active: true,
        created_at: Utc::now(),
    }
}

#[test]
fn full_lifecycle_path_is_legal_end_to_end() {
    use BookingStatus::*;
    let path = [Pending, Assigned, Accepted, InProgress, Completed];
    for window in path.windows(2) {
        ensure_transition(window[0], window[1]).expect("lifecycle step should be legal");
    }
}

#[test]
fn rejection_reroutes_or_falls_back() {
    use BookingStatus::*;
    // Partner rejects, another partner is found.
    assert!(is_legal(Assigned, Rejected));
    assert!(is_legal(Rejected, Assigned));
    // Partner rejects, nobody else nearby.
    assert!(is_legal(Rejected, Pending));
    // A rejected booking never jumps straight to work.
    assert!(!is_legal(Rejected, InProgress));
}

#[test]
fn completed_booking_cannot_be_reopened() {
    use BookingStatus::*;
    for to in [Pending, Assigned, Accepted, InProgress, Paused] {
        assert!(ensure_transition(Completed, to).is_err(), "{to:?}");
        assert!(ensure_transition(Cancelled, to).is_err(), "{to:?}");
    }
}

#[test]
fn fare_quote_for_scheduled_trip() {
    // A 5 km, 10 minute trip at noon against the standard sedan profile.
    let hour = parse_scheduled_hour("12:00").unwrap();
    let quote = compute_fare(&sedan(), 5.0, 10.0, hour).unwrap();

    assert_eq!(quote.total, 178.5);
    // The itemization always adds back up to the total.
    let sum = quote.base_fare + quote.distance_cost + quote.time_cost + quote.night_surcharge
        + quote.tax;
    assert!((sum - quote.total).abs() < 1e-9);
}

#[test]
fn night_trip_costs_more_than_the_same_day_trip() {
    let day = compute_fare(&sedan(), 5.0, 10.0, 12).unwrap();
    let night = compute_fare(&sedan(), 5.0, 10.0, 23).unwrap();
    assert!(night.total > day.total);
    assert_eq!(night.night_surcharge, 20.0);
}

#[test]
fn ledger_history_is_self_checking() {
    // Replay a credit/debit history and confirm balance_after telescopes.
    let wallet_id = Uuid::new_v4();
    let mut balance = 0.0;
    let mut rows = Vec::new();
    for (seq, (kind, amount)) in [
        (TxnKind::Credit, 500.0),
        (TxnKind::Debit, 120.0),
        (TxnKind::Credit, 75.5),
        (TxnKind::Debit, 55.5),
    ]
    .into_iter()
    .enumerate()
    {
        let signed = match kind {
            TxnKind::Credit => amount,
            TxnKind::Debit => -amount,
        };
        balance += signed;
        rows.push(wallet_transactions::Model {
            id: Uuid::new_v4(),
            txn_no: format_txn_no(seq as i64 + 1),
            wallet_id,
            kind,
            amount,
            description: "test".to_string(),
            reference: None,
            balance_after: balance,
            created_at: Utc::now(),
        });
    }

    let replayed: f64 = rows.iter().map(|r| r.signed_amount()).sum();
    assert_eq!(replayed, rows.last().unwrap().balance_after);
    assert_eq!(replayed, 400.0);
}

#[test]
fn sequence_codes_are_distinct_across_kinds() {
    // The same sequence value maps to different identifier namespaces.
    assert_eq!(format_booking_code(7), "WAVED007");
    assert_eq!(format_wallet_no(7), "WPW0007");
    assert_eq!(format_txn_no(7), "WPWT0007");
}

#[test]
fn pickup_distance_feeds_candidate_ranking() {
    let pickup = GeoPoint::new(28.6139, 77.2090);
    let near = GeoPoint::new(28.6200, 77.2150);
    let far = GeoPoint::new(28.4595, 77.0266);
    assert!(haversine_km(pickup, near) < haversine_km(pickup, far));
}
