//! Pure fare computation for travel bookings.
//!
//! Distance is an input here; it comes from the distance collaborator
//! (`crate::notify::DistanceClient`), never from this module.

use serde::Serialize;

use crate::error::ApiError;
use crate::models::vehicle_types;

/// Night window: 22:00 (inclusive) through 06:00 (exclusive) local time.
const NIGHT_START_HOUR: u32 = 22;
const NIGHT_END_HOUR: u32 = 6;
/// Night surcharge as a share of the base fare.
const NIGHT_SURCHARGE_RATE: f64 = 0.2;
const TAX_RATE: f64 = 0.05;

/// Itemized fare, returned to clients and persisted on the booking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareQuote {
    pub base_fare: f64,
    pub distance_cost: f64,
    pub time_cost: f64,
    pub night_surcharge: f64,
    pub tax: f64,
    pub total: f64,
}

/// Compute the fare for a trip against a vehicle fare profile.
///
/// Rejects non-finite or negative distance/duration with a validation error.
pub fn compute_fare(
    profile: &vehicle_types::Model,
    distance_km: f64,
    duration_min: f64,
    scheduled_hour: u32,
) -> Result<FareQuote, ApiError> {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(ApiError::validation("invalid fare input: distance_km"));
    }
    if !duration_min.is_finite() || duration_min < 0.0 {
        return Err(ApiError::validation("invalid fare input: duration_min"));
    }

    let base_fare = profile.base_fare;
    let distance_cost = distance_km * profile.per_km_rate;
    let time_cost = duration_min * profile.per_minute_rate;
    let night_surcharge = if is_night_hour(scheduled_hour) {
        base_fare * NIGHT_SURCHARGE_RATE
    } else {
        0.0
    };

    let subtotal = base_fare + distance_cost + time_cost + night_surcharge;
    let tax = subtotal * TAX_RATE;

    Ok(FareQuote {
        base_fare,
        distance_cost,
        time_cost,
        night_surcharge,
        tax,
        total: subtotal + tax,
    })
}

pub fn is_night_hour(hour: u32) -> bool {
    hour >= NIGHT_START_HOUR || hour < NIGHT_END_HOUR
}

/// Parse the free-text `HH:mm` scheduled time into an hour-of-day.
pub fn parse_scheduled_hour(scheduled_time: &str) -> Result<u32, ApiError> {
    let hour = scheduled_time
        .split(':')
        .next()
        .and_then(|h| h.parse::<u32>().ok())
        .filter(|h| *h < 24)
        .ok_or_else(|| {
            ApiError::validation(format!("invalid scheduled_time '{scheduled_time}', expected HH:mm"))
        })?;
    Ok(hour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn profile(base: f64, per_km: f64, per_min: f64) -> vehicle_types::Model {
        vehicle_types::Model {
            id: Uuid::new_v4(),
            name: "sedan".to_string(),
            base_fare: base,
            per_km_rate: per_km,
            per_minute_rate: per_min,
            night_surcharge_rate: NIGHT_SURCHARGE_RATE,
            surge_multiplier: 1.0,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn daytime_fare_is_deterministic() {
        let quote = compute_fare(&profile(100.0, 10.0, 2.0), 5.0, 10.0, 12).unwrap();
        assert_eq!(quote.base_fare, 100.0);
        assert_eq!(quote.distance_cost, 50.0);
        assert_eq!(quote.time_cost, 20.0);
        assert_eq!(quote.night_surcharge, 0.0);
        assert_eq!(quote.tax, 8.5);
        assert_eq!(quote.total, 178.5);
    }

    #[test]
    fn night_window_boundaries() {
        // 22:00 and 05:xx are night; 21:xx and 06:00 are not.
        for (hour, night) in [(22, true), (5, true), (21, false), (6, false)] {
            let quote = compute_fare(&profile(100.0, 10.0, 0.0), 0.0, 0.0, hour).unwrap();
            let expected = if night { 20.0 } else { 0.0 };
            assert_eq!(quote.night_surcharge, expected, "hour {hour}");
        }
    }

    #[test]
    fn zero_per_minute_rate_is_allowed() {
        let quote = compute_fare(&profile(50.0, 8.0, 0.0), 2.0, 90.0, 9).unwrap();
        assert_eq!(quote.time_cost, 0.0);
        assert_eq!(quote.total, (50.0 + 16.0) * 1.05);
    }

    #[test]
    fn negative_or_non_finite_inputs_are_rejected() {
        let p = profile(100.0, 10.0, 2.0);
        assert!(compute_fare(&p, -1.0, 10.0, 12).is_err());
        assert!(compute_fare(&p, 5.0, -0.1, 12).is_err());
        assert!(compute_fare(&p, f64::NAN, 10.0, 12).is_err());
        assert!(compute_fare(&p, 5.0, f64::INFINITY, 12).is_err());
    }

    #[test]
    fn scheduled_hour_parsing() {
        assert_eq!(parse_scheduled_hour("09:30").unwrap(), 9);
        assert_eq!(parse_scheduled_hour("22:00").unwrap(), 22);
        assert!(parse_scheduled_hour("25:00").is_err());
        assert!(parse_scheduled_hour("half past nine").is_err());
    }
}
