//! Test helpers for common test setup and utilities.
//!
//! Fixtures sit on the equator near (0, 0), where 0.1° of longitude is about
//! 11.12 km, so expected distances are easy to reason about.

use bevy_ecs::prelude::Entity;
use chrono::{NaiveDate, NaiveDateTime};

use crate::ecs::{Ride, RideMember};
use crate::geo::Coordinate;
use crate::status::MemberStatus;

/// Build a coordinate from literals known to be in range.
///
/// # Panics
///
/// Panics if the coordinate is out of range.
pub fn coord(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng).expect("test coordinate should be in range")
}

/// A fixed date at the given local hour.
///
/// # Panics
///
/// Panics if `hour` is not a valid hour of day.
pub fn departure_at(hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 14)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .expect("test departure should be a valid datetime")
}

/// Off-peak departure under the default windows.
pub fn noon() -> NaiveDateTime {
    departure_at(12)
}

/// A ride starting at the origin with no known driver position.
pub fn test_ride(is_shared: bool, departure: NaiveDateTime) -> Ride {
    Ride {
        origin: coord(0.0, 0.0),
        driver_position: None,
        departure,
        is_shared,
    }
}

/// A member picked up at the origin and dropped `0.1 * drop_order` degrees east.
pub fn test_member(ride: Entity, rider_id: &str, drop_order: u32, status: MemberStatus) -> RideMember {
    RideMember {
        ride,
        rider_id: rider_id.to_string(),
        pickup: coord(0.0, 0.0),
        drop: coord(0.0, 0.1 * f64::from(drop_order)),
        drop_order,
        wait_minutes: 0.0,
        status,
    }
}
