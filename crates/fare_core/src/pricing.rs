//! Pricing entry points: shared-ride repricing, single-ride quotes and
//! driver earnings.
//!
//! Everything here is a pure function of its inputs and the supplied
//! [`PricingConfig`]. Callers that mutate ride membership concurrently must
//! serialize those mutations per ride before repricing.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::allocation::{
    allocate_costs, apply_pickup_charge, pickup_distance_cost, wait_time_cost, FareBreakdown,
};
use crate::config::PricingConfig;
use crate::error::{FareError, Result};
use crate::finalize::{finalize, FinalFare};
use crate::geo::{distance_km, Coordinate};
use crate::segments::{build_route, in_drop_order, RiderSegmentRequest, RouteSegment};

/// Snapshot of a ride to price: the current non-cancelled riders only.
#[derive(Debug, Clone, PartialEq)]
pub struct RidePricingRequest {
    pub origin: Coordinate,
    /// Where the driver is now, if known. Enables the repositioning charge.
    pub driver_position: Option<Coordinate>,
    /// Scheduled departure in caller-local wall-clock time.
    pub departure: NaiveDateTime,
    pub riders: Vec<RiderSegmentRequest>,
}

/// Result of pricing a shared ride.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RidePricing {
    pub segments: Vec<RouteSegment>,
    pub fares: BTreeMap<String, FinalFare>,
}

impl RidePricing {
    /// Length of the driven route, including the approach to the first pickup.
    pub fn route_distance_km(&self) -> f64 {
        self.segments.iter().map(|s| s.distance_km).sum()
    }
}

/// Build the route, allocate every leg and finalize each rider exactly once.
///
/// The repositioning charge goes to the first rider in drop order whenever
/// `driver_position` is set. Callers repricing after that rider has boarded
/// must leave it unset so the charge is not billed twice.
pub fn price_shared_ride(request: &RidePricingRequest, config: &PricingConfig) -> Result<RidePricing> {
    config.validate()?;

    let mut ids = BTreeSet::new();
    for rider in &request.riders {
        if rider.drop_order == 0 {
            return Err(FareError::InvalidDropOrder(rider.rider_id.clone()));
        }
        if !ids.insert(rider.rider_id.as_str()) {
            return Err(FareError::DuplicateRider(rider.rider_id.clone()));
        }
    }

    let segments = build_route(request.origin, &request.riders);
    let mut breakdowns = allocate_costs(&segments, ids.iter().copied(), config)?;

    if let (Some(driver), Some(first)) = (
        request.driver_position,
        in_drop_order(&request.riders).first(),
    ) {
        let charge = pickup_distance_cost(driver, first.pickup, config);
        apply_pickup_charge(&mut breakdowns, &first.rider_id, charge)?;
    }

    for rider in &request.riders {
        if let Some(breakdown) = breakdowns.get_mut(&rider.rider_id) {
            breakdown.wait_time_cost = wait_time_cost(rider.wait_minutes, config);
        }
    }

    let fares = breakdowns
        .into_iter()
        .map(|(id, breakdown)| (id, finalize(breakdown, &request.departure, config)))
        .collect();

    Ok(RidePricing { segments, fares })
}

/// Upfront quote for a private ride booked for `seats` passengers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleRideQuote {
    pub seats: u32,
    /// Fare for one passenger.
    pub per_seat: FinalFare,
    /// `per_seat.total_fare * seats`.
    pub total_fare: u64,
    pub itemized: String,
}

/// Quote a direct pickup-to-drop ride. Each seat pays a full solo fare
/// (including the minimum-fare floor).
pub fn quote_single_ride(
    pickup: Coordinate,
    drop: Coordinate,
    seats: u32,
    driver_position: Option<Coordinate>,
    departure: &NaiveDateTime,
    config: &PricingConfig,
) -> Result<SingleRideQuote> {
    config.validate()?;
    if seats == 0 {
        return Err(FareError::InvalidSeats(seats));
    }

    let distance = distance_km(pickup, drop);
    let mut breakdown = FareBreakdown::new("single");
    breakdown.solo_distance_km = distance;
    breakdown.solo_cost = distance * config.rate_per_km;
    if let Some(driver) = driver_position {
        breakdown.pickup_distance_cost = pickup_distance_cost(driver, pickup, config).cost;
    }

    let per_seat = finalize(breakdown, departure, config);
    let total_fare = per_seat.total_fare * u64::from(seats);
    let mut itemized = per_seat.itemized.clone();
    if seats > 1 {
        itemized.push_str(&format!(
            "\n\n({seats} passengers × {}{}/person)",
            config.currency_symbol, per_seat.total_fare
        ));
    }

    Ok(SingleRideQuote {
        seats,
        per_seat,
        total_fare,
        itemized,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverEarnings {
    pub total_revenue: u64,
    pub platform_fee: u64,
    pub gst: u64,
    pub net_earnings: i64,
    pub total_distance_km: f64,
    pub avg_fare_per_km: f64,
}

/// Driver take-home for a set of finalized fares over `total_distance_km`.
pub fn driver_earnings<'a>(
    fares: impl IntoIterator<Item = &'a FinalFare>,
    total_distance_km: f64,
    config: &PricingConfig,
) -> DriverEarnings {
    let revenue: u64 = fares.into_iter().map(|fare| fare.total_fare).sum();
    let revenue_f = revenue as f64;
    let platform_fee = revenue_f * config.platform_fee_percent;
    let gst = revenue_f * config.tax_percent;

    DriverEarnings {
        total_revenue: revenue,
        platform_fee: platform_fee.round() as u64,
        gst: gst.round() as u64,
        net_earnings: (revenue_f - platform_fee - gst).round() as i64,
        total_distance_km,
        avg_fare_per_km: if total_distance_km > 0.0 {
            revenue_f / total_distance_km
        } else {
            0.0
        },
    }
}
