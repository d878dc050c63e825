//! Price a three-rider shared ride across Bengaluru and print each rider's
//! itemized fare plus the driver's take-home.
//!
//! Run with: cargo run -p fare_core --example shared_ride_quote [rates.json]
//! The pricing functions do not log; set RUST_LOG=fare_core=debug to see
//! logs from the ride-management systems when they are driven.

use chrono::NaiveDate;
use fare_core::geo::Coordinate;
use fare_core::pricing::{driver_earnings, price_shared_ride, quote_single_ride, RidePricingRequest};
use fare_core::segments::RiderSegmentRequest;
use fare_core::{FareError, PricingConfig, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => PricingConfig::load(path)?,
        None => PricingConfig::default(),
    };

    let departure = NaiveDate::from_ymd_opt(2025, 3, 14)
        .and_then(|date| date.and_hms_opt(18, 30, 0))
        .ok_or_else(|| FareError::InvalidConfig("bad departure".to_string()))?;

    let koramangala = Coordinate::new(12.9352, 77.6245)?;
    let request = RidePricingRequest {
        origin: koramangala,
        driver_position: Some(Coordinate::new(12.9716, 77.5946)?),
        departure,
        riders: vec![
            RiderSegmentRequest::new("asha", koramangala, Coordinate::new(12.9784, 77.6408)?, 1),
            RiderSegmentRequest::new(
                "bilal",
                Coordinate::new(12.9400, 77.6300)?,
                Coordinate::new(12.9915, 77.6555)?,
                2,
            )
            .with_wait_minutes(8.0),
            RiderSegmentRequest::new(
                "chen",
                Coordinate::new(12.9480, 77.6350)?,
                Coordinate::new(13.0050, 77.6700)?,
                3,
            ),
        ],
    };

    let pricing = price_shared_ride(&request, &config)?;
    println!("--- Shared ride ({} riders, departs {departure}) ---", request.riders.len());
    println!("Route: {} legs, {:.2} km", pricing.segments.len(), pricing.route_distance_km());
    for segment in &pricing.segments {
        println!(
            "  {:?}  {:.2} km  aboard={:?}  caused_by={:?}",
            segment.segment_type, segment.distance_km, segment.riders_present, segment.caused_by
        );
    }
    for fare in pricing.fares.values() {
        println!("\n[{}]\n{}", fare.rider_id(), fare.itemized);
    }

    let earnings = driver_earnings(pricing.fares.values(), pricing.route_distance_km(), &config);
    println!("\nDriver earnings: {}", serde_json::to_string_pretty(&earnings)?);

    let quote = quote_single_ride(
        koramangala,
        Coordinate::new(12.9784, 77.6408)?,
        2,
        None,
        &departure,
        &config,
    )?;
    println!("\n--- Private ride for {} ---\n{}", quote.seats, quote.itemized);
    Ok(())
}
