//! Randomised checks of the allocation invariants over seeded inputs.

use approx::assert_relative_eq;
use fare_core::allocation::allocate_costs;
use fare_core::config::PricingConfig;
use fare_core::geo::{distance_km, Coordinate};
use fare_core::pricing::{price_shared_ride, RidePricingRequest};
use fare_core::segments::{build_route, RiderSegmentRequest, RouteSegment, SegmentType};
use fare_core::test_helpers::{coord, departure_at, noon};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SEED: u64 = 42;

fn random_coord(rng: &mut StdRng) -> Coordinate {
    coord(rng.gen_range(-80.0..80.0), rng.gen_range(-179.0..179.0))
}

fn random_city_coord(rng: &mut StdRng) -> Coordinate {
    coord(12.9 + rng.gen_range(0.0..0.2), 77.5 + rng.gen_range(0.0..0.2))
}

fn random_riders(rng: &mut StdRng, count: usize) -> Vec<RiderSegmentRequest> {
    (0..count)
        .map(|i| {
            RiderSegmentRequest::new(
                format!("rider-{i}"),
                random_city_coord(rng),
                random_city_coord(rng),
                rng.gen_range(1..=count as u32),
            )
        })
        .collect()
}

fn allocate_single(segment: &RouteSegment, config: &PricingConfig) -> f64 {
    let mut ids: Vec<String> = segment.riders_present.clone();
    if let Some(causer) = &segment.caused_by {
        if !ids.contains(causer) {
            ids.push(causer.clone());
        }
    }
    let fares = allocate_costs(std::slice::from_ref(segment), ids, config).expect("allocate");
    fares
        .values()
        .map(|f| f.solo_cost + f.shared_cost + f.detour_cost)
        .sum()
}

#[test]
fn distance_is_symmetric_and_zero_on_identity() {
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..1_000 {
        let a = random_coord(&mut rng);
        let b = random_coord(&mut rng);
        assert_eq!(distance_km(a, b), distance_km(b, a));
        assert_eq!(distance_km(a, a), 0.0);
        assert!(distance_km(a, b) >= 0.0);
    }
}

#[test]
fn shared_and_detour_legs_allocate_their_whole_cost() {
    let config = PricingConfig::default();
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..200 {
        let count = rng.gen_range(2..=8);
        let riders = random_riders(&mut rng, count);
        let route = build_route(random_city_coord(&mut rng), &riders);

        for segment in route.iter().filter(|s| !s.riders_present.is_empty()) {
            let allocated = allocate_single(segment, &config);
            let expected = match segment.segment_type {
                SegmentType::Detour => segment.distance_km * config.detour_rate_per_km,
                SegmentType::Shared | SegmentType::Solo => {
                    segment.distance_km * config.rate_per_km
                }
            };
            assert_relative_eq!(allocated, expected, epsilon = 1e-9, max_relative = 1e-12);
        }
    }
}

#[test]
fn per_rider_share_never_grows_as_riders_join() {
    let config = PricingConfig::default();
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..100 {
        let distance = rng.gen_range(0.0..50.0);
        let mut previous = f64::INFINITY;
        for n in 2..=8 {
            let ids: Vec<String> = (0..n).map(|i| format!("r{i}")).collect();
            let segment = RouteSegment {
                from: coord(0.0, 0.0),
                to: coord(0.0, 0.0),
                distance_km: distance,
                riders_present: ids.clone(),
                segment_type: SegmentType::Shared,
                caused_by: None,
            };
            let fares = allocate_costs(std::slice::from_ref(&segment), ids, &config)
                .expect("allocate");
            let share = fares["r0"].shared_cost;
            assert!(share <= previous, "share grew from {previous} to {share} at n={n}");
            previous = share;
        }
    }
}

#[test]
fn finalized_fares_never_drop_below_the_minimum() {
    let config = PricingConfig::default();
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..200 {
        let count = rng.gen_range(1..=8);
        let request = RidePricingRequest {
            origin: random_city_coord(&mut rng),
            driver_position: Some(random_city_coord(&mut rng)),
            departure: departure_at(rng.gen_range(0..24)),
            riders: random_riders(&mut rng, count),
        };
        let pricing = price_shared_ride(&request, &config).expect("price");
        assert_eq!(pricing.fares.len(), count);
        for fare in pricing.fares.values() {
            assert!(fare.total_fare >= config.minimum_fare);
        }
    }
}

#[test]
fn short_trips_are_floored_to_exactly_the_minimum() {
    let config = PricingConfig::default();
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..100 {
        let pickup = random_city_coord(&mut rng);
        // Under 100 m: (35 + ~1) * 1.05 stays below 40.
        let drop = coord(pickup.lat() + rng.gen_range(0.0..0.0009), pickup.lng());
        let request = RidePricingRequest {
            origin: pickup,
            driver_position: None,
            departure: noon(),
            riders: vec![RiderSegmentRequest::new("a", pickup, drop, 1)],
        };
        let pricing = price_shared_ride(&request, &config).expect("price");
        assert_eq!(pricing.fares["a"].total_fare, config.minimum_fare);
    }
}
