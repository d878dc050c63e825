//! Cost allocation: one pass over the route legs, accumulating each rider's
//! share of every leg they were part of.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::config::PricingConfig;
use crate::error::{FareError, Result};
use crate::geo::{distance_km, Coordinate};
use crate::segments::{RouteSegment, SegmentType};

/// Per-rider running totals, before surge, tax and the minimum-fare floor.
///
/// Costs are unrounded until finalization; distances are kilometers
/// travelled (a shared leg adds its full length to every rider aboard).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FareBreakdown {
    pub rider_id: String,
    pub solo_distance_km: f64,
    pub solo_cost: f64,
    pub shared_distance_km: f64,
    pub shared_cost: f64,
    pub detour_distance_km: f64,
    pub detour_cost: f64,
    pub pickup_distance_cost: f64,
    pub wait_time_cost: f64,
}

impl FareBreakdown {
    pub fn new(rider_id: impl Into<String>) -> Self {
        Self {
            rider_id: rider_id.into(),
            ..Default::default()
        }
    }

    pub fn total_distance_km(&self) -> f64 {
        self.solo_distance_km + self.shared_distance_km + self.detour_distance_km
    }
}

/// Driver repositioning charge for reaching the first pickup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupCharge {
    pub distance_km: f64,
    pub cost: f64,
}

/// Distance from the driver to a pickup and the rounded charge for the part
/// beyond the free threshold.
pub fn pickup_distance_cost(
    driver: Coordinate,
    pickup: Coordinate,
    config: &PricingConfig,
) -> PickupCharge {
    let distance = distance_km(driver, pickup);
    let chargeable = (distance - config.free_pickup_km).max(0.0);
    PickupCharge {
        distance_km: distance,
        cost: (chargeable * config.pickup_rate_per_km).round(),
    }
}

/// Rounded charge for waiting beyond the free minutes.
pub fn wait_time_cost(wait_minutes: f64, config: &PricingConfig) -> f64 {
    let chargeable = (wait_minutes - config.wait_free_minutes).max(0.0);
    (chargeable * config.wait_rate_per_minute).round()
}

/// Allocate every leg's cost among the riders in `rider_ids`.
///
/// Legs with nobody aboard are skipped. A leg naming a rider outside
/// `rider_ids` is a caller error ([`FareError::UnknownRider`]), as is a
/// registered rider that never appears on the route
/// ([`FareError::RiderWithoutSegments`]).
pub fn allocate_costs<I, S>(
    segments: &[RouteSegment],
    rider_ids: I,
    config: &PricingConfig,
) -> Result<BTreeMap<String, FareBreakdown>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut fares: BTreeMap<String, FareBreakdown> = rider_ids
        .into_iter()
        .map(|id| {
            let id = id.into();
            (id.clone(), FareBreakdown::new(id))
        })
        .collect();
    let mut seen: BTreeSet<&str> = BTreeSet::new();

    for segment in segments {
        if segment.riders_present.is_empty() {
            continue;
        }
        seen.extend(segment.riders_present.iter().map(String::as_str));

        match segment.segment_type {
            SegmentType::Solo => allocate_solo(&mut fares, segment, config)?,
            SegmentType::Shared => allocate_shared(&mut fares, segment, config)?,
            SegmentType::Detour => {
                if let Some(causer) = segment.caused_by.as_deref() {
                    seen.insert(causer);
                }
                allocate_detour(&mut fares, segment, config)?
            }
        }
    }

    if let Some(missing) = fares.keys().find(|id| !seen.contains(id.as_str())) {
        return Err(FareError::RiderWithoutSegments(missing.clone()));
    }

    Ok(fares)
}

/// Add a repositioning charge to one rider.
pub fn apply_pickup_charge(
    fares: &mut BTreeMap<String, FareBreakdown>,
    rider_id: &str,
    charge: PickupCharge,
) -> Result<()> {
    fare_entry(fares, rider_id)?.pickup_distance_cost += charge.cost;
    Ok(())
}

fn fare_entry<'a>(
    fares: &'a mut BTreeMap<String, FareBreakdown>,
    rider_id: &str,
) -> Result<&'a mut FareBreakdown> {
    fares
        .get_mut(rider_id)
        .ok_or_else(|| FareError::UnknownRider(rider_id.to_string()))
}

fn allocate_solo(
    fares: &mut BTreeMap<String, FareBreakdown>,
    segment: &RouteSegment,
    config: &PricingConfig,
) -> Result<()> {
    let fare = fare_entry(fares, &segment.riders_present[0])?;
    fare.solo_distance_km += segment.distance_km;
    fare.solo_cost += segment.distance_km * config.rate_per_km;
    Ok(())
}

fn allocate_shared(
    fares: &mut BTreeMap<String, FareBreakdown>,
    segment: &RouteSegment,
    config: &PricingConfig,
) -> Result<()> {
    let per_rider =
        segment.distance_km * config.rate_per_km / segment.riders_present.len() as f64;
    for rider_id in &segment.riders_present {
        let fare = fare_entry(fares, rider_id)?;
        fare.shared_distance_km += segment.distance_km;
        fare.shared_cost += per_rider;
    }
    Ok(())
}

fn allocate_detour(
    fares: &mut BTreeMap<String, FareBreakdown>,
    segment: &RouteSegment,
    config: &PricingConfig,
) -> Result<()> {
    let total_cost = segment.distance_km * config.detour_rate_per_km;
    let causer = segment.caused_by.as_deref();
    let others: Vec<&String> = segment
        .riders_present
        .iter()
        .filter(|id| Some(id.as_str()) != causer)
        .collect();

    // Without a named causer the leg is split evenly, like a shared leg.
    let Some(causer) = causer else {
        let per_rider = total_cost / others.len() as f64;
        for rider_id in others {
            let fare = fare_entry(fares, rider_id)?;
            fare.detour_distance_km += segment.distance_km;
            fare.detour_cost += per_rider;
        }
        return Ok(());
    };

    if others.is_empty() {
        let fare = fare_entry(fares, causer)?;
        fare.detour_distance_km += segment.distance_km;
        fare.detour_cost += total_cost;
        return Ok(());
    }

    let creator_share = config.detour_creator_share;
    let others_share = 1.0 - creator_share;
    let fare = fare_entry(fares, causer)?;
    fare.detour_distance_km += segment.distance_km;
    fare.detour_cost += total_cost * creator_share;

    let per_other = total_cost * others_share / others.len() as f64;
    for rider_id in others {
        let fare = fare_entry(fares, rider_id)?;
        fare.detour_distance_km += segment.distance_km * others_share;
        fare.detour_cost += per_other;
    }
    Ok(())
}
