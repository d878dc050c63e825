//! Fare finalization: base fare, surge, tax, rounding and the minimum-fare
//! floor, applied once per rider per pricing run.
//!
//! [`finalize`] consumes the [`FareBreakdown`] and returns a [`FinalFare`], so
//! a breakdown cannot be finalized twice.

use chrono::Timelike;
use serde::Serialize;

use crate::allocation::FareBreakdown;
use crate::config::PricingConfig;
use crate::peak::is_peak_hour;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalFare {
    /// Accumulated components as allocated.
    pub breakdown: FareBreakdown,
    pub base_fare: u64,
    /// Pre-surge, pre-tax sum of all components.
    pub subtotal: f64,
    /// `1.0` off-peak.
    pub surge_multiplier: f64,
    pub tax: f64,
    /// Rounded, floored at the configured minimum.
    pub total_fare: u64,
    /// `0.0` when the rider covered no distance.
    pub fare_per_km: f64,
    /// Human-readable receipt, one component per line.
    pub itemized: String,
}

impl FinalFare {
    pub fn rider_id(&self) -> &str {
        &self.breakdown.rider_id
    }

    pub fn surge_applied(&self) -> bool {
        self.surge_multiplier > 1.0
    }
}

/// Finalize one rider's accumulated costs for a departure at `departure`
/// (caller-local wall-clock time).
pub fn finalize<T: Timelike>(
    breakdown: FareBreakdown,
    departure: &T,
    config: &PricingConfig,
) -> FinalFare {
    let base_fare = config.base_fare;
    let subtotal = base_fare as f64
        + breakdown.solo_cost
        + breakdown.shared_cost
        + breakdown.detour_cost
        + breakdown.pickup_distance_cost
        + breakdown.wait_time_cost;

    let surge_multiplier = if is_peak_hour(departure, &config.peak_windows) {
        config.peak_multiplier
    } else {
        1.0
    };
    let after_surge = subtotal * surge_multiplier;
    let tax = after_surge * config.tax_percent;

    let rounded = (after_surge + tax).round().max(0.0) as u64;
    let total_fare = rounded.max(config.minimum_fare);

    let distance = breakdown.total_distance_km();
    let fare_per_km = if distance > 0.0 {
        total_fare as f64 / distance
    } else {
        0.0
    };

    let mut fare = FinalFare {
        breakdown,
        base_fare,
        subtotal,
        surge_multiplier,
        tax,
        total_fare,
        fare_per_km,
        itemized: String::new(),
    };
    fare.itemized = itemize(&fare, config);
    fare
}

fn itemize(fare: &FinalFare, config: &PricingConfig) -> String {
    let money = |value: f64| format!("{}{}", config.currency_symbol, value.round() as i64);
    let b = &fare.breakdown;
    let mut lines = Vec::new();

    if fare.base_fare > 0 {
        lines.push(format!("Base Fare: {}", money(fare.base_fare as f64)));
    }
    if b.solo_distance_km > 0.0 {
        lines.push(format!(
            "Solo Travel ({:.1} km): {}",
            b.solo_distance_km,
            money(b.solo_cost)
        ));
    }
    if b.shared_distance_km > 0.0 {
        lines.push(format!(
            "Shared Travel ({:.1} km): {}",
            b.shared_distance_km,
            money(b.shared_cost)
        ));
    }
    if b.detour_distance_km > 0.0 {
        lines.push(format!(
            "Detour ({:.1} km): {}",
            b.detour_distance_km,
            money(b.detour_cost)
        ));
    }
    if b.pickup_distance_cost > 0.0 {
        lines.push(format!(
            "Driver Pickup Distance: {}",
            money(b.pickup_distance_cost)
        ));
    }
    if b.wait_time_cost > 0.0 {
        lines.push(format!("Wait Time: {}", money(b.wait_time_cost)));
    }
    lines.push(format!("Subtotal: {}", money(fare.subtotal)));
    if fare.surge_applied() {
        lines.push(format!(
            "Peak Hour Surge ({:.0}%): {}",
            (fare.surge_multiplier - 1.0) * 100.0,
            money(fare.subtotal * (fare.surge_multiplier - 1.0))
        ));
    }
    if fare.tax > 0.0 {
        lines.push(format!(
            "GST ({:.0}%): {}",
            config.tax_percent * 100.0,
            money(fare.tax)
        ));
    }
    lines.push(format!("Total: {}", money(fare.total_fare as f64)));

    lines.join("\n")
}
