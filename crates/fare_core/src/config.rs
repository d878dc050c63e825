//! Pricing configuration: the complete rate table consumed by the engine.
//!
//! A `PricingConfig` is passed explicitly to every pricing entry point and is
//! inserted into the ride-management world as a resource. Nothing in the
//! engine reads rates from anywhere else.

use std::path::Path;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::error::{FareError, Result};
use crate::peak::{window_problem, PeakWindow};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
pub struct PricingConfig {
    /// Flat charge per rider, in whole currency units.
    pub base_fare: u64,
    /// Floor applied to every finalized fare.
    pub minimum_fare: u64,
    pub rate_per_km: f64,
    /// Rate applied to detour legs (route deviations caused by one rider).
    pub detour_rate_per_km: f64,
    /// Driver repositioning distance that is not charged.
    pub free_pickup_km: f64,
    /// Rate for repositioning distance beyond `free_pickup_km`.
    pub pickup_rate_per_km: f64,
    pub wait_free_minutes: f64,
    pub wait_rate_per_minute: f64,
    pub peak_multiplier: f64,
    pub peak_windows: Vec<PeakWindow>,
    /// Tax as a fraction of the post-surge subtotal (0.05 = 5%).
    pub tax_percent: f64,
    /// Platform commission as a fraction of driver revenue.
    pub platform_fee_percent: f64,
    /// Fraction of a detour leg's cost charged to the rider who caused it.
    pub detour_creator_share: f64,
    pub currency_symbol: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_fare: 35,
            minimum_fare: 40,
            rate_per_km: 11.5,
            detour_rate_per_km: 15.0,
            free_pickup_km: 2.0,
            pickup_rate_per_km: 5.0,
            wait_free_minutes: 5.0,
            wait_rate_per_minute: 2.0,
            peak_multiplier: 1.3,
            peak_windows: vec![PeakWindow::new(7, 10), PeakWindow::new(17, 21)],
            tax_percent: 0.05,
            platform_fee_percent: 0.15,
            detour_creator_share: 0.7,
            currency_symbol: "₹".to_string(),
        }
    }
}

impl PricingConfig {
    /// Parse a JSON rate table and validate it. Every field must be present.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: PricingConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON rate table from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check every rule and report the first violation. Values are never clamped.
    pub fn validate(&self) -> Result<()> {
        if self.minimum_fare == 0 {
            return Err(invalid("minimum_fare must be greater than 0"));
        }

        let rates = [
            ("rate_per_km", self.rate_per_km),
            ("detour_rate_per_km", self.detour_rate_per_km),
            ("free_pickup_km", self.free_pickup_km),
            ("pickup_rate_per_km", self.pickup_rate_per_km),
            ("wait_free_minutes", self.wait_free_minutes),
            ("wait_rate_per_minute", self.wait_rate_per_minute),
        ];
        for (name, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!(
                    "{name} must be a non-negative number (got {value})"
                )));
            }
        }

        if !self.peak_multiplier.is_finite() || self.peak_multiplier < 1.0 {
            return Err(invalid(format!(
                "peak_multiplier must be at least 1.0 (got {})",
                self.peak_multiplier
            )));
        }

        for (name, value) in [
            ("tax_percent", self.tax_percent),
            ("platform_fee_percent", self.platform_fee_percent),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(invalid(format!("{name} must be in [0, 1) (got {value})")));
            }
        }

        if !(0.0..=1.0).contains(&self.detour_creator_share) {
            return Err(invalid(format!(
                "detour_creator_share must be in [0, 1] (got {})",
                self.detour_creator_share
            )));
        }

        if let Some(problem) = window_problem(&self.peak_windows) {
            return Err(invalid(problem));
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> FareError {
    FareError::InvalidConfig(message.into())
}
