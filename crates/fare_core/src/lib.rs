//! Shared-ride fare engine.
//!
//! The pure pricing pipeline lives in [`segments`] → [`allocation`] →
//! [`finalize`], driven end to end by [`pricing::price_shared_ride`]. The
//! [`ecs`], [`systems`] and [`runner`] modules wrap it in a single-writer
//! ride-management world that reprices rides as members join, cancel and are
//! dropped off.

pub mod allocation;
pub mod config;
pub mod ecs;
pub mod error;
pub mod events;
pub mod finalize;
pub mod geo;
pub mod notifications;
pub mod peak;
pub mod pricing;
pub mod runner;
pub mod segments;
pub mod status;
pub mod systems;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use config::PricingConfig;
pub use error::{FareError, Result};
