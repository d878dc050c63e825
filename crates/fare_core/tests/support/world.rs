#![allow(dead_code)]

use bevy_ecs::prelude::{Entity, World};
use fare_core::config::PricingConfig;
use fare_core::events::{RideEventKind, RideEventQueue};
use fare_core::notifications::{RideNotification, RideNotifications};
use fare_core::runner::{init_ride_world, ride_schedule, run_until_empty};

/// A ride-management world with the default rate table.
pub fn ride_world() -> World {
    ride_world_with(PricingConfig::default())
}

pub fn ride_world_with(config: PricingConfig) -> World {
    let mut world = World::new();
    init_ride_world(&mut world, config).expect("valid pricing config");
    world
}

/// Queue one event for `member`.
pub fn send(world: &mut World, member: Entity, kind: RideEventKind) {
    world.resource_mut::<RideEventQueue>().push(member, kind);
}

/// Drain the event queue through the ride schedule; returns the step count.
pub fn run_all(world: &mut World) -> usize {
    let mut schedule = ride_schedule();
    let steps = run_until_empty(world, &mut schedule, 10_000);
    assert!(steps < 10_000, "ride runner did not converge");
    steps
}

/// Take every notification emitted so far.
pub fn drain_notifications(world: &mut World) -> Vec<RideNotification> {
    world.resource_mut::<RideNotifications>().drain()
}
