//! Ride-management runner: drains the event queue into the ECS one event at a
//! time.
//!
//! Each step pops the next [RideEvent] from [RideEventQueue], inserts it as
//! [CurrentRideEvent], then runs the schedule. Because a world is only ever
//! stepped by one caller, membership changes for a ride are serialized and
//! repricing never observes a half-applied event.

use bevy_ecs::prelude::{Schedule, World};
use bevy_ecs::schedule::{apply_deferred, IntoSystemConfigs};

use crate::config::PricingConfig;
use crate::error::Result;
use crate::events::{CurrentRideEvent, PendingRecalculation, RideEvent, RideEventQueue};
use crate::notifications::RideNotifications;
use crate::systems::{
    fare_recalculation::{fare_recalculation_system, has_pending_recalculation},
    member_transition::member_transition_system,
    ride_completion::ride_completion_system,
};

/// Validate `config` and insert the resources the ride schedule expects.
/// Nothing is inserted if the rate table is invalid.
pub fn init_ride_world(world: &mut World, config: PricingConfig) -> Result<()> {
    config.validate()?;
    world.insert_resource(config);
    world.insert_resource(RideEventQueue::default());
    world.insert_resource(PendingRecalculation::default());
    world.insert_resource(RideNotifications::default());
    Ok(())
}

/// Transition, then reprice, then completion check, then [apply_deferred] so
/// stored fares and completion markers are visible to the next step.
pub fn ride_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            member_transition_system,
            fare_recalculation_system.run_if(has_pending_recalculation),
            ride_completion_system,
            apply_deferred,
        )
            .chain(),
    );
    schedule
}

/// Process one queued event. Returns `false` when the queue is empty.
pub fn run_next_event(world: &mut World, schedule: &mut Schedule) -> bool {
    let event: Option<RideEvent> = world
        .get_resource_mut::<RideEventQueue>()
        .and_then(|mut queue| queue.pop_next());
    let Some(event) = event else {
        return false;
    };
    world.insert_resource(CurrentRideEvent(event));
    schedule.run(world);
    true
}

/// Process events until the queue is empty or `max_steps` is reached.
/// Returns the number of events processed.
pub fn run_until_empty(world: &mut World, schedule: &mut Schedule, max_steps: usize) -> usize {
    let mut steps = 0;
    while steps < max_steps && run_next_event(world, schedule) {
        steps += 1;
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{MemberFare, RideCompleted, RideMember};
    use crate::events::RideEventKind;
    use crate::status::MemberStatus;
    use crate::test_helpers::{noon, test_member, test_ride};

    #[test]
    fn empty_queue_runs_nothing() {
        let mut world = World::new();
        init_ride_world(&mut world, PricingConfig::default()).expect("valid config");
        let mut schedule = ride_schedule();
        assert_eq!(run_until_empty(&mut world, &mut schedule, 10), 0);
    }

    #[test]
    fn invalid_config_is_not_installed() {
        let mut world = World::new();
        let config = PricingConfig {
            detour_creator_share: 1.2,
            ..PricingConfig::default()
        };
        assert!(init_ride_world(&mut world, config).is_err());
        assert!(world.get_resource::<PricingConfig>().is_none());
        assert!(world.get_resource::<RideEventQueue>().is_none());
    }

    #[test]
    fn solo_ride_lifecycle_prices_then_completes() {
        let mut world = World::new();
        init_ride_world(&mut world, PricingConfig::default()).expect("valid config");
        let ride = world.spawn(test_ride(true, noon())).id();
        let member = world
            .spawn(test_member(ride, "a", 1, MemberStatus::Pending))
            .id();

        {
            let mut queue = world.resource_mut::<RideEventQueue>();
            queue.push(member, RideEventKind::Confirm);
            queue.push(member, RideEventKind::PickUp);
            queue.push(member, RideEventKind::DropOff);
        }
        let mut schedule = ride_schedule();
        assert_eq!(run_until_empty(&mut world, &mut schedule, 10), 3);

        let fare = world.get::<MemberFare>(member).expect("stored fare");
        assert!(fare.total_fare >= 40);
        assert_eq!(
            world.get::<RideMember>(member).expect("member").status,
            MemberStatus::DroppedOff
        );
        assert!(world.get::<RideCompleted>(ride).is_some());
    }

    #[test]
    fn max_steps_bounds_processing() {
        let mut world = World::new();
        init_ride_world(&mut world, PricingConfig::default()).expect("valid config");
        let ride = world.spawn(test_ride(true, noon())).id();
        let member = world
            .spawn(test_member(ride, "a", 1, MemberStatus::Pending))
            .id();
        {
            let mut queue = world.resource_mut::<RideEventQueue>();
            queue.push(member, RideEventKind::Confirm);
            queue.push(member, RideEventKind::PickUp);
        }
        let mut schedule = ride_schedule();
        assert_eq!(run_until_empty(&mut world, &mut schedule, 1), 1);
        assert_eq!(world.resource::<RideEventQueue>().len(), 1);
    }
}
