use bevy_ecs::prelude::{Commands, Entity, Query, Res, ResMut, With, Without};
use tracing::info;

use crate::ecs::{Ride, RideCompleted, RideMember};
use crate::events::CurrentRideEvent;
use crate::notifications::{RideNotification, RideNotifications};

/// Marks the current event's ride completed once every member has been
/// dropped off or cancelled.
pub fn ride_completion_system(
    mut commands: Commands,
    event: Res<CurrentRideEvent>,
    mut notifications: ResMut<RideNotifications>,
    open_rides: Query<Entity, (With<Ride>, Without<RideCompleted>)>,
    members: Query<&RideMember>,
) {
    let Ok(member) = members.get(event.0.member) else {
        return;
    };
    let Ok(ride_entity) = open_rides.get(member.ride) else {
        return;
    };

    let all_done = members
        .iter()
        .filter(|m| m.ride == ride_entity)
        .all(|m| m.status.is_terminal());
    if !all_done {
        return;
    }

    commands.entity(ride_entity).insert(RideCompleted);
    info!(ride = ?ride_entity, "ride completed");
    notifications.push(RideNotification::RideCompleted { ride: ride_entity });
}
