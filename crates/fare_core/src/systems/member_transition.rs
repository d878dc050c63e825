use bevy_ecs::prelude::{Query, Res, ResMut};
use tracing::{debug, warn};

use crate::ecs::{Ride, RideMember};
use crate::events::{CurrentRideEvent, PendingRecalculation};
use crate::notifications::{RideNotification, RideNotifications};

/// Applies the current event's status change to its member. Invalid
/// transitions leave the member untouched and are reported.
pub fn member_transition_system(
    event: Res<CurrentRideEvent>,
    rides: Query<&Ride>,
    mut members: Query<&mut RideMember>,
    mut pending: ResMut<PendingRecalculation>,
    mut notifications: ResMut<RideNotifications>,
) {
    let event = event.0;
    let Ok(mut member) = members.get_mut(event.member) else {
        warn!(member = ?event.member, kind = ?event.kind, "ride event for unknown member");
        return;
    };

    let previous = member.status;
    let target = event.kind.target_status();
    match previous.transition(target) {
        Ok(next) => {
            member.status = next;
            debug!(
                rider_id = %member.rider_id,
                from = %previous,
                to = %next,
                "member status changed"
            );

            let is_shared = rides.get(member.ride).is_ok_and(|ride| ride.is_shared);
            let touches_active_set = previous.is_active() || next.is_active();
            if is_shared && event.kind.changes_rider_set() && touches_active_set {
                pending.0.push(member.ride);
            }
        }
        Err(err) => {
            warn!(rider_id = %member.rider_id, %err, "rejected member transition");
            notifications.push(RideNotification::TransitionRejected {
                member: event.member,
                from: previous,
                to: target,
            });
        }
    }
}
