use bevy_ecs::prelude::{Commands, Entity, Query, Res, ResMut};
use tracing::{error, info};

use crate::config::PricingConfig;
use crate::ecs::{MemberFare, Ride, RideMember};
use crate::events::PendingRecalculation;
use crate::notifications::{MemberFareUpdate, RideNotification, RideNotifications};
use crate::pricing::{price_shared_ride, RidePricingRequest};
use crate::status::MemberStatus;

/// Run condition: some ride is waiting to be repriced.
pub fn has_pending_recalculation(pending: Option<Res<PendingRecalculation>>) -> bool {
    pending.is_some_and(|p| !p.0.is_empty())
}

/// The member the driver's repositioning is billed to: first in drop order
/// among everyone who confirmed, including riders already dropped off.
fn repositioning_payer<'a>(
    members: impl Iterator<Item = &'a RideMember>,
) -> Option<&'a RideMember> {
    members
        .filter(|m| !matches!(m.status, MemberStatus::Pending | MemberStatus::Cancelled))
        .min_by(|a, b| {
            a.drop_order
                .cmp(&b.drop_order)
                .then_with(|| a.rider_id.cmp(&b.rider_id))
        })
}

/// Reprices every pending ride from scratch against its currently active
/// members and overwrites their stored fares. Members that are already
/// dropped off keep the fare they had, including any repositioning charge,
/// so that charge is only passed on while its payer is still active.
pub fn fare_recalculation_system(
    mut commands: Commands,
    config: Res<PricingConfig>,
    mut pending: ResMut<PendingRecalculation>,
    mut notifications: ResMut<RideNotifications>,
    rides: Query<&Ride>,
    members: Query<(Entity, &RideMember)>,
) {
    let mut ride_entities = std::mem::take(&mut pending.0);
    ride_entities.sort();
    ride_entities.dedup();

    for ride_entity in ride_entities {
        let Ok(ride) = rides.get(ride_entity) else {
            continue;
        };

        let active: Vec<(Entity, &RideMember)> = members
            .iter()
            .filter(|(_, member)| member.ride == ride_entity && member.status.is_active())
            .collect();
        if active.is_empty() {
            continue;
        }

        let payer_active = repositioning_payer(
            members
                .iter()
                .filter(|(_, m)| m.ride == ride_entity)
                .map(|(_, m)| m),
        )
        .is_some_and(|payer| payer.status.is_active());

        let request = RidePricingRequest {
            origin: ride.origin,
            driver_position: ride.driver_position.filter(|_| payer_active),
            departure: ride.departure,
            riders: active.iter().map(|(_, m)| m.segment_request()).collect(),
        };

        let pricing = match price_shared_ride(&request, &config) {
            Ok(pricing) => pricing,
            Err(err) => {
                error!(ride = ?ride_entity, %err, "fare recalculation failed");
                notifications.push(RideNotification::RecalculationFailed {
                    ride: ride_entity,
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let mut updates = Vec::with_capacity(active.len());
        for (entity, member) in &active {
            let Some(fare) = pricing.fares.get(&member.rider_id) else {
                continue;
            };
            commands.entity(*entity).insert(MemberFare {
                total_fare: fare.total_fare,
                solo_distance_km: fare.breakdown.solo_distance_km,
                shared_distance_km: fare.breakdown.shared_distance_km,
                itemized: fare.itemized.clone(),
            });
            updates.push(MemberFareUpdate {
                member: *entity,
                rider_id: member.rider_id.clone(),
                total_fare: fare.total_fare,
            });
        }

        info!(
            ride = ?ride_entity,
            riders = updates.len(),
            route_km = pricing.route_distance_km(),
            "fares recalculated"
        );
        notifications.push(RideNotification::FaresUpdated {
            ride: ride_entity,
            fares: updates,
        });
    }
}
