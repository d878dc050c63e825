use bevy_ecs::prelude::{Component, Entity};
use chrono::NaiveDateTime;

use crate::geo::Coordinate;
use crate::segments::RiderSegmentRequest;
use crate::status::MemberStatus;

#[derive(Debug, Clone, PartialEq, Component)]
pub struct Ride {
    pub origin: Coordinate,
    /// Last reported driver location; `None` until a driver is assigned.
    pub driver_position: Option<Coordinate>,
    /// Caller-local wall-clock departure.
    pub departure: NaiveDateTime,
    /// Private rides keep their upfront quote and are never repriced.
    pub is_shared: bool,
}

#[derive(Debug, Clone, PartialEq, Component)]
pub struct RideMember {
    pub ride: Entity,
    pub rider_id: String,
    pub pickup: Coordinate,
    pub drop: Coordinate,
    pub drop_order: u32,
    pub wait_minutes: f64,
    pub status: MemberStatus,
}

impl RideMember {
    pub fn segment_request(&self) -> RiderSegmentRequest {
        RiderSegmentRequest::new(self.rider_id.clone(), self.pickup, self.drop, self.drop_order)
            .with_wait_minutes(self.wait_minutes)
    }
}

/// Fare currently stored for a member. Overwritten on every repricing while
/// the member is active; frozen once they are dropped off.
#[derive(Debug, Clone, PartialEq, Component)]
pub struct MemberFare {
    pub total_fare: u64,
    pub solo_distance_km: f64,
    pub shared_distance_km: f64,
    pub itemized: String,
}

/// Marker: every member has been dropped off or cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Component)]
pub struct RideCompleted;
