//! Outbox of ride changes for the broadcast layer.
//!
//! Systems append here after a change is complete; whoever owns client
//! connections drains it and pushes the messages out.

use bevy_ecs::prelude::{Entity, Resource};

use crate::status::MemberStatus;

#[derive(Debug, Clone, PartialEq)]
pub struct MemberFareUpdate {
    pub member: Entity,
    pub rider_id: String,
    pub total_fare: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RideNotification {
    FaresUpdated {
        ride: Entity,
        fares: Vec<MemberFareUpdate>,
    },
    TransitionRejected {
        member: Entity,
        from: MemberStatus,
        to: MemberStatus,
    },
    RecalculationFailed {
        ride: Entity,
        reason: String,
    },
    RideCompleted {
        ride: Entity,
    },
}

#[derive(Debug, Default, Resource)]
pub struct RideNotifications {
    pending: Vec<RideNotification>,
}

impl RideNotifications {
    pub fn push(&mut self, notification: RideNotification) {
        self.pending.push(notification);
    }

    pub fn pending(&self) -> &[RideNotification] {
        &self.pending
    }

    /// Take everything queued so far.
    pub fn drain(&mut self) -> Vec<RideNotification> {
        std::mem::take(&mut self.pending)
    }
}
