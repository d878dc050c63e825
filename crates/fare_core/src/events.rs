//! Ride membership events and the queue that serializes them.
//!
//! All membership mutations go through [`RideEventQueue`] and are applied one
//! at a time by the runner, so repricing always sees a consistent member set.

use std::collections::VecDeque;

use bevy_ecs::prelude::{Entity, Resource};

use crate::status::MemberStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RideEventKind {
    Confirm,
    PickUp,
    DropOff,
    Cancel,
}

impl RideEventKind {
    /// Status the member moves to when the event is applied.
    pub fn target_status(self) -> MemberStatus {
        match self {
            RideEventKind::Confirm => MemberStatus::Confirmed,
            RideEventKind::PickUp => MemberStatus::PickedUp,
            RideEventKind::DropOff => MemberStatus::DroppedOff,
            RideEventKind::Cancel => MemberStatus::Cancelled,
        }
    }

    /// Whether the event changes which members share the ride.
    pub fn changes_rider_set(self) -> bool {
        !matches!(self, RideEventKind::PickUp)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RideEvent {
    pub member: Entity,
    pub kind: RideEventKind,
}

#[derive(Debug, Default, Resource)]
pub struct RideEventQueue {
    events: VecDeque<RideEvent>,
}

impl RideEventQueue {
    pub fn push(&mut self, member: Entity, kind: RideEventKind) {
        self.events.push_back(RideEvent { member, kind });
    }

    pub fn pop_next(&mut self) -> Option<RideEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// The event being processed by the current schedule run.
#[derive(Debug, Clone, Copy, Resource)]
pub struct CurrentRideEvent(pub RideEvent);

/// Rides whose fares must be recomputed after the current event.
#[derive(Debug, Default, Resource)]
pub struct PendingRecalculation(pub Vec<Entity>);
