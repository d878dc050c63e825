#![allow(dead_code)]

use bevy_ecs::prelude::{Entity, World};
use chrono::NaiveDateTime;
use fare_core::ecs::{Ride, RideMember};
use fare_core::geo::Coordinate;
use fare_core::status::MemberStatus;
use fare_core::test_helpers::{coord, noon};

/// Builder for ride fixtures.
#[derive(Clone, Debug)]
pub struct RideBuilder {
    origin: Coordinate,
    driver_position: Option<Coordinate>,
    departure: NaiveDateTime,
    is_shared: bool,
}

impl Default for RideBuilder {
    fn default() -> Self {
        Self {
            origin: coord(0.0, 0.0),
            driver_position: None,
            departure: noon(),
            is_shared: true,
        }
    }
}

impl RideBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_origin(mut self, origin: Coordinate) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_driver_at(mut self, position: Coordinate) -> Self {
        self.driver_position = Some(position);
        self
    }

    pub fn with_departure(mut self, departure: NaiveDateTime) -> Self {
        self.departure = departure;
        self
    }

    pub fn private(mut self) -> Self {
        self.is_shared = false;
        self
    }

    pub fn spawn(self, world: &mut World) -> Entity {
        world
            .spawn(Ride {
                origin: self.origin,
                driver_position: self.driver_position,
                departure: self.departure,
                is_shared: self.is_shared,
            })
            .id()
    }
}

/// Builder for ride member fixtures.
#[derive(Clone, Debug)]
pub struct MemberBuilder {
    rider_id: String,
    pickup: Coordinate,
    drop: Coordinate,
    drop_order: u32,
    wait_minutes: f64,
    status: MemberStatus,
}

impl MemberBuilder {
    pub fn new(rider_id: &str) -> Self {
        Self {
            rider_id: rider_id.to_string(),
            pickup: coord(0.0, 0.0),
            drop: coord(0.0, 0.1),
            drop_order: 1,
            wait_minutes: 0.0,
            status: MemberStatus::Pending,
        }
    }

    pub fn with_pickup(mut self, pickup: Coordinate) -> Self {
        self.pickup = pickup;
        self
    }

    pub fn with_drop(mut self, drop: Coordinate) -> Self {
        self.drop = drop;
        self
    }

    pub fn with_drop_order(mut self, drop_order: u32) -> Self {
        self.drop_order = drop_order;
        self
    }

    pub fn with_wait_minutes(mut self, minutes: f64) -> Self {
        self.wait_minutes = minutes;
        self
    }

    pub fn with_status(mut self, status: MemberStatus) -> Self {
        self.status = status;
        self
    }

    pub fn spawn(self, world: &mut World, ride: Entity) -> Entity {
        world
            .spawn(RideMember {
                ride,
                rider_id: self.rider_id,
                pickup: self.pickup,
                drop: self.drop,
                drop_order: self.drop_order,
                wait_minutes: self.wait_minutes,
                status: self.status,
            })
            .id()
    }
}
