//! Route construction: turns a driver origin plus ordered rider stops into
//! directed legs tagged with who is aboard and why the leg exists.
//!
//! The route is built in two phases. All pickups are visited first, in drop
//! order, then all drops in the same order. Pickup order is assumed equal to
//! drop order; interleaved pickup/drop sequences are not modelled.

use serde::{Deserialize, Serialize};

use crate::geo::{distance_km, Coordinate};

/// One rider's trip intent within a single route build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiderSegmentRequest {
    /// Unique within one route build.
    pub rider_id: String,
    pub pickup: Coordinate,
    pub drop: Coordinate,
    /// 1 = dropped first. Ties are broken by `rider_id`.
    pub drop_order: u32,
    /// Minutes the driver waited for this rider at pickup.
    #[serde(default)]
    pub wait_minutes: f64,
}

impl RiderSegmentRequest {
    pub fn new(
        rider_id: impl Into<String>,
        pickup: Coordinate,
        drop: Coordinate,
        drop_order: u32,
    ) -> Self {
        Self {
            rider_id: rider_id.into(),
            pickup,
            drop,
            drop_order,
            wait_minutes: 0.0,
        }
    }

    pub fn with_wait_minutes(mut self, minutes: f64) -> Self {
        self.wait_minutes = minutes;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentType {
    /// Exactly one rider aboard (or nobody, on the way to the first pickup).
    Solo,
    /// Two or more riders aboard; cost is split evenly.
    Shared,
    /// A pickup leg driven with riders already aboard; weighted toward `caused_by`.
    Detour,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub from: Coordinate,
    pub to: Coordinate,
    pub distance_km: f64,
    /// Riders physically in the car while this leg is driven, in boarding order.
    pub riders_present: Vec<String>,
    pub segment_type: SegmentType,
    /// The rider whose pickup or drop is the end of this leg.
    pub caused_by: Option<String>,
}

/// Riders sorted by `(drop_order, rider_id)`.
pub fn in_drop_order(riders: &[RiderSegmentRequest]) -> Vec<&RiderSegmentRequest> {
    let mut sorted: Vec<&RiderSegmentRequest> = riders.iter().collect();
    sorted.sort_by(|a, b| {
        a.drop_order
            .cmp(&b.drop_order)
            .then_with(|| a.rider_id.cmp(&b.rider_id))
    });
    sorted
}

/// Build the full pickup-then-drop route starting at `origin`.
///
/// An empty rider list yields an empty route.
pub fn build_route(origin: Coordinate, riders: &[RiderSegmentRequest]) -> Vec<RouteSegment> {
    let ordered = in_drop_order(riders);
    let mut segments = Vec::with_capacity(ordered.len() * 2);
    let mut aboard: Vec<String> = Vec::with_capacity(ordered.len());
    let mut position = origin;

    for rider in &ordered {
        if aboard.contains(&rider.rider_id) {
            continue;
        }
        let segment_type = if aboard.is_empty() {
            SegmentType::Solo
        } else {
            SegmentType::Detour
        };
        segments.push(RouteSegment {
            from: position,
            to: rider.pickup,
            distance_km: distance_km(position, rider.pickup),
            riders_present: aboard.clone(),
            segment_type,
            caused_by: Some(rider.rider_id.clone()),
        });
        aboard.push(rider.rider_id.clone());
        position = rider.pickup;
    }

    for rider in &ordered {
        if !aboard.contains(&rider.rider_id) {
            continue;
        }
        let segment_type = if aboard.len() > 1 {
            SegmentType::Shared
        } else {
            SegmentType::Solo
        };
        segments.push(RouteSegment {
            from: position,
            to: rider.drop,
            distance_km: distance_km(position, rider.drop),
            riders_present: aboard.clone(),
            segment_type,
            caused_by: Some(rider.rider_id.clone()),
        });
        aboard.retain(|id| id != &rider.rider_id);
        position = rider.drop;
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).expect("valid coordinate")
    }

    #[test]
    fn empty_rider_list_builds_empty_route() {
        assert!(build_route(coord(0.0, 0.0), &[]).is_empty());
    }

    #[test]
    fn single_rider_gets_unmanned_approach_then_solo_leg() {
        let rider = RiderSegmentRequest::new("a", coord(0.0, 0.01), coord(0.0, 0.1), 1);
        let route = build_route(coord(0.0, 0.0), &[rider]);

        assert_eq!(route.len(), 2);
        assert_eq!(route[0].segment_type, SegmentType::Solo);
        assert!(route[0].riders_present.is_empty());
        assert_eq!(route[1].segment_type, SegmentType::Solo);
        assert_eq!(route[1].riders_present, vec!["a".to_string()]);
        assert_eq!(route[1].to, coord(0.0, 0.1));
    }

    #[test]
    fn second_pickup_is_a_detour_and_drops_snapshot_before_removal() {
        let riders = vec![
            RiderSegmentRequest::new("b", coord(0.02, 0.0), coord(0.0, 0.2), 2),
            RiderSegmentRequest::new("a", coord(0.0, 0.0), coord(0.0, 0.1), 1),
        ];
        let route = build_route(coord(0.0, 0.0), &riders);
        let kinds: Vec<SegmentType> = route.iter().map(|s| s.segment_type).collect();
        assert_eq!(
            kinds,
            vec![
                SegmentType::Solo,
                SegmentType::Detour,
                SegmentType::Shared,
                SegmentType::Solo
            ]
        );

        assert_eq!(route[1].caused_by.as_deref(), Some("b"));
        assert_eq!(route[1].riders_present, vec!["a".to_string()]);
        assert_eq!(route[2].riders_present, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(route[3].riders_present, vec!["b".to_string()]);
    }

    #[test]
    fn drop_order_ties_break_on_rider_id() {
        let stop = coord(0.0, 0.05);
        let riders = vec![
            RiderSegmentRequest::new("zed", stop, stop, 1),
            RiderSegmentRequest::new("amy", stop, stop, 1),
        ];
        let ordered: Vec<&str> = in_drop_order(&riders)
            .iter()
            .map(|r| r.rider_id.as_str())
            .collect();
        assert_eq!(ordered, vec!["amy", "zed"]);
    }

    #[test]
    fn distances_follow_the_haversine_legs() {
        let origin = coord(0.0, 0.0);
        let rider = RiderSegmentRequest::new("a", coord(0.0, 0.05), coord(0.0, 0.1), 1);
        let route = build_route(origin, std::slice::from_ref(&rider));
        assert_eq!(route[0].distance_km, distance_km(origin, rider.pickup));
        assert_eq!(route[1].distance_km, distance_km(rider.pickup, rider.drop));
    }
}
