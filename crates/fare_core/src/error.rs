//! Error type shared by the fare engine and the ride-management layer.

use crate::status::MemberStatus;

#[derive(Debug, thiserror::Error)]
pub enum FareError {
    #[error("invalid pricing config: {0}")]
    InvalidConfig(String),

    #[error("failed to parse pricing config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("failed to read pricing config: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("coordinate out of range: lat={lat}, lng={lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },

    #[error("rider '{0}' appears more than once in the ride")]
    DuplicateRider(String),

    /// A segment references a rider the caller did not register for allocation.
    #[error("rider '{0}' is on the route but has no fare entry")]
    UnknownRider(String),

    #[error("rider '{0}' has a fare entry but never appears on the route")]
    RiderWithoutSegments(String),

    #[error("rider '{0}' has drop order 0; drop orders start at 1")]
    InvalidDropOrder(String),

    #[error("seat count must be at least 1 (got {0})")]
    InvalidSeats(u32),

    #[error("member status cannot move from {from} to {to}")]
    InvalidTransition { from: MemberStatus, to: MemberStatus },

    #[error("unknown member status '{0}'")]
    UnknownStatus(String),
}

pub type Result<T> = std::result::Result<T, FareError>;
