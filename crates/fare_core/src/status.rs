//! Ride-member lifecycle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FareError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberStatus {
    Pending,
    Confirmed,
    PickedUp,
    DroppedOff,
    Cancelled,
}

impl MemberStatus {
    pub fn can_transition_to(self, next: MemberStatus) -> bool {
        use MemberStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, PickedUp)
                | (Confirmed, Cancelled)
                | (PickedUp, DroppedOff)
        )
    }

    /// Validated transition; the current status is left unchanged on error.
    pub fn transition(self, next: MemberStatus) -> Result<MemberStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(FareError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }

    /// Members whose fare is repriced when the ride changes.
    pub fn is_active(self) -> bool {
        matches!(self, MemberStatus::Confirmed | MemberStatus::PickedUp)
    }

    /// No further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, MemberStatus::DroppedOff | MemberStatus::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MemberStatus::Pending => "PENDING",
            MemberStatus::Confirmed => "CONFIRMED",
            MemberStatus::PickedUp => "PICKED_UP",
            MemberStatus::DroppedOff => "DROPPED_OFF",
            MemberStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberStatus {
    type Err = FareError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PENDING" => Ok(MemberStatus::Pending),
            "CONFIRMED" => Ok(MemberStatus::Confirmed),
            "PICKED_UP" => Ok(MemberStatus::PickedUp),
            "DROPPED_OFF" => Ok(MemberStatus::DroppedOff),
            "CANCELLED" => Ok(MemberStatus::Cancelled),
            other => Err(FareError::UnknownStatus(other.to_string())),
        }
    }
}
