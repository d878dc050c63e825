//! Time-of-day surge windows.

use chrono::Timelike;
use serde::{Deserialize, Serialize};

/// Half-open local-hour interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakWindow {
    pub start: u32,
    pub end: u32,
}

impl PeakWindow {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains_hour(&self, hour: u32) -> bool {
        hour >= self.start && hour < self.end
    }

    fn overlaps(&self, other: &PeakWindow) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Whether the wall-clock hour of `departure` falls in any window.
///
/// Evaluated against the hour of the value as given: pass caller-local time,
/// not UTC.
pub fn is_peak_hour<T: Timelike>(departure: &T, windows: &[PeakWindow]) -> bool {
    let hour = departure.hour();
    windows.iter().any(|window| window.contains_hour(hour))
}

/// Returns a description of the first malformed or overlapping window, if any.
pub(crate) fn window_problem(windows: &[PeakWindow]) -> Option<String> {
    for (i, window) in windows.iter().enumerate() {
        if window.start >= window.end || window.end > 24 {
            return Some(format!(
                "peak window {}..{} must satisfy start < end <= 24",
                window.start, window.end
            ));
        }
        if let Some(other) = windows[..i].iter().find(|w| w.overlaps(window)) {
            return Some(format!(
                "peak windows {}..{} and {}..{} overlap",
                other.start, other.end, window.start, window.end
            ));
        }
    }
    None
}
