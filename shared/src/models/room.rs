//! Room status

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operational state of a room.
///
/// No transition table is enforced: the panel may set any status from any
/// other through the update endpoint. Booking logic, which would care
/// about ordering, lives outside this system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    Available,
    Occupied,
    Reserved,
    Cleaning,
    Maintenance,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "AVAILABLE",
            RoomStatus::Occupied => "OCCUPIED",
            RoomStatus::Reserved => "RESERVED",
            RoomStatus::Cleaning => "CLEANING",
            RoomStatus::Maintenance => "MAINTENANCE",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
