use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::coordinate::Coordinate;
use super::enums::{FacilityKind, FacilityStatus};

/// A care-providing location with capacity and specialty attributes.
///
/// Invariant (enforced by the directory on add/update):
/// `emergency_beds <= total_beds`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    pub id: Uuid,
    pub name: String,
    pub kind: FacilityKind,
    pub specialties: Vec<String>,
    pub coordinate: Coordinate,
    pub total_beds: u32,
    pub emergency_beds: u32,
    pub staff_count: u32,
    pub services: Vec<String>,
    pub status: FacilityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Facility {
    /// Whether this facility can currently receive assignments.
    pub fn is_active(&self) -> bool {
        self.status == FacilityStatus::Active
    }
}

/// Incoming facility record from the admin surface; the directory assigns
/// id and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFacility {
    pub name: String,
    pub kind: FacilityKind,
    #[serde(default)]
    pub specialties: Vec<String>,
    pub coordinate: Coordinate,
    pub total_beds: u32,
    pub emergency_beds: u32,
    #[serde(default)]
    pub staff_count: u32,
    #[serde(default)]
    pub services: Vec<String>,
    pub status: FacilityStatus,
}
