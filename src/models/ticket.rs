use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::coordinate::Coordinate;
use super::enums::{EmergencyType, Severity, TicketStatus};

/// The person (or group representative) a ticket is about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
    /// Normalized population-group label used for cultural/language
    /// considerations in the recommendation generator.
    pub group_label: Option<String>,
    pub family_size: Option<u32>,
    pub contact: String,
}

/// What happened, as reported at intake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Emergency {
    pub emergency_type: EmergencyType,
    pub severity: Severity,
    pub description: String,
    pub symptoms: Option<Vec<String>>,
    /// Number of people affected. Intake rejects values below 1.
    pub affected_count: u32,
}

/// A nearby facility candidate, ranked by distance at ticket creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedFacility {
    pub facility_id: Uuid,
    pub distance_km: f64,
    pub bearing_deg: f64,
}

/// Deterministic resource/priority bundle attached to a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub supplies: Vec<String>,
    /// 1 (routine) through 5 (maximum).
    pub priority: u8,
    pub estimated_response: String,
    pub considerations: Vec<String>,
}

/// A single emergency-assistance request with subject, location,
/// classification, and lifecycle status.
///
/// Expected lifecycle: open → assigned → in_progress → resolved → closed.
/// `update_status` does not enforce the ordering; the path reflects the
/// staff UI, not a hard constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,
    pub subject: Subject,
    pub coordinate: Coordinate,
    pub address: Option<String>,
    pub emergency: Emergency,
    /// Ranked by ascending distance, at most 5 entries.
    pub nearest_facilities: Vec<RankedFacility>,
    /// If present, a member of `nearest_facilities` unless staff reassigned
    /// explicitly.
    pub assigned_facility: Option<Uuid>,
    pub status: TicketStatus,
    pub recommendation: Option<Recommendation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Tickets that still occupy emergency capacity at their facility.
    pub fn is_active(&self) -> bool {
        !matches!(self.status, TicketStatus::Resolved | TicketStatus::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(status: TicketStatus) -> Ticket {
        Ticket {
            id: Uuid::new_v4(),
            subject: Subject {
                name: "Amal H.".into(),
                age: Some(34),
                gender: None,
                group_label: Some("syrian".into()),
                family_size: Some(5),
                contact: "+961-000".into(),
            },
            coordinate: Coordinate::new(33.8, 35.5),
            address: Some("Sector 4, shelter 12".into()),
            emergency: Emergency {
                emergency_type: EmergencyType::Medical,
                severity: Severity::Medium,
                description: "fever and cough".into(),
                symptoms: None,
                affected_count: 1,
            },
            nearest_facilities: Vec::new(),
            assigned_facility: None,
            status,
            recommendation: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            resolved_at: None,
        }
    }

    #[test]
    fn open_and_assigned_tickets_are_active() {
        assert!(ticket(TicketStatus::Open).is_active());
        assert!(ticket(TicketStatus::Assigned).is_active());
        assert!(ticket(TicketStatus::InProgress).is_active());
    }

    #[test]
    fn resolved_and_closed_tickets_are_inactive() {
        assert!(!ticket(TicketStatus::Resolved).is_active());
        assert!(!ticket(TicketStatus::Closed).is_active());
    }
}
