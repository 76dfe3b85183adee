//! Ticket lifecycle: intake, auto-assignment, status transitions,
//! reassignment, and per-facility listing.
//!
//! Expected status path is open → assigned → in_progress → resolved →
//! closed. `update_status` is deliberately a bare setter — staff may set
//! any status; the ordering describes the UI-driven path, not a guard.

use std::sync::{Arc, Mutex, RwLock};

use chrono::Utc;
use uuid::Uuid;

use crate::directory::{DirectoryError, FacilityDirectory};
use crate::geo;
use crate::models::ticket::{Emergency, RankedFacility, Subject, Ticket};
use crate::models::{Coordinate, FacilityKind, Severity, TicketStatus};
use crate::recommend::recommend;

/// Facilities considered per ticket.
const NEAREST_K: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum TicketError {
    #[error("ticket not found: {0}")]
    NotFound(Uuid),
    #[error("invalid intake: {0}")]
    Validation(String),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error("internal lock error")]
    LockFailed,
}

/// Intake payload from the UI layer.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TicketIntake {
    pub subject: Subject,
    pub coordinate: Coordinate,
    pub address: Option<String>,
    pub emergency: Emergency,
}

/// Facility notification seam. Implementations must not block ticket
/// creation and must not fail it — delivery problems are theirs to log.
pub trait Notifier: Send + Sync {
    fn notify(&self, facility_id: Uuid, ticket: &Ticket);
}

/// Default notifier: logs the event. A real deployment swaps in a
/// transport-backed implementation behind the same trait.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, facility_id: Uuid, ticket: &Ticket) {
        tracing::info!(
            facility_id = %facility_id,
            ticket_id = %ticket.id,
            severity = ticket.emergency.severity.as_str(),
            "facility notified of ticket"
        );
    }
}

/// Test double that records every notification.
pub struct RecordingNotifier {
    pub notified: Mutex<Vec<(Uuid, Uuid)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            notified: Mutex::new(Vec::new()),
        }
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, facility_id: Uuid, ticket: &Ticket) {
        if let Ok(mut notified) = self.notified.lock() {
            notified.push((facility_id, ticket.id));
        }
    }
}

/// Orchestrates geospatial ranking, recommendation, and assignment; owns
/// ticket storage.
pub struct TicketManager {
    tickets: RwLock<Vec<Ticket>>,
    directory: Arc<FacilityDirectory>,
    notifier: Arc<dyn Notifier>,
}

impl TicketManager {
    pub fn new(directory: Arc<FacilityDirectory>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            tickets: RwLock::new(Vec::new()),
            directory,
            notifier,
        }
    }

    /// Create a ticket: rank nearby active facilities, attach the
    /// recommendation bundle, auto-assign, and notify.
    ///
    /// An empty candidate set is a valid outcome — the ticket stays open
    /// and unassigned, pending manual routing. Only invalid input fails.
    pub fn create_ticket(&self, intake: TicketIntake) -> Result<Ticket, TicketError> {
        if intake.emergency.affected_count < 1 {
            return Err(TicketError::Validation(
                "affected_count must be at least 1".into(),
            ));
        }

        let candidates = self.directory.active_candidates()?;
        let nearest_facilities: Vec<RankedFacility> =
            geo::nearest(intake.coordinate, &candidates, NEAREST_K)
                .into_iter()
                .map(|r| RankedFacility {
                    facility_id: r.id,
                    distance_km: r.distance_km,
                    bearing_deg: r.bearing_deg,
                })
                .collect();

        let recommendation = recommend(
            &intake.emergency,
            intake.subject.group_label.as_deref(),
        );

        let assigned_facility =
            self.pick_assignment(&nearest_facilities, intake.emergency.severity)?;

        let status = if assigned_facility.is_some() {
            TicketStatus::Assigned
        } else {
            tracing::info!("no facilities in range, ticket left unassigned");
            TicketStatus::Open
        };

        let now = Utc::now();
        let ticket = Ticket {
            id: Uuid::new_v4(),
            subject: intake.subject,
            coordinate: intake.coordinate,
            address: intake.address,
            emergency: intake.emergency,
            nearest_facilities,
            assigned_facility,
            status,
            recommendation: Some(recommendation),
            created_at: now,
            updated_at: now,
            resolved_at: None,
        };

        {
            let mut tickets = self.tickets.write().map_err(|_| TicketError::LockFailed)?;
            tickets.push(ticket.clone());
        }

        tracing::info!(
            ticket_id = %ticket.id,
            status = ticket.status.as_str(),
            candidates = ticket.nearest_facilities.len(),
            "ticket created"
        );

        // Fire-and-forget: notification cannot fail ticket creation.
        if let Some(facility_id) = ticket.assigned_facility {
            self.notifier.notify(facility_id, &ticket);
        }

        Ok(ticket)
    }

    /// Critical tickets go to the closest hospital-kind candidate, falling
    /// back to the closest candidate of any kind. Everything else gets the
    /// single closest candidate.
    fn pick_assignment(
        &self,
        ranked: &[RankedFacility],
        severity: Severity,
    ) -> Result<Option<Uuid>, TicketError> {
        if ranked.is_empty() {
            return Ok(None);
        }

        if severity == Severity::Critical {
            for candidate in ranked {
                if let Some(facility) = self.directory.get(candidate.facility_id)? {
                    if facility.kind == FacilityKind::Hospital {
                        return Ok(Some(candidate.facility_id));
                    }
                }
            }
            tracing::debug!("no hospital among candidates, assigning closest facility");
        }

        Ok(Some(ranked[0].facility_id))
    }

    /// Set a ticket's status. No transition validation — see module docs.
    /// Entering `Resolved` stamps `resolved_at`.
    pub fn update_status(
        &self,
        ticket_id: Uuid,
        status: TicketStatus,
    ) -> Result<Ticket, TicketError> {
        let mut tickets = self.tickets.write().map_err(|_| TicketError::LockFailed)?;
        let ticket = tickets
            .iter_mut()
            .find(|t| t.id == ticket_id)
            .ok_or(TicketError::NotFound(ticket_id))?;

        ticket.status = status;
        ticket.updated_at = Utc::now();
        if status == TicketStatus::Resolved && ticket.resolved_at.is_none() {
            ticket.resolved_at = Some(ticket.updated_at);
        }

        tracing::info!(ticket_id = %ticket_id, status = status.as_str(), "ticket status updated");
        Ok(ticket.clone())
    }

    /// Staff override: assign any existing facility, bypassing the
    /// nearest-list invariant. Always permitted.
    pub fn reassign(&self, ticket_id: Uuid, facility_id: Uuid) -> Result<Ticket, TicketError> {
        if self.directory.get(facility_id)?.is_none() {
            return Err(TicketError::Directory(DirectoryError::NotFound(facility_id)));
        }

        let updated = {
            let mut tickets = self.tickets.write().map_err(|_| TicketError::LockFailed)?;
            let ticket = tickets
                .iter_mut()
                .find(|t| t.id == ticket_id)
                .ok_or(TicketError::NotFound(ticket_id))?;

            ticket.assigned_facility = Some(facility_id);
            ticket.updated_at = Utc::now();
            ticket.clone()
        };

        tracing::info!(ticket_id = %ticket_id, facility_id = %facility_id, "ticket reassigned");
        self.notifier.notify(facility_id, &updated);
        Ok(updated)
    }

    pub fn get(&self, ticket_id: Uuid) -> Result<Option<Ticket>, TicketError> {
        let tickets = self.tickets.read().map_err(|_| TicketError::LockFailed)?;
        Ok(tickets.iter().find(|t| t.id == ticket_id).cloned())
    }

    pub fn list(&self) -> Result<Vec<Ticket>, TicketError> {
        let tickets = self.tickets.read().map_err(|_| TicketError::LockFailed)?;
        Ok(tickets.clone())
    }

    /// Tickets where the facility is assigned or appears in the nearest
    /// list — what a facility's staff screen shows.
    pub fn list_for_facility(&self, facility_id: Uuid) -> Result<Vec<Ticket>, TicketError> {
        let tickets = self.tickets.read().map_err(|_| TicketError::LockFailed)?;
        Ok(tickets
            .iter()
            .filter(|t| {
                t.assigned_facility == Some(facility_id)
                    || t.nearest_facilities
                        .iter()
                        .any(|r| r.facility_id == facility_id)
            })
            .cloned()
            .collect())
    }

    /// Number of unresolved tickets assigned to a facility. Feeds the
    /// directory's utilization query.
    pub fn active_count_for_facility(&self, facility_id: Uuid) -> Result<usize, TicketError> {
        let tickets = self.tickets.read().map_err(|_| TicketError::LockFailed)?;
        Ok(tickets
            .iter()
            .filter(|t| t.assigned_facility == Some(facility_id) && t.is_active())
            .count())
    }
}
