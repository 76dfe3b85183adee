//! In-memory facility directory behind a repository-style API.
//!
//! Reads are safe for concurrent access; writes take the write lock.
//! There are no process-wide singletons — each `FacilityDirectory` is an
//! isolated instance, so tests can construct their own.

use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;

use crate::models::facility::NewFacility;
use crate::models::{Coordinate, Facility};

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("facility not found: {0}")]
    NotFound(Uuid),
    #[error("emergency beds ({emergency_beds}) exceed total beds ({total_beds})")]
    CapacityInvariant { emergency_beds: u32, total_beds: u32 },
    #[error("internal lock error")]
    LockFailed,
}

/// Holds facility records and answers capacity/specialty queries.
pub struct FacilityDirectory {
    facilities: RwLock<Vec<Facility>>,
}

impl FacilityDirectory {
    pub fn new() -> Self {
        Self {
            facilities: RwLock::new(Vec::new()),
        }
    }

    fn validate(record: &NewFacility) -> Result<(), DirectoryError> {
        if record.emergency_beds > record.total_beds {
            return Err(DirectoryError::CapacityInvariant {
                emergency_beds: record.emergency_beds,
                total_beds: record.total_beds,
            });
        }
        Ok(())
    }

    /// Add a facility record. Rejects records whose emergency-bed count
    /// exceeds total beds.
    pub fn add(&self, record: NewFacility) -> Result<Facility, DirectoryError> {
        Self::validate(&record)?;

        let now = Utc::now();
        let facility = Facility {
            id: Uuid::new_v4(),
            name: record.name,
            kind: record.kind,
            specialties: record.specialties,
            coordinate: record.coordinate,
            total_beds: record.total_beds,
            emergency_beds: record.emergency_beds,
            staff_count: record.staff_count,
            services: record.services,
            status: record.status,
            created_at: now,
            updated_at: now,
        };

        let mut facilities = self
            .facilities
            .write()
            .map_err(|_| DirectoryError::LockFailed)?;
        facilities.push(facility.clone());

        tracing::info!(facility_id = %facility.id, name = %facility.name, "facility added");
        Ok(facility)
    }

    /// Replace a facility's record, keeping its id and creation timestamp.
    pub fn update(&self, id: Uuid, record: NewFacility) -> Result<Facility, DirectoryError> {
        Self::validate(&record)?;

        let mut facilities = self
            .facilities
            .write()
            .map_err(|_| DirectoryError::LockFailed)?;

        let existing = facilities
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(DirectoryError::NotFound(id))?;

        existing.name = record.name;
        existing.kind = record.kind;
        existing.specialties = record.specialties;
        existing.coordinate = record.coordinate;
        existing.total_beds = record.total_beds;
        existing.emergency_beds = record.emergency_beds;
        existing.staff_count = record.staff_count;
        existing.services = record.services;
        existing.status = record.status;
        existing.updated_at = Utc::now();

        Ok(existing.clone())
    }

    pub fn remove(&self, id: Uuid) -> Result<(), DirectoryError> {
        let mut facilities = self
            .facilities
            .write()
            .map_err(|_| DirectoryError::LockFailed)?;

        let before = facilities.len();
        facilities.retain(|f| f.id != id);
        if facilities.len() == before {
            return Err(DirectoryError::NotFound(id));
        }

        tracing::info!(facility_id = %id, "facility removed");
        Ok(())
    }

    /// Look a facility up by id. `None` is a normal outcome, not an error.
    pub fn get(&self, id: Uuid) -> Result<Option<Facility>, DirectoryError> {
        let facilities = self
            .facilities
            .read()
            .map_err(|_| DirectoryError::LockFailed)?;
        Ok(facilities.iter().find(|f| f.id == id).cloned())
    }

    /// All facilities, in insertion order.
    pub fn list(&self) -> Result<Vec<Facility>, DirectoryError> {
        let facilities = self
            .facilities
            .read()
            .map_err(|_| DirectoryError::LockFailed)?;
        Ok(facilities.clone())
    }

    /// `(id, coordinate)` pairs for active facilities, in insertion order.
    /// This is the candidate set for nearest-facility ranking.
    pub fn active_candidates(&self) -> Result<Vec<(Uuid, Coordinate)>, DirectoryError> {
        let facilities = self
            .facilities
            .read()
            .map_err(|_| DirectoryError::LockFailed)?;
        Ok(facilities
            .iter()
            .filter(|f| f.is_active())
            .map(|f| (f.id, f.coordinate))
            .collect())
    }

    /// Emergency-bed utilization as a percentage of active tickets over
    /// emergency beds. `None` when the facility has no emergency beds —
    /// utilization is undefined, callers must special-case it.
    pub fn utilization(
        &self,
        id: Uuid,
        active_ticket_count: usize,
    ) -> Result<Option<f64>, DirectoryError> {
        let facilities = self
            .facilities
            .read()
            .map_err(|_| DirectoryError::LockFailed)?;
        let facility = facilities
            .iter()
            .find(|f| f.id == id)
            .ok_or(DirectoryError::NotFound(id))?;

        if facility.emergency_beds == 0 {
            return Ok(None);
        }
        Ok(Some(
            active_ticket_count as f64 / facility.emergency_beds as f64 * 100.0,
        ))
    }
}

impl Default for FacilityDirectory {
    fn default() -> Self {
        Self::new()
    }
}
