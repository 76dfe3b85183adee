pub mod coordinate;
pub mod enums;
pub mod facility;
pub mod session;
pub mod ticket;

pub use coordinate::Coordinate;
pub use enums::{
    EmergencyType, FacilityKind, FacilityStatus, RiskLevel, Severity, TicketStatus, UrgencyTier,
};
pub use facility::Facility;
pub use session::{RiskAssessment, TriageSession};
pub use ticket::{Emergency, RankedFacility, Recommendation, Subject, Ticket};
