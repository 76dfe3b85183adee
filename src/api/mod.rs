//! HTTP surface for intake, facility administration, staff actions, and
//! conversational triage.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod types;

pub use router::api_router;
