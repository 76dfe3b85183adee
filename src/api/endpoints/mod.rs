pub mod facilities;
pub mod health;
pub mod tickets;
pub mod triage;
