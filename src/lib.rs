//! Emergency intake, triage, and facility-matching engine for
//! displaced-population health support.
//!
//! Deterministic by default: classification, routing, and
//! recommendations never depend on the advisory oracle being up.

pub mod api;
pub mod config;
pub mod models;
pub mod geo;
pub mod triage;
pub mod recommend;
pub mod directory;
pub mod tickets;
pub mod sessions;
pub mod oracle;
pub mod engine;

pub use engine::Engine;
