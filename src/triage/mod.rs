//! Symptom classification: keyword detection, urgency rules, red-flag
//! escalation, and trauma screening.
//!
//! The classifier never fails. Empty or unrecognized input yields tier
//! `Low` with no tags — a documented default, not an error.

pub mod classify;
pub mod symptoms;

pub use classify::{assess, classify, detect_red_flags, screen_trauma, Classification, Context};
pub use symptoms::detect_symptoms;
