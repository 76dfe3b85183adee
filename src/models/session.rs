use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::RiskLevel;
use crate::triage::Classification;

/// Running risk picture for a triage conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    /// Red flags plus screening findings that contributed to `level`.
    pub factors: Vec<String>,
    /// In [0, 1]. Starts at 0.5 and grows with corroborating input.
    pub confidence: f64,
}

impl Default for RiskAssessment {
    fn default() -> Self {
        Self {
            level: RiskLevel::Low,
            factors: Vec::new(),
            confidence: 0.5,
        }
    }
}

/// A follow-up question emitted by the accumulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpQuestion {
    /// Stable id used to route answers back into the branching table.
    pub id: String,
    pub text: String,
}

/// An accumulating conversational triage context spanning multiple inputs
/// before a ticket is finalized.
///
/// Mutated only by the session accumulator; classification is re-run over
/// the full concatenated input history on every addition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageSession {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub inputs: Vec<String>,
    pub latest: Option<Classification>,
    pub risk: RiskAssessment,
    /// Replaced on every input, capped at 3.
    pub pending_questions: Vec<FollowUpQuestion>,
    /// Ids of every question ever emitted this session, so the pending list
    /// never repeats one.
    pub asked_question_ids: Vec<String>,
}

impl TriageSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            inputs: Vec::new(),
            latest: None,
            risk: RiskAssessment::default(),
            pending_questions: Vec::new(),
            asked_question_ids: Vec::new(),
        }
    }
}

impl Default for TriageSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_low_risk_half_confidence() {
        let s = TriageSession::new();
        assert_eq!(s.risk.level, RiskLevel::Low);
        assert!((s.risk.confidence - 0.5).abs() < f64::EPSILON);
        assert!(s.inputs.is_empty());
        assert!(s.pending_questions.is_empty());
    }
}
