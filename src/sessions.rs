//! Conversational triage sessions: cumulative symptom accumulation,
//! risk revision, and follow-up question generation.
//!
//! Classification is cumulative — every input re-runs the classifier over
//! the concatenation of all inputs so far, so input order matters and the
//! result always equals a single-shot classification of the full history.

use std::sync::{Arc, RwLock};

use serde::Serialize;
use uuid::Uuid;

use crate::models::session::FollowUpQuestion;
use crate::models::{RiskAssessment, RiskLevel, TriageSession, UrgencyTier};
use crate::oracle::{Advisory, AdvisoryOracle, OracleContext};
use crate::triage::{assess, Classification, Context};

/// Maximum pending follow-up questions per revision.
const MAX_PENDING_QUESTIONS: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session not found: {0}")]
    NotFound(Uuid),
    #[error("internal lock error")]
    LockFailed,
}

/// Result of feeding one input (or answer) into a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionUpdate {
    pub session: TriageSession,
    pub classification: Classification,
    pub follow_up_questions: Vec<FollowUpQuestion>,
    /// Present only when the advisory oracle answered in time.
    pub advisory: Option<Advisory>,
}

/// Read-only projection of session + classifier state.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub session_id: Uuid,
    pub symptoms: Vec<String>,
    pub urgency: UrgencyTier,
    pub risk: RiskAssessment,
    pub advice: String,
    pub recommended_actions: Vec<String>,
}

// ── Follow-up decision tables ───────────────────────────────

enum Trigger {
    TierAtLeast(UrgencyTier),
    TagPresent(&'static str),
}

struct QuestionRule {
    id: &'static str,
    text: &'static str,
    trigger: Trigger,
}

/// Ordered question table; the first three unasked matches become the
/// pending list.
static FOLLOW_UP_RULES: &[QuestionRule] = &[
    QuestionRule {
        id: "transport",
        text: "Do you have access to transport to reach a facility?",
        trigger: Trigger::TierAtLeast(UrgencyTier::High),
    },
    QuestionRule {
        id: "breathing_onset",
        text: "When did the breathing difficulty start?",
        trigger: Trigger::TagPresent("breathing"),
    },
    QuestionRule {
        id: "bleeding_source",
        text: "Where is the bleeding coming from?",
        trigger: Trigger::TagPresent("bleeding"),
    },
    QuestionRule {
        id: "pain_scale",
        text: "On a scale of 1 to 10, how strong is the pain?",
        trigger: Trigger::TagPresent("pain"),
    },
    QuestionRule {
        id: "pain_duration",
        text: "How long have you had the pain?",
        trigger: Trigger::TagPresent("pain"),
    },
    QuestionRule {
        id: "fever_duration",
        text: "How long have you had the fever?",
        trigger: Trigger::TagPresent("fever"),
    },
    QuestionRule {
        id: "others_affected",
        text: "Is anyone else around you showing the same symptoms?",
        trigger: Trigger::TagPresent("diarrhea"),
    },
];

/// Branching follow-ups keyed by (question id, answer).
fn branch_questions(question_id: &str, answer: &str) -> Vec<FollowUpQuestion> {
    let normalized = answer.trim().to_lowercase();
    match question_id {
        "pain_scale" => {
            let scale: Option<u8> = normalized
                .split(|c: char| !c.is_ascii_digit())
                .find(|s| !s.is_empty())
                .and_then(|s| s.parse().ok());
            if scale.is_some_and(|n| n >= 7) {
                return vec![FollowUpQuestion {
                    id: "pain_location".into(),
                    text: "Where exactly is the pain located?".into(),
                }];
            }
            Vec::new()
        }
        "transport" if normalized.starts_with("no") => vec![FollowUpQuestion {
            id: "transport_help".into(),
            text: "Is there someone nearby who can help arrange transport?".into(),
        }],
        _ => Vec::new(),
    }
}

fn advice_for(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "Monitor the symptoms and visit a clinic if they worsen.",
        RiskLevel::Medium => "Visit the nearest clinic within the next few hours.",
        RiskLevel::High => "Go to the nearest care facility as soon as you can.",
        RiskLevel::Critical => {
            "Get to the nearest hospital now, or ask someone to arrange transport immediately."
        }
    }
}

fn actions_for(level: RiskLevel, trauma: bool) -> Vec<String> {
    let mut actions: Vec<String> = match level {
        RiskLevel::Low => vec!["rest and hydrate".into()],
        RiskLevel::Medium => vec![
            "visit the nearest clinic".into(),
            "bring any medication you are taking".into(),
        ],
        RiskLevel::High => vec![
            "travel to the nearest facility".into(),
            "bring someone with you if possible".into(),
        ],
        RiskLevel::Critical => vec![
            "go to the nearest hospital immediately".into(),
            "alert camp medical staff".into(),
        ],
    };
    if trauma {
        actions.push("ask for trauma-informed support at the facility".into());
    }
    actions
}

// ── Accumulator ─────────────────────────────────────────────

/// Owns session storage; per-session writes serialize on the store's
/// write lock, reads are concurrent.
pub struct SessionAccumulator {
    sessions: RwLock<Vec<TriageSession>>,
    oracle: Arc<dyn AdvisoryOracle>,
}

impl SessionAccumulator {
    pub fn new(oracle: Arc<dyn AdvisoryOracle>) -> Self {
        Self {
            sessions: RwLock::new(Vec::new()),
            oracle,
        }
    }

    /// Open a fresh session: no inputs, risk Low, confidence 0.5.
    pub fn start_session(&self) -> Result<TriageSession, SessionError> {
        let session = TriageSession::new();
        let mut sessions = self.sessions.write().map_err(|_| SessionError::LockFailed)?;
        sessions.push(session.clone());
        tracing::info!(session_id = %session.id, "triage session started");
        Ok(session)
    }

    pub fn get(&self, id: Uuid) -> Result<Option<TriageSession>, SessionError> {
        let sessions = self.sessions.read().map_err(|_| SessionError::LockFailed)?;
        Ok(sessions.iter().find(|s| s.id == id).cloned())
    }

    /// Destroy a session once the user moves on.
    pub fn end_session(&self, id: Uuid) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().map_err(|_| SessionError::LockFailed)?;
        let before = sessions.len();
        sessions.retain(|s| s.id != id);
        if sessions.len() == before {
            return Err(SessionError::NotFound(id));
        }
        tracing::info!(session_id = %id, "triage session ended");
        Ok(())
    }

    /// Append raw input and re-derive the whole assessment from the
    /// accumulated history.
    pub fn add_input(&self, id: Uuid, raw_text: &str) -> Result<SessionUpdate, SessionError> {
        self.revise(id, raw_text.to_string(), Vec::new())
    }

    /// Feed back an answer to a pending follow-up. The answer becomes a
    /// synthetic input and triggers the same re-classification path;
    /// branch questions for this (question, answer) pair get priority in
    /// the next pending list.
    pub fn answer_follow_up(
        &self,
        id: Uuid,
        question_id: &str,
        answer: &str,
    ) -> Result<SessionUpdate, SessionError> {
        let branches = branch_questions(question_id, answer);
        let synthetic = format!("{question_id}: {answer}");
        self.revise(id, synthetic, branches)
    }

    fn revise(
        &self,
        id: Uuid,
        input: String,
        priority_questions: Vec<FollowUpQuestion>,
    ) -> Result<SessionUpdate, SessionError> {
        let mut sessions = self.sessions.write().map_err(|_| SessionError::LockFailed)?;
        let session = sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(SessionError::NotFound(id))?;

        session.inputs.push(input);
        let history = session.inputs.join("\n");
        let classification = assess(&history, Context::default());

        let mut factors: Vec<String> = classification.red_flags.clone();
        if classification.trauma_history_suspected {
            factors.push("trauma history detected".into());
        }

        session.risk = RiskAssessment {
            level: classification.tier.into(),
            factors,
            confidence: confidence_for(session.inputs.len(), classification.tags.len()),
        };

        // Rebuild the pending list: branch questions first, then table
        // matches; never repeat a question already asked this session.
        let mut pending: Vec<FollowUpQuestion> = Vec::new();
        for q in priority_questions {
            if !session.asked_question_ids.contains(&q.id) {
                pending.push(q);
            }
        }
        for rule in FOLLOW_UP_RULES {
            if pending.len() >= MAX_PENDING_QUESTIONS {
                break;
            }
            let fires = match &rule.trigger {
                Trigger::TierAtLeast(min) => classification.tier >= *min,
                Trigger::TagPresent(tag) => classification.tags.iter().any(|t| t == tag),
            };
            let already_asked = session.asked_question_ids.iter().any(|id| id == rule.id)
                || pending.iter().any(|q| q.id == rule.id);
            if fires && !already_asked {
                pending.push(FollowUpQuestion {
                    id: rule.id.into(),
                    text: rule.text.into(),
                });
            }
        }
        pending.truncate(MAX_PENDING_QUESTIONS);

        for q in &pending {
            session.asked_question_ids.push(q.id.clone());
        }
        session.pending_questions = pending.clone();
        session.latest = Some(classification.clone());

        let snapshot = session.clone();
        drop(sessions);

        // Advisory enrichment is best-effort: failure or timeout keeps
        // the deterministic result and is only logged.
        let advisory = self.consult_oracle(&snapshot, &classification);

        Ok(SessionUpdate {
            session: snapshot,
            classification,
            follow_up_questions: pending,
            advisory,
        })
    }

    fn consult_oracle(
        &self,
        session: &TriageSession,
        classification: &Classification,
    ) -> Option<Advisory> {
        let context = OracleContext {
            symptoms: classification.tags.clone(),
            urgency: classification.tier.as_str().to_string(),
            risk_factors: session.risk.factors.clone(),
            description: session.inputs.join("\n"),
        };
        match self.oracle.assess(&context) {
            Ok(advisory) => Some(advisory),
            Err(e) => {
                tracing::debug!(session_id = %session.id, error = %e, "advisory oracle unavailable, keeping deterministic assessment");
                None
            }
        }
    }

    /// Read-only projection of current session state.
    pub fn summary_report(&self, id: Uuid) -> Result<SummaryReport, SessionError> {
        let sessions = self.sessions.read().map_err(|_| SessionError::LockFailed)?;
        let session = sessions
            .iter()
            .find(|s| s.id == id)
            .ok_or(SessionError::NotFound(id))?;

        let (symptoms, urgency, trauma) = match &session.latest {
            Some(c) => (c.tags.clone(), c.tier, c.trauma_history_suspected),
            None => (Vec::new(), UrgencyTier::Low, false),
        };

        Ok(SummaryReport {
            session_id: session.id,
            symptoms,
            urgency,
            risk: session.risk.clone(),
            advice: advice_for(session.risk.level).to_string(),
            recommended_actions: actions_for(session.risk.level, trauma),
        })
    }
}

/// Confidence grows with corroborating input but never reaches certainty.
fn confidence_for(input_count: usize, tag_count: usize) -> f64 {
    let base = 0.5 + 0.1 * (input_count.saturating_sub(1)) as f64 + 0.05 * tag_count as f64;
    base.min(0.95)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::NoopOracle;

    fn accumulator() -> SessionAccumulator {
        SessionAccumulator::new(Arc::new(NoopOracle))
    }

    #[test]
    fn start_session_defaults() {
        let acc = accumulator();
        let session = acc.start_session().unwrap();
        assert_eq!(session.risk.level, RiskLevel::Low);
        assert!((session.risk.confidence - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn add_input_classifies_and_maps_risk() {
        let acc = accumulator();
        let session = acc.start_session().unwrap();
        let update = acc
            .add_input(session.id, "severe chest pain and difficulty breathing")
            .unwrap();
        assert_eq!(update.classification.tier, UrgencyTier::Emergency);
        assert_eq!(update.session.risk.level, RiskLevel::Critical);
        assert!(update.advisory.is_none());
    }

    #[test]
    fn classification_accumulates_across_inputs() {
        let acc = accumulator();
        let session = acc.start_session().unwrap();

        let first = acc.add_input(session.id, "I have chest pain").unwrap();
        assert_eq!(first.classification.tier, UrgencyTier::High);

        // Second input alone would be High (breathing), but combined with
        // history the chest_pain+breathing rule fires.
        let second = acc.add_input(session.id, "now I can't breathe well").unwrap();
        assert_eq!(second.classification.tier, UrgencyTier::Emergency);
        assert_eq!(second.session.inputs.len(), 2);
    }

    #[test]
    fn risk_factors_include_red_flags_and_trauma() {
        let acc = accumulator();
        let session = acc.start_session().unwrap();
        let update = acc
            .add_input(session.id, "severe pain since we fled the war")
            .unwrap();
        assert!(update.session.risk.factors.contains(&"severe".to_string()));
        assert!(update
            .session
            .risk
            .factors
            .contains(&"trauma history detected".to_string()));
    }

    #[test]
    fn follow_ups_capped_at_three() {
        let acc = accumulator();
        let session = acc.start_session().unwrap();
        // High tier + pain + fever + breathing triggers more than three rules.
        let update = acc
            .add_input(session.id, "severe pain, fever, and trouble breathing")
            .unwrap();
        assert_eq!(update.follow_up_questions.len(), 3);
    }

    #[test]
    fn questions_are_not_repeated_within_session() {
        let acc = accumulator();
        let session = acc.start_session().unwrap();

        let first = acc.add_input(session.id, "I am in pain").unwrap();
        let first_ids: Vec<String> =
            first.follow_up_questions.iter().map(|q| q.id.clone()).collect();
        assert!(first_ids.contains(&"pain_scale".to_string()));

        let second = acc.add_input(session.id, "still in pain").unwrap();
        for q in &second.follow_up_questions {
            assert!(!first_ids.contains(&q.id), "repeated question {}", q.id);
        }
    }

    #[test]
    fn pain_scale_answer_of_seven_branches_to_localization() {
        let acc = accumulator();
        let session = acc.start_session().unwrap();
        acc.add_input(session.id, "I am in pain").unwrap();

        let update = acc.answer_follow_up(session.id, "pain_scale", "8").unwrap();
        assert_eq!(update.follow_up_questions[0].id, "pain_location");
    }

    #[test]
    fn low_pain_scale_answer_does_not_branch() {
        let acc = accumulator();
        let session = acc.start_session().unwrap();
        acc.add_input(session.id, "I am in pain").unwrap();

        let update = acc.answer_follow_up(session.id, "pain_scale", "3").unwrap();
        assert!(update
            .follow_up_questions
            .iter()
            .all(|q| q.id != "pain_location"));
    }

    #[test]
    fn no_transport_answer_branches_to_help_question() {
        let acc = accumulator();
        let session = acc.start_session().unwrap();
        acc.add_input(session.id, "severe bleeding from my leg").unwrap();

        let update = acc
            .answer_follow_up(session.id, "transport", "no, there is none")
            .unwrap();
        assert!(update
            .follow_up_questions
            .iter()
            .any(|q| q.id == "transport_help"));
    }

    #[test]
    fn answers_feed_back_into_classification() {
        let acc = accumulator();
        let session = acc.start_session().unwrap();
        acc.add_input(session.id, "my arm hurts").unwrap();

        // Answer text itself mentions breathing trouble — the cumulative
        // re-scan must pick it up.
        let update = acc
            .answer_follow_up(session.id, "pain_duration", "since I had trouble breathing yesterday")
            .unwrap();
        assert!(update
            .classification
            .tags
            .contains(&"breathing".to_string()));
    }

    #[test]
    fn confidence_grows_with_input() {
        let acc = accumulator();
        let session = acc.start_session().unwrap();
        let first = acc.add_input(session.id, "headache").unwrap();
        let second = acc.add_input(session.id, "also some fever").unwrap();
        assert!(second.session.risk.confidence > first.session.risk.confidence);
        assert!(second.session.risk.confidence <= 0.95);
    }

    #[test]
    fn summary_report_projects_session_state() {
        let acc = accumulator();
        let session = acc.start_session().unwrap();
        acc.add_input(session.id, "fever and headache, we escaped the conflict")
            .unwrap();

        let report = acc.summary_report(session.id).unwrap();
        assert_eq!(report.urgency, UrgencyTier::Medium);
        assert!(report.symptoms.contains(&"fever".to_string()));
        assert!(!report.advice.is_empty());
        assert!(report
            .recommended_actions
            .contains(&"ask for trauma-informed support at the facility".to_string()));
    }

    #[test]
    fn unknown_session_is_not_found() {
        let acc = accumulator();
        assert!(matches!(
            acc.add_input(Uuid::new_v4(), "hello").unwrap_err(),
            SessionError::NotFound(_)
        ));
        assert!(matches!(
            acc.summary_report(Uuid::new_v4()).unwrap_err(),
            SessionError::NotFound(_)
        ));
    }

    #[test]
    fn end_session_destroys_state() {
        let acc = accumulator();
        let session = acc.start_session().unwrap();
        acc.end_session(session.id).unwrap();
        assert!(acc.get(session.id).unwrap().is_none());
        assert!(matches!(
            acc.end_session(session.id).unwrap_err(),
            SessionError::NotFound(_)
        ));
    }
}
