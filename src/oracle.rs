//! Advisory oracle — an optional external text-generation service that
//! can enrich a triage assessment with a narrative.
//!
//! Never authoritative: the deterministic classifier always runs first,
//! and an oracle failure or timeout leaves its result untouched. Oracle
//! output is sanitized before use — numeric fields clamped, missing
//! fields defaulted — its shape is never trusted blindly.

use serde::{Deserialize, Serialize};

use crate::models::RiskLevel;

#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("cannot reach advisory service at {0}")]
    Connection(String),
    #[error("advisory request timed out after {0}s")]
    Timeout(u64),
    #[error("advisory service returned status {status}")]
    Upstream { status: u16 },
    #[error("cannot parse advisory response: {0}")]
    ResponseParsing(String),
}

/// Structured triage context handed to the oracle.
#[derive(Debug, Clone, Serialize)]
pub struct OracleContext {
    pub symptoms: Vec<String>,
    pub urgency: String,
    pub risk_factors: Vec<String>,
    pub description: String,
}

/// Raw oracle output; every field optional because the service's shape is
/// untrusted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAdvisory {
    #[serde(default)]
    pub narrative: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub suggested_level: Option<String>,
}

/// Sanitized advisory, safe to merge into a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub narrative: String,
    /// Clamped into [0, 1]; defaults to 0.5 when absent or non-finite.
    pub confidence: f64,
    /// Parsed suggested level, if the oracle offered a recognizable one.
    pub suggested_level: Option<RiskLevel>,
}

impl RawAdvisory {
    /// Clamp and default every field.
    pub fn sanitize(self) -> Advisory {
        let confidence = match self.confidence {
            Some(c) if c.is_finite() => c.clamp(0.0, 1.0),
            _ => 0.5,
        };
        let suggested_level = self.suggested_level.as_deref().and_then(|s| {
            match s.trim().to_lowercase().as_str() {
                "low" => Some(RiskLevel::Low),
                "medium" => Some(RiskLevel::Medium),
                "high" => Some(RiskLevel::High),
                "critical" | "emergency" => Some(RiskLevel::Critical),
                _ => None,
            }
        });
        Advisory {
            narrative: self.narrative.unwrap_or_default(),
            confidence,
            suggested_level,
        }
    }
}

/// Capability seam for the external advisory service. Injected into the
/// session accumulator so the deterministic core tests without a network.
pub trait AdvisoryOracle: Send + Sync {
    fn assess(&self, context: &OracleContext) -> Result<Advisory, OracleError>;
}

/// Default oracle: declines every request, keeping the deterministic path.
pub struct NoopOracle;

impl AdvisoryOracle for NoopOracle {
    fn assess(&self, _context: &OracleContext) -> Result<Advisory, OracleError> {
        Err(OracleError::Connection("advisory oracle disabled".into()))
    }
}

/// Ollama-backed oracle over the local `/api/generate` endpoint.
///
/// The request timeout is enforced by the HTTP client itself, so a slow
/// model can never hang triage.
pub struct OllamaOracle {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    system: &'a str,
    stream: bool,
    format: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

const ORACLE_SYSTEM_PROMPT: &str = "You are a humanitarian triage assistant. \
Given symptoms, urgency, and risk factors, reply with JSON: \
{\"narrative\": string, \"confidence\": number 0-1, \"suggested_level\": \
\"low\"|\"medium\"|\"high\"|\"critical\"}.";

impl OllamaOracle {
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Result<Self, OracleError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| OracleError::ResponseParsing(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
            timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl AdvisoryOracle for OllamaOracle {
    fn assess(&self, context: &OracleContext) -> Result<Advisory, OracleError> {
        let url = format!("{}/api/generate", self.base_url);
        let prompt = serde_json::to_string(context)
            .map_err(|e| OracleError::ResponseParsing(e.to_string()))?;
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            system: ORACLE_SYSTEM_PROMPT,
            stream: false,
            format: "json",
        };

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                OracleError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                OracleError::Timeout(self.timeout_secs)
            } else {
                OracleError::ResponseParsing(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(OracleError::Upstream {
                status: status.as_u16(),
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| OracleError::ResponseParsing(e.to_string()))?;

        let raw: RawAdvisory = serde_json::from_str(&parsed.response)
            .map_err(|e| OracleError::ResponseParsing(e.to_string()))?;

        Ok(raw.sanitize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_oracle_always_declines() {
        let oracle = NoopOracle;
        let ctx = OracleContext {
            symptoms: vec!["fever".into()],
            urgency: "medium".into(),
            risk_factors: Vec::new(),
            description: "fever".into(),
        };
        assert!(oracle.assess(&ctx).is_err());
    }

    #[test]
    fn sanitize_clamps_confidence() {
        let high = RawAdvisory {
            narrative: None,
            confidence: Some(7.3),
            suggested_level: None,
        };
        assert!((high.sanitize().confidence - 1.0).abs() < f64::EPSILON);

        let low = RawAdvisory {
            narrative: None,
            confidence: Some(-0.4),
            suggested_level: None,
        };
        assert!(low.sanitize().confidence.abs() < f64::EPSILON);
    }

    #[test]
    fn sanitize_defaults_missing_fields() {
        let advisory = RawAdvisory::default().sanitize();
        assert_eq!(advisory.narrative, "");
        assert!((advisory.confidence - 0.5).abs() < f64::EPSILON);
        assert!(advisory.suggested_level.is_none());
    }

    #[test]
    fn sanitize_rejects_non_finite_confidence() {
        let raw = RawAdvisory {
            narrative: None,
            confidence: Some(f64::NAN),
            suggested_level: None,
        };
        assert!((raw.sanitize().confidence - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn sanitize_parses_known_levels() {
        for (s, expected) in [
            ("low", RiskLevel::Low),
            ("Medium", RiskLevel::Medium),
            (" high ", RiskLevel::High),
            ("critical", RiskLevel::Critical),
            ("emergency", RiskLevel::Critical),
        ] {
            let raw = RawAdvisory {
                narrative: None,
                confidence: None,
                suggested_level: Some(s.into()),
            };
            assert_eq!(raw.sanitize().suggested_level, Some(expected), "for {s}");
        }
    }

    #[test]
    fn sanitize_drops_unknown_level() {
        let raw = RawAdvisory {
            narrative: None,
            confidence: None,
            suggested_level: Some("catastrophic".into()),
        };
        assert!(raw.sanitize().suggested_level.is_none());
    }

    #[test]
    fn ollama_oracle_normalizes_base_url() {
        let oracle = OllamaOracle::new("http://localhost:11434/", "llama3", 10).unwrap();
        assert_eq!(oracle.base_url(), "http://localhost:11434");
    }
}
