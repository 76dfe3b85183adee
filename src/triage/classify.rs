//! Urgency classification: ordered conjunctive rules, red-flag escalation,
//! and trauma screening.
//!
//! Rules are data, not branches — first rule whose required tags are a
//! subset of the detected tags wins, checked most-severe first. A red flag
//! in the raw text floors the result at `High` regardless of rule outcome.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::UrgencyTier;

use super::symptoms::{baseline_for, detect_symptoms};

/// Advisory context for classification. Neither field is an urgency source
/// by itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct Context {
    pub is_refugee: bool,
    pub trauma_history_suspected: bool,
}

/// Full classifier output for one piece of (possibly accumulated) text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub tags: Vec<String>,
    pub tier: UrgencyTier,
    pub red_flags: Vec<String>,
    pub trauma_history_suspected: bool,
}

/// An urgency rule: fires when every required tag was detected.
struct UrgencyRule {
    required: &'static [&'static str],
    tier: UrgencyTier,
}

/// Ordered rule table, most-specific/most-severe first.
static URGENCY_RULES: &[UrgencyRule] = &[
    UrgencyRule {
        required: &["chest_pain", "breathing"],
        tier: UrgencyTier::Emergency,
    },
    UrgencyRule {
        required: &["unconscious"],
        tier: UrgencyTier::Emergency,
    },
    UrgencyRule {
        required: &["bleeding", "dizziness"],
        tier: UrgencyTier::Emergency,
    },
    UrgencyRule {
        required: &["chest_pain"],
        tier: UrgencyTier::High,
    },
    UrgencyRule {
        required: &["breathing"],
        tier: UrgencyTier::High,
    },
    UrgencyRule {
        required: &["fever", "rash"],
        tier: UrgencyTier::High,
    },
    UrgencyRule {
        required: &["vomiting", "diarrhea"],
        tier: UrgencyTier::High,
    },
    UrgencyRule {
        required: &["fever", "headache"],
        tier: UrgencyTier::Medium,
    },
    UrgencyRule {
        required: &["injury", "pain"],
        tier: UrgencyTier::Medium,
    },
    UrgencyRule {
        required: &["fever", "fatigue"],
        tier: UrgencyTier::Medium,
    },
];

/// A red-flag keyword pattern. Presence anywhere in the text forces the
/// resulting tier to at least `High`.
struct RedFlag {
    label: &'static str,
    regex: Regex,
}

fn red_flag(label: &'static str, regex_str: &str) -> RedFlag {
    RedFlag {
        label,
        regex: Regex::new(regex_str).expect("Invalid red-flag regex pattern"),
    }
}

static RED_FLAGS: LazyLock<Vec<RedFlag>> = LazyLock::new(|| {
    vec![
        red_flag("difficulty breathing", r"\b(?:difficulty|trouble|hard)\s+breathing\b|\bcan'?t\s+breathe?\b"),
        red_flag("chest pain", r"\bchest\s+pain\b"),
        red_flag("severe", r"\bsevere(?:ly)?\b"),
        red_flag("unconscious", r"\b(?:unconscious|unresponsive)\b"),
        red_flag("heavy bleeding", r"\b(?:heavy|uncontrolled)\s+bleeding\b|\bbleeding\s+(?:a\s+lot|heavily)\b"),
        red_flag("seizure", r"\bseizures?\b|\bconvulsions?\b"),
        red_flag("stroke signs", r"\b(?:face\s+droop\w*|slurred\s+speech)\b"),
        red_flag("not breathing", r"\bnot\s+breathing\b|\bstopped\s+breathing\b"),
    ]
});

/// War/violence/flight-related terms. Sets `trauma_history_suspected`;
/// advisory input only, never an urgency source.
static TRAUMA_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:war|bomb\w*|shell\w*|airstrike\w*|violence|attack\w*|shot|shooting|torture\w*|fled|fleeing|escape\w*|detention|detained|conflict)\b",
    )
    .expect("Invalid trauma screening pattern")
});

/// Red-flag labels present in the text, in table order.
pub fn detect_red_flags(text: &str) -> Vec<&'static str> {
    let lowered = text.to_lowercase();
    RED_FLAGS
        .iter()
        .filter(|f| f.regex.is_match(&lowered))
        .map(|f| f.label)
        .collect()
}

/// Whether the text contains war/violence/flight-related terms.
pub fn screen_trauma(text: &str) -> bool {
    TRAUMA_PATTERN.is_match(&text.to_lowercase())
}

/// Classify detected tags against the ordered rule table.
///
/// First rule whose required tags are all present wins. If no rule fires,
/// the result is the maximum baseline urgency among the detected tags,
/// defaulting to `Low` when no tags were detected. Pure and total.
pub fn classify(tags: &[String], _context: Context) -> UrgencyTier {
    for rule in URGENCY_RULES {
        if rule.required.iter().all(|req| tags.iter().any(|t| t == req)) {
            return rule.tier;
        }
    }

    tags.iter()
        .map(|t| baseline_for(t))
        .max()
        .unwrap_or(UrgencyTier::Low)
}

/// Run the full classification path over raw text: tag detection, trauma
/// screening, rule evaluation, red-flag escalation.
///
/// Never fails; empty input yields `Low` with an empty tag set.
pub fn assess(text: &str, context: Context) -> Classification {
    let tags: Vec<String> = detect_symptoms(text).iter().map(|t| t.to_string()).collect();
    let trauma = context.trauma_history_suspected || screen_trauma(text);
    let red_flags = detect_red_flags(text);

    let ctx = Context {
        is_refugee: context.is_refugee,
        trauma_history_suspected: trauma,
    };
    let mut tier = classify(&tags, ctx);

    // Red-flag escalation: never below High once any flag is present.
    if !red_flags.is_empty() && tier < UrgencyTier::High {
        tier = UrgencyTier::High;
    }

    Classification {
        tags,
        tier,
        red_flags: red_flags.iter().map(|f| f.to_string()).collect(),
        trauma_history_suspected: trauma,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assess_text(text: &str) -> Classification {
        assess(text, Context::default())
    }

    #[test]
    fn mild_headache_is_low() {
        let c = assess_text("I have a mild headache");
        assert_eq!(c.tags, vec!["headache"]);
        assert_eq!(c.tier, UrgencyTier::Low);
        assert!(c.red_flags.is_empty());
    }

    #[test]
    fn chest_pain_with_breathing_is_emergency() {
        let c = assess_text("severe chest pain and difficulty breathing");
        assert_eq!(c.tier, UrgencyTier::Emergency);
        assert!(c.red_flags.contains(&"chest pain".to_string()));
        assert!(c.red_flags.contains(&"difficulty breathing".to_string()));
        assert!(c.red_flags.contains(&"severe".to_string()));
    }

    #[test]
    fn first_matching_rule_wins() {
        // chest_pain + breathing hits the Emergency rule before the
        // single-tag High rules further down the table.
        let tags: Vec<String> = vec!["chest_pain".into(), "breathing".into()];
        assert_eq!(classify(&tags, Context::default()), UrgencyTier::Emergency);

        let tags: Vec<String> = vec!["chest_pain".into()];
        assert_eq!(classify(&tags, Context::default()), UrgencyTier::High);
    }

    #[test]
    fn fallback_uses_max_tag_baseline() {
        // No rule covers {headache, dizziness}; dizziness baseline (Medium)
        // outranks headache (Low).
        let tags: Vec<String> = vec!["headache".into(), "dizziness".into()];
        assert_eq!(classify(&tags, Context::default()), UrgencyTier::Medium);
    }

    #[test]
    fn no_tags_defaults_to_low() {
        assert_eq!(classify(&[], Context::default()), UrgencyTier::Low);
        let c = assess_text("");
        assert_eq!(c.tier, UrgencyTier::Low);
        assert!(c.tags.is_empty());
    }

    #[test]
    fn classification_is_deterministic() {
        let text = "fever and headache for two days";
        let a = assess_text(text);
        let b = assess_text(text);
        assert_eq!(a.tier, b.tier);
        assert_eq!(a.tags, b.tags);
        assert_eq!(a.red_flags, b.red_flags);
    }

    #[test]
    fn red_flag_floors_low_input_at_high() {
        // Headache alone is Low; "severe" forces at least High.
        let c = assess_text("severe headache");
        assert_eq!(c.tier, UrgencyTier::High);
    }

    #[test]
    fn red_flag_never_lowers_tier() {
        let base = assess_text("chest pain and trouble breathing").tier;
        let flagged = assess_text("severe chest pain and trouble breathing").tier;
        assert!(flagged >= base);

        let base = assess_text("a light cough").tier;
        let flagged = assess_text("a light cough, severe chills").tier;
        assert!(flagged >= base);
    }

    #[test]
    fn trauma_terms_set_flag_without_raising_urgency() {
        let c = assess_text("we fled the war, my head aches");
        assert!(c.trauma_history_suspected);
        assert_eq!(c.tier, UrgencyTier::Low);
    }

    #[test]
    fn trauma_flag_from_context_is_preserved() {
        let c = assess(
            "mild headache",
            Context {
                is_refugee: true,
                trauma_history_suspected: true,
            },
        );
        assert!(c.trauma_history_suspected);
        assert_eq!(c.tier, UrgencyTier::Low);
    }

    #[test]
    fn screen_trauma_matches_violence_terms() {
        assert!(screen_trauma("there was an attack on our village"));
        assert!(screen_trauma("Escaped across the border last week"));
        assert!(!screen_trauma("a quiet week in the camp"));
    }

    #[test]
    fn fever_with_rash_is_high() {
        let c = assess_text("fever and a spreading rash");
        assert_eq!(c.tier, UrgencyTier::High);
    }

    #[test]
    fn unknown_language_input_degrades_to_low() {
        let c = assess_text("xyzzy plugh qwerty");
        assert_eq!(c.tier, UrgencyTier::Low);
        assert!(c.tags.is_empty());
    }
}
