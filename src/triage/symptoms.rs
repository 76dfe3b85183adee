//! Canonical symptom tag detection over free text.
//!
//! A fixed table of word-boundary patterns maps raw input to canonical
//! tags. Multiple tags may match; none are mutually exclusive. Each tag
//! carries a baseline urgency used as the classifier fallback when no
//! conjunctive rule matches.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::UrgencyTier;

/// A compiled symptom pattern with its canonical tag and baseline urgency.
pub(crate) struct SymptomPattern {
    pub tag: &'static str,
    pub regex: Regex,
    pub baseline: UrgencyTier,
}

fn pattern(tag: &'static str, regex_str: &str, baseline: UrgencyTier) -> SymptomPattern {
    SymptomPattern {
        tag,
        regex: Regex::new(regex_str).expect("Invalid symptom regex pattern"),
        baseline,
    }
}

/// The full detection table, in canonical output order.
pub(crate) static SYMPTOM_PATTERNS: LazyLock<Vec<SymptomPattern>> = LazyLock::new(|| {
    vec![
        pattern(
            "chest_pain",
            r"\bchest\s+(?:pain|pressure|tightness)\b",
            UrgencyTier::High,
        ),
        pattern(
            "breathing",
            r"\b(?:breath(?:ing|e|less)?|short\s+of\s+breath|gasping|choking|wheez\w*)\b",
            UrgencyTier::High,
        ),
        pattern(
            "bleeding",
            r"\bbleed\w*|\bblood\b|\bhemorrhag\w*",
            UrgencyTier::High,
        ),
        pattern(
            "unconscious",
            r"\b(?:unconscious|unresponsive|fainted|passed\s+out|won'?t\s+wake)\b",
            UrgencyTier::Emergency,
        ),
        pattern(
            "fever",
            r"\b(?:fever|feverish|temperature|burning\s+up|chills)\b",
            UrgencyTier::Medium,
        ),
        pattern(
            "pain",
            r"\b(?:pain(?:ful)?|ache|aching|hurts?|hurting|sore)\b",
            UrgencyTier::Low,
        ),
        pattern("headache", r"\bhead\s*aches?\b|\bmigraine\b", UrgencyTier::Low),
        pattern(
            "dizziness",
            r"\b(?:dizzy|dizziness|lighthead\w*|vertigo)\b",
            UrgencyTier::Medium,
        ),
        pattern(
            "vomiting",
            r"\b(?:vomit\w*|nausea(?:ted)?|throwing\s+up|threw\s+up)\b",
            UrgencyTier::Medium,
        ),
        pattern(
            "diarrhea",
            r"\bdiarr?h?oea\b|\bdiarrhea\b|\bloose\s+stools?\b",
            UrgencyTier::Medium,
        ),
        pattern("rash", r"\b(?:rash(?:es)?|spots|hives)\b", UrgencyTier::Low),
        pattern(
            "injury",
            r"\b(?:injur\w*|wound\w*|fracture\w*|broken\s+(?:arm|leg|bone|rib)|burn(?:s|ed)?)\b",
            UrgencyTier::Medium,
        ),
        pattern(
            "fatigue",
            r"\b(?:fatigue(?:d)?|exhausted|exhaustion|weak(?:ness)?|tired)\b",
            UrgencyTier::Low,
        ),
        pattern(
            "dehydration",
            r"\bdehydrat\w*|\bno\s+water\b|\bvery\s+thirsty\b",
            UrgencyTier::Medium,
        ),
        pattern(
            "anxiety",
            r"\b(?:anxiety|anxious|panic|nightmares?|flashbacks?|can'?t\s+sleep)\b",
            UrgencyTier::Low,
        ),
        pattern(
            "swelling",
            r"\bswell\w*|\bswollen\b",
            UrgencyTier::Low,
        ),
    ]
});

/// Detect canonical symptom tags in free text.
///
/// Lower-cases the input and tests every table pattern; a tag is included
/// iff its pattern matches anywhere. Output preserves table order and
/// contains no duplicates.
pub fn detect_symptoms(text: &str) -> Vec<&'static str> {
    let lowered = text.to_lowercase();
    SYMPTOM_PATTERNS
        .iter()
        .filter(|p| p.regex.is_match(&lowered))
        .map(|p| p.tag)
        .collect()
}

/// Baseline urgency carried by a detected tag, for the rule fallback.
pub(crate) fn baseline_for(tag: &str) -> UrgencyTier {
    SYMPTOM_PATTERNS
        .iter()
        .find(|p| p.tag == tag)
        .map(|p| p.baseline)
        .unwrap_or(UrgencyTier::Low)
}
