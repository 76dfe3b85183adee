//! Deterministic resource/priority recommendation.
//!
//! Lookup tables keyed by emergency type and population group, a severity
//! to priority/response mapping, and a mass-casualty scale adjustment.
//! Pure and idempotent: identical input always yields identical output,
//! which lets tickets be re-evaluated as new information arrives.

use crate::models::ticket::{Emergency, Recommendation};
use crate::models::{EmergencyType, Severity};

/// Affected-person count above which mass-casualty handling kicks in.
const MASS_CASUALTY_THRESHOLD: u32 = 50;

/// Base supply list keyed by emergency type.
fn base_supplies(emergency_type: EmergencyType) -> &'static [&'static str] {
    match emergency_type {
        EmergencyType::Medical => &[
            "first aid kit",
            "basic medications",
            "diagnostic equipment",
        ],
        EmergencyType::Epidemic => &[
            "protective equipment",
            "disinfectant",
            "isolation supplies",
            "oral rehydration salts",
        ],
        EmergencyType::Malnutrition => &[
            "therapeutic food",
            "micronutrient supplements",
            "clean water",
            "infant formula",
        ],
        EmergencyType::Trauma => &[
            "trauma kit",
            "bandages and dressings",
            "splints",
            "pain relief medication",
        ],
        EmergencyType::MentalHealth => &[
            "psychological first aid materials",
            "interpreter support",
            "referral directory",
        ],
        EmergencyType::General => &["first aid kit", "blankets", "clean water"],
    }
}

/// Supplies appended when the affected count exceeds the threshold.
static MASS_CASUALTY_SUPPLIES: &[&str] = &[
    "mass casualty triage tags",
    "additional stretchers",
    "field tent",
    "water distribution point",
];

/// Cultural/language considerations keyed by normalized group label.
/// Purely additive; unknown labels contribute nothing.
static GROUP_CONSIDERATIONS: &[(&str, &[&str])] = &[
    (
        "syrian",
        &[
            "Arabic-speaking staff available",
            "halal dietary requirements",
        ],
    ),
    (
        "afghan",
        &[
            "Dari or Pashto interpreter needed",
            "female staff for female patients where possible",
        ],
    ),
    (
        "ukrainian",
        &["Ukrainian or Russian-speaking staff available"],
    ),
    (
        "somali",
        &["Somali interpreter needed", "halal dietary requirements"],
    ),
    (
        "rohingya",
        &["Rohingya or Bengali interpreter needed"],
    ),
    (
        "sudanese",
        &["Arabic-speaking staff available"],
    ),
];

fn severity_baseline(severity: Severity) -> (u8, &'static str) {
    match severity {
        Severity::Critical => (5, "immediate (<15 min)"),
        Severity::High => (4, "1-2 hours"),
        Severity::Medium | Severity::Low => (3, "2-4 hours"),
    }
}

/// Deduplicate while preserving first-seen order.
fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(items.len());
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}

/// Derive a supply list, priority score, response estimate, and situational
/// considerations for an emergency.
pub fn recommend(emergency: &Emergency, group_label: Option<&str>) -> Recommendation {
    let mut supplies: Vec<String> = base_supplies(emergency.emergency_type)
        .iter()
        .map(|s| s.to_string())
        .collect();

    let (mut priority, estimated_response) = severity_baseline(emergency.severity);

    let mut considerations: Vec<String> = Vec::new();
    if let Some(label) = group_label {
        let normalized = label.trim().to_lowercase();
        if let Some((_, extra)) = GROUP_CONSIDERATIONS
            .iter()
            .find(|(key, _)| *key == normalized)
        {
            considerations.extend(extra.iter().map(|c| c.to_string()));
        }
    }

    if emergency.affected_count > MASS_CASUALTY_THRESHOLD {
        supplies.extend(MASS_CASUALTY_SUPPLIES.iter().map(|s| s.to_string()));
        considerations.push("coordinate with neighboring facilities".to_string());
        priority = (priority + 1).min(5);
    }

    Recommendation {
        supplies: dedup_preserving_order(supplies),
        priority,
        estimated_response: estimated_response.to_string(),
        considerations: dedup_preserving_order(considerations),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emergency(
        emergency_type: EmergencyType,
        severity: Severity,
        affected_count: u32,
    ) -> Emergency {
        Emergency {
            emergency_type,
            severity,
            description: "test".into(),
            symptoms: None,
            affected_count,
        }
    }

    #[test]
    fn low_severity_gets_routine_window() {
        let r = recommend(&emergency(EmergencyType::Medical, Severity::Low, 1), None);
        assert_eq!(r.priority, 3);
        assert_eq!(r.estimated_response, "2-4 hours");
        assert_eq!(r.supplies[0], "first aid kit");
    }

    #[test]
    fn high_severity_gets_priority_four() {
        let r = recommend(&emergency(EmergencyType::Trauma, Severity::High, 1), None);
        assert_eq!(r.priority, 4);
        assert_eq!(r.estimated_response, "1-2 hours");
    }

    #[test]
    fn critical_severity_gets_immediate_response() {
        let r = recommend(&emergency(EmergencyType::Medical, Severity::Critical, 1), None);
        assert_eq!(r.priority, 5);
        assert_eq!(r.estimated_response, "immediate (<15 min)");
    }

    #[test]
    fn group_considerations_are_additive() {
        let with = recommend(
            &emergency(EmergencyType::Medical, Severity::Medium, 1),
            Some("syrian"),
        );
        let without = recommend(&emergency(EmergencyType::Medical, Severity::Medium, 1), None);
        assert!(with
            .considerations
            .contains(&"Arabic-speaking staff available".to_string()));
        assert_eq!(with.supplies, without.supplies);
        assert_eq!(with.priority, without.priority);
    }

    #[test]
    fn group_label_is_normalized() {
        let r = recommend(
            &emergency(EmergencyType::General, Severity::Low, 1),
            Some("  Syrian "),
        );
        assert!(!r.considerations.is_empty());
    }

    #[test]
    fn unknown_group_contributes_nothing() {
        let r = recommend(
            &emergency(EmergencyType::General, Severity::Low, 1),
            Some("unlisted"),
        );
        assert!(r.considerations.is_empty());
    }

    /// Mass-casualty scenario: 75 affected at high severity raises
    /// priority from 4 to 5 and appends mass-casualty supplies once.
    #[test]
    fn mass_casualty_raises_priority_and_appends_once() {
        let r = recommend(&emergency(EmergencyType::Trauma, Severity::High, 75), None);
        assert_eq!(r.priority, 5);
        let tag_count = r
            .supplies
            .iter()
            .filter(|s| *s == "mass casualty triage tags")
            .count();
        assert_eq!(tag_count, 1);
        assert!(r.supplies.contains(&"additional stretchers".to_string()));
    }

    #[test]
    fn mass_casualty_priority_caps_at_five() {
        let r = recommend(&emergency(EmergencyType::Medical, Severity::Critical, 200), None);
        assert_eq!(r.priority, 5);
    }

    #[test]
    fn threshold_is_exclusive() {
        let r = recommend(&emergency(EmergencyType::Medical, Severity::High, 50), None);
        assert_eq!(r.priority, 4);
        assert!(!r.supplies.contains(&"field tent".to_string()));
    }

    #[test]
    fn recommendation_is_idempotent() {
        let e = emergency(EmergencyType::Epidemic, Severity::High, 120);
        let a = recommend(&e, Some("somali"));
        let b = recommend(&e, Some("somali"));
        assert_eq!(a, b);
    }

    #[test]
    fn no_duplicate_entries_in_output() {
        let e = emergency(EmergencyType::Epidemic, Severity::Critical, 300);
        let r = recommend(&e, Some("somali"));
        for (i, s) in r.supplies.iter().enumerate() {
            assert!(!r.supplies[i + 1..].contains(s), "duplicate supply: {s}");
        }
        for (i, c) in r.considerations.iter().enumerate() {
            assert!(!r.considerations[i + 1..].contains(c), "duplicate consideration: {c}");
        }
    }
}
