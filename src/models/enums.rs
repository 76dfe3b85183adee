use serde::{Deserialize, Serialize};

/// Error for parsing a string into a domain enum.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid {field} value: '{value}'")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(FacilityKind {
    Hospital => "hospital",
    Clinic => "clinic",
    EmergencyCenter => "emergency_center",
    MobileUnit => "mobile_unit",
});

str_enum!(FacilityStatus {
    Active => "active",
    Inactive => "inactive",
    Maintenance => "maintenance",
});

str_enum!(EmergencyType {
    Medical => "medical",
    Epidemic => "epidemic",
    Malnutrition => "malnutrition",
    Trauma => "trauma",
    MentalHealth => "mental_health",
    General => "general",
});

str_enum!(TicketStatus {
    Open => "open",
    Assigned => "assigned",
    InProgress => "in_progress",
    Resolved => "resolved",
    Closed => "closed",
});

/// Reported severity of an emergency. Ordinal: Low < Medium < High < Critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// Classifier output tier. Ordinal: Low < Medium < High < Emergency.
///
/// `Emergency` is the classifier-side name for the top tier; it maps to
/// `RiskLevel::Critical` on the session side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyTier {
    Low,
    Medium,
    High,
    Emergency,
}

impl UrgencyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Emergency => "emergency",
        }
    }
}

/// Session-side risk level. Ordinal: Low < Medium < High < Critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl From<UrgencyTier> for RiskLevel {
    fn from(tier: UrgencyTier) -> Self {
        match tier {
            UrgencyTier::Low => RiskLevel::Low,
            UrgencyTier::Medium => RiskLevel::Medium,
            UrgencyTier::High => RiskLevel::High,
            UrgencyTier::Emergency => RiskLevel::Critical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn facility_kind_round_trip() {
        for (variant, s) in [
            (FacilityKind::Hospital, "hospital"),
            (FacilityKind::Clinic, "clinic"),
            (FacilityKind::EmergencyCenter, "emergency_center"),
            (FacilityKind::MobileUnit, "mobile_unit"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(FacilityKind::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn ticket_status_round_trip() {
        for (variant, s) in [
            (TicketStatus::Open, "open"),
            (TicketStatus::Assigned, "assigned"),
            (TicketStatus::InProgress, "in_progress"),
            (TicketStatus::Resolved, "resolved"),
            (TicketStatus::Closed, "closed"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(TicketStatus::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn emergency_type_round_trip() {
        for (variant, s) in [
            (EmergencyType::Medical, "medical"),
            (EmergencyType::Epidemic, "epidemic"),
            (EmergencyType::Malnutrition, "malnutrition"),
            (EmergencyType::Trauma, "trauma"),
            (EmergencyType::MentalHealth, "mental_health"),
            (EmergencyType::General, "general"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(EmergencyType::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn severity_is_ordered() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn urgency_tier_is_ordered() {
        assert!(UrgencyTier::Low < UrgencyTier::Medium);
        assert!(UrgencyTier::High < UrgencyTier::Emergency);
    }

    #[test]
    fn urgency_maps_to_risk() {
        assert_eq!(RiskLevel::from(UrgencyTier::Low), RiskLevel::Low);
        assert_eq!(RiskLevel::from(UrgencyTier::Medium), RiskLevel::Medium);
        assert_eq!(RiskLevel::from(UrgencyTier::High), RiskLevel::High);
        assert_eq!(RiskLevel::from(UrgencyTier::Emergency), RiskLevel::Critical);
    }

    #[test]
    fn severity_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Severity::Critical).unwrap(), "\"critical\"");
        assert_eq!(serde_json::to_string(&UrgencyTier::Emergency).unwrap(), "\"emergency\"");
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(FacilityKind::from_str("tent").is_err());
        assert!(TicketStatus::from_str("").is_err());
        assert!(EmergencyType::from_str("unknown").is_err());
    }
}
