//! Tooth condition models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Clinical condition of a single tooth.
///
/// Variants are declared in classification precedence order, with `Healthy`
/// (the fallback) last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Tooth has been pulled
    Extracted,
    /// Endodontic treatment performed
    RootCanal,
    /// Crown fitted
    Crown,
    /// Restored with a filling
    Filled,
    /// Caries present
    Decayed,
    /// No condition-changing treatment on record
    Healthy,
}

impl Condition {
    /// Every condition, in precedence order.
    pub const ALL: [Condition; 6] = [
        Condition::Extracted,
        Condition::RootCanal,
        Condition::Crown,
        Condition::Filled,
        Condition::Decayed,
        Condition::Healthy,
    ];

    /// Wire name, as used in JSON and CSV output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Extracted => "extracted",
            Condition::RootCanal => "root_canal",
            Condition::Crown => "crown",
            Condition::Filled => "filled",
            Condition::Decayed => "decayed",
            Condition::Healthy => "healthy",
        }
    }

    /// Display label shown to clinic staff.
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Extracted => "Dicabut",
            Condition::RootCanal => "Saluran Akar",
            Condition::Crown => "Mahkota",
            Condition::Filled => "Tambalan",
            Condition::Decayed => "Karies",
            Condition::Healthy => "Sehat",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived condition of one tooth.
///
/// Recomputed from the treatment history on every request, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToothCondition {
    /// FDI tooth number
    pub number: i32,
    /// Current condition
    pub condition: Condition,
    /// Description of the treatment that set the condition
    pub notes: Option<String>,
    /// Date of the treatment that set the condition
    pub last_treatment: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_condition_wire_names() {
        assert_eq!(Condition::RootCanal.as_str(), "root_canal");
        assert_eq!(
            serde_json::to_string(&Condition::RootCanal).unwrap(),
            "\"root_canal\""
        );
        let parsed: Condition = serde_json::from_str("\"extracted\"").unwrap();
        assert_eq!(parsed, Condition::Extracted);
    }

    #[test]
    fn test_condition_labels() {
        assert_eq!(Condition::Healthy.label(), "Sehat");
        assert_eq!(Condition::Filled.label(), "Tambalan");
        assert_eq!(Condition::Extracted.label(), "Dicabut");
    }

    #[test]
    fn test_healthy_is_last() {
        assert_eq!(Condition::ALL.last(), Some(&Condition::Healthy));
        assert!(Condition::Extracted < Condition::Decayed);
    }

    #[test]
    fn test_tooth_condition_json_shape() {
        let tooth = ToothCondition {
            number: 14,
            condition: Condition::Filled,
            notes: Some("tambal gigi 14".into()),
            last_treatment: Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(),
        };

        let json = serde_json::to_value(&tooth).unwrap();
        assert_eq!(json["number"], 14);
        assert_eq!(json["condition"], "filled");
        assert_eq!(json["notes"], "tambal gigi 14");
        assert!(json.get("lastTreatment").is_some());
    }
}
