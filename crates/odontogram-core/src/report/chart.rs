//! Full-mouth odontogram chart.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ConditionStatistics;
use crate::models::{is_valid_fdi, Condition, Tooth, ToothCondition};

/// Upper arch as drawn, patient's right to left.
pub const UPPER_ROW: [i32; 16] = [18, 17, 16, 15, 14, 13, 12, 11, 21, 22, 23, 24, 25, 26, 27, 28];

/// Lower arch as drawn, patient's right to left.
pub const LOWER_ROW: [i32; 16] = [48, 47, 46, 45, 44, 43, 42, 41, 31, 32, 33, 34, 35, 36, 37, 38];

/// One tooth on the chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartTooth {
    pub tooth: Tooth,
    pub condition: Condition,
    /// Description of the deciding treatment, if any
    pub notes: Option<String>,
    /// Date of the deciding treatment; `None` for untreated teeth
    pub last_treatment: Option<DateTime<Utc>>,
}

/// All 32 permanent teeth with their conditions.
///
/// Teeth missing from the derived conditions are charted as healthy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Odontogram {
    /// Upper arch in [`UPPER_ROW`] order
    pub upper: Vec<ChartTooth>,
    /// Lower arch in [`LOWER_ROW`] order
    pub lower: Vec<ChartTooth>,
    /// Derived entries with non-FDI numbers, which have no place on the chart
    pub unplaced: Vec<ToothCondition>,
}

impl Odontogram {
    /// Build the chart from derived conditions.
    pub fn from_conditions(conditions: &[ToothCondition]) -> Self {
        let mut by_number: HashMap<i32, &ToothCondition> = HashMap::new();
        for condition in conditions {
            by_number.entry(condition.number).or_insert(condition);
        }

        Self {
            upper: chart_row(&UPPER_ROW, &by_number),
            lower: chart_row(&LOWER_ROW, &by_number),
            unplaced: conditions
                .iter()
                .filter(|c| !is_valid_fdi(c.number))
                .cloned()
                .collect(),
        }
    }

    /// Look up a charted tooth by FDI number.
    pub fn get(&self, number: i32) -> Option<&ChartTooth> {
        self.teeth().find(|t| t.tooth.number() == number)
    }

    /// Condition of a tooth, healthy when not charted.
    pub fn condition_of(&self, number: i32) -> Condition {
        self.get(number)
            .map(|t| t.condition)
            .unwrap_or(Condition::Healthy)
    }

    /// All charted teeth, upper arch first.
    pub fn teeth(&self) -> impl Iterator<Item = &ChartTooth> {
        self.upper.iter().chain(self.lower.iter())
    }

    /// Condition counts over all 32 charted teeth.
    pub fn statistics(&self) -> ConditionStatistics {
        self.teeth().map(|t| t.condition).collect()
    }
}

fn chart_row(numbers: &[i32], by_number: &HashMap<i32, &ToothCondition>) -> Vec<ChartTooth> {
    numbers
        .iter()
        .filter_map(|&number| Tooth::new(number))
        .map(|tooth| match by_number.get(&tooth.number()) {
            Some(derived) => ChartTooth {
                tooth,
                condition: derived.condition,
                notes: derived.notes.clone(),
                last_treatment: Some(derived.last_treatment),
            },
            None => ChartTooth {
                tooth,
                condition: Condition::Healthy,
                notes: None,
                last_treatment: None,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Arch;
    use chrono::TimeZone;

    fn derived(number: i32, condition: Condition) -> ToothCondition {
        ToothCondition {
            number,
            condition,
            notes: Some("catatan".into()),
            last_treatment: Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_chart_is_all_healthy() {
        let chart = Odontogram::from_conditions(&[]);

        assert_eq!(chart.upper.len(), 16);
        assert_eq!(chart.lower.len(), 16);
        assert!(chart.teeth().all(|t| t.condition == Condition::Healthy));
        assert!(chart.teeth().all(|t| t.last_treatment.is_none()));
        assert_eq!(chart.statistics().count(Condition::Healthy), 32);
    }

    #[test]
    fn test_row_order() {
        let chart = Odontogram::from_conditions(&[]);

        assert_eq!(chart.upper.first().unwrap().tooth.number(), 18);
        assert_eq!(chart.upper.last().unwrap().tooth.number(), 28);
        assert_eq!(chart.lower.first().unwrap().tooth.number(), 48);
        assert_eq!(chart.lower.last().unwrap().tooth.number(), 38);
        assert!(chart.upper.iter().all(|t| t.tooth.arch() == Arch::Upper));
        assert!(chart.lower.iter().all(|t| t.tooth.arch() == Arch::Lower));
    }

    #[test]
    fn test_derived_conditions_placed() {
        let chart = Odontogram::from_conditions(&[
            derived(14, Condition::Extracted),
            derived(36, Condition::Filled),
        ]);

        assert_eq!(chart.condition_of(14), Condition::Extracted);
        assert_eq!(chart.condition_of(36), Condition::Filled);
        assert_eq!(chart.condition_of(11), Condition::Healthy);
        assert_eq!(chart.get(14).unwrap().notes.as_deref(), Some("catatan"));

        let stats = chart.statistics();
        assert_eq!(stats.count(Condition::Healthy), 30);
        assert_eq!(stats.total(), 32);
    }

    #[test]
    fn test_invalid_numbers_unplaced() {
        let chart = Odontogram::from_conditions(&[
            derived(55, Condition::Decayed),
            derived(21, Condition::Crown),
        ]);

        assert_eq!(chart.unplaced.len(), 1);
        assert_eq!(chart.unplaced[0].number, 55);
        assert!(chart.get(55).is_none());
        assert_eq!(chart.condition_of(55), Condition::Healthy);
        assert_eq!(chart.condition_of(21), Condition::Crown);
    }

    #[test]
    fn test_first_entry_wins_on_duplicates() {
        let chart = Odontogram::from_conditions(&[
            derived(11, Condition::Crown),
            derived(11, Condition::Decayed),
        ]);
        assert_eq!(chart.condition_of(11), Condition::Crown);
    }
}
