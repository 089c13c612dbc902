//! Condition distribution counts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Condition, ToothCondition};

/// Number of teeth per condition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionStatistics {
    counts: BTreeMap<Condition, usize>,
}

impl ConditionStatistics {
    /// Count the conditions of derived teeth.
    ///
    /// Only materialized entries are counted; untreated teeth are not in the
    /// input. Use [`crate::report::Odontogram::statistics`] for a full-mouth count.
    pub fn from_conditions(conditions: &[ToothCondition]) -> Self {
        conditions.iter().map(|c| c.condition).collect()
    }

    pub fn count(&self, condition: Condition) -> usize {
        self.counts.get(&condition).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Non-zero counts in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = (Condition, usize)> + '_ {
        Condition::ALL
            .into_iter()
            .filter_map(move |condition| self.counts.get(&condition).map(|n| (condition, *n)))
    }
}

impl FromIterator<Condition> for ConditionStatistics {
    fn from_iter<I: IntoIterator<Item = Condition>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for condition in iter {
            *counts.entry(condition).or_insert(0) += 1;
        }
        Self { counts }
    }
}
