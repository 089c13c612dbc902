//! Tooth condition engine.
//!
//! Pipeline: Sort (newest first) → Parse teeth → Classify → Latest wins per tooth

mod classifier;
mod teeth;

pub use classifier::*;
pub use teeth::*;

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{is_valid_fdi, Condition, ToothCondition, Treatment};

/// Engine errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid engine config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// What to do with tooth numbers outside the 32 permanent FDI codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidToothPolicy {
    /// Leave them out of the result
    #[default]
    Drop,
    /// Report them like any other tooth
    Retain,
}

/// Engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Handling of out-of-range tooth numbers
    pub invalid_teeth: InvalidToothPolicy,
    /// Extra keywords per condition, appended to the default groups
    pub extra_keywords: BTreeMap<Condition, Vec<String>>,
}

impl EngineConfig {
    /// Load configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Derives the current condition of every treated tooth.
///
/// Holds no per-patient state: every call works from the treatments it is
/// given, so one engine can serve any number of callers.
#[derive(Debug, Clone, Default)]
pub struct ToothConditionEngine {
    classifier: Classifier,
    invalid_teeth: InvalidToothPolicy,
}

impl ToothConditionEngine {
    /// Create an engine with the default keyword table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine from configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        let mut classifier = Classifier::new();
        for (condition, keywords) in &config.extra_keywords {
            for keyword in keywords {
                classifier.add_keyword(*condition, keyword);
            }
        }

        Self {
            classifier,
            invalid_teeth: config.invalid_teeth,
        }
    }

    /// Derive tooth conditions from one patient's treatments.
    ///
    /// Input order does not matter. Treatments are processed newest first
    /// (ties broken by ascending id) and the first treatment to touch a tooth
    /// sets its condition. Teeth never treated are absent, meaning healthy.
    /// The result lists teeth in the order they were first assigned.
    pub fn derive(&self, treatments: &[Treatment]) -> Vec<ToothCondition> {
        let mut ordered: Vec<&Treatment> = treatments.iter().collect();
        ordered.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));

        let mut assigned = HashSet::new();
        let mut conditions = Vec::new();

        for treatment in ordered {
            let teeth = self.treatment_teeth(treatment);
            if teeth.is_empty() {
                continue;
            }

            let condition = self.classifier.classify(treatment);
            for number in teeth {
                if assigned.insert(number) {
                    conditions.push(ToothCondition {
                        number,
                        condition,
                        notes: treatment.description.clone(),
                        last_treatment: treatment.date,
                    });
                }
            }
        }

        debug!(
            treatments = treatments.len(),
            teeth = conditions.len(),
            "derived tooth conditions"
        );

        conditions
    }

    /// Tooth numbers a treatment touched, after the invalid-tooth policy.
    ///
    /// A malformed payload yields no teeth.
    pub fn treatment_teeth(&self, treatment: &Treatment) -> Vec<i32> {
        let Some(raw) = &treatment.teeth else {
            return Vec::new();
        };

        let teeth = match parse_teeth(raw) {
            Ok(teeth) => teeth,
            Err(error) => {
                warn!(treatment_id = %treatment.id, %error, "ignoring malformed teeth payload");
                return Vec::new();
            }
        };

        teeth
            .into_iter()
            .filter(|&number| {
                if is_valid_fdi(number) {
                    return true;
                }
                warn!(
                    treatment_id = %treatment.id,
                    tooth = number,
                    policy = ?self.invalid_teeth,
                    "tooth number outside FDI permanent dentition"
                );
                self.invalid_teeth == InvalidToothPolicy::Retain
            })
            .collect()
    }

    /// Get the classifier for direct access.
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Get the active invalid-tooth policy.
    pub fn invalid_tooth_policy(&self) -> InvalidToothPolicy {
        self.invalid_teeth
    }
}

/// Derive tooth conditions with the default engine.
pub fn derive_tooth_conditions(treatments: &[Treatment]) -> Vec<ToothCondition> {
    ToothConditionEngine::new().derive(treatments)
}
