//! Odontogram Core Library
//!
//! Derives the current condition of every treated tooth from a dental
//! patient's treatment history.
//!
//! # Architecture
//!
//! ```text
//! Treatment store ──► Vec<Treatment> (any order)
//!                           │
//!                 ┌─────────▼─────────┐
//!                 │ ToothCondition-   │  sort newest first (tie: id asc)
//!                 │ Engine            │  parse teeth (JSON text or list)
//!                 │                   │  classify type/description
//!                 │                   │  latest treatment wins per tooth
//!                 └─────────┬─────────┘
//!                           │
//!                  Vec<ToothCondition>
//!                           │
//!          ┌────────────────┼────────────────┐
//!          ▼                ▼                ▼
//!     Odontogram      Statistics        CSV / JSON
//!       chart                             export
//! ```
//!
//! # Core Principle
//!
//! **Conditions are derived, never stored.** Every call recomputes from the
//! treatments it is given; a tooth absent from the result is healthy.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Treatment, Tooth, Condition, ToothCondition)
//! - [`engine`]: Condition derivation (classifier + teeth parser)
//! - [`report`]: Odontogram chart, statistics and export

pub mod engine;
pub mod models;
pub mod report;

// Re-export commonly used types
pub use engine::{
    derive_tooth_conditions, parse_teeth, Classifier, EngineConfig, InvalidToothPolicy,
    ToothConditionEngine,
};
pub use models::{
    parse_treatment_date, Condition, TeethField, Tooth, ToothCondition, ToothKind, Treatment,
};
pub use report::{ConditionStatistics, Odontogram, ToothConditionExport, ToothConditionExporter};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum OdontogramError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

impl From<engine::EngineError> for OdontogramError {
    fn from(e: engine::EngineError) -> Self {
        OdontogramError::ConfigError(e.to_string())
    }
}

impl From<serde_json::Error> for OdontogramError {
    fn from(e: serde_json::Error) -> Self {
        OdontogramError::SerializationError(e.to_string())
    }
}

impl From<chrono::ParseError> for OdontogramError {
    fn from(e: chrono::ParseError) -> Self {
        OdontogramError::InvalidInput(format!("Invalid treatment date: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Create an engine, optionally configured from JSON.
#[uniffi::export]
pub fn new_odontogram_core(
    config_json: Option<String>,
) -> Result<Arc<OdontogramCore>, OdontogramError> {
    let config = match config_json {
        Some(json) => EngineConfig::from_json(&json)?,
        None => EngineConfig::default(),
    };

    Ok(Arc::new(OdontogramCore {
        engine: ToothConditionEngine::with_config(config),
    }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Engine wrapper for FFI.
///
/// Stateless between calls, so no locking is needed.
#[derive(uniffi::Object)]
pub struct OdontogramCore {
    engine: ToothConditionEngine,
}

#[uniffi::export]
impl OdontogramCore {
    /// Derive tooth conditions for one patient.
    pub fn derive_conditions(
        &self,
        treatments: Vec<FfiTreatment>,
    ) -> Result<Vec<FfiToothCondition>, OdontogramError> {
        let treatments = to_treatments(treatments)?;
        let conditions = self.engine.derive(&treatments);
        Ok(conditions.into_iter().map(|c| c.into()).collect())
    }

    /// Condition distribution over the derived teeth.
    pub fn condition_statistics(
        &self,
        treatments: Vec<FfiTreatment>,
    ) -> Result<Vec<FfiConditionCount>, OdontogramError> {
        let treatments = to_treatments(treatments)?;
        let stats = ConditionStatistics::from_conditions(&self.engine.derive(&treatments));
        Ok(stats
            .iter()
            .map(|(condition, count)| FfiConditionCount {
                condition: condition.as_str().to_string(),
                label: condition.label().to_string(),
                count: count as u32,
            })
            .collect())
    }

    /// Export one patient's tooth conditions as CSV.
    pub fn export_conditions_csv(
        &self,
        patient_id: String,
        patient_name: String,
        treatments: Vec<FfiTreatment>,
    ) -> Result<String, OdontogramError> {
        Ok(self.export(patient_id, patient_name, treatments)?.to_csv())
    }

    /// Export one patient's tooth conditions as JSON.
    pub fn export_conditions_json(
        &self,
        patient_id: String,
        patient_name: String,
        treatments: Vec<FfiTreatment>,
    ) -> Result<String, OdontogramError> {
        Ok(self.export(patient_id, patient_name, treatments)?.to_json()?)
    }
}

impl OdontogramCore {
    fn export(
        &self,
        patient_id: String,
        patient_name: String,
        treatments: Vec<FfiTreatment>,
    ) -> Result<ToothConditionExport, OdontogramError> {
        let patient = report::PatientTreatments {
            patient_id,
            patient_name,
            treatments: to_treatments(treatments)?,
        };
        Ok(ToothConditionExporter::new(&self.engine).export_patient(&patient))
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe treatment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTreatment {
    pub id: String,
    pub patient_id: String,
    /// RFC 3339 timestamp or YYYY-MM-DD
    pub date: String,
    pub treatment_type: Option<String>,
    pub description: Option<String>,
    /// JSON-encoded tooth list, as stored
    pub teeth: Option<String>,
}

impl TryFrom<FfiTreatment> for Treatment {
    type Error = OdontogramError;

    fn try_from(treatment: FfiTreatment) -> Result<Self, Self::Error> {
        Ok(Treatment {
            date: parse_treatment_date(&treatment.date)?,
            id: treatment.id,
            patient_id: treatment.patient_id,
            treatment_type: treatment.treatment_type,
            description: treatment.description,
            teeth: treatment.teeth.map(TeethField::Encoded),
        })
    }
}

fn to_treatments(treatments: Vec<FfiTreatment>) -> Result<Vec<Treatment>, OdontogramError> {
    treatments.into_iter().map(Treatment::try_from).collect()
}

/// FFI-safe tooth condition.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiToothCondition {
    pub number: i32,
    pub condition: String,
    pub notes: Option<String>,
    /// RFC 3339 timestamp
    pub last_treatment: String,
}

impl From<ToothCondition> for FfiToothCondition {
    fn from(tooth: ToothCondition) -> Self {
        Self {
            number: tooth.number,
            condition: tooth.condition.as_str().to_string(),
            notes: tooth.notes,
            last_treatment: tooth.last_treatment.to_rfc3339(),
        }
    }
}

/// FFI-safe condition count.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiConditionCount {
    pub condition: String,
    pub label: String,
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ffi_treatment(id: &str, date: &str, treatment_type: &str, teeth: &str) -> FfiTreatment {
        FfiTreatment {
            id: id.to_string(),
            patient_id: "patient-1".to_string(),
            date: date.to_string(),
            treatment_type: Some(treatment_type.to_string()),
            description: None,
            teeth: Some(teeth.to_string()),
        }
    }

    #[test]
    fn test_derive_conditions_ffi() {
        let core = new_odontogram_core(None).unwrap();
        let conditions = core
            .derive_conditions(vec![
                ffi_treatment("t1", "2024-01-10", "Tambal Gigi", "[14]"),
                ffi_treatment("t2", "2024-03-05T00:00:00Z", "Pencabutan Gigi", "[14,15]"),
            ])
            .unwrap();

        assert_eq!(conditions.len(), 2);
        assert!(conditions.iter().all(|c| c.condition == "extracted"));
        assert!(conditions[0].last_treatment.starts_with("2024-03-05"));
    }

    #[test]
    fn test_invalid_date_rejected() {
        let core = new_odontogram_core(None).unwrap();
        let result = core.derive_conditions(vec![ffi_treatment("t1", "kemarin", "Tambal", "[14]")]);
        assert!(matches!(result, Err(OdontogramError::InvalidInput(_))));
    }

    #[test]
    fn test_bad_config_rejected() {
        let result = new_odontogram_core(Some("{not json".to_string()));
        assert!(matches!(result, Err(OdontogramError::ConfigError(_))));
    }

    #[test]
    fn test_statistics_ffi() {
        let core = new_odontogram_core(None).unwrap();
        let stats = core
            .condition_statistics(vec![
                ffi_treatment("t1", "2024-01-10", "Tambal Gigi", "[36, 37]"),
                ffi_treatment("t2", "2024-02-10", "Karies", "[46]"),
            ])
            .unwrap();

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].condition, "filled");
        assert_eq!(stats[0].label, "Tambalan");
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[1].condition, "decayed");
    }

    #[test]
    fn test_export_ffi() {
        let core = new_odontogram_core(Some(r#"{"invalid_teeth": "retain"}"#.to_string())).unwrap();
        let treatments = vec![ffi_treatment("t1", "2024-01-10", "Mahkota", "[11, 99]")];

        let csv = core
            .export_conditions_csv("patient-1".into(), "Siti".into(), treatments.clone())
            .unwrap();
        assert_eq!(csv.lines().count(), 3);

        let json = core
            .export_conditions_json("patient-1".into(), "Siti".into(), treatments)
            .unwrap();
        assert!(json.contains("\"crown\""));
    }
}
