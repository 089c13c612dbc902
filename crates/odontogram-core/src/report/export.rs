//! Tooth condition export for spreadsheets and reporting.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::ToothConditionEngine;
use crate::models::{Condition, ToothCondition, Treatment};

const CSV_HEADER: &str =
    "patient_id,patient_name,tooth_number,condition,condition_label,last_treatment,description\n";

/// A patient's treatments, as loaded by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientTreatments {
    pub patient_id: String,
    pub patient_name: String,
    pub treatments: Vec<Treatment>,
}

/// Tooth condition export for a single patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToothConditionExport {
    /// Export metadata
    pub metadata: ExportMetadata,
    /// One row per derived tooth, by tooth number
    pub rows: Vec<ToothConditionRow>,
}

/// Export metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub patient_id: String,
    pub patient_name: String,
    /// Export timestamp
    pub exported_at: String,
}

/// Single exported tooth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToothConditionRow {
    pub tooth_number: i32,
    pub condition: Condition,
    /// Display label (e.g., "Dicabut")
    pub condition_label: String,
    /// Date of the deciding treatment (YYYY-MM-DD)
    pub last_treatment: String,
    /// Description of the deciding treatment
    pub description: Option<String>,
}

impl ToothConditionExport {
    /// Create an export from derived conditions.
    pub fn from_conditions(
        patient_id: &str,
        patient_name: &str,
        conditions: &[ToothCondition],
    ) -> Self {
        let mut rows: Vec<ToothConditionRow> = conditions
            .iter()
            .map(|c| ToothConditionRow {
                tooth_number: c.number,
                condition: c.condition,
                condition_label: c.condition.label().to_string(),
                last_treatment: c.last_treatment.format("%Y-%m-%d").to_string(),
                description: c.notes.clone(),
            })
            .collect();
        rows.sort_by_key(|row| row.tooth_number);

        Self {
            metadata: ExportMetadata {
                patient_id: patient_id.to_string(),
                patient_name: patient_name.to_string(),
                exported_at: chrono::Utc::now().to_rfc3339(),
            },
            rows,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from(CSV_HEADER);
        self.write_csv_rows(&mut csv);
        csv
    }

    fn write_csv_rows(&self, csv: &mut String) {
        for row in &self.rows {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                escape_csv(&self.metadata.patient_id),
                escape_csv(&self.metadata.patient_name),
                row.tooth_number,
                row.condition.as_str(),
                escape_csv(&row.condition_label),
                row.last_treatment,
                escape_csv(row.description.as_deref().unwrap_or("")),
            ));
        }
    }
}

/// Batch tooth condition export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchToothConditionExport {
    /// Export timestamp
    pub exported_at: String,
    /// Individual patient exports
    pub patients: Vec<ToothConditionExport>,
    /// Total row count
    pub total_rows: usize,
}

impl BatchToothConditionExport {
    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from(CSV_HEADER);
        for export in &self.patients {
            export.write_csv_rows(&mut csv);
        }
        csv
    }
}

/// Tooth condition exporter.
pub struct ToothConditionExporter<'a> {
    engine: &'a ToothConditionEngine,
}

impl<'a> ToothConditionExporter<'a> {
    /// Create a new exporter.
    pub fn new(engine: &'a ToothConditionEngine) -> Self {
        Self { engine }
    }

    /// Export one patient.
    pub fn export_patient(&self, patient: &PatientTreatments) -> ToothConditionExport {
        let conditions = self.engine.derive(&patient.treatments);
        ToothConditionExport::from_conditions(&patient.patient_id, &patient.patient_name, &conditions)
    }

    /// Export several patients.
    pub fn export_all(&self, patients: &[PatientTreatments]) -> BatchToothConditionExport {
        let patients: Vec<ToothConditionExport> =
            patients.iter().map(|p| self.export_patient(p)).collect();
        let total_rows = patients.iter().map(|p| p.rows.len()).sum();

        info!(patients = patients.len(), rows = total_rows, "exported tooth conditions");

        BatchToothConditionExport {
            exported_at: chrono::Utc::now().to_rfc3339(),
            patients,
            total_rows,
        }
    }
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
