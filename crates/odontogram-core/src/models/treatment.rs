//! Treatment records as supplied by the treatment store.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A recorded clinical procedure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    /// Unique treatment ID
    pub id: String,
    /// Owning patient ID
    pub patient_id: String,
    /// When the procedure was performed
    pub date: DateTime<Utc>,
    /// Free-text procedure label (e.g., "Tambal Gigi")
    #[serde(rename = "type", default)]
    pub treatment_type: Option<String>,
    /// Free-text narrative
    #[serde(default)]
    pub description: Option<String>,
    /// Affected teeth, as persisted
    #[serde(default)]
    pub teeth: Option<TeethField>,
}

/// The `teeth` column in either of its stored shapes.
///
/// Older rows hold a JSON-encoded string, newer ones a native array. Array
/// entries may be numbers or numeric strings. The column is untyped JSON, so
/// any other value is kept as-is and rejected later, per treatment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TeethField {
    /// JSON text, e.g. `"[11,12]"`
    Encoded(String),
    /// Native sequence, e.g. `[11, "12"]`
    List(Vec<serde_json::Value>),
    /// Any other JSON value (number, object, boolean)
    Other(serde_json::Value),
}

impl From<Vec<i32>> for TeethField {
    fn from(teeth: Vec<i32>) -> Self {
        TeethField::List(teeth.into_iter().map(serde_json::Value::from).collect())
    }
}

impl From<&str> for TeethField {
    fn from(encoded: &str) -> Self {
        TeethField::Encoded(encoded.to_string())
    }
}

impl Treatment {
    /// Create a new treatment with required fields.
    pub fn new(patient_id: String, date: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            patient_id,
            date,
            treatment_type: None,
            description: None,
            teeth: None,
        }
    }

    pub fn with_type(mut self, treatment_type: impl Into<String>) -> Self {
        self.treatment_type = Some(treatment_type.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_teeth(mut self, teeth: impl Into<TeethField>) -> Self {
        self.teeth = Some(teeth.into());
        self
    }
}

/// Parse a treatment date.
///
/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (taken as
/// midnight UTC), the shape used by spreadsheet import and export.
pub fn parse_treatment_date(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")?;
    Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::default())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_treatment() {
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 9, 30, 0).unwrap();
        let treatment = Treatment::new("patient-1".into(), date)
            .with_type("Pencabutan Gigi")
            .with_teeth(vec![14, 15]);

        assert_eq!(treatment.id.len(), 36); // UUID format
        assert_eq!(treatment.treatment_type.as_deref(), Some("Pencabutan Gigi"));
        assert!(treatment.description.is_none());
        assert_eq!(treatment.teeth, Some(TeethField::List(vec![14.into(), 15.into()])));
    }

    #[test]
    fn test_deserialize_encoded_teeth() {
        let json = r#"{
            "id": "t1",
            "patientId": "p1",
            "date": "2024-01-10T00:00:00Z",
            "type": "Tambal Gigi",
            "description": "tambal gigi 14",
            "teeth": "[14]"
        }"#;

        let treatment: Treatment = serde_json::from_str(json).unwrap();
        assert_eq!(treatment.patient_id, "p1");
        assert_eq!(treatment.treatment_type.as_deref(), Some("Tambal Gigi"));
        assert_eq!(treatment.teeth, Some(TeethField::Encoded("[14]".into())));
    }

    #[test]
    fn test_deserialize_native_teeth_and_extra_fields() {
        let json = r#"{
            "id": "t2",
            "patientId": "p1",
            "date": "2024-01-10T00:00:00Z",
            "teeth": [11, "12"],
            "cost": 150000,
            "notes": null
        }"#;

        let treatment: Treatment = serde_json::from_str(json).unwrap();
        assert!(treatment.treatment_type.is_none());
        assert_eq!(
            treatment.teeth,
            Some(TeethField::List(vec![11.into(), "12".into()]))
        );
    }

    #[test]
    fn test_deserialize_unexpected_teeth_shape() {
        let json = r#"[
            {"id": "t4", "patientId": "p1", "date": "2024-01-10T00:00:00Z", "teeth": {"bad": 1}},
            {"id": "t5", "patientId": "p1", "date": "2024-01-10T00:00:00Z", "teeth": 14}
        ]"#;

        let treatments: Vec<Treatment> = serde_json::from_str(json).unwrap();
        assert_eq!(
            treatments[0].teeth,
            Some(TeethField::Other(serde_json::json!({"bad": 1})))
        );
        assert_eq!(treatments[1].teeth, Some(TeethField::Other(14.into())));
    }

    #[test]
    fn test_deserialize_missing_teeth() {
        let json = r#"{"id": "t3", "patientId": "p1", "date": "2023-06-01T00:00:00Z", "teeth": null}"#;
        let treatment: Treatment = serde_json::from_str(json).unwrap();
        assert!(treatment.teeth.is_none());
    }

    #[test]
    fn test_parse_treatment_date() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
        assert_eq!(parse_treatment_date("2024-03-05").unwrap(), expected);
        assert_eq!(parse_treatment_date("2024-03-05T00:00:00Z").unwrap(), expected);
        assert_eq!(
            parse_treatment_date("2024-03-05T07:00:00+07:00").unwrap(),
            expected
        );
        assert!(parse_treatment_date("05/03/2024").is_err());
        assert!(parse_treatment_date("").is_err());
    }
}
