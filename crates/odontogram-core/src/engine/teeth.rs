//! Normalization of the stored `teeth` field into tooth numbers.

use serde_json::Value;
use thiserror::Error;

use crate::models::TeethField;

/// Errors from an unusable `teeth` payload.
#[derive(Error, Debug)]
pub enum TeethError {
    #[error("Invalid teeth JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Teeth payload is not a list: {0}")]
    NotAList(String),

    #[error("Invalid tooth entry: {0}")]
    InvalidEntry(String),
}

pub type TeethResult<T> = Result<T, TeethError>;

/// Parse a stored `teeth` value into integer tooth numbers.
///
/// Entries may be integers, integral floats, or strings holding either.
/// A single bad entry rejects the whole payload. JSON `null` and blank text
/// mean "no teeth".
pub fn parse_teeth(raw: &TeethField) -> TeethResult<Vec<i32>> {
    match raw {
        TeethField::Encoded(text) => {
            if text.trim().is_empty() {
                return Ok(Vec::new());
            }
            parse_value(&serde_json::from_str::<Value>(text)?)
        }
        TeethField::List(entries) => parse_entries(entries),
        TeethField::Other(value) => parse_value(value),
    }
}

fn parse_value(value: &Value) -> TeethResult<Vec<i32>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(entries) => parse_entries(entries),
        other => Err(TeethError::NotAList(other.to_string())),
    }
}

fn parse_entries(entries: &[Value]) -> TeethResult<Vec<i32>> {
    entries.iter().map(parse_entry).collect()
}

fn parse_entry(entry: &Value) -> TeethResult<i32> {
    let number = match entry {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64)
            })
        }
        _ => None,
    };

    number
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| TeethError::InvalidEntry(entry.to_string()))
}
