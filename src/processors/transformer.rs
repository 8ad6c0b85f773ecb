use chrono::Utc;
use thiserror::Error;
use tracing::warn;
use validator::Validate;

use crate::models::{RawMeasurement, TransformedRecord};
use crate::utils::constants::*;

/// Failure of a single record's coercion. The caller decides skip-vs-fallback;
/// nothing here aborts a batch.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("missing value for field '{0}'")]
    MissingValue(&'static str),

    #[error("invalid {field} value '{value}'")]
    FieldType { field: &'static str, value: String },
}

fn parse_f64(field: &'static str, value: &Option<String>) -> Result<f64, TransformError> {
    let text = value
        .as_deref()
        .ok_or(TransformError::MissingValue(field))?;

    text.trim().parse::<f64>().map_err(|_| TransformError::FieldType {
        field,
        value: text.to_string(),
    })
}

fn parse_count(field: &'static str, value: &Option<String>) -> Result<i64, TransformError> {
    // Counts sometimes arrive as decimals ("43.0"); truncate like the
    // upstream survey tooling does.
    let number = parse_f64(field, value)?;
    if !number.is_finite() {
        return Err(TransformError::FieldType {
            field,
            value: number.to_string(),
        });
    }

    Ok(number as i64)
}

/// Validates and coerces raw measurements into their storage shape.
///
/// Presence and range findings are advisory: they are logged and the record
/// continues. Only type coercion can fail a record.
pub struct RecordTransformer;

impl RecordTransformer {
    pub fn new() -> Self {
        Self
    }

    pub fn transform(
        &self,
        raw: &RawMeasurement,
    ) -> Result<TransformedRecord, TransformError> {
        for field in raw.missing_fields() {
            warn!(record = %raw.identity(), field, "missing or null field");
        }

        let record = self.coerce(raw)?;

        if let Err(violations) = record.validate() {
            warn!(
                record = %raw.identity(),
                %violations,
                "measurement outside expected range"
            );
        }

        Ok(record)
    }

    /// Type coercion alone, without the advisory logging
    pub fn coerce(&self, raw: &RawMeasurement) -> Result<TransformedRecord, TransformError> {
        Ok(TransformedRecord {
            location_name: raw.location_name.clone(),
            dissolved_oxygen: parse_f64(FIELD_DISSOLVED_OXYGEN, &raw.dissolved_oxygen)?,
            ph: parse_f64(FIELD_PH, &raw.ph)?,
            conductivity: parse_f64(FIELD_CONDUCTIVITY, &raw.conductivity)?,
            bod: parse_f64(FIELD_BOD, &raw.bod)?,
            nitrate_nitrite: parse_f64(FIELD_NITRATE_NITRITE, &raw.nitrate_nitrite)?,
            fecal_coliform: parse_count(FIELD_FECAL_COLIFORM, &raw.fecal_coliform)?,
            total_coliform: parse_count(FIELD_TOTAL_COLIFORM, &raw.total_coliform)?,
            wqi: parse_f64(FIELD_WQI, &raw.wqi)?,
            lat: parse_f64(FIELD_LAT, &raw.lat)?,
            lon: parse_f64(FIELD_LON, &raw.lon)?,
            processed_timestamp: Utc::now()
                .naive_utc()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
        })
    }

    /// Dry-run the validation and coercion over a set of records
    pub fn check_records(&self, records: &[RawMeasurement]) -> ValidationReport {
        let mut report = ValidationReport::new(records.len());

        for raw in records {
            let identity = raw.identity();
            let mut clean = true;

            let missing = raw.missing_fields();
            if !missing.is_empty() {
                clean = false;
                report.missing_field_records += 1;
                report
                    .issues
                    .push(format!("{}: missing fields {:?}", identity, missing));
            }

            match self.coerce(raw) {
                Ok(record) => {
                    if let Err(violations) = record.validate() {
                        clean = false;
                        report.range_violations += 1;
                        report
                            .issues
                            .push(format!("{}: {}", identity, violations));
                    }
                }
                Err(e) => {
                    clean = false;
                    report.coercion_failures += 1;
                    report.issues.push(format!("{}: {}", identity, e));
                }
            }

            if clean {
                report.clean_records += 1;
            }
        }

        report
    }
}

impl Default for RecordTransformer {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome counts from a validation dry run
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub total_records: usize,
    pub clean_records: usize,
    pub missing_field_records: usize,
    pub coercion_failures: usize,
    pub range_violations: usize,
    pub issues: Vec<String>,
}

impl ValidationReport {
    fn new(total_records: usize) -> Self {
        Self {
            total_records,
            clean_records: 0,
            missing_field_records: 0,
            coercion_failures: 0,
            range_violations: 0,
            issues: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Generate a summary report
    pub fn generate_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Validation Report ===\n");
        summary.push_str(&format!("Total Records: {}\n", self.total_records));
        summary.push_str(&format!("Clean Records: {}\n", self.clean_records));
        summary.push_str(&format!(
            "Records With Missing Fields: {}\n",
            self.missing_field_records
        ));
        summary.push_str(&format!("Coercion Failures: {}\n", self.coercion_failures));
        summary.push_str(&format!("Range Violations: {}\n", self.range_violations));

        if !self.issues.is_empty() {
            summary.push_str("\nTop 10 Issues:\n");
            for (i, issue) in self.issues.iter().take(10).enumerate() {
                summary.push_str(&format!("  {}. {}\n", i + 1, issue));
            }
        }

        summary
    }
}
