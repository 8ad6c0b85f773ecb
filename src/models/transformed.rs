use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::WqiCategory;

/// A measurement after validation and type coercion, as written to storage.
///
/// `Year` and `STN Code` are stripped from the body; they survive only in the
/// blob path. `processed_timestamp` is stamped at transform time (UTC,
/// ISO 8601). The range rules on pH and the coordinates are advisory: callers
/// log violations and keep the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TransformedRecord {
    #[serde(rename = "Location Name")]
    pub location_name: Option<String>,

    #[serde(rename = "Dissolved Oxygen")]
    pub dissolved_oxygen: f64,

    #[serde(rename = "pH")]
    #[validate(range(min = 0.0, max = 14.0))]
    pub ph: f64,

    #[serde(rename = "Conductivity")]
    pub conductivity: f64,

    #[serde(rename = "BOD")]
    pub bod: f64,

    #[serde(rename = "Nitrate N + Nitrite N")]
    pub nitrate_nitrite: f64,

    #[serde(rename = "Fecal Coliform")]
    pub fecal_coliform: i64,

    #[serde(rename = "Total Coliform")]
    pub total_coliform: i64,

    #[serde(rename = "WQI")]
    pub wqi: f64,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,

    pub processed_timestamp: String,
}

impl TransformedRecord {
    pub fn wqi_category(&self) -> WqiCategory {
        WqiCategory::classify(self.wqi)
    }
}
