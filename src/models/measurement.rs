use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::utils::constants::*;

/// A measurement row exactly as it arrives from the source CSV.
///
/// Every field is optional text: the stream message must reproduce the source
/// values bit-for-bit, so typing is deferred to the transformer. Field names
/// are serialized under the original survey headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RawMeasurement {
    #[serde(rename = "STN Code")]
    pub stn_code: Option<String>,

    #[serde(rename = "Location Name")]
    pub location_name: Option<String>,

    #[serde(rename = "Year")]
    pub year: Option<String>,

    #[serde(rename = "Dissolved Oxygen")]
    pub dissolved_oxygen: Option<String>,

    #[serde(rename = "pH")]
    pub ph: Option<String>,

    #[serde(rename = "Conductivity")]
    pub conductivity: Option<String>,

    #[serde(rename = "BOD")]
    pub bod: Option<String>,

    #[serde(rename = "Nitrate N + Nitrite N")]
    pub nitrate_nitrite: Option<String>,

    #[serde(rename = "Fecal Coliform")]
    pub fecal_coliform: Option<String>,

    #[serde(rename = "Total Coliform")]
    pub total_coliform: Option<String>,

    #[serde(rename = "WQI")]
    pub wqi: Option<String>,

    #[serde(rename = "lat")]
    pub lat: Option<String>,

    #[serde(rename = "lon")]
    pub lon: Option<String>,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

impl RawMeasurement {
    /// Routing key for the stream: station code and year joined by '_'
    pub fn partition_key(&self) -> Result<String> {
        let stn_code = self
            .stn_code
            .as_deref()
            .ok_or_else(|| PipelineError::MissingField(FIELD_STN_CODE.to_string()))?;
        let year = self
            .year
            .as_deref()
            .ok_or_else(|| PipelineError::MissingField(FIELD_YEAR.to_string()))?;

        Ok(format!("{}_{}", stn_code, year))
    }

    /// Station/year identity used in log messages ("unknown" when absent)
    pub fn identity(&self) -> String {
        format!(
            "{}_{}",
            self.stn_code.as_deref().unwrap_or("unknown"),
            self.year.as_deref().unwrap_or("unknown")
        )
    }

    /// Names of required fields that are absent or blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let fields: [(&'static str, &Option<String>); 13] = [
            (FIELD_STN_CODE, &self.stn_code),
            (FIELD_DISSOLVED_OXYGEN, &self.dissolved_oxygen),
            (FIELD_LOCATION_NAME, &self.location_name),
            (FIELD_YEAR, &self.year),
            (FIELD_PH, &self.ph),
            (FIELD_CONDUCTIVITY, &self.conductivity),
            (FIELD_BOD, &self.bod),
            (FIELD_NITRATE_NITRITE, &self.nitrate_nitrite),
            (FIELD_FECAL_COLIFORM, &self.fecal_coliform),
            (FIELD_TOTAL_COLIFORM, &self.total_coliform),
            (FIELD_WQI, &self.wqi),
            (FIELD_LAT, &self.lat),
            (FIELD_LON, &self.lon),
        ];

        fields
            .iter()
            .filter(|(_, value)| is_blank(value))
            .map(|(name, _)| *name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> RawMeasurement {
        RawMeasurement {
            stn_code: Some("1393".to_string()),
            location_name: Some("Chilika Lake".to_string()),
            year: Some("2019".to_string()),
            dissolved_oxygen: Some("6.6".to_string()),
            ph: Some("7.8".to_string()),
            conductivity: Some("236.0".to_string()),
            bod: Some("1.2".to_string()),
            nitrate_nitrite: Some("0.32".to_string()),
            fecal_coliform: Some("43".to_string()),
            total_coliform: Some("98".to_string()),
            wqi: Some("61.5".to_string()),
            lat: Some("19.7".to_string()),
            lon: Some("85.3".to_string()),
        }
    }

    #[test]
    fn test_partition_key() {
        let record = sample();
        assert_eq!(record.partition_key().unwrap(), "1393_2019");
    }

    #[test]
    fn test_partition_key_missing_station() {
        let mut record = sample();
        record.stn_code = None;
        assert!(record.partition_key().is_err());
    }

    #[test]
    fn test_missing_fields() {
        let mut record = sample();
        assert!(record.missing_fields().is_empty());

        record.ph = None;
        record.wqi = Some("  ".to_string());
        assert_eq!(record.missing_fields(), vec![FIELD_PH, FIELD_WQI]);
    }

    #[test]
    fn test_wire_round_trip_is_exact() {
        let record = sample();
        let encoded = serde_json::to_string(&record).unwrap();
        let decoded: RawMeasurement = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_wire_keys_use_original_headers() {
        let encoded = serde_json::to_value(sample()).unwrap();
        let object = encoded.as_object().unwrap();

        assert!(object.contains_key("STN Code"));
        assert!(object.contains_key("Nitrate N + Nitrite N"));
        assert!(object.contains_key("pH"));
        assert!(object.contains_key("lat"));
    }
}
