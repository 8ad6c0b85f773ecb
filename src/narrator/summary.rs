use std::collections::HashMap;

use crate::error::{PipelineError, Result};
use crate::models::WqiCategory;
use crate::utils::constants::RESPONSE_MARKER;

/// The ten query parameters every summary request must carry
#[derive(Debug, Clone, PartialEq)]
pub struct LakeSummaryParams {
    pub lake: String,
    pub dissolved_oxygen: f64,
    pub year: i64,
    pub ph: f64,
    pub conductivity: f64,
    pub bod: f64,
    pub nitrate_nitrite: f64,
    pub fecal_coliform: i64,
    pub total_coliform: i64,
    pub wqi: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn text_param(query: &HashMap<String, String>, name: &str) -> Result<String> {
    query
        .get(name)
        .map(|v| v.to_string())
        .ok_or_else(|| PipelineError::MissingField(name.to_string()))
}

fn f64_param(query: &HashMap<String, String>, name: &str) -> Result<f64> {
    let text = text_param(query, name)?;
    let value = text.trim().parse::<f64>().map_err(|_| {
        PipelineError::InvalidFormat(format!("parameter '{}' is not numeric: '{}'", name, text))
    })?;
    Ok(round2(value))
}

fn i64_param(query: &HashMap<String, String>, name: &str) -> Result<i64> {
    let text = text_param(query, name)?;
    text.trim().parse::<i64>().map_err(|_| {
        PipelineError::InvalidFormat(format!("parameter '{}' is not an integer: '{}'", name, text))
    })
}

impl LakeSummaryParams {
    /// Parse and round the raw query map; any absent or malformed value fails
    pub fn from_query(query: &HashMap<String, String>) -> Result<Self> {
        Ok(Self {
            lake: text_param(query, "lake")?,
            dissolved_oxygen: f64_param(query, "dissolved_oxygen")?,
            year: i64_param(query, "year")?,
            ph: f64_param(query, "ph")?,
            conductivity: f64_param(query, "conductivity")?,
            bod: f64_param(query, "bod")?,
            nitrate_nitrite: f64_param(query, "nitrate_nitrite")?,
            fecal_coliform: i64_param(query, "fecal_coliform")?,
            total_coliform: i64_param(query, "total_coliform")?,
            wqi: f64_param(query, "wqi")?,
        })
    }

    pub fn wqi_category(&self) -> WqiCategory {
        WqiCategory::classify(self.wqi)
    }
}

/// Fixed-template assessment embedding every measurement and the WQI band
pub fn render_summary(params: &LakeSummaryParams, category: WqiCategory) -> String {
    format!(
        "The lake '{lake}' was assessed in the year {year}. The key parameters measured \
         include a dissolved oxygen level of {dissolved_oxygen} mg/L, pH of {ph}, conductivity of {conductivity} µS/cm, \
         biological oxygen demand (BOD) of {bod} mg/L, and nitrate plus nitrite levels of {nitrate_nitrite} mg/L. Additionally, \
         fecal coliform counts were reported at {fecal_coliform} CFU/100mL, while total coliform counts were {total_coliform} CFU/100mL. \
         Based on these parameters, the Water Quality Index (WQI) was calculated to be {wqi}, which falls under the '{category}' category. \
         Overall, the water quality of this lake is considered '{category}'.",
        lake = params.lake,
        year = params.year,
        dissolved_oxygen = params.dissolved_oxygen,
        ph = params.ph,
        conductivity = params.conductivity,
        bod = params.bod,
        nitrate_nitrite = params.nitrate_nitrite,
        fecal_coliform = params.fecal_coliform,
        total_coliform = params.total_coliform,
        wqi = params.wqi,
        category = category,
    )
}

/// Wrap the assessment in the generation prompt, ending at the response marker
pub fn build_prompt(lake: &str, summary: &str) -> String {
    format!(
        "Write a description of the current water quality in {}, highlighting pollutants, \
         health risks, and recommendations for vulnerable groups.\n\n{}\n\n{}",
        lake, RESPONSE_MARKER, summary
    )
}

/// Continuation text after the response marker in the decoded model output
pub fn extract_response(output: &str) -> Result<String> {
    let index = output.find(RESPONSE_MARKER).ok_or_else(|| {
        PipelineError::Generation(format!(
            "marker '{}' not found in model output",
            RESPONSE_MARKER
        ))
    })?;

    Ok(output[index + RESPONSE_MARKER.len()..].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn query() -> HashMap<String, String> {
        let pairs = [
            ("lake", "Chilika Lake"),
            ("dissolved_oxygen", "6.638"),
            ("year", "2019"),
            ("ph", "7.8"),
            ("conductivity", "236.0"),
            ("bod", "1.2"),
            ("nitrate_nitrite", "0.32"),
            ("fecal_coliform", "43"),
            ("total_coliform", "98"),
            ("wqi", "61.5"),
        ];
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_params_parse_and_round() {
        let params = LakeSummaryParams::from_query(&query()).unwrap();
        assert_eq!(params.lake, "Chilika Lake");
        assert_eq!(params.dissolved_oxygen, 6.64);
        assert_eq!(params.year, 2019);
        assert_eq!(params.wqi_category(), WqiCategory::Good);
    }

    #[test]
    fn test_missing_parameter_fails() {
        let mut q = query();
        q.remove("ph");
        assert!(LakeSummaryParams::from_query(&q).is_err());
    }

    #[test]
    fn test_non_numeric_parameter_fails() {
        let mut q = query();
        q.insert("ph".to_string(), "abc".to_string());
        assert!(LakeSummaryParams::from_query(&q).is_err());
    }

    #[test]
    fn test_summary_embeds_values_and_category() {
        let params = LakeSummaryParams::from_query(&query()).unwrap();
        let summary = render_summary(&params, params.wqi_category());

        assert!(summary.contains("Chilika Lake"));
        assert!(summary.contains("pH of 7.8"));
        assert!(summary.contains("61.5"));
        assert!(summary.contains("'Good'"));
    }

    #[test]
    fn test_prompt_ends_with_marker_then_summary() {
        let prompt = build_prompt("Chilika Lake", "Assessment text.");
        assert!(prompt.contains("water quality in Chilika Lake"));

        let marker_at = prompt.find(RESPONSE_MARKER).unwrap();
        assert!(prompt[marker_at..].contains("Assessment text."));
    }

    #[test]
    fn test_extract_response() {
        let output = "Some preamble.\n\nResponse:\n\nThe lake is in good shape.";
        assert_eq!(
            extract_response(output).unwrap(),
            "The lake is in good shape."
        );
    }

    #[test]
    fn test_extract_response_without_marker_fails() {
        let err = extract_response("no marker here").unwrap_err();
        assert!(matches!(err, PipelineError::Generation(_)));
    }
}
