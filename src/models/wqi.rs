use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::constants::{WQI_EXCELLENT_MAX, WQI_GOOD_MAX, WQI_POOR_MAX, WQI_VERY_POOR_MAX};

/// Water Quality Index band.
///
/// Boundary values (50, 100, 200, 300) belong to the lower band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WqiCategory {
    Excellent,
    Good,
    Poor,
    VeryPoor,
    Unsuitable,
}

impl WqiCategory {
    pub fn classify(wqi: f64) -> Self {
        if wqi < WQI_EXCELLENT_MAX {
            WqiCategory::Excellent
        } else if wqi <= WQI_GOOD_MAX {
            WqiCategory::Good
        } else if wqi <= WQI_POOR_MAX {
            WqiCategory::Poor
        } else if wqi <= WQI_VERY_POOR_MAX {
            WqiCategory::VeryPoor
        } else {
            WqiCategory::Unsuitable
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WqiCategory::Excellent => "Excellent",
            WqiCategory::Good => "Good",
            WqiCategory::Poor => "Poor",
            WqiCategory::VeryPoor => "Very Poor",
            WqiCategory::Unsuitable => "Unsuitable for Drinking",
        }
    }

    pub fn is_potable(&self) -> bool {
        matches!(self, WqiCategory::Excellent | WqiCategory::Good)
    }
}

impl fmt::Display for WqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_bands() {
        assert_eq!(WqiCategory::classify(49.9), WqiCategory::Excellent);
        assert_eq!(WqiCategory::classify(75.0), WqiCategory::Good);
        assert_eq!(WqiCategory::classify(150.0), WqiCategory::Poor);
        assert_eq!(WqiCategory::classify(250.0), WqiCategory::VeryPoor);
        assert_eq!(WqiCategory::classify(301.0), WqiCategory::Unsuitable);
    }

    #[test]
    fn test_boundaries_belong_to_lower_band() {
        assert_eq!(WqiCategory::classify(50.0), WqiCategory::Good);
        assert_eq!(WqiCategory::classify(100.0), WqiCategory::Good);
        assert_eq!(WqiCategory::classify(200.0), WqiCategory::Poor);
        assert_eq!(WqiCategory::classify(300.0), WqiCategory::VeryPoor);
    }

    #[test]
    fn test_labels() {
        assert_eq!(WqiCategory::VeryPoor.label(), "Very Poor");
        assert_eq!(WqiCategory::Unsuitable.to_string(), "Unsuitable for Drinking");
    }

    #[test]
    fn test_potability() {
        assert!(WqiCategory::classify(30.0).is_potable());
        assert!(!WqiCategory::classify(150.0).is_potable());
    }
}
