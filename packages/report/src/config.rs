//! Run configuration loaded from TOML.
//!
//! ```toml
//! summary_columns = ["type", "status", "official"]
//!
//! [reference]
//! latitude = 39.09029667468314
//! longitude = -84.49260971579635
//! altitude = 156.058
//!
//! [classifier]
//! report_attribute = "official"
//! report_value = "REPORT"
//! ```
//!
//! Every field is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};
use trail_report_feature_models::Attributes;
use trail_report_geodesy::{DEFAULT_REFERENCE, GeodeticPoint, LocalFrame};

use crate::ReportError;

/// Attributes summarised when none are configured.
pub const DEFAULT_SUMMARY_COLUMNS: &[&str] = &["type", "status", "official"];

/// Everything that parameterises one report run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Attributes to build summary tables for, in output order.
    pub summary_columns: Vec<String>,
    /// Origin of the local East-North-Up frame.
    pub reference: GeodeticPoint,
    pub classifier: ClassifierConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            summary_columns: DEFAULT_SUMMARY_COLUMNS
                .iter()
                .map(ToString::to_string)
                .collect(),
            reference: DEFAULT_REFERENCE,
            classifier: ClassifierConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Parses and validates a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Toml`] for malformed TOML and
    /// [`ReportError::Config`] if validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ReportError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if the file cannot be read, otherwise
    /// as [`Self::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Checks the fields serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Config`] for blank summary columns or a blank
    /// classifier attribute. The reference point is checked by
    /// [`Self::frame`].
    pub fn validate(&self) -> Result<(), ReportError> {
        if let Some(position) = self.summary_columns.iter().position(|c| c.trim().is_empty()) {
            return Err(ReportError::Config {
                message: format!("summary_columns[{position}] is blank"),
            });
        }
        if self.classifier.report_attribute.trim().is_empty() {
            return Err(ReportError::Config {
                message: "classifier.report_attribute is blank".to_string(),
            });
        }
        Ok(())
    }

    /// Builds the WGS84 local frame anchored at the configured reference.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Geodesy`] wrapping
    /// [`GeodesyError::InvalidReference`](trail_report_geodesy::GeodesyError::InvalidReference)
    /// if the reference is out of range or not finite.
    pub fn frame(&self) -> Result<LocalFrame, ReportError> {
        Ok(LocalFrame::wgs84(self.reference)?)
    }
}

/// How report regions are told apart from plain regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Attribute holding the report flag. Matched ignoring ASCII case.
    pub report_attribute: String,
    /// Flag value marking a report region. Matched ignoring ASCII case.
    pub report_value: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            report_attribute: "official".to_string(),
            report_value: "REPORT".to_string(),
        }
    }
}

impl ClassifierConfig {
    /// Returns `true` if `attributes` flag their feature as a report region.
    #[must_use]
    pub fn is_report(&self, attributes: &Attributes) -> bool {
        attributes
            .get_ignore_case(&self.report_attribute)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case(&self.report_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trail_report_geodesy::GeodesyError;

    #[test]
    fn empty_config_uses_defaults() {
        let config = ReportConfig::from_toml_str("").unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.summary_columns, vec!["type", "status", "official"]);
        assert_eq!(config.reference, DEFAULT_REFERENCE);
        assert_eq!(config.classifier.report_value, "REPORT");
    }

    #[test]
    fn parses_every_section() {
        let config = ReportConfig::from_toml_str(
            r#"
            summary_columns = ["status"]

            [reference]
            latitude = 45.0
            longitude = -120.5

            [classifier]
            report_attribute = "kind"
            report_value = "area"
            "#,
        )
        .unwrap();

        assert_eq!(config.summary_columns, vec!["status"]);
        assert!((config.reference.latitude - 45.0).abs() < f64::EPSILON);
        assert!(config.reference.altitude.abs() < f64::EPSILON);
        assert_eq!(config.classifier.report_attribute, "kind");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = ReportConfig::from_toml_str("summary_colums = [\"type\"]");
        assert!(matches!(result, Err(ReportError::Toml(_))));
    }

    #[test]
    fn out_of_range_reference_fails_when_building_the_frame() {
        let config =
            ReportConfig::from_toml_str("[reference]\nlatitude = 91.0\nlongitude = 0.0").unwrap();
        assert!(matches!(
            config.frame(),
            Err(ReportError::Geodesy(GeodesyError::InvalidReference { .. }))
        ));
    }

    #[test]
    fn blank_summary_column_is_a_config_error() {
        let result = ReportConfig::from_toml_str("summary_columns = [\"type\", \" \"]");
        assert!(matches!(result, Err(ReportError::Config { message }) if message.contains("[1]")));
    }

    #[test]
    fn report_flag_ignores_case() {
        let classifier = ClassifierConfig::default();
        let flagged: Attributes = [("Official", "report")].into_iter().collect();
        let plain: Attributes = [("official", "yes")].into_iter().collect();
        assert!(classifier.is_report(&flagged));
        assert!(!classifier.is_report(&plain));
        assert!(!classifier.is_report(&Attributes::new()));
    }
}
