//! Configuration types for the analysis pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Dataset location used when nothing else is configured.
pub const DEFAULT_DATASET_PATH: &str = "res/All_Diets.csv";

/// Number of recipes kept per diet in protein rankings.
pub const DEFAULT_TOP_N: usize = 5;

/// Rows scanned when inferring the CSV schema.
pub const DEFAULT_INFER_SCHEMA_LENGTH: usize = 100;

/// Configuration for the analysis pipeline.
///
/// Use [`AnalysisConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use diet_analysis::config::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .dataset_path("data/recipes.csv")
///     .top_n(10)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Path to the comma-delimited recipe dataset.
    /// Default: "res/All_Diets.csv"
    pub dataset_path: PathBuf,

    /// Number of recipes kept per diet when ranking by protein.
    /// Default: 5
    pub top_n: usize,

    /// Rows used for CSV schema inference. `None` scans the whole file.
    /// Default: Some(100)
    pub infer_schema_length: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            top_n: DEFAULT_TOP_N,
            infer_schema_length: Some(DEFAULT_INFER_SCHEMA_LENGTH),
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.top_n == 0 {
            return Err(ConfigValidationError::InvalidTopN(self.top_n));
        }

        if self.infer_schema_length == Some(0) {
            return Err(ConfigValidationError::InvalidInferSchemaLength);
        }

        if self.dataset_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyDatasetPath);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid top_n: {0} (must be at least 1)")]
    InvalidTopN(usize),

    #[error("Invalid infer_schema_length: 0 rows cannot describe a schema")]
    InvalidInferSchemaLength,

    #[error("Dataset path must not be empty")]
    EmptyDatasetPath,
}

impl From<ConfigValidationError> for crate::error::AnalysisError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::AnalysisError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    dataset_path: Option<PathBuf>,
    top_n: Option<usize>,
    infer_schema_length: Option<Option<usize>>,
}

impl AnalysisConfigBuilder {
    /// Set the dataset path.
    pub fn dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset_path = Some(path.into());
        self
    }

    /// Set how many recipes per diet the protein ranking keeps.
    pub fn top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n);
        self
    }

    /// Set the number of rows used for schema inference.
    ///
    /// Pass `None` to scan the whole file.
    pub fn infer_schema_length(mut self, rows: Option<usize>) -> Self {
        self.infer_schema_length = Some(rows);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let config = AnalysisConfig {
            dataset_path: self
                .dataset_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH)),
            top_n: self.top_n.unwrap_or(DEFAULT_TOP_N),
            infer_schema_length: self
                .infer_schema_length
                .unwrap_or(Some(DEFAULT_INFER_SCHEMA_LENGTH)),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.dataset_path, PathBuf::from("res/All_Diets.csv"));
        assert_eq!(config.top_n, 5);
        assert_eq!(config.infer_schema_length, Some(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_matches_default() {
        let built = AnalysisConfig::builder().build().unwrap();
        assert_eq!(built, AnalysisConfig::default());
    }

    #[test]
    fn test_builder_overrides() {
        let config = AnalysisConfig::builder()
            .dataset_path("data/recipes.csv")
            .top_n(3)
            .infer_schema_length(None)
            .build()
            .unwrap();

        assert_eq!(config.dataset_path, PathBuf::from("data/recipes.csv"));
        assert_eq!(config.top_n, 3);
        assert_eq!(config.infer_schema_length, None);
    }

    #[test]
    fn test_zero_top_n_rejected() {
        let result = AnalysisConfig::builder().top_n(0).build();
        assert!(matches!(result, Err(ConfigValidationError::InvalidTopN(0))));
    }

    #[test]
    fn test_zero_schema_length_rejected() {
        let result = AnalysisConfig::builder().infer_schema_length(Some(0)).build();
        assert!(matches!(
            result,
            Err(ConfigValidationError::InvalidInferSchemaLength)
        ));
    }

    #[test]
    fn test_empty_dataset_path_rejected() {
        let result = AnalysisConfig::builder().dataset_path("").build();
        assert!(matches!(result, Err(ConfigValidationError::EmptyDatasetPath)));
    }

    #[test]
    fn test_validation_error_converts_to_analysis_error() {
        let err: crate::error::AnalysisError = ConfigValidationError::InvalidTopN(0).into();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = AnalysisConfig::builder().top_n(7).build().unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let back: AnalysisConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
