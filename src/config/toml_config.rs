use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, ScoreError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub scoring: ScoringConfig,
    pub submission: SubmissionConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Reference silhouette image path.
    pub reference: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionConfig {
    pub output_dir: String,
    pub log_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScoreError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ScoreError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` placeholders with environment values; unknown
    /// variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").expect("static regex must compile");

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn reference_path(&self) -> &str {
        &self.scoring.reference
    }

    fn output_dir(&self) -> &str {
        &self.submission.output_dir
    }

    fn log_filename(&self) -> &str {
        self.submission
            .log_file
            .as_deref()
            .unwrap_or("submissions_log.csv")
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("pipeline.name", &self.pipeline.name)?;
        validation::validate_path("scoring.reference", &self.scoring.reference)?;
        validation::validate_file_extension(
            "scoring.reference",
            &self.scoring.reference,
            &["png", "jpg", "jpeg"],
        )?;
        validation::validate_path("submission.output_dir", &self.submission.output_dir)?;
        if let Some(log_file) = &self.submission.log_file {
            validation::validate_non_empty_string("submission.log_file", log_file)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[pipeline]
name = "sketch-score"
description = "drawing similarity scoring"

[scoring]
reference = "static/reference.png"

[submission]
output_dir = "./static"
log_file = "submissions_log.csv"

[logging]
verbose = true
"#;

    #[test]
    fn parses_full_config() {
        let config = TomlConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.reference_path(), "static/reference.png");
        assert_eq!(config.output_dir(), "./static");
        assert_eq!(config.log_filename(), "submissions_log.csv");
        assert!(config.verbose());
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn log_filename_falls_back_to_default() {
        let without_log = SAMPLE.replace("log_file = \"submissions_log.csv\"\n", "");
        let config = TomlConfig::from_toml_str(&without_log).unwrap();
        assert_eq!(config.log_filename(), "submissions_log.csv");
    }

    #[test]
    fn substitutes_environment_variables() {
        std::env::set_var("SKETCH_SCORE_TEST_REF", "custom/ref.png");
        let content = SAMPLE.replace("static/reference.png", "${SKETCH_SCORE_TEST_REF}");
        let config = TomlConfig::from_toml_str(&content).unwrap();
        assert_eq!(config.reference_path(), "custom/ref.png");
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = TomlConfig::from_toml_str("not [valid toml").unwrap_err();
        assert!(matches!(err, ScoreError::ConfigValidationError { .. }));
    }
}
