use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "sketch-score")]
#[command(about = "Score a drawn image against a reference silhouette")]
pub struct CliConfig {
    /// Reference silhouette image, loaded once at startup
    #[arg(long, default_value = "static/reference.png")]
    pub reference: String,

    /// Drawing to score against the reference
    #[arg(long)]
    pub input: String,

    /// Directory receiving submitted drawings and the log
    #[arg(long, default_value = "./static")]
    pub output_dir: String,

    /// Submission log filename inside the output directory
    #[arg(long, default_value = "submissions_log.csv")]
    pub log_file: String,

    /// Record the drawing as a submission after scoring
    #[arg(long)]
    pub submit: bool,

    /// Mark the submission as timer-driven rather than user-driven
    #[arg(long)]
    pub auto: bool,

    /// Seconds spent drawing, recorded with the submission
    #[arg(long, default_value = "0")]
    pub time_taken: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn reference_path(&self) -> &str {
        &self.reference
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn log_filename(&self) -> &str {
        &self.log_file
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("reference", &self.reference)?;
        validation::validate_file_extension("reference", &self.reference, &["png", "jpg", "jpeg"])?;
        validation::validate_path("input", &self.input)?;
        validation::validate_path("output_dir", &self.output_dir)?;
        validation::validate_non_empty_string("log_file", &self.log_file)?;
        Ok(())
    }
}
