pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::LocalStorage;

pub use crate::core::scorer::{score_masks, ShapeScorer};
pub use crate::core::service::MatchEngine;
pub use domain::model::{
    BinaryMask, MatchResponse, SubmissionMode, SubmissionRequest, CANVAS_SIZE,
};
pub use utils::error::{Result, ScoreError};
