//! Service facade tying the scoring pipeline to its collaborators.
//!
//! [`MatchEngine`] owns the memoized reference scorer plus the storage and
//! configuration ports. The surrounding request layer (HTTP or CLI) calls
//! [`compare`](MatchEngine::compare) per drawing and
//! [`submit`](MatchEngine::submit) when a drawing is persisted.

use crate::core::normalize;
use crate::core::scorer::ShapeScorer;
use crate::domain::model::{
    MatchResponse, SubmissionMode, SubmissionReceipt, SubmissionRecord, SubmissionRequest,
};
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::data_url;
use crate::utils::error::{Result, ScoreError};

pub struct MatchEngine<S: Storage, C: ConfigProvider> {
    scorer: ShapeScorer,
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> std::fmt::Debug for MatchEngine<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchEngine")
            .field("reference", &self.config.reference_path())
            .finish_non_exhaustive()
    }
}

impl<S: Storage, C: ConfigProvider> MatchEngine<S, C> {
    /// Load and normalize the reference image, then build the engine.
    ///
    /// Runs eagerly at startup: a process without a valid reference must
    /// not serve comparison requests, so any failure here is fatal rather
    /// than deferred to the request path.
    pub async fn initialize(storage: S, config: C) -> Result<Self> {
        let path = config.reference_path().to_string();
        tracing::info!("Loading reference image from: {}", path);

        let reference_bytes =
            tokio::fs::read(&path)
                .await
                .map_err(|e| ScoreError::ReferenceError {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;

        let scorer =
            ShapeScorer::from_bytes(&reference_bytes).map_err(|e| ScoreError::ReferenceError {
                path,
                reason: e.to_string(),
            })?;

        tracing::debug!("Reference descriptor memoized");
        Ok(Self {
            scorer,
            storage,
            config,
        })
    }

    /// Score a drawing submitted as a data URL against the reference.
    pub async fn compare(&self, drawn_data_url: &str) -> Result<MatchResponse> {
        let drawn_bytes = data_url::decode_data_url(drawn_data_url)?;
        self.score_bytes(&drawn_bytes)
    }

    /// Score raw encoded image bytes against the reference.
    pub fn score_bytes(&self, drawn_bytes: &[u8]) -> Result<MatchResponse> {
        let mask = normalize::normalize(drawn_bytes)?;
        let score = self.scorer.score(&mask);
        tracing::debug!(score, "Drawing scored");
        Ok(MatchResponse { score })
    }

    /// Persist a submitted drawing: save the image file and append one row
    /// to the CSV log. The generated filename embeds mode, accuracy,
    /// elapsed time, and a second-resolution timestamp; identical
    /// submissions within the same second reuse the same name.
    pub async fn submit(&self, request: SubmissionRequest) -> Result<SubmissionReceipt> {
        let image_bytes = data_url::decode_data_url(&request.image)?;
        let mode = SubmissionMode::from_auto_flag(request.auto_submit);
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        let filename = format!(
            "submission_{}_{}_{}s_{}.png",
            mode.label(),
            request.accuracy as i64,
            request.time_taken,
            timestamp
        );

        tracing::info!("Saving submission to: {}", filename);
        self.storage.write_file(&filename, &image_bytes).await?;

        let record = SubmissionRecord {
            timestamp,
            accuracy: request.accuracy,
            time_taken: request.time_taken,
            submission_type: mode.label().to_string(),
            filename: filename.clone(),
        };
        self.append_log_row(&record).await?;

        Ok(SubmissionReceipt {
            message: format!(
                "Drawing submitted! Accuracy: {}%, Time Taken: {}s",
                request.accuracy, request.time_taken
            ),
            filename,
        })
    }

    async fn append_log_row(&self, record: &SubmissionRecord) -> Result<()> {
        let log_name = self.config.log_filename();
        // Header goes in only when the log is first created.
        let write_header = !self.storage.file_exists(log_name).await?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(Vec::new());
        writer.serialize(record)?;
        let row = writer
            .into_inner()
            .map_err(|e| ScoreError::IoError(e.into_error()))?;

        self.storage.append_file(log_name, &row).await?;
        tracing::debug!("Submission logged to {}", log_name);
        Ok(())
    }
}
