use clap::Parser;
use sketch_score::domain::model::SubmissionRequest;
use sketch_score::utils::{data_url, logger, validation::Validate};
use sketch_score::{CliConfig, LocalStorage, MatchEngine, ScoreError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting sketch-score CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(3);
    }

    let storage = LocalStorage::new(config.output_dir.clone());

    match run(storage, config).await {
        Ok(()) => {
            tracing::info!("✅ Scoring completed successfully");
        }
        Err(e) => {
            tracing::error!(
                "❌ Scoring failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                sketch_score::utils::error::ErrorSeverity::Low => 1,
                sketch_score::utils::error::ErrorSeverity::Medium => 1,
                sketch_score::utils::error::ErrorSeverity::High => 2,
                sketch_score::utils::error::ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(storage: LocalStorage, config: CliConfig) -> Result<(), ScoreError> {
    let engine = MatchEngine::initialize(storage, config.clone()).await?;

    let drawn_bytes = tokio::fs::read(&config.input).await?;
    let response = engine.score_bytes(&drawn_bytes)?;

    println!("{}", serde_json::to_string(&response)?);

    if config.submit {
        let receipt = engine
            .submit(SubmissionRequest {
                image: data_url::encode_png_data_url(&drawn_bytes),
                accuracy: response.score,
                auto_submit: config.auto,
                time_taken: config.time_taken,
            })
            .await?;
        tracing::info!("📁 Submission saved as: {}", receipt.filename);
        println!("{}", receipt.message);
    }

    Ok(())
}
