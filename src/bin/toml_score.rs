use anyhow::Context;
use clap::Parser;
use sketch_score::config::toml_config::TomlConfig;
use sketch_score::domain::model::SubmissionRequest;
use sketch_score::utils::{data_url, logger, validation::Validate};
use sketch_score::{LocalStorage, MatchEngine};

#[derive(Parser)]
#[command(name = "toml-score")]
#[command(about = "Drawing similarity scoring with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "score-config.toml")]
    config: String,

    /// Drawing to score against the configured reference
    #[arg(short, long)]
    input: String,

    /// Record the drawing as a submission after scoring
    #[arg(long)]
    submit: bool,

    /// Mark the submission as timer-driven rather than user-driven
    #[arg(long)]
    auto: bool,

    /// Seconds spent drawing
    #[arg(long, default_value = "0")]
    time_taken: u64,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Dry run - validate configuration without scoring anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(3);
        }
    };

    if config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose || config.verbose());
    }

    tracing::info!("🚀 Starting TOML-based scoring tool");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(3);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - configuration is valid, nothing scored");
        return Ok(());
    }

    use sketch_score::domain::ports::ConfigProvider;
    let storage = LocalStorage::new(config.output_dir().to_string());
    let engine = MatchEngine::initialize(storage, config)
        .await
        .context("engine initialization failed")?;

    let drawn_bytes = tokio::fs::read(&args.input)
        .await
        .with_context(|| format!("failed to read drawing '{}'", args.input))?;
    let response = engine.score_bytes(&drawn_bytes)?;

    println!("{}", serde_json::to_string(&response)?);

    if args.submit {
        let receipt = engine
            .submit(SubmissionRequest {
                image: data_url::encode_png_data_url(&drawn_bytes),
                accuracy: response.score,
                auto_submit: args.auto,
                time_taken: args.time_taken,
            })
            .await?;
        tracing::info!("📁 Submission saved as: {}", receipt.filename);
        println!("{}", receipt.message);
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    use sketch_score::domain::ports::ConfigProvider;

    tracing::info!("📋 Pipeline: {}", config.pipeline.name);
    if let Some(description) = &config.pipeline.description {
        tracing::info!("   {}", description);
    }
    tracing::info!("🖼  Reference: {}", config.reference_path());
    tracing::info!("✏  Drawing: {}", args.input);
    tracing::info!("📂 Output dir: {}", config.output_dir());
    tracing::info!("🗒  Log file: {}", config.log_filename());
}
