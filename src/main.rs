//! Tarjama - Spoken audio to translated subtitles
//!
//! This is the main entry point for the tarjama CLI, which drives the
//! extract -> transcribe -> translate -> serialize pipeline using ffmpeg,
//! whisper, and MarianMT models.

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tarjama::cli::{Args, Commands};
use tarjama::config::Config;
use tarjama::transcribe::ModelSize;
use tarjama::translate::marian::check_server_availability;
use tarjama::workflow::{Outcome, ProgressObserver, Workflow};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;

    // Load configuration
    let config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            // Try to load config.toml from current directory first
            if std::path::Path::new("config.toml").exists() {
                info!("Found config.toml in current directory, loading...");
                Config::from_file("config.toml")?
            } else {
                Config::default()
            }
        }
    };

    let default_model = config.transcriber.model;
    let translate_endpoint = config.translate.endpoint.clone();
    let workflow = Workflow::new(config)?;
    match workflow.media_version().await {
        Ok(version) => info!("Media tool: {}", version),
        Err(e) => warn!("Could not query media tool version: {}", e),
    }

    // Execute command
    match args.command {
        Commands::Process {
            input,
            target_lang,
            model,
            output_dir,
        } => {
            info!("Processing video file: {}", input.display());
            let model = parse_model(model, default_model)?;
            check_server_availability(&translate_endpoint).await?;
            let observer = BarObserver::new();

            let outcome = workflow
                .process_video(&input, &target_lang, model, output_dir.as_ref(), &observer)
                .await?;
            observer.finish();
            report_outcome(&outcome);
        }
        Commands::Batch {
            input_dir,
            target_lang,
            model,
            output_dir,
        } => {
            info!("Processing directory: {}", input_dir.display());
            let model = parse_model(model, default_model)?;
            check_server_availability(&translate_endpoint).await?;

            workflow
                .process_directory(&input_dir, &target_lang, model, output_dir.as_ref())
                .await?;
        }
        Commands::Extract { input, output } => {
            info!("Extracting audio from: {}", input.display());
            workflow.extract_audio(&input, &output).await?;
            println!("Audio extracted to {}", output.display());
        }
        Commands::Transcribe {
            input,
            output,
            model,
        } => {
            info!("Transcribing video: {}", input.display());
            let model = parse_model(model, default_model)?;
            workflow.transcribe_to_srt(&input, model, &output).await?;
            println!("Transcript written to {}", output.display());
        }
        Commands::Translate {
            input,
            output,
            source_lang,
            target_lang,
        } => {
            info!("Translating subtitle file: {}", input.display());
            check_server_availability(&translate_endpoint).await?;
            let observer = BarObserver::new();

            let outcome = workflow
                .translate_srt(&input, &output, &source_lang, &target_lang, &observer)
                .await?;
            observer.finish();
            report_outcome(&outcome);
        }
    }

    info!("Done");
    Ok(())
}

/// Progress bar wired into the translation pipeline as its observer
struct BarObserver {
    bar: ProgressBar,
}

impl BarObserver {
    fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} segments")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self { bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressObserver for BarObserver {
    fn on_segment(&self, done: usize, total: usize) {
        if self.bar.length() != Some(total as u64) {
            self.bar.set_length(total as u64);
        }
        self.bar.set_position(done as u64);
    }
}

fn report_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Completed { subtitle_path } => {
            println!("Subtitle file written: {}", subtitle_path.display());
        }
        Outcome::Skipped {
            detected_language,
            target_language,
        } => {
            warn!(
                "No translation model for {} -> {}; no subtitle file was generated",
                detected_language.to_uppercase(),
                target_language.to_uppercase()
            );
            println!(
                "Skipped: no translation model for {} -> {}",
                detected_language, target_language
            );
        }
    }
}

fn parse_model(cli_model: Option<String>, default_model: ModelSize) -> Result<ModelSize> {
    match cli_model {
        Some(name) => Ok(name.parse()?),
        None => Ok(default_model),
    }
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let app_dir = std::env::current_dir()?.join(".tarjama");
    let log_dir = app_dir.join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "tarjama.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(guard);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let console_layer = fmt::layer().with_target(false);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_ansi(false); // No ANSI colors in file

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
