use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use scriber::{HttpRecognizer, RecognizerConfig, build_segments, to_subrip, to_transcript};

#[derive(Parser)]
#[command(name = "scriber")]
#[command(author, version, about = "Speech transcription to SubRip subtitles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the transcription HTTP service
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1:8000")]
        listen: SocketAddr,

        /// Base URL of the recognition service (falls back to SCRIBER_ASR_URL)
        #[arg(long)]
        asr_url: Option<String>,

        /// Model identifier requested from the recognition service
        #[arg(long)]
        model: Option<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Transcribe a single media file to SubRip
    Transcribe {
        /// Input audio/video file
        #[arg(short, long)]
        input: PathBuf,

        /// Output .srt file
        #[arg(short, long)]
        output: PathBuf,

        /// Optional output file for the JSON transcript
        #[arg(long)]
        json: Option<PathBuf>,

        /// Base URL of the recognition service (falls back to SCRIBER_ASR_URL)
        #[arg(long)]
        asr_url: Option<String>,

        /// Model identifier requested from the recognition service
        #[arg(long)]
        model: Option<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            listen,
            asr_url,
            model,
            verbose,
        } => {
            setup_logging(verbose);
            let config = recognizer_config(asr_url, model)?;
            info!(
                "Using recognition service at {} (model {})",
                config.endpoint, config.model
            );
            let recognizer = Arc::new(HttpRecognizer::new(config));
            scriber::serve(listen, recognizer)
                .await
                .context("Server failed")?;
            Ok(())
        }
        Commands::Transcribe {
            input,
            output,
            json,
            asr_url,
            model,
            verbose,
        } => {
            setup_logging(verbose);
            let config = recognizer_config(asr_url, model)?;
            transcribe_file(input, output, json, config).await
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn recognizer_config(asr_url: Option<String>, model: Option<String>) -> Result<RecognizerConfig> {
    let mut config = match asr_url {
        Some(endpoint) => {
            RecognizerConfig::new(endpoint, RecognizerConfig::DEFAULT_MODEL.to_string())
        }
        None => RecognizerConfig::from_env()
            .context("No recognition service configured (pass --asr-url or set SCRIBER_ASR_URL)")?,
    };

    if let Some(model) = model {
        config.model = model;
    }

    Ok(config)
}

async fn transcribe_file(
    input: PathBuf,
    output: PathBuf,
    json: Option<PathBuf>,
    config: RecognizerConfig,
) -> Result<()> {
    let recognizer = HttpRecognizer::new(config);

    let segments = build_segments(&recognizer, &input)
        .await
        .with_context(|| format!("Failed to transcribe {:?}", input))?;

    std::fs::write(&output, to_subrip(&segments))
        .with_context(|| format!("Failed to write {:?}", output))?;
    info!("Subtitle file written to {:?}", output);

    if let Some(path) = json {
        let file = std::fs::File::create(&path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, &to_transcript(&segments))
            .context("Failed to write JSON transcript")?;
        info!("Transcript written to {:?}", path);
    }

    Ok(())
}
