// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use subrelay::app_config::{AppConfig, LogLevel};
use subrelay::notify::MessageSubtitleSink;
use subrelay::pipeline::ResolutionPipeline;
use subrelay::queue::ChannelTranslationQueue;
use subrelay::search::OpenSubtitlesClient;
use subrelay::store::{DatabaseConnection, SubtitleRepository};

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// subrelay - subtitle resolution and translation relay
///
/// Serves a subtitle addon that answers from its store, falls back to
/// OpenSubtitles, and schedules asynchronous translation when the found
/// subtitles are not in the requested language.
#[derive(Parser, Debug)]
#[command(name = "subrelay")]
#[command(version)]
#[command(about = "Subtitle resolution and translation relay")]
struct CommandLineOptions {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Override the configured listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the configured public base URL
    #[arg(long)]
    public_url: Option<String>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[0m",
            Level::Debug => "\x1B[1;34m",
            Level::Trace => "\x1B[2m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Load the configuration file, creating a default one on first run
fn load_config(path: &str) -> Result<AppConfig> {
    if std::path::Path::new(path).exists() {
        AppConfig::from_file(path)
    } else {
        let config = AppConfig::default();
        config
            .save(path)
            .with_context(|| format!("Failed to write default config to {}", path))?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let options = CommandLineOptions::parse();

    let mut config = load_config(&options.config_path)?;
    if let Some(port) = options.port {
        config.port = port;
    }
    if let Some(public_url) = options.public_url {
        config.public_url = public_url;
    }
    config.validate()?;

    let log_level = options
        .log_level
        .map(LogLevel::from)
        .unwrap_or(config.log_level);
    CustomLogger::init(log_level.to_level_filter())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    info!("subrelay v{} starting", env!("CARGO_PKG_VERSION"));

    let db = match &config.database_path {
        Some(path) => DatabaseConnection::new(path)?,
        None => DatabaseConnection::new_default()?,
    };
    let store = Arc::new(SubtitleRepository::new(db));

    let (queue, mut jobs) = ChannelTranslationQueue::channel();

    // The worker population consumes this channel in a full deployment. The
    // relay binary only logs the hand-off; keeping the receiver alive keeps
    // pushes from failing when no worker is attached.
    tokio::spawn(async move {
        while let Some(job) = jobs.recv().await {
            warn!(
                "Translation job {} ({} s{}e{} -> {}) handed off with no worker attached",
                job.id, job.imdb_id, job.season, job.episode, job.target_language
            );
        }
    });

    let data_dir: PathBuf = config.data_dir.clone();
    let pipeline = Arc::new(ResolutionPipeline::new(
        config.public_url.clone(),
        store,
        Arc::new(OpenSubtitlesClient::new()),
        Arc::new(queue),
        Arc::new(MessageSubtitleSink::new(data_dir)),
    ));

    subrelay::server::serve(&config, pipeline).await
}
