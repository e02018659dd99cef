use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

/// Application configuration module
/// This module handles the service-level configuration (loaded once at
/// startup) and the per-request options carried in each addon request.
/// Translation backend selected by the caller's configuration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TranslationProvider {
    // @provider: Google Translate (free endpoint)
    #[default]
    #[serde(rename = "Google Translate")]
    GoogleTranslate,
    // @provider: ChatGPT API (OpenAI-compatible endpoints)
    #[serde(rename = "ChatGPT API")]
    ChatGptApi,
}

impl TranslationProvider {
    // @returns: Human-facing provider name, as used on the configuration surface
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::GoogleTranslate => "Google Translate",
            Self::ChatGptApi => "ChatGPT API",
        }
    }

    // @returns: Stable slug used in resource paths
    pub fn slug(&self) -> &'static str {
        match self {
            Self::GoogleTranslate => "google-translate",
            Self::ChatGptApi => "chatgpt-api",
        }
    }
}

// The Display output feeds resource paths and must stay stable: the
// translation workers compute the same paths from the same slugs.
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Google Translate" | "google-translate" => Ok(Self::GoogleTranslate),
            "ChatGPT API" | "chatgpt-api" => Ok(Self::ChatGptApi),
            _ => Err(anyhow!("Unrecognized translation provider: {}", s)),
        }
    }
}

/// Per-request options, deserialized from the addon configuration segment
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RequestOptions {
    /// Translation backend to use
    pub provider: TranslationProvider,

    /// API key for the ChatGPT provider
    #[serde(default = "String::new", rename = "apikey")]
    pub api_key: String,

    /// OpenAI-compatible endpoint for the ChatGPT provider
    #[serde(default = "default_chatgpt_base_url")]
    pub base_url: String,

    /// Model name for the ChatGPT provider
    #[serde(default = "default_chatgpt_model")]
    pub model_name: String,

    /// Target language display label chosen by the user
    #[serde(rename = "translateto")]
    pub translate_to: String,
}

impl RequestOptions {
    /// Options for the given provider and target label, with defaults elsewhere
    pub fn new(provider: TranslationProvider, translate_to: impl Into<String>) -> Self {
        RequestOptions {
            provider,
            api_key: String::new(),
            base_url: default_chatgpt_base_url(),
            model_name: default_chatgpt_model(),
            translate_to: translate_to.into(),
        }
    }
}

pub(crate) fn default_chatgpt_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

pub(crate) fn default_chatgpt_model() -> String {
    "gpt-4o-mini".to_string()
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to the log crate's level filter
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Service configuration, constructed once at startup and passed down
/// explicitly - resource URLs are derived from `public_url`, never from
/// ambient process state.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    /// Externally reachable base URL used in generated subtitle links
    #[serde(default = "default_public_url")]
    pub public_url: String,

    /// Address the HTTP server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port the HTTP server listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory that holds the served `subtitles/` tree
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Optional explicit database path; the platform data directory is used
    /// when absent
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            public_url: default_public_url(),
            bind_address: default_bind_address(),
            port: default_port(),
            data_dir: default_data_dir(),
            database_path: None,
            log_level: LogLevel::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !self.public_url.starts_with("http://") && !self.public_url.starts_with("https://") {
            return Err(anyhow!(
                "public_url must include a scheme: {}",
                self.public_url
            ));
        }
        if self.port == 0 {
            return Err(anyhow!("port must be non-zero"));
        }
        Ok(())
    }

    /// Directory the finished and placeholder subtitle files live under
    pub fn subtitles_root(&self) -> PathBuf {
        self.data_dir.join("subtitles")
    }
}

fn default_public_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}
