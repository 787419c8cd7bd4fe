//! # Application Configuration
//!
//! Defines the configuration structure for the `samvidhan-server` and the
//! logic for loading it from an optional `config.yml` plus environment
//! variables. Values layer in order: built-in defaults, then the YAML file
//! (with `${VAR}` substitution), then environment overrides, so deployments
//! can run from a file, from the environment alone, or a mix.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use samvidhan::classifier::ClassifierConfig;
use samvidhan::providers::ai::openrouter::CompletionSettings;
use samvidhan::types::GenerationConfig;
use serde::Deserialize;
use std::env;
use std::fs;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// An error from the underlying `config` crate.
    General(String),
    /// A named configuration file could not be read.
    Unreadable(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::Unreadable(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The path to the SQLite corpus database. Loaded from `DB_URL` env var.
    #[serde(default = "default_db_url")]
    pub db_url: String,
    /// Optional JSON file of articles used to seed an empty corpus at startup.
    #[serde(default)]
    pub corpus_file: Option<String>,
    /// Connection settings for the completion service.
    #[serde(default)]
    pub completion: CompletionSettings,
    /// Classifier phrase lists; the built-in lists apply when omitted.
    #[serde(default)]
    pub classifier: ClassifierConfig,
    /// Model id, temperature and token budgets for prompt assembly.
    #[serde(default)]
    pub generation: GenerationConfig,
}

fn default_port() -> u16 {
    8080
}

fn default_db_url() -> String {
    "db/samvidhan.db".to_string()
}

// Helper to read a file, substitute `${VAR}` environment references, and
// return its content. Returns Ok(None) if the file does not exist.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::Unreadable(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}").unwrap();
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_else(|_| "".to_string())
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration.
///
/// - `config_path_override` points at an explicit YAML file (used by tests);
///   otherwise `config.yml` next to the crate manifest is loaded if present.
/// - Top-level keys are overridden by `PORT` and `DB_URL`; nested keys by
///   `SAMVIDHAN_`-prefixed variables (e.g. `SAMVIDHAN_COMPLETION__API_KEY`).
/// - As a final fallback the completion credential is read from
///   `OPENROUTER_API_KEY`.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder();

    let config_path = match config_path_override {
        Some(path) => path.to_string(),
        None => format!("{}/config.yml", env!("CARGO_MANIFEST_DIR")),
    };

    if let Some(content) = read_and_substitute(&config_path)? {
        info!("Loading configuration from '{config_path}'.");
        builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
    }

    let settings = builder
        // Environment variables for top-level keys like PORT.
        .add_source(Environment::default())
        // Prefixed environment variables for deeper overrides.
        .add_source(
            Environment::with_prefix("SAMVIDHAN")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    // The credential commonly arrives as a bare environment variable rather
    // than through file substitution; check it explicitly so either works.
    if config.completion.api_key.is_empty() {
        if let Ok(key) = env::var("OPENROUTER_API_KEY") {
            if !key.is_empty() {
                config.completion.api_key = key;
            }
        }
    }

    Ok(config)
}
