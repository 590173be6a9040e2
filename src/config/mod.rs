//! Configuration handling for a crawl run.
//!
//! Everything comes from environment variables with development defaults
//! pointing at the public-consultation index of the youth and sports
//! ministry. `Config::from_env` validates the enumerated and numeric values.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::extractor::assembler::{
    DEFAULT_INSTITUTION, DEFAULT_SLUG_MAX_LEN, ExtractionMode, IdentifierMode, PipelineConfig,
};

/// Environment variable names.
pub const ENV_INDEX_URL: &str = "AVIZIER_INDEX_URL";
pub const ENV_INSTITUTION: &str = "AVIZIER_INSTITUTION";
pub const ENV_IDENTIFIER: &str = "AVIZIER_IDENTIFIER";
pub const ENV_SLUG_MAX_LEN: &str = "AVIZIER_SLUG_MAX_LEN";
pub const ENV_FIELDS: &str = "AVIZIER_FIELDS";
pub const ENV_CONCURRENCY: &str = "AVIZIER_CONCURRENCY";
pub const ENV_LOG_FORMAT: &str = "AVIZIER_LOG_FORMAT";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";

const DEFAULT_INDEX_URL: &str = "http://mts.ro/proiecte-legislative-in-dezbatere-publica/";
const DEFAULT_CONCURRENCY: usize = 4;
/// Upper bound for in-flight announcements (and pool connections).
pub const MAX_CONCURRENCY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Crawl run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    index_url: String,
    pipeline: PipelineConfig,
    concurrency: usize,
    log_format: LogFormat,
    database_url: Option<String>,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(
        index_url: impl Into<String>,
        pipeline: PipelineConfig,
        concurrency: usize,
        database_url: Option<String>,
    ) -> Self {
        Self {
            index_url: index_url.into(),
            pipeline,
            concurrency: concurrency.clamp(1, MAX_CONCURRENCY),
            log_format: LogFormat::Text,
            database_url,
        }
    }

    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let index_url = env::var(ENV_INDEX_URL).unwrap_or_else(|_| DEFAULT_INDEX_URL.to_string());
        url::Url::parse(&index_url).map_err(|e| ConfigError::InvalidValue {
            field: ENV_INDEX_URL,
            reason: e.to_string(),
        })?;

        let institution =
            env::var(ENV_INSTITUTION).unwrap_or_else(|_| DEFAULT_INSTITUTION.to_string());

        let slug_max_len = parse_number(ENV_SLUG_MAX_LEN, DEFAULT_SLUG_MAX_LEN)?;
        let identifier = match env::var(ENV_IDENTIFIER).ok().as_deref() {
            None | Some("url") => IdentifierMode::SourceUrl,
            Some("slug") => IdentifierMode::TitleSlug {
                max_len: slug_max_len,
            },
            Some(other) => return Err(ConfigError::unexpected(ENV_IDENTIFIER, other, "url, slug")),
        };

        let fields = match env::var(ENV_FIELDS).ok().as_deref() {
            None | Some("full") => ExtractionMode::Full,
            Some("reduced") => ExtractionMode::Reduced,
            Some(other) => return Err(ConfigError::unexpected(ENV_FIELDS, other, "full, reduced")),
        };

        let log_format = match env::var(ENV_LOG_FORMAT).ok().as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => return Err(ConfigError::unexpected(ENV_LOG_FORMAT, other, "text, json")),
        };

        let concurrency = parse_number(ENV_CONCURRENCY, DEFAULT_CONCURRENCY)?;
        if !(1..=MAX_CONCURRENCY).contains(&concurrency) {
            return Err(ConfigError::InvalidValue {
                field: ENV_CONCURRENCY,
                reason: format!("must be between 1 and {MAX_CONCURRENCY}"),
            });
        }

        let database_url = env::var(ENV_DATABASE_URL).ok().filter(|v| !v.is_empty());

        Ok(Self {
            index_url,
            pipeline: PipelineConfig {
                institution,
                identifier,
                fields,
            },
            concurrency,
            log_format,
            database_url,
        })
    }

    /// Page listing the announcements.
    pub fn index_url(&self) -> &str {
        &self.index_url
    }
    /// Extraction settings handed to the assembler.
    pub fn pipeline(&self) -> &PipelineConfig {
        &self.pipeline
    }
    /// Maximum number of articles processed at once.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }
    /// PostgreSQL URL; `None` selects the in-memory store.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    /// Defaults (mirrors `from_env` with no env overrides).
    pub fn default() -> Self {
        Self::new(
            DEFAULT_INDEX_URL,
            PipelineConfig::default(),
            DEFAULT_CONCURRENCY,
            None,
        )
    }
}

fn parse_number(field: &'static str, default: usize) -> Result<usize, ConfigError> {
    match env::var(field) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            field,
            reason: format!("expected a non-negative integer, got '{raw}'"),
        }),
        Err(_) => Ok(default),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl ConfigError {
    fn unexpected(field: &'static str, value: &str, allowed: &str) -> Self {
        Self::InvalidValue {
            field,
            reason: format!("'{value}' is not one of: {allowed}"),
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
