use crate::workflows::leads::{RangePolicy, ScaleConvention, ScoringConfig};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Separator for list-valued variables. Export headers may contain commas.
const LIST_SEPARATOR: char = '|';

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
    /// Lead export to calibrate against when the server starts.
    pub dataset: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_format = match env::var("APP_LOG_FORMAT") {
            Ok(value) => LogFormat::parse(&value).ok_or(ConfigError::InvalidLogFormat { value })?,
            Err(_) => LogFormat::Compact,
        };

        let scoring = load_scoring()?;
        let dataset = env::var("LEAD_SCORE_DATASET")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                format: log_format,
            },
            scoring,
            dataset,
        })
    }
}

fn load_scoring() -> Result<ScoringConfig, ConfigError> {
    let mut scoring = ScoringConfig::default();

    if let Ok(raw) = env::var("LEAD_SCORE_ATTRIBUTES") {
        let attributes = split_list(&raw);
        if attributes.is_empty() {
            return Err(ConfigError::EmptyAttributes);
        }
        scoring.attributes = attributes;
    }

    if let Ok(column) = env::var("LEAD_SCORE_OUTCOME_COLUMN") {
        if !column.trim().is_empty() {
            scoring.outcome_column = column.trim().to_string();
        }
    }

    if let Ok(raw) = env::var("LEAD_SCORE_CLOSED_LABELS") {
        let labels = split_list(&raw);
        if labels.is_empty() {
            return Err(ConfigError::EmptyClosedLabels);
        }
        scoring.closed_labels = labels;
    }

    if let Ok(value) = env::var("LEAD_SCORE_SCALE") {
        scoring.scale =
            ScaleConvention::parse(&value).ok_or(ConfigError::InvalidScale { value })?;
    }

    if let Ok(value) = env::var("LEAD_SCORE_RANGE_POLICY") {
        scoring.range_policy =
            RangePolicy::parse(&value).ok_or(ConfigError::InvalidRangePolicy { value })?;
    }

    Ok(scoring)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Some(Self::Compact),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidLogFormat { value: String },
    EmptyAttributes,
    EmptyClosedLabels,
    InvalidScale { value: String },
    InvalidRangePolicy { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidLogFormat { value } => {
                write!(f, "APP_LOG_FORMAT must be 'compact' or 'pretty', got '{value}'")
            }
            ConfigError::EmptyAttributes => {
                write!(f, "LEAD_SCORE_ATTRIBUTES must name at least one attribute")
            }
            ConfigError::EmptyClosedLabels => {
                write!(f, "LEAD_SCORE_CLOSED_LABELS must name at least one label")
            }
            ConfigError::InvalidScale { value } => write!(
                f,
                "LEAD_SCORE_SCALE must be 'span200' or 'span100', got '{value}'"
            ),
            ConfigError::InvalidRangePolicy { value } => write!(
                f,
                "LEAD_SCORE_RANGE_POLICY must be 'report' or 'clamp', got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
