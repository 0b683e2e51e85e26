//! Deployment environment and log output settings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::env_opt;

/// Where the server is running; drives CORS strictness and log defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    pub fn is_development(&self) -> bool {
        *self == Environment::Development
    }

    /// `ENVIRONMENT`, falling back to development when unset or unknown
    pub fn from_env() -> Self {
        env_opt("ENVIRONMENT")
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    fn log_defaults(&self) -> (&'static str, LogFormat) {
        match self {
            Environment::Development => ("debug", LogFormat::Pretty),
            Environment::Staging | Environment::Production => ("info", LogFormat::Json),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Environment::Development),
            "staging" | "testing" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment '{}'", other)),
        }
    }
}

/// Subscriber output style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl LoggingConfig {
    pub fn for_environment(environment: Environment) -> Self {
        let (level, format) = environment.log_defaults();
        Self {
            level: level.to_string(),
            format,
        }
    }

    /// Environment defaults overridden by `LOG_LEVEL` / `LOG_FORMAT`
    pub fn from_env(environment: Environment) -> Self {
        let defaults = Self::for_environment(environment);
        Self {
            level: env_opt("LOG_LEVEL")
                .map(|level| level.to_lowercase())
                .unwrap_or(defaults.level),
            format: env_opt("LOG_FORMAT")
                .and_then(|format| format.parse().ok())
                .unwrap_or(defaults.format),
        }
    }
}
