//! Configuration management for athletics-mcp
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files. The sport catalog built from it is shared
//! read-only by every transport for the lifetime of the process.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Default athletics site
pub const DEFAULT_BASE_URL: &str = "https://gobuffsgo.com";

/// Sports advertised in tool schemas
pub const AVAILABLE_SPORTS: &[&str] = &[
    "football",
    "baseball",
    "softball",
    "mens-basketball",
    "womens-basketball",
    "mens-cross-country",
    "womens-cross-country",
    "womens-soccer",
    "womens-volleyball",
    "womens-track-and-field",
];

/// Sports covered by the all-sports summary
pub const SUMMARY_SPORTS: &[&str] = &[
    "football",
    "baseball",
    "softball",
    "mens-basketball",
    "womens-basketball",
    "womens-volleyball",
    "womens-soccer",
];

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target site configuration
    pub site: SiteConfig,

    /// Sport catalog
    pub sports: SportsConfig,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Target site and page-load configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site base URL; pages live under `<base_url>/sports/<sport>/...`
    pub base_url: String,

    /// Per-navigation timeout in seconds
    pub navigation_timeout_secs: u64,

    /// Grace period before reading the news feed, in milliseconds
    pub news_grace_ms: u64,

    /// User agent string
    pub user_agent: String,
}

/// Sport catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SportsConfig {
    /// Sport identifiers declared in tool schemas
    pub available: Vec<String>,

    /// Sport identifiers covered by the all-sports summary
    pub summary: Vec<String>,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server bind address
    pub bind_address: SocketAddr,

    /// Enable permissive CORS
    pub enable_cors: bool,

    /// Enable request logging
    pub enable_request_logging: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            navigation_timeout_secs: 30,
            news_grace_ms: 2000,
            user_agent: format!("athletics-mcp/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for SportsConfig {
    fn default() -> Self {
        Self {
            available: AVAILABLE_SPORTS.iter().map(|s| s.to_string()).collect(),
            summary: SUMMARY_SPORTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 3000)),
            enable_cors: true,
            enable_request_logging: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to defaults. `PORT` overrides
    /// the bind port when `ATHLETICS_BIND_ADDRESS` is not set.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let base_url =
            std::env::var("ATHLETICS_BASE_URL").unwrap_or_else(|_| defaults.site.base_url.clone());

        let navigation_timeout_secs = std::env::var("ATHLETICS_NAVIGATION_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.site.navigation_timeout_secs);

        let news_grace_ms = std::env::var("ATHLETICS_NEWS_GRACE_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.site.news_grace_ms);

        let user_agent = std::env::var("ATHLETICS_USER_AGENT")
            .unwrap_or_else(|_| defaults.site.user_agent.clone());

        let available = std::env::var("ATHLETICS_SPORTS")
            .ok()
            .map(|v| split_list(&v))
            .unwrap_or(defaults.sports.available);

        let summary = std::env::var("ATHLETICS_SUMMARY_SPORTS")
            .ok()
            .map(|v| split_list(&v))
            .unwrap_or(defaults.sports.summary);

        let bind_address = match std::env::var("ATHLETICS_BIND_ADDRESS") {
            Ok(addr) => addr
                .parse::<SocketAddr>()
                .with_context(|| format!("Invalid ATHLETICS_BIND_ADDRESS: {addr}"))?,
            Err(_) => {
                let port = std::env::var("PORT")
                    .ok()
                    .and_then(|v| v.parse::<u16>().ok())
                    .unwrap_or(defaults.server.bind_address.port());
                SocketAddr::new(defaults.server.bind_address.ip(), port)
            }
        };

        let enable_cors = std::env::var("ATHLETICS_ENABLE_CORS")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(defaults.server.enable_cors);

        let log_level =
            std::env::var("ATHLETICS_LOG_LEVEL").unwrap_or_else(|_| defaults.logging.level.clone());

        let log_format = std::env::var("ATHLETICS_LOG_FORMAT")
            .unwrap_or_else(|_| defaults.logging.format.clone());

        Ok(Self {
            site: SiteConfig {
                base_url,
                navigation_timeout_secs,
                news_grace_ms,
                user_agent,
            },
            sports: SportsConfig { available, summary },
            server: ServerConfig {
                bind_address,
                enable_cors,
                enable_request_logging: defaults.server.enable_request_logging,
            },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let base = Url::parse(&self.site.base_url)
            .with_context(|| format!("Invalid base_url: {}", self.site.base_url))?;

        if !matches!(base.scheme(), "http" | "https") {
            anyhow::bail!("base_url must use http or https, got {}", base.scheme());
        }

        if self.site.navigation_timeout_secs == 0 {
            anyhow::bail!("navigation_timeout_secs must be greater than 0");
        }

        if self.sports.available.is_empty() {
            anyhow::bail!("sports.available must list at least one sport");
        }

        if self.sports.summary.is_empty() {
            anyhow::bail!("sports.summary must list at least one sport");
        }

        if let Some(sport) = self
            .sports
            .available
            .iter()
            .chain(&self.sports.summary)
            .find(|s| s.trim().is_empty() || s.contains('/'))
        {
            anyhow::bail!("Invalid sport identifier: {sport:?}");
        }

        Ok(())
    }

    /// Get navigation timeout as Duration
    #[must_use]
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.site.navigation_timeout_secs)
    }

    /// Get news grace period as Duration
    #[must_use]
    pub fn news_grace(&self) -> Duration {
        Duration::from_millis(self.site.news_grace_ms)
    }

    /// Build the shared sport catalog
    #[must_use]
    pub fn catalog(&self) -> Arc<SportCatalog> {
        Arc::new(SportCatalog {
            available: self.sports.available.clone(),
            summary: self.sports.summary.clone(),
        })
    }
}

/// Read-only sport catalog shared by the aggregator and every transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SportCatalog {
    available: Vec<String>,
    summary: Vec<String>,
}

impl SportCatalog {
    /// Sports declared in tool schemas
    pub fn available(&self) -> &[String] {
        &self.available
    }

    /// Sports covered by the all-sports summary
    pub fn summary(&self) -> &[String] {
        &self.summary
    }

    /// Whether a sport is part of the declared enum
    ///
    /// Informational only; undeclared sports are still passed through.
    pub fn is_known(&self, sport: &str) -> bool {
        self.available.iter().any(|s| s == sport)
    }
}

impl Default for SportCatalog {
    fn default() -> Self {
        Config::default().catalog().as_ref().clone()
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
