//! athletics-mcp - College athletics tool server
//!
//! Scrapes a Sidearm-style athletics site on demand and exposes rosters,
//! schedules, stats, news and derived team views as JSON-RPC tools.
//!
//! # Architecture
//!
//! - [`config`] - Configuration and the shared sport catalog
//! - [`crawler`] - Page URLs, disposable page sessions and the [`Extractor`](crawler::Extractor)
//! - [`parser`] - Pure DOM extraction driven by a typed field table
//! - [`aggregator`] - Concurrent composite views over the extractor
//! - [`tools`] - Tool inventory, dispatch and JSON-RPC routing
//! - [`server`] - HTTP transport (axum)
//! - [`stdio`] - Line-oriented stdin/stdout transport
//! - [`models`] - Record types
//! - [`metrics`] - Prometheus metrics
//!
//! # Example
//!
//! ```no_run
//! use athletics_mcp::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let extractor = Extractor::new(&config)?;
//!     let aggregator = Aggregator::new(extractor, config.catalog());
//!
//!     let record = aggregator.season_records("football").await?;
//!     println!("{} wins, {} losses", record.wins, record.losses);
//!     Ok(())
//! }
//! ```

pub mod aggregator;
pub mod config;
pub mod crawler;
pub mod error;
pub mod metrics;
pub mod models;
pub mod parser;
pub mod server;
pub mod stdio;
pub mod tools;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::aggregator::Aggregator;
    pub use crate::config::{Config, SportCatalog};
    pub use crate::crawler::Extractor;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::models::{Game, NewsArticle, PageType, Player, Records, StatLine};
    pub use crate::tools::{Tool, ToolDispatcher, ToolSet};
}

pub use models::{Game, NewsArticle, PageType, Player, Records, StatLine};
