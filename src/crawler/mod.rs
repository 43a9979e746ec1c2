//! Page extraction for the athletics site
//!
//! The [`Extractor`] turns `(sport, page type)` into an ordered sequence of
//! typed records: build the page URL, load it through a disposable page
//! session, run the pure DOM extraction for that page type.

pub mod fetcher;
pub mod url;

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::crawler::fetcher::{HttpPageLoader, LoaderSettings, PageLoader};
use crate::crawler::url::SiteUrls;
use crate::error::{Error, Result};
use crate::models::{Game, NewsArticle, PageType, Player, Records, StatLine};
use crate::parser::PageParser;

/// Default number of news articles returned by the news tool
pub const DEFAULT_NEWS_LIMIT: usize = 10;

/// Per-call extraction options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Maximum news links kept (news pages only)
    pub news_limit: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            news_limit: DEFAULT_NEWS_LIMIT,
        }
    }
}

/// Stateless page extractor
///
/// Cheap to clone; clones share the loader but every call still opens its
/// own page session.
#[derive(Clone)]
pub struct Extractor {
    loader: Arc<dyn PageLoader>,
    urls: SiteUrls,
    parser: Arc<PageParser>,
    news_grace: Duration,
}

impl Extractor {
    /// Create an extractor backed by the HTTP page loader
    pub fn new(config: &Config) -> Result<Self> {
        let loader = HttpPageLoader::new(LoaderSettings::from_config(config));
        Self::with_loader(config, Arc::new(loader))
    }

    /// Create an extractor with a custom page loader
    pub fn with_loader(config: &Config, loader: Arc<dyn PageLoader>) -> Result<Self> {
        config
            .validate()
            .map_err(|e| Error::config(e.to_string()))?;
        let urls = SiteUrls::new(&config.site.base_url)?;
        let parser = Arc::new(PageParser::new(urls.base().clone()));

        Ok(Self {
            loader,
            urls,
            parser,
            news_grace: config.news_grace(),
        })
    }

    /// Load one page and extract its records
    ///
    /// # Errors
    ///
    /// Returns `Error::Fetch` on navigation timeout or transport failure.
    /// Missing DOM elements never produce an error.
    pub async fn extract(
        &self,
        sport: &str,
        page: PageType,
        opts: ExtractOptions,
    ) -> Result<Records> {
        let url = self.urls.page_url(sport, page)?;
        let grace = match page {
            PageType::News => self.news_grace,
            _ => Duration::ZERO,
        };

        tracing::debug!(sport, page = %page, url = %url, "Extracting page");

        let html = self.loader.load(&url, grace).await?;
        let records = self.parser.parse(page, &html, opts.news_limit);

        tracing::debug!(sport, page = %page, count = records.len(), "Extracted records");
        Ok(records)
    }

    /// Roster cards for a sport
    pub async fn roster(&self, sport: &str) -> Result<Vec<Player>> {
        match self.extract(sport, PageType::Roster, ExtractOptions::default()).await? {
            Records::Roster(players) => Ok(players),
            _ => Ok(Vec::new()),
        }
    }

    /// Schedule cards for a sport, in page order
    pub async fn schedule(&self, sport: &str) -> Result<Vec<Game>> {
        match self.extract(sport, PageType::Schedule, ExtractOptions::default()).await? {
            Records::Schedule(games) => Ok(games),
            _ => Ok(Vec::new()),
        }
    }

    /// Stats table rows for a sport
    pub async fn stats(&self, sport: &str) -> Result<Vec<StatLine>> {
        match self.extract(sport, PageType::Stats, ExtractOptions::default()).await? {
            Records::Stats(lines) => Ok(lines),
            _ => Ok(Vec::new()),
        }
    }

    /// Up to `limit` news articles for a sport
    pub async fn news(&self, sport: &str, limit: usize) -> Result<Vec<NewsArticle>> {
        let opts = ExtractOptions { news_limit: limit };
        match self.extract(sport, PageType::News, opts).await? {
            Records::News(articles) => Ok(articles),
            _ => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::FetchError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Loader returning the same markup for every URL and recording requests
    struct RecordingLoader {
        html: String,
        requests: Mutex<Vec<(String, Duration)>>,
    }

    #[async_trait]
    impl PageLoader for RecordingLoader {
        async fn load(&self, url: &::url::Url, grace: Duration) -> std::result::Result<String, FetchError> {
            self.requests.lock().unwrap().push((url.to_string(), grace));
            Ok(self.html.clone())
        }
    }

    struct FailingLoader;

    #[async_trait]
    impl PageLoader for FailingLoader {
        async fn load(&self, url: &::url::Url, _grace: Duration) -> std::result::Result<String, FetchError> {
            Err(FetchError::Timeout {
                url: url.to_string(),
                secs: 30,
            })
        }
    }

    fn recording(html: &str) -> Arc<RecordingLoader> {
        Arc::new(RecordingLoader {
            html: html.to_string(),
            requests: Mutex::new(Vec::new()),
        })
    }

    #[tokio::test]
    async fn test_extract_builds_page_url() {
        let loader = recording("<html></html>");
        let extractor = Extractor::with_loader(&Config::default(), loader.clone()).unwrap();

        let roster = extractor.roster("softball").await.unwrap();
        assert!(roster.is_empty());

        let requests = loader.requests.lock().unwrap();
        assert_eq!(requests[0].0, "https://gobuffsgo.com/sports/softball/roster");
        assert_eq!(requests[0].1, Duration::ZERO);
    }

    #[tokio::test]
    async fn test_news_waits_grace_period() {
        let loader = recording("<html></html>");
        let extractor = Extractor::with_loader(&Config::default(), loader.clone()).unwrap();

        extractor.news("football", 5).await.unwrap();

        let requests = loader.requests.lock().unwrap();
        assert_eq!(requests[0].0, "https://gobuffsgo.com/sports/football/archives");
        assert_eq!(requests[0].1, Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn test_extract_returns_typed_records() {
        let loader = recording(
            r#"<div class="sidearm-schedule-game">
                 <div class="sidearm-schedule-game-opponent-name">Rice</div>
               </div>"#,
        );
        let extractor = Extractor::with_loader(&Config::default(), loader).unwrap();

        let records = extractor
            .extract("baseball", PageType::Schedule, ExtractOptions::default())
            .await
            .unwrap();

        assert_eq!(records.page_type(), PageType::Schedule);
        match records {
            Records::Schedule(games) => assert_eq!(games[0].opponent, "Rice"),
            other => panic!("unexpected records: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let extractor = Extractor::with_loader(&Config::default(), Arc::new(FailingLoader)).unwrap();

        let err = extractor.schedule("football").await.unwrap_err();
        assert!(matches!(err, Error::Fetch(FetchError::Timeout { .. })));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut config = Config::default();
        config.site.base_url = "nope".to_string();
        let err = Extractor::new(&config).err().unwrap();
        assert!(matches!(err, Error::Config(_)));
    }
}
