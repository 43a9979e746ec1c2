//! Page loading with isolated, disposable page sessions
//!
//! Every load opens its own [`PageSession`]: a fresh HTTP client with its
//! own cookie jar and connection pool. Nothing is shared or pooled between
//! loads. The session is released when the guard drops, which covers
//! success, error, timeout and cancellation of the surrounding future alike.

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE},
    Client,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

use crate::config::Config;
use crate::metrics;
use crate::utils::error::FetchError;

/// Source of page markup
///
/// The production implementation is [`HttpPageLoader`]; tests substitute
/// canned pages.
#[async_trait]
pub trait PageLoader: Send + Sync {
    /// Load `url` and return its markup once the page has settled
    ///
    /// `grace` is an extra wait applied after the load completes, for feeds
    /// that finish rendering late.
    async fn load(&self, url: &Url, grace: Duration) -> Result<String, FetchError>;
}

/// Settings shared by every session a loader opens
#[derive(Debug, Clone)]
pub struct LoaderSettings {
    pub navigation_timeout: Duration,
    pub user_agent: String,
}

impl LoaderSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            navigation_timeout: config.navigation_timeout(),
            user_agent: config.site.user_agent.clone(),
        }
    }
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// HTTP page loader opening one isolated session per load
#[derive(Debug, Clone)]
pub struct HttpPageLoader {
    settings: LoaderSettings,
    open_sessions: Arc<AtomicUsize>,
}

impl HttpPageLoader {
    /// Create a loader with the given settings
    #[must_use]
    pub fn new(settings: LoaderSettings) -> Self {
        Self {
            settings,
            open_sessions: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of sessions currently open through this loader
    pub fn open_sessions(&self) -> usize {
        self.open_sessions.load(Ordering::SeqCst)
    }

    fn open_session(&self) -> Result<PageSession, FetchError> {
        PageSession::open(&self.settings, Arc::clone(&self.open_sessions))
    }
}

#[async_trait]
impl PageLoader for HttpPageLoader {
    async fn load(&self, url: &Url, grace: Duration) -> Result<String, FetchError> {
        let session = self.open_session()?;
        let started = Instant::now();

        let result = session.navigate(url).await;

        let elapsed = started.elapsed();
        let page = page_label(url);
        metrics::record_page_load(page, result.is_ok(), elapsed.as_secs_f64());

        let html = match result {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, elapsed_ms = elapsed.as_millis() as u64, "Page load failed");
                return Err(e);
            }
        };

        if !grace.is_zero() {
            tokio::time::sleep(grace).await;
        }

        tracing::debug!(
            url = %url,
            bytes = html.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Page loaded"
        );

        Ok(html)
    }
}

/// Scoped page session; released on drop
pub struct PageSession {
    client: Client,
    navigation_timeout: Duration,
    open_sessions: Arc<AtomicUsize>,
}

impl PageSession {
    fn open(settings: &LoaderSettings, open_sessions: Arc<AtomicUsize>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(&settings.user_agent)
            .default_headers(default_headers())
            .timeout(settings.navigation_timeout)
            .cookie_store(true)
            .gzip(true)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;

        open_sessions.fetch_add(1, Ordering::SeqCst);
        metrics::session_opened();
        tracing::debug!("Page session opened");

        Ok(Self {
            client,
            navigation_timeout: settings.navigation_timeout,
            open_sessions,
        })
    }

    /// Navigate to `url` and read the full body within the navigation budget
    ///
    /// HTTP error statuses are not failures: the error page is returned and
    /// simply yields no records.
    async fn navigate(&self, url: &Url) -> Result<String, FetchError> {
        let fetch = async {
            let response = self.client.get(url.clone()).send().await?;

            let status = response.status();
            if !status.is_success() {
                tracing::warn!(url = %url, status = status.as_u16(), "Page returned non-success status");
            }

            Ok::<_, FetchError>(response.text().await?)
        };

        match tokio::time::timeout(self.navigation_timeout, fetch).await {
            Ok(Ok(body)) => Ok(body),
            Ok(Err(FetchError::Http(e))) if e.is_timeout() => Err(self.timeout_error(url)),
            Ok(Err(e)) => Err(e),
            Err(_elapsed) => Err(self.timeout_error(url)),
        }
    }

    fn timeout_error(&self, url: &Url) -> FetchError {
        FetchError::Timeout {
            url: url.to_string(),
            secs: self.navigation_timeout.as_secs(),
        }
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        self.open_sessions.fetch_sub(1, Ordering::SeqCst);
        metrics::session_closed();
        tracing::debug!("Page session closed");
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers
}

/// Page type label for metrics, taken from the last path segment
fn page_label(url: &Url) -> &'static str {
    match url.path_segments().and_then(|mut s| s.next_back()) {
        Some("roster") => "roster",
        Some("schedule") => "schedule",
        Some("stats") => "stats",
        Some("archives") => "news",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_counter_released_on_drop() {
        let loader = HttpPageLoader::new(LoaderSettings::default());
        assert_eq!(loader.open_sessions(), 0);

        {
            let _first = loader.open_session().unwrap();
            let _second = loader.open_session().unwrap();
            assert_eq!(loader.open_sessions(), 2);
        }

        assert_eq!(loader.open_sessions(), 0);
    }

    #[test]
    fn test_default_headers() {
        let headers = default_headers();
        assert!(headers.contains_key(ACCEPT));
        assert!(headers.contains_key(ACCEPT_LANGUAGE));
    }

    #[test]
    fn test_page_label() {
        let url = Url::parse("https://gobuffsgo.com/sports/football/archives").unwrap();
        assert_eq!(page_label(&url), "news");

        let url = Url::parse("https://gobuffsgo.com/sports/football/roster").unwrap();
        assert_eq!(page_label(&url), "roster");

        let url = Url::parse("https://gobuffsgo.com/").unwrap();
        assert_eq!(page_label(&url), "other");
    }

    #[test]
    fn test_settings_from_config() {
        let mut config = Config::default();
        config.site.navigation_timeout_secs = 5;
        let settings = LoaderSettings::from_config(&config);
        assert_eq!(settings.navigation_timeout, Duration::from_secs(5));
        assert!(settings.user_agent.starts_with("athletics-mcp/"));
    }
}
