//! URL building and news-link helpers for the athletics site
//!
//! Every page lives under `<base-url>/sports/<sport>/<page-path>`; news
//! articles are dated by a `/news/YYYY/M/D/` segment in their href.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::models::PageType;
use crate::utils::error::FetchError;

/// Path marker identifying news article links
pub const NEWS_PATH_MARKER: &str = "/news/";

static NEWS_DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/news/(\d{4})/(\d{1,2})/(\d{1,2})/").unwrap());

/// Page URL builder anchored at the site base URL
#[derive(Debug, Clone)]
pub struct SiteUrls {
    base: Url,
}

impl SiteUrls {
    /// Create a builder for the given base URL
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` if `base_url` is not an absolute URL
    /// that can carry path segments
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let base = Url::parse(base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;

        if base.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(format!(
                "{base_url}: cannot be used as a base URL"
            )));
        }

        Ok(Self { base })
    }

    /// Site base URL
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Build `<base>/sports/<sport>/<page-path>`
    ///
    /// The sport identifier is not validated; it is pushed as a single
    /// percent-encoded path segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use athletics_mcp::crawler::url::SiteUrls;
    /// use athletics_mcp::models::PageType;
    ///
    /// let urls = SiteUrls::new("https://gobuffsgo.com").unwrap();
    /// let url = urls.page_url("football", PageType::Roster).unwrap();
    /// assert_eq!(url.as_str(), "https://gobuffsgo.com/sports/football/roster");
    /// ```
    pub fn page_url(&self, sport: &str, page: PageType) -> Result<Url, FetchError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| FetchError::InvalidUrl(self.base.to_string()))?;
            segments.pop_if_empty();
            segments.push("sports");
            segments.push(sport);
            segments.push(page.path());
        }
        Ok(url)
    }
}

/// Whether an href points at a news article
pub fn is_news_href(href: &str) -> bool {
    href.contains(NEWS_PATH_MARKER)
}

/// Derive `M/D/YYYY` from a `/news/YYYY/M/D/` href segment
///
/// Month and day are kept as written in the href. Returns an empty string
/// when the pattern is absent.
///
/// # Examples
///
/// ```
/// use athletics_mcp::crawler::url::news_date_from_href;
///
/// assert_eq!(news_date_from_href("/news/2024/3/7/title.aspx"), "3/7/2024");
/// assert_eq!(news_date_from_href("/news/archive"), "");
/// ```
pub fn news_date_from_href(href: &str) -> String {
    NEWS_DATE_PATTERN
        .captures(href)
        .map(|caps| format!("{}/{}/{}", &caps[2], &caps[3], &caps[1]))
        .unwrap_or_default()
}
