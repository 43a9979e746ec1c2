//! Common test utilities

#![allow(dead_code)]

use athletics_mcp::aggregator::Aggregator;
use athletics_mcp::config::Config;
use athletics_mcp::crawler::Extractor;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ROSTER_HTML: &str = include_str!("../fixtures/html/roster.html");
pub const SCHEDULE_HTML: &str = include_str!("../fixtures/html/schedule.html");
pub const STATS_HTML: &str = include_str!("../fixtures/html/stats.html");
pub const NEWS_HTML: &str = include_str!("../fixtures/html/news.html");

/// Config pointing at a mock site, without the news grace wait
pub fn test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.site.base_url = base_url.to_string();
    config.site.news_grace_ms = 0;
    config.site.navigation_timeout_secs = 5;
    config
}

/// Mock site serving the fixture pages for every sport
pub async fn mock_site() -> MockServer {
    let server = MockServer::start().await;

    for (page, html) in [
        ("roster", ROSTER_HTML),
        ("schedule", SCHEDULE_HTML),
        ("stats", STATS_HTML),
        ("archives", NEWS_HTML),
    ] {
        Mock::given(method("GET"))
            .and(path_regex(format!(r"^/sports/[^/]+/{page}$")))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html; charset=utf-8")
                    .set_body_string(html),
            )
            .mount(&server)
            .await;
    }

    server
}

/// Aggregator backed by the HTTP loader against `server`
pub fn aggregator_for(server: &MockServer) -> Aggregator {
    let config = test_config(&server.uri());
    let extractor = Extractor::new(&config).unwrap();
    Aggregator::new(extractor, config.catalog())
}
