//! Integration tests for site URL building and news href handling

use athletics_mcp::crawler::url::{is_news_href, news_date_from_href, SiteUrls};
use athletics_mcp::models::PageType;

/// Every page type maps to its path under the sport
#[test]
fn test_page_urls_for_all_sports() {
    let urls = SiteUrls::new("https://gobuffsgo.com").unwrap();

    for sport in ["football", "mens-basketball", "womens-track-and-field"] {
        for page in PageType::all() {
            let url = urls.page_url(sport, *page).unwrap();
            assert_eq!(
                url.as_str(),
                format!("https://gobuffsgo.com/sports/{sport}/{}", page.path())
            );
        }
    }
}

/// A base URL with a path prefix keeps it
#[test]
fn test_base_with_path_prefix() {
    let urls = SiteUrls::new("http://localhost:8080/mirror/").unwrap();
    let url = urls.page_url("softball", PageType::News).unwrap();

    assert_eq!(url.as_str(), "http://localhost:8080/mirror/sports/softball/archives");
}

/// Sport identifiers pass through unvalidated but are encoded as one segment
#[test]
fn test_unknown_sport_passes_through() {
    let urls = SiteUrls::new("https://gobuffsgo.com").unwrap();

    let url = urls.page_url("curling", PageType::Roster).unwrap();
    assert_eq!(url.path(), "/sports/curling/roster");

    let url = urls.page_url("a/b", PageType::Roster).unwrap();
    assert_eq!(url.path(), "/sports/a%2Fb/roster");
}

#[test]
fn test_invalid_base_urls() {
    assert!(SiteUrls::new("").is_err());
    assert!(SiteUrls::new("gobuffsgo.com").is_err());
    assert!(SiteUrls::new("mailto:info@gobuffsgo.com").is_err());
}

#[test]
fn test_news_hrefs() {
    assert!(is_news_href("/news/2024/3/7/title.aspx"));
    assert!(is_news_href("https://gobuffsgo.com/news/2024/3/7/title.aspx"));
    assert!(!is_news_href("/sports/football/schedule"));

    assert_eq!(news_date_from_href("/news/2024/3/7/title.aspx"), "3/7/2024");
    assert_eq!(news_date_from_href("/news/2023/11/28/recap.aspx"), "11/28/2023");
    assert_eq!(news_date_from_href("/news/title.aspx"), "");
}
