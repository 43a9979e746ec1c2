//! DOM extraction for roster, schedule, stats and news pages
//!
//! Every read is total: a missing element or attribute yields an empty
//! string, and a page without any matching cards yields an empty sequence.

use scraper::{ElementRef, Html};
use std::collections::{BTreeMap, HashMap};
use url::Url;

use crate::crawler::url::{is_news_href, news_date_from_href};
use crate::models::{Game, NewsArticle, PageType, Player, Records, StatLine};
use crate::parser::sanitize::{sanitize_first_line, sanitize_text};
use crate::parser::selectors::{record_spec, NewsSelectors, Read, RecordSpec, StatsSelectors};
use crate::utils::absolutize;

/// Field values read for one card, keyed by field name
#[derive(Debug, Default, Clone)]
pub struct FieldValues(HashMap<&'static str, String>);

impl FieldValues {
    /// Value of a field, empty if the table has no such field
    pub fn get(&self, name: &str) -> String {
        self.0.get(name).cloned().unwrap_or_default()
    }
}

impl From<FieldValues> for Player {
    fn from(values: FieldValues) -> Self {
        Self {
            name: values.get("name"),
            jersey_number: values.get("jerseyNumber"),
            position: values.get("position"),
            year: values.get("year"),
            hometown: values.get("hometown"),
            height: values.get("height"),
            high_school: values.get("highSchool"),
            bio_link: values.get("bioLink"),
        }
    }
}

impl From<FieldValues> for Game {
    fn from(values: FieldValues) -> Self {
        Self {
            date: values.get("date"),
            opponent: values.get("opponent"),
            location: values.get("location"),
            result: values.get("result"),
            score: values.get("score"),
        }
    }
}

/// Page parser for Sidearm athletics pages
pub struct PageParser {
    stats: StatsSelectors,
    news: NewsSelectors,
    base_url: Url,
}

impl PageParser {
    /// Create a parser; `base_url` is used to absolutize news links
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            stats: StatsSelectors::new(),
            news: NewsSelectors::new(),
            base_url,
        }
    }

    /// Parse a loaded page into the records of its page type
    ///
    /// `news_limit` bounds the number of news links kept and is ignored for
    /// the other page types.
    pub fn parse(&self, page: PageType, html: &str, news_limit: usize) -> Records {
        match page {
            PageType::Roster => Records::Roster(self.parse_roster(html)),
            PageType::Schedule => Records::Schedule(self.parse_schedule(html)),
            PageType::Stats => Records::Stats(self.parse_stats(html)),
            PageType::News => Records::News(self.parse_news(html, news_limit)),
        }
    }

    /// Parse roster cards
    pub fn parse_roster(&self, html: &str) -> Vec<Player> {
        self.parse_cards(PageType::Roster, html)
            .into_iter()
            .map(Player::from)
            .collect()
    }

    /// Parse schedule cards
    pub fn parse_schedule(&self, html: &str) -> Vec<Game> {
        self.parse_cards(PageType::Schedule, html)
            .into_iter()
            .map(Game::from)
            .collect()
    }

    /// Parse stats table rows
    ///
    /// Header cells are read once per document and label data cells by
    /// column index. Column 0 is the player name and is never part of the
    /// stat map; columns without a (non-empty) header are skipped.
    pub fn parse_stats(&self, html: &str) -> Vec<StatLine> {
        let document = Html::parse_document(html);

        let headers: Vec<String> = document
            .select(self.stats.headers)
            .map(|th| element_text(&th))
            .collect();

        let lines = document
            .select(self.stats.rows)
            .map(|row| {
                let cells: Vec<String> = row
                    .select(self.stats.cells)
                    .map(|td| element_text(&td))
                    .collect();

                let player = cells.first().cloned().unwrap_or_default();
                let stats: BTreeMap<String, String> = cells
                    .into_iter()
                    .enumerate()
                    .skip(1)
                    .filter_map(|(index, value)| match headers.get(index) {
                        Some(header) if !header.is_empty() => Some((header.clone(), value)),
                        _ => None,
                    })
                    .collect();

                StatLine { player, stats }
            })
            .collect();

        lines
    }

    /// Parse the news archive feed
    ///
    /// Only anchors inside `article.sidearm-archives` whose href contains
    /// `/news/` are kept, truncated to `limit`.
    pub fn parse_news(&self, html: &str, limit: usize) -> Vec<NewsArticle> {
        let document = Html::parse_document(html);

        let Some(archive) = document.select(self.news.container).next() else {
            tracing::debug!("No archive container found on news page");
            return Vec::new();
        };

        let articles = archive
            .select(self.news.links)
            .filter_map(|link| {
                let href = link.value().attr("href").unwrap_or_default();
                is_news_href(href).then(|| (link, href.to_string()))
            })
            .take(limit)
            .map(|(link, href)| NewsArticle {
                title: element_text(&link),
                date: news_date_from_href(&href),
                summary: String::new(),
                link: absolutize(&self.base_url, &href),
            })
            .collect();

        articles
    }

    /// Evaluate the field table of a card-style page
    fn parse_cards(&self, page: PageType, html: &str) -> Vec<FieldValues> {
        let Some(spec) = record_spec(page) else {
            return Vec::new();
        };

        let document = Html::parse_document(html);
        let cards = document
            .select(&spec.item)
            .map(|card| read_fields(&card, spec))
            .collect();

        cards
    }
}

/// Read every field of `spec` from one card element
fn read_fields(card: &ElementRef<'_>, spec: &RecordSpec) -> FieldValues {
    let values = spec
        .fields
        .iter()
        .map(|field| {
            let value = card
                .select(&field.selector)
                .next()
                .map(|el| match field.read {
                    Read::Text => element_text(&el),
                    Read::FirstLine => sanitize_first_line(&el.text().collect::<String>()),
                    Read::Attr(name) => el.value().attr(name).unwrap_or_default().to_string(),
                })
                .unwrap_or_default();
            (field.name, value)
        })
        .collect();

    FieldValues(values)
}

fn element_text(element: &ElementRef<'_>) -> String {
    sanitize_text(&element.text().collect::<String>())
}
