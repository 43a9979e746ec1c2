//! CSS selectors for Sidearm-powered athletics pages
//!
//! Card-style pages (roster, schedule) are described by a field table: one
//! item selector plus a list of `(field, selector, read)` entries evaluated
//! uniformly by the parser. Table-style pages (stats) and link feeds (news)
//! have their own selector groups.

use lazy_static::lazy_static;
use scraper::Selector;

use crate::models::PageType;

// Helper macro to parse selectors safely at compile time
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

macro_rules! field {
    ($name:expr, $sel:expr, $read:expr) => {
        FieldSpec {
            name: $name,
            selector: parse_selector!($sel),
            read: $read,
        }
    };
}

/// How a field value is read from the first element matching its selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Read {
    /// Trimmed text content with whitespace collapsed
    Text,
    /// First line of the text content only
    FirstLine,
    /// Raw attribute value
    Attr(&'static str),
}

/// One entry of a field-extraction table
pub struct FieldSpec {
    pub name: &'static str,
    pub selector: Selector,
    pub read: Read,
}

/// Field-extraction table for a card-style page
pub struct RecordSpec {
    /// Selector matching one element per record
    pub item: Selector,
    pub fields: Vec<FieldSpec>,
}

impl RecordSpec {
    /// Look up a field entry by name
    #[cfg(test)]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

lazy_static! {
    static ref ROSTER: RecordSpec = RecordSpec {
        item: parse_selector!(".sidearm-roster-player"),
        fields: vec![
            field!("name", ".sidearm-roster-player-name a", Read::Text),
            field!("jerseyNumber", ".sidearm-roster-player-jersey-number", Read::Text),
            field!("position", ".sidearm-roster-player-position", Read::FirstLine),
            field!("year", ".sidearm-roster-player-academic-year", Read::Text),
            field!("hometown", ".sidearm-roster-player-hometown", Read::Text),
            field!("height", ".sidearm-roster-player-height", Read::Text),
            field!("highSchool", ".sidearm-roster-player-highschool", Read::Text),
            field!("bioLink", ".sidearm-roster-player-name a", Read::Attr("href")),
        ],
    };

    static ref SCHEDULE: RecordSpec = RecordSpec {
        item: parse_selector!(".sidearm-schedule-game"),
        fields: vec![
            field!("date", ".sidearm-schedule-game-date", Read::Text),
            field!("opponent", ".sidearm-schedule-game-opponent-name", Read::Text),
            field!("location", ".sidearm-schedule-game-location", Read::Text),
            field!("result", ".sidearm-schedule-game-result", Read::Text),
            field!("score", ".sidearm-schedule-game-result-score", Read::Text),
        ],
    };

    static ref STATS_ROWS: Selector =
        parse_selector!(".stats-table tbody tr, .sidearm-table tbody tr");
    static ref STATS_HEADERS: Selector =
        parse_selector!(".stats-table thead th, .sidearm-table thead th");
    static ref STATS_CELLS: Selector = parse_selector!("td");

    static ref NEWS_CONTAINER: Selector = parse_selector!("article.sidearm-archives");
    static ref NEWS_LINKS: Selector = parse_selector!("a");
}

/// Field table for a card-style page type, `None` for stats and news
pub fn record_spec(page: PageType) -> Option<&'static RecordSpec> {
    match page {
        PageType::Roster => Some(&*ROSTER),
        PageType::Schedule => Some(&*SCHEDULE),
        PageType::Stats | PageType::News => None,
    }
}

/// Selectors for stats tables
pub struct StatsSelectors {
    pub rows: &'static Selector,
    pub headers: &'static Selector,
    pub cells: &'static Selector,
}

impl StatsSelectors {
    pub fn new() -> Self {
        Self {
            rows: &STATS_ROWS,
            headers: &STATS_HEADERS,
            cells: &STATS_CELLS,
        }
    }
}

impl Default for StatsSelectors {
    fn default() -> Self {
        Self::new()
    }
}

/// Selectors for the news archive feed
pub struct NewsSelectors {
    pub container: &'static Selector,
    pub links: &'static Selector,
}

impl NewsSelectors {
    pub fn new() -> Self {
        Self {
            container: &NEWS_CONTAINER,
            links: &NEWS_LINKS,
        }
    }
}

impl Default for NewsSelectors {
    fn default() -> Self {
        Self::new()
    }
}
