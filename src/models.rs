// Core data structures for athletics-mcp

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Roster entry scraped from a sport's roster page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    pub jersey_number: String,
    pub position: String,
    pub year: String, // Academic year (Fr., So., R-Jr., ...)
    pub hometown: String,
    pub height: String,
    pub high_school: String,
    pub bio_link: String,
}

impl Player {
    /// Case-insensitive substring match on the player's name
    pub fn name_contains(&self, query: &str) -> bool {
        contains_ignore_case(&self.name, query)
    }

    /// Search rule used by the `search_player` tool
    ///
    /// Name, hometown and position match by case-insensitive substring,
    /// jersey number only by exact match.
    pub fn matches_search(&self, term: &str) -> bool {
        let term_lower = term.to_lowercase();
        self.name.to_lowercase().contains(&term_lower)
            || self.hometown.to_lowercase().contains(&term_lower)
            || self.position.to_lowercase().contains(&term_lower)
            || self.jersey_number == term
    }
}

/// Schedule entry scraped from a sport's schedule page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub date: String,
    pub opponent: String,
    pub location: String,
    pub result: String,
    pub score: String,
}

impl Game {
    /// A game is completed once either its result or its score is filled in
    pub fn is_completed(&self) -> bool {
        !self.result.is_empty() || !self.score.is_empty()
    }

    pub fn is_upcoming(&self) -> bool {
        !self.is_completed()
    }
}

/// One data row of a stats table, labelled by the table's own headers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLine {
    pub player: String,
    pub stats: BTreeMap<String, String>,
}

/// News item linked from a sport's archive page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub date: String,
    pub summary: String,
    pub link: String,
}

/// Page types served under `/sports/<sport>/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    Roster,
    Schedule,
    Stats,
    News,
}

impl PageType {
    /// All page types
    pub fn all() -> &'static [PageType] {
        &[Self::Roster, Self::Schedule, Self::Stats, Self::News]
    }

    /// Path segment appended after the sport identifier
    pub fn path(&self) -> &'static str {
        match self {
            Self::Roster => "roster",
            Self::Schedule => "schedule",
            Self::Stats => "stats",
            Self::News => "archives",
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Roster => "roster",
            Self::Schedule => "schedule",
            Self::Stats => "stats",
            Self::News => "news",
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Records produced by a single page extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Records {
    Roster(Vec<Player>),
    Schedule(Vec<Game>),
    Stats(Vec<StatLine>),
    News(Vec<NewsArticle>),
}

impl Records {
    pub fn len(&self) -> usize {
        match self {
            Self::Roster(v) => v.len(),
            Self::Schedule(v) => v.len(),
            Self::Stats(v) => v.len(),
            Self::News(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn page_type(&self) -> PageType {
        match self {
            Self::Roster(_) => PageType::Roster,
            Self::Schedule(_) => PageType::Schedule,
            Self::Stats(_) => PageType::Stats,
            Self::News(_) => PageType::News,
        }
    }
}

/// Split a schedule into (completed, upcoming), preserving page order
pub fn partition_schedule(games: &[Game]) -> (Vec<Game>, Vec<Game>) {
    games.iter().cloned().partition(Game::is_completed)
}

pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(result: &str, score: &str) -> Game {
        Game {
            opponent: "Opponent".to_string(),
            result: result.to_string(),
            score: score.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_game_completion() {
        assert!(game("W", "").is_completed());
        assert!(game("", "3-1").is_completed());
        assert!(game("", "").is_upcoming());
    }

    #[test]
    fn test_partition_schedule_keeps_order() {
        let games = vec![game("W", "2-1"), game("", ""), game("L", "0-3"), game("", "")];
        let (completed, upcoming) = partition_schedule(&games);

        assert_eq!(completed.len(), 2);
        assert_eq!(upcoming.len(), 2);
        assert_eq!(completed[0].result, "W");
        assert_eq!(completed[1].result, "L");
    }

    #[test]
    fn test_player_search_rules() {
        let player = Player {
            name: "John Smith".to_string(),
            jersey_number: "12".to_string(),
            position: "QB".to_string(),
            hometown: "Amarillo, Texas".to_string(),
            ..Default::default()
        };

        assert!(player.matches_search("SMITH"));
        assert!(player.matches_search("amarillo"));
        assert!(player.matches_search("qb"));
        assert!(player.matches_search("12"));
        // Jersey number is exact-match only
        assert!(!player.matches_search("1"));
    }

    #[test]
    fn test_player_serializes_camel_case() {
        let player = Player {
            jersey_number: "7".to_string(),
            high_school: "Canyon HS".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&player).unwrap();

        assert_eq!(json["jerseyNumber"], "7");
        assert_eq!(json["highSchool"], "Canyon HS");
        assert!(json.get("bioLink").is_some());
        assert!(json.get("year").is_some());
    }

    #[test]
    fn test_page_type_paths() {
        assert_eq!(PageType::Roster.path(), "roster");
        assert_eq!(PageType::News.path(), "archives");
        assert_eq!(PageType::News.to_string(), "news");
        assert_eq!(PageType::all().len(), 4);
    }

    #[test]
    fn test_records_len() {
        let records = Records::Schedule(vec![game("W", ""), game("", "")]);
        assert_eq!(records.len(), 2);
        assert_eq!(records.page_type(), PageType::Schedule);
        assert!(Records::News(Vec::new()).is_empty());
    }
}
