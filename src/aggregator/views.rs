//! Derived views returned by aggregate operations
//!
//! Field names serialize in camelCase to match the tool-call payloads.

use serde::Serialize;

use crate::models::{Game, NewsArticle, Player, StatLine};

/// Complete team overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDashboard {
    pub sport: String,
    pub team_size: usize,
    pub roster: Vec<Player>,
    pub recent_results: Vec<Game>,
    pub upcoming_games: Vec<Game>,
    pub stats: Vec<StatLine>,
    pub latest_news: Vec<NewsArticle>,
}

/// Quick per-sport summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SportSummary {
    pub sport: String,
    pub roster_size: usize,
    pub next_game: Option<Game>,
    pub last_result: Option<Game>,
    pub recent_news: Vec<NewsArticle>,
}

/// One side of a team comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSnapshot {
    pub sport: String,
    pub roster_size: usize,
    pub recent_news: Vec<NewsArticle>,
}

/// Side-by-side comparison of two teams
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamComparison {
    pub team1: TeamSnapshot,
    pub team2: TeamSnapshot,
}

/// Win/loss/tie tally over a schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonRecord {
    pub sport: String,
    pub wins: usize,
    pub losses: usize,
    pub ties: usize,
    pub total_games: usize,
    /// Percentage to one decimal, or `"0"` when no game was won or lost
    pub win_percentage: String,
    pub upcoming_games: usize,
}

/// Roster entry paired with its stat line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerStatsDetail {
    pub player: Option<Player>,
    pub statistics: Option<StatLine>,
}

/// First stat lines of a sport, as listed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPerformers {
    pub sport: String,
    pub top_performers: Vec<StatLine>,
    pub total_players: usize,
}

/// Entry of the all-sports summary
///
/// A failed sport is reported with an error marker instead of aborting the
/// whole batch, so "no games" and "could not fetch" stay distinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SummaryEntry {
    Summary(SportSummary),
    Failed { sport: String, error: String },
}

impl SummaryEntry {
    pub fn sport(&self) -> &str {
        match self {
            Self::Summary(summary) => &summary.sport,
            Self::Failed { sport, .. } => sport,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}
