//! Pure composition rules over extracted records
//!
//! Nothing in here touches the network; the [`Aggregator`](super::Aggregator)
//! fetches and these functions shape the result.

use crate::models::{contains_ignore_case, Game, Player, StatLine};

use super::views::SeasonRecord;

/// First `limit` completed games, in page order
pub fn recent_results(schedule: &[Game], limit: usize) -> Vec<Game> {
    schedule
        .iter()
        .filter(|g| g.is_completed())
        .take(limit)
        .cloned()
        .collect()
}

/// First `limit` upcoming games, in page order
pub fn upcoming_games(schedule: &[Game], limit: usize) -> Vec<Game> {
    schedule
        .iter()
        .filter(|g| g.is_upcoming())
        .take(limit)
        .cloned()
        .collect()
}

/// First upcoming game in listed order
pub fn next_game(schedule: &[Game]) -> Option<Game> {
    schedule.iter().find(|g| g.is_upcoming()).cloned()
}

/// Last completed game in listed order (not by calendar date)
pub fn last_result(schedule: &[Game]) -> Option<Game> {
    schedule.iter().rev().find(|g| g.is_completed()).cloned()
}

/// Players matching a search term, in roster order
pub fn search_players(roster: &[Player], term: &str) -> Vec<Player> {
    roster
        .iter()
        .filter(|p| p.matches_search(term))
        .cloned()
        .collect()
}

/// First player whose name contains the query
pub fn find_player(roster: &[Player], name: &str) -> Option<Player> {
    roster.iter().find(|p| p.name_contains(name)).cloned()
}

/// First stat line whose player field contains the query
pub fn find_stat_line(stats: &[StatLine], name: &str) -> Option<StatLine> {
    stats
        .iter()
        .find(|s| contains_ignore_case(&s.player, name))
        .cloned()
}

/// First game whose opponent contains the query
pub fn find_game(schedule: &[Game], opponent: &str) -> Option<Game> {
    schedule
        .iter()
        .find(|g| contains_ignore_case(&g.opponent, opponent))
        .cloned()
}

/// Tally wins, losses and ties from free-text result strings
///
/// A result counts as a win if it contains "w", a loss if it contains "l"
/// and a tie if it contains "t" (case-insensitive). The counters are
/// independent, so one result string can land in several of them.
pub fn season_record(sport: &str, schedule: &[Game]) -> SeasonRecord {
    let count = |needles: [&str; 2]| {
        schedule
            .iter()
            .filter(|g| {
                let result = g.result.to_lowercase();
                needles.iter().any(|n| result.contains(n))
            })
            .count()
    };

    let wins = count(["w", "win"]);
    let losses = count(["l", "loss"]);
    let ties = count(["t", "tie"]);

    SeasonRecord {
        sport: sport.to_string(),
        wins,
        losses,
        ties,
        total_games: wins + losses + ties,
        win_percentage: win_percentage(wins, losses),
        upcoming_games: schedule.iter().filter(|g| g.is_upcoming()).count(),
    }
}

/// `wins / (wins + losses) * 100` to one decimal, `"0"` without decided games
pub fn win_percentage(wins: usize, losses: usize) -> String {
    let decided = wins + losses;
    if decided == 0 {
        return String::from("0");
    }
    let pct = wins as f64 / decided as f64 * 100.0;
    // Halves round up, so 1-15 reads 6.3
    format!("{:.1}", (pct * 10.0).round() / 10.0)
}
