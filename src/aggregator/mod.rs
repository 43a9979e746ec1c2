//! Composite team views built from concurrent page extractions
//!
//! Every aggregate issues its independent extractions at once and joins on
//! all of them. Joins are all-or-nothing: the first failure fails the whole
//! operation. The all-sports summary is the one exception and reports a
//! marker entry for each sport it could not fetch.

pub mod compose;
pub mod views;

use std::sync::Arc;

use futures::future::join_all;

use crate::config::SportCatalog;
use crate::crawler::Extractor;
use crate::error::Result;
use crate::models::{Game, NewsArticle, Player};

pub use views::{
    PlayerStatsDetail, SeasonRecord, SportSummary, SummaryEntry, TeamComparison, TeamDashboard,
    TeamSnapshot, TopPerformers,
};

/// Games listed in each section of the team dashboard
const DASHBOARD_GAMES: usize = 5;
/// Stat lines listed on the team dashboard
const DASHBOARD_STATS: usize = 10;
/// News articles listed on the team dashboard
const DASHBOARD_NEWS: usize = 5;
/// News articles listed on summaries and comparisons
const SUMMARY_NEWS: usize = 3;

/// Marker used for sports the all-sports summary could not fetch
pub const FETCH_FAILED_MARKER: &str = "Unable to fetch data";

/// Aggregate operations over the [`Extractor`]
#[derive(Clone)]
pub struct Aggregator {
    extractor: Extractor,
    catalog: Arc<SportCatalog>,
}

impl Aggregator {
    pub fn new(extractor: Extractor, catalog: Arc<SportCatalog>) -> Self {
        Self { extractor, catalog }
    }

    /// Underlying extractor, for single-page tools
    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    pub fn catalog(&self) -> &SportCatalog {
        &self.catalog
    }

    /// First `limit` completed games in page order
    pub async fn recent_results(&self, sport: &str, limit: usize) -> Result<Vec<Game>> {
        let schedule = self.extractor.schedule(sport).await?;
        Ok(compose::recent_results(&schedule, limit))
    }

    /// First `limit` upcoming games in page order
    pub async fn upcoming_games(&self, sport: &str, limit: usize) -> Result<Vec<Game>> {
        let schedule = self.extractor.schedule(sport).await?;
        Ok(compose::upcoming_games(&schedule, limit))
    }

    /// Roster, schedule split, stats and news for one sport
    pub async fn team_dashboard(&self, sport: &str) -> Result<TeamDashboard> {
        let (roster, schedule, mut stats, latest_news) = tokio::try_join!(
            self.extractor.roster(sport),
            self.extractor.schedule(sport),
            self.extractor.stats(sport),
            self.extractor.news(sport, DASHBOARD_NEWS),
        )?;

        stats.truncate(DASHBOARD_STATS);

        Ok(TeamDashboard {
            sport: sport.to_string(),
            team_size: roster.len(),
            recent_results: compose::recent_results(&schedule, DASHBOARD_GAMES),
            upcoming_games: compose::upcoming_games(&schedule, DASHBOARD_GAMES),
            roster,
            stats,
            latest_news,
        })
    }

    /// Players whose name, hometown or position contains the term, or whose
    /// jersey number equals it
    pub async fn search_player(&self, sport: &str, term: &str) -> Result<Vec<Player>> {
        let roster = self.extractor.roster(sport).await?;
        Ok(compose::search_players(&roster, term))
    }

    /// First roster entry whose name contains `name`
    pub async fn player_bio(&self, sport: &str, name: &str) -> Result<Option<Player>> {
        let roster = self.extractor.roster(sport).await?;
        Ok(compose::find_player(&roster, name))
    }

    pub async fn sport_summary(&self, sport: &str) -> Result<SportSummary> {
        let (roster, recent_news, schedule) = tokio::try_join!(
            self.extractor.roster(sport),
            self.extractor.news(sport, SUMMARY_NEWS),
            self.extractor.schedule(sport),
        )?;

        Ok(SportSummary {
            sport: sport.to_string(),
            roster_size: roster.len(),
            next_game: compose::next_game(&schedule),
            last_result: compose::last_result(&schedule),
            recent_news,
        })
    }

    pub async fn team_comparison(&self, sport1: &str, sport2: &str) -> Result<TeamComparison> {
        let (roster1, news1, roster2, news2) = tokio::try_join!(
            self.extractor.roster(sport1),
            self.extractor.news(sport1, SUMMARY_NEWS),
            self.extractor.roster(sport2),
            self.extractor.news(sport2, SUMMARY_NEWS),
        )?;

        Ok(TeamComparison {
            team1: snapshot(sport1, &roster1, news1),
            team2: snapshot(sport2, &roster2, news2),
        })
    }

    pub async fn season_records(&self, sport: &str) -> Result<SeasonRecord> {
        let schedule = self.extractor.schedule(sport).await?;
        Ok(compose::season_record(sport, &schedule))
    }

    /// Roster entry and stat line for a player; either side may be missing
    pub async fn player_stats_detail(&self, sport: &str, name: &str) -> Result<PlayerStatsDetail> {
        let (player, stats) =
            tokio::try_join!(self.player_bio(sport, name), self.extractor.stats(sport))?;

        Ok(PlayerStatsDetail {
            player,
            statistics: compose::find_stat_line(&stats, name),
        })
    }

    /// Sport summary for every sport in the summary roster
    ///
    /// Never fails as a whole. Entries keep the roster order.
    pub async fn all_sports_summary(&self) -> Vec<SummaryEntry> {
        let summaries = self.catalog.summary().iter().map(|sport| async move {
            match self.sport_summary(sport).await {
                Ok(summary) => SummaryEntry::Summary(summary),
                Err(e) => {
                    tracing::warn!(sport = %sport, error = %e, "Sport summary failed");
                    SummaryEntry::Failed {
                        sport: sport.clone(),
                        error: FETCH_FAILED_MARKER.to_string(),
                    }
                }
            }
        });

        join_all(summaries).await
    }

    /// First game whose opponent contains `opponent`
    pub async fn game_details(&self, sport: &str, opponent: &str) -> Result<Option<Game>> {
        let schedule = self.extractor.schedule(sport).await?;
        Ok(compose::find_game(&schedule, opponent))
    }

    /// First `limit` stat lines as listed on the stats page
    pub async fn top_performers(&self, sport: &str, limit: usize) -> Result<TopPerformers> {
        let stats = self.extractor.stats(sport).await?;
        let total_players = stats.len();

        Ok(TopPerformers {
            sport: sport.to_string(),
            top_performers: stats.into_iter().take(limit).collect(),
            total_players,
        })
    }
}

fn snapshot(sport: &str, roster: &[Player], recent_news: Vec<NewsArticle>) -> TeamSnapshot {
    TeamSnapshot {
        sport: sport.to_string(),
        roster_size: roster.len(),
        recent_news,
    }
}
