//! Tool inventory and input schemas

use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

use crate::config::SportCatalog;
use crate::crawler::DEFAULT_NEWS_LIMIT;

use super::error::ToolError;

/// Default `limit` for the game and performer tools
pub const DEFAULT_LIMIT: usize = 5;

/// Every tool the server can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    GetRoster,
    GetSchedule,
    GetStats,
    GetNews,
    GetRecentResults,
    GetUpcomingGames,
    GetTeamDashboard,
    SearchPlayer,
    GetPlayerBio,
    GetSportSummary,
    GetTeamComparison,
    GetSeasonRecords,
    GetPlayerStatsDetail,
    GetAllSportsSummary,
    GetGameDetails,
    GetTopPerformers,
}

impl Tool {
    pub const ALL: [Tool; 16] = [
        Tool::GetRoster,
        Tool::GetSchedule,
        Tool::GetStats,
        Tool::GetNews,
        Tool::GetRecentResults,
        Tool::GetUpcomingGames,
        Tool::GetTeamDashboard,
        Tool::SearchPlayer,
        Tool::GetPlayerBio,
        Tool::GetSportSummary,
        Tool::GetTeamComparison,
        Tool::GetSeasonRecords,
        Tool::GetPlayerStatsDetail,
        Tool::GetAllSportsSummary,
        Tool::GetGameDetails,
        Tool::GetTopPerformers,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::GetRoster => "get_roster",
            Tool::GetSchedule => "get_schedule",
            Tool::GetStats => "get_stats",
            Tool::GetNews => "get_news",
            Tool::GetRecentResults => "get_recent_results",
            Tool::GetUpcomingGames => "get_upcoming_games",
            Tool::GetTeamDashboard => "get_team_dashboard",
            Tool::SearchPlayer => "search_player",
            Tool::GetPlayerBio => "get_player_bio",
            Tool::GetSportSummary => "get_sport_summary",
            Tool::GetTeamComparison => "get_team_comparison",
            Tool::GetSeasonRecords => "get_season_records",
            Tool::GetPlayerStatsDetail => "get_player_stats_detail",
            Tool::GetAllSportsSummary => "get_all_sports_summary",
            Tool::GetGameDetails => "get_game_details",
            Tool::GetTopPerformers => "get_top_performers",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Tool::GetRoster => "Get the roster for any sport including player details (name, number, position, year, hometown, height, high school)",
            Tool::GetSchedule => "Get the schedule for any sport including past and upcoming games",
            Tool::GetStats => "Get player and team statistics",
            Tool::GetNews => "Get latest news articles",
            Tool::GetRecentResults => "Get the most recent completed game results",
            Tool::GetUpcomingGames => "Get upcoming games",
            Tool::GetTeamDashboard => "Get complete team overview: roster, results, upcoming games, stats and news",
            Tool::SearchPlayer => "Search for a player by name, hometown, position or jersey number",
            Tool::GetPlayerBio => "Get player biography",
            Tool::GetSportSummary => "Get quick sport summary",
            Tool::GetTeamComparison => "Compare two sports teams",
            Tool::GetSeasonRecords => "Get win/loss records for the season",
            Tool::GetPlayerStatsDetail => "Get detailed stats for a specific player",
            Tool::GetAllSportsSummary => "Get overview of all sports in one call",
            Tool::GetGameDetails => "Get details about a specific game",
            Tool::GetTopPerformers => "Get top statistical performers",
        }
    }

    /// Default `limit` for tools that take one
    pub fn default_limit(&self) -> Option<usize> {
        match self {
            Tool::GetNews => Some(DEFAULT_NEWS_LIMIT),
            Tool::GetRecentResults | Tool::GetUpcomingGames | Tool::GetTopPerformers => {
                Some(DEFAULT_LIMIT)
            }
            _ => None,
        }
    }

    /// JSON Schema of the tool's arguments
    pub fn input_schema(&self, catalog: &SportCatalog) -> Value {
        let sports = catalog.available();
        let sport = |description: &str| {
            json!({ "type": "string", "description": description, "enum": sports })
        };
        let text = |description: &str| json!({ "type": "string", "description": description });
        let limit = |description: &str, default: usize| {
            json!({ "type": "number", "description": description, "default": default })
        };

        let (properties, required) = match self {
            Tool::GetNews | Tool::GetRecentResults | Tool::GetUpcomingGames | Tool::GetTopPerformers => {
                let label = match self {
                    Tool::GetNews => "Number of articles",
                    Tool::GetRecentResults => "Number of results",
                    Tool::GetUpcomingGames => "Number of games",
                    _ => "Number of players",
                };
                let default = self.default_limit().unwrap_or(DEFAULT_LIMIT);
                (
                    json!({ "sport": sport("Sport name"), "limit": limit(label, default) }),
                    json!(["sport"]),
                )
            }
            Tool::SearchPlayer => (
                json!({ "sport": sport("Sport name"), "searchTerm": text("Search term") }),
                json!(["sport", "searchTerm"]),
            ),
            Tool::GetPlayerBio | Tool::GetPlayerStatsDetail => (
                json!({ "sport": sport("Sport name"), "playerName": text("Player name") }),
                json!(["sport", "playerName"]),
            ),
            Tool::GetTeamComparison => (
                json!({ "sport1": sport("First sport"), "sport2": sport("Second sport") }),
                json!(["sport1", "sport2"]),
            ),
            Tool::GetGameDetails => (
                json!({ "sport": sport("Sport name"), "opponent": text("Opponent name") }),
                json!(["sport", "opponent"]),
            ),
            Tool::GetAllSportsSummary => (json!({}), json!([])),
            Tool::GetRoster
            | Tool::GetSchedule
            | Tool::GetStats
            | Tool::GetTeamDashboard
            | Tool::GetSportSummary
            | Tool::GetSeasonRecords => (json!({ "sport": sport("Sport name") }), json!(["sport"])),
        };

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    pub fn spec(&self, catalog: &SportCatalog) -> ToolSpec {
        ToolSpec {
            name: self.name(),
            description: self.description(),
            input_schema: self.input_schema(catalog),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .iter()
            .copied()
            .find(|tool| tool.name() == s)
            .ok_or_else(|| ToolError::UnknownTool(s.to_string()))
    }
}

/// Tool entry as listed by `tools/list`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// Subset of tools exposed by a transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolSet {
    /// Every tool; served over HTTP
    Full,
    /// Roster and schedule only; served over stdio
    Embedded,
}

impl ToolSet {
    pub fn tools(&self) -> &'static [Tool] {
        match self {
            ToolSet::Full => &Tool::ALL,
            ToolSet::Embedded => &[Tool::GetRoster, Tool::GetSchedule],
        }
    }

    pub fn contains(&self, tool: Tool) -> bool {
        self.tools().contains(&tool)
    }

    /// Resolve a tool name within this set
    pub fn resolve(&self, name: &str) -> Result<Tool, ToolError> {
        let tool: Tool = name.parse()?;
        if self.contains(tool) {
            Ok(tool)
        } else {
            Err(ToolError::UnknownTool(name.to_string()))
        }
    }

    pub fn specs(&self, catalog: &SportCatalog) -> Vec<ToolSpec> {
        self.tools().iter().map(|tool| tool.spec(catalog)).collect()
    }
}
