//! Tool argument handling and dispatch to the aggregator

use serde::Serialize;
use serde_json::{json, Map, Value};
use std::time::Instant;

use crate::aggregator::Aggregator;
use crate::metrics;

use super::error::{ToolError, ToolResult};
use super::registry::{Tool, ToolSet, ToolSpec};

/// Arguments of one tool call
///
/// Absent arguments behave like an empty object.
#[derive(Debug, Clone, Default)]
pub struct ToolArgs(Map<String, Value>);

impl ToolArgs {
    pub fn from_value(value: Option<&Value>) -> ToolResult<Self> {
        match value {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(Value::Object(map)) => Ok(Self(map.clone())),
            Some(_) => Err(ToolError::invalid_argument("arguments", "expected an object")),
        }
    }

    /// Required string argument
    pub fn string(&self, name: &str) -> ToolResult<&str> {
        match self.0.get(name) {
            None | Some(Value::Null) => Err(ToolError::MissingArgument(name.to_string())),
            Some(Value::String(s)) => Ok(s),
            Some(_) => Err(ToolError::invalid_argument(name, "expected a string")),
        }
    }

    /// Optional `limit` argument; absent or zero falls back to `default`
    pub fn limit(&self, default: usize) -> ToolResult<usize> {
        let limit = match self.0.get("limit") {
            None | Some(Value::Null) => 0,
            Some(value) => value
                .as_u64()
                .ok_or_else(|| ToolError::invalid_argument("limit", "expected a non-negative integer"))?
                as usize,
        };

        Ok(if limit == 0 { default } else { limit })
    }
}

/// Runs tool calls against the aggregator
#[derive(Clone)]
pub struct ToolDispatcher {
    aggregator: Aggregator,
    tool_set: ToolSet,
}

impl ToolDispatcher {
    pub fn new(aggregator: Aggregator, tool_set: ToolSet) -> Self {
        Self {
            aggregator,
            tool_set,
        }
    }

    pub fn tool_set(&self) -> ToolSet {
        self.tool_set
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Tool entries for `tools/list`
    pub fn list(&self) -> Vec<ToolSpec> {
        self.tool_set.specs(self.aggregator.catalog())
    }

    /// Run a tool and wrap its data as a text content block
    pub async fn call(&self, name: &str, arguments: Option<&Value>) -> ToolResult<Value> {
        let data = self.call_data(name, arguments).await?;
        let text = serde_json::to_string_pretty(&data).map_err(crate::error::Error::from)?;
        Ok(json!({ "content": [{ "type": "text", "text": text }] }))
    }

    /// Run a tool and return its raw data
    pub async fn call_data(&self, name: &str, arguments: Option<&Value>) -> ToolResult<Value> {
        let tool = self.tool_set.resolve(name)?;
        let args = ToolArgs::from_value(arguments)?;

        for key in ["sport", "sport1", "sport2"] {
            if let Some(Value::String(sport)) = args.0.get(key) {
                if !self.aggregator.catalog().is_known(sport) {
                    tracing::debug!(tool = %tool, sport = %sport, "Sport outside the catalog");
                }
            }
        }

        let shown = Value::Object(args.0.clone());
        tracing::info!(tool = %tool, args = %shown, "Tool call");
        let started = Instant::now();

        let result = self.run(tool, &args).await;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        metrics::record_tool_call(tool.name(), result.is_ok());
        match &result {
            Ok(_) => tracing::info!(tool = %tool, elapsed_ms, "Tool call completed"),
            Err(ToolError::Execution(e)) => tracing::warn!(
                tool = %tool,
                elapsed_ms,
                category = e.category().as_str(),
                recoverable = e.is_recoverable(),
                error = %e,
                "Tool call failed"
            ),
            Err(e) => tracing::warn!(tool = %tool, error = %e, "Tool call rejected"),
        }

        result
    }

    async fn run(&self, tool: Tool, args: &ToolArgs) -> ToolResult<Value> {
        let agg = &self.aggregator;
        let extractor = agg.extractor();
        let default_limit = tool.default_limit().unwrap_or_default();

        match tool {
            Tool::GetRoster => to_value(extractor.roster(args.string("sport")?).await?),
            Tool::GetSchedule => to_value(extractor.schedule(args.string("sport")?).await?),
            Tool::GetStats => to_value(extractor.stats(args.string("sport")?).await?),
            Tool::GetNews => {
                let sport = args.string("sport")?;
                to_value(extractor.news(sport, args.limit(default_limit)?).await?)
            }
            Tool::GetRecentResults => {
                let sport = args.string("sport")?;
                to_value(agg.recent_results(sport, args.limit(default_limit)?).await?)
            }
            Tool::GetUpcomingGames => {
                let sport = args.string("sport")?;
                to_value(agg.upcoming_games(sport, args.limit(default_limit)?).await?)
            }
            Tool::GetTeamDashboard => to_value(agg.team_dashboard(args.string("sport")?).await?),
            Tool::SearchPlayer => {
                let sport = args.string("sport")?;
                to_value(agg.search_player(sport, args.string("searchTerm")?).await?)
            }
            Tool::GetPlayerBio => {
                let sport = args.string("sport")?;
                to_value(agg.player_bio(sport, args.string("playerName")?).await?)
            }
            Tool::GetSportSummary => to_value(agg.sport_summary(args.string("sport")?).await?),
            Tool::GetTeamComparison => {
                let sport1 = args.string("sport1")?;
                to_value(agg.team_comparison(sport1, args.string("sport2")?).await?)
            }
            Tool::GetSeasonRecords => to_value(agg.season_records(args.string("sport")?).await?),
            Tool::GetPlayerStatsDetail => {
                let sport = args.string("sport")?;
                to_value(agg.player_stats_detail(sport, args.string("playerName")?).await?)
            }
            Tool::GetAllSportsSummary => to_value(agg.all_sports_summary().await),
            Tool::GetGameDetails => {
                let sport = args.string("sport")?;
                to_value(agg.game_details(sport, args.string("opponent")?).await?)
            }
            Tool::GetTopPerformers => {
                let sport = args.string("sport")?;
                to_value(agg.top_performers(sport, args.limit(default_limit)?).await?)
            }
        }
    }
}

fn to_value<T: Serialize>(data: T) -> ToolResult<Value> {
    Ok(serde_json::to_value(data).map_err(crate::error::Error::from)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(value: Value) -> ToolArgs {
        ToolArgs::from_value(Some(&value)).unwrap()
    }

    #[test]
    fn test_missing_arguments_object() {
        let args = ToolArgs::from_value(None).unwrap();
        assert!(matches!(args.string("sport"), Err(ToolError::MissingArgument(_))));
        assert!(ToolArgs::from_value(Some(&json!([1, 2]))).is_err());
    }

    #[test]
    fn test_string_argument() {
        let args = args(json!({"sport": "football", "opponent": 7}));
        assert_eq!(args.string("sport").unwrap(), "football");
        assert!(matches!(
            args.string("opponent"),
            Err(ToolError::InvalidArgument { .. })
        ));
        assert!(matches!(
            args.string("searchTerm"),
            Err(ToolError::MissingArgument(_))
        ));
    }

    #[test]
    fn test_limit_defaults() {
        assert_eq!(args(json!({})).limit(10).unwrap(), 10);
        assert_eq!(args(json!({"limit": 0})).limit(5).unwrap(), 5);
        assert_eq!(args(json!({"limit": null})).limit(5).unwrap(), 5);
        assert_eq!(args(json!({"limit": 3})).limit(5).unwrap(), 3);
        assert!(args(json!({"limit": -1})).limit(5).is_err());
        assert!(args(json!({"limit": "3"})).limit(5).is_err());
    }
}
