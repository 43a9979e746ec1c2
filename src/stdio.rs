//! Line-oriented JSON-RPC transport over stdin/stdout
//!
//! One request per line in, one response per line out. Only the roster and
//! schedule tools are exposed here, and tool failures come back as results
//! flagged with `isError`. Stdout carries protocol frames only; logs go to
//! stderr.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::aggregator::Aggregator;
use crate::error::Result;
use crate::tools::{ErrorStyle, ProtocolHandler, RpcRequest, RpcResponse, ToolDispatcher, ToolSet};

/// Protocol handler configured for the stdio transport
pub fn stdio_handler(aggregator: Aggregator) -> ProtocolHandler {
    ProtocolHandler::new(
        ToolDispatcher::new(aggregator, ToolSet::Embedded),
        ErrorStyle::ToolResult,
    )
}

/// Serve requests from stdin until it closes
pub async fn run(aggregator: Aggregator) -> Result<()> {
    let handler = stdio_handler(aggregator);
    tracing::info!("Athletics tool server running on stdio");

    serve(&handler, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}

/// Serve newline-delimited requests from `reader`, writing responses to `writer`
///
/// Notifications are logged and skipped without a response. Blank lines are
/// skipped too.
pub async fn serve<R, W>(handler: &ProtocolHandler, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<RpcRequest>(line) {
            Ok(request) if request.is_notification() => {
                tracing::debug!(method = %request.method, "Notification received");
                continue;
            }
            Ok(request) => handler.handle(request).await,
            Err(e) => {
                tracing::warn!(error = %e, "Undecodable message on stdin");
                RpcResponse::decode_error(&e)
            }
        };

        let mut frame = serde_json::to_vec(&response)?;
        frame.push(b'\n');
        writer.write_all(&frame).await?;
        writer.flush().await?;
    }

    tracing::info!("Stdin closed, stopping");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::crawler::fetcher::PageLoader;
    use crate::crawler::Extractor;
    use crate::utils::error::FetchError;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Arc;
    use std::time::Duration;

    struct TimeoutLoader;

    #[async_trait]
    impl PageLoader for TimeoutLoader {
        async fn load(&self, url: &::url::Url, _grace: Duration) -> std::result::Result<String, FetchError> {
            Err(FetchError::Timeout {
                url: url.to_string(),
                secs: 30,
            })
        }
    }

    fn handler() -> ProtocolHandler {
        let config = Config::default();
        let extractor = Extractor::with_loader(&config, Arc::new(TimeoutLoader)).unwrap();
        stdio_handler(Aggregator::new(extractor, config.catalog()))
    }

    async fn exchange(input: &str) -> Vec<Value> {
        let mut output = Vec::new();
        serve(&handler(), input.as_bytes(), &mut output).await.unwrap();

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_lists_embedded_tools_only() {
        let responses = exchange("{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"tools/list\"}\n").await;

        let tools = responses[0]["result"]["tools"].as_array().unwrap();
        let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["get_roster", "get_schedule"]);
    }

    #[tokio::test]
    async fn test_notifications_get_no_reply() {
        let input = concat!(
            "{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n",
            "\n",
            "{\"jsonrpc\":\"2.0\",\"id\":7,\"method\":\"initialize\"}\n",
        );
        let responses = exchange(input).await;

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["id"], 7);
        assert_eq!(responses[0]["result"]["protocolVersion"], "0.1.0");
    }

    #[tokio::test]
    async fn test_tool_errors_are_flagged_results() {
        let input = concat!(
            "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"tools/call\",\"params\":{\"name\":\"get_stats\",\"arguments\":{\"sport\":\"football\"}}}\n",
            "{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"tools/call\",\"params\":{\"name\":\"get_roster\",\"arguments\":{\"sport\":\"football\"}}}\n",
        );
        let responses = exchange(input).await;

        assert_eq!(responses[0]["result"]["isError"], true);
        assert_eq!(
            responses[0]["result"]["content"][0]["text"],
            "Error: Unknown tool: get_stats"
        );

        assert_eq!(responses[1]["result"]["isError"], true);
        let text = responses[1]["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("Error: "));
        assert!(text.contains("timeout"));
    }

    #[tokio::test]
    async fn test_unknown_method_and_garbage() {
        let input = concat!(
            "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"resources/list\"}\n",
            "not json\n",
        );
        let responses = exchange(input).await;

        assert_eq!(responses[0]["error"]["code"], -32601);
        assert_eq!(responses[1]["error"]["code"], -32700);
        assert!(responses[1]["id"].is_null());
    }
}
