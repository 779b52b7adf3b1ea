// Stdio binding: newline-delimited JSON-RPC on stdin/stdout, single session

use crate::server::McpServer;
use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_util::codec::{AnyDelimiterCodec, FramedRead, FramedWrite, LinesCodec};
use tracing::{debug, info, warn};

/// Longest accepted input line
pub const MAX_LINE_BYTES: usize = 4 * 1024 * 1024;

/// Serve `server` on the process's stdin and stdout until stdin closes.
pub async fn serve_stdio(server: McpServer) -> Result<()> {
    info!("Serving MCP over stdio");
    serve_io(server, tokio::io::stdin(), tokio::io::stdout()).await
}

/// Serve `server` over any line-oriented byte stream pair.
///
/// Each message is handled on its own task; replies are funnelled through a
/// single writer so lines never interleave. Returns once the reader hits EOF
/// and every in-flight call has replied.
pub async fn serve_io<R, W>(server: McpServer, reader: R, writer: W) -> Result<()>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send + 'static,
{
    // Frames are raw bytes so a line that is not UTF-8 gets a parse error
    // reply instead of ending the session.
    let mut lines = FramedRead::new(
        reader,
        AnyDelimiterCodec::new_with_max_length(b"\n".to_vec(), Vec::new(), MAX_LINE_BYTES),
    );
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let writer_task = tokio::spawn(async move {
        let mut sink = FramedWrite::new(writer, LinesCodec::new());
        while let Some(line) = rx.recv().await {
            sink.send(line).await.context("Failed to write to stdout")?;
        }
        Ok::<_, anyhow::Error>(())
    });

    while let Some(frame) = lines.next().await {
        let frame = frame.context("Failed to read from stdin")?;
        let line = String::from_utf8_lossy(&frame).trim().to_string();
        if line.is_empty() {
            continue;
        }

        let server = server.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let Some(response) = server.handle_message(&line).await else {
                return;
            };
            match serde_json::to_string(&response) {
                Ok(json) => {
                    if tx.send(json).is_err() {
                        warn!("Output closed before response could be written");
                    }
                }
                Err(e) => warn!(error = %e, "Failed to serialize response"),
            }
        });
    }

    debug!("Input closed, waiting for in-flight calls");
    drop(tx);
    writer_task.await.context("Writer task panicked")??;

    info!("Stdio session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{Forwarder, ToolRegistry};
    use folo_core::{ApiRoute, ToolArguments, TransportKind};
    use folo_sdk::{FoloResult, QueryOutcome};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

    struct MissingToken;

    #[async_trait::async_trait]
    impl Forwarder for MissingToken {
        async fn forward(&self, _route: ApiRoute, _args: &ToolArguments) -> FoloResult<QueryOutcome> {
            Ok(QueryOutcome::MissingSessionToken)
        }
    }

    fn server() -> McpServer {
        McpServer::new(Arc::new(ToolRegistry::new(
            TransportKind::Stdio,
            Arc::new(MissingToken),
        )))
    }

    #[tokio::test]
    async fn test_request_reply_over_pipes() {
        let (mut client_in, server_in) = tokio::io::duplex(4096);
        let (server_out, client_out) = tokio::io::duplex(4096);

        let handle = tokio::spawn(serve_io(server(), server_in, server_out));

        client_in
            .write_all(b"{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n")
            .await
            .unwrap();
        client_in
            .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"tools/call\",\"params\":{\"name\":\"unread_count\"}}\n")
            .await
            .unwrap();

        let mut reader = BufReader::new(client_out).lines();
        let line = reader.next_line().await.unwrap().unwrap();
        let resp: Value = serde_json::from_str(&line).unwrap();

        assert_eq!(resp["id"], 1);
        assert_eq!(
            resp["result"]["content"][0]["text"],
            folo_sdk::MISSING_TOKEN_MESSAGE
        );

        drop(client_in);
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_blank_lines_and_garbage() {
        let (mut client_in, server_in) = tokio::io::duplex(4096);
        let (server_out, client_out) = tokio::io::duplex(4096);

        let handle = tokio::spawn(serve_io(server(), server_in, server_out));

        client_in.write_all(b"\n   \nnot json\n").await.unwrap();

        let mut reader = BufReader::new(client_out).lines();
        let line = reader.next_line().await.unwrap().unwrap();
        let resp: Value = serde_json::from_str(&line).unwrap();

        assert_eq!(resp["id"], Value::Null);
        assert_eq!(resp["error"]["code"], -32700);

        drop(client_in);
        handle.await.unwrap().unwrap();
        assert!(reader.next_line().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_utf8_keeps_session_alive() {
        let (mut client_in, server_in) = tokio::io::duplex(4096);
        let (server_out, client_out) = tokio::io::duplex(4096);

        let handle = tokio::spawn(serve_io(server(), server_in, server_out));

        client_in.write_all(b"\xff\xfe\n").await.unwrap();
        let mut reader = BufReader::new(client_out).lines();
        let line = reader.next_line().await.unwrap().unwrap();
        let resp: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(resp["error"]["code"], -32700);

        client_in
            .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":5,\"method\":\"ping\"}\r\n")
            .await
            .unwrap();
        let line = reader.next_line().await.unwrap().unwrap();
        let resp: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(resp["id"], 5);
        assert_eq!(resp["result"], json!({}));

        drop(client_in);
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_each_request_gets_its_own_reply() {
        let (mut client_in, server_in) = tokio::io::duplex(4096);
        let (server_out, client_out) = tokio::io::duplex(4096);

        let handle = tokio::spawn(serve_io(server(), server_in, server_out));

        for id in 1..=3 {
            let msg = json!({"jsonrpc": "2.0", "id": id, "method": "ping"});
            client_in
                .write_all(format!("{}\n", msg).as_bytes())
                .await
                .unwrap();
        }
        drop(client_in);

        let mut reader = BufReader::new(client_out).lines();
        let mut ids = Vec::new();
        while let Some(line) = reader.next_line().await.unwrap() {
            let resp: Value = serde_json::from_str(&line).unwrap();
            assert_eq!(resp["result"], json!({}));
            ids.push(resp["id"].as_i64().unwrap());
        }
        ids.sort();

        assert_eq!(ids, vec![1, 2, 3]);
        handle.await.unwrap().unwrap();
    }
}
