//! Stdio JSON-RPC server for the MCP tool surface.
//!
//! Requests arrive as line-delimited JSON-RPC 2.0 on stdin; responses go
//! out on stdout through a single writer task so concurrently handled
//! calls never interleave bytes. Logging goes to stderr only, keeping
//! stdout clean for the protocol.

use std::sync::Arc;

use anyhow::Result;
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use crate::garoon::GaroonClient;
use crate::mcp::tools;
use crate::mcp::types::{
    CallToolResult, INVALID_PARAMS, JsonRpcRequest, JsonRpcResponse, METHOD_NOT_FOUND, PARSE_ERROR,
};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "garoon-mcp";

pub struct McpServer {
    client: Arc<GaroonClient>,
}

impl McpServer {
    pub fn new(client: GaroonClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Handle one request. Returns `None` for notifications, which expect
    /// no reply.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let id = match request.id.clone() {
            Some(id) => id,
            None => {
                tracing::debug!(method = %request.method, "ignoring notification");
                return None;
            }
        };
        Some(handle_call(&self.client, request, id).await)
    }

    /// Serve until stdin closes. Each request runs on its own task; the
    /// shared client is the only state they touch.
    pub async fn run(self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let (tx, mut rx) = mpsc::channel::<String>(32);

        let writer = tokio::spawn(async move {
            let mut stdout = tokio::io::stdout();
            while let Some(line) = rx.recv().await {
                if stdout.write_all(line.as_bytes()).await.is_err()
                    || stdout.write_all(b"\n").await.is_err()
                    || stdout.flush().await.is_err()
                {
                    tracing::error!("stdout closed, dropping response");
                    break;
                }
            }
        });

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let request: JsonRpcRequest = match serde_json::from_str(&line) {
                Ok(request) => request,
                Err(err) => {
                    let response = JsonRpcResponse::error(
                        Value::Null,
                        PARSE_ERROR,
                        format!("parse error: {err}"),
                    );
                    send_response(&tx, response).await;
                    continue;
                }
            };

            let Some(id) = request.id.clone() else {
                tracing::debug!(method = %request.method, "ignoring notification");
                continue;
            };

            let client = Arc::clone(&self.client);
            let tx = tx.clone();
            tokio::spawn(async move {
                let response = handle_call(&client, request, id).await;
                send_response(&tx, response).await;
            });
        }

        // Writer exits once every in-flight task has dropped its sender.
        drop(tx);
        writer.await?;
        Ok(())
    }
}

async fn send_response(tx: &mpsc::Sender<String>, response: JsonRpcResponse) {
    match serde_json::to_string(&response) {
        Ok(line) => {
            if tx.send(line).await.is_err() {
                tracing::error!("response channel closed");
            }
        }
        Err(err) => tracing::error!(%err, "failed to serialize response"),
    }
}

async fn handle_call(client: &GaroonClient, request: JsonRpcRequest, id: Value) -> JsonRpcResponse {
    match request.method.as_str() {
        "initialize" => JsonRpcResponse::result(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {"tools": {}},
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": env!("CARGO_PKG_VERSION"),
                },
            }),
        ),
        "ping" => JsonRpcResponse::result(id, json!({})),
        "tools/list" => JsonRpcResponse::result(id, json!({"tools": tools::catalog()})),
        "resources/list" => JsonRpcResponse::result(id, json!({"resources": []})),
        "prompts/list" => JsonRpcResponse::result(id, json!({"prompts": []})),
        "tools/call" => {
            let Some(name) = request.params.get("name").and_then(Value::as_str) else {
                return JsonRpcResponse::error(id, INVALID_PARAMS, "missing tool name");
            };
            let Some(def) = tools::find(name) else {
                return JsonRpcResponse::error(
                    id,
                    INVALID_PARAMS,
                    format!("unknown tool '{name}'"),
                );
            };
            let arguments = request
                .params
                .get("arguments")
                .cloned()
                .unwrap_or(Value::Null);

            tracing::debug!(tool = name, "dispatching tool call");
            match tools::dispatch(client, def, &arguments).await {
                Ok(text) => JsonRpcResponse::result(id, CallToolResult::text(text)),
                Err(err) => {
                    tracing::warn!(tool = name, kind = err.kind(), %err, "tool call failed");
                    JsonRpcResponse::result(id, CallToolResult::failure(err.kind(), err.to_string()))
                }
            }
        }
        other => {
            JsonRpcResponse::error(id, METHOD_NOT_FOUND, format!("method not found: {other}"))
        }
    }
}
