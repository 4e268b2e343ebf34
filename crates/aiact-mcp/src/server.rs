// crates/aiact-mcp/src/server.rs
// ============================================================================
// Module: MCP Server
// Description: JSON-RPC dispatch and the stdio and HTTP transports.
// Purpose: Serve registry tools and resources with size-limited requests.
// Dependencies: aiact-config, aiact-plugins, aiact-scan, axum, tokio
// ============================================================================

//! ## Overview
//! One dispatch path serves both transports. The stdio loop reads framed
//! requests on the calling thread; the HTTP handler runs the same dispatch
//! under `spawn_blocking` because tool handlers may perform blocking I/O.
//! Every request is classified, counted, and timed through [`McpMetrics`].
//!
//! Invariants:
//! - Dispatch never panics on malformed input; it answers with a JSON-RPC
//!   error instead.
//! - Unknown tool errors list the registered tool names so clients can
//!   self-correct.
//! - The registry behind the state is never mutated while serving.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::BufReader;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use aiact_config::ServerConfig;
use aiact_config::ServerTransport;
use aiact_plugins::PluginRegistry;
use aiact_plugins::ToolError;
use aiact_scan::ScanClient;
use aiact_scan::ScanReport;
use aiact_scan::ScanRequest;
use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::routing::post;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::framing::FramingError;
use crate::framing::read_framed_with_limits;
use crate::framing::write_framed;
use crate::rpc::INTERNAL_ERROR;
use crate::rpc::INVALID_PARAMS;
use crate::rpc::INVALID_REQUEST;
use crate::rpc::JsonRpcRequest;
use crate::rpc::JsonRpcResponse;
use crate::rpc::METHOD_NOT_FOUND;
use crate::rpc::PARSE_ERROR;
use crate::rpc::TOOL_ERROR;
use crate::telemetry::McpMethod;
use crate::telemetry::McpMetricEvent;
use crate::telemetry::McpMetrics;
use crate::telemetry::McpOutcome;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by the transport loops.
#[derive(Debug, Error)]
pub enum McpServerError {
    /// The bind address could not be parsed.
    #[error("invalid bind address: {0}")]
    InvalidBind(String),
    /// The listener could not be created or the server failed.
    #[error("server io failure: {0}")]
    Io(String),
    /// The stdio stream produced a malformed frame.
    #[error("stdio framing failure: {0}")]
    Framing(#[from] FramingError),
}

// ============================================================================
// SECTION: State
// ============================================================================

/// Shared server state behind both transports.
pub struct ServerState {
    /// Read-only plugin registry.
    registry: Arc<PluginRegistry>,
    /// Scoring proxy client for the REST scan endpoint.
    scan: Arc<ScanClient>,
    /// Transport label for telemetry.
    transport: ServerTransport,
    /// Maximum accepted request payload, in bytes.
    max_request_bytes: usize,
    /// Maximum accepted frame header section, in bytes.
    max_frame_header_bytes: usize,
    /// Metrics sink.
    metrics: Arc<dyn McpMetrics>,
}

/// Builds the shared server state from configuration.
#[must_use]
pub fn build_server_state(
    registry: Arc<PluginRegistry>,
    scan: Arc<ScanClient>,
    config: &ServerConfig,
    metrics: Arc<dyn McpMetrics>,
) -> ServerState {
    ServerState {
        registry,
        scan,
        transport: config.transport,
        max_request_bytes: config.max_request_bytes,
        max_frame_header_bytes: config.max_frame_header_bytes,
        metrics,
    }
}

// ============================================================================
// SECTION: Dispatch
// ============================================================================

/// Parses and dispatches one JSON-RPC request payload.
///
/// Always returns a response; malformed payloads yield JSON-RPC errors.
#[must_use]
pub fn dispatch(state: &ServerState, bytes: &[u8]) -> JsonRpcResponse {
    let started = Instant::now();
    let (method, tool, response) = route_payload(state, bytes);
    let outcome = if response.error.is_some() {
        McpOutcome::Error
    } else {
        McpOutcome::Ok
    };
    let event = McpMetricEvent {
        transport: state.transport,
        method,
        tool,
        outcome,
        error_code: response.error.as_ref().map(|error| error.code),
        request_bytes: bytes.len(),
        response_bytes: serde_json::to_vec(&response).map_or(0, |body| body.len()),
    };
    state.metrics.record_request(event.clone());
    state.metrics.record_latency(event, started.elapsed());
    response
}

/// Routes a raw payload to its method handler.
fn route_payload(state: &ServerState, bytes: &[u8]) -> (McpMethod, Option<String>, JsonRpcResponse) {
    if bytes.len() > state.max_request_bytes {
        return (
            McpMethod::Invalid,
            None,
            JsonRpcResponse::failure(
                Value::Null,
                INVALID_REQUEST,
                "request payload exceeds limit",
                None,
            ),
        );
    }
    let Ok(parsed) = serde_json::from_slice::<Value>(bytes) else {
        return (
            McpMethod::Invalid,
            None,
            JsonRpcResponse::failure(Value::Null, PARSE_ERROR, "payload is not valid json", None),
        );
    };
    let id = parsed.get("id").cloned().unwrap_or(Value::Null);
    let Ok(request) = serde_json::from_value::<JsonRpcRequest>(parsed) else {
        return (
            McpMethod::Invalid,
            None,
            JsonRpcResponse::failure(id, INVALID_REQUEST, "not a json-rpc 2.0 request", None),
        );
    };
    if request.jsonrpc != "2.0" {
        return (
            McpMethod::Invalid,
            None,
            JsonRpcResponse::failure(
                request.id,
                INVALID_REQUEST,
                "jsonrpc version must be 2.0",
                None,
            ),
        );
    }

    match request.method.as_str() {
        "initialize" => (McpMethod::Initialize, None, handle_initialize(state, request)),
        "tools/list" => (McpMethod::ToolsList, None, handle_tools_list(state, request)),
        "tools/call" => {
            let tool = request
                .params
                .get("name")
                .and_then(Value::as_str)
                .map(ToString::to_string);
            (McpMethod::ToolsCall, tool, handle_tools_call(state, request))
        }
        "resources/list" => {
            (McpMethod::ResourcesList, None, handle_resources_list(state, request))
        }
        "resources/read" => {
            (McpMethod::ResourcesRead, None, handle_resources_read(state, request))
        }
        _ => (
            McpMethod::Other,
            None,
            JsonRpcResponse::failure(
                request.id,
                METHOD_NOT_FOUND,
                format!("unknown method: {}", request.method),
                None,
            ),
        ),
    }
}

/// Answers `initialize` with the server identity and capabilities.
fn handle_initialize(state: &ServerState, request: JsonRpcRequest) -> JsonRpcResponse {
    JsonRpcResponse::success(
        request.id,
        json!({
            "protocolVersion": "2024-11-05",
            "serverInfo": {
                "name": "aiact",
                "version": env!("CARGO_PKG_VERSION"),
            },
            "capabilities": {
                "tools": {},
                "resources": {},
            },
            "instructions": format!(
                "{} compliance tools registered",
                state.registry.tool_definitions().len()
            ),
        }),
    )
}

/// Answers `tools/list` with every registered tool definition.
fn handle_tools_list(state: &ServerState, request: JsonRpcRequest) -> JsonRpcResponse {
    let tools = state.registry.tool_definitions();
    match serde_json::to_value(tools) {
        Ok(tools) => JsonRpcResponse::success(request.id, json!({ "tools": tools })),
        Err(err) => {
            JsonRpcResponse::failure(request.id, INTERNAL_ERROR, err.to_string(), None)
        }
    }
}

/// Answers `tools/call` by invoking the registered handler.
fn handle_tools_call(state: &ServerState, request: JsonRpcRequest) -> JsonRpcResponse {
    let Some(name) = request.params.get("name").and_then(Value::as_str) else {
        return JsonRpcResponse::failure(
            request.id,
            INVALID_PARAMS,
            "params.name must be a string",
            None,
        );
    };
    let Some(entry) = state.registry.tool(name) else {
        return JsonRpcResponse::failure(
            request.id,
            INVALID_PARAMS,
            format!("unknown tool: {name}"),
            Some(json!({ "registered_tools": state.registry.tool_names() })),
        );
    };
    let arguments = request.params.get("arguments").cloned().unwrap_or_else(|| json!({}));

    match (entry.handler)(&arguments) {
        Ok(result) => {
            let text = serde_json::to_string(&result).unwrap_or_default();
            JsonRpcResponse::success(
                request.id,
                json!({ "content": [{ "type": "text", "text": text }] }),
            )
        }
        Err(ToolError::InvalidInput(message)) => JsonRpcResponse::failure(
            request.id,
            INVALID_PARAMS,
            message,
            Some(json!({ "kind": "invalid_input", "tool": name })),
        ),
        Err(ToolError::Execution(message)) => JsonRpcResponse::failure(
            request.id,
            TOOL_ERROR,
            message,
            Some(json!({ "kind": "execution", "tool": name })),
        ),
    }
}

/// Answers `resources/list` with every registered resource descriptor.
fn handle_resources_list(state: &ServerState, request: JsonRpcRequest) -> JsonRpcResponse {
    let resources = state.registry.resource_descriptors();
    match serde_json::to_value(resources) {
        Ok(resources) => {
            JsonRpcResponse::success(request.id, json!({ "resources": resources }))
        }
        Err(err) => {
            JsonRpcResponse::failure(request.id, INTERNAL_ERROR, err.to_string(), None)
        }
    }
}

/// Answers `resources/read` with the content of one resource.
fn handle_resources_read(state: &ServerState, request: JsonRpcRequest) -> JsonRpcResponse {
    let Some(uri) = request.params.get("uri").and_then(Value::as_str) else {
        return JsonRpcResponse::failure(
            request.id,
            INVALID_PARAMS,
            "params.uri must be a string",
            None,
        );
    };
    let Some(entry) = state.registry.resource(uri) else {
        let registered: Vec<String> = state
            .registry
            .resource_descriptors()
            .into_iter()
            .map(|descriptor| descriptor.uri)
            .collect();
        return JsonRpcResponse::failure(
            request.id,
            INVALID_PARAMS,
            format!("unknown resource: {uri}"),
            Some(json!({ "registered_resources": registered })),
        );
    };
    JsonRpcResponse::success(
        request.id,
        json!({
            "contents": [{
                "uri": entry.descriptor.uri,
                "mimeType": entry.descriptor.mime_type,
                "text": entry.content,
            }]
        }),
    )
}

// ============================================================================
// SECTION: HTTP Transport
// ============================================================================

/// Builds the HTTP router over the shared state.
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/mcp", post(handle_mcp))
        .route("/health", get(handle_health))
        .route("/ready", get(handle_ready))
        .route("/detect_prompt_injection", post(handle_detect))
        .with_state(state)
}

/// Serves the HTTP transport until the listener fails.
///
/// # Errors
///
/// Returns [`McpServerError`] when the bind address is invalid or the
/// listener cannot be created.
pub async fn serve_http(state: Arc<ServerState>, bind: &str) -> Result<(), McpServerError> {
    let addr: SocketAddr =
        bind.parse().map_err(|_| McpServerError::InvalidBind(bind.to_string()))?;
    let listener =
        TcpListener::bind(addr).await.map_err(|err| McpServerError::Io(err.to_string()))?;
    axum::serve(listener, router(state))
        .await
        .map_err(|err| McpServerError::Io(err.to_string()))
}

/// POST /mcp: JSON-RPC over HTTP.
async fn handle_mcp(
    State(state): State<Arc<ServerState>>,
    body: Bytes,
) -> (StatusCode, Json<JsonRpcResponse>) {
    if body.len() > state.max_request_bytes {
        return (
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(JsonRpcResponse::failure(
                Value::Null,
                INVALID_REQUEST,
                "request payload exceeds limit",
                None,
            )),
        );
    }
    let worker_state = Arc::clone(&state);
    let response =
        tokio::task::spawn_blocking(move || dispatch(&worker_state, &body)).await;
    match response {
        Ok(response) => (StatusCode::OK, Json(response)),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(JsonRpcResponse::failure(
                Value::Null,
                INTERNAL_ERROR,
                err.to_string(),
                None,
            )),
        ),
    }
}

/// GET /health: liveness probe.
pub async fn handle_health() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// GET /ready: readiness probe; ready once plugins are registered.
pub async fn handle_ready(State(state): State<Arc<ServerState>>) -> (StatusCode, Json<Value>) {
    let plugins = state.registry.plugins();
    if plugins.is_empty() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "not_ready", "reason": "no plugins registered" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({ "status": "ready", "plugins": plugins.len() })),
    )
}

/// POST /detect_prompt_injection: REST scan endpoint for non-MCP clients.
pub async fn handle_detect(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<ScanRequest>,
) -> (StatusCode, Json<Value>) {
    let scan = Arc::clone(&state.scan);
    let metrics = Arc::clone(&state.metrics);
    let transport = state.transport;
    let report = tokio::task::spawn_blocking(move || {
        let started = Instant::now();
        let report: ScanReport = scan.analyze(&request);
        let event = McpMetricEvent {
            transport,
            method: McpMethod::Detect,
            tool: None,
            outcome: McpOutcome::Ok,
            error_code: None,
            request_bytes: request.text.len(),
            response_bytes: 0,
        };
        metrics.record_request(event.clone());
        metrics.record_latency(event, started.elapsed());
        report
    })
    .await;
    match report {
        Ok(report) => match serde_json::to_value(&report) {
            Ok(body) => (StatusCode::OK, Json(body)),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            ),
        },
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": err.to_string() })),
        ),
    }
}

// ============================================================================
// SECTION: Stdio Transport
// ============================================================================

/// Runs the stdio transport loop until EOF.
///
/// # Errors
///
/// Returns [`McpServerError`] on malformed frames or stream failures; a
/// clean EOF ends the loop with `Ok`.
pub fn run_stdio(state: &ServerState) -> Result<(), McpServerError> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut reader = BufReader::new(stdin.lock());
    let mut writer = stdout.lock();
    loop {
        let payload = match read_framed_with_limits(
            &mut reader,
            state.max_request_bytes,
            state.max_frame_header_bytes,
        ) {
            Ok(payload) => payload,
            Err(FramingError::Eof) => return Ok(()),
            Err(err) => return Err(McpServerError::Framing(err)),
        };
        let response = dispatch(state, &payload);
        let body =
            serde_json::to_vec(&response).map_err(|err| McpServerError::Io(err.to_string()))?;
        write_framed(&mut writer, &body)?;
    }
}
