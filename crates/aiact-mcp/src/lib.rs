// crates/aiact-mcp/src/lib.rs
// ============================================================================
// Module: Aiact MCP Library
// Description: JSON-RPC dispatch, framing, transports, and telemetry.
// Purpose: Serve the plugin registry over stdio and HTTP MCP transports.
// Dependencies: aiact-config, aiact-plugins, aiact-scan, axum, serde, tokio
// ============================================================================

//! ## Overview
//! The MCP layer is a thin dispatcher: it owns no compliance logic and routes
//! `tools/call` and `resources/read` into the read-only plugin registry. Two
//! transports share one dispatch path: Content-Length framed stdio and
//! JSON-RPC over HTTP, plus a REST scan endpoint for non-MCP clients.
//!
//! Invariants:
//! - The registry is read-only while serving; mutation ends at startup.
//! - Request payloads are size-limited on both transports.
//! - Tool handlers may block; HTTP dispatch runs them under `spawn_blocking`.

pub mod framing;
pub mod rpc;
pub mod server;
pub mod telemetry;

pub use framing::FramingError;
pub use framing::read_framed;
pub use framing::write_framed;
pub use rpc::JsonRpcError;
pub use rpc::JsonRpcRequest;
pub use rpc::JsonRpcResponse;
pub use server::McpServerError;
pub use server::ServerState;
pub use server::build_server_state;
pub use server::dispatch;
pub use server::handle_detect;
pub use server::handle_health;
pub use server::handle_ready;
pub use server::router;
pub use server::run_stdio;
pub use server::serve_http;
pub use telemetry::McpMethod;
pub use telemetry::McpMetricEvent;
pub use telemetry::McpMetrics;
pub use telemetry::McpOutcome;
pub use telemetry::NoopMetrics;
