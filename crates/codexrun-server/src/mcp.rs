//! MCP (Model Context Protocol) server implementation.
//!
//! Provides one MCP tool:
//! - `run_codex_task` - Execute a single implementation task via the Codex
//!   CLI and report what it did (summary, changed files, commands, tests).

use axum::Router;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    transport::streamable_http_server::{
        session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
    },
    ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use codexrun_codex_sdk::CodexExecutor;
use codexrun_core::{CommandRecord, Outcome, TaskInvocation, TestsStatus};

/// MCP server for Codexrun operations.
#[derive(Clone)]
pub struct CodexMcpServer {
    executor: CodexExecutor,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

// ============================================================================
// Tool Parameter Types
// ============================================================================

/// Parameters for run_codex_task tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RunCodexTaskParams {
    /// Task identifier from your plan (e.g. 'task-3').
    pub task_id: String,

    /// Full natural-language instructions for Codex, including acceptance
    /// criteria and which tests/commands to run.
    pub codex_prompt: String,
}

// ============================================================================
// Response Types
// ============================================================================

/// Structured result of run_codex_task.
#[derive(Debug, Serialize)]
pub struct RunCodexTaskResult {
    pub task_id: String,
    pub outcome: Outcome,
    pub summary: String,
    pub files_changed: Vec<String>,
    pub tests_status: TestsStatus,
    pub commands: Vec<CommandRecord>,
}

/// Render the human-readable text form of a task result.
fn render_result(result: &RunCodexTaskResult) -> String {
    let files = if result.files_changed.is_empty() {
        "(none)".to_string()
    } else {
        result.files_changed.join(", ")
    };

    format!(
        "Codex completed task {} with outcome {}.\n\
         Summary: {}\n\
         Files changed: {}\n\
         Tests status: {}",
        result.task_id, result.outcome, result.summary, files, result.tests_status
    )
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl CodexMcpServer {
    /// Create a new MCP server backed by the given executor.
    pub fn new(executor: CodexExecutor) -> Self {
        Self {
            executor,
            tool_router: Self::tool_router(),
        }
    }

    /// Run a single Codex task in the configured workspace.
    #[tool(description = "Executes a single implementation task via Codex CLI in the configured workspace repository.")]
    async fn run_codex_task(
        &self,
        Parameters(params): Parameters<RunCodexTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        let invocation = match TaskInvocation::new(&params.task_id, &params.codex_prompt) {
            Ok(invocation) => invocation,
            Err(e) => {
                return Ok(CallToolResult::error(vec![Content::text(format!(
                    "Invalid task parameters: {}",
                    e
                ))]));
            }
        };

        info!(task_id = %invocation.id, "Running codex task via MCP");

        let report = match self.executor.run(&invocation).await {
            Ok(report) => report,
            Err(e) => {
                warn!(task_id = %invocation.id, error = %e, "Codex run failed");
                return Ok(CallToolResult::error(vec![Content::text(format!(
                    "Codex run failed: {}",
                    e
                ))]));
            }
        };

        let result = RunCodexTaskResult {
            task_id: report.task_id.as_str().to_string(),
            outcome: report.outcome(),
            summary: report.summary.clone(),
            files_changed: report.files_changed.clone(),
            tests_status: report.tests_status,
            commands: report.commands.clone(),
        };

        info!(
            task_id = %result.task_id,
            outcome = %result.outcome,
            files_changed = result.files_changed.len(),
            raw_events = report.raw_events_count,
            "Codex task completed"
        );

        let mut tool_result = CallToolResult::success(vec![Content::text(render_result(&result))]);
        tool_result.structured_content = serde_json::to_value(&result).ok();
        Ok(tool_result)
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl ServerHandler for CodexMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: rmcp::model::Implementation {
                name: "codexrun-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                website_url: None,
                icons: None,
            },
            instructions: Some(
                "Codexrun MCP Server - Run implementation tasks with the Codex CLI. \
                 Use run_codex_task with a task id and full instructions; the result \
                 reports the agent's summary, changed files, commands, and test status."
                    .to_string(),
            ),
        }
    }
}

// ============================================================================
// HTTP Server Setup
// ============================================================================

/// Create an axum Router for the MCP HTTP server.
///
/// This router handles MCP protocol requests over HTTP using the Streamable
/// HTTP transport. Mount this at `/mcp` on your existing HTTP server or run
/// it standalone.
pub fn create_mcp_router(executor: CodexExecutor, ct: CancellationToken) -> Router {
    let service = StreamableHttpService::new(
        move || Ok(CodexMcpServer::new(executor.clone())),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig {
            cancellation_token: ct,
            ..Default::default()
        },
    );

    info!("MCP server initialized with Streamable HTTP transport");

    Router::new().nest_service("/mcp", service)
}
