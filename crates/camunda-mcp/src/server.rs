//! MCP (Model Context Protocol) server implementation.
//!
//! Provides MCP tools for interacting with a Camunda engine:
//! - `list_tasks` - List tasks, optionally filtered by assignee or process
//! - `get_task_details` - Get all fields of one task
//! - `complete_task` - Complete a task with optional variables
//! - `create_task` - Create a standalone task
//! - `list_process_instances` - List process instances
//! - `list_process_definitions` - List deployed process definitions
//! - `get_task_comments` - List comments on a task
//! - `add_task_comment` - Post a comment on a task

use std::sync::Arc;

use axum::Router;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    transport::streamable_http_server::{
        session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
    },
    ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use camunda_client::{CamundaClient, ClientError, ProcessInstanceQuery, TaskQuery};

use crate::format;

pub const SERVER_NAME: &str = "camunda-mcp-server";

/// MCP server for Camunda operations.
#[derive(Clone)]
pub struct CamundaMcpServer {
    client: Arc<CamundaClient>,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Tool Parameter Types
// ============================================================================

/// Parameters for list_tasks tool.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListTasksParams {
    /// Filter tasks by assignee (username).
    #[serde(default)]
    pub assignee: Option<String>,

    /// Filter tasks by process definition key.
    #[serde(default)]
    pub process_definition_key: Option<String>,
}

/// Parameters for tools addressing a single task.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct TaskIdParams {
    /// The ID of the task.
    pub task_id: String,
}

/// Parameters for complete_task tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CompleteTaskParams {
    /// The ID of the task to complete.
    pub task_id: String,

    /// Variables to set when completing the task.
    #[serde(default)]
    pub variables: Option<Map<String, Value>>,
}

/// Parameters for create_task tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateTaskParams {
    /// Name of the new task.
    pub name: String,

    /// Assignee for the task.
    #[serde(default)]
    pub assignee: Option<String>,

    /// Description for the task.
    #[serde(default)]
    pub description: Option<String>,

    /// Priority level.
    #[serde(default)]
    pub priority: Option<i64>,
}

impl CreateTaskParams {
    /// Field map sent to the engine; empty strings are left out.
    pub fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::from(self.name.as_str()));
        for (key, value) in [("assignee", &self.assignee), ("description", &self.description)] {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                fields.insert(key.to_string(), Value::from(value));
            }
        }
        if let Some(priority) = self.priority {
            fields.insert("priority".to_string(), Value::from(priority));
        }
        fields
    }
}

/// Parameters for list_process_instances tool.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListProcessInstancesParams {
    /// Filter by process definition key.
    #[serde(default)]
    pub process_definition_key: Option<String>,

    /// Filter by business key.
    #[serde(default)]
    pub business_key: Option<String>,
}

impl ListProcessInstancesParams {
    pub fn to_query(&self) -> ProcessInstanceQuery {
        let mut extra = Map::new();
        if let Some(key) = self.business_key.as_deref().filter(|k| !k.is_empty()) {
            extra.insert("businessKey".to_string(), Value::from(key));
        }
        ProcessInstanceQuery {
            process_definition_key: self.process_definition_key.clone(),
            extra,
        }
    }
}

/// Parameters for add_task_comment tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddTaskCommentParams {
    /// The ID of the task to comment on.
    pub task_id: String,

    /// The comment message text.
    pub message: String,
}

/// Log a failed operation and turn it into a tool error result.
fn failure(action: &str, err: ClientError) -> CallToolResult {
    error!(error = %err, "Error {}", action);
    CallToolResult::error(vec![Content::text(format!("Error {}: {}", action, err))])
}

fn success(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl CamundaMcpServer {
    /// Create a new MCP server backed by the given client.
    pub fn new(client: Arc<CamundaClient>) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "List tasks from Camunda, optionally filtered by assignee or process definition key.")]
    async fn list_tasks(
        &self,
        Parameters(params): Parameters<ListTasksParams>,
    ) -> Result<CallToolResult, McpError> {
        info!(
            assignee = ?params.assignee,
            process = ?params.process_definition_key,
            "Listing tasks"
        );

        let query = TaskQuery {
            assignee: params.assignee,
            process_definition_key: params.process_definition_key,
            ..Default::default()
        };
        match self.client.list_tasks(&query).await {
            Ok(tasks) => Ok(success(format::task_list(&tasks))),
            Err(e) => Ok(failure("retrieving tasks", e)),
        }
    }

    #[tool(description = "Get detailed information for a specific task.")]
    async fn get_task_details(
        &self,
        Parameters(params): Parameters<TaskIdParams>,
    ) -> Result<CallToolResult, McpError> {
        info!(task_id = %params.task_id, "Getting task details");

        match self.client.get_task(&params.task_id).await {
            Ok(task) => Ok(success(format::task_details(&params.task_id, &task))),
            Err(e) => Ok(failure("retrieving task details", e)),
        }
    }

    #[tool(description = "Complete a Camunda task with optional variables.")]
    async fn complete_task(
        &self,
        Parameters(params): Parameters<CompleteTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        info!(task_id = %params.task_id, "Completing task");

        // Fetch first so the summary can show what was completed
        let task = match self.client.get_task(&params.task_id).await {
            Ok(task) => task,
            Err(e) => return Ok(failure("completing task", e)),
        };

        let variables = params.variables.as_ref();
        match self.client.complete_task(&params.task_id, variables).await {
            Ok(()) => Ok(success(format::task_completed(
                &params.task_id,
                &task,
                variables,
            ))),
            Err(e) => Ok(failure("completing task", e)),
        }
    }

    #[tool(description = "Create a new standalone task in Camunda.")]
    async fn create_task(
        &self,
        Parameters(params): Parameters<CreateTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        info!(name = %params.name, "Creating task");

        match self.client.create_task(&params.to_fields()).await {
            Ok(task) => Ok(success(format::task_created(&task))),
            Err(e) => Ok(failure("creating task", e)),
        }
    }

    #[tool(description = "List process instances from Camunda, optionally filtered by process definition key or business key.")]
    async fn list_process_instances(
        &self,
        Parameters(params): Parameters<ListProcessInstancesParams>,
    ) -> Result<CallToolResult, McpError> {
        info!("Listing process instances");

        match self.client.get_process_instances(&params.to_query()).await {
            Ok(instances) => Ok(success(format::process_instances(&instances))),
            Err(e) => Ok(failure("retrieving process instances", e)),
        }
    }

    #[tool(description = "List available process definitions from Camunda.")]
    async fn list_process_definitions(&self) -> Result<CallToolResult, McpError> {
        info!("Listing process definitions");

        match self.client.get_process_definitions().await {
            Ok(definitions) => Ok(success(format::process_definitions(&definitions))),
            Err(e) => Ok(failure("retrieving process definitions", e)),
        }
    }

    #[tool(description = "Get all comments for a specific task.")]
    async fn get_task_comments(
        &self,
        Parameters(params): Parameters<TaskIdParams>,
    ) -> Result<CallToolResult, McpError> {
        info!(task_id = %params.task_id, "Getting task comments");

        match self.client.get_task_comments(&params.task_id).await {
            Ok(comments) => Ok(success(format::comments(&params.task_id, &comments))),
            Err(e) => Ok(failure("retrieving comments", e)),
        }
    }

    #[tool(description = "Add a comment to a specific task.")]
    async fn add_task_comment(
        &self,
        Parameters(params): Parameters<AddTaskCommentParams>,
    ) -> Result<CallToolResult, McpError> {
        info!(task_id = %params.task_id, "Adding task comment");

        match self
            .client
            .add_task_comment(&params.task_id, &params.message)
            .await
        {
            Ok(comment) => Ok(success(format::comment_added(&params.task_id, &comment))),
            Err(e) => Ok(failure("adding comment", e)),
        }
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl ServerHandler for CamundaMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: rmcp::model::Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                website_url: None,
                icons: None,
            },
            instructions: Some(
                "Camunda MCP Server - Work with user tasks and processes on a Camunda 7 engine. \
                 Use list_tasks to find tasks, get_task_details to inspect one, and \
                 complete_task to finish it."
                    .to_string(),
            ),
        }
    }
}

// ============================================================================
// HTTP Server Setup
// ============================================================================

/// Create an axum Router serving MCP over the Streamable HTTP transport at `/mcp`.
pub fn create_mcp_router(client: Arc<CamundaClient>, ct: CancellationToken) -> Router {
    let service = StreamableHttpService::new(
        move || Ok(CamundaMcpServer::new(client.clone())),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig {
            cancellation_token: ct,
            ..Default::default()
        },
    );

    info!("MCP server initialized with Streamable HTTP transport");

    Router::new().nest_service("/mcp", service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camunda_client::ConnectionProfile;

    fn server() -> CamundaMcpServer {
        let client = CamundaClient::new(ConnectionProfile::default()).unwrap();
        CamundaMcpServer::new(Arc::new(client))
    }

    #[test]
    fn test_all_tools_registered() {
        let server = server();
        let mut names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();

        assert_eq!(
            names,
            vec![
                "add_task_comment",
                "complete_task",
                "create_task",
                "get_task_comments",
                "get_task_details",
                "list_process_definitions",
                "list_process_instances",
                "list_tasks",
            ]
        );
    }

    #[test]
    fn test_server_info_name() {
        assert_eq!(server().get_info().server_info.name, "camunda-mcp-server");
    }

    #[test]
    fn test_create_task_fields() {
        let params = CreateTaskParams {
            name: "Call customer".to_string(),
            assignee: Some(String::new()),
            description: Some("Ask about invoice".to_string()),
            priority: Some(70),
        };
        let fields = params.to_fields();

        assert_eq!(fields["name"], "Call customer");
        assert!(!fields.contains_key("assignee"));
        assert_eq!(fields["description"], "Ask about invoice");
        assert_eq!(fields["priority"], 70);
    }

    #[test]
    fn test_business_key_becomes_filter() {
        let params = ListProcessInstancesParams {
            process_definition_key: Some("order".to_string()),
            business_key: Some("B-7".to_string()),
        };
        let query = params.to_query().to_params();
        assert_eq!(query.get("processDefinitionKey"), Some("order"));
        assert_eq!(query.get("businessKey"), Some("B-7"));
    }
}
