//! Operation facade: one method per supported engine operation.

use reqwest::Method;
use serde_json::{json, Map, Value};
use tracing::{error, info};

use camunda_core::{decode_list, Comment, Entity, ProcessInstance, Task};

use crate::config::ConnectionProfile;
use crate::error::ClientError;
use crate::gateway::{HttpGateway, RequestOptions};
use crate::query::QueryParams;

/// Filters for [`CamundaClient::list_tasks`].
#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    pub assignee: Option<String>,
    pub process_definition_key: Option<String>,

    /// Additional engine filters, overlaid after the named ones.
    pub extra: Map<String, Value>,
}

impl TaskQuery {
    /// Build the query string: named parameters first, then `extra` on top.
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.set_opt("assignee", self.assignee.as_deref());
        params.set_opt("processDefinitionKey", self.process_definition_key.as_deref());
        params.merge(&self.extra);
        params
    }
}

/// Filters for [`CamundaClient::get_process_instances`].
#[derive(Debug, Clone, Default)]
pub struct ProcessInstanceQuery {
    pub process_definition_key: Option<String>,

    /// Additional engine filters, overlaid after the named one.
    pub extra: Map<String, Value>,
}

impl ProcessInstanceQuery {
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.set_opt("processDefinitionKey", self.process_definition_key.as_deref());
        params.merge(&self.extra);
        params
    }
}

/// Client for the Camunda 7 REST API.
///
/// Construct once and share by reference; it holds the resolved profile and a
/// reusable HTTP session, nothing else.
pub struct CamundaClient {
    gateway: HttpGateway,
}

impl CamundaClient {
    /// Create a client for the given connection profile.
    pub fn new(profile: ConnectionProfile) -> Result<Self, ClientError> {
        let gateway = HttpGateway::new(profile)?;
        info!(url = %gateway.profile().base_url, "Camunda client initialized");
        Ok(Self { gateway })
    }

    pub fn profile(&self) -> &ConnectionProfile {
        self.gateway.profile()
    }

    /// List tasks in engine order.
    pub async fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>, ClientError> {
        let data = self
            .gateway
            .send(Method::GET, "/task", RequestOptions::with_query(query.to_params()))
            .await?;
        Ok(decode_list(&data)?)
    }

    /// Get a single task by ID.
    pub async fn get_task(&self, task_id: &str) -> Result<Task, ClientError> {
        let data = self
            .gateway
            .send(Method::GET, &format!("/task/{}", task_id), RequestOptions::default())
            .await?;
        Ok(Task::decode(&data)?)
    }

    /// Complete a task, optionally submitting process variables.
    ///
    /// Each variable is wrapped as `{"value": v}`.
    pub async fn complete_task(
        &self,
        task_id: &str,
        variables: Option<&Map<String, Value>>,
    ) -> Result<(), ClientError> {
        let mut payload = Map::new();
        if let Some(variables) = variables.filter(|v| !v.is_empty()) {
            let wrapped: Map<String, Value> = variables
                .iter()
                .map(|(key, value)| (key.clone(), json!({ "value": value })))
                .collect();
            payload.insert("variables".to_string(), Value::Object(wrapped));
        }

        self.gateway
            .send(
                Method::POST,
                &format!("/task/{}/complete", task_id),
                RequestOptions::with_body(Value::Object(payload)),
            )
            .await?;

        info!(task_id = %task_id, "Task completed");
        Ok(())
    }

    /// Create a standalone task from a raw field map.
    pub async fn create_task(&self, fields: &Map<String, Value>) -> Result<Task, ClientError> {
        let data = self
            .gateway
            .send(
                Method::POST,
                "/task/create",
                RequestOptions::with_body(Value::Object(fields.clone())),
            )
            .await?;
        Ok(Task::decode(&data)?)
    }

    pub async fn get_task_comments(&self, task_id: &str) -> Result<Vec<Comment>, ClientError> {
        let data = self
            .gateway
            .send(
                Method::GET,
                &format!("/task/{}/comment", task_id),
                RequestOptions::default(),
            )
            .await?;
        Ok(decode_list(&data)?)
    }

    pub async fn add_task_comment(
        &self,
        task_id: &str,
        message: &str,
    ) -> Result<Comment, ClientError> {
        let data = self
            .gateway
            .send(
                Method::POST,
                &format!("/task/{}/comment", task_id),
                RequestOptions::with_body(json!({ "message": message })),
            )
            .await?;
        Ok(Comment::decode(&data)?)
    }

    /// List process instances in engine order.
    pub async fn get_process_instances(
        &self,
        query: &ProcessInstanceQuery,
    ) -> Result<Vec<ProcessInstance>, ClientError> {
        let data = self
            .gateway
            .send(
                Method::GET,
                "/process-instance",
                RequestOptions::with_query(query.to_params()),
            )
            .await?;
        Ok(decode_list(&data)?)
    }

    /// List process definitions as raw engine JSON.
    ///
    /// An empty response body yields an empty list.
    pub async fn get_process_definitions(&self) -> Result<Vec<Value>, ClientError> {
        let data = self
            .gateway
            .send(Method::GET, "/process-definition", RequestOptions::default())
            .await?;
        match data {
            Value::Array(items) => Ok(items),
            Value::Object(map) if map.is_empty() => Ok(Vec::new()),
            _ => Err(camunda_core::DecodeError::NotAnArray {
                kind: "ProcessDefinition",
            }
            .into()),
        }
    }

    /// Check whether the engine is reachable.
    ///
    /// Never fails: any error is logged and reported as `false`.
    pub async fn health_check(&self) -> bool {
        match self
            .gateway
            .send(Method::GET, "/engine", RequestOptions::default())
            .await
        {
            Ok(_) => true,
            Err(e) => {
                error!(error = %e, "Health check failed");
                false
            }
        }
    }
}
