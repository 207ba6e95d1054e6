//! User task entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::{self, Entity};

/// A user task as returned by `/task` endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier.
    pub id: String,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// User the task is assigned to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    /// User responsible for the task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// `PENDING` or `RESOLVED` when the task was delegated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegation_state: Option<String>,

    /// When the task was created.
    #[serde(default, with = "codec::timestamp", skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    /// Due date.
    #[serde(default, with = "codec::timestamp", skip_serializing_if = "Option::is_none")]
    pub due: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_instance_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_definition_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_instance_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_definition_id: Option<String>,

    /// Key of the task in the BPMN model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_definition_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,

    /// Whether the task belongs to a suspended process instance.
    #[serde(default, deserialize_with = "codec::null_as_false")]
    pub suspended: bool,

    /// Form reference used by task list applications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_key: Option<String>,
}

impl Task {
    /// Create a task with only an ID set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Builder method to set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder method to set the assignee.
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }
}

impl Entity for Task {
    const KIND: &'static str = "Task";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DecodeError;
    use chrono::TimeZone;
    use serde_json::{json, Value};

    #[test]
    fn test_decode_sample_task() {
        let raw = json!({
            "id": "task-123",
            "name": "Test Task",
            "assignee": "testuser",
            "created": "2024-01-01T10:00:00.000Z",
            "processInstanceId": "proc-456"
        });

        let task = Task::decode(&raw).unwrap();

        assert_eq!(task.id, "task-123");
        assert_eq!(task.name.as_deref(), Some("Test Task"));
        assert_eq!(task.assignee.as_deref(), Some("testuser"));
        assert_eq!(task.process_instance_id.as_deref(), Some("proc-456"));
        assert_eq!(
            task.created,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap())
        );
        assert_eq!(task.due, None);
        assert!(!task.suspended);
    }

    #[test]
    fn test_decode_missing_id() {
        let err = Task::decode(&json!({"name": "orphan"})).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingField {
                kind: "Task",
                field: "id".to_string()
            }
        );
    }

    #[test]
    fn test_decode_malformed_timestamp() {
        let err = Task::decode(&json!({"id": "t", "due": "next week"})).unwrap_err();
        match err {
            DecodeError::InvalidValue { kind, reason } => {
                assert_eq!(kind, "Task");
                assert!(reason.contains("malformed timestamp 'next week'"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_non_integer_priority() {
        let err = Task::decode(&json!({"id": "t", "priority": "high"})).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidValue { kind: "Task", .. }));
    }

    #[test]
    fn test_round_trip_full_task() {
        let task = Task {
            id: "task-1".to_string(),
            name: Some("Review".to_string()),
            description: Some("Check the invoice".to_string()),
            assignee: Some("demo".to_string()),
            owner: Some("mary".to_string()),
            delegation_state: Some("PENDING".to_string()),
            created: Some(Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap()),
            due: Some(Utc.with_ymd_and_hms(2024, 3, 8, 17, 0, 0).unwrap()),
            process_instance_id: Some("pi-1".to_string()),
            process_definition_id: Some("invoice:1:abc".to_string()),
            case_instance_id: Some("ci-1".to_string()),
            case_definition_id: Some("cd-1".to_string()),
            task_definition_key: Some("approveInvoice".to_string()),
            priority: Some(50),
            suspended: true,
            form_key: Some("embedded:app:forms/approve.html".to_string()),
        };

        let encoded = Value::Object(task.encode());
        assert_eq!(encoded["delegationState"], "PENDING");
        assert_eq!(encoded["caseDefinitionId"], "cd-1");
        assert_eq!(encoded["created"], "2024-03-01T08:30:00.000+0000");

        assert_eq!(Task::decode(&encoded).unwrap(), task);
    }

    #[test]
    fn test_round_trip_keeps_absent_fields_absent() {
        let task = Task::new("task-2").with_name("Sparse");
        let encoded = task.encode();

        assert!(!encoded.contains_key("assignee"));
        assert!(!encoded.contains_key("created"));
        assert!(!encoded.contains_key("priority"));
        assert_eq!(encoded["suspended"], false);

        let decoded = Task::decode(&Value::Object(encoded)).unwrap();
        assert_eq!(decoded, task);
        assert_eq!(decoded.assignee, None);
    }
}
