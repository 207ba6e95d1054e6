//! Plain-text rendering of engine results for tool responses.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use camunda_core::{Comment, ProcessInstance, Task};

const SEPARATOR: &str = "\n\n---\n\n";

fn or<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    value.unwrap_or(placeholder)
}

fn time_or(value: Option<&DateTime<Utc>>, placeholder: &str) -> String {
    value
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| placeholder.to_string())
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn priority_or_normal(task: &Task) -> String {
    task.priority
        .map(|p| p.to_string())
        .unwrap_or_else(|| "Normal".to_string())
}

/// Render a JSON value for humans: strings without quotes, `null` as placeholder.
fn value_text(value: Option<&Value>, placeholder: &str) -> String {
    match value {
        None | Some(Value::Null) => placeholder.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn found(count: usize, noun: &str, suffix: &str, entries: Vec<String>) -> String {
    format!(
        "Found {} {}(s){}:\n\n{}",
        count,
        noun,
        suffix,
        entries.join(SEPARATOR)
    )
}

/// Numbered task summaries, or a notice when there are none.
pub fn task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found matching the specified criteria.".to_string();
    }

    let entries = tasks
        .iter()
        .map(|task| {
            let mut lines = vec![
                format!("Task ID: {}", task.id),
                format!("Name: {}", or(task.name.as_deref(), "Unnamed")),
                format!("Assignee: {}", or(task.assignee.as_deref(), "Unassigned")),
                format!("Created: {}", time_or(task.created.as_ref(), "Unknown")),
                format!("Due: {}", time_or(task.due.as_ref(), "No due date")),
                format!(
                    "Process Instance: {}",
                    or(task.process_instance_id.as_deref(), "N/A")
                ),
                format!(
                    "Description: {}",
                    or(task.description.as_deref(), "No description")
                ),
            ];
            if let Some(priority) = task.priority {
                lines.push(format!("Priority: {}", priority));
            }
            lines.join("\n")
        })
        .collect();

    found(tasks.len(), "task", "", entries)
}

/// All fields of one task, one per line.
pub fn task_details(task_id: &str, task: &Task) -> String {
    let mut lines = vec![
        format!("Task Details for {}:", task_id),
        format!("Name: {}", or(task.name.as_deref(), "Unnamed")),
        format!("Assignee: {}", or(task.assignee.as_deref(), "Unassigned")),
        format!("Owner: {}", or(task.owner.as_deref(), "No owner")),
        format!("Created: {}", time_or(task.created.as_ref(), "Unknown")),
        format!("Due Date: {}", time_or(task.due.as_ref(), "No due date")),
        format!("Priority: {}", priority_or_normal(task)),
        format!(
            "Process Instance ID: {}",
            or(task.process_instance_id.as_deref(), "N/A")
        ),
        format!(
            "Process Definition ID: {}",
            or(task.process_definition_id.as_deref(), "N/A")
        ),
        format!(
            "Task Definition Key: {}",
            or(task.task_definition_key.as_deref(), "N/A")
        ),
        format!(
            "Description: {}",
            or(task.description.as_deref(), "No description")
        ),
        format!("Suspended: {}", yes_no(task.suspended)),
        format!("Form Key: {}", or(task.form_key.as_deref(), "No form")),
    ];
    if let Some(state) = &task.delegation_state {
        lines.push(format!("Delegation State: {}", state));
    }
    lines.join("\n")
}

/// Completion notice with any variables that were submitted.
pub fn task_completed(
    task_id: &str,
    task: &Task,
    variables: Option<&Map<String, Value>>,
) -> String {
    let mut text = format!(
        "Task completed successfully!\n\nTask ID: {}\nTask Name: {}\nAssignee: {}",
        task_id,
        or(task.name.as_deref(), "Unnamed"),
        or(task.assignee.as_deref(), "Unassigned"),
    );
    if let Some(variables) = variables.filter(|v| !v.is_empty()) {
        text.push_str("\n\nVariables set:");
        for (key, value) in variables {
            text.push_str(&format!("\n- {}: {}", key, value_text(Some(value), "null")));
        }
    }
    text
}

/// Creation notice for a task returned by the engine.
pub fn task_created(task: &Task) -> String {
    format!(
        "Task created successfully!\n\nTask ID: {}\nName: {}\nAssignee: {}\nDescription: {}\nPriority: {}",
        task.id,
        or(task.name.as_deref(), "Unnamed"),
        or(task.assignee.as_deref(), "Unassigned"),
        or(task.description.as_deref(), "No description"),
        priority_or_normal(task),
    )
}

/// Numbered process instance summaries with their status.
pub fn process_instances(instances: &[ProcessInstance]) -> String {
    if instances.is_empty() {
        return "No process instances found matching the criteria.".to_string();
    }

    let entries = instances
        .iter()
        .map(|instance| {
            let mut lines = vec![
                format!("Instance ID: {}", instance.id),
                format!("Definition ID: {}", instance.definition_id),
                format!("Business Key: {}", or(instance.business_key.as_deref(), "None")),
                format!("Status: {}", instance.status_label()),
                format!("Suspended: {}", yes_no(instance.suspended)),
            ];
            if let Some(tenant) = &instance.tenant_id {
                lines.push(format!("Tenant: {}", tenant));
            }
            lines.join("\n")
        })
        .collect();

    found(instances.len(), "process instance", "", entries)
}

/// Process definitions are rendered straight from engine JSON.
pub fn process_definitions(definitions: &[Value]) -> String {
    if definitions.is_empty() {
        return "No process definitions found.".to_string();
    }

    let entries = definitions
        .iter()
        .map(|definition| {
            let mut lines = vec![
                format!("ID: {}", value_text(definition.get("id"), "Unknown")),
                format!("Key: {}", value_text(definition.get("key"), "Unknown")),
                format!("Name: {}", value_text(definition.get("name"), "Unnamed")),
                format!("Version: {}", value_text(definition.get("version"), "Unknown")),
                format!(
                    "Deployment ID: {}",
                    value_text(definition.get("deploymentId"), "Unknown")
                ),
                format!(
                    "Resource Name: {}",
                    value_text(definition.get("resource"), "Unknown")
                ),
            ];
            let suspended = definition
                .get("suspended")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            lines.push(if suspended {
                "Status: Suspended".to_string()
            } else {
                "Status: Active".to_string()
            });
            if let Some(tenant) = definition
                .get("tenantId")
                .and_then(Value::as_str)
                .filter(|t| !t.is_empty())
            {
                lines.push(format!("Tenant: {}", tenant));
            }
            lines.join("\n")
        })
        .collect();

    found(definitions.len(), "process definition", "", entries)
}

/// Comments on a task in engine order.
pub fn comments(task_id: &str, comments: &[Comment]) -> String {
    if comments.is_empty() {
        return format!("No comments found for task {}.", task_id);
    }

    let entries = comments
        .iter()
        .map(|comment| {
            [
                format!("Comment ID: {}", comment.id),
                format!("Author: {}", or(comment.user_id.as_deref(), "System")),
                format!("Time: {}", time_or(comment.time.as_ref(), "Unknown")),
                format!("Message: {}", comment.message),
            ]
            .join("\n")
        })
        .collect();

    found(
        comments.len(),
        "comment",
        &format!(" for task {}", task_id),
        entries,
    )
}

/// Notice for a comment posted to a task.
pub fn comment_added(task_id: &str, comment: &Comment) -> String {
    format!(
        "Comment added successfully!\n\nComment ID: {}\nTask ID: {}\nAuthor: {}\nTime: {}\nMessage: {}",
        comment.id,
        task_id,
        or(comment.user_id.as_deref(), "System"),
        time_or(comment.time.as_ref(), "Just now"),
        comment.message,
    )
}
