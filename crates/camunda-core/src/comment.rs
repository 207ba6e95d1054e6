//! Task comment entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::{self, Entity};

/// A comment attached to a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,

    /// Author; absent for engine-generated comments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_instance_id: Option<String>,

    /// When the comment was posted.
    #[serde(default, with = "codec::timestamp", skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,

    pub message: String,
}

impl Entity for Comment {
    const KIND: &'static str = "Comment";
}
