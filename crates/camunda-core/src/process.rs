//! Process instance entity.

use serde::{Deserialize, Serialize};

use crate::codec::{self, Entity};

/// A running or finished process instance from `/process-instance`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessInstance {
    /// Unique instance identifier.
    pub id: String,

    /// Process definition this instance was started from.
    pub definition_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_instance_id: Option<String>,
    #[serde(default, deserialize_with = "codec::null_as_false")]
    pub ended: bool,
    #[serde(default, deserialize_with = "codec::null_as_false")]
    pub suspended: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

impl ProcessInstance {
    /// Create an instance with the two required identifiers.
    pub fn new(id: impl Into<String>, definition_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            definition_id: definition_id.into(),
            ..Default::default()
        }
    }

    /// Human-readable lifecycle state.
    pub fn status_label(&self) -> &'static str {
        if self.ended {
            "Ended"
        } else {
            "Active"
        }
    }
}

impl Entity for ProcessInstance {
    const KIND: &'static str = "ProcessInstance";
}
