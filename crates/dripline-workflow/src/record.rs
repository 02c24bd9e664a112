//! The persisted workflow record
//!
//! A [`Workflow`] is the durable unit the repository stores: the graph plus
//! identity, a trigger-derived summary and performance metadata. The serde
//! shape below is the wire contract shared with the list/create/update
//! endpoints, so several fields carry wire names that differ from their
//! meaning (`triggers` is the trigger summary, `steps` the step count).

use serde::{Deserialize, Serialize};

use dripline_graph::Graph;

/// Unique identifier assigned by the repository
pub type WorkflowId = i64;

/// Whether the automation backend enrolls new contacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    Active,
    Paused,
}

/// Status and performance metadata carried across structural edits
///
/// Editing a workflow's steps must not reset its performance history, so
/// these fields are copied from the previous record on every re-save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStats {
    pub status: WorkflowStatus,
    pub enrolled_count: i64,
    pub conversion_rate: String,
}

impl Default for WorkflowStats {
    fn default() -> Self {
        Self {
            status: WorkflowStatus::Active,
            enrolled_count: 0,
            conversion_rate: "-".to_string(),
        }
    }
}

/// A persisted workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    /// Assigned by the repository on create; None on an unsaved draft
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<WorkflowId>,
    pub name: String,
    pub status: WorkflowStatus,
    /// Human-readable summary of what starts the workflow
    #[serde(rename = "triggers")]
    pub trigger_summary: String,
    /// Number of action nodes in the graph
    #[serde(rename = "steps")]
    pub step_count: usize,
    #[serde(rename = "enrolled")]
    pub enrolled_count: i64,
    /// Display string, e.g. "12%"
    #[serde(rename = "conversion")]
    pub conversion_rate: String,
    /// The embedded graph; legacy records may not carry one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_data: Option<Graph>,
}

impl Workflow {
    /// The stats to carry into the next save of this workflow
    pub fn stats(&self) -> WorkflowStats {
        WorkflowStats {
            status: self.status,
            enrolled_count: self.enrolled_count,
            conversion_rate: self.conversion_rate.clone(),
        }
    }
}
