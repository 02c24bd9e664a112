//! Graph ⇄ workflow conversion
//!
//! `to_workflow` turns the editor's live graph into a persisted record;
//! `from_workflow` reconstructs the graph for a new editing session. The
//! graph is embedded verbatim, so the two compose to the identity for any
//! record that carries flow data.

use dripline_graph::Graph;

use crate::error::{Result, WorkflowError};
use crate::record::{Workflow, WorkflowStats};

/// Trigger summary used when the graph has no trigger node
const MANUAL_TRIGGER: &str = "Manual";

/// Build a persisted record from the edited graph
///
/// The step count excludes the trigger node; the trigger summary is the
/// trigger node's configuration value, or "Manual" when the graph has none.
/// Pass `prior` when re-saving an existing workflow so its status and
/// performance history survive structural edits; a new workflow starts
/// active with empty stats.
///
/// Saving requires a non-empty name. This is the one user-visible
/// validation error in the save path, surfaced before any repository call.
pub fn to_workflow(graph: &Graph, name: &str, prior: Option<WorkflowStats>) -> Result<Workflow> {
    let name = name.trim();
    if name.is_empty() {
        return Err(WorkflowError::EmptyName);
    }

    let stats = prior.unwrap_or_default();
    let trigger_summary = graph
        .trigger()
        .map(|n| n.value().to_string())
        .unwrap_or_else(|| MANUAL_TRIGGER.to_string());

    Ok(Workflow {
        id: None,
        name: name.to_string(),
        status: stats.status,
        trigger_summary,
        step_count: graph.step_count(),
        enrolled_count: stats.enrolled_count,
        conversion_rate: stats.conversion_rate,
        flow_data: Some(graph.clone()),
    })
}

/// Reconstruct the graph embedded in a persisted record
///
/// Legacy records predate the graph format and carry no flow data; those
/// open as an empty canvas. The fallback is lossy by design and logged so
/// the gap stays visible.
pub fn from_workflow(workflow: &Workflow) -> Graph {
    match &workflow.flow_data {
        Some(graph) => graph.clone(),
        None => {
            log::warn!(
                "workflow '{}' has no flow data, opening an empty canvas",
                workflow.name
            );
            Graph::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dripline_graph::{builtin_templates, StepType};
    use crate::record::WorkflowStatus;

    fn sample_graph() -> Graph {
        builtin_templates()[0].instantiate()
    }

    #[test]
    fn test_to_workflow_derives_summary_and_count() {
        let graph = sample_graph();
        let workflow = to_workflow(&graph, "Lead nurture", None).unwrap();

        assert_eq!(workflow.trigger_summary, "New lead captured");
        assert_eq!(workflow.step_count, 4);
        assert_eq!(workflow.status, WorkflowStatus::Active);
        assert_eq!(workflow.enrolled_count, 0);
        assert_eq!(workflow.conversion_rate, "-");
        assert_eq!(workflow.id, None);
    }

    #[test]
    fn test_round_trip_preserves_graph_exactly() {
        let graph = sample_graph();
        let workflow = to_workflow(&graph, "Round trip", None).unwrap();
        assert_eq!(from_workflow(&workflow), graph);
    }

    #[test]
    fn test_trigger_summary_defaults_to_manual() {
        let mut graph = sample_graph();
        graph.remove_node("trigger");
        let workflow = to_workflow(&graph, "No trigger", None).unwrap();
        assert_eq!(workflow.trigger_summary, "Manual");
    }

    #[test]
    fn test_prior_stats_survive_resave() {
        let mut graph = sample_graph();
        let first = to_workflow(&graph, "Nurture", None).unwrap();

        let mut stats = first.stats();
        stats.enrolled_count = 124;
        stats.conversion_rate = "12%".to_string();

        // Structural edit, then re-save with the carried stats
        graph.remove_node("step-3");
        let second = to_workflow(&graph, "Nurture", Some(stats)).unwrap();

        assert_eq!(second.enrolled_count, 124);
        assert_eq!(second.conversion_rate, "12%");
        assert_eq!(second.step_count, 3);
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let graph = sample_graph();
        assert!(matches!(
            to_workflow(&graph, "", None),
            Err(WorkflowError::EmptyName)
        ));
        assert!(matches!(
            to_workflow(&graph, "   ", None),
            Err(WorkflowError::EmptyName)
        ));
    }

    #[test]
    fn test_legacy_record_opens_empty() {
        let workflow = Workflow {
            id: Some(3),
            name: "Legacy".to_string(),
            status: WorkflowStatus::Paused,
            trigger_summary: "Manual".to_string(),
            step_count: 2,
            enrolled_count: 10,
            conversion_rate: "5%".to_string(),
            flow_data: None,
        };
        assert!(from_workflow(&workflow).is_empty());
    }

    #[test]
    fn test_step_count_counts_every_non_trigger_node() {
        let mut graph = Graph::new();
        let workflow = to_workflow(&graph, "Empty", None).unwrap();
        assert_eq!(workflow.step_count, 0);

        graph.insert_node(dripline_graph::StepNode::new(
            "only-step",
            StepType::Webhook,
            dripline_graph::Position::default(),
            "https://example.test/hook",
        ));
        let workflow = to_workflow(&graph, "One step", None).unwrap();
        assert_eq!(workflow.step_count, 1);
        assert_eq!(workflow.trigger_summary, "Manual");
    }
}
