//! Structural validation for workflow graphs
//!
//! The editor itself never blocks a mutation beyond the connection-role
//! check, so a graph under construction can be temporarily malformed. This
//! module is the executability check run before a workflow is handed to the
//! automation backend: it reports trigger-rule violations, dangling edges
//! and cycles, collecting every error rather than stopping at the first.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::step::StepType;
use crate::types::{EdgeId, Graph, NodeId};

/// Validation error with location context
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The graph has no trigger node to root it
    MissingTrigger,
    /// The graph has more than one trigger node
    MultipleTriggers { count: usize },
    /// An edge references a non-existent node
    UnknownNode { edge_id: EdgeId, node_id: NodeId },
    /// An edge targets a trigger node
    TriggerInbound { edge_id: EdgeId, node_id: NodeId },
    /// Cycle detected in the graph
    CycleDetected,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTrigger => write!(f, "Graph has no trigger node"),
            Self::MultipleTriggers { count } => {
                write!(f, "Graph has {count} trigger nodes, expected exactly one")
            }
            Self::UnknownNode { edge_id, node_id } => {
                write!(f, "Edge '{edge_id}' references unknown node '{node_id}'")
            }
            Self::TriggerInbound { edge_id, node_id } => {
                write!(f, "Edge '{edge_id}' targets trigger node '{node_id}'")
            }
            Self::CycleDetected => write!(f, "Cycle detected in graph"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a workflow graph
///
/// Returns all validation errors found (not just the first). An empty
/// result means the graph is structurally executable.
pub fn validate(graph: &Graph) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    validate_trigger_count(graph, &mut errors);
    validate_edge_references(graph, &mut errors);
    validate_trigger_inbound(graph, &mut errors);
    detect_cycles(graph, &mut errors);

    errors
}

/// Check that exactly one trigger node roots the graph
fn validate_trigger_count(graph: &Graph, errors: &mut Vec<ValidationError>) {
    let count = graph
        .nodes
        .iter()
        .filter(|n| n.step() == StepType::Trigger)
        .count();

    if count == 0 {
        errors.push(ValidationError::MissingTrigger);
    } else if count > 1 {
        errors.push(ValidationError::MultipleTriggers { count });
    }
}

/// Check that all edge source/target nodes exist
fn validate_edge_references(graph: &Graph, errors: &mut Vec<ValidationError>) {
    let node_ids: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();

    for edge in &graph.edges {
        if !node_ids.contains(edge.source.as_str()) {
            errors.push(ValidationError::UnknownNode {
                edge_id: edge.id.clone(),
                node_id: edge.source.clone(),
            });
        }
        if !node_ids.contains(edge.target.as_str()) {
            errors.push(ValidationError::UnknownNode {
                edge_id: edge.id.clone(),
                node_id: edge.target.clone(),
            });
        }
    }
}

/// Check that no edge targets a trigger node
///
/// `Graph::connect` refuses these, but a deserialized graph may still carry
/// one.
fn validate_trigger_inbound(graph: &Graph, errors: &mut Vec<ValidationError>) {
    for node in graph.nodes.iter().filter(|n| n.step() == StepType::Trigger) {
        for edge in graph.incoming_edges(&node.id) {
            errors.push(ValidationError::TriggerInbound {
                edge_id: edge.id.clone(),
                node_id: node.id.clone(),
            });
        }
    }
}

/// Detect cycles using Kahn's algorithm (topological sort)
fn detect_cycles(graph: &Graph, errors: &mut Vec<ValidationError>) {
    let mut in_degree: HashMap<&str, usize> = HashMap::new();
    for node in &graph.nodes {
        in_degree.insert(&node.id, 0);
    }
    for edge in &graph.edges {
        *in_degree.entry(&edge.target).or_insert(0) += 1;
    }

    let mut queue: VecDeque<&str> = in_degree
        .iter()
        .filter(|(_, &deg)| deg == 0)
        .map(|(&id, _)| id)
        .collect();

    let mut visited = 0;
    while let Some(node_id) = queue.pop_front() {
        visited += 1;
        for edge in &graph.edges {
            if edge.source == node_id {
                if let Some(deg) = in_degree.get_mut(edge.target.as_str()) {
                    *deg -= 1;
                    if *deg == 0 {
                        queue.push_back(&edge.target);
                    }
                }
            }
        }
    }

    if visited < graph.nodes.len() {
        errors.push(ValidationError::CycleDetected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Position, StepEdge, StepNode};

    fn node(id: &str, step: StepType) -> StepNode {
        StepNode::new(id, step, Position::default(), step.default_value())
    }

    fn chain() -> Graph {
        let mut graph = Graph::new();
        graph.insert_node(node("trigger", StepType::Trigger));
        graph.insert_node(node("step-0", StepType::Email));
        graph.insert_node(node("step-1", StepType::Wait));
        graph.connect("trigger", "step-0").unwrap();
        graph.connect("step-0", "step-1").unwrap();
        graph
    }

    #[test]
    fn test_valid_chain() {
        let errors = validate(&chain());
        assert!(errors.is_empty(), "expected no errors, got: {errors:?}");
    }

    #[test]
    fn test_missing_trigger() {
        let mut graph = chain();
        graph.remove_node("trigger");
        let errors = validate(&graph);
        assert!(errors.contains(&ValidationError::MissingTrigger));
    }

    #[test]
    fn test_multiple_triggers() {
        let mut graph = chain();
        graph.insert_node(node("trigger-2", StepType::Trigger));
        let errors = validate(&graph);
        assert!(errors.contains(&ValidationError::MultipleTriggers { count: 2 }));
    }

    #[test]
    fn test_dangling_edge() {
        let mut graph = chain();
        graph.edges.push(StepEdge::between("step-1", "ghost"));
        let errors = validate(&graph);
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::UnknownNode { node_id, .. } if node_id == "ghost"
        )));
    }

    #[test]
    fn test_trigger_inbound_edge() {
        let mut graph = chain();
        // Bypass connect(), which refuses this edge
        graph.edges.push(StepEdge::between("step-1", "trigger"));
        let errors = validate(&graph);
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::TriggerInbound { .. })));
    }

    #[test]
    fn test_detect_cycle() {
        let mut graph = chain();
        graph.insert_node(node("step-2", StepType::Tag));
        graph.connect("step-1", "step-2").unwrap();
        graph.connect("step-2", "step-0").unwrap();
        let errors = validate(&graph);
        assert!(errors.contains(&ValidationError::CycleDetected));
    }

    #[test]
    fn test_branching_is_permitted() {
        let mut graph = chain();
        graph.insert_node(node("step-2", StepType::TextMessage));
        graph.connect("step-0", "step-2").unwrap();
        let errors = validate(&graph);
        assert!(errors.is_empty(), "branches are legal: {errors:?}");
    }

    #[test]
    fn test_empty_graph_only_misses_trigger() {
        let errors = validate(&Graph::new());
        assert_eq!(errors, vec![ValidationError::MissingTrigger]);
    }

    #[test]
    fn test_collects_multiple_errors() {
        let mut graph = Graph::new();
        graph.insert_node(node("a", StepType::Email));
        graph.insert_node(node("b", StepType::Wait));
        graph.connect("a", "b").unwrap();
        graph.connect("b", "a").unwrap();
        graph.edges.push(StepEdge::between("b", "ghost"));

        let errors = validate(&graph);
        // Missing trigger, cycle and dangling edge all reported together
        assert!(errors.len() >= 3);
    }
}
