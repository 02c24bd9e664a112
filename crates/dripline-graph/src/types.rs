//! Core types for workflow graphs
//!
//! These types define the structure of one workflow diagram: nodes, edges
//! and their payloads. The serde shapes match the wire format the canvas
//! frontend and the persisted record share, so a graph round-trips through
//! JSON without a separate mapping layer.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConnectError;
use crate::step::StepType;

/// Unique identifier for a node
pub type NodeId = String;

/// Unique identifier for an edge
pub type EdgeId = String;

/// A point in canvas coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Renderer tag carried on every node
///
/// The canvas registers a single custom node component, so the tag never
/// varies; it exists only to keep the wire shape stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeWidget {
    #[default]
    Custom,
}

/// Step payload rendered inside a node card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePayload {
    /// Step type; unknown or missing tags in stored data fall back to wait
    #[serde(rename = "type", default = "payload_step_fallback", deserialize_with = "lossy_step")]
    pub step: StepType,
    /// Free-form configuration text (a delay, a message body, a URL)
    pub value: String,
}

fn payload_step_fallback() -> StepType {
    StepType::Wait
}

fn lossy_step<'de, D>(deserializer: D) -> Result<StepType, D::Error>
where
    D: Deserializer<'de>,
{
    let tag = String::deserialize(deserializer)?;
    Ok(StepType::parse_lossy(&tag))
}

/// A node instance in a graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepNode {
    /// Unique identifier within the graph
    pub id: NodeId,
    #[serde(rename = "type", default)]
    pub widget: NodeWidget,
    /// Position on the canvas
    pub position: Position,
    /// Step type and configuration
    pub data: NodePayload,
}

impl StepNode {
    /// Create a node with the given step type and configuration value
    pub fn new(
        id: impl Into<String>,
        step: StepType,
        position: Position,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            widget: NodeWidget::Custom,
            position,
            data: NodePayload {
                step,
                value: value.into(),
            },
        }
    }

    pub fn step(&self) -> StepType {
        self.data.step
    }

    pub fn value(&self) -> &str {
        &self.data.value
    }
}

/// Rendering style of an edge path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    #[default]
    Smoothstep,
}

/// An edge connecting two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepEdge {
    /// Unique identifier for this edge
    pub id: EdgeId,
    /// Source node ID
    pub source: NodeId,
    /// Target node ID
    pub target: NodeId,
    #[serde(rename = "type", default)]
    pub kind: EdgeKind,
    /// Whether the canvas animates the edge path
    #[serde(default)]
    pub animated: bool,
}

impl StepEdge {
    /// Create an animated smoothstep edge with the id derived from its
    /// endpoints (`e-{source}-{target}`)
    pub fn between(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: format!("e-{source}-{target}"),
            source,
            target,
            kind: EdgeKind::Smoothstep,
            animated: true,
        }
    }
}

/// A complete workflow graph
///
/// Node and edge order is irrelevant; lookups go through ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<StepNode>,
    pub edges: Vec<StepEdge>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Find a node by ID
    pub fn find_node(&self, id: &str) -> Option<&StepNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Find a node by ID (mutable)
    pub fn find_node_mut(&mut self, id: &str) -> Option<&mut StepNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.find_node(id).is_some()
    }

    /// Find an edge by ID
    pub fn find_edge(&self, id: &str) -> Option<&StepEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// The trigger node, if the graph has one
    ///
    /// A valid graph has exactly one; on a malformed graph this returns the
    /// first trigger encountered (see [`crate::validation`]).
    pub fn trigger(&self) -> Option<&StepNode> {
        self.nodes.iter().find(|n| n.step() == StepType::Trigger)
    }

    /// Number of action nodes (every node that is not the trigger)
    pub fn step_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.step() != StepType::Trigger)
            .count()
    }

    /// Add a node to the graph
    pub fn insert_node(&mut self, node: StepNode) {
        self.nodes.push(node);
    }

    /// Connect two nodes with an animated smoothstep edge
    ///
    /// Both endpoints must exist and the target's step type must accept
    /// inbound connections (the trigger does not). Connecting an already
    /// connected pair returns the existing edge id.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<EdgeId, ConnectError> {
        if !self.contains_node(source) {
            return Err(ConnectError::UnknownSource(source.to_string()));
        }
        let target_step = self
            .find_node(target)
            .ok_or_else(|| ConnectError::UnknownTarget(target.to_string()))?
            .step();
        if !target_step.accepts_inbound() {
            return Err(ConnectError::InboundNotAllowed(target_step));
        }

        if let Some(existing) = self
            .edges
            .iter()
            .find(|e| e.source == source && e.target == target)
        {
            return Ok(existing.id.clone());
        }

        let edge = StepEdge::between(source, target);
        let id = edge.id.clone();
        self.edges.push(edge);
        Ok(id)
    }

    /// Remove a node and every edge incident to it
    ///
    /// Returns the removed node, or None if the id is unknown. Cascade
    /// deletion keeps the edge invariant: no edge may reference a node that
    /// is not in the graph.
    pub fn remove_node(&mut self, id: &str) -> Option<StepNode> {
        let index = self.nodes.iter().position(|n| n.id == id)?;
        let node = self.nodes.remove(index);
        self.edges.retain(|e| e.source != id && e.target != id);
        Some(node)
    }

    /// Get edges coming into a node
    pub fn incoming_edges<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a StepEdge> + 'a {
        self.edges.iter().filter(move |e| e.target == node_id)
    }

    /// Get edges going out of a node
    pub fn outgoing_edges<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a StepEdge> + 'a {
        self.edges.iter().filter(move |e| e.source == node_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node_graph() -> Graph {
        let mut graph = Graph::new();
        graph.insert_node(StepNode::new(
            "trigger",
            StepType::Trigger,
            Position::new(250.0, 40.0),
            "Form submitted",
        ));
        graph.insert_node(StepNode::new(
            "step-0",
            StepType::Email,
            Position::new(250.0, 170.0),
            "Welcome",
        ));
        graph
    }

    #[test]
    fn test_connect_creates_derived_edge_id() {
        let mut graph = two_node_graph();
        let id = graph.connect("trigger", "step-0").unwrap();
        assert_eq!(id, "e-trigger-step-0");
        assert_eq!(graph.edges.len(), 1);
        assert!(graph.edges[0].animated);
        assert_eq!(graph.edges[0].kind, EdgeKind::Smoothstep);
    }

    #[test]
    fn test_connect_is_idempotent_per_pair() {
        let mut graph = two_node_graph();
        let first = graph.connect("trigger", "step-0").unwrap();
        let second = graph.connect("trigger", "step-0").unwrap();
        assert_eq!(first, second);
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn test_connect_rejects_unknown_endpoints() {
        let mut graph = two_node_graph();
        assert_eq!(
            graph.connect("ghost", "step-0"),
            Err(ConnectError::UnknownSource("ghost".to_string()))
        );
        assert_eq!(
            graph.connect("trigger", "ghost"),
            Err(ConnectError::UnknownTarget("ghost".to_string()))
        );
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_connect_rejects_inbound_to_trigger() {
        let mut graph = two_node_graph();
        assert_eq!(
            graph.connect("step-0", "trigger"),
            Err(ConnectError::InboundNotAllowed(StepType::Trigger))
        );
    }

    #[test]
    fn test_remove_node_cascades_edges() {
        let mut graph = two_node_graph();
        graph.insert_node(StepNode::new(
            "step-1",
            StepType::Wait,
            Position::new(250.0, 300.0),
            "1 day",
        ));
        graph.connect("trigger", "step-0").unwrap();
        graph.connect("step-0", "step-1").unwrap();

        let removed = graph.remove_node("step-0").unwrap();
        assert_eq!(removed.id, "step-0");
        assert!(graph.edges.is_empty());
        assert_eq!(graph.nodes.len(), 2);
        // Untouched nodes survive
        assert!(graph.contains_node("trigger"));
        assert!(graph.contains_node("step-1"));
    }

    #[test]
    fn test_remove_unknown_node_is_noop() {
        let mut graph = two_node_graph();
        assert!(graph.remove_node("ghost").is_none());
        assert_eq!(graph.nodes.len(), 2);
    }

    #[test]
    fn test_step_count_excludes_trigger() {
        let mut graph = two_node_graph();
        assert_eq!(graph.step_count(), 1);
        graph.remove_node("trigger");
        assert_eq!(graph.step_count(), 1);
    }

    #[test]
    fn test_node_wire_shape() {
        let node = StepNode::new("step-0", StepType::Email, Position::new(400.0, 300.0), "Welcome");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "step-0",
                "type": "custom",
                "position": {"x": 400.0, "y": 300.0},
                "data": {"type": "email", "value": "Welcome"}
            })
        );
    }

    #[test]
    fn test_edge_wire_shape() {
        let edge = StepEdge::between("trigger", "step-0");
        let json = serde_json::to_value(&edge).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "e-trigger-step-0",
                "source": "trigger",
                "target": "step-0",
                "type": "smoothstep",
                "animated": true
            })
        );
    }

    #[test]
    fn test_unknown_step_tag_falls_back_to_wait() {
        let json = serde_json::json!({
            "id": "step-9",
            "type": "custom",
            "position": {"x": 0.0, "y": 0.0},
            "data": {"type": "carrier-pigeon", "value": "?"}
        });
        let node: StepNode = serde_json::from_value(json).unwrap();
        assert_eq!(node.step(), StepType::Wait);
        assert_eq!(node.value(), "?");
    }

    #[test]
    fn test_incident_edge_lookups() {
        let mut graph = two_node_graph();
        graph.insert_node(StepNode::new(
            "step-1",
            StepType::Wait,
            Position::new(250.0, 300.0),
            "1 day",
        ));
        graph.connect("trigger", "step-0").unwrap();
        graph.connect("step-0", "step-1").unwrap();

        let outgoing: Vec<&str> = graph.outgoing_edges("step-0").map(|e| e.id.as_str()).collect();
        assert_eq!(outgoing, ["e-step-0-step-1"]);

        let incoming: Vec<&str> = graph.incoming_edges("step-0").map(|e| e.id.as_str()).collect();
        assert_eq!(incoming, ["e-trigger-step-0"]);

        assert_eq!(graph.incoming_edges("trigger").count(), 0);
    }

    #[test]
    fn test_graph_serde_round_trip() {
        let mut graph = two_node_graph();
        graph.connect("trigger", "step-0").unwrap();

        let json = serde_json::to_string(&graph).unwrap();
        let restored: Graph = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, graph);
    }
}
