//! Dripline graph model - workflow diagrams for the automation builder
//!
//! This crate provides the data model behind the visual automation builder:
//! nodes, edges and the graph that ties them together, the closed set of
//! step types a node can take, template instantiation for seeding a new
//! canvas, structural validation, and a snapshot-based undo stack.
//!
//! The model is deliberately free of any rendering or persistence concerns.
//! The canvas session (dripline-editor) mutates an owned [`Graph`] through
//! named operations, and the workflow layer (dripline-workflow) embeds the
//! graph verbatim into the persisted record.
//!
//! # Example
//!
//! ```
//! use dripline_graph::{builtin_templates, StepType};
//!
//! let template = &builtin_templates()[0];
//! let graph = template.instantiate();
//!
//! assert_eq!(graph.nodes.len(), template.steps.len() + 1);
//! assert_eq!(graph.trigger().map(|n| n.step()), Some(StepType::Trigger));
//! ```

pub mod error;
pub mod step;
pub mod template;
pub mod types;
pub mod undo;
pub mod validation;

// Re-export key types
pub use error::{ConnectError, GraphError, Result};
pub use step::{HandleRole, StepDescriptor, StepType};
pub use template::{builtin_templates, TemplateStep, WorkflowTemplate};
pub use types::{
    EdgeId, EdgeKind, Graph, NodeId, NodePayload, NodeWidget, Position, StepEdge, StepNode,
};
pub use undo::UndoStack;
pub use validation::{validate, ValidationError};
