//! Canvas editing session
//!
//! A [`CanvasSession`] owns the live graph for one editing session and
//! exposes every interactive operation as a named method: drop a node,
//! connect two nodes, move, select, edit the selected value, delete. All
//! operations are synchronous and in-memory; nothing is durable until the
//! workflow layer saves the graph. Invalid or stale ids are silent no-ops,
//! matching how the canvas swallows events against nodes that just
//! disappeared.

use uuid::Uuid;

use dripline_graph::{
    ConnectError, EdgeId, Graph, NodeId, Position, StepNode, StepType, UndoStack,
};

use crate::viewport::Viewport;

/// Live editing state for one workflow graph
pub struct CanvasSession {
    graph: Graph,
    viewport: Viewport,
    selected: Option<NodeId>,
    history: UndoStack,
}

impl CanvasSession {
    /// Start a session on an empty canvas
    pub fn new() -> Self {
        Self::with_graph(Graph::new())
    }

    /// Start a session editing an existing graph
    pub fn with_graph(graph: Graph) -> Self {
        let mut session = Self {
            graph,
            viewport: Viewport::default(),
            selected: None,
            history: UndoStack::default(),
        };
        session.snapshot();
        session
    }

    /// The live graph
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Consume the session, yielding the edited graph
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Handle a palette drop on the canvas
    ///
    /// `payload` is the step tag carried by the drag event. A missing or
    /// unrecognized tag is a silent no-op: the drop is simply ignored. The
    /// drop position arrives in screen coordinates and is projected through
    /// the viewport transform.
    pub fn insert_at_drop(&mut self, payload: Option<&str>, screen: Position) -> Option<NodeId> {
        let tag = payload?;
        let Some(step) = StepType::parse(tag) else {
            log::debug!("ignoring canvas drop with unknown step tag '{tag}'");
            return None;
        };
        let position = self.viewport.to_canvas(screen);
        Some(self.add_node(step, position))
    }

    /// Insert a node at a canvas position with the type's default value
    pub fn add_node(&mut self, step: StepType, position: Position) -> NodeId {
        let id = Uuid::new_v4().to_string();
        self.graph
            .insert_node(StepNode::new(&id, step, position, step.default_value()));
        self.snapshot();
        id
    }

    /// Connect two nodes
    ///
    /// Fails with a typed rejection if either endpoint is missing or the
    /// target's step type refuses inbound connections.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<EdgeId, ConnectError> {
        let id = self.graph.connect(source, target)?;
        self.snapshot();
        Ok(id)
    }

    /// Move a node to a new canvas position
    ///
    /// Returns false (no-op) if the id is unknown. Layout is free-form, so
    /// there is nothing to validate.
    pub fn move_node(&mut self, id: &str, position: Position) -> bool {
        match self.graph.find_node_mut(id) {
            Some(node) => {
                node.position = position;
                self.snapshot();
                true
            }
            None => false,
        }
    }

    /// Select a node for the properties panel
    ///
    /// Returns the selected node's current value. Selecting an unknown id
    /// leaves the selection unchanged. At most one node is selected at a
    /// time.
    pub fn select(&mut self, id: &str) -> Option<&str> {
        if !self.graph.contains_node(id) {
            return None;
        }
        self.selected = Some(id.to_string());
        self.graph.find_node(id).map(|n| n.value())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The selected node's configuration value
    pub fn selected_value(&self) -> Option<&str> {
        let id = self.selected.as_deref()?;
        self.graph.find_node(id).map(|n| n.value())
    }

    /// Write a new configuration value into the selected node
    ///
    /// No-op when nothing is selected.
    pub fn update_selected_value(&mut self, value: &str) {
        let Some(id) = self.selected.clone() else {
            return;
        };
        if let Some(node) = self.graph.find_node_mut(&id) {
            node.data.value = value.to_string();
            self.snapshot();
        }
    }

    /// Delete the selected node, cascading to its edges
    ///
    /// Every edge whose source or target is the deleted node is removed
    /// with it. Clears the selection. Returns the deleted node's id, or
    /// None when nothing was selected.
    pub fn delete_selected(&mut self) -> Option<NodeId> {
        let id = self.selected.take()?;
        let removed = self.graph.remove_node(&id)?;
        self.snapshot();
        Some(removed.id)
    }

    /// Revert the last mutation. Returns false when at the oldest state.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(Ok(graph)) => {
                self.graph = graph;
                self.drop_stale_selection();
                true
            }
            Some(Err(e)) => {
                log::error!("undo failed to restore snapshot: {e}");
                false
            }
            None => false,
        }
    }

    /// Reapply the last undone mutation. Returns false when at the newest state.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(Ok(graph)) => {
                self.graph = graph;
                self.drop_stale_selection();
                true
            }
            Some(Err(e)) => {
                log::error!("redo failed to restore snapshot: {e}");
                false
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn drop_stale_selection(&mut self) {
        if let Some(id) = self.selected.as_deref() {
            if !self.graph.contains_node(id) {
                self.selected = None;
            }
        }
    }

    fn snapshot(&mut self) {
        if let Err(e) = self.history.push(&self.graph) {
            log::error!("failed to record undo snapshot: {e}");
        }
    }
}

impl Default for CanvasSession {
    fn default() -> Self {
        Self::new()
    }
}
