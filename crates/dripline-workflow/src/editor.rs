//! Workflow editor service
//!
//! Ties a canvas session to the persisted record it edits. A workflow moves
//! through three states: nonexistent, draft (open in the editor, unsaved)
//! and persisted. Opening a persisted workflow checks it out into a new
//! canvas session; saving serializes the live graph back into a full
//! record and creates or updates it through the repository. There is no
//! autosave and no dirty tracking beyond the in-memory graph.

use dripline_editor::CanvasSession;
use dripline_graph::WorkflowTemplate;

use crate::error::Result;
use crate::record::Workflow;
use crate::serializer::{from_workflow, to_workflow};
use crate::store::WorkflowRepository;

/// One editing session over a draft or checked-out workflow
pub struct WorkflowEditor {
    canvas: CanvasSession,
    /// The persisted record being edited; None for a brand-new draft
    checked_out: Option<Workflow>,
}

impl WorkflowEditor {
    /// Start a draft on an empty canvas
    pub fn new_draft() -> Self {
        Self {
            canvas: CanvasSession::new(),
            checked_out: None,
        }
    }

    /// Start a draft seeded from a template
    pub fn from_template(template: &WorkflowTemplate) -> Self {
        Self {
            canvas: CanvasSession::with_graph(template.instantiate()),
            checked_out: None,
        }
    }

    /// Check out a persisted workflow for editing
    ///
    /// Reconstructs the canvas from the embedded graph; a legacy record
    /// without flow data opens empty.
    pub fn open(workflow: Workflow) -> Self {
        let graph = from_workflow(&workflow);
        Self {
            canvas: CanvasSession::with_graph(graph),
            checked_out: Some(workflow),
        }
    }

    pub fn canvas(&self) -> &CanvasSession {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut CanvasSession {
        &mut self.canvas
    }

    /// Whether this session edits an already-persisted workflow
    pub fn is_persisted(&self) -> bool {
        self.checked_out
            .as_ref()
            .map_or(false, |w| w.id.is_some())
    }

    /// Save the live graph through the repository
    ///
    /// A first save creates the record (the repository assigns the id);
    /// subsequent saves update it in place, carrying the prior status and
    /// performance stats so structural edits never reset them. The whole
    /// record, including the embedded graph, is replaced atomically; a
    /// second save simply overwrites the prior state (last write wins).
    pub async fn save<R: WorkflowRepository>(&mut self, name: &str, repo: &R) -> Result<Workflow> {
        let prior = self.checked_out.as_ref().map(|w| w.stats());
        let mut record = to_workflow(self.canvas.graph(), name, prior)?;

        let saved = match self.checked_out.as_ref().and_then(|w| w.id) {
            Some(id) => {
                record.id = Some(id);
                repo.update(record).await?
            }
            None => repo.create(record).await?,
        };

        self.checked_out = Some(saved.clone());
        Ok(saved)
    }
}
