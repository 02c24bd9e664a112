//! Workflow repository contract and the in-memory store
//!
//! The repository is the only asynchronous boundary in the builder core:
//! the editor saves and lists through this trait and otherwise never
//! blocks. Updates replace the whole record by id, last write wins; there
//! is no optimistic-concurrency token (single editor per workflow).
//!
//! [`InMemoryWorkflowStore`] keeps records in memory for fast access, with
//! optional JSON file persistence for durability across restarts.
//!
//! # Example
//!
//! ```ignore
//! use dripline_workflow::InMemoryWorkflowStore;
//!
//! let store = InMemoryWorkflowStore::with_persistence(".dripline/workflows");
//! let count = store.load_from_disk()?;
//! println!("Loaded {count} workflows");
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Result, WorkflowError};
use crate::record::{Workflow, WorkflowId};

/// Persistence contract for workflow records
///
/// `create` assigns the id; `update` replaces the entire record, including
/// the embedded graph. There is no partial update.
#[async_trait]
pub trait WorkflowRepository: Send + Sync {
    /// All stored workflows, ordered by id
    async fn list(&self) -> Result<Vec<Workflow>>;

    /// Fetch one workflow by id
    async fn get(&self, id: WorkflowId) -> Result<Option<Workflow>>;

    /// Store a new workflow, assigning its id
    async fn create(&self, workflow: Workflow) -> Result<Workflow>;

    /// Replace an existing workflow by id
    async fn update(&self, workflow: Workflow) -> Result<Workflow>;

    /// Delete a workflow; returns whether it existed
    async fn remove(&self, id: WorkflowId) -> Result<bool>;
}

#[derive(Debug, Default)]
struct StoreInner {
    workflows: HashMap<WorkflowId, Workflow>,
    next_id: WorkflowId,
}

/// In-memory workflow store with optional file persistence
#[derive(Debug)]
pub struct InMemoryWorkflowStore {
    inner: Mutex<StoreInner>,
    persist_path: Option<PathBuf>,
}

impl InMemoryWorkflowStore {
    /// Create a new store without persistence
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                workflows: HashMap::new(),
                next_id: 1,
            }),
            persist_path: None,
        }
    }

    /// Create a store that persists each record to the given directory
    ///
    /// The directory is created on the first save.
    pub fn with_persistence(path: impl AsRef<Path>) -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                workflows: HashMap::new(),
                next_id: 1,
            }),
            persist_path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Load all workflows from the persistence directory
    ///
    /// Returns the number of workflows loaded. Unparseable files and
    /// records without an id are skipped with a warning.
    pub fn load_from_disk(&self) -> Result<usize> {
        let Some(ref path) = self.persist_path else {
            return Ok(0);
        };
        if !path.exists() {
            return Ok(0);
        }

        let mut count = 0;
        let mut inner = self.inner.lock();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let file_path = entry.path();
            if file_path.extension().map_or(true, |e| e != "json") {
                continue;
            }

            let content = std::fs::read_to_string(&file_path)?;
            match serde_json::from_str::<Workflow>(&content) {
                Ok(workflow) => match workflow.id {
                    Some(id) => {
                        log::info!("loaded workflow '{}' from {file_path:?}", workflow.name);
                        inner.workflows.insert(id, workflow);
                        inner.next_id = inner.next_id.max(id + 1);
                        count += 1;
                    }
                    None => {
                        log::warn!("skipping workflow without id in {file_path:?}");
                    }
                },
                Err(e) => {
                    log::warn!("failed to parse workflow from {file_path:?}: {e}");
                }
            }
        }
        Ok(count)
    }

    /// Save a workflow to disk (if persistence is enabled)
    fn save_to_disk(&self, workflow: &Workflow, id: WorkflowId) -> Result<()> {
        let Some(ref path) = self.persist_path else {
            return Ok(());
        };

        std::fs::create_dir_all(path)?;
        let file_path = path.join(format!("workflow-{id}.json"));
        let content = serde_json::to_string_pretty(workflow)?;
        std::fs::write(&file_path, content)?;
        log::debug!("saved workflow {id} to {file_path:?}");
        Ok(())
    }

    /// Delete a workflow from disk (if persistence is enabled)
    fn delete_from_disk(&self, id: WorkflowId) -> Result<()> {
        let Some(ref path) = self.persist_path else {
            return Ok(());
        };

        let file_path = path.join(format!("workflow-{id}.json"));
        if file_path.exists() {
            std::fs::remove_file(&file_path)?;
            log::debug!("deleted workflow {id} from {file_path:?}");
        }
        Ok(())
    }
}

impl Default for InMemoryWorkflowStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkflowRepository for InMemoryWorkflowStore {
    async fn list(&self) -> Result<Vec<Workflow>> {
        let inner = self.inner.lock();
        let mut workflows: Vec<Workflow> = inner.workflows.values().cloned().collect();
        workflows.sort_by_key(|w| w.id);
        Ok(workflows)
    }

    async fn get(&self, id: WorkflowId) -> Result<Option<Workflow>> {
        Ok(self.inner.lock().workflows.get(&id).cloned())
    }

    async fn create(&self, mut workflow: Workflow) -> Result<Workflow> {
        let id = {
            let mut inner = self.inner.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            workflow.id = Some(id);
            inner.workflows.insert(id, workflow.clone());
            id
        };
        self.save_to_disk(&workflow, id)?;
        Ok(workflow)
    }

    async fn update(&self, workflow: Workflow) -> Result<Workflow> {
        let id = workflow.id.ok_or(WorkflowError::MissingId)?;
        {
            let mut inner = self.inner.lock();
            if !inner.workflows.contains_key(&id) {
                return Err(WorkflowError::NotFound(id));
            }
            inner.workflows.insert(id, workflow.clone());
        }
        self.save_to_disk(&workflow, id)?;
        Ok(workflow)
    }

    async fn remove(&self, id: WorkflowId) -> Result<bool> {
        let existed = self.inner.lock().workflows.remove(&id).is_some();
        if existed {
            self.delete_from_disk(id)?;
        }
        Ok(existed)
    }
}
