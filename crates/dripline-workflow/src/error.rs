//! Error types for the workflow layer

use thiserror::Error;

use crate::record::WorkflowId;

/// Result type alias using WorkflowError
pub type Result<T> = std::result::Result<T, WorkflowError>;

/// Errors that can occur saving, loading or listing workflows
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Saving a workflow without a name is a user-visible validation error;
    /// the save is aborted before any repository call
    #[error("workflow name must not be empty")]
    EmptyName,

    /// Update targeted an id the repository does not know
    #[error("workflow {0} not found")]
    NotFound(WorkflowId),

    /// Update requires a record that has already been assigned an id
    #[error("workflow record has no id")]
    MissingId,

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error from the persistence directory
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
