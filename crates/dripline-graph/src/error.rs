//! Error types for the graph model

use thiserror::Error;

use crate::step::StepType;
use crate::types::NodeId;

/// Result type alias using GraphError
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors that can occur working with graph data
#[derive(Debug, Error)]
pub enum GraphError {
    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Snapshot compression error
    #[error("snapshot compression error: {0}")]
    Compression(String),
}

/// Typed rejection of an invalid connection attempt
///
/// The connection-role rule (trigger nodes expose no inbound handle) is a
/// data-level invariant, not just a rendering constraint, so `connect`
/// refuses a topologically invalid edge instead of silently allowing it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("source node '{0}' does not exist")]
    UnknownSource(NodeId),

    #[error("target node '{0}' does not exist")]
    UnknownTarget(NodeId),

    #[error("{0} steps do not accept inbound connections")]
    InboundNotAllowed(StepType),
}
