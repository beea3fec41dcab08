//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::NodeId;

/// Reasons an engine operation leaves the forest unchanged, plus the
/// invariant violations reported by the checker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("node not found: {0}")]
    NotFound(NodeId),

    #[error("cannot move node onto itself: {0}")]
    SelfMove(NodeId),

    #[error("moving {id} under {target} would create a cycle")]
    CycleDetected { id: NodeId, target: NodeId },

    #[error("duplicate node id: {0}")]
    DuplicateId(NodeId),

    #[error("node {id} records parent {recorded:?} but is contained in {actual}")]
    ParentMismatch {
        id: NodeId,
        recorded: Option<NodeId>,
        actual: NodeId,
    },

    #[error("root node {id} records parent {recorded}")]
    RootHasParent { id: NodeId, recorded: NodeId },
}

impl DomainError {
    /// True for the rejections a move can produce (self move or cycle).
    pub fn is_invalid_move(&self) -> bool {
        matches!(self, Self::SelfMove(_) | Self::CycleDetected { .. })
    }
}
