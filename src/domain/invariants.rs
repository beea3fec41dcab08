//! Structural invariant checks for forest snapshots
//!
//! Snapshots are immutable `Arc` trees assembled bottom-up, so they are always
//! finite and acyclic. What can still go wrong is aliasing (the same id at two
//! places) and recorded parent ids that disagree with containment.

use tracing::{instrument, warn};

use crate::domain::{DomainError, Forest, ForestArena};

/// Verify id uniqueness and parent agreement, reporting the first violation.
#[instrument(level = "debug", skip(forest), fields(nodes = forest.len()))]
pub fn check(forest: &Forest) -> Result<(), DomainError> {
    match violations(forest).into_iter().next() {
        Some(violation) => {
            warn!(%violation, "forest invariant violated");
            Err(violation)
        }
        None => Ok(()),
    }
}

/// All violations, in pre-order. A duplicate id stops the scan, because the
/// parent links below an aliased node are ambiguous.
pub fn violations(forest: &Forest) -> Vec<DomainError> {
    let arena = match ForestArena::from_forest(forest) {
        Ok(arena) => arena,
        Err(e) => return vec![e],
    };

    let mut found = Vec::new();
    for (idx, node) in arena.iter() {
        match (arena.actual_parent_id(idx), &node.recorded_parent) {
            (None, Some(recorded)) => found.push(DomainError::RootHasParent {
                id: node.id.clone(),
                recorded: recorded.clone(),
            }),
            (Some(actual), recorded) if recorded.as_ref() != Some(actual) => {
                found.push(DomainError::ParentMismatch {
                    id: node.id.clone(),
                    recorded: recorded.clone(),
                    actual: actual.clone(),
                })
            }
            _ => {}
        }
    }
    found
}

pub fn is_valid(forest: &Forest) -> bool {
    violations(forest).is_empty()
}
