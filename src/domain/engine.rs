//! Tree mutation engine
//!
//! Every operation is a pure function from a forest snapshot (plus
//! parameters) to the next snapshot. Only the nodes on the path from a root to
//! the changed node are rebuilt; all other subtrees are shared with the input.
//!
//! Two surfaces are offered:
//! - `try_*` functions return `Err(DomainError)` when the operation cannot be
//!   performed, and never touch the input.
//! - the plain functions degrade every such error to "return the input
//!   unchanged", which is what an interactive caller reacting to a stale
//!   gesture wants.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::{DomainError, Forest, NewNode, Node, NodeId};

/// Result type for engine operations.
pub type EngineResult = Result<Forest, DomainError>;

/// A single engine call, for folding a sequence of edits over a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Edit { id: NodeId, text: String },
    Delete { id: NodeId },
    CreateChild { parent: NodeId, node: NewNode },
    AddRoot { node: NewNode },
    /// `target: None` moves the node to the root level.
    Move { id: NodeId, target: Option<NodeId> },
}

impl Operation {
    pub fn try_apply(&self, forest: &Forest) -> EngineResult {
        match self {
            Operation::Edit { id, text } => try_edit(forest, id, text),
            Operation::Delete { id } => try_delete(forest, id),
            Operation::CreateChild { parent, node } => try_create_child(forest, parent, node.clone()),
            Operation::AddRoot { node } => try_add_root(forest, node.clone()),
            Operation::Move { id, target } => try_move(forest, id, target.as_ref()),
        }
    }

    pub fn apply(&self, forest: &Forest) -> Forest {
        self.try_apply(forest).unwrap_or_else(|e| unchanged(forest, e))
    }
}

/// Fold operations left to right, each applied to the previous result.
pub fn apply_all<'a>(forest: &Forest, ops: impl IntoIterator<Item = &'a Operation>) -> Forest {
    ops.into_iter().fold(forest.clone(), |acc, op| op.apply(&acc))
}

/// Replace the node `id` by whatever `f` returns (nothing removes it) and
/// rebuild the path above it. `None` if `id` does not occur.
fn splice<F>(nodes: &[Arc<Node>], id: &NodeId, f: &mut F) -> Option<Vec<Arc<Node>>>
where
    F: FnMut(&Arc<Node>) -> Option<Arc<Node>>,
{
    for (i, node) in nodes.iter().enumerate() {
        if node.id == *id {
            let mut out = Vec::with_capacity(nodes.len());
            out.extend(nodes[..i].iter().cloned());
            out.extend(f(node));
            out.extend(nodes[i + 1..].iter().cloned());
            return Some(out);
        }
        if let Some(children) = splice(&node.children, id, f) {
            let mut out = nodes.to_vec();
            out[i] = Arc::new(node.with_children(children));
            return Some(out);
        }
    }
    None
}

fn splice_forest<F>(forest: &Forest, id: &NodeId, mut f: F) -> EngineResult
where
    F: FnMut(&Arc<Node>) -> Option<Arc<Node>>,
{
    splice(forest.roots(), id, &mut f)
        .map(Forest::from_roots)
        .ok_or_else(|| DomainError::NotFound(id.clone()))
}

fn unchanged(forest: &Forest, reason: DomainError) -> Forest {
    debug!(%reason, "operation left forest unchanged");
    forest.clone()
}

#[instrument(level = "debug", skip(forest))]
pub fn try_edit(forest: &Forest, id: &NodeId, text: &str) -> EngineResult {
    splice_forest(forest, id, |node| {
        Some(Arc::new(Node {
            text: text.to_string(),
            ..(**node).clone()
        }))
    })
}

/// Replace the text of `id`; unknown ids leave the forest unchanged.
pub fn edit(forest: &Forest, id: &NodeId, text: &str) -> Forest {
    try_edit(forest, id, text).unwrap_or_else(|e| unchanged(forest, e))
}

#[instrument(level = "debug", skip(forest))]
pub fn try_delete(forest: &Forest, id: &NodeId) -> EngineResult {
    splice_forest(forest, id, |_| None)
}

/// Remove `id` with its whole subtree, wherever it is nested.
pub fn delete(forest: &Forest, id: &NodeId) -> Forest {
    try_delete(forest, id).unwrap_or_else(|e| unchanged(forest, e))
}

#[instrument(level = "debug", skip(forest))]
pub fn try_create_child(forest: &Forest, parent: &NodeId, node: NewNode) -> EngineResult {
    if !forest.contains(parent) {
        return Err(DomainError::NotFound(parent.clone()));
    }
    if forest.contains(&node.id) {
        return Err(DomainError::DuplicateId(node.id));
    }
    let child = Arc::new(node.into_node(Some(parent.clone())));
    splice_forest(forest, parent, |p| Some(Arc::new(p.with_child_appended(child.clone()))))
}

/// Append `node` as the last child of `parent`.
pub fn create_child(forest: &Forest, parent: &NodeId, node: NewNode) -> Forest {
    try_create_child(forest, parent, node).unwrap_or_else(|e| unchanged(forest, e))
}

#[instrument(level = "debug", skip(forest))]
pub fn try_add_root(forest: &Forest, node: NewNode) -> EngineResult {
    if forest.contains(&node.id) {
        return Err(DomainError::DuplicateId(node.id));
    }
    let mut roots = forest.roots().to_vec();
    roots.push(Arc::new(node.into_node(None)));
    Ok(Forest::from_roots(roots))
}

/// Append `node` to the root sequence.
pub fn add_root(forest: &Forest, node: NewNode) -> Forest {
    try_add_root(forest, node).unwrap_or_else(|e| unchanged(forest, e))
}

/// Relocate `id` with its subtree to the end of `target`'s children, or of the
/// root sequence when `target` is `None`.
///
/// All checks run before anything is removed, so a rejected move cannot lose
/// the node.
#[instrument(level = "debug", skip(forest))]
pub fn try_move(forest: &Forest, id: &NodeId, target: Option<&NodeId>) -> EngineResult {
    let node = forest
        .find(id)
        .ok_or_else(|| DomainError::NotFound(id.clone()))?
        .clone();

    if let Some(target) = target {
        if target == id {
            return Err(DomainError::SelfMove(id.clone()));
        }
        if node.has_descendant(target) {
            return Err(DomainError::CycleDetected {
                id: id.clone(),
                target: target.clone(),
            });
        }
        if !forest.contains(target) {
            return Err(DomainError::NotFound(target.clone()));
        }
    }

    let detached = splice_forest(forest, id, |_| None)?;
    let moved = Arc::new(Node {
        parent_id: target.cloned(),
        ..(*node).clone()
    });

    match target {
        None => {
            let mut roots = detached.into_roots();
            roots.push(moved);
            Ok(Forest::from_roots(roots))
        }
        Some(target) => splice_forest(&detached, target, |p| {
            Some(Arc::new(p.with_child_appended(moved.clone())))
        }),
    }
}

/// Move `id` under `target`; self moves, cycles and unknown ids are no-ops.
pub fn move_node(forest: &Forest, id: &NodeId, target: Option<&NodeId>) -> Forest {
    try_move(forest, id, target).unwrap_or_else(|e| unchanged(forest, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample_outline;

    fn id(s: &str) -> NodeId {
        NodeId::from(s)
    }

    #[test]
    fn given_edit_when_applied_then_untouched_siblings_are_shared() {
        let before = sample_outline();
        let after = edit(&before, &id("item-1-1"), "renamed");

        // item-2 was not on the path, so the very same allocation is reused
        assert!(Arc::ptr_eq(&before.roots()[1], &after.roots()[1]));
        assert!(Arc::ptr_eq(
            &before.roots()[0].children[1],
            &after.roots()[0].children[1]
        ));
        assert!(!Arc::ptr_eq(&before.roots()[0], &after.roots()[0]));
    }

    #[test]
    fn given_move_when_applied_then_moved_subtree_children_are_shared() {
        let before = sample_outline();
        let after = move_node(&before, &id("item-1"), Some(&id("item-2")));

        let moved = after.find(&id("item-1")).unwrap();
        assert!(Arc::ptr_eq(
            &before.roots()[0].children[0],
            &moved.children[0]
        ));
    }

    #[test]
    fn given_missing_target_when_moving_then_error_and_node_kept() {
        let forest = sample_outline();
        let err = try_move(&forest, &id("item-2"), Some(&id("ghost"))).unwrap_err();
        assert_eq!(err, DomainError::NotFound(id("ghost")));
        assert_eq!(move_node(&forest, &id("item-2"), Some(&id("ghost"))), forest);
    }

    #[test]
    fn given_operations_when_folded_then_each_sees_previous_result() {
        let ops = vec![
            Operation::AddRoot { node: NewNode::new("r", "R") },
            Operation::CreateChild { parent: id("r"), node: NewNode::new("c", "C") },
            Operation::Move { id: id("item-2"), target: Some(id("c")) },
            Operation::Edit { id: id("item-2"), text: "deep".into() },
        ];
        let result = apply_all(&sample_outline(), &ops);

        assert_eq!(
            result.path_to(&id("item-2")).unwrap(),
            vec![id("r"), id("c"), id("item-2")]
        );
        assert_eq!(result.find(&id("item-2")).unwrap().text, "deep");
    }
}
