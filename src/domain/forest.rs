//! Forest snapshots: lookup and traversal

use std::sync::Arc;

use crate::domain::{Node, NodeId};

/// One immutable value of the whole outline: an ordered sequence of roots.
///
/// Cloning a forest clones the root vector only; every node is shared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forest {
    roots: Vec<Arc<Node>>,
}

impl Forest {
    pub fn new() -> Self {
        Self { roots: Vec::new() }
    }

    /// Wrap an existing root sequence. No invariant checking happens here,
    /// see [`crate::domain::invariants::check`].
    pub fn from_roots(roots: Vec<Arc<Node>>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[Arc<Node>] {
        &self.roots
    }

    pub(crate) fn into_roots(self) -> Vec<Arc<Node>> {
        self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes at every level.
    pub fn len(&self) -> usize {
        self.roots.iter().map(|r| r.size()).sum()
    }

    /// Height of the tallest tree, 0 for an empty forest.
    pub fn depth(&self) -> usize {
        self.roots.iter().map(|r| r.depth()).max().unwrap_or(0)
    }

    /// Depth-first search across all roots.
    pub fn find(&self, id: &NodeId) -> Option<&Arc<Node>> {
        fn walk<'a>(nodes: &'a [Arc<Node>], id: &NodeId) -> Option<&'a Arc<Node>> {
            for node in nodes {
                if node.id == *id {
                    return Some(node);
                }
                if let Some(found) = walk(&node.children, id) {
                    return Some(found);
                }
            }
            None
        }
        walk(&self.roots, id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.find(id).is_some()
    }

    /// Ids from the root down to `id` (inclusive), or `None` if absent.
    pub fn path_to(&self, id: &NodeId) -> Option<Vec<NodeId>> {
        fn walk(nodes: &[Arc<Node>], id: &NodeId, path: &mut Vec<NodeId>) -> bool {
            for node in nodes {
                path.push(node.id.clone());
                if node.id == *id || walk(&node.children, id, path) {
                    return true;
                }
                path.pop();
            }
            false
        }
        let mut path = Vec::new();
        walk(&self.roots, id, &mut path).then_some(path)
    }

    /// Containing node of `id`. `None` for roots and for unknown ids.
    pub fn parent_of(&self, id: &NodeId) -> Option<&Arc<Node>> {
        let path = self.path_to(id)?;
        let parent = path.iter().rev().nth(1)?;
        self.find(parent)
    }

    /// True if `candidate` lies strictly inside the subtree of `ancestor`.
    pub fn is_descendant(&self, ancestor: &NodeId, candidate: &NodeId) -> bool {
        self.find(ancestor)
            .map(|n| n.has_descendant(candidate))
            .unwrap_or(false)
    }

    /// Ids of `id` and everything below it, empty if `id` is absent.
    pub fn subtree_ids(&self, id: &NodeId) -> Vec<NodeId> {
        self.find(id).map(|n| n.subtree_ids()).unwrap_or_default()
    }

    /// All ids, pre-order.
    pub fn ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(self.len());
        for root in &self.roots {
            root.collect_ids(&mut ids);
        }
        ids
    }

    /// Pre-order iterator over every node.
    pub fn iter(&self) -> Preorder<'_> {
        Preorder::new(&self.roots)
    }
}

pub struct Preorder<'a> {
    stack: Vec<&'a Arc<Node>>,
}

impl<'a> Preorder<'a> {
    fn new(roots: &'a [Arc<Node>]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        // reversed so siblings come out left-to-right
        self.stack.extend(current.children.iter().rev());
        Some(current.as_ref())
    }
}
