use std::collections::HashMap;
use std::sync::Arc;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::{DomainError, Forest, Node, NodeId};

/// Flattened copy of one node of a snapshot.
#[derive(Debug)]
pub struct ArenaNode {
    pub id: NodeId,
    pub text: String,
    /// Parent id as recorded on the node itself
    pub recorded_parent: Option<NodeId>,
    /// Index of the node that actually contains this one, None for roots
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena
    pub children: Vec<Index>,
}

/// Arena index over a forest snapshot.
///
/// Gives explicit parent links, which the nested `Arc` representation does
/// not have. Building it fails on the first duplicate id, found through the
/// id map.
#[derive(Debug)]
pub struct ForestArena {
    arena: Arena<ArenaNode>,
    roots: Vec<Index>,
    by_id: HashMap<NodeId, Index>,
}

impl ForestArena {
    fn new() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    #[instrument(level = "debug", skip(forest))]
    pub fn from_forest(forest: &Forest) -> Result<Self, DomainError> {
        let mut index = Self::new();
        // (node, parent index) pairs still to insert
        let mut stack: Vec<(&Arc<Node>, Option<Index>)> =
            forest.roots().iter().rev().map(|r| (r, None)).collect();

        while let Some((node, parent)) = stack.pop() {
            let idx = index.insert_node(node, parent)?;
            for child in node.children.iter().rev() {
                stack.push((child, Some(idx)));
            }
        }
        Ok(index)
    }

    #[instrument(level = "trace", skip(self, node), fields(id = %node.id))]
    fn insert_node(&mut self, node: &Node, parent: Option<Index>) -> Result<Index, DomainError> {
        if self.by_id.contains_key(&node.id) {
            return Err(DomainError::DuplicateId(node.id.clone()));
        }
        let idx = self.arena.insert(ArenaNode {
            id: node.id.clone(),
            text: node.text.clone(),
            recorded_parent: node.parent_id.clone(),
            parent,
            children: Vec::new(),
        });
        self.by_id.insert(node.id.clone(), idx);

        match parent.and_then(|p| self.arena.get_mut(p)) {
            Some(parent) => parent.children.push(idx),
            None => self.roots.push(idx),
        }
        Ok(idx)
    }

    pub fn get_node(&self, idx: Index) -> Option<&ArenaNode> {
        self.arena.get(idx)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    /// Id of the node that actually contains `idx`.
    pub fn actual_parent_id(&self, idx: Index) -> Option<&NodeId> {
        let parent = self.get_node(idx)?.parent?;
        self.get_node(parent).map(|p| &p.id)
    }

    pub fn iter(&self) -> ArenaIterator<'_> {
        ArenaIterator::new(self)
    }
}

/// Pre-order traversal over all roots.
pub struct ArenaIterator<'a> {
    arena: &'a ForestArena,
    stack: Vec<Index>,
}

impl<'a> ArenaIterator<'a> {
    fn new(arena: &'a ForestArena) -> Self {
        Self {
            arena,
            stack: arena.roots.iter().rev().copied().collect(),
        }
    }
}

impl<'a> Iterator for ArenaIterator<'a> {
    type Item = (Index, &'a ArenaNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children.iter().rev());
                return Some((current_idx, node));
            }
        }
        None
    }
}
