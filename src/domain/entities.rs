//! Domain entities: node identifiers, nodes, and new-node requests

use std::fmt;
use std::sync::Arc;

/// Opaque identifier of a node, unique across the whole forest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A labeled entry in the outline.
///
/// Children are held behind `Arc` so that snapshots produced by the engine
/// share every subtree they did not touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub text: String,
    /// Parent id, `None` for root-level nodes. Always agrees with containment.
    pub parent_id: Option<NodeId>,
    pub children: Vec<Arc<Node>>,
}

impl Node {
    /// Create a leaf node.
    pub fn leaf(id: impl Into<NodeId>, text: impl Into<String>, parent_id: Option<NodeId>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            parent_id,
            children: Vec::new(),
        }
    }

    /// Copy of this node with a different children sequence.
    pub(crate) fn with_children(&self, children: Vec<Arc<Node>>) -> Self {
        Self {
            id: self.id.clone(),
            text: self.text.clone(),
            parent_id: self.parent_id.clone(),
            children,
        }
    }

    /// Copy of this node with one more child appended.
    pub(crate) fn with_child_appended(&self, child: Arc<Node>) -> Self {
        let mut children = Vec::with_capacity(self.children.len() + 1);
        children.extend(self.children.iter().cloned());
        children.push(child);
        self.with_children(children)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns true if `id` names this node or any node below it.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.id == *id || self.children.iter().any(|c| c.contains(id))
    }

    /// Returns true if `id` names a node strictly below this one.
    pub fn has_descendant(&self, id: &NodeId) -> bool {
        self.children.iter().any(|c| c.contains(id))
    }

    /// Ids of this node and all descendants, pre-order.
    pub fn subtree_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    pub(crate) fn collect_ids(&self, ids: &mut Vec<NodeId>) {
        ids.push(self.id.clone());
        for child in &self.children {
            child.collect_ids(ids);
        }
    }

    /// Number of nodes in this subtree, including itself.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(|c| c.size()).sum::<usize>()
    }

    /// Height of this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(|c| c.depth()).max().unwrap_or(0)
    }
}

/// Caller-supplied part of a node about to be created.
///
/// Parent linkage and the (empty) children sequence are filled in by the
/// engine so a new node cannot arrive with a stale parent or a subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNode {
    pub id: NodeId,
    pub text: String,
}

impl NewNode {
    pub fn new(id: impl Into<NodeId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    pub(crate) fn into_node(self, parent_id: Option<NodeId>) -> Node {
        Node {
            id: self.id,
            text: self.text,
            parent_id,
            children: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        let mut root = Node::leaf("a", "A", None);
        let mut b = Node::leaf("b", "B", Some("a".into()));
        b.children.push(Arc::new(Node::leaf("c", "C", Some("b".into()))));
        root.children.push(Arc::new(b));
        root.children.push(Arc::new(Node::leaf("d", "D", Some("a".into()))));
        root
    }

    #[test]
    fn given_nested_node_when_querying_then_contains_and_descendant_differ_on_self() {
        let root = sample();
        assert!(root.contains(&"a".into()));
        assert!(!root.has_descendant(&"a".into()));
        assert!(root.has_descendant(&"c".into()));
        assert!(!root.contains(&"x".into()));
    }

    #[test]
    fn given_nested_node_when_collecting_ids_then_returns_preorder() {
        let ids = sample().subtree_ids();
        let ids: Vec<&str> = ids.iter().map(|i| i.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn given_nested_node_when_measuring_then_reports_size_and_depth() {
        let root = sample();
        assert_eq!(root.size(), 4);
        assert_eq!(root.depth(), 3);
    }

    #[test]
    fn given_new_node_when_materialized_then_has_parent_and_no_children() {
        let node = NewNode::new("n", "N").into_node(Some("p".into()));
        assert_eq!(node.parent_id, Some(NodeId::from("p")));
        assert!(node.is_leaf());
    }
}
