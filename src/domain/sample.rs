//! The outline a fresh session starts from

use std::sync::Arc;

use crate::domain::{Forest, Node, NodeId};

/// Two roots: `Item 1` (with `Item 1-1` and `Item 1-2`) and `Item 2`.
pub fn sample_outline() -> Forest {
    let item_1 = NodeId::from("item-1");
    let mut first = Node::leaf(item_1.clone(), "Item 1", None);
    first.children = vec![
        Arc::new(Node::leaf("item-1-1", "Item 1-1", Some(item_1.clone()))),
        Arc::new(Node::leaf("item-1-2", "Item 1-2", Some(item_1))),
    ];
    let second = Node::leaf("item-2", "Item 2", None);
    Forest::from_roots(vec![Arc::new(first), Arc::new(second)])
}
