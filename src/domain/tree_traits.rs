use termtree::Tree;
use tracing::instrument;

use crate::domain::{Forest, Node};

/// Conversion into a printable `termtree`.
pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

fn label(node: &Node, show_ids: bool) -> String {
    if show_ids {
        format!("{} [{}] ({})", node.text, node.children.len(), node.id)
    } else {
        format!("{} [{}]", node.text, node.children.len())
    }
}

fn to_tree(node: &Node, show_ids: bool) -> Tree<String> {
    let leaves: Vec<_> = node.children.iter().map(|c| to_tree(c, show_ids)).collect();
    Tree::new(label(node, show_ids)).with_leaves(leaves)
}

impl TreeNodeConvert for Node {
    fn to_tree_string(&self) -> Tree<String> {
        to_tree(self, false)
    }
}

impl TreeNodeConvert for Forest {
    #[instrument(level = "trace", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        render_forest(self, false)
    }
}

/// Render a whole forest under a synthetic `.` root, optionally with ids.
pub fn render_forest(forest: &Forest, show_ids: bool) -> Tree<String> {
    let leaves: Vec<_> = forest.roots().iter().map(|r| to_tree(r, show_ids)).collect();
    Tree::new(".".to_string()).with_leaves(leaves)
}
