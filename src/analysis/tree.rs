//! Shape metrics over element-discovery trees.
//!
//! All three walks take a forest (a slice of roots) so callers can pass
//! `std::slice::from_ref(&root)` for a single tree.

use crate::model::TreeNode;
use serde::Serialize;

/// Count nodes with no children, at any depth.
pub fn count_leaves(nodes: &[TreeNode]) -> usize {
    nodes
        .iter()
        .map(|node| {
            if node.is_leaf() {
                1
            } else {
                count_leaves(node.children())
            }
        })
        .sum()
}

/// Count every node in the forest.
pub fn count_total(nodes: &[TreeNode]) -> usize {
    nodes
        .iter()
        .map(|node| 1 + count_total(node.children()))
        .sum()
}

/// Deepest level reached below `current_depth`.
///
/// Each sibling starts again from `current_depth`; only the running maximum
/// carries across branches. A lone root has depth 0.
pub fn max_depth(nodes: &[TreeNode], current_depth: usize, running_max: usize) -> usize {
    let mut max = running_max;
    for node in nodes {
        if node.is_leaf() {
            max = max.max(current_depth);
        } else {
            max = max_depth(node.children(), current_depth + 1, max);
        }
    }
    max
}

/// The three tree metrics for a single root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub leaves: usize,
    pub total: usize,
    pub depth: usize,
}

impl TreeStats {
    pub fn of(root: &TreeNode) -> Self {
        let forest = std::slice::from_ref(root);
        Self {
            leaves: count_leaves(forest),
            total: count_total(forest),
            depth: max_depth(forest, 0, 0),
        }
    }
}
