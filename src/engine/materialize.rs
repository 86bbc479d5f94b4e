//! Tree Materializer
//!
//! Turns backend input into a [`ViewTree`] with zeroed risk and parent
//! links. Both entry points walk with an explicit stack so tree depth is
//! bounded by memory, not by the call stack.

use std::collections::HashMap;

use super::tree::{NodeId, ViewTree};
use crate::config::DEFAULT_MAX_NODES;
use crate::errors::{RiskResult, RiskViewError};
use crate::models::{DependencyEdge, RawTreeNode};

/// Copy a nested raw tree into a fresh arena, preserving names and child order.
pub fn materialize(raw: &RawTreeNode) -> ViewTree {
    let mut tree = ViewTree::with_root(raw.name.clone());
    let mut stack: Vec<(&RawTreeNode, NodeId)> = raw
        .children
        .iter()
        .rev()
        .map(|child| (child, ViewTree::ROOT))
        .collect();

    while let Some((node, parent)) = stack.pop() {
        let id = tree.push_node(node.name.clone(), Some(parent));
        stack.extend(node.children.iter().rev().map(|child| (child, id)));
    }

    log::debug!("Materialized tree '{}' with {} nodes", raw.name, tree.len());
    tree
}

/// Expand an SBOM dependency graph into a tree rooted at `root_ref`,
/// bounded by [`DEFAULT_MAX_NODES`].
pub fn materialize_graph(root_ref: &str, edges: &[DependencyEdge]) -> RiskResult<ViewTree> {
    materialize_graph_bounded(root_ref, edges, DEFAULT_MAX_NODES)
}

/// Expand an SBOM dependency graph into a tree of at most `max_nodes` nodes.
///
/// A component reachable through several parents is copied under each of
/// them, so stacked shared dependencies grow the tree exponentially. Fails
/// with [`RiskViewError::TreeTooLarge`] once the budget is used up, and with
/// [`RiskViewError::MalformedTree`] when a reference depends on one of its
/// own ancestors. References without an edge entry become leaves.
pub fn materialize_graph_bounded(
    root_ref: &str,
    edges: &[DependencyEdge],
    max_nodes: usize,
) -> RiskResult<ViewTree> {
    let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges {
        adjacency
            .entry(edge.reference.as_str())
            .or_default()
            .extend(edge.depends_on.iter().map(String::as_str));
    }

    let mut tree = ViewTree::with_root(root_ref.to_string());
    let mut path: Vec<&str> = vec![root_ref];
    let mut stack: Vec<(&str, NodeId, usize)> = Vec::new();
    push_dependencies(&mut stack, &adjacency, root_ref, ViewTree::ROOT, 1);

    while let Some((reference, parent, depth)) = stack.pop() {
        path.truncate(depth);
        if path.contains(&reference) {
            let mut cycle: Vec<String> = path.iter().map(|r| r.to_string()).collect();
            cycle.push(reference.to_string());
            log::debug!("Dependency cycle detected at '{}'", reference);
            return Err(RiskViewError::malformed_tree(reference, cycle));
        }
        path.push(reference);

        if tree.len() >= max_nodes {
            log::warn!(
                "Dependency graph from '{}' exceeds the {} node budget",
                root_ref,
                max_nodes
            );
            return Err(RiskViewError::TreeTooLarge {
                root: root_ref.to_string(),
                limit: max_nodes,
            });
        }
        let id = tree.push_node(reference.to_string(), Some(parent));
        push_dependencies(&mut stack, &adjacency, reference, id, depth + 1);
    }

    log::debug!(
        "Expanded dependency graph from '{}': {} edges -> {} nodes",
        root_ref,
        edges.len(),
        tree.len()
    );
    Ok(tree)
}

fn push_dependencies<'a>(
    stack: &mut Vec<(&'a str, NodeId, usize)>,
    adjacency: &HashMap<&'a str, Vec<&'a str>>,
    reference: &str,
    id: NodeId,
    depth: usize,
) {
    if let Some(deps) = adjacency.get(reference) {
        stack.extend(deps.iter().rev().map(|&dep| (dep, id, depth)));
    }
}
