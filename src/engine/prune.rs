//! Pruner: drop every subtree whose accumulated risk is exactly zero.

use crate::models::ViewTreeNode;

/// A node whose children are being pruned, with the survivors so far.
struct Frame {
    node: ViewTreeNode,
    pending: std::vec::IntoIter<ViewTreeNode>,
    kept: Vec<ViewTreeNode>,
}

impl Frame {
    fn new(mut node: ViewTreeNode) -> Self {
        let children = std::mem::take(&mut node.children);
        Self {
            kept: Vec::with_capacity(children.len()),
            pending: children.into_iter(),
            node,
        }
    }
}

/// Post-order prune. Returns `None` when `node` itself has zero risk,
/// which for the root means nothing risky is left to show.
///
/// Runs on an explicit stack, so tree depth is not limited by the call stack.
pub fn prune(node: ViewTreeNode) -> Option<ViewTreeNode> {
    let mut stack = vec![Frame::new(node)];
    loop {
        let top = stack.last_mut()?;
        if let Some(child) = top.pending.next() {
            stack.push(Frame::new(child));
            continue;
        }

        let Frame { mut node, kept, .. } = stack.pop()?;
        node.children = kept;
        let survivor = if node.risk == 0.0 { None } else { Some(node) };

        match stack.last_mut() {
            Some(parent) => parent.kept.extend(survivor),
            None => return survivor,
        }
    }
}
