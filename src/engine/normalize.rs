//! Root Normalizer
//!
//! Backends nest results one level below a synthetic node for the scanned
//! asset, with child names like `asset-42/src/index.js`. This stage strips
//! that asset prefix for display and, when the root has just one such
//! child, promotes the child to be the root.

use crate::config::DEFAULT_SEPARATOR;
use crate::models::ViewTreeNode;

/// Normalize with the default `/` separator.
pub fn normalize_root(root: ViewTreeNode, self_prefix: &str) -> ViewTreeNode {
    normalize_root_with(root, self_prefix, DEFAULT_SEPARATOR)
}

pub fn normalize_root_with(
    mut root: ViewTreeNode,
    self_prefix: &str,
    separator: &str,
) -> ViewTreeNode {
    if self_prefix.is_empty() {
        return root;
    }
    let marker = format!("{}{}", self_prefix, separator);

    if root.children.len() == 1 && root.children[0].name.starts_with(&marker) {
        if let Some(mut promoted) = root.children.pop() {
            promoted.name = promoted.name[marker.len()..].to_string();
            log::debug!(
                "Promoted '{}' to root, replacing '{}'",
                promoted.name,
                root.name
            );
            return promoted;
        }
    }

    for child in &mut root.children {
        if let Some(stripped) = child.name.strip_prefix(&marker) {
            child.name = stripped.to_string();
        }
    }
    root
}
