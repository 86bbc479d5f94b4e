use serde::{Deserialize, Serialize};

/// A dependency tree node exactly as the composition-analysis backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTreeNode {
    pub name: String,
    #[serde(default)]
    pub children: Vec<RawTreeNode>,
}

/// A known vulnerability keyed by the component it affects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vulnerability {
    #[serde(rename = "componentPurl", alias = "componentIdentifier")]
    pub component_identifier: String,
    #[serde(rename = "rawRiskAssessment", alias = "riskScore")]
    pub risk_score: f64,
}

/// One entry of an SBOM `dependencies` section: a component and what it depends on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyEdge {
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(rename = "dependsOn", default)]
    pub depends_on: Vec<String>,
}

/// Risk-annotated node handed to the rendering layer.
///
/// Carries no parent reference: a value of this type is always a plain
/// tree and can be cloned or serialized without cycle handling. Dropping,
/// `find` and `node_count` are iterative; the derived `Clone`, `PartialEq`,
/// `Debug` and serde impls recurse once per level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewTreeNode {
    pub name: String,
    pub children: Vec<ViewTreeNode>,
    pub risk: f64,
}

impl RawTreeNode {
    pub fn new(name: impl Into<String>, children: Vec<RawTreeNode>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    pub fn leaf(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }
}

impl Vulnerability {
    pub fn new(component_identifier: impl Into<String>, risk_score: f64) -> Self {
        Self {
            component_identifier: component_identifier.into(),
            risk_score,
        }
    }
}

impl DependencyEdge {
    pub fn new<I, S>(reference: impl Into<String>, depends_on: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            reference: reference.into(),
            depends_on: depends_on.into_iter().map(Into::into).collect(),
        }
    }
}

impl ViewTreeNode {
    pub fn new(name: impl Into<String>, risk: f64, children: Vec<ViewTreeNode>) -> Self {
        Self {
            name: name.into(),
            children,
            risk,
        }
    }

    /// Depth-first search for the first node with the given name.
    pub fn find(&self, name: &str) -> Option<&ViewTreeNode> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.name == name {
                return Some(node);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

// Children are unlinked onto a work list before each node is freed, so
// dropping a tree never recurses.
impl Drop for RawTreeNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl Drop for ViewTreeNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_tree_children_default_to_empty() -> Result<(), serde_json::Error> {
        let raw: RawTreeNode =
            serde_json::from_str(r#"{"name":"root","children":[{"name":"leaf"}]}"#)?;
        assert_eq!(raw.children.len(), 1);
        assert!(raw.children[0].children.is_empty());
        Ok(())
    }

    #[test]
    fn test_vulnerability_wire_names() -> Result<(), serde_json::Error> {
        let vulns: Vec<Vulnerability> = serde_json::from_str(
            r#"[
                {"componentPurl":"pkg:npm/lodash@4.17.20","rawRiskAssessment":7.5},
                {"componentIdentifier":"pkg:npm/minimist@1.2.0","riskScore":3}
            ]"#,
        )?;
        assert_eq!(vulns[0], Vulnerability::new("pkg:npm/lodash@4.17.20", 7.5));
        assert_eq!(vulns[1], Vulnerability::new("pkg:npm/minimist@1.2.0", 3.0));

        let out = serde_json::to_string(&vulns[0])?;
        assert!(out.contains("\"componentPurl\""));
        assert!(out.contains("\"rawRiskAssessment\""));
        Ok(())
    }

    #[test]
    fn test_dependency_edge_wire_names() -> Result<(), serde_json::Error> {
        let edges: Vec<DependencyEdge> = serde_json::from_str(
            r#"[{"ref":"app","dependsOn":["a","b"]},{"ref":"a"}]"#,
        )?;
        assert_eq!(edges[0], DependencyEdge::new("app", ["a", "b"]));
        assert!(edges[1].depends_on.is_empty());
        Ok(())
    }

    #[test]
    fn test_view_tree_serializes_without_parent() -> Result<(), serde_json::Error> {
        let tree = ViewTreeNode::new("root", 5.0, vec![ViewTreeNode::new("a", 10.0, vec![])]);
        let json = serde_json::to_value(&tree)?;
        assert!(json.get("parent").is_none());
        assert_eq!(json["children"][0]["risk"], 10.0);
        Ok(())
    }

    #[test]
    fn test_find_and_count() {
        let tree = ViewTreeNode::new(
            "root",
            0.0,
            vec![
                ViewTreeNode::new("a", 0.0, vec![ViewTreeNode::new("a1", 1.0, vec![])]),
                ViewTreeNode::new("b", 0.0, vec![]),
            ],
        );
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.find("a1").map(|n| n.risk), Some(1.0));
        assert!(tree.find("missing").is_none());
    }

    #[test]
    fn test_find_returns_first_in_preorder() {
        let tree = ViewTreeNode::new(
            "root",
            0.0,
            vec![
                ViewTreeNode::new("a", 0.0, vec![ViewTreeNode::new("dup", 1.0, vec![])]),
                ViewTreeNode::new("dup", 2.0, vec![]),
            ],
        );
        assert_eq!(tree.find("dup").map(|n| n.risk), Some(1.0));
    }

    #[test]
    fn test_deep_trees_drop_without_recursion() {
        let mut raw = RawTreeNode::leaf("n0");
        let mut view = ViewTreeNode::new("n0", 1.0, vec![]);
        for i in 1..100_000 {
            raw = RawTreeNode::new(format!("n{}", i), vec![raw]);
            view = ViewTreeNode::new(format!("n{}", i), 1.0, vec![view]);
        }
        assert_eq!(view.node_count(), 100_000);
        assert!(view.find("n0").is_some());
        drop(raw);
        drop(view);
    }
}
