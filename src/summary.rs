//! Summary statistics over an annotated view tree.

use serde::{Deserialize, Serialize};

use crate::models::ViewTreeNode;

/// Severity band for an aggregated risk value, using CVSS qualitative ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskBand {
    pub fn classify(risk: f64) -> Self {
        match risk {
            r if r <= 0.0 => RiskBand::None,
            r if r < 4.0 => RiskBand::Low,
            r if r < 7.0 => RiskBand::Medium,
            r if r < 9.0 => RiskBand::High,
            _ => RiskBand::Critical,
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskBand::None => write!(f, "None"),
            RiskBand::Low => write!(f, "Low"),
            RiskBand::Medium => write!(f, "Medium"),
            RiskBand::High => write!(f, "High"),
            RiskBand::Critical => write!(f, "Critical"),
        }
    }
}

/// Count of nodes per risk band.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskBreakdown {
    pub none: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

impl RiskBreakdown {
    fn record(&mut self, band: RiskBand) {
        match band {
            RiskBand::None => self.none += 1,
            RiskBand::Low => self.low += 1,
            RiskBand::Medium => self.medium += 1,
            RiskBand::High => self.high += 1,
            RiskBand::Critical => self.critical += 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeSummary {
    pub node_count: usize,
    pub risky_nodes: usize,
    pub max_depth: usize,
    pub max_risk: f64,
    pub root_risk: f64,
    pub breakdown: RiskBreakdown,
}

impl TreeSummary {
    /// Summarize a tree; `None` (everything pruned) gives an all-zero summary.
    pub fn from_tree(root: Option<&ViewTreeNode>) -> Self {
        let mut summary = TreeSummary::default();
        let Some(root) = root else {
            return summary;
        };
        summary.root_risk = root.risk;

        let mut stack = vec![(root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            summary.node_count += 1;
            if node.risk > 0.0 {
                summary.risky_nodes += 1;
            }
            summary.max_depth = summary.max_depth.max(depth);
            summary.max_risk = summary.max_risk.max(node.risk);
            summary.breakdown.record(RiskBand::classify(node.risk));
            stack.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        summary
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }
}
