//! Risk Annotator
//!
//! Matches vulnerabilities to nodes by name and pushes a decayed share of
//! each node's direct risk up to its ancestors. The ancestor at distance `i`
//! receives `direct * (decay_factor / i)`.

use std::collections::HashMap;

use super::tree::ViewTree;
use crate::models::Vulnerability;

/// Propagation numerator used when the caller does not pick one.
pub const DEFAULT_DECAY_FACTOR: f64 = 1.0;

/// Sum vulnerability scores per component identifier, in input order.
///
/// Negative and non-finite scores are dropped so accumulated risk stays a
/// non-negative real number.
pub fn direct_risk_index(vulns: &[Vulnerability]) -> HashMap<&str, f64> {
    let mut index: HashMap<&str, f64> = HashMap::new();
    for vuln in vulns {
        if !vuln.risk_score.is_finite() || vuln.risk_score < 0.0 {
            log::warn!(
                "Ignoring vulnerability for '{}' with invalid risk score {}",
                vuln.component_identifier,
                vuln.risk_score
            );
            continue;
        }
        *index.entry(vuln.component_identifier.as_str()).or_insert(0.0) += vuln.risk_score;
    }
    index
}

/// Annotate `tree` in place.
///
/// Nodes are visited in pre-order, so a node's own direct risk is written
/// before any descendant propagates into it. Writing direct risk overwrites
/// the accumulator; propagation adds to it. A negative or non-finite
/// `decay_factor` is treated as zero: only direct risk is recorded.
pub fn annotate(tree: &mut ViewTree, vulns: &[Vulnerability], decay_factor: f64) {
    let decay_factor = if decay_factor.is_finite() && decay_factor >= 0.0 {
        decay_factor
    } else {
        log::warn!("Invalid decay factor {}; propagating no risk to ancestors", decay_factor);
        0.0
    };
    let index = direct_risk_index(vulns);
    if index.is_empty() {
        log::debug!("No usable vulnerabilities; tree left at zero risk");
        return;
    }

    let mut risky = 0usize;
    for position in 0..tree.nodes.len() {
        let direct = match index.get(tree.nodes[position].name.as_str()) {
            Some(&sum) if sum > 0.0 => sum,
            _ => continue,
        };
        risky += 1;

        let node = &mut tree.nodes[position];
        node.risk = direct;
        node.direct_risk = direct;

        let mut ancestor = node.parent;
        let mut distance = 1usize;
        while let Some(id) = ancestor {
            let entry = &mut tree.nodes[id.0];
            entry.risk += direct * (decay_factor / distance as f64);
            ancestor = entry.parent;
            distance += 1;
        }
    }

    log::debug!(
        "Annotated {} of {} nodes with direct risk (decay factor {})",
        risky,
        tree.len(),
        decay_factor
    );
}
