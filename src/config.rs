//! Pipeline configuration.

use crate::engine::DEFAULT_DECAY_FACTOR;
use crate::errors::{RiskResult, RiskViewError};

/// Separator between the asset identifier and the path inside it.
pub const DEFAULT_SEPARATOR: &str = "/";

/// Node budget for expanding an SBOM dependency graph into a tree.
pub const DEFAULT_MAX_NODES: usize = 1_000_000;

/// Options controlling one run of the risk pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    /// Numerator of the per-level attenuation applied to propagated risk
    pub decay_factor: f64,
    /// Keep zero-risk subtrees ("show all") instead of pruning them
    pub include_zero_risk: bool,
    /// Identifier of the scanned asset, stripped from top-level node names
    pub self_prefix: String,
    /// Separator following `self_prefix` in node names
    pub separator: String,
    /// Upper bound on nodes produced when expanding a dependency graph
    pub max_nodes: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            decay_factor: DEFAULT_DECAY_FACTOR,
            include_zero_risk: false,
            self_prefix: String::new(),
            separator: DEFAULT_SEPARATOR.to_string(),
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

impl PipelineOptions {
    pub fn with_decay_factor(mut self, decay_factor: f64) -> Self {
        self.decay_factor = decay_factor;
        self
    }

    pub fn with_zero_risk(mut self, include_zero_risk: bool) -> Self {
        self.include_zero_risk = include_zero_risk;
        self
    }

    pub fn with_self_prefix(mut self, self_prefix: impl Into<String>) -> Self {
        self.self_prefix = self_prefix.into();
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Reject options that would let a node's risk go negative or NaN.
    pub fn validate(&self) -> RiskResult<()> {
        if !self.decay_factor.is_finite() {
            return Err(RiskViewError::invalid_option(
                "decay_factor",
                format!("must be finite, got {}", self.decay_factor),
            ));
        }
        if self.decay_factor < 0.0 {
            return Err(RiskViewError::invalid_option(
                "decay_factor",
                format!("must not be negative, got {}", self.decay_factor),
            ));
        }
        if self.max_nodes == 0 {
            return Err(RiskViewError::invalid_option(
                "max_nodes",
                "must allow at least the root node",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = PipelineOptions::default();
        assert_eq!(options.decay_factor, 1.0);
        assert!(!options.include_zero_risk);
        assert_eq!(options.separator, "/");
        assert_eq!(options.max_nodes, DEFAULT_MAX_NODES);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_zero_and_large_decay_accepted() {
        assert!(PipelineOptions::default().with_decay_factor(0.0).validate().is_ok());
        assert!(PipelineOptions::default().with_decay_factor(3.5).validate().is_ok());
    }

    #[test]
    fn test_negative_decay_rejected() {
        let err = PipelineOptions::default()
            .with_decay_factor(-0.5)
            .validate()
            .unwrap_err();
        assert!(matches!(err, RiskViewError::InvalidOption { ref option, .. } if option == "decay_factor"));
    }

    #[test]
    fn test_zero_node_budget_rejected() {
        let err = PipelineOptions::default().with_max_nodes(0).validate().unwrap_err();
        assert!(matches!(err, RiskViewError::InvalidOption { ref option, .. } if option == "max_nodes"));
        assert!(PipelineOptions::default().with_max_nodes(1).validate().is_ok());
    }

    #[test]
    fn test_non_finite_decay_rejected() {
        assert!(PipelineOptions::default().with_decay_factor(f64::NAN).validate().is_err());
        assert!(PipelineOptions::default()
            .with_decay_factor(f64::INFINITY)
            .validate()
            .is_err());
    }
}
