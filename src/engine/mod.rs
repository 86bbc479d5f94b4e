//! Risk Propagation Engine
//!
//! Four pure stages, run in order:
//! - `materialize`: raw backend tree (or SBOM graph) into an arena view tree
//! - `annotate`: match vulnerabilities and propagate decayed risk upward
//! - `prune`: remove zero-risk subtrees ("only risky paths" mode)
//! - `normalize`: strip the scanned asset's prefix from the top level
//!
//! [`RiskPipeline`] composes them under one set of [`PipelineOptions`].

mod annotate;
mod materialize;
mod normalize;
mod prune;
mod tree;

pub use annotate::{annotate, direct_risk_index, DEFAULT_DECAY_FACTOR};
pub use materialize::{materialize, materialize_graph, materialize_graph_bounded};
pub use normalize::{normalize_root, normalize_root_with};
pub use prune::prune;
pub use tree::{Ancestors, NodeId, ViewTree};

use rayon::prelude::*;

use crate::config::PipelineOptions;
use crate::errors::RiskResult;
use crate::models::{DependencyEdge, RawTreeNode, ViewTreeNode, Vulnerability};

/// Dependency data accepted by the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeInput {
    /// Nested `{ name, children }` tree from the composition-analysis backend
    Nested(RawTreeNode),
    /// Flat SBOM dependency graph expanded from `root`
    Graph {
        root: String,
        edges: Vec<DependencyEdge>,
    },
}

impl TreeInput {
    /// Build the arena tree. Only graph expansion can outgrow its input,
    /// so `max_nodes` bounds the `Graph` variant alone.
    pub fn materialize(&self, max_nodes: usize) -> RiskResult<ViewTree> {
        match self {
            TreeInput::Nested(raw) => Ok(materialize(raw)),
            TreeInput::Graph { root, edges } => materialize_graph_bounded(root, edges, max_nodes),
        }
    }
}

impl From<RawTreeNode> for TreeInput {
    fn from(raw: RawTreeNode) -> Self {
        TreeInput::Nested(raw)
    }
}

/// Runs the full materialize, annotate, prune, normalize sequence.
#[derive(Debug, Clone, Default)]
pub struct RiskPipeline {
    options: PipelineOptions,
}

impl RiskPipeline {
    /// Create a pipeline after validating `options`.
    pub fn new(options: PipelineOptions) -> RiskResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Build the view tree for one nested raw tree.
    ///
    /// `Ok(None)` means pruning removed everything; callers should show an
    /// empty state rather than a tree.
    pub fn run(&self, raw: &RawTreeNode, vulns: &[Vulnerability]) -> RiskResult<Option<ViewTreeNode>> {
        Ok(self.finish(materialize(raw), vulns))
    }

    /// Same as [`run`](Self::run) for any supported input format.
    pub fn run_input(&self, input: &TreeInput, vulns: &[Vulnerability]) -> RiskResult<Option<ViewTreeNode>> {
        let tree = input.materialize(self.options.max_nodes)?;
        Ok(self.finish(tree, vulns))
    }

    /// Run independent inputs in parallel. Results keep input order.
    pub fn run_batch(
        &self,
        inputs: &[TreeInput],
        vulns: &[Vulnerability],
    ) -> Vec<RiskResult<Option<ViewTreeNode>>> {
        log::info!("Running risk pipeline over {} inputs", inputs.len());
        inputs
            .par_iter()
            .map(|input| self.run_input(input, vulns))
            .collect()
    }

    fn finish(&self, mut tree: ViewTree, vulns: &[Vulnerability]) -> Option<ViewTreeNode> {
        annotate(&mut tree, vulns, self.options.decay_factor);
        let view = tree.into_view();

        let view = if self.options.include_zero_risk {
            view
        } else {
            let before = view.node_count();
            let pruned = prune(view)?;
            log::debug!("Pruned {} zero-risk nodes", before - pruned.node_count());
            pruned
        };

        Some(normalize_root_with(
            view,
            &self.options.self_prefix,
            &self.options.separator,
        ))
    }
}
