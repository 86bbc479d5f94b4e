//! Dependency Risk Propagation Engine
//!
//! Turns a dependency tree and a flat vulnerability list into a
//! risk-annotated, optionally pruned view tree ready for visualization.

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod loader;
pub mod models;
pub mod report;
pub mod summary;

pub use config::PipelineOptions;
pub use engine::{
    annotate, materialize, materialize_graph, materialize_graph_bounded, normalize_root, prune,
    RiskPipeline, TreeInput, ViewTree,
};
pub use errors::{RiskResult, RiskViewError};
pub use models::{DependencyEdge, RawTreeNode, ViewTreeNode, Vulnerability};
