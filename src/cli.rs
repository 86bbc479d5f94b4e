use clap::Parser;
use std::path::PathBuf;

use crate::config::{PipelineOptions, DEFAULT_MAX_NODES, DEFAULT_SEPARATOR};
use crate::engine::DEFAULT_DECAY_FACTOR;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "riskview",
    about = "riskview - Propagate vulnerability risk through dependency trees",
    version
)]
pub struct Args {
    /// Dependency tree JSON file (repeat for batch mode)
    #[arg(short, long = "tree", required = true)]
    pub trees: Vec<PathBuf>,

    /// Vulnerability list JSON file
    #[arg(long)]
    pub vulns: PathBuf,

    /// Read tree files as SBOM dependency graphs rooted at this reference
    #[arg(short, long)]
    pub graph_root: Option<String>,

    /// Decay factor for risk propagated to ancestors (0 disables propagation)
    #[arg(short, long, default_value_t = DEFAULT_DECAY_FACTOR)]
    pub decay: f64,

    /// Show all nodes, including zero-risk subtrees
    #[arg(short, long)]
    pub all: bool,

    /// Identifier of the scanned asset, stripped from top-level node names
    #[arg(short, long, default_value = "")]
    pub self_prefix: String,

    /// Separator between the asset identifier and the rest of a node name
    #[arg(long, default_value = DEFAULT_SEPARATOR)]
    pub separator: String,

    /// Refuse SBOM graphs whose expanded tree would exceed this many nodes
    #[arg(long, default_value_t = DEFAULT_MAX_NODES)]
    pub max_nodes: usize,

    /// Write the JSON report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of parallel threads for batch mode (0 = auto-detect)
    #[arg(long, default_value = "0")]
    pub threads: usize,

    /// Enable verbose logging of all operations
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors and skip the summary
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions::default()
            .with_decay_factor(self.decay)
            .with_zero_risk(self.all)
            .with_self_prefix(self.self_prefix.clone())
            .with_separator(self.separator.clone())
            .with_max_nodes(self.max_nodes)
    }
}
