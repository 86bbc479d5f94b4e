//! JSON file input for the backend wire formats.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::errors::{RiskResult, RiskViewError};
use crate::models::{DependencyEdge, RawTreeNode, Vulnerability};

/// Dependency graph files come either as a bare edge list or as a full
/// SBOM document whose `dependencies` section holds the edges.
#[derive(Deserialize)]
#[serde(untagged)]
enum GraphDocument {
    Edges(Vec<DependencyEdge>),
    Sbom { dependencies: Vec<DependencyEdge> },
}

fn read_json<T: DeserializeOwned>(path: &Path) -> RiskResult<T> {
    let file = File::open(path).map_err(|e| RiskViewError::io(e, path.to_path_buf()))?;
    let value = serde_json::from_reader(BufReader::new(file))?;
    Ok(value)
}

/// Load a nested `{ name, children }` dependency tree.
pub fn load_tree(path: &Path) -> RiskResult<RawTreeNode> {
    log::debug!("Loading dependency tree from {:?}", path);
    read_json(path)
}

/// Load a flat vulnerability list.
pub fn load_vulnerabilities(path: &Path) -> RiskResult<Vec<Vulnerability>> {
    let vulns: Vec<Vulnerability> = read_json(path)?;
    log::debug!("Loaded {} vulnerabilities from {:?}", vulns.len(), path);
    Ok(vulns)
}

/// Load SBOM dependency edges.
pub fn load_graph(path: &Path) -> RiskResult<Vec<DependencyEdge>> {
    let edges = match read_json::<GraphDocument>(path)? {
        GraphDocument::Edges(edges) => edges,
        GraphDocument::Sbom { dependencies } => dependencies,
    };
    log::debug!("Loaded {} dependency edges from {:?}", edges.len(), path);
    Ok(edges)
}
