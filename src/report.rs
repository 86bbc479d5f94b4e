use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::PipelineOptions;
use crate::errors::{RiskResult, RiskViewError};
use crate::models::ViewTreeNode;
use crate::summary::TreeSummary;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReport {
    pub report_info: ReportInfo,
    pub results: Vec<InputReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportInfo {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_seconds: f64,
    pub decay_factor: f64,
    pub include_zero_risk: bool,
    pub self_prefix: String,
    pub vulnerability_count: usize,
}

/// Outcome for one input tree. `tree` is `None` both when nothing risky
/// remained after pruning and when the input failed (`error` is set).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputReport {
    pub source: String,
    pub summary: TreeSummary,
    pub tree: Option<ViewTreeNode>,
    pub error: Option<String>,
}

impl InputReport {
    pub fn from_result(source: impl Into<String>, result: RiskResult<Option<ViewTreeNode>>) -> Self {
        let source = source.into();
        match result {
            Ok(tree) => Self {
                source,
                summary: TreeSummary::from_tree(tree.as_ref()),
                tree,
                error: None,
            },
            Err(e) => {
                log::error!("{}: {}", source, e);
                Self {
                    source,
                    summary: TreeSummary::default(),
                    tree: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    pub fn is_empty_state(&self) -> bool {
        self.error.is_none() && self.tree.is_none()
    }
}

impl RiskReport {
    pub fn new(
        options: &PipelineOptions,
        vulnerability_count: usize,
        start_time: DateTime<Utc>,
        results: Vec<InputReport>,
    ) -> Self {
        let end_time = Utc::now();
        let duration_seconds = (end_time - start_time)
            .num_microseconds()
            .map(|us| us as f64 / 1_000_000.0)
            .unwrap_or_default();
        Self {
            report_info: ReportInfo {
                start_time,
                end_time,
                duration_seconds,
                decay_factor: options.decay_factor,
                include_zero_risk: options.include_zero_risk,
                self_prefix: options.self_prefix.clone(),
                vulnerability_count,
            },
            results,
        }
    }

    pub fn failed_inputs(&self) -> usize {
        self.results.iter().filter(|r| r.error.is_some()).count()
    }

    /// Write pretty JSON to `path`.
    pub fn write_json(&self, path: &Path) -> RiskResult<()> {
        let file = File::create(path).map_err(|e| RiskViewError::io(e, path.to_path_buf()))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer
            .flush()
            .map_err(|e| RiskViewError::io(e, path.to_path_buf()))?;
        log::info!("Report written to {:?}", path);
        Ok(())
    }

    pub fn write_to<W: Write>(&self, writer: W) -> RiskResult<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_report() -> RiskReport {
        let tree = ViewTreeNode::new("root", 5.0, vec![ViewTreeNode::new("a", 10.0, vec![])]);
        RiskReport::new(
            &PipelineOptions::default(),
            1,
            Utc::now(),
            vec![
                InputReport::from_result("tree.json", Ok(Some(tree))),
                InputReport::from_result("clean.json", Ok(None)),
                InputReport::from_result(
                    "cyclic.json",
                    Err(RiskViewError::malformed_tree("a", vec!["a".into(), "a".into()])),
                ),
            ],
        )
    }

    #[test]
    fn test_input_report_states() {
        let report = sample_report();
        assert_eq!(report.results[0].summary.node_count, 2);
        assert!(!report.results[0].is_empty_state());
        assert!(report.results[1].is_empty_state());
        assert!(report.results[2].error.is_some());
        assert_eq!(report.failed_inputs(), 1);
        assert!(report.report_info.duration_seconds >= 0.0);
    }

    #[test]
    fn test_write_json_roundtrips() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let dir = TempDir::new()?;
        let path = dir.path().join("report.json");
        sample_report().write_json(&path)?;

        let value: serde_json::Value = serde_json::from_reader(File::open(&path)?)?;
        assert_eq!(value["results"][0]["tree"]["children"][0]["name"], "a");
        assert!(value["results"][1]["tree"].is_null());
        assert_eq!(value["report_info"]["decay_factor"], 1.0);
        Ok(())
    }
}
