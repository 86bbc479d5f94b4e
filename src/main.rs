use clap::Parser;
use console::style;
use env_logger::Env;
use riskview::cli::Args;
use riskview::engine::{RiskPipeline, TreeInput};
use riskview::errors::{RiskResult, RiskViewError};
use riskview::loader;
use riskview::report::{InputReport, RiskReport};
use riskview::summary::RiskBand;
use std::path::Path;

fn load_input(path: &Path, graph_root: Option<&str>) -> RiskResult<TreeInput> {
    match graph_root {
        Some(root) => Ok(TreeInput::Graph {
            root: root.to_string(),
            edges: loader::load_graph(path)?,
        }),
        None => Ok(TreeInput::Nested(loader::load_tree(path)?)),
    }
}

fn print_summary(report: &RiskReport) {
    for result in &report.results {
        let source = style(&result.source).bold();
        if let Some(err) = &result.error {
            eprintln!("    {} {} {}", style("✗").red(), source, style(err).red());
        } else if result.is_empty_state() {
            eprintln!("    {} {} no risky dependency paths", style("✓").green(), source);
        } else {
            let s = &result.summary;
            eprintln!(
                "    {} {} root risk {:.2} ({}), {} of {} nodes risky (critical {}, high {})",
                style("⚠").yellow(),
                source,
                s.root_risk,
                RiskBand::classify(s.root_risk),
                s.risky_nodes,
                s.node_count,
                style(s.breakdown.critical).red(),
                style(s.breakdown.high).yellow(),
            );
        }
    }
    eprintln!(
        "    {} Duration: {:.3}s",
        style("└─").dim(),
        report.report_info.duration_seconds
    );
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let log_level = if args.quiet {
        "error"
    } else if args.verbose {
        "debug"
    } else {
        "info"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    log::info!("riskview starting with args: {:?}", args);

    if args.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()
            .map_err(|e| RiskViewError::ThreadPool(e.to_string()))?;
    }

    let start_time = chrono::Utc::now();
    let options = args.pipeline_options();
    let pipeline = RiskPipeline::new(options.clone())?;
    let vulns = loader::load_vulnerabilities(&args.vulns)?;

    let mut sources = Vec::with_capacity(args.trees.len());
    let mut inputs = Vec::with_capacity(args.trees.len());
    for path in &args.trees {
        inputs.push(load_input(path, args.graph_root.as_deref())?);
        sources.push(path.display().to_string());
    }

    let results: Vec<InputReport> = sources
        .into_iter()
        .zip(pipeline.run_batch(&inputs, &vulns))
        .map(|(source, result)| InputReport::from_result(source, result))
        .collect();

    let report = RiskReport::new(&options, vulns.len(), start_time, results);

    match &args.output {
        Some(path) => report.write_json(path)?,
        None => {
            let stdout = std::io::stdout();
            report.write_to(stdout.lock())?;
            println!();
        }
    }

    if !args.quiet {
        print_summary(&report);
    }

    if report.failed_inputs() > 0 {
        return Err(format!("{} input(s) failed", report.failed_inputs()).into());
    }
    Ok(())
}
