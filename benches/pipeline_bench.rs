//! Benchmarks for the risk pipeline.
//!
//! Run with: cargo bench

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use riskview::{materialize, PipelineOptions, RawTreeNode, RiskPipeline, Vulnerability};
use std::hint::black_box;

/// Complete tree with `fanout` children per node, `depth` levels below the root.
fn wide_tree(fanout: usize, depth: usize, prefix: &str) -> RawTreeNode {
    let children = if depth == 0 {
        Vec::new()
    } else {
        (0..fanout)
            .map(|i| wide_tree(fanout, depth - 1, &format!("{prefix}.{i}")))
            .collect()
    };
    RawTreeNode::new(prefix, children)
}

/// One vulnerability for every `stride`-th leaf-level name.
fn vulns_for(fanout: usize, depth: usize, stride: usize) -> Vec<Vulnerability> {
    let leaves = fanout.pow(depth as u32);
    (0..leaves)
        .step_by(stride)
        .map(|n| {
            let mut name = String::from("pkg");
            let mut rest = n;
            let mut digits = Vec::with_capacity(depth);
            for _ in 0..depth {
                digits.push(rest % fanout);
                rest /= fanout;
            }
            for d in digits.iter().rev() {
                name.push_str(&format!(".{d}"));
            }
            Vulnerability::new(name, 5.0)
        })
        .collect()
}

fn bench_materialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/materialize");
    for (fanout, depth) in [(4, 5), (8, 5), (2, 14)] {
        let raw = wide_tree(fanout, depth, "pkg");
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{fanout}^{depth}")),
            &raw,
            |b, raw| b.iter(|| black_box(materialize(raw))),
        );
    }
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/pipeline");
    for (fanout, depth) in [(4, 5), (8, 5)] {
        let raw = wide_tree(fanout, depth, "pkg");
        let vulns = vulns_for(fanout, depth, 7);

        for include_zero_risk in [false, true] {
            let pipeline = RiskPipeline::new(PipelineOptions::default().with_zero_risk(include_zero_risk))
                .expect("default options are valid");
            let label = if include_zero_risk { "all" } else { "risky" };
            group.bench_with_input(
                BenchmarkId::new(label, format!("{fanout}^{depth}")),
                &(&raw, &vulns),
                |b, (raw, vulns)| b.iter(|| black_box(pipeline.run(raw, vulns))),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_materialize, bench_pipeline);
criterion_main!(benches);
