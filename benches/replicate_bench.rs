//! Replication Benchmark
//!
//! Measures replication of wide, deep and mixed unevaluated trees.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use symb_replica::{Assumption, Assumptions, Expr, Replicator, replicate};

// =============================================================================
// Expression Generators
// =============================================================================

/// Sum of N mixed terms: `i*x**i`, `f(x, i/7)`, `i + y`, ...
fn generate_mixed(n: usize) -> Expr {
    let x = Expr::symbol("x");
    let y = Expr::symbol_with("y", Assumptions::new().with(Assumption::Positive, true));
    let terms = (1..=n)
        .map(|i| {
            let k = i64::try_from(i).unwrap_or(i64::MAX);
            match i % 4 {
                0 => Expr::mul_unevaluated(vec![
                    Expr::integer(k),
                    Expr::pow_unevaluated(x.clone(), Expr::integer(k % 10 + 2)),
                ]),
                1 => Expr::function(
                    "f",
                    vec![x.clone(), Expr::rational(k, 7).unwrap_or_else(|_| Expr::half())],
                ),
                2 => Expr::add_unevaluated(vec![Expr::integer(k), y.clone()]),
                _ => Expr::mul_unevaluated(vec![Expr::float(k as f64 * 0.5), Expr::half()]),
            }
        })
        .collect();
    Expr::add_unevaluated(terms)
}

/// Chain of N nested unary functions around `x`.
fn generate_deep(n: usize) -> Expr {
    let mut e = Expr::symbol("x");
    for _ in 0..n {
        e = Expr::function("g", vec![e]);
    }
    e
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("replicate_mixed");
    for n in [10, 100, 1000] {
        let expr = generate_mixed(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &expr, |b, e| {
            b.iter(|| replicate(black_box(e)));
        });
    }
    group.finish();
}

fn bench_deep(c: &mut Criterion) {
    let mut group = c.benchmark_group("replicate_deep");
    group.sample_size(20);
    let expr = generate_deep(2000);
    group.bench_function("nested_2000", |b| {
        b.iter(|| replicate(black_box(&expr)));
    });
    let traced = Replicator::new();
    group.bench_function("nested_2000_traced", |b| {
        b.iter(|| traced.replicate_traced(black_box(&expr)));
    });
    group.finish();
}

criterion_group!(benches, bench_mixed, bench_deep);
criterion_main!(benches);
