//! Benchmarks for the vantage-portfolio analytics.
//!
//! Run with: cargo bench -p vantage-portfolio

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use vantage_core::{Date, PriceSeries, PriceTable};
use vantage_portfolio::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn simple_hash(seed: u64, i: u64) -> u64 {
    let mut x = seed
        .wrapping_mul(6_364_136_223_846_793_005)
        .wrapping_add(i.wrapping_mul(1_442_695_040_888_963_407));
    x ^= x >> 33;
    x = x.wrapping_mul(0xff51_afd7_ed55_8ccd);
    x ^= x >> 33;
    x
}

/// `assets` correlated price paths over `days` trading days.
fn create_table(assets: usize, days: usize) -> PriceTable {
    let start = Date::from_ymd(2020, 1, 2).unwrap();
    let series = (0..assets)
        .map(|k| {
            let drift = 0.0002 + 0.0001 * (k % 7) as f64;
            let vol = 0.01 + 0.002 * (k % 5) as f64;
            let mut price = 100.0;
            let mut prices = Vec::with_capacity(days + 1);
            prices.push(price);
            for t in 0..days as u64 {
                let market = (simple_hash(1, t) % 2001) as f64 / 1000.0 - 1.0;
                let own = (simple_hash(k as u64 + 2, t) % 2001) as f64 / 1000.0 - 1.0;
                price *= 1.0 + drift + vol * (0.5 * market + 0.85 * own);
                prices.push(price);
            }
            PriceSeries::from_daily_prices(format!("A{k:03}"), start, &prices).unwrap()
        })
        .collect();

    PriceTable::new(series).unwrap()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_returns_and_summaries(c: &mut Criterion) {
    let mut group = c.benchmark_group("summaries");

    for assets in [3, 20, 100] {
        let table = create_table(assets, 1260);
        let config = AnalyticsConfig::default();
        group.throughput(Throughput::Elements(assets as u64));

        group.bench_with_input(BenchmarkId::new("returns", assets), &table, |b, table| {
            b.iter(|| compute_all_returns(black_box(table), &config).unwrap());
        });

        let returns = compute_all_returns(&table, &config).unwrap();
        group.bench_with_input(BenchmarkId::new("summaries", assets), &returns, |b, returns| {
            b.iter(|| compute_summaries(black_box(returns), &config).unwrap());
        });
    }

    group.finish();
}

fn bench_optimizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimizer");
    group.sample_size(20);

    for assets in [3, 10, 30] {
        let table = create_table(assets, 1260);
        let config = AnalyticsConfig::default();
        let returns = compute_all_returns(&table, &config).unwrap();

        group.bench_with_input(BenchmarkId::new("max_sharpe", assets), &returns, |b, returns| {
            b.iter(|| optimize_with_config(black_box(returns), &config).unwrap());
        });
    }

    group.finish();
}

fn bench_full_analysis(c: &mut Criterion) {
    let table = create_table(3, 1260);
    let analyzer = PortfolioAnalyzer::default();

    c.bench_function("analyze_3_assets_5y", |b| {
        b.iter(|| analyzer.analyze(black_box(&table)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_returns_and_summaries,
    bench_optimizer,
    bench_full_analysis
);
criterion_main!(benches);
