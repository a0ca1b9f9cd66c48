//! Integration tests for vantage-portfolio.
//!
//! These tests run the engine end to end on small, hand-checkable price
//! tables and on a synthetic multi-year panel.

use approx::assert_relative_eq;
use vantage_core::{AssetId, Date, PriceSeries, PriceTable};
use vantage_portfolio::prelude::*;
use vantage_portfolio::{cumulative_growth, AssetBounds};

// =============================================================================
// TEST FIXTURES
// =============================================================================

fn start() -> Date {
    Date::from_ymd(2024, 1, 2).unwrap()
}

fn table<const N: usize>(columns: &[(&str, [f64; N])]) -> PriceTable {
    PriceTable::new(
        columns
            .iter()
            .map(|(asset, prices)| PriceSeries::from_daily_prices(*asset, start(), prices).unwrap())
            .collect(),
    )
    .unwrap()
}

fn simple_hash(seed: u64, i: u64) -> u64 {
    let mut x = seed
        .wrapping_mul(6_364_136_223_846_793_005)
        .wrapping_add(i.wrapping_mul(1_442_695_040_888_963_407));
    x ^= x >> 33;
    x = x.wrapping_mul(0xff51_afd7_ed55_8ccd);
    x ^= x >> 33;
    x
}

/// Five years of synthetic daily prices with distinct drifts and volatilities.
fn synthetic_table() -> PriceTable {
    let profiles = [("AAPL", 0.0009, 0.018), ("MSFT", 0.0007, 0.015), ("GOOGL", 0.0006, 0.017)];
    let market: Vec<f64> = (0..1260)
        .map(|t| (simple_hash(7, t) % 2001) as f64 / 1000.0 - 1.0)
        .collect();

    let series = profiles
        .iter()
        .enumerate()
        .map(|(k, (asset, drift, vol))| {
            let mut price = 100.0;
            let mut prices = vec![price];
            for (t, m) in market.iter().enumerate() {
                let own = (simple_hash(k as u64 + 11, t as u64) % 2001) as f64 / 1000.0 - 1.0;
                price *= 1.0 + drift + vol * (0.6 * m + 0.8 * own);
                prices.push(price);
            }
            PriceSeries::from_daily_prices(*asset, start(), &prices).unwrap()
        })
        .collect();

    PriceTable::new(series).unwrap()
}

// =============================================================================
// END-TO-END EXAMPLE
// =============================================================================

#[test]
fn test_two_asset_example() {
    let table = table(&[
        ("A", [100.0, 101.0, 102.0, 101.0]),
        ("B", [50.0, 50.5, 51.0, 50.7]),
    ]);
    let config = AnalyticsConfig::default();

    let a = compute_returns(table.get("A").unwrap(), ReturnType::Simple).unwrap();
    assert_relative_eq!(a.values()[0], 0.01, epsilon = 1e-12);
    assert_relative_eq!(a.values()[1], 0.009_900_990_099, epsilon = 1e-12);
    assert_relative_eq!(a.values()[2], -0.009_803_921_569, epsilon = 1e-12);

    let returns = compute_all_returns(&table, &config).unwrap();
    let summary = compute_summary(&returns[0], 0.0, 252).unwrap();
    assert!(summary.mean_daily > 0.0);
    assert!(summary.sharpe.is_finite());

    let optimized = optimize_portfolio(&returns, 0.0, 252, &WeightBounds::default()).unwrap();
    assert_eq!(optimized.weights.len(), 2);
    assert_relative_eq!(optimized.weights.total(), 1.0, epsilon = 1e-9);
    for (_, w) in optimized.weights.iter() {
        assert!((0.0..=1.0).contains(&w));
    }
}

#[test]
fn test_identical_assets_get_equal_weights() {
    let prices = [100.0, 101.0, 102.0, 101.0, 103.0, 102.5];
    let table = table(&[("X", prices), ("Y", prices), ("Z", prices)]);
    let returns = compute_all_returns(&table, &AnalyticsConfig::default()).unwrap();

    let optimized = optimize_portfolio(&returns, 0.0, 252, &WeightBounds::default()).unwrap();
    for (_, w) in optimized.weights.iter() {
        assert_relative_eq!(w, 1.0 / 3.0, epsilon = 1e-9);
    }
}

#[test]
fn test_proportional_assets_get_equal_weights() {
    // Y moves twice as much as X and Z three times as much, day by day
    let moves = [0.012, -0.005, 0.008, 0.001, -0.007, 0.010];
    let path = |scale: f64| {
        let mut prices = [0.0; 7];
        prices[0] = 100.0;
        for (t, m) in moves.iter().enumerate() {
            prices[t + 1] = prices[t] * (1.0 + scale * m);
        }
        prices
    };
    let table = table(&[("X", path(1.0)), ("Y", path(2.0)), ("Z", path(3.0))]);
    let returns = compute_all_returns(&table, &AnalyticsConfig::default()).unwrap();

    let optimized = optimize_portfolio(&returns, 0.0, 252, &WeightBounds::default()).unwrap();
    for (_, w) in optimized.weights.iter() {
        assert_relative_eq!(w, 1.0 / 3.0, epsilon = 1e-9);
    }
}

#[test]
fn test_constant_prices_are_degenerate() {
    let table = table(&[("FLAT", [20.0, 20.0, 20.0, 20.0])]);
    let returns = compute_all_returns(&table, &AnalyticsConfig::default()).unwrap();

    let err = compute_summary(&returns[0], 0.0, 252).unwrap_err();
    assert!(matches!(err, PortfolioError::DegenerateVolatility { .. }));
}

#[test]
fn test_misaligned_returns_rejected() {
    let a = PriceSeries::from_daily_prices("A", start(), &[100.0, 101.0, 102.0]).unwrap();
    let b = PriceSeries::from_daily_prices("B", start().add_days(1), &[50.0, 51.0, 52.0]).unwrap();

    // The table itself refuses misaligned prices
    assert!(PriceTable::new(vec![a.clone(), b.clone()]).is_err());

    // Returns computed separately are checked again by every combining operation
    let returns = vec![
        compute_returns(&a, ReturnType::Simple).unwrap(),
        compute_returns(&b, ReturnType::Simple).unwrap(),
    ];
    for result in [
        optimize_portfolio(&returns, 0.0, 252, &WeightBounds::default()).map(|_| ()),
        correlation_matrix(&returns).map(|_| ()),
        portfolio_performance(&returns, None).map(|_| ()),
    ] {
        assert!(matches!(result, Err(PortfolioError::DataAlignment { .. })));
    }
}

#[test]
fn test_infeasible_bounds_name_the_constraint() {
    let table = table(&[
        ("A", [100.0, 101.0, 100.0, 102.0]),
        ("B", [50.0, 49.0, 50.5, 50.2]),
    ]);
    let returns = compute_all_returns(&table, &AnalyticsConfig::default()).unwrap();

    let err = optimize_portfolio(&returns, 0.0, 252, &WeightBounds::uniform(0.0, 0.3)).unwrap_err();
    assert!(matches!(err, PortfolioError::InfeasibleConstraints { .. }));
    assert!(err.to_string().contains("upper bounds sum"));

    let bounds = WeightBounds::default().with_asset("B", 0.9, 0.5);
    let err = optimize_portfolio(&returns, 0.0, 252, &bounds).unwrap_err();
    assert!(err.to_string().contains("B"));
}

// =============================================================================
// SYNTHETIC PANEL
// =============================================================================

#[test]
fn test_full_analysis_on_synthetic_panel() {
    let table = synthetic_table();
    let config = AnalyticsConfig::default().with_risk_free_rate(0.02);
    let report = PortfolioAnalyzer::new(config).unwrap().analyze(&table).unwrap();

    assert_eq!(report.observations, 1260);
    assert_eq!(report.summaries.len(), 3);
    assert_eq!(report.rolling_volatility.len(), 3);
    assert_eq!(report.rolling_volatility[0].len(), 1260 - 30 + 1);

    for summary in &report.summaries {
        assert_eq!(summary.observations, 1260);
        assert_relative_eq!(summary.annual_return, summary.mean_daily * 252.0, epsilon = 1e-12);
        assert_relative_eq!(
            summary.annual_vol,
            summary.vol_daily * 252.0_f64.sqrt(),
            epsilon = 1e-12
        );
    }

    for i in 0..3 {
        assert_relative_eq!(report.correlation.values[i][i], 1.0);
        for j in 0..3 {
            assert_relative_eq!(
                report.correlation.values[i][j],
                report.correlation.values[j][i],
                epsilon = 1e-15
            );
        }
    }

    let optimized = &report.optimized;
    assert_relative_eq!(optimized.weights.total(), 1.0, epsilon = 1e-9);
    assert!(optimized.sharpe >= report.equal_weight.summary.sharpe - 1e-9);
    let best_single = report
        .summaries
        .iter()
        .map(|s| s.sharpe)
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(optimized.sharpe >= best_single - 1e-9);
}

#[test]
fn test_optimizer_matches_portfolio_sharpe() {
    let table = synthetic_table();
    let config = AnalyticsConfig::default().with_risk_free_rate(0.01);
    let returns = compute_all_returns(&table, &config).unwrap();

    let optimized = optimize_with_config(&returns, &config).unwrap();
    let realized = portfolio_sharpe(&returns, &optimized.weights, &config).unwrap();
    assert_relative_eq!(optimized.sharpe, realized, max_relative = 1e-9);
}

#[test]
fn test_optimizer_finds_the_global_maximum() {
    let table = synthetic_table();
    let config = AnalyticsConfig::default().with_risk_free_rate(0.02);
    let returns = compute_all_returns(&table, &config).unwrap();
    let assets = table.assets();
    let sharpe_at = |w: &[f64]| {
        let weights = PortfolioWeights::new(assets.clone(), w.to_vec()).unwrap();
        portfolio_sharpe(&returns, &weights, &config).unwrap()
    };

    let optimized = optimize_with_config(&returns, &config).unwrap();
    let best = optimized.weights.values().to_vec();
    let peak = sharpe_at(&best);
    assert_relative_eq!(peak, optimized.sharpe, max_relative = 1e-9);

    // No point of a 2% grid over the simplex does better
    let steps = 50;
    let mut grid_best = f64::NEG_INFINITY;
    for i in 0..=steps {
        for j in 0..=steps - i {
            let a = f64::from(i) / f64::from(steps);
            let b = f64::from(j) / f64::from(steps);
            grid_best = grid_best.max(sharpe_at(&[a, b, (1.0 - a - b).max(0.0)]));
        }
    }
    assert!(peak >= grid_best - 1e-9, "{peak} < {grid_best}");

    // Nor does any small feasible move away from the optimum
    let eps = 1e-4;
    for from in 0..3 {
        for to in 0..3 {
            if from == to || best[from] < eps {
                continue;
            }
            let mut moved = best.clone();
            moved[from] -= eps;
            moved[to] += eps;
            assert!(sharpe_at(&moved) <= peak + 1e-9, "move {from} -> {to}");
        }
    }
}

#[test]
fn test_bounds_are_respected_on_synthetic_panel() {
    let table = synthetic_table();
    let config = AnalyticsConfig::default().with_weight_bounds(
        WeightBounds::uniform(0.1, 0.5).with_asset("GOOGL", 0.2, 0.3),
    );
    let returns = compute_all_returns(&table, &config).unwrap();
    let optimized = optimize_with_config(&returns, &config).unwrap();

    for (asset, w) in optimized.weights.iter() {
        let AssetBounds { min, max } = config.weight_bounds.for_asset(asset);
        assert!(w >= min - 1e-12 && w <= max + 1e-12, "{asset}: {w}");
    }
}

#[test]
fn test_equal_weight_performance() {
    let table = synthetic_table();
    let returns = compute_all_returns(&table, &AnalyticsConfig::default()).unwrap();
    let perf = portfolio_performance(&returns, None).unwrap();

    for t in [0, 100, 1259] {
        let row_mean = returns.iter().map(|r| r.values()[t]).sum::<f64>() / 3.0;
        assert_relative_eq!(perf.portfolio_returns[t], row_mean, epsilon = 1e-15);
    }

    // Asset growth curves end at the price ratio
    for (curve, series) in perf.asset_growth.iter().zip(table.series()) {
        let ratio = series.prices()[1260] / series.prices()[0];
        assert_relative_eq!(curve.terminal_value(), ratio, max_relative = 1e-10);
    }

    let weights = PortfolioWeights::new(
        vec![AssetId::new("AAPL"), AssetId::new("MSFT"), AssetId::new("GOOGL")],
        vec![0.5, 0.3, 0.2],
    )
    .unwrap();
    let perf = portfolio_performance(&returns, Some(&weights)).unwrap();
    let growth = cumulative_growth(&returns[0]);
    assert_eq!(perf.asset_growth[0], growth);
}

#[test]
fn test_log_returns_pipeline() {
    let table = synthetic_table();
    let config = AnalyticsConfig::default().with_return_type(ReturnType::Log);
    let returns = compute_all_returns(&table, &config).unwrap();

    assert!(returns.iter().all(|r| r.return_type() == ReturnType::Log));
    let rebuilt = reconstruct_prices(100.0, &returns[1]);
    assert_relative_eq!(rebuilt[1260], table.series()[1].prices()[1260], max_relative = 1e-10);

    let summaries = compute_summaries(&returns, &config).unwrap();
    assert_eq!(summaries.len(), 3);
}
