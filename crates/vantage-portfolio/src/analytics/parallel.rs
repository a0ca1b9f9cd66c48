//! Per-asset fan-out.
//!
//! Every per-asset step (returns, summaries) is independent, so wide tables
//! are spread over rayon's pool when the `parallel` feature is compiled in.

use crate::types::AnalyticsConfig;

/// Applies `f` to each asset's item, in order.
///
/// Runs on rayon only when the `parallel` feature is on, `config.parallel`
/// is set and there are at least `config.parallel_threshold` items. The
/// result is identical either way.
#[allow(unused_variables)]
pub fn maybe_parallel_map<T, U, F>(items: &[T], config: &AnalyticsConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}
