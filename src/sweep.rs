use std::ops::RangeInclusive;

use rand::prelude::*;

use crate::config::TrialConfig;
use crate::exact::exact_probability;
use crate::trial::{run_trials, run_trials_parallel, TrialSet};

#[derive(Clone, Debug)]
pub struct SweepRow {
    pub package_size: usize,
    pub trials: TrialSet,
    pub exact: f64,
}

/// runs a batch for every package size in `sizes`, holding the flavor count of `base` fixed.
pub fn sweep_package_sizes(
    base: &TrialConfig,
    sizes: RangeInclusive<usize>,
    parallel: bool,
) -> Vec<SweepRow> {
    // every size draws its own seed from one generator seeded by the sweep
    let mut master = base.seed.map(StdRng::seed_from_u64);
    sizes
        .map(|package_size| {
            let config = TrialConfig {
                package_size,
                seed: master.as_mut().map(|rng| rng.gen::<u64>()),
                ..*base
            };
            let trials = if parallel {
                run_trials_parallel(&config)
            } else {
                run_trials(&config)
            };
            SweepRow {
                package_size,
                exact: exact_probability(package_size, config.category_count),
                trials,
            }
        })
        .collect()
}
