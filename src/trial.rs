use std::time::{Duration, Instant};

use rand::prelude::*;
use rayon::prelude::*;
use statrs::statistics::Statistics;

use crate::config::TrialConfig;
use crate::package::{count_distinct, generate_package_with};

/// fraction of `num_samples` packages that contain every one of the `category_count` flavors.
/// panics if `num_samples` is 0.
pub fn run_trial_with<R: Rng + ?Sized>(
    rng: &mut R,
    num_samples: usize,
    package_size: usize,
    category_count: usize,
    verbose: bool,
) -> f64 {
    assert!(num_samples > 0, "num_samples must be at least 1");
    let mut hits = 0usize;
    for _ in 0..num_samples {
        let package = generate_package_with(rng, package_size, category_count);
        if count_distinct(&package) == category_count {
            hits += 1;
        }
    }
    let fraction = hits as f64 / num_samples as f64;
    if verbose {
        println!(
            "{} of {} samples contained all {} categories ({})",
            hits, num_samples, category_count, fraction
        );
    }
    fraction
}

pub fn run_trial(
    num_samples: usize,
    package_size: usize,
    category_count: usize,
    verbose: bool,
) -> f64 {
    run_trial_with(
        &mut thread_rng(),
        num_samples,
        package_size,
        category_count,
        verbose,
    )
}

#[derive(Clone, Debug)]
pub struct TrialSet {
    pub config: TrialConfig,
    pub estimates: Vec<f64>,
    pub elapsed: Duration,
}

impl TrialSet {
    pub fn len(&self) -> usize {
        self.estimates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }

    pub fn mean(&self) -> f64 {
        self.estimates.iter().mean()
    }

    // NaN for fewer than two trials
    pub fn std_dev(&self) -> f64 {
        self.estimates.iter().std_dev()
    }

    pub fn min(&self) -> f64 {
        Statistics::min(self.estimates.iter())
    }

    pub fn max(&self) -> f64 {
        Statistics::max(self.estimates.iter())
    }
}

fn batch_rng(config: &TrialConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub fn run_trials_with<R: Rng + ?Sized>(rng: &mut R, config: &TrialConfig) -> TrialSet {
    tracing::info!(
        trials = config.num_trials,
        samples = config.num_samples,
        n = config.package_size,
        m = config.category_count,
        "starting batch"
    );
    let now = Instant::now();
    let estimates = (0..config.num_trials)
        .map(|_| {
            run_trial_with(
                &mut *rng,
                config.num_samples,
                config.package_size,
                config.category_count,
                config.verbose,
            )
        })
        .collect::<Vec<f64>>();
    let elapsed = now.elapsed();
    tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "batch finished");
    TrialSet {
        config: *config,
        estimates,
        elapsed,
    }
}

/// runs the batch sequentially, seeded from `config.seed` when present.
pub fn run_trials(config: &TrialConfig) -> TrialSet {
    run_trials_with(&mut batch_rng(config), config)
}

/// like `run_trials` but spreads trials over the rayon pool.
/// every trial gets its own generator seeded from the batch generator, so a seeded
/// batch gives the same estimates regardless of thread count.
pub fn run_trials_parallel(config: &TrialConfig) -> TrialSet {
    let mut master = batch_rng(config);
    let seeds = (0..config.num_trials)
        .map(|_| master.gen::<u64>())
        .collect::<Vec<u64>>();
    tracing::info!(
        trials = config.num_trials,
        threads = rayon::current_num_threads(),
        "starting parallel batch"
    );

    let now = Instant::now();
    let estimates = seeds
        .into_par_iter()
        .map(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            run_trial_with(
                &mut rng,
                config.num_samples,
                config.package_size,
                config.category_count,
                config.verbose,
            )
        })
        .collect::<Vec<f64>>();
    let elapsed = now.elapsed();
    tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "parallel batch finished");
    TrialSet {
        config: *config,
        estimates,
        elapsed,
    }
}
