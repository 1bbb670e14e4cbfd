pub mod config;
pub mod exact;
pub mod package;
pub mod report;
pub mod sweep;
pub mod trial;

pub use config::{ConfigError, ConfigOverrides, TrialConfig};
pub use exact::{exact_probability, partition_probability, surjection_probability};
pub use package::{count_distinct, generate_package, generate_package_with};
pub use report::{bar_chart, print_summary};
pub use sweep::{sweep_package_sizes, SweepRow};
pub use trial::{run_trial, run_trial_with, run_trials, run_trials_parallel, TrialSet};

use tracing_subscriber::EnvFilter;

/// installs the global subscriber. RUST_LOG overrides the default `warn` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // any later call keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
