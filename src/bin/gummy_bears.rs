use std::error::Error;

use clap::{Args, Parser, Subcommand};
use lib::exact::{partition_probability, surjection_probability, to_f64};
use lib::report::{print_summary, print_sweep, trial_chart};
use lib::*;

#[derive(Debug, Parser)]
#[command(
    name = "gummy_bears",
    version,
    about = "odds that a bag of n gummy bears holds all m flavors"
)]
struct Opt {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct BatchOpts {
    #[arg(long)]
    samples: Option<usize>,
    #[arg(long)]
    trials: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    /// run trials on the rayon pool
    #[arg(long)]
    parallel: bool,
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// estimate the probability for a single (n, m)
    Simulate {
        #[arg(short = 'n', long)]
        package_size: Option<usize>,
        #[arg(short = 'm', long)]
        categories: Option<usize>,
        /// toml file with any TrialConfig fields; flags override it
        #[arg(long)]
        config: Option<String>,
        #[arg(short, long)]
        verbose: bool,
        #[arg(long)]
        chart: bool,
        #[command(flatten)]
        batch: BatchOpts,
    },
    /// estimate over a range of package sizes at fixed m
    Sweep {
        #[arg(short = 'm', long, default_value_t = 12)]
        categories: usize,
        #[arg(long, default_value_t = 12)]
        from: usize,
        #[arg(long, default_value_t = 25)]
        to: usize,
        #[command(flatten)]
        batch: BatchOpts,
    },
    /// exact probabilities for n - m in 0..=max_extra
    Exact {
        #[arg(short = 'm', long, default_value_t = 12)]
        categories: usize,
        #[arg(long, default_value_t = 3)]
        max_extra: usize,
    },
}

impl BatchOpts {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            num_samples: self.samples,
            num_trials: self.trials,
            seed: self.seed,
            ..Default::default()
        }
    }

    fn setup_pool(&self) -> Result<(), Box<dyn Error>> {
        if self.parallel {
            let threads = self.threads.unwrap_or_else(num_cpus::get);
            tracing::debug!(threads, "building rayon pool");
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()?;
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let opts = Opt::parse();

    match opts.command {
        Command::Simulate {
            package_size,
            categories,
            config,
            verbose,
            chart,
            batch,
        } => {
            let file_config = match config {
                Some(path) => TrialConfig::load(path)?,
                None => TrialConfig::default(),
            };
            let trial_config = file_config.with_overrides(&ConfigOverrides {
                package_size,
                category_count: categories,
                verbose,
                ..batch.overrides()
            });
            trial_config.validate()?;
            batch.setup_pool()?;

            let set = if batch.parallel {
                run_trials_parallel(&trial_config)
            } else {
                run_trials(&trial_config)
            };
            print_summary(&set);
            println!(
                "exact = {:.7}",
                exact_probability(trial_config.package_size, trial_config.category_count)
            );
            if chart {
                print!("{}", trial_chart(&set, 60));
            }
        }
        Command::Sweep {
            categories,
            from,
            to,
            batch,
        } => {
            let base = TrialConfig::default().with_overrides(&ConfigOverrides {
                category_count: Some(categories),
                ..batch.overrides()
            });
            base.validate()?;
            batch.setup_pool()?;

            let rows = sweep_package_sizes(&base, from..=to, batch.parallel);
            print_sweep(&rows, 60);
        }
        Command::Exact {
            categories,
            max_extra,
        } => {
            if categories == 0 {
                return Err("categories must be at least 1".into());
            }
            println!("{:>4} {:>16} {:>16}", "n", "stirling", "partitions");
            for extra in 0..=max_extra {
                let n = categories + extra;
                println!(
                    "{:>4} {:>16.10} {:>16.10}",
                    n,
                    to_f64(&surjection_probability(n, categories)),
                    to_f64(&partition_probability(n, categories))
                );
            }
        }
    }
    Ok(())
}
